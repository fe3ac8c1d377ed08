//! 属性注入集成测试


use common::*;
use di_abstractions::{
    ConfigurationError, DependencyError, Injectable, InjectionMode, InjectionPolicy, IocContainer,
    ResolutionError,
};
use di_impl::{InjectorSettings, IocProvider, ResolutionOutcome};
use infrastructure_common::ConfigSource;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn provider(policy: InjectionPolicy) -> IocProvider {
    init_test_logging();
    IocProvider::with_policy(Some(policy)).unwrap()
}

fn register_both(provider: &IocProvider) {
    provider.register_type::<dyn Interface1, Concrete1>();
    provider.register_type::<dyn Interface2, Concrete2>();
}

#[test]
fn test_marked_only_without_registrations_leaves_properties_unset() {
    let provider = provider(InjectionPolicy::marked_only());

    let instance = provider.construct::<HasDependentProperty>().unwrap();

    assert!(instance.dependency.is_none());
    assert!(instance.marked_dependency.is_none());
}

#[test]
fn test_marked_only_injects_only_marked_property() {
    let provider = provider(InjectionPolicy::marked_only());
    register_both(&provider);

    let instance = provider.construct::<HasDependentProperty>().unwrap();

    assert!(instance.dependency.is_none());
    assert_eq!(
        instance.marked_dependency.as_ref().map(|d| d.id()),
        Some("concrete2")
    );
}

#[test]
fn test_all_interface_properties_injects_every_interface() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    register_both(&provider);

    let instance = provider.construct::<HasDependentProperty>().unwrap();

    assert_eq!(instance.dependency.as_ref().map(|d| d.id()), Some("concrete1"));
    assert_eq!(
        instance.marked_dependency.as_ref().map(|d| d.id()),
        Some("concrete2")
    );
}

#[test]
fn test_marked_only_with_escalation_fails_at_provider_construction() {
    let policy = InjectionPolicy::new(InjectionMode::MarkedOnly, true);

    let err = IocProvider::with_policy(Some(policy)).unwrap_err();

    assert!(matches!(err, ConfigurationError::UnsupportedPolicy { .. }));
}

#[test]
fn test_concrete_property_is_never_injected() {
    for policy in [
        InjectionPolicy::all_interface_properties(),
        InjectionPolicy::all_interface_properties().with_throw_on_failure(true),
        InjectionPolicy::marked_only(),
    ] {
        let provider = provider(policy);
        provider.register_factory::<ErrorInfo, _>(|_| {
            Ok(Arc::new(ErrorInfo {
                message: "registered".to_string(),
            }))
        });

        let instance = provider.construct::<HasConcreteProperty>().unwrap();

        assert!(instance.error.is_none(), "policy {policy}");
    }
}

/// 两个观察到的场景使用完全相同的配置（所有接口属性、两个依赖都已注册），
/// 一个期望只注入未标记属性，另一个期望全部注入。
/// 候选集只由模式决定，因此这里断言两者都被注入。
#[test]
fn test_divergent_scenario_follows_mode_only_rule() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    register_both(&provider);

    let mut instance = HasDependentProperty::create(&provider).unwrap();
    let report = provider.inject_into(&mut instance).unwrap();

    assert_eq!(report.injected(), vec!["dependency", "marked_dependency"]);
    assert!(instance.dependency.is_some());
    assert!(instance.marked_dependency.is_some());
}

#[test]
fn test_disabled_never_modifies_properties() {
    init_test_logging();
    let provider = IocProvider::new();
    register_both(&provider);

    let instance = provider.construct::<HasDependentProperty>().unwrap();

    assert!(instance.dependency.is_none());
    assert!(instance.marked_dependency.is_none());
}

#[test]
fn test_property_without_public_setter_is_skipped() {
    let provider = provider(InjectionPolicy::all_interface_properties().with_throw_on_failure(true));
    register_both(&provider);

    let instance = provider.construct::<HasPrivateProperty>().unwrap();

    assert!(instance.dependency().is_none());
}

#[test]
fn test_missing_registration_without_escalation_is_silent() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    provider.register_type::<dyn Interface1, Concrete1>();

    let mut instance = HasDependentProperty::create(&provider).unwrap();
    let report = provider.inject_into(&mut instance).unwrap();

    assert_eq!(report.outcome("dependency"), Some(ResolutionOutcome::Resolved));
    assert_eq!(
        report.outcome("marked_dependency"),
        Some(ResolutionOutcome::Unresolved)
    );
    assert!(instance.marked_dependency.is_none());
}

#[test]
fn test_escalation_reports_property_and_keeps_partial_injection() {
    let provider =
        provider(InjectionPolicy::all_interface_properties().with_throw_on_failure(true));
    provider.register_type::<dyn Interface1, Concrete1>();

    let mut instance = HasDependentProperty::create(&provider).unwrap();
    let err = provider.inject_into(&mut instance).unwrap_err();

    match err {
        DependencyError::Resolution(ResolutionError::UnresolvedProperty {
            type_name,
            property,
            declared_type,
        }) => {
            assert!(type_name.ends_with("HasDependentProperty"));
            assert_eq!(property, "marked_dependency");
            assert!(declared_type.contains("Interface2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(instance.dependency.is_some());
    assert!(instance.marked_dependency.is_none());

    assert!(provider
        .construct::<HasDependentProperty>()
        .unwrap_err()
        .is_resolution_error());
}

#[test]
fn test_nested_escalation_propagates_through_resolution() {
    let provider =
        provider(InjectionPolicy::all_interface_properties().with_throw_on_failure(true));
    provider.register_type::<dyn Interface1, NeedsInterface2>();

    let err = provider.construct::<HasDependentProperty>().unwrap_err();

    match err {
        DependencyError::Resolution(ResolutionError::UnresolvedProperty {
            type_name,
            property,
            ..
        }) => {
            assert!(type_name.ends_with("NeedsInterface2"));
            assert_eq!(property, "inner");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_factory_failure_propagates_regardless_of_escalation() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    provider.register_factory::<dyn Interface1, _>(|_| {
        Err(DependencyError::creation_failed("dyn Interface1", "backend offline"))
    });

    let err = provider.construct::<HasDependentProperty>().unwrap_err();

    assert!(matches!(err, DependencyError::ComponentCreationFailed { .. }));
}

#[test]
fn test_injection_pass_is_idempotent() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    let shared: Arc<dyn Interface1> = Arc::new(Concrete1);
    provider.register_instance(shared.clone());
    provider.register_type::<dyn Interface2, Concrete2>();

    let mut instance = HasDependentProperty::create(&provider).unwrap();
    let first = provider.inject_into(&mut instance).unwrap();
    let second = provider.inject_into(&mut instance).unwrap();

    assert_eq!(first, second);
    assert!(Arc::ptr_eq(instance.dependency.as_ref().unwrap(), &shared));
}

#[test]
fn test_registration_after_type_binding_is_visible() {
    let provider = provider(InjectionPolicy::marked_only());
    provider.register_type::<HasDependentProperty, HasDependentProperty>();

    let before = provider.resolve::<HasDependentProperty>().unwrap();
    provider.register_type::<dyn Interface2, Concrete2>();
    let after = provider.resolve::<HasDependentProperty>().unwrap();

    assert!(before.marked_dependency.is_none());
    assert!(after.marked_dependency.is_some());
}

#[test]
fn test_dependency_resolutions_are_counted_per_construction() {
    let provider = provider(InjectionPolicy::all_interface_properties());
    let resolutions = Arc::new(AtomicUsize::new(0));
    let counter = resolutions.clone();
    provider.register_factory::<dyn Interface1, _>(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(Concrete1) as Arc<dyn Interface1>)
    });

    provider.construct::<HasDependentProperty>().unwrap();
    provider.construct::<HasDependentProperty>().unwrap();

    assert_eq!(resolutions.load(Ordering::SeqCst), 2);
}

#[test]
fn test_provider_from_settings_file() -> anyhow::Result<()> {
    init_test_logging();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[injection]\nproperty_injection = \"marked_only\"\nthrow_if_property_injection_fails = false"
    )?;

    let settings = InjectorSettings::load(&ConfigSource::new().with_file(file.path()).required())?;
    let provider = IocProvider::from_settings(&settings)?;
    register_both(&provider);

    let instance = provider.construct::<HasDependentProperty>()?;

    assert_eq!(provider.policy().mode(), InjectionMode::MarkedOnly);
    assert!(instance.dependency.is_none());
    assert!(instance.marked_dependency.is_some());
    Ok(())
}

#[test]
fn test_unsupported_settings_are_rejected() {
    let settings = InjectorSettings {
        property_injection: InjectionMode::MarkedOnly,
        throw_if_property_injection_fails: true,
    };

    assert!(IocProvider::from_settings(&settings).is_err());
}

#[test]
fn test_registered_types_lists_services() {
    let provider = provider(InjectionPolicy::disabled());
    register_both(&provider);

    let mut names: Vec<_> = provider
        .registered_types()
        .iter()
        .map(|t| t.short_name().to_string())
        .collect();
    names.sort();

    assert_eq!(names, vec!["Interface1", "Interface2"]);
}
