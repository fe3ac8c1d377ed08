//! 派生宏集成测试

use di_abstractions::{
    DeclaredKind, DependencyResult, Injectable, InjectionPolicy, IocContainer, ServiceResolver,
    TypeInfo,
};
use di_impl::IocProvider;
use injection_macros::Injectable;
use std::sync::Arc;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

pub trait Audit: Send + Sync {
    fn record(&self, entry: &str) -> usize;
}

#[derive(Debug, Injectable)]
#[injectable(provides(dyn Greeter))]
pub struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

#[derive(Debug, Default, Injectable)]
#[injectable(provides(dyn Audit))]
pub struct CountingAudit {
    entries: std::sync::atomic::AtomicUsize,
}

impl Audit for CountingAudit {
    fn record(&self, _entry: &str) -> usize {
        self.entries
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1
    }
}

#[derive(Debug)]
pub struct Settings {
    pub greeting_suffix: String,
}

#[derive(Injectable)]
pub struct Frontdesk {
    #[inject]
    pub greeter: Option<Arc<dyn Greeter>>,
    pub audit: Option<Arc<dyn Audit>>,
    #[inject]
    pub settings: Option<Arc<Settings>>,
    #[inject]
    hidden: Option<Arc<dyn Greeter>>,
    pub visits: u32,
}

impl Frontdesk {
    fn hidden(&self) -> Option<&Arc<dyn Greeter>> {
        self.hidden.as_ref()
    }
}

#[derive(Injectable)]
#[injectable(constructor = Configured::build)]
pub struct Configured {
    pub label: String,
    pub greeter: Option<Arc<dyn Greeter>>,
}

impl Configured {
    fn build(_resolver: &dyn ServiceResolver) -> DependencyResult<Self> {
        Ok(Self {
            label: "configured".to_string(),
            greeter: None,
        })
    }
}

#[test]
fn test_property_table_follows_field_rules() {
    let properties = Frontdesk::properties();
    let names: Vec<_> = properties.iter().map(|p| p.name()).collect();

    assert_eq!(names, vec!["greeter", "audit", "settings", "hidden"]);

    let greeter = &properties[0];
    assert_eq!(greeter.kind(), DeclaredKind::Interface);
    assert!(greeter.has_injection_marker());
    assert!(greeter.has_public_setter());
    assert_eq!(greeter.declared_type(), &TypeInfo::of::<dyn Greeter>());

    let audit = &properties[1];
    assert!(!audit.has_injection_marker());
    assert!(audit.has_public_setter());

    let settings = &properties[2];
    assert_eq!(settings.kind(), DeclaredKind::Concrete);

    let hidden = &properties[3];
    assert!(hidden.has_injection_marker());
    assert!(!hidden.has_public_setter());
}

#[test]
fn test_generated_create_leaves_properties_empty() {
    let provider = IocProvider::new();

    let frontdesk = Frontdesk::create(&provider).unwrap();

    assert!(frontdesk.greeter.is_none());
    assert!(frontdesk.audit.is_none());
    assert!(frontdesk.settings.is_none());
    assert_eq!(frontdesk.visits, 0);
}

#[test]
fn test_marked_only_through_derived_table() {
    let provider = IocProvider::with_policy(Some(InjectionPolicy::marked_only())).unwrap();
    provider.register_type::<dyn Greeter, English>();
    provider.register_singleton_type::<dyn Audit, CountingAudit>();
    provider.register_instance(Arc::new(Settings {
        greeting_suffix: "!".to_string(),
    }));

    let frontdesk = provider.construct::<Frontdesk>().unwrap();

    assert_eq!(frontdesk.greeter.as_ref().map(|g| g.greet()), Some("hello".to_string()));
    assert!(frontdesk.audit.is_none());
    assert!(frontdesk.settings.is_none());
    assert!(frontdesk.hidden().is_none());
}

#[test]
fn test_all_interface_properties_through_derived_table() {
    let provider =
        IocProvider::with_policy(Some(InjectionPolicy::all_interface_properties())).unwrap();
    provider.register_type::<dyn Greeter, English>();
    provider.register_singleton_type::<dyn Audit, CountingAudit>();

    let first = provider.construct::<Frontdesk>().unwrap();
    let second = provider.construct::<Frontdesk>().unwrap();

    assert_eq!(first.audit.as_ref().map(|a| a.record("first")), Some(1));
    assert_eq!(second.audit.as_ref().map(|a| a.record("second")), Some(2));
    assert!(first.hidden().is_none());
}

#[test]
fn test_custom_constructor_is_used() {
    let provider =
        IocProvider::with_policy(Some(InjectionPolicy::all_interface_properties())).unwrap();
    provider.register_type::<dyn Greeter, English>();

    let configured = provider.construct::<Configured>().unwrap();

    assert_eq!(configured.label, "configured");
    assert!(configured.greeter.is_some());
}
