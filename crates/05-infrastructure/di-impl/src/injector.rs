//! 属性注入执行器

use crate::selector::CandidateSelector;
use di_abstractions::{
    ConfigurationResult, DependencyResult, Injectable, InjectionPolicy, PropertyDescriptor,
    ResolutionError, ServiceResolver,
};
use tracing::{debug, warn};

/// 单个候选属性的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// 已解析并赋值
    Resolved,
    /// 无法解析，属性保持原值
    Unresolved,
}

/// 一次注入过程的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionReport {
    /// 被注入的类型名称
    pub type_name: &'static str,
    /// 按声明顺序记录的候选属性结果
    pub outcomes: Vec<(&'static str, ResolutionOutcome)>,
}

impl InjectionReport {
    fn new<T>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            outcomes: Vec::new(),
        }
    }

    /// 已注入的属性名称
    pub fn injected(&self) -> Vec<&'static str> {
        self.names_with(ResolutionOutcome::Resolved)
    }

    /// 未能解析的属性名称
    pub fn unresolved(&self) -> Vec<&'static str> {
        self.names_with(ResolutionOutcome::Unresolved)
    }

    /// 查询某个属性的结果，非候选属性返回 `None`
    pub fn outcome(&self, property: &str) -> Option<ResolutionOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, outcome)| *outcome)
    }

    fn names_with(&self, wanted: ResolutionOutcome) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == wanted)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// 属性注入执行器
///
/// 持有已校验的策略，在容器构造实例后对候选属性逐个解析并赋值
#[derive(Debug, Default)]
pub struct PropertyInjector {
    policy: InjectionPolicy,
    selector: CandidateSelector,
}

impl PropertyInjector {
    /// 创建执行器，不支持的策略组合会被拒绝
    pub fn new(policy: InjectionPolicy) -> ConfigurationResult<Self> {
        Ok(Self {
            policy: policy.validate()?,
            selector: CandidateSelector::new(),
        })
    }

    /// 禁用属性注入的执行器
    pub fn disabled() -> Self {
        Self::default()
    }

    /// 当前策略
    pub fn policy(&self) -> InjectionPolicy {
        self.policy
    }

    /// 对实例执行一次属性注入
    ///
    /// 失败升级时，已处理的属性保持赋值状态，调用方持有的实例不会回滚
    pub fn inject<T: Injectable>(
        &self,
        instance: &mut T,
        resolver: &dyn ServiceResolver,
    ) -> DependencyResult<InjectionReport> {
        let mut report = InjectionReport::new::<T>();
        if !self.policy.mode().is_enabled() {
            return Ok(report);
        }

        let candidates = self.selector.select::<T>(self.policy.mode());
        for property in candidates.iter() {
            let outcome = self.inject_property(instance, property, resolver)?;
            if outcome == ResolutionOutcome::Unresolved && self.policy.throw_on_failure() {
                return Err(ResolutionError::unresolved_property(
                    report.type_name,
                    property.name(),
                    property.declared_type().name.clone(),
                )
                .into());
            }
            report.outcomes.push((property.name(), outcome));
        }

        Ok(report)
    }

    fn inject_property<T>(
        &self,
        instance: &mut T,
        property: &PropertyDescriptor<T>,
        resolver: &dyn ServiceResolver,
    ) -> DependencyResult<ResolutionOutcome> {
        let declared_type = property.declared_type();

        if !resolver.can_resolve_service(declared_type) {
            debug!(
                "属性未解析: {}.{} ({} 未注册)",
                std::any::type_name::<T>(),
                property.name(),
                declared_type.short_name()
            );
            return Ok(ResolutionOutcome::Unresolved);
        }

        let service = resolver.resolve_service(declared_type)?;
        if property.assign(instance, &service) {
            debug!(
                "属性已注入: {}.{} <- {}",
                std::any::type_name::<T>(),
                property.name(),
                declared_type.short_name()
            );
            Ok(ResolutionOutcome::Resolved)
        } else {
            warn!(
                "属性类型不匹配: {}.{} 声明为 {}，解析得到 {}",
                std::any::type_name::<T>(),
                property.name(),
                declared_type.name,
                service.service_type().name
            );
            Ok(ResolutionOutcome::Unresolved)
        }
    }
}
