//! IoC 提供者
//!
//! 注册表由提供者实例持有，注册、解析与属性注入都在调用线程上同步完成

use crate::injector::{InjectionReport, PropertyInjector};
use crate::settings::InjectorSettings;
use di_abstractions::{
    ConfigurationResult, DependencyError, DependencyResult, Injectable, InjectionPolicy,
    IocContainer, Provides, ServiceInstance, ServiceResolver, TypeInfo,
};
use infrastructure_common::Lifetime;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

type ServiceFactory =
    Arc<dyn Fn(&IocProvider) -> DependencyResult<ServiceInstance> + Send + Sync>;

/// 服务注册信息
#[derive(Clone)]
struct ServiceRegistration {
    service_type: TypeInfo,
    lifetime: Lifetime,
    factory: ServiceFactory,
    /// 单例缓存，克隆的注册信息共享同一个单元
    instance: Arc<OnceCell<ServiceInstance>>,
}

impl ServiceRegistration {
    fn new(service_type: TypeInfo, lifetime: Lifetime, factory: ServiceFactory) -> Self {
        Self {
            service_type,
            lifetime,
            factory,
            instance: Arc::new(OnceCell::new()),
        }
    }
}

impl fmt::Debug for ServiceRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistration")
            .field("service_type", &self.service_type.name)
            .field("lifetime", &self.lifetime)
            .field("initialized", &self.instance.get().is_some())
            .finish()
    }
}

/// IoC 提供者
///
/// 策略在创建时校验且之后不可变
#[derive(Debug, Default)]
pub struct IocProvider {
    registrations: RwLock<HashMap<TypeId, ServiceRegistration>>,
    injector: PropertyInjector,
}

impl IocProvider {
    /// 创建禁用属性注入的提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 按策略创建提供者，`None` 等同于禁用
    pub fn with_policy(policy: Option<InjectionPolicy>) -> ConfigurationResult<Self> {
        let policy = policy.unwrap_or_default();
        let injector = PropertyInjector::new(policy)?;
        info!("创建 IoC 提供者，属性注入策略: {}", policy);

        Ok(Self {
            registrations: RwLock::new(HashMap::new()),
            injector,
        })
    }

    /// 按配置创建提供者
    pub fn from_settings(settings: &InjectorSettings) -> ConfigurationResult<Self> {
        Self::with_policy(Some(settings.to_policy()))
    }

    /// 当前属性注入策略
    pub fn policy(&self) -> InjectionPolicy {
        self.injector.policy()
    }

    /// 对已构造的实例执行一次属性注入
    ///
    /// 失败升级时实例保留已注入的属性
    pub fn inject_into<C: Injectable>(&self, instance: &mut C) -> DependencyResult<InjectionReport> {
        self.injector.inject(instance, self)
    }

    /// 已注册的服务类型
    pub fn registered_types(&self) -> Vec<TypeInfo> {
        self.registrations
            .read()
            .values()
            .map(|registration| registration.service_type.clone())
            .collect()
    }

    fn register(&self, registration: ServiceRegistration) {
        info!(
            "注册服务: {} ({})",
            registration.service_type.short_name(),
            registration.lifetime
        );

        let replaced = self
            .registrations
            .write()
            .insert(registration.service_type.id, registration);
        if let Some(previous) = replaced {
            debug!("覆盖已有注册: {}", previous.service_type.name);
        }
    }

    fn registration(&self, service_type: &TypeInfo) -> Option<ServiceRegistration> {
        self.registrations.read().get(&service_type.id).cloned()
    }
}

impl ServiceResolver for IocProvider {
    fn can_resolve_service(&self, service_type: &TypeInfo) -> bool {
        self.registrations.read().contains_key(&service_type.id)
    }

    fn resolve_service(&self, service_type: &TypeInfo) -> DependencyResult<ServiceInstance> {
        // 先取出注册信息并释放读锁，工厂可以递归解析其他服务
        let registration = self
            .registration(service_type)
            .ok_or_else(|| DependencyError::not_registered(service_type.name.clone()))?;

        match registration.lifetime {
            Lifetime::Singleton => registration
                .instance
                .get_or_try_init(|| {
                    debug!("首次解析单例: {}", service_type.short_name());
                    (registration.factory)(self)
                })
                .cloned(),
            Lifetime::Transient => (registration.factory)(self),
        }
    }
}

impl IocContainer for IocProvider {
    fn register_constructor<I, C, F>(&self, constructor: F)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Injectable + Provides<I>,
        F: Fn(&Self) -> DependencyResult<C> + Send + Sync + 'static,
    {
        let factory: ServiceFactory = Arc::new(move |provider: &IocProvider| {
            let mut instance = constructor(provider)?;
            provider.inject_into(&mut instance)?;
            Ok(ServiceInstance::new(<C as Provides<I>>::provide(Arc::new(instance))))
        });

        self.register(ServiceRegistration::new(
            TypeInfo::of::<I>(),
            Lifetime::Transient,
            factory,
        ));
    }

    fn register_factory<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Self) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        let factory: ServiceFactory =
            Arc::new(move |provider: &IocProvider| factory(provider).map(ServiceInstance::new));

        self.register(ServiceRegistration::new(
            TypeInfo::of::<I>(),
            Lifetime::Transient,
            factory,
        ));
    }

    fn register_singleton<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Self) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        let factory: ServiceFactory =
            Arc::new(move |provider: &IocProvider| factory(provider).map(ServiceInstance::new));

        self.register(ServiceRegistration::new(
            TypeInfo::of::<I>(),
            Lifetime::Singleton,
            factory,
        ));
    }

    fn register_instance<I>(&self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let service = ServiceInstance::new(instance);
        let cached = service.clone();
        let factory: ServiceFactory = Arc::new(move |_: &IocProvider| Ok(cached.clone()));

        self.register(ServiceRegistration {
            service_type: TypeInfo::of::<I>(),
            lifetime: Lifetime::Singleton,
            factory,
            instance: Arc::new(OnceCell::with_value(service)),
        });
    }

    fn construct<C: Injectable>(&self) -> DependencyResult<C> {
        let mut instance = C::create(self)?;
        let report = self.inject_into(&mut instance)?;
        if !report.outcomes.is_empty() {
            debug!(
                "构造完成: {}，已注入 {:?}，未解析 {:?}",
                report.type_name,
                report.injected(),
                report.unresolved()
            );
        }
        Ok(instance)
    }
}
