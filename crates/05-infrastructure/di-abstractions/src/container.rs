//! 依赖注入容器抽象接口
//!
//! 容器负责类型注册、对象构造与生命周期缓存，并在构造完成后触发属性注入

use crate::property::Injectable;
use crate::resolver::{ServiceResolver, ServiceResolverExt};
use crate::service::Provides;
use infrastructure_common::{DependencyResult, TypeInfo};
use std::sync::Arc;

/// 依赖注入容器 trait
pub trait IocContainer: ServiceResolver + Sized {
    /// 注册由构造函数产生具体类型的服务，每次解析都会构造新实例并执行属性注入
    fn register_constructor<I, C, F>(&self, constructor: F)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Injectable + Provides<I>,
        F: Fn(&Self) -> DependencyResult<C> + Send + Sync + 'static;

    /// 注册瞬时工厂，工厂自行负责构造，不执行属性注入
    fn register_factory<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Self) -> DependencyResult<Arc<I>> + Send + Sync + 'static;

    /// 注册延迟求值的单例工厂，首次解析时执行且至多执行一次
    fn register_singleton<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Self) -> DependencyResult<Arc<I>> + Send + Sync + 'static;

    /// 注册常量实例
    fn register_instance<I>(&self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static;

    /// 构造实例（构造函数注入）并执行属性注入
    fn construct<C: Injectable>(&self) -> DependencyResult<C>;

    /// 检查服务是否已注册
    fn is_registered<I: ?Sized + 'static>(&self) -> bool {
        self.can_resolve_service(&TypeInfo::of::<I>())
    }

    /// 注册接口到具体类型的绑定
    fn register_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Injectable + Provides<I>,
    {
        self.register_constructor::<I, C, _>(|container: &Self| C::create(container));
    }

    /// 注册延迟构造的单例类型
    fn register_singleton_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Injectable + Provides<I>,
    {
        self.register_singleton::<I, _>(|container: &Self| {
            let instance = container.construct::<C>()?;
            Ok(<C as Provides<I>>::provide(Arc::new(instance)))
        });
    }

    /// 解析服务
    fn resolve<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + 'static,
    {
        self.resolve_as::<I>()
    }

    /// 尝试解析服务，失败时返回 `None`
    fn try_resolve<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + 'static,
    {
        self.resolve::<I>().ok()
    }

    /// 检查服务是否可以解析
    fn can_resolve<I: ?Sized + 'static>(&self) -> bool {
        self.is_registered::<I>()
    }
}
