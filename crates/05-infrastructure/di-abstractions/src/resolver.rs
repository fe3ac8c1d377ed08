//! 服务解析器抽象接口
//!
//! 属性注入执行器只依赖这个对象安全的接口

use crate::service::ServiceInstance;
use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::sync::Arc;

/// 服务解析器 trait
pub trait ServiceResolver: Send + Sync {
    /// 检查是否存在指定服务类型的注册
    fn can_resolve_service(&self, service_type: &TypeInfo) -> bool;

    /// 解析指定服务类型，可能递归构造其他对象
    fn resolve_service(&self, service_type: &TypeInfo) -> DependencyResult<ServiceInstance>;
}

/// 服务解析器扩展方法
pub trait ServiceResolverExt: ServiceResolver {
    /// 解析为具体的服务类型
    fn resolve_as<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + 'static,
    {
        let service_type = TypeInfo::of::<I>();
        self.resolve_service(&service_type)?
            .downcast::<I>()
            .ok_or(DependencyError::TypeMismatch {
                type_name: service_type.name,
            })
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}
