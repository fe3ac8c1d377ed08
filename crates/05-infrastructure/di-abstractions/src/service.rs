//! 服务实例
//!
//! 容器内部以类型擦除的形式保存服务，取出时再还原为 `Arc<I>`（`I` 可以是 trait 对象）

use infrastructure_common::TypeInfo;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除的服务实例
///
/// 内部保存的是 `Arc<I>` 本身，因此 `I` 可以是 `dyn Trait`
#[derive(Clone)]
pub struct ServiceInstance {
    service_type: TypeInfo,
    value: Arc<dyn Any + Send + Sync>,
}

impl ServiceInstance {
    /// 包装服务实例
    pub fn new<I>(value: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self {
            service_type: TypeInfo::of::<I>(),
            value: Arc::new(value),
        }
    }

    /// 服务类型
    pub fn service_type(&self) -> &TypeInfo {
        &self.service_type
    }

    /// 还原为具体的服务类型
    pub fn downcast<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + 'static,
    {
        self.value.downcast_ref::<Arc<I>>().cloned()
    }

    /// 赋值到属性槽位，类型不匹配时返回 `false` 且不修改槽位
    pub fn assign_to<I>(&self, slot: &mut Option<Arc<I>>) -> bool
    where
        I: ?Sized + 'static,
    {
        match self.downcast::<I>() {
            Some(value) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("service_type", &self.service_type.name)
            .field("value", &"<instance>")
            .finish()
    }
}

/// 具体类型到服务类型的转换
///
/// 通常由 `#[injectable(provides(dyn Trait))]` 生成，每个类型自身总是满足 `Provides<Self>`
pub trait Provides<I: ?Sized> {
    /// 转换为服务类型
    fn provide(self: Arc<Self>) -> Arc<I>;
}

impl<T> Provides<T> for T
where
    T: Send + Sync + 'static,
{
    fn provide(self: Arc<Self>) -> Arc<T> {
        self
    }
}
