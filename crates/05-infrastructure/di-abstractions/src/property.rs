//! 属性描述符
//!
//! Rust 没有运行时反射，每个可注入类型通过 [`Injectable::properties`] 提供自己的属性表，
//! 通常由 `#[derive(Injectable)]` 在编译时生成

use crate::resolver::ServiceResolver;
use crate::service::ServiceInstance;
use infrastructure_common::{DependencyResult, TypeInfo};
use std::fmt;

/// 属性声明类型的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredKind {
    /// 接口类型（trait 对象，例如 `Option<Arc<dyn Service>>`）
    Interface,
    /// 具体类型（例如 `Option<Arc<Settings>>`）
    Concrete,
}

/// 属性设置器，类型不匹配时返回 `false`
pub type PropertySetter<T> = fn(&mut T, &ServiceInstance) -> bool;

/// 属性描述符
pub struct PropertyDescriptor<T> {
    name: &'static str,
    declared_type: TypeInfo,
    kind: DeclaredKind,
    marked: bool,
    setter: Option<PropertySetter<T>>,
}

impl<T> PropertyDescriptor<T> {
    /// 创建新的属性描述符（无标记、无公开设置器）
    pub fn new(name: &'static str, declared_type: TypeInfo, kind: DeclaredKind) -> Self {
        Self {
            name,
            declared_type,
            kind,
            marked: false,
            setter: None,
        }
    }

    /// 创建接口类型属性
    pub fn interface<I: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new(name, TypeInfo::of::<I>(), DeclaredKind::Interface)
    }

    /// 创建具体类型属性
    pub fn concrete<C: 'static>(name: &'static str) -> Self {
        Self::new(name, TypeInfo::of::<C>(), DeclaredKind::Concrete)
    }

    /// 添加注入标记
    pub fn marked(self) -> Self {
        self.with_marker(true)
    }

    /// 设置注入标记
    pub fn with_marker(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }

    /// 设置公开设置器
    pub fn with_setter(mut self, setter: PropertySetter<T>) -> Self {
        self.setter = Some(setter);
        self
    }

    /// 属性名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 声明类型
    pub fn declared_type(&self) -> &TypeInfo {
        &self.declared_type
    }

    /// 声明类型种类
    pub fn kind(&self) -> DeclaredKind {
        self.kind
    }

    /// 是否为接口类型属性
    pub fn is_interface(&self) -> bool {
        self.kind == DeclaredKind::Interface
    }

    /// 是否带有注入标记
    pub fn has_injection_marker(&self) -> bool {
        self.marked
    }

    /// 是否有公开设置器
    pub fn has_public_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// 通过设置器赋值，没有设置器或类型不匹配时返回 `false`
    pub fn assign(&self, target: &mut T, service: &ServiceInstance) -> bool {
        self.setter.map_or(false, |setter| setter(target, service))
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            declared_type: self.declared_type.clone(),
            kind: self.kind,
            marked: self.marked,
            setter: self.setter,
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type.name)
            .field("kind", &self.kind)
            .field("marked", &self.marked)
            .field("settable", &self.setter.is_some())
            .finish()
    }
}

/// 可注入类型 trait
///
/// 提供构造步骤（仅构造函数注入）和属性表
pub trait Injectable: Sized + 'static {
    /// 构造实例，属性保持默认值
    fn create(resolver: &dyn ServiceResolver) -> DependencyResult<Self>;

    /// 按声明顺序返回属性表
    fn properties() -> Vec<PropertyDescriptor<Self>>;
}
