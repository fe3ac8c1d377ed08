//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义属性注入策略、属性描述符和容器的核心接口。
//!
//! ## 核心接口
//!
//! - [`InjectionPolicy`] - 属性注入策略（模式 + 失败升级）及其校验
//! - [`PropertyDescriptor`] / [`Injectable`] - 类型的属性表
//! - [`ServiceInstance`] / [`Provides`] - 类型擦除的服务实例与接口转换
//! - [`ServiceResolver`] - 属性注入执行器使用的解析接口
//! - [`IocContainer`] - 容器协作方接口

pub mod container;
pub mod policy;
pub mod property;
pub mod resolver;
pub mod service;

pub use container::*;
pub use policy::*;
pub use property::*;
pub use resolver::*;
pub use service::*;

pub use infrastructure_common::{
    ConfigurationError, ConfigurationResult, DependencyError, DependencyResult, ResolutionError,
    TypeInfo,
};
