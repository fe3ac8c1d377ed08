//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 平台基础设施层的公共类型和工具。
//!
//! ## 核心内容
//!
//! - [`ConfigurationError`] / [`DependencyError`] / [`ResolutionError`] - 错误分类
//! - [`TypeInfo`] - 类型元数据（支持 trait 对象）
//! - [`Lifetime`] - 组件生命周期
//! - [`ConfigSource`] / [`load_section`] - 分层配置加载
//! - [`LoggingConfig`] / [`init_logging`] - 日志初始化

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use logging::*;
pub use metadata::*;
