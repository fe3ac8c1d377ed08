//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
///
/// 在提供者构建阶段同步抛出，始终对初始化过程致命
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("不支持的属性注入策略组合: 模式 {mode} 不能与 throw_on_failure = true 同时使用")]
    UnsupportedPolicy { mode: String },

    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadFailed {
        #[from]
        source: config::ConfigError,
    },

    #[error("日志初始化失败: {message}")]
    LoggingInit { message: String },
}

/// 属性解析错误类型
///
/// 仅在启用失败升级时由属性注入过程抛出
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("无法解析属性: {type_name}.{property} (声明类型: {declared_type})")]
    UnresolvedProperty {
        type_name: String,
        property: String,
        declared_type: String,
    },
}

impl ResolutionError {
    /// 创建属性无法解析错误
    pub fn unresolved_property(
        type_name: impl Into<String>,
        property: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        Self::UnresolvedProperty {
            type_name: type_name.into(),
            property: property.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件类型不匹配: {type_name}")]
    TypeMismatch { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl DependencyError {
    /// 创建组件未注册错误
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::ComponentNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// 创建组件创建失败错误
    pub fn creation_failed<E>(type_name: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// 是否为属性解析失败（失败升级）
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

/// 结果类型别名
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
