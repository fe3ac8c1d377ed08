//! 属性注入策略
//!
//! 描述哪些属性参与注入，以及属性无法解析时的处理方式

use infrastructure_common::{ConfigurationError, ConfigurationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 属性注入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMode {
    /// 不进行属性注入
    #[default]
    Disabled,
    /// 仅注入带有注入标记的接口属性
    MarkedOnly,
    /// 注入所有可写的接口属性，忽略标记
    AllInterfaceProperties,
}

impl InjectionMode {
    /// 是否启用了属性注入
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl fmt::Display for InjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::MarkedOnly => f.write_str("marked_only"),
            Self::AllInterfaceProperties => f.write_str("all_interface_properties"),
        }
    }
}

/// 属性注入策略
///
/// 提供者创建后不可变。`MarkedOnly` 与失败升级的组合不受支持，
/// 会在 [`InjectionPolicy::validate`] 中被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InjectionPolicy {
    mode: InjectionMode,
    throw_on_failure: bool,
}

impl InjectionPolicy {
    /// 创建新的注入策略（未校验）
    pub const fn new(mode: InjectionMode, throw_on_failure: bool) -> Self {
        Self {
            mode,
            throw_on_failure,
        }
    }

    /// 禁用属性注入
    pub const fn disabled() -> Self {
        Self::new(InjectionMode::Disabled, false)
    }

    /// 仅注入带标记的接口属性
    pub const fn marked_only() -> Self {
        Self::new(InjectionMode::MarkedOnly, false)
    }

    /// 注入所有接口属性
    pub const fn all_interface_properties() -> Self {
        Self::new(InjectionMode::AllInterfaceProperties, false)
    }

    /// 设置属性无法解析时是否抛出错误
    pub fn with_throw_on_failure(mut self, throw_on_failure: bool) -> Self {
        self.throw_on_failure = throw_on_failure;
        self
    }

    /// 注入模式
    pub const fn mode(&self) -> InjectionMode {
        self.mode
    }

    /// 属性无法解析时是否抛出错误
    pub const fn throw_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// 是否为受支持的组合
    pub fn is_supported(&self) -> bool {
        !matches!(
            (self.mode, self.throw_on_failure),
            (InjectionMode::MarkedOnly, true)
        )
    }

    /// 校验策略组合
    pub fn validate(self) -> ConfigurationResult<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(ConfigurationError::UnsupportedPolicy {
                mode: self.mode.to_string(),
            })
        }
    }
}

impl fmt::Display for InjectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (throw_on_failure = {})", self.mode, self.throw_on_failure)
    }
}
