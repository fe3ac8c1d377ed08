//! 注入器配置
//!
//! 对应配置文件中的 `[injection]` 节:
//!
//! ```toml
//! [injection]
//! property_injection = "all_interface_properties"
//! throw_if_property_injection_fails = true
//! ```

use di_abstractions::{ConfigurationResult, InjectionMode, InjectionPolicy};
use infrastructure_common::{load_section, ConfigSource};
use serde::{Deserialize, Serialize};

/// 注入器配置节名称
pub const INJECTION_SECTION: &str = "injection";

/// 注入器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorSettings {
    /// 属性注入模式
    pub property_injection: InjectionMode,
    /// 属性无法解析时是否抛出错误
    pub throw_if_property_injection_fails: bool,
}

impl InjectorSettings {
    /// 从配置源加载，配置节缺失时使用默认值（禁用）
    pub fn load(source: &ConfigSource) -> ConfigurationResult<Self> {
        load_section(source, INJECTION_SECTION)
    }

    /// 转换为注入策略（未校验）
    pub fn to_policy(&self) -> InjectionPolicy {
        InjectionPolicy::new(
            self.property_injection,
            self.throw_if_property_injection_fails,
        )
    }

    /// 转换为已校验的注入策略
    pub fn into_validated_policy(self) -> ConfigurationResult<InjectionPolicy> {
        self.to_policy().validate()
    }
}
