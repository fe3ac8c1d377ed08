//! 配置加载
//!
//! 基于 `config` crate 将配置文件与环境变量分层合并，再按配置节绑定到具体类型

use crate::errors::{ConfigurationError, ConfigurationResult};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 环境变量层级分隔符，例如 `LORN__INJECTION__PROPERTY_INJECTION`
pub const ENV_SEPARATOR: &str = "__";

/// 配置来源
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// 配置文件路径，格式由扩展名推断（toml / json / yaml）
    pub file: Option<PathBuf>,
    /// 配置文件是否必须存在
    pub require_file: bool,
    /// 环境变量前缀
    pub env_prefix: Option<String>,
}

impl ConfigSource {
    /// 创建空的配置来源（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置文件
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 要求配置文件必须存在
    pub fn required(mut self) -> Self {
        self.require_file = true;
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 构建合并后的配置
    pub fn build(&self) -> ConfigurationResult<Config> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if self.require_file && !path.exists() {
                return Err(ConfigurationError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(self.require_file));
        }

        if let Some(prefix) = &self.env_prefix {
            debug!("加载环境变量配置，前缀: {}", prefix);
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );
        }

        Ok(builder.build()?)
    }
}

/// 加载配置节并绑定到具体类型
///
/// 配置节缺失时返回类型默认值
pub fn load_section<T>(source: &ConfigSource, section: &str) -> ConfigurationResult<T>
where
    T: DeserializeOwned + Default,
{
    let config = source.build()?;

    match config.get::<T>(section) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => {
            debug!("配置节 {} 不存在，使用默认值", section);
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}
