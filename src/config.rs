//! 配置

use std::path::Path;

use serde::Deserialize;

use crate::core::types::LayerIndex;
use crate::error::ConfigError;

/// 事件桥配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// 注册监听前是否检查状态是否存在、分发器是否挂上。
    /// 默认只在 debug 构建中开启
    pub diagnostics: bool,
    /// 检查状态是否存在时使用的层
    pub diagnostic_layer: LayerIndex,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            diagnostics: cfg!(debug_assertions),
            diagnostic_layer: 0,
        }
    }
}

impl EventsConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}
