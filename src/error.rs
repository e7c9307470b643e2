//! 错误类型

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{LayerIndex, StateId};

/// 监听目标与状态机配置不匹配
///
/// 只用于诊断：监听照常注册，只是永远不会被触发。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("no matching state {state} on layer {layer}, so no event will invoke. Animator {animator}")]
    MissingState {
        animator: String,
        state: StateId,
        layer: LayerIndex,
    },
    #[error("no event dispatcher found, so no event will invoke. Animator {animator}")]
    MissingDispatcher { animator: String },
}

/// 配置加载失败
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
