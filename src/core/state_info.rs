//! 状态快照与状态引用

use super::types::{LayerIndex, StateId};

/// 状态快照
/// 运行时在进入/退出状态时发布的状态信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInfo {
    /// 状态短名哈希，用于路由
    pub short_name_hash: StateId,
    /// 完整路径哈希（`Layer.SubMachine.State`）
    pub full_path_hash: StateId,
    /// 标签哈希
    pub tag_hash: StateId,
    /// 所在层
    pub layer: LayerIndex,
    /// 归一化时间，整数部分为循环次数
    pub normalized_time: f32,
    /// 片段时长（秒）
    pub length: f32,
    pub speed: f32,
    pub speed_multiplier: f32,
    pub looping: bool,
}

impl StateInfo {
    /// 以短名哈希创建快照，其余字段取默认值
    pub fn new(short_name_hash: StateId) -> Self {
        Self {
            short_name_hash,
            full_path_hash: short_name_hash,
            tag_hash: 0,
            layer: 0,
            normalized_time: 0.0,
            length: 0.0,
            speed: 1.0,
            speed_multiplier: 1.0,
            looping: false,
        }
    }

    pub fn with_layer(mut self, layer: LayerIndex) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_normalized_time(mut self, normalized_time: f32) -> Self {
        self.normalized_time = normalized_time;
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    /// 判断快照是否属于给定状态
    pub fn is(&self, state: StateId) -> bool {
        self.short_name_hash == state
    }
}

/// 状态引用：按名字或按哈希
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    Name(String),
    Hash(StateId),
}

impl StateKey {
    /// 解析为状态ID，名字通过 `hasher` 计算
    pub fn resolve(&self, hasher: impl FnOnce(&str) -> StateId) -> StateId {
        match self {
            StateKey::Name(name) => hasher(name),
            StateKey::Hash(hash) => *hash,
        }
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        StateKey::Name(name.to_string())
    }
}

impl From<String> for StateKey {
    fn from(name: String) -> Self {
        StateKey::Name(name)
    }
}

impl From<&String> for StateKey {
    fn from(name: &String) -> Self {
        StateKey::Name(name.clone())
    }
}

impl From<StateId> for StateKey {
    fn from(hash: StateId) -> Self {
        StateKey::Hash(hash)
    }
}
