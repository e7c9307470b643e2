//! 类型别名和基础类型定义

use std::fmt;

/// 状态ID（状态名的哈希）
pub type StateId = i32;

/// 层索引，`-1` 表示由运行时自行选择
pub type LayerIndex = i32;

/// 监听者ID，在同一个注册表内单调递增、永不复用
pub type ListenerId = u64;

/// 宿主实体ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}
