//! 状态机运行时接口

use super::command::PlaybackCommand;
use super::types::{EntityId, LayerIndex, StateId};
use crate::utils::tool;

/// 状态机运行时（动画控制器）
///
/// 本库不实现状态机语义，只通过这个接口查询状态定义并下发播放命令。
pub trait AnimatorRuntime {
    /// 宿主实体
    fn entity(&self) -> EntityId;

    /// 用于日志的名字
    fn name(&self) -> &str;

    /// 状态名 → 状态ID
    fn string_to_hash(&self, name: &str) -> StateId {
        tool::string_to_hash(name)
    }

    /// 给定层是否定义了该状态
    fn has_state(&self, layer: LayerIndex, state: StateId) -> bool;

    /// 是否挂有事件分发器（见 [`StateMachineBehaviour::is_event_dispatcher`]）
    ///
    /// [`StateMachineBehaviour::is_event_dispatcher`]: super::behaviour::StateMachineBehaviour::is_event_dispatcher
    fn has_event_dispatcher(&self) -> bool;

    /// 执行播放命令
    fn execute(&self, command: PlaybackCommand);
}
