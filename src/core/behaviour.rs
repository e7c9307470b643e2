//! 状态机行为回调接口

use super::state_info::StateInfo;
use super::types::LayerIndex;

/// 状态机行为
///
/// 由状态机运行时在某一层进入/退出状态时同步调用。
pub trait StateMachineBehaviour: Send + Sync {
    /// 某层进入状态
    fn on_state_enter(&self, state: &StateInfo, layer: LayerIndex);

    /// 某层退出状态
    fn on_state_exit(&self, state: &StateInfo, layer: LayerIndex);

    /// 是否为能把回调转发给事件桥的分发器
    fn is_event_dispatcher(&self) -> bool {
        false
    }
}
