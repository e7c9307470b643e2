//! 状态事件桥：按状态ID把进入/退出事件分发给监听者

use tracing::{debug, trace};

use super::behaviour::StateMachineBehaviour;
use super::event::ListenerRegistry;
use super::handle::SubscriptionHandle;
use super::state_info::StateInfo;
use super::types::{EntityId, LayerIndex, StateId};

/// 状态事件桥
///
/// 挂在一个宿主实体上，持有"进入"和"退出"两个监听者注册表。
/// 运行时上报的每个转换都会原样发布到对应注册表，
/// 由各监听者的过滤条件（状态ID相等）决定是否响应。
/// 层号只用于日志，不参与过滤。
pub struct StateEventBridge {
    entity: EntityId,
    on_state_enter: ListenerRegistry<StateInfo>,
    on_state_exit: ListenerRegistry<StateInfo>,
}

impl StateEventBridge {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            on_state_enter: ListenerRegistry::new(),
            on_state_exit: ListenerRegistry::new(),
        }
    }

    /// 宿主实体（非拥有引用）
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// 运行时回调：进入状态
    pub fn on_enter(&self, state: &StateInfo, layer: LayerIndex) {
        trace!(
            entity = %self.entity,
            state = state.short_name_hash,
            layer,
            "state enter"
        );
        self.on_state_enter.publish(state);
    }

    /// 运行时回调：退出状态
    pub fn on_exit(&self, state: &StateInfo, layer: LayerIndex) {
        trace!(
            entity = %self.entity,
            state = state.short_name_hash,
            layer,
            "state exit"
        );
        self.on_state_exit.publish(state);
    }

    /// 监听进入 `state`
    pub fn listen_enter<F>(&self, state: StateId, callback: F) -> SubscriptionHandle
    where
        F: Fn(&StateInfo) + Send + Sync + 'static,
    {
        self.on_state_enter
            .subscribe_when(move |info: &StateInfo| info.is(state), callback)
    }

    /// 监听退出 `state`
    pub fn listen_exit<F>(&self, state: StateId, callback: F) -> SubscriptionHandle
    where
        F: Fn(&StateInfo) + Send + Sync + 'static,
    {
        self.on_state_exit
            .subscribe_when(move |info: &StateInfo| info.is(state), callback)
    }

    /// 监听一次进入 `state`，其他状态的进入事件不会消耗它
    pub fn listen_enter_once<F>(&self, state: StateId, callback: F) -> SubscriptionHandle
    where
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.on_state_enter
            .subscribe_once_when(move |info: &StateInfo| info.is(state), callback)
    }

    /// 监听一次退出 `state`，其他状态的退出事件不会消耗它
    pub fn listen_exit_once<F>(&self, state: StateId, callback: F) -> SubscriptionHandle
    where
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.on_state_exit
            .subscribe_once_when(move |info: &StateInfo| info.is(state), callback)
    }

    /// 清空两个注册表
    pub fn remove_all_listeners(&self) {
        self.on_state_enter.remove_all();
        self.on_state_exit.remove_all();
        debug!(entity = %self.entity, "removed all state listeners");
    }

    /// "进入"注册表中的监听者数
    pub fn enter_listener_count(&self) -> usize {
        self.on_state_enter.len()
    }

    /// "退出"注册表中的监听者数
    pub fn exit_listener_count(&self) -> usize {
        self.on_state_exit.len()
    }
}

impl StateMachineBehaviour for StateEventBridge {
    fn on_state_enter(&self, state: &StateInfo, layer: LayerIndex) {
        self.on_enter(state, layer);
    }

    fn on_state_exit(&self, state: &StateInfo, layer: LayerIndex) {
        self.on_exit(state, layer);
    }

    /// 直接挂在运行时上的事件桥同样会收到转换回调
    fn is_event_dispatcher(&self) -> bool {
        true
    }
}
