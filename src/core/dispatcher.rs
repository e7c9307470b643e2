//! 挂在状态机上的事件分发器

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::behaviour::StateMachineBehaviour;
use super::bridge::StateEventBridge;
use super::registry::BridgeRegistry;
use super::state_info::StateInfo;
use super::types::{EntityId, LayerIndex};

/// 事件分发器
///
/// 作为状态机行为挂到运行时上，把原始的进入/退出回调转发给
/// 宿主实体上的 [`StateEventBridge`]。事件桥在第一次收到回调时查找并缓存
/// （弱引用），实体上尚无事件桥时回调被丢弃。
pub struct EventDispatcher {
    registry: Weak<BridgeRegistry>,
    entity: EntityId,
    bridge: Mutex<Weak<StateEventBridge>>,
}

impl EventDispatcher {
    pub(crate) fn new(registry: Weak<BridgeRegistry>, entity: EntityId) -> Self {
        Self {
            registry,
            entity,
            bridge: Mutex::new(Weak::new()),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    fn bridge(&self) -> Option<Arc<StateEventBridge>> {
        let mut cached = self.bridge.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bridge) = cached.upgrade() {
            return Some(bridge);
        }

        let bridge = self.registry.upgrade()?.get(self.entity)?;
        *cached = Arc::downgrade(&bridge);
        Some(bridge)
    }
}

impl StateMachineBehaviour for EventDispatcher {
    fn on_state_enter(&self, state: &StateInfo, layer: LayerIndex) {
        if let Some(bridge) = self.bridge() {
            bridge.on_enter(state, layer);
        }
    }

    fn on_state_exit(&self, state: &StateInfo, layer: LayerIndex) {
        if let Some(bridge) = self.bridge() {
            bridge.on_exit(state, layer);
        }
    }

    fn is_event_dispatcher(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn forwards_to_bridge_created_later() {
        let registry = Arc::new(BridgeRegistry::new());
        let dispatcher = registry.dispatcher(EntityId(3));

        // 事件桥尚未创建：静默丢弃
        dispatcher.on_state_enter(&StateInfo::new(1), 0);

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        registry.get_or_create(EntityId(3)).listen_enter(1, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        dispatcher.on_state_enter(&StateInfo::new(1), 0);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn recovers_after_bridge_is_recreated() {
        let registry = Arc::new(BridgeRegistry::new());
        let dispatcher = registry.dispatcher(EntityId(3));
        registry.get_or_create(EntityId(3));
        dispatcher.on_state_exit(&StateInfo::new(1), 0);

        registry.destroy(EntityId(3));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        registry.get_or_create(EntityId(3)).listen_exit(1, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        dispatcher.on_state_exit(&StateInfo::new(1), 0);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reports_itself_as_dispatcher() {
        let registry = Arc::new(BridgeRegistry::new());
        assert!(registry.dispatcher(EntityId(1)).is_event_dispatcher());
    }
}
