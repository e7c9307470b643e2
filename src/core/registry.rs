//! 实体 → 事件桥 注册表

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::animator_events::AnimatorEvents;
use super::bridge::StateEventBridge;
use super::dispatcher::EventDispatcher;
use super::runtime::AnimatorRuntime;
use super::types::EntityId;
use crate::config::EventsConfig;

/// 事件桥注册表
///
/// 每个宿主实体至多挂一个 [`StateEventBridge`]，首次监听时创建，
/// 实体销毁时通过 [`destroy`](Self::destroy) 摘除。
pub struct BridgeRegistry {
    config: EventsConfig,
    bridges: Mutex<HashMap<EntityId, Arc<StateEventBridge>>>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self::with_config(EventsConfig::default())
    }

    pub fn with_config(config: EventsConfig) -> Self {
        Self {
            config,
            bridges: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    /// 已挂在实体上的事件桥
    pub fn get(&self, entity: EntityId) -> Option<Arc<StateEventBridge>> {
        self.lock().get(&entity).cloned()
    }

    /// 获取实体上的事件桥，不存在则创建并挂上
    pub fn get_or_create(&self, entity: EntityId) -> Arc<StateEventBridge> {
        self.lock()
            .entry(entity)
            .or_insert_with(|| {
                debug!(%entity, "attached state event bridge");
                Arc::new(StateEventBridge::new(entity))
            })
            .clone()
    }

    /// 宿主实体销毁通知
    ///
    /// 先清空事件桥上的全部监听者再释放它，之后不会再有任何回调被调用。
    /// 返回实体上是否挂有事件桥。
    pub fn destroy(&self, entity: EntityId) -> bool {
        let bridge = self.lock().remove(&entity);
        match bridge {
            Some(bridge) => {
                bridge.remove_all_listeners();
                debug!(%entity, "destroyed state event bridge");
                true
            }
            None => false,
        }
    }

    /// 为实体创建一个可挂到状态机上的分发器
    pub fn dispatcher(self: &Arc<Self>, entity: EntityId) -> Arc<EventDispatcher> {
        Arc::new(EventDispatcher::new(Arc::downgrade(self), entity))
    }

    /// 把注册表与一个状态机运行时绑定，得到监听/播放的便捷接口
    pub fn bind<'a, R>(&'a self, animator: &'a R) -> AnimatorEvents<'a, R>
    where
        R: AnimatorRuntime + ?Sized,
    {
        AnimatorEvents::new(self, animator)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, Arc<StateEventBridge>>> {
        self.bridges.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BridgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state_info::StateInfo;

    #[test]
    fn one_bridge_per_entity() {
        let registry = BridgeRegistry::new();
        let a = registry.get_or_create(EntityId(1));
        let b = registry.get_or_create(EntityId(1));
        let c = registry.get_or_create(EntityId(2));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn destroy_clears_listeners_and_detaches() {
        let registry = BridgeRegistry::new();
        let bridge = registry.get_or_create(EntityId(1));
        let handle = bridge.listen_enter(5, |_| panic!("listener must not fire"));

        assert!(registry.destroy(EntityId(1)));
        assert!(registry.get(EntityId(1)).is_none());
        assert!(!handle.is_listening());

        // 仍持有旧桥的调用方也不会触发回调
        bridge.on_enter(&StateInfo::new(5), 0);
        assert!(!registry.destroy(EntityId(1)));
    }

    #[test]
    fn get_does_not_create() {
        let registry = BridgeRegistry::new();
        assert!(registry.get(EntityId(9)).is_none());
        assert!(registry.is_empty());
    }
}
