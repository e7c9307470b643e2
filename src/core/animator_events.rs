//! 面向状态机运行时的监听与"播放并等待"便捷接口

use std::sync::Arc;

use tracing::error;

use super::bridge::StateEventBridge;
use super::command::{CrossFadeOptions, PlayOptions, PlaybackCommand, TimeMode};
use super::handle::SubscriptionHandle;
use super::registry::BridgeRegistry;
use super::runtime::AnimatorRuntime;
use super::state_info::{StateInfo, StateKey};
use super::types::StateId;
use crate::error::BindingError;

/// 绑定到某个运行时的事件接口
///
/// 通过 [`BridgeRegistry::bind`] 获得。所有 `listen_*` 都会在需要时
/// 为运行时的宿主实体创建事件桥。
pub struct AnimatorEvents<'a, R: AnimatorRuntime + ?Sized> {
    registry: &'a BridgeRegistry,
    animator: &'a R,
}

impl<'a, R: AnimatorRuntime + ?Sized> AnimatorEvents<'a, R> {
    pub(crate) fn new(registry: &'a BridgeRegistry, animator: &'a R) -> Self {
        Self { registry, animator }
    }

    /// 状态引用 → 状态ID
    pub fn resolve(&self, state: &StateKey) -> StateId {
        state.resolve(|name| self.animator.string_to_hash(name))
    }

    /// 宿主实体上已有的事件桥
    pub fn bridge(&self) -> Option<Arc<StateEventBridge>> {
        self.registry.get(self.animator.entity())
    }

    /// 监听进入状态
    pub fn listen_state_enter<K, F>(&self, state: K, callback: F) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: Fn(&StateInfo) + Send + Sync + 'static,
    {
        let state = self.resolve(&state.into());
        self.prepare(state).listen_enter(state, callback)
    }

    /// 监听退出状态
    pub fn listen_state_exit<K, F>(&self, state: K, callback: F) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: Fn(&StateInfo) + Send + Sync + 'static,
    {
        let state = self.resolve(&state.into());
        self.prepare(state).listen_exit(state, callback)
    }

    /// 监听一次进入状态
    pub fn listen_state_enter_once<K, F>(&self, state: K, callback: F) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        let state = self.resolve(&state.into());
        self.prepare(state).listen_enter_once(state, callback)
    }

    /// 监听一次退出状态
    pub fn listen_state_exit_once<K, F>(&self, state: K, callback: F) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        let state = self.resolve(&state.into());
        self.prepare(state).listen_exit_once(state, callback)
    }

    /// 移除宿主实体上的全部状态监听；没有事件桥时为空操作
    pub fn remove_all_event_listeners(&self) {
        if let Some(bridge) = self.bridge() {
            bridge.remove_all_listeners();
        }
    }

    /// 播放状态，退出该状态时调用 `on_complete`
    pub fn play<K, F>(&self, state: K, on_complete: F, options: PlayOptions) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.play_with(state.into(), TimeMode::Normalized, on_complete, options)
    }

    /// 以秒为单位的起始时间播放状态
    pub fn play_in_fixed_time<K, F>(
        &self,
        state: K,
        on_complete: F,
        options: PlayOptions,
    ) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.play_with(state.into(), TimeMode::Fixed, on_complete, options)
    }

    /// 交叉淡入到状态，`transition_duration` 为归一化时长
    pub fn cross_fade<K, F>(
        &self,
        state: K,
        transition_duration: f32,
        on_complete: F,
        options: CrossFadeOptions,
    ) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.cross_fade_with(
            state.into(),
            TimeMode::Normalized,
            transition_duration,
            on_complete,
            options,
        )
    }

    /// 交叉淡入到状态，`transition_duration` 和时间偏移以秒为单位
    pub fn cross_fade_in_fixed_time<K, F>(
        &self,
        state: K,
        transition_duration: f32,
        on_complete: F,
        options: CrossFadeOptions,
    ) -> SubscriptionHandle
    where
        K: Into<StateKey>,
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        self.cross_fade_with(
            state.into(),
            TimeMode::Fixed,
            transition_duration,
            on_complete,
            options,
        )
    }

    /// 检查状态是否存在于诊断层，以及运行时是否挂有事件分发器
    pub fn check_state_and_dispatcher(&self, state: StateId) -> Result<(), BindingError> {
        let layer = self.registry.config().diagnostic_layer;
        if !self.animator.has_state(layer, state) {
            return Err(BindingError::MissingState {
                animator: self.animator.name().to_string(),
                state,
                layer,
            });
        }

        if !self.animator.has_event_dispatcher() {
            return Err(BindingError::MissingDispatcher {
                animator: self.animator.name().to_string(),
            });
        }

        Ok(())
    }

    fn play_with<F>(
        &self,
        state: StateKey,
        mode: TimeMode,
        on_complete: F,
        options: PlayOptions,
    ) -> SubscriptionHandle
    where
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        // 必须先于命令注册
        let handle = self.listen_state_exit_once(state.clone(), on_complete);
        self.animator.execute(PlaybackCommand::Play {
            state,
            mode,
            options,
        });
        handle
    }

    fn cross_fade_with<F>(
        &self,
        state: StateKey,
        mode: TimeMode,
        transition_duration: f32,
        on_complete: F,
        options: CrossFadeOptions,
    ) -> SubscriptionHandle
    where
        F: FnOnce(&StateInfo) + Send + 'static,
    {
        let handle = self.listen_state_exit_once(state.clone(), on_complete);
        self.animator.execute(PlaybackCommand::CrossFade {
            state,
            mode,
            transition_duration,
            options,
        });
        handle
    }

    fn prepare(&self, state: StateId) -> Arc<StateEventBridge> {
        if self.registry.config().diagnostics {
            if let Err(err) = self.check_state_and_dispatcher(state) {
                error!(
                    entity = %self.animator.entity(),
                    animator = self.animator.name(),
                    state,
                    error = %err,
                    "state listener will never fire"
                );
            }
        }

        self.registry.get_or_create(self.animator.entity())
    }
}
