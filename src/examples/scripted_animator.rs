//! 脚本化的状态机运行时
//!
//! 只为演示和测试服务：不做任何动画计算，只按命令切换各层的当前状态，
//! 并通过挂上的行为同步上报进入/退出。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::core::{
    AnimatorRuntime, EntityId, LayerIndex, PlaybackCommand, StateId, StateInfo,
    StateMachineBehaviour, TimeMode,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 脚本化运行时
///
/// 命令先进入队列，[`update`](Self::update) 时才生效，与真实引擎
/// "下一帧生效"的行为一致。
pub struct ScriptedAnimator {
    entity: EntityId,
    name: String,
    layers: Vec<Vec<StateId>>,
    behaviours: Mutex<Vec<Arc<dyn StateMachineBehaviour>>>,
    current: Mutex<Vec<Option<StateInfo>>>,
    pending: Mutex<VecDeque<PlaybackCommand>>,
    executed: Mutex<Vec<PlaybackCommand>>,
}

impl ScriptedAnimator {
    pub fn new(entity: EntityId, name: impl Into<String>) -> Self {
        Self {
            entity,
            name: name.into(),
            layers: Vec::new(),
            behaviours: Mutex::new(Vec::new()),
            current: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// 追加一层，状态名经 [`AnimatorRuntime::string_to_hash`] 转为ID
    pub fn with_layer<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let states = states
            .into_iter()
            .map(|name| self.string_to_hash(name.as_ref()))
            .collect();
        self.layers.push(states);
        lock(&self.current).push(None);
        self
    }

    /// 挂上一个状态机行为
    pub fn add_behaviour(&self, behaviour: Arc<dyn StateMachineBehaviour>) {
        lock(&self.behaviours).push(behaviour);
    }

    /// 层数
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// 某层的当前状态
    pub fn current_state(&self, layer: LayerIndex) -> Option<StateId> {
        let index = usize::try_from(layer).ok()?;
        lock(&self.current)
            .get(index)
            .copied()
            .flatten()
            .map(|info| info.short_name_hash)
    }

    /// 已下发（含尚未生效）的全部命令
    pub fn executed(&self) -> Vec<PlaybackCommand> {
        lock(&self.executed).clone()
    }

    /// 尚未生效的命令数
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// 执行本帧之前排队的命令，返回生效的命令数
    ///
    /// 回调中新下发的命令留到下一次 `update`。
    pub fn update(&self) -> usize {
        let batch: Vec<PlaybackCommand> = lock(&self.pending).drain(..).collect();
        let mut applied = 0;
        for command in batch {
            if self.apply(&command) {
                applied += 1;
            }
        }
        applied
    }

    /// 立即切换某层到给定状态：先退出旧状态，再进入新状态
    pub fn transition_to(&self, layer: LayerIndex, state: StateId) {
        self.transition(layer, Some(StateInfo::new(state).with_layer(layer)));
    }

    /// 立即退出某层的当前状态
    pub fn finish(&self, layer: LayerIndex) {
        self.transition(layer, None);
    }

    fn apply(&self, command: &PlaybackCommand) -> bool {
        let state = command.state().resolve(|name| self.string_to_hash(name));
        let Some(layer) = self.target_layer(command.layer(), state) else {
            warn!(
                animator = %self.name,
                state,
                layer = command.layer(),
                "state not found, command ignored"
            );
            return false;
        };

        let mut info = StateInfo::new(state).with_layer(layer);
        if let PlaybackCommand::Play {
            mode: TimeMode::Normalized,
            options,
            ..
        } = command
        {
            if options.time.is_finite() {
                info = info.with_normalized_time(options.time);
            }
        }
        self.transition(layer, Some(info));
        true
    }

    fn target_layer(&self, layer: LayerIndex, state: StateId) -> Option<LayerIndex> {
        if layer < 0 {
            return self
                .layers
                .iter()
                .position(|states| states.contains(&state))
                .and_then(|index| LayerIndex::try_from(index).ok());
        }
        self.has_state(layer, state).then_some(layer)
    }

    fn transition(&self, layer: LayerIndex, next: Option<StateInfo>) {
        let Some(index) = usize::try_from(layer).ok().filter(|i| *i < self.layers.len()) else {
            warn!(animator = %self.name, layer, "no such layer");
            return;
        };

        let previous = std::mem::replace(&mut lock(&self.current)[index], next);
        let behaviours = lock(&self.behaviours).clone();
        debug!(
            animator = %self.name,
            layer,
            from = previous.map(|info| info.short_name_hash),
            to = next.map(|info| info.short_name_hash),
            "transition"
        );

        if let Some(previous) = previous {
            for behaviour in &behaviours {
                behaviour.on_state_exit(&previous, layer);
            }
        }
        if let Some(next) = next {
            for behaviour in &behaviours {
                behaviour.on_state_enter(&next, layer);
            }
        }
    }
}

impl AnimatorRuntime for ScriptedAnimator {
    fn entity(&self) -> EntityId {
        self.entity
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_state(&self, layer: LayerIndex, state: StateId) -> bool {
        usize::try_from(layer)
            .ok()
            .and_then(|index| self.layers.get(index))
            .is_some_and(|states| states.contains(&state))
    }

    fn has_event_dispatcher(&self) -> bool {
        lock(&self.behaviours)
            .iter()
            .any(|behaviour| behaviour.is_event_dispatcher())
    }

    fn execute(&self, command: PlaybackCommand) {
        lock(&self.executed).push(command.clone());
        lock(&self.pending).push_back(command);
    }
}
