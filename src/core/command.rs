//! 发往状态机运行时的播放命令

use super::state_info::StateKey;
use super::types::LayerIndex;

/// 时间参数的单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeMode {
    /// 归一化时间（片段时长的比例）
    #[default]
    Normalized,
    /// 秒
    Fixed,
}

/// `play` 系列参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    /// `-1` 表示由运行时选择包含该状态的第一层
    pub layer: LayerIndex,
    /// 起始时间，负无穷表示沿用运行时的默认值
    pub time: f32,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            layer: -1,
            time: f32::NEG_INFINITY,
        }
    }
}

impl PlayOptions {
    pub fn on_layer(layer: LayerIndex) -> Self {
        Self {
            layer,
            ..Self::default()
        }
    }
}

/// `cross_fade` 系列参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFadeOptions {
    pub layer: LayerIndex,
    /// 目标状态的起始时间偏移
    pub time_offset: f32,
    /// 过渡本身的起始进度（归一化）
    pub transition_time: f32,
}

impl Default for CrossFadeOptions {
    fn default() -> Self {
        Self {
            layer: -1,
            time_offset: 0.0,
            transition_time: 0.0,
        }
    }
}

impl CrossFadeOptions {
    pub fn on_layer(layer: LayerIndex) -> Self {
        Self {
            layer,
            ..Self::default()
        }
    }
}

/// 播放命令，原样交给运行时执行
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Play {
        state: StateKey,
        mode: TimeMode,
        options: PlayOptions,
    },
    CrossFade {
        state: StateKey,
        mode: TimeMode,
        transition_duration: f32,
        options: CrossFadeOptions,
    },
}

impl PlaybackCommand {
    /// 目标状态
    pub fn state(&self) -> &StateKey {
        match self {
            PlaybackCommand::Play { state, .. } | PlaybackCommand::CrossFade { state, .. } => state,
        }
    }

    /// 目标层
    pub fn layer(&self) -> LayerIndex {
        match self {
            PlaybackCommand::Play { options, .. } => options.layer,
            PlaybackCommand::CrossFade { options, .. } => options.layer,
        }
    }
}
