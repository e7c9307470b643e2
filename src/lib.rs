//! animator-events：状态机进入/退出事件的订阅桥
//!
//! 在不修改状态机编辑数据的前提下，让调用方订阅"进入状态 X"/"退出状态 X"通知。
//!
//! - [`ListenerRegistry`]：多播回调列表，支持句柄退订和一次性监听，
//!   发布过程中增删监听者是安全的。
//! - [`StateEventBridge`]：按状态ID过滤运行时的原始进入/退出回调并转发。
//! - [`BridgeRegistry`] / [`AnimatorEvents`]：每个实体一个事件桥，
//!   以及 `listen_*`、`play`、`cross_fade` 等便捷接口。

// 导出核心模块
pub mod config;
pub mod core;
pub mod error;
pub mod examples;
pub mod utils;

// 重新导出常用类型，方便用户使用
pub use config::EventsConfig;
pub use self::core::{
    AnimatorEvents, AnimatorRuntime, BridgeRegistry, CrossFadeOptions, EntityId, EventDispatcher,
    LayerIndex, ListenerId, ListenerRegistry, PlayOptions, PlaybackCommand, StateEventBridge,
    StateId, StateInfo, StateKey, StateMachineBehaviour, SubscriptionHandle, TimeMode,
};
pub use error::{BindingError, ConfigError};
pub use utils::tool::string_to_hash;
