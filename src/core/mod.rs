//! 核心模块：监听者注册表、状态事件桥与运行时绑定

// 子模块
pub mod animator_events;
pub mod behaviour;
pub mod bridge;
pub mod command;
pub mod dispatcher;
pub mod event;
pub mod handle;
pub mod registry;
pub mod runtime;
pub mod state_info;
pub mod types;

// 重新导出常用类型
pub use animator_events::AnimatorEvents;
pub use behaviour::StateMachineBehaviour;
pub use bridge::StateEventBridge;
pub use command::{CrossFadeOptions, PlayOptions, PlaybackCommand, TimeMode};
pub use dispatcher::EventDispatcher;
pub use event::ListenerRegistry;
pub use handle::SubscriptionHandle;
pub use registry::BridgeRegistry;
pub use runtime::AnimatorRuntime;
pub use state_info::{StateInfo, StateKey};
pub use types::*;
