//! 移动示例
//! 演示如何监听状态进入/退出，以及"播放并在退出时通知"

use std::sync::{Arc, Mutex};

use tracing::info;

use super::scripted_animator::ScriptedAnimator;
use crate::config::EventsConfig;
use crate::core::{AnimatorRuntime, BridgeRegistry, EntityId, PlayOptions};

/// 创建示例运行时并挂上事件分发器
pub fn create_locomotion_example(registry: &Arc<BridgeRegistry>) -> ScriptedAnimator {
    let animator = ScriptedAnimator::new(EntityId(1), "hero")
        .with_layer(["Idle", "Walk", "Run"])
        .with_layer(["Wave"]);
    animator.add_behaviour(registry.dispatcher(animator.entity()));
    animator
}

/// 运行移动示例，返回按顺序观察到的事件
pub fn run_locomotion_example(config: EventsConfig) -> Vec<String> {
    info!("locomotion example started");
    let registry = Arc::new(BridgeRegistry::with_config(config));
    let animator = create_locomotion_example(&registry);
    let events = registry.bind(&animator);
    let transcript = Arc::new(Mutex::new(Vec::new()));

    let log = transcript.clone();
    let walking = events.listen_state_enter("Walk", move |info| {
        log.lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("enter Walk (layer {})", info.layer));
    });

    let log = transcript.clone();
    events.play(
        "Walk",
        move |_| {
            log.lock()
                .unwrap_or_else(|e| e.into_inner())
                .push("Walk finished".to_string());
        },
        PlayOptions::on_layer(0),
    );
    animator.update();

    // Walk -> Run：退出 Walk，一次性回调触发
    events.play("Run", |_| {}, PlayOptions::default());
    animator.update();

    walking.unlisten();
    events.play("Walk", |_| {}, PlayOptions::default());
    animator.update();

    registry.destroy(animator.entity());
    info!("locomotion example finished");

    transcript.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_matches_expected_flow() {
        let config = EventsConfig {
            diagnostics: true,
            diagnostic_layer: 0,
        };
        assert_eq!(
            run_locomotion_example(config),
            vec!["enter Walk (layer 0)".to_string(), "Walk finished".to_string()]
        );
    }
}
