//! 示例：一个脚本化的参考运行时和一段移动演示

pub mod locomotion;
pub mod scripted_animator;
