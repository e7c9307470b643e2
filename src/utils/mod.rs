//! 通用工具

pub mod tool;
