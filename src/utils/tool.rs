//! 工具函数

use crate::core::types::StateId;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 默认的状态名哈希（32 位 FNV-1a）
///
/// 纯函数，同一名字总是得到同一ID。
/// 真实引擎通常自带哈希，可通过 [`AnimatorRuntime::string_to_hash`] 覆盖。
///
/// [`AnimatorRuntime::string_to_hash`]: crate::core::AnimatorRuntime::string_to_hash
pub fn string_to_hash(name: &str) -> StateId {
    let hash = name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });
    hash as StateId
}
