//! 订阅句柄

use std::fmt;
use std::sync::{Arc, Weak};

use super::types::ListenerId;

/// 能按ID撤销监听者的一方（即监听者注册表的内部存储）
pub(crate) trait Detach: Send + Sync {
    /// 移除监听者，返回是否确实移除
    fn detach(&self, id: ListenerId) -> bool;
    /// 监听者是否仍在注册表中
    fn is_attached(&self, id: ListenerId) -> bool;
}

/// 订阅句柄
///
/// 弱引用注册表并记录监听者ID，只用于撤销订阅，不持有回调本身。
/// 对已移除的监听者、已销毁的注册表或默认构造的句柄调用
/// [`unlisten`](Self::unlisten) 都是安全的空操作。
#[derive(Clone, Default)]
pub struct SubscriptionHandle {
    slot: Option<(Weak<dyn Detach>, ListenerId)>,
}

impl SubscriptionHandle {
    pub(crate) fn new(owner: Weak<dyn Detach>, id: ListenerId) -> Self {
        Self {
            slot: Some((owner, id)),
        }
    }

    /// 监听者ID，未绑定的句柄返回 `None`
    pub fn id(&self) -> Option<ListenerId> {
        self.slot.as_ref().map(|(_, id)| *id)
    }

    /// 撤销订阅，返回是否确实移除了监听者
    pub fn unlisten(&self) -> bool {
        match self.owner() {
            Some((owner, id)) => owner.detach(id),
            None => false,
        }
    }

    /// 监听者是否仍然有效
    pub fn is_listening(&self) -> bool {
        match self.owner() {
            Some((owner, id)) => owner.is_attached(id),
            None => false,
        }
    }

    /// 句柄是否指向给定的注册表存储
    pub(crate) fn belongs_to(&self, owner: *const ()) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|(weak, _)| Weak::as_ptr(weak) as *const () == owner)
    }

    fn owner(&self) -> Option<(Arc<dyn Detach>, ListenerId)> {
        let (weak, id) = self.slot.as_ref()?;
        weak.upgrade().map(|owner| (owner, *id))
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id())
            .field("listening", &self.is_listening())
            .finish()
    }
}
