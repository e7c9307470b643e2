//! 监听者注册表（多播事件）

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

use super::handle::{Detach, SubscriptionHandle};
use super::types::ListenerId;

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;
type OnceCallback<T> = Box<dyn FnOnce(&T) + Send>;
type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

enum Invoke<T> {
    Every(Callback<T>),
    Once(Mutex<Option<OnceCallback<T>>>),
}

struct Entry<T> {
    id: ListenerId,
    filter: Option<Filter<T>>,
    invoke: Invoke<T>,
    alive: AtomicBool,
}

impl<T> Entry<T> {
    fn accepts(&self, value: &T) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(value))
    }
}

struct Listeners<T> {
    entries: Mutex<Vec<Arc<Entry<T>>>>,
    next_id: AtomicU64,
}

impl<T> Listeners<T> {
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Entry<T>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                let entry = entries.remove(index);
                entry.alive.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

impl<T> Detach for Listeners<T> {
    fn detach(&self, id: ListenerId) -> bool {
        let removed = self.remove(id);
        trace!(listener_id = id, removed, "unsubscribe");
        removed
    }

    fn is_attached(&self, id: ListenerId) -> bool {
        self.lock()
            .iter()
            .any(|entry| entry.id == id && entry.alive.load(Ordering::Acquire))
    }
}

/// 监听者注册表
///
/// 按注册顺序保存回调，`publish` 时依次调用。
///
/// - 每次 `publish` 先对当前监听者列表做快照：发布过程中新增的监听者
///   不会在本次发布中被调用，已移除但尚未轮到的监听者会被跳过。
/// - 一次性监听者在回调执行之前就已经从注册表中移除，
///   回调内部重新订阅或递归发布都看不到它。
/// - 调用回调时不持有任何锁，回调内可以自由地订阅、退订或再次发布。
pub struct ListenerRegistry<T> {
    inner: Arc<Listeners<T>>,
}

impl<T: 'static> ListenerRegistry<T> {
    /// 创建一个空的注册表
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Listeners {
                entries: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// 追加一个持久监听者
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.attach(None, Invoke::Every(Box::new(callback)))
    }

    /// 追加一个带过滤条件的持久监听者，只有 `filter` 通过时才调用 `callback`
    pub fn subscribe_when<P, F>(&self, filter: P, callback: F) -> SubscriptionHandle
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.attach(Some(Box::new(filter)), Invoke::Every(Box::new(callback)))
    }

    /// 追加一个一次性监听者，首次调用前自动移除
    pub fn subscribe_once<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.attach(None, Invoke::Once(Mutex::new(Some(Box::new(callback)))))
    }

    /// 追加一个带过滤条件的一次性监听者
    ///
    /// 过滤条件先于"一次性"语义生效：`filter` 不通过的发布不会消耗该监听者。
    pub fn subscribe_once_when<P, F>(&self, filter: P, callback: F) -> SubscriptionHandle
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: FnOnce(&T) + Send + 'static,
    {
        self.attach(
            Some(Box::new(filter)),
            Invoke::Once(Mutex::new(Some(Box::new(callback)))),
        )
    }

    /// 按注册顺序调用发布开始时存在的所有监听者
    pub fn publish(&self, value: &T) {
        let snapshot: Vec<Arc<Entry<T>>> = self.inner.lock().clone();
        trace!(listeners = snapshot.len(), "publish");

        for entry in snapshot {
            if !entry.alive.load(Ordering::Acquire) || !entry.accepts(value) {
                continue;
            }

            match &entry.invoke {
                Invoke::Every(callback) => callback(value),
                Invoke::Once(slot) => {
                    // 先摘除再调用
                    if !entry.alive.swap(false, Ordering::AcqRel) {
                        continue;
                    }
                    self.inner.remove(entry.id);
                    let callback = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
                    if let Some(callback) = callback {
                        trace!(listener_id = entry.id, "once listener consumed");
                        callback(value);
                    }
                }
            }
        }
    }

    /// 撤销句柄对应的监听者；句柄不属于本注册表或已失效时为空操作
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) -> bool {
        if !handle.belongs_to(self.owner_ptr()) {
            return false;
        }
        handle.unlisten()
    }

    /// 清空所有监听者，所有已发出的句柄随之失效
    pub fn remove_all(&self) {
        let mut entries = self.inner.lock();
        for entry in entries.iter() {
            entry.alive.store(false, Ordering::Release);
        }
        let removed = entries.len();
        entries.clear();
        trace!(removed, "remove all listeners");
    }

    /// 句柄对应的监听者是否仍在本注册表中
    pub fn contains(&self, handle: &SubscriptionHandle) -> bool {
        handle.belongs_to(self.owner_ptr()) && handle.is_listening()
    }

    /// 当前监听者数
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// 是否没有任何监听者
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn attach(&self, filter: Option<Filter<T>>, invoke: Invoke<T>) -> SubscriptionHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let once = matches!(invoke, Invoke::Once(_));
        self.inner.lock().push(Arc::new(Entry {
            id,
            filter,
            invoke,
            alive: AtomicBool::new(true),
        }));
        trace!(listener_id = id, once, "subscribe");

        let owner: Weak<dyn Detach> = Arc::downgrade(&self.inner) as Weak<dyn Detach>;
        SubscriptionHandle::new(owner, id)
    }

    fn owner_ptr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl<T: 'static> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
