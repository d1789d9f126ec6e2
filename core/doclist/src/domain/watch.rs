//! 変更通知の土台: watcher 登録簿と購読ハンドル
//!
//! record / store は Watchers に callback を登録し、変更のたびに全件へ配信する。
//! 購読側は Subscription を保持し、cancel（または drop）で登録を解除する。
//! 暗黙のグローバル登録簿は持たない。

use std::sync::Arc;

pub(crate) type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// id 付き callback の登録簿
pub(crate) struct Watchers<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
}

impl<E> Watchers<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, callback: Callback<E>) -> u64 {
        self.next_id += 1;
        self.entries.push((self.next_id, callback));
        self.next_id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// 配信用スナップショット。ロック外で呼び出すために clone して返す
    pub(crate) fn snapshot(&self) -> Vec<Callback<E>> {
        self.entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 購読ハンドル
///
/// `cancel()` するか drop されると登録元から callback が外れ、
/// 以後の通知はこの購読者へ届かない。
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// 明示的に購読を解除する
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
