//! record: correspondent / title を持つ文書 1 件
//!
//! 属性は固定 struct（開いた属性バッグは持たない）。変更は明示的な set 操作で行い、
//! 変更通知は set の呼び出しが返る前に watcher まで届く（同期・同一ターン内）。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::watch::{Subscription, Watchers};

/// リモート側が割り当てる識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// record の属性スナップショット
///
/// 欠けた値は持たない。正規化時に `correspondent` / `title` は空文字列、
/// `done` は false へ解決される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordAttrs {
    pub correspondent: String,
    pub title: String,
    /// 表示用の状態フラグ（view が "done" クラスの切り替えに使う）
    pub done: bool,
}

impl Default for RecordAttrs {
    fn default() -> Self {
        Self {
            correspondent: String::new(),
            title: String::new(),
            done: false,
        }
    }
}

/// record から購読者へ届く通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEvent {
    /// 属性変更。変更後のスナップショットを運ぶ
    Changed(RecordAttrs),
    /// store から取り除かれた。以後この record への参照は残さない
    Removed,
}

struct RecordState {
    id: Option<RecordId>,
    attrs: RecordAttrs,
    watchers: Watchers<RecordEvent>,
}

/// 共有ハンドル。clone しても同一 record を指す
#[derive(Clone)]
pub struct Record {
    state: Arc<Mutex<RecordState>>,
}

impl Record {
    /// クライアント側で新規作成（id 未割り当て、属性はデフォルト）
    pub fn new() -> Self {
        Self::with_attrs(None, RecordAttrs::default())
    }

    /// 正規化済み属性から作成（リモートペイロード由来）
    pub fn with_attrs(id: Option<RecordId>, attrs: RecordAttrs) -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordState {
                id,
                attrs,
                watchers: Watchers::new(),
            })),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.lock().id
    }

    /// 現在の属性スナップショットを返す
    pub fn attrs(&self) -> RecordAttrs {
        self.lock().attrs.clone()
    }

    pub fn set_correspondent(&self, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|attrs| attrs.correspondent = value);
    }

    pub fn set_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|attrs| attrs.title = value);
    }

    pub fn set_done(&self, value: bool) {
        self.mutate(|attrs| attrs.done = value);
    }

    /// 属性一式を置き換える（リモート再取得の authoritative な上書き用）
    pub fn set_attrs(&self, attrs: RecordAttrs) {
        self.mutate(|current| *current = attrs);
    }

    /// 変更通知を購読する
    ///
    /// 返った Subscription を cancel / drop すると登録が外れる。
    pub fn subscribe(
        &self,
        callback: impl Fn(&RecordEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.lock().watchers.add(Arc::new(callback));
        let weak = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                recover(state.lock()).watchers.remove(id);
            }
        })
    }

    /// 同一 record かどうか（ハンドルの clone を同一視する）
    pub fn same_record(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// store から取り除かれたことを購読者へ通知し、登録簿を空にする
    pub(crate) fn notify_removed(&self) {
        let watchers = {
            let mut state = self.lock();
            let snapshot = state.watchers.snapshot();
            state.watchers.clear();
            snapshot
        };
        for callback in watchers {
            callback(&RecordEvent::Removed);
        }
    }

    /// ロック中に属性を書き換え、ロックを放してから配信する。
    /// callback が record を読み直してもデッドロックしない。
    fn mutate(&self, apply: impl FnOnce(&mut RecordAttrs)) {
        let (snapshot, watchers) = {
            let mut state = self.lock();
            apply(&mut state.attrs);
            (state.attrs.clone(), state.watchers.snapshot())
        };
        let event = RecordEvent::Changed(snapshot);
        for callback in watchers {
            callback(&event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecordState> {
        recover(self.state.lock())
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Record")
            .field("id", &state.id)
            .field("attrs", &state.attrs)
            .finish()
    }
}

// ロック毒化は callback 内の panic でしか起きない。属性は常に整合した値なので
// そのまま引き継ぐ。
fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(PoisonError::into_inner)
}
