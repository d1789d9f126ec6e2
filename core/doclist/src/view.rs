//! RecordView: record 1 件と 1:1 で結び付く描画ビュー
//!
//! bind した record の Changed 通知で render し、Removed 通知で自動的に解除される。
//! 状態遷移は Unbound -> Bound -> (render の自己ループ) -> Unbound。
//! Unbound に戻ったあとの通知はこの view には届かない。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::domain::record::{Record, RecordAttrs, RecordEvent};
use crate::domain::watch::Subscription;
use crate::error::Error;
use crate::ports::outbound::{Element, Template};

/// done フラグとして要素へ伝えるフラグ名
const DONE_FLAG: &str = "done";

struct ViewState {
    record: Option<Record>,
    subscription: Option<Subscription>,
    /// 直近に生成したマークアップ
    markup: String,
}

struct ViewShared {
    template: Arc<dyn Template>,
    element: Arc<dyn Element>,
    state: Mutex<ViewState>,
}

/// record の現在値を描画し続けるビュー
pub struct RecordView {
    shared: Arc<ViewShared>,
}

impl RecordView {
    /// テンプレートと要素を注入して未バインドの view を作る
    pub fn new(template: Arc<dyn Template>, element: Arc<dyn Element>) -> Self {
        Self {
            shared: Arc::new(ViewShared {
                template,
                element,
                state: Mutex::new(ViewState {
                    record: None,
                    subscription: None,
                    markup: String::new(),
                }),
            }),
        }
    }

    /// record へ結び付け、以後の変更通知で render する
    ///
    /// すでに別の record に結び付いていた場合は先に旧購読を解除する。
    /// view 側のハンドルが全て落ちた後の通知は no-op（宙づりの callback は残らない）。
    pub fn bind(&self, record: &Record) {
        {
            let mut state = lock(&self.shared.state);
            state.subscription = None;
            state.record = Some(record.clone());
        }
        let weak = Arc::downgrade(&self.shared);
        let subscription = record.subscribe(move |event| {
            dispatch(&weak, event);
        });
        lock(&self.shared.state).subscription = Some(subscription);
    }

    /// 購読を解除する。以後の record 変更はこの view に影響しない
    pub fn unbind(&self) {
        unbind_shared(&self.shared);
    }

    /// 結び付いた record の現在値を描画し、マークアップを返す
    ///
    /// 未バインドなら Error::Unbound（事前条件違反）。同じ状態で二度呼んでも
    /// 同じマークアップになる。
    pub fn render(&self) -> Result<String, Error> {
        let record = lock(&self.shared.state)
            .record
            .clone()
            .ok_or(Error::Unbound)?;
        let attrs = record.attrs();
        Ok(render_shared(&self.shared, &attrs))
    }

    /// 直近に render したマークアップ
    pub fn markup(&self) -> String {
        lock(&self.shared.state).markup.clone()
    }

    pub fn is_bound(&self) -> bool {
        lock(&self.shared.state).record.is_some()
    }
}

fn dispatch(weak: &Weak<ViewShared>, event: &RecordEvent) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    match event {
        RecordEvent::Changed(attrs) => {
            render_shared(&shared, attrs);
        }
        RecordEvent::Removed => unbind_shared(&shared),
    }
}

/// テンプレート適用 → 要素更新 → マークアップ保存。
/// 要素側の失敗は警告のみで続行し、view の状態は壊さない。
fn render_shared(shared: &ViewShared, attrs: &RecordAttrs) -> String {
    let markup = shared.template.render(attrs);
    if let Err(e) = shared.element.replace_content(&markup) {
        eprintln!("[view] element content update failed: {}", e);
    }
    if let Err(e) = shared.element.set_flag(DONE_FLAG, attrs.done) {
        eprintln!("[view] element flag update failed: {}", e);
    }
    lock(&shared.state).markup = markup.clone();
    markup
}

fn unbind_shared(shared: &ViewShared) {
    let mut state = lock(&shared.state);
    state.subscription = None;
    state.record = None;
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{BufferElement, ListItemTemplate};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn view_with_element() -> (RecordView, Arc<BufferElement>) {
        let element = Arc::new(BufferElement::new());
        let view = RecordView::new(
            Arc::new(ListItemTemplate::new()),
            Arc::clone(&element) as Arc<dyn Element>,
        );
        (view, element)
    }

    #[test]
    fn test_render_without_binding_is_an_error() {
        let (view, _element) = view_with_element();
        let err = view.render().expect_err("unbound render must fail");
        assert!(matches!(err, Error::Unbound));
    }

    #[test]
    fn test_change_rerenders_only_its_own_view() {
        let (view_a, element_a) = view_with_element();
        let (view_b, element_b) = view_with_element();
        let record_a = Record::new();
        let record_b = Record::new();
        record_b.set_title("untouched");
        view_a.bind(&record_a);
        view_b.bind(&record_b);
        view_a.render().unwrap();
        view_b.render().unwrap();
        let before_b = element_b.content();

        record_a.set_title("changed");
        assert!(element_a.content().contains("changed"));
        // record_b の view は再描画されない
        assert_eq!(element_b.content(), before_b);
        assert!(view_b.markup().contains("untouched"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (view, element) = view_with_element();
        let record = Record::new();
        record.set_correspondent("Alice");
        record.set_title("Invoice");
        view.bind(&record);
        let first = view.render().unwrap();
        let second = view.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(view.markup(), second);
        assert!(element.content().contains("Alice"));
    }

    #[test]
    fn test_done_flag_follows_attribute() {
        let (view, element) = view_with_element();
        let record = Record::new();
        view.bind(&record);
        view.render().unwrap();
        assert!(!element.has_flag("done"));
        record.set_done(true);
        assert!(element.has_flag("done"));
        record.set_done(false);
        assert!(!element.has_flag("done"));
    }

    #[test]
    fn test_rebind_releases_previous_subscription() {
        let (view, element) = view_with_element();
        let old = Record::new();
        let new = Record::new();
        view.bind(&old);
        view.bind(&new);
        old.set_title("stale");
        assert!(!element.content().contains("stale"));
        new.set_title("fresh");
        assert!(element.content().contains("fresh"));
    }

    #[test]
    fn test_unbind_stops_rerenders() {
        let (view, element) = view_with_element();
        let record = Record::new();
        view.bind(&record);
        record.set_title("before");
        view.unbind();
        assert!(!view.is_bound());
        record.set_title("after");
        assert!(element.content().contains("before"));
        assert!(!element.content().contains("after"));
    }

    #[test]
    fn test_removed_record_unbinds_the_view() {
        let (view, _element) = view_with_element();
        let record = Record::new();
        view.bind(&record);
        assert!(view.is_bound());
        record.notify_removed();
        assert!(!view.is_bound());
        let err = view.render().expect_err("render after removal must fail");
        assert!(matches!(err, Error::Unbound));
    }

    #[test]
    fn test_dropped_view_leaves_no_dangling_callback() {
        let record = Record::new();
        {
            let (view, _element) = view_with_element();
            view.bind(&record);
        }
        // view が落ちた後の変更は no-op（panic しないことが肝）
        record.set_title("into the void");
        assert_eq!(record.attrs().title, "into the void");
    }

    #[test]
    fn test_failing_element_is_best_effort() {
        struct FailingElement;
        impl Element for FailingElement {
            fn replace_content(&self, _markup: &str) -> anyhow::Result<()> {
                anyhow::bail!("detached element")
            }
            fn set_flag(&self, _name: &str, _on: bool) -> anyhow::Result<()> {
                anyhow::bail!("detached element")
            }
        }
        let view = RecordView::new(Arc::new(ListItemTemplate::new()), Arc::new(FailingElement));
        let record = Record::new();
        record.set_title("still rendered");
        view.bind(&record);
        let markup = view.render().expect("element failure must not fail render");
        assert!(markup.contains("still rendered"));
    }

    #[test]
    fn test_one_change_one_render() {
        struct CountingElement(AtomicUsize);
        impl Element for CountingElement {
            fn replace_content(&self, _markup: &str) -> anyhow::Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            fn set_flag(&self, _name: &str, _on: bool) -> anyhow::Result<()> {
                Ok(())
            }
        }
        let element = Arc::new(CountingElement(AtomicUsize::new(0)));
        let view = RecordView::new(
            Arc::new(ListItemTemplate::new()),
            Arc::clone(&element) as Arc<dyn Element>,
        );
        let record = Record::new();
        view.bind(&record);
        record.set_title("one");
        record.set_title("two");
        assert_eq!(element.0.load(Ordering::SeqCst), 2);
    }
}
