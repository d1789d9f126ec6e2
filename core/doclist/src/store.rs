//! RecordStore: リモート文書一覧のローカルミラー
//!
//! fetch は「取得 → パース → 全置換」の一本道。応答順がそのまま保持順になる。
//! 置換は丸ごと（マージしない）。どの失敗経路でもストアは直前の状態を保つ。

use std::sync::{Arc, Mutex};

use crate::domain::page::{Page, PageInfo};
use crate::domain::record::Record;
use crate::domain::watch::{Subscription, Watchers};
use crate::error::Error;
use crate::ports::outbound::{InterruptChecker, Transport};

/// store の所属変更通知（record 単位の属性変更とは別系統）
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// add で 1 件加わった
    Added(Record),
    /// remove で 1 件外れた
    Removed(Record),
    /// fetch による全置換
    Reset,
}

/// 順序付き・一意 id 付きの record コレクション
pub struct RecordStore {
    transport: Arc<dyn Transport>,
    resource: String,
    interrupt: Option<Arc<dyn InterruptChecker>>,
    records: Vec<Record>,
    last_page: Option<PageInfo>,
    watchers: Arc<Mutex<Watchers<StoreEvent>>>,
}

impl RecordStore {
    pub fn new(transport: Arc<dyn Transport>, resource: impl Into<String>) -> Self {
        Self {
            transport,
            resource: resource.into(),
            interrupt: None,
            records: Vec::new(),
            last_page: None,
            watchers: Arc::new(Mutex::new(Watchers::new())),
        }
    }

    /// フェッチ中断の確認先を設定する（未設定なら中断しない）
    pub fn with_interrupt_checker(mut self, checker: Arc<dyn InterruptChecker>) -> Self {
        self.interrupt = Some(checker);
        self
    }

    /// リソースを 1 ページ取得し、内容を丸ごと置き換える
    ///
    /// 失敗（transport / parse / 割り込み）時は何も置き換えず、直前の内容が残る。
    /// 置き換えで外れた record には Removed が通知され、結び付いた view は解除される。
    /// 同じ store に対して複数の fetch が競合した場合は、後から反映された応答が勝つ。
    pub fn fetch(&mut self) -> Result<&[Record], Error> {
        let body = self.transport.get(&self.resource)?;
        if let Some(ref checker) = self.interrupt {
            if checker.is_interrupted() {
                return Err(Error::Interrupted);
            }
        }
        let page = Page::parse(&body)?;

        // ここから下は失敗しない。観測者から見て置換は途中状態を持たない。
        let replaced = std::mem::replace(&mut self.records, page.records);
        self.last_page = Some(page.info);
        for record in &replaced {
            record.notify_removed();
        }
        self.emit(&StoreEvent::Reset);
        Ok(&self.records)
    }

    /// record を末尾に加える（ローカルのみ。ネットワーク操作はしない）
    pub fn add(&mut self, record: Record) {
        self.records.push(record.clone());
        self.emit(&StoreEvent::Added(record));
    }

    /// record を外す。含まれていたら true
    pub fn remove(&mut self, record: &Record) -> bool {
        let before = self.records.len();
        self.records.retain(|candidate| !candidate.same_record(record));
        if self.records.len() == before {
            return false;
        }
        record.notify_removed();
        self.emit(&StoreEvent::Removed(record.clone()));
        true
    }

    /// 現在の内容（応答順）
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// 直近の成功フェッチのページメタ情報
    pub fn last_page(&self) -> Option<&PageInfo> {
        self.last_page.as_ref()
    }

    /// 所属変更通知を購読する
    pub fn subscribe(
        &self,
        callback: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = match self.watchers.lock() {
            Ok(mut watchers) => watchers.add(Arc::new(callback)),
            Err(poisoned) => poisoned.into_inner().add(Arc::new(callback)),
        };
        let watchers = Arc::downgrade(&self.watchers);
        Subscription::new(move || {
            if let Some(watchers) = watchers.upgrade() {
                if let Ok(mut watchers) = watchers.lock() {
                    watchers.remove(id);
                }
            }
        })
    }

    fn emit(&self, event: &StoreEvent) {
        let snapshot = match self.watchers.lock() {
            Ok(watchers) => watchers.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        };
        for callback in snapshot {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    /// 呼び出しごとに用意されたボディを順に返す Transport
    struct ScriptedTransport {
        bodies: StdMutex<Vec<Result<String, Error>>>,
    }

    impl ScriptedTransport {
        fn new(bodies: Vec<Result<String, Error>>) -> Arc<Self> {
            Arc::new(Self {
                bodies: StdMutex::new(bodies),
            })
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, _path: &str) -> Result<String, Error> {
            let mut bodies = self.bodies.lock().unwrap();
            if bodies.is_empty() {
                return Err(Error::transport("no scripted response left"));
            }
            bodies.remove(0)
        }
    }

    fn titles(store: &RecordStore) -> Vec<String> {
        store
            .records()
            .iter()
            .map(|record| record.attrs().title)
            .collect()
    }

    #[test]
    fn test_fetch_normalizes_in_response_order() {
        let transport = ScriptedTransport::new(vec![Ok(r#"{
            "results": [
                {"id": 1, "correspondent": "Alice", "title": "Invoice"},
                {"id": 2, "correspondent": "Bob"}
            ]
        }"#
        .to_string())]);
        let mut store = RecordStore::new(transport, "/api/documents");
        let fetched = store.fetch().expect("fetch should succeed");
        assert_eq!(fetched.len(), 2);
        assert_eq!(titles(&store), ["Invoice".to_string(), String::new()]);
        assert_eq!(store.records()[1].attrs().correspondent, "Bob");
    }

    #[test]
    fn test_second_fetch_replaces_not_merges() {
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"results": [{"id": 1, "title": "old-a"}, {"id": 2, "title": "old-b"}]}"#.to_string()),
            Ok(r#"{"results": [{"id": 3, "title": "new"}]}"#.to_string()),
        ]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        store.fetch().unwrap();
        assert_eq!(titles(&store), ["new".to_string()]);
    }

    #[test]
    fn test_transport_failure_preserves_contents() {
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"results": [{"id": 1, "title": "kept"}]}"#.to_string()),
            Err(Error::transport("connection refused")),
        ]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        let err = store.fetch().expect_err("transport failure must surface");
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(titles(&store), ["kept".to_string()]);
    }

    #[test]
    fn test_parse_failure_preserves_contents() {
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"results": [{"id": 1, "title": "kept"}]}"#.to_string()),
            Ok(r#"{"detail": "results missing"}"#.to_string()),
        ]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        let err = store.fetch().expect_err("missing results must surface");
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(titles(&store), ["kept".to_string()]);
    }

    #[test]
    fn test_interrupted_fetch_preserves_contents() {
        struct AlwaysInterrupted;
        impl InterruptChecker for AlwaysInterrupted {
            fn is_interrupted(&self) -> bool {
                true
            }
        }
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"results": [{"id": 1, "title": "kept"}]}"#.to_string()),
            Ok(r#"{"results": []}"#.to_string()),
        ]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        store.interrupt = Some(Arc::new(AlwaysInterrupted));
        let err = store.fetch().expect_err("interrupt must abort the apply");
        assert!(matches!(err, Error::Interrupted));
        assert_eq!(titles(&store), ["kept".to_string()]);
    }

    #[test]
    fn test_reset_notifies_replaced_records() {
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"results": [{"id": 1, "title": "old"}]}"#.to_string()),
            Ok(r#"{"results": [{"id": 2, "title": "new"}]}"#.to_string()),
        ]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        let old = store.records()[0].clone();
        let removed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&removed);
        let _sub = old.subscribe(move |event| {
            if matches!(event, crate::domain::RecordEvent::Removed) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        store.fetch().unwrap();
        assert_eq!(removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_membership_events_are_distinct_from_attr_events() {
        let transport = ScriptedTransport::new(vec![]);
        let mut store = RecordStore::new(transport, "/api/documents");
        let events = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let _sub = store.subscribe(move |event| {
            let name = match event {
                StoreEvent::Added(_) => "added",
                StoreEvent::Removed(_) => "removed",
                StoreEvent::Reset => "reset",
            };
            sink.lock().unwrap().push(name);
        });
        let record = Record::new();
        store.add(record.clone());
        // 属性変更は store の購読者には流れない
        record.set_title("untracked");
        assert!(store.remove(&record));
        assert!(!store.remove(&record));
        assert_eq!(events.lock().unwrap().as_slice(), ["added", "removed"]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_fetch_bind_render_end_to_end() {
        use crate::adapter::{BufferElement, ListItemTemplate};
        use crate::view::RecordView;

        let transport = ScriptedTransport::new(vec![Ok(
            r#"{"results":[{"correspondent":"Alice","title":"Invoice"}]}"#.to_string(),
        )]);
        let mut store = RecordStore::new(transport, "/api/documents");
        store.fetch().unwrap();
        assert_eq!(store.len(), 1);
        let record = store.get(0).unwrap().clone();
        assert_eq!(record.attrs().correspondent, "Alice");
        assert_eq!(record.attrs().title, "Invoice");

        let element = Arc::new(BufferElement::new());
        let view = RecordView::new(
            Arc::new(ListItemTemplate::new()),
            Arc::clone(&element) as Arc<dyn crate::ports::outbound::Element>,
        );
        view.bind(&record);
        let markup = view.render().unwrap();
        assert!(markup.contains("Alice"));
        assert!(markup.contains("Invoice"));

        // 再フェッチなしで set だけで再描画される
        record.set_title("Invoice-Revised");
        assert!(element.content().contains("Invoice-Revised"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_last_page_carries_pagination_metadata() {
        let transport = ScriptedTransport::new(vec![Ok(
            r#"{"count": 40, "next": "/api/documents/?page=2", "previous": null, "results": []}"#
                .to_string(),
        )]);
        let mut store = RecordStore::new(transport, "/api/documents");
        assert!(store.last_page().is_none());
        store.fetch().unwrap();
        let page = store.last_page().expect("metadata recorded after fetch");
        assert_eq!(page.count, Some(40));
        assert_eq!(page.next.as_deref(), Some("/api/documents/?page=2"));
    }
}
