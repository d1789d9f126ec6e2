//! 一覧取得ユースケース
//!
//! store を 1 回フェッチし、record ごとに view を束ねて `<li>` 断片へ描画する。
//! 表示（stdout への出力）は CLI の責務のため、ここはデータのみ返す。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use doclist::adapter::BufferElement;
use doclist::error::Error;
use doclist::ports::outbound::{now_iso8601, Element, Log, LogLevel, LogRecord, Template};
use doclist::store::RecordStore;
use doclist::view::RecordView;

/// 一覧の取得と描画を行うユースケース
pub struct ListUseCase {
    store: Mutex<RecordStore>,
    template: Arc<dyn Template>,
    log: Arc<dyn Log>,
}

impl ListUseCase {
    pub fn new(store: RecordStore, template: Arc<dyn Template>, log: Arc<dyn Log>) -> Self {
        Self {
            store: Mutex::new(store),
            template,
            log,
        }
    }

    /// 一覧を取得し、record ごとの `<li>` 断片を応答順で返す
    pub fn fetch_and_render(&self) -> Result<Vec<String>, Error> {
        let mut store = self
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = store.fetch() {
            self.log_fetch_failed(&e);
            return Err(e);
        }
        self.log_fetch_completed(store.len());

        let mut items = Vec::with_capacity(store.len());
        for record in store.records() {
            let element = Arc::new(BufferElement::new());
            let view = RecordView::new(
                Arc::clone(&self.template),
                Arc::clone(&element) as Arc<dyn Element>,
            );
            view.bind(record);
            view.render()?;
            items.push(element.item_html());
        }
        Ok(items)
    }

    fn log_fetch_completed(&self, records: usize) {
        let mut fields = BTreeMap::new();
        fields.insert("records".to_string(), serde_json::json!(records));
        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "fetch completed".to_string(),
            layer: Some("usecase".to_string()),
            kind: Some("fetch".to_string()),
            fields: Some(fields),
        });
    }

    fn log_fetch_failed(&self, error: &Error) {
        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Error,
            message: format!("fetch failed: {}", error),
            layer: Some("usecase".to_string()),
            kind: Some("fetch".to_string()),
            fields: None,
        });
    }
}
