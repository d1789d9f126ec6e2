//! ページ応答のパースと正規化
//!
//! リモート API は `{ "count", "next", "previous", "results": [...] }` 形式の
//! 1 ページを返す。`results` が無いボディは ParseError（空成功にはしない）。
//! serde 用の raw 構造体とドメイン型を分け、欠けた属性はここでデフォルトへ解決する。

use serde::Deserialize;

use crate::domain::record::{Record, RecordAttrs, RecordId};
use crate::error::Error;

/// ページ付けのメタ情報（データとして保持するのみ。`next` は辿らない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// パース済みの 1 ページ
#[derive(Debug)]
pub struct Page {
    pub info: PageInfo,
    pub records: Vec<Record>,
}

/// serde 用の内部構造（results の有無を区別するため Option で受ける）
#[derive(Debug, Deserialize)]
struct PageRaw {
    count: Option<u64>,
    next: Option<String>,
    previous: Option<String>,
    results: Option<Vec<EntryRaw>>,
}

#[derive(Debug, Deserialize)]
struct EntryRaw {
    id: Option<u64>,
    #[serde(default)]
    correspondent: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    done: bool,
}

impl Page {
    /// JSON ボディをパースして record 列へ正規化する
    pub fn parse(body: &str) -> Result<Self, Error> {
        let raw: PageRaw = serde_json::from_str(body)
            .map_err(|e| Error::parse(format!("response body is not valid JSON: {}", e)))?;
        let results = raw
            .results
            .ok_or_else(|| Error::parse("response body has no `results` field"))?;
        let records = results.into_iter().map(normalize).collect();
        Ok(Self {
            info: PageInfo {
                count: raw.count,
                next: raw.next,
                previous: raw.previous,
            },
            records,
        })
    }
}

fn normalize(entry: EntryRaw) -> Record {
    Record::with_attrs(
        entry.id.map(RecordId::new),
        RecordAttrs {
            correspondent: entry.correspondent,
            title: entry.title,
            done: entry.done,
        },
    )
}
