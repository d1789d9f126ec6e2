//! 固定レスポンスを返す Transport（ネットワーク不要。デモ・テスト用）

use crate::error::Error;
use crate::ports::outbound::Transport;

/// どのパスに対しても用意されたボディを返す Transport
pub struct FixtureTransport {
    body: String,
}

impl FixtureTransport {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// 組み込みのサンプル文書一覧（docl -p demo が使う）
    pub fn sample() -> Self {
        Self::new(
            r#"{
  "count": 3,
  "next": null,
  "previous": null,
  "results": [
    {"id": 1, "correspondent": "ACME GmbH", "title": "Invoice 2026-003"},
    {"id": 2, "correspondent": "City Library", "title": "Overdue notice"},
    {"id": 3, "correspondent": "", "title": "Scanned receipt", "done": true}
  ]
}"#,
        )
    }
}

impl Transport for FixtureTransport {
    fn get(&self, _path: &str) -> Result<String, Error> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::Page;

    #[test]
    fn test_sample_body_parses_as_a_page() {
        let body = FixtureTransport::sample().get("/api/documents").unwrap();
        let page = Page::parse(&body).expect("built-in sample must stay well-formed");
        assert_eq!(page.records.len(), 3);
        assert!(page.records[2].attrs().done);
    }
}
