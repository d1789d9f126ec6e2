//! サーバ設定（config.json 用の設定型）
//!
//! ファイル読みは呼び出し側（docl の配線）で行い、ここは JSON 文字列の
//! パースと省略時デフォルトだけを担当する。

use serde::Deserialize;

/// 省略時のベース URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// 省略時のリソースパス
pub const DEFAULT_RESOURCE: &str = "/api/documents";

/// 接続先サーバの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    pub resource: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }
}

/// serde 用の内部構造（省略可の項目を Option で受ける）
#[derive(Debug, Deserialize)]
struct ServerConfigRaw {
    #[serde(alias = "url")]
    base_url: Option<String>,
    #[serde(alias = "path")]
    resource: Option<String>,
}

impl ServerConfig {
    /// JSON 文字列からパース（ファイル読みは呼び出し側で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ServerConfigRaw = serde_json::from_str(json)?;
        let defaults = Self::default();
        Ok(Self {
            base_url: raw.base_url.unwrap_or(defaults.base_url),
            resource: raw.resource.unwrap_or(defaults.resource),
        })
    }
}
