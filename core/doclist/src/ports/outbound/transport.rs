//! HTTP 転送の Outbound ポート

use crate::error::Error;

/// 設定済みリソースへ読み取りリクエストを発行する trait
///
/// 実装は adapter::HttpTransport（reqwest blocking）や
/// adapter::FixtureTransport（ネットワーク不要、デモ・テスト用）など。
pub trait Transport: Send + Sync {
    /// `path` への GET。成功時はレスポンスボディの文字列を返す。
    /// 到達不能・非成功ステータスは Error::Transport。
    fn get(&self, path: &str) -> Result<String, Error>;
}
