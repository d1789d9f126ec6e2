//! エラーハンドリング
//!
//! store / view / CLI で共通のエラー型。終了コードは sysexits に合わせる。

/// doclist / docl 共通のエラー型
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// リモートに到達できない、または非成功ステータスを返した
    #[error("transport error: {0}")]
    Transport(String),
    /// レスポンスボディが期待した形でない（`results` 欠落・JSON 不正）
    #[error("parse error: {0}")]
    Parse(String),
    /// record 未バインドの view を render した（事前条件違反）
    #[error("view has no bound record")]
    Unbound,
    /// フェッチが割り込みで中断された（ストアは変更されない）
    #[error("fetch interrupted")]
    Interrupted,
    /// CLI 引数の誤り
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// sysexits 互換の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Parse(_) => 65,
            Self::Transport(_) => 69,
            Self::Unbound => 70,
            Self::Interrupted => 130,
        }
    }

    /// usage を表示すべきエラーかどうか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
