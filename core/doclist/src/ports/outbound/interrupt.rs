//! 割り込み確認の Outbound ポート（フェッチ中断の拡張点）

/// フェッチを中断すべきかどうかを返す trait
///
/// store は応答の到着後・反映前に確認する。中断時はストアを変更せず
/// Error::Interrupted を返す。
pub trait InterruptChecker: Send + Sync {
    fn is_interrupted(&self) -> bool;
}
