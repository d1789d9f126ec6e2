//! ポート定義（現状 Outbound のみ）

pub mod outbound;
