//! ポート定義（現状 Inbound のみ。Outbound は doclist 側に集約）

pub mod inbound;
