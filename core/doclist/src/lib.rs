//! doclist 共通ライブラリ
//!
//! リモート API の文書一覧をローカルにミラーする RecordStore と、
//! record の変更に追随して再描画する RecordView を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（record / page / 購読ハンドル）
pub mod domain;

/// ローカルミラー（取得・正規化・全置換）
pub mod store;

/// record 1件と 1:1 で結び付く描画ビュー
pub mod view;

/// サーバ設定（config.json 用の設定型）
pub mod config;

/// Outbound ポート（transport / template / element / log / interrupt）
pub mod ports;

/// 標準アダプタ
pub mod adapter;

pub use error::Error;
pub use store::{RecordStore, StoreEvent};
pub use view::RecordView;
