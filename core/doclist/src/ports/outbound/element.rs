//! 表示要素の Outbound ポート
//!
//! view 1 つにつき要素 1 つ。要素をレイアウトのどこへ挿入するかは親の責務で、
//! view は内容の置き換えとフラグの切り替えしか行わない。

use anyhow::Result;

/// view が描画先として使う単一要素
pub trait Element: Send + Sync {
    /// 要素の内容をマークアップで置き換える
    fn replace_content(&self, markup: &str) -> Result<()>;

    /// 名前付きの表示フラグ（例: "done"）を on/off する
    fn set_flag(&self, name: &str, on: bool) -> Result<()>;
}
