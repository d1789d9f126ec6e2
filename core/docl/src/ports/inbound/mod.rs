//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use doclist::error::Error;

use crate::cli::Config;

/// docl アプリケーションを実行する Inbound ポート
///
/// main はこの trait を実装した Runner の run を呼び出す。
pub trait UseCaseRunner: Send + Sync {
    fn run(&self, config: Config) -> Result<i32, Error>;
}
