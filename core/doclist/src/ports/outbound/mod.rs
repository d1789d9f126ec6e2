//! Outbound ポート: store / view が外界（HTTP・テンプレート・表示要素・ログ）を使うための trait

pub mod element;
pub mod interrupt;
pub mod log;
pub mod template;
pub mod transport;

pub use element::Element;
pub use interrupt::InterruptChecker;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use template::Template;
pub use transport::Transport;
