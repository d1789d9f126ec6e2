//! Outbound ポートの標準アダプタ

pub mod buffer_element;
pub mod file_json_log;
pub mod fixture_transport;
pub mod flag_interrupt;
pub mod http_transport;
pub mod list_item_template;

pub use buffer_element::BufferElement;
pub use file_json_log::{FileJsonLog, NoopLog, StderrLog};
pub use fixture_transport::FixtureTransport;
pub use flag_interrupt::FlagInterrupt;
pub use http_transport::HttpTransport;
pub use list_item_template::ListItemTemplate;
