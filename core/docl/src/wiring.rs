//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use doclist::adapter::{
    FileJsonLog, FixtureTransport, FlagInterrupt, HttpTransport, ListItemTemplate, NoopLog,
    StderrLog,
};
use doclist::config::ServerConfig;
use doclist::error::Error;
use doclist::ports::outbound::{Log, Template, Transport};
use doclist::store::RecordStore;

use crate::cli::Config;
use crate::usecase::ListUseCase;

/// 配線で組み立てたアプリ（main の Command ディスパッチで利用）
pub struct App {
    pub list_use_case: ListUseCase,
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_docl(config: &Config) -> Result<App, Error> {
    let logger = resolve_logger(config.verbose);
    let server = resolve_server_config(config, std::env::var_os("DOCL_CONFIG").map(PathBuf::from))?;
    let transport = resolve_transport(config, &server)?;

    let interrupt = FlagInterrupt::new();
    let flag = interrupt.flag();
    // set_handler はプロセスにつき 1 回しか効かない。2 回目以降の失敗は無視してよい
    let _ = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst));

    let store = RecordStore::new(transport, server.resource.clone())
        .with_interrupt_checker(Arc::new(interrupt));
    let template: Arc<dyn Template> = Arc::new(ListItemTemplate::new());

    Ok(App {
        list_use_case: ListUseCase::new(store, template, Arc::clone(&logger)),
        logger,
    })
}

/// サーバ設定の解決。優先順位はフラグ > 環境変数 > 設定ファイル > デフォルト
pub(crate) fn resolve_server_config(
    config: &Config,
    config_path: Option<PathBuf>,
) -> Result<ServerConfig, Error> {
    let mut server = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                Error::invalid_argument(format!("cannot read config file {}: {}", path.display(), e))
            })?;
            ServerConfig::parse(&text).map_err(|e| {
                Error::invalid_argument(format!("invalid config file {}: {}", path.display(), e))
            })?
        }
        None => ServerConfig::default(),
    };
    if let Ok(url) = std::env::var("DOCL_URL") {
        if !url.is_empty() {
            server.base_url = url;
        }
    }
    if let Ok(resource) = std::env::var("DOCL_RESOURCE") {
        if !resource.is_empty() {
            server.resource = resource;
        }
    }
    if let Some(ref url) = config.url {
        server.base_url = url.clone();
    }
    if let Some(ref resource) = config.resource {
        server.resource = resource.clone();
    }
    Ok(server)
}

fn resolve_transport(config: &Config, server: &ServerConfig) -> Result<Arc<dyn Transport>, Error> {
    let profile = config
        .profile
        .as_ref()
        .map(|p| p.as_str())
        .unwrap_or("http");
    match profile {
        "http" => Ok(Arc::new(HttpTransport::new(server.base_url.clone()))),
        "demo" => Ok(Arc::new(FixtureTransport::sample())),
        other => Err(Error::invalid_argument(format!(
            "Unknown profile: {} (expected http or demo)",
            other
        ))),
    }
}

fn resolve_logger(verbose: bool) -> Arc<dyn Log> {
    match std::env::var("DOCL_LOG_FILE") {
        Ok(path) if !path.is_empty() => Arc::new(FileJsonLog::new(path)),
        _ if verbose => Arc::new(StderrLog),
        _ => Arc::new(NoopLog),
    }
}
