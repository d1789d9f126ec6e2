mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::process;

use doclist::error::Error;
use doclist::ports::outbound::{now_iso8601, LogLevel, LogRecord};

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::DoclCommand;
use ports::inbound::UseCaseRunner;
use wiring::{wire_docl, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                Some(m)
            },
        });

        let result: Result<i32, Error> = match cmd {
            DoclCommand::Help => {
                print_help();
                Ok(0)
            }
            DoclCommand::List => {
                let items = self.app.list_use_case.fetch_and_render()?;
                println!("<ul id=\"document-list\">");
                for item in &items {
                    println!("  {}", item);
                }
                println!("</ul>");
                Ok(0)
            }
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command finished".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                m.insert("exit_code".to_string(), serde_json::json!(code));
                Some(m)
            },
        });
        if let Err(ref e) = result {
            let _ = self.app.logger.log(&LogRecord {
                ts: now_iso8601(),
                level: LogLevel::Error,
                message: e.to_string(),
                layer: Some("cli".to_string()),
                kind: Some("error".to_string()),
                fields: None,
            });
        }
        result
    }
}

fn cmd_name_for_log(cmd: &DoclCommand) -> &'static str {
    match cmd {
        DoclCommand::Help => "help",
        DoclCommand::List => "list",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("docl: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_docl(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: docl [options]");
}

fn print_help() {
    println!("Usage: docl [options]");
    println!("Options:");
    println!("  -h, --help                Show this help message");
    println!("  -u, --url <base>          Base URL of the document server (default: http://127.0.0.1:8000)");
    println!("  -r, --resource <path>     Resource path of the document list (default: /api/documents)");
    println!("  -p, --profile <profile>   Transport profile: http (default) or demo (built-in sample, no network)");
    println!("  -v, --verbose             Emit human-readable logs to stderr");
    println!("  --generate <shell>        Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  DOCL_CONFIG     Path to a JSON config file ({{\"base_url\": ..., \"resource\": ...}})");
    println!("  DOCL_URL        Base URL (overrides the config file)");
    println!("  DOCL_RESOURCE   Resource path (overrides the config file)");
    println!("  DOCL_LOG_FILE   Append structured JSONL logs to this file");
    println!();
    println!("Description:");
    println!("  Fetch the document list once and print one <li> fragment per document.");
    println!();
    println!("Examples:");
    println!("  docl -p demo");
    println!("  docl -u https://paperless.local -r /api/documents");
}
