//! CLI レイヤー（引数解析と Command への変換）

pub mod args;

pub use args::{parse_args, print_completion, Config, ParseOutcome};

use crate::domain::DoclCommand;

/// Config を実行コマンドへ変換する
pub fn config_to_command(config: &Config) -> DoclCommand {
    if config.help {
        return DoclCommand::Help;
    }
    DoclCommand::List
}
