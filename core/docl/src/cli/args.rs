use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;

use doclist::error::Error;

use crate::domain::ProfileName;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 人間向けログを stderr に出力する
    pub verbose: bool,
    /// -p / --profile: transport プロファイル（http / demo）
    pub profile: Option<ProfileName>,
    /// -u / --url: ベース URL（設定ファイル・環境変数より優先）
    pub url: Option<String>,
    /// -r / --resource: 一覧リソースのパス
    pub resource: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            profile: None,
            url: None,
            resource: None,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("docl")
        .about("Fetch a remote document list and print it as <li> fragments")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit human-readable logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Transport profile: http (default) or demo")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("url")
                .short('u')
                .long("url")
                .value_name("base")
                .help("Base URL of the document server")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("resource")
                .short('r')
                .long("resource")
                .value_name("path")
                .help("Resource path of the document list")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script (bash, zsh, fish)")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

/// コマンドライン引数を解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(*shell));
    }

    Ok(ParseOutcome::Config(Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProfileName::new(s.as_str())),
        url: matches.get_one::<String>("url").cloned(),
        resource: matches.get_one::<String>("resource").cloned(),
    }))
}

/// 補完スクリプトを stdout へ出力する
pub fn print_completion(shell: Shell) {
    let mut command = build_clap_command();
    clap_complete::generate(shell, &mut command, "docl", &mut std::io::stdout());
}
