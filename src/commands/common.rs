//! Shared CLI arguments and logging setup.

use artifact_rank::metrics::DEFAULT_JUDGE_ENDPOINT;
use clap::{Args, ValueEnum};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared by subcommands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Code host personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// API key for the LLM dataset-quality judge
    #[arg(long, value_name = "KEY", env = "GEN_AI_STUDIO_API_KEY")]
    pub llm_key: Option<String>,

    /// Chat-completions endpoint used by the LLM judge
    #[arg(long, value_name = "URL", default_value = DEFAULT_JUDGE_ENDPOINT)]
    pub llm_endpoint: String,

    /// Pretty-print JSON output instead of one record per line
    #[arg(long)]
    pub pretty: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
