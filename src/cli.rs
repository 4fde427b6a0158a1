use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// StartGG Bracket Synchronizer
///
/// Keeps a local view of your StartGG tournaments, events, and match sets in
/// sync with the StartGG GraphQL API. Runs one synchronization cycle and
/// prints the resulting state, or keeps refreshing with --watch.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// Select a tournament by index into the fetched tournament list before
    /// printing. Triggers the event fetch for that tournament.
    #[arg(short = 't', long = "tournament", help_heading = "Selection")]
    pub tournament: Option<usize>,

    /// Select an event by index into the fetched event list before printing.
    /// Triggers the match-set fetch for that event. Requires --tournament.
    #[arg(short = 'e', long = "event", help_heading = "Selection")]
    pub event: Option<usize>,

    /// Keep running and refresh every N seconds instead of exiting after one
    /// cycle.
    #[arg(short = 'w', long = "watch", value_name = "SECONDS", help_heading = "Mode")]
    pub watch: Option<u64>,

    /// Store a new StartGG API token in the config file.
    #[arg(long = "set-token", help_heading = "Configuration", value_name = "TOKEN")]
    pub new_api_token: Option<String>,

    /// Update log file path in config. This sets a persistent custom log
    /// file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the
    /// default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings (the token is masked)
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Mirror info logs to the terminal in addition to the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written
    /// to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

/// Whether the invocation only manages configuration and should skip the
/// synchronization run entirely.
pub fn is_config_only(args: &Args) -> bool {
    args.new_api_token.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
        || args.version
}
