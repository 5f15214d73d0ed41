//! Command-line argument parsing for the chatwire binary.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive chat (default)
    Chat {
        /// Number of `-v` flags given
        verbosity: u8,
    },
}

/// Parse command-line arguments and return the appropriate command.
///
/// `-v` may be repeated or stacked (`-vv`) to raise the log level.
///
/// # Examples
///
/// ```
/// use chatwire::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatwire".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut verbosity: u8 = 0;
    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            flag if is_verbose_cluster(flag) => {
                let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                verbosity = verbosity.saturating_add(count);
            }
            _ => {}
        }
    }
    CliCommand::Chat { verbosity }
}

fn is_verbose_cluster(flag: &str) -> bool {
    flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v')
}

/// Default log directive for a verbosity count.
pub fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
