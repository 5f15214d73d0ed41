//! Version and usage output.

/// The current version of chatwire, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: chatwire [-v...] [--version] [--help]

Type a message and press Enter to send it. Commands:
  /cancel   stop the reply in progress
  /quit     exit (Ctrl-D also exits)

Ctrl-C cancels a streaming reply.

Environment:
  CHATWIRE_ENDPOINT              chat endpoint URL
  CHATWIRE_CONNECT_TIMEOUT_SECS  connect timeout in seconds
  RUST_LOG                       log filter, overrides -v";

/// Version line printed by `--version`.
pub fn version_string() -> String {
    format!("chatwire {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        // Version should be in semver format (e.g., "0.1.0")
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_string().starts_with("chatwire "));
    }
}
