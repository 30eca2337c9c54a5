// src/config/cli.rs
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Flags that older schedulers pass with a single leading dash.
const LEGACY_FLAGS: &[&str] = &["-webhook", "-services", "-status", "-timeout-secs"];

#[derive(Debug, Clone, Parser)]
#[command(name = "uptime-status", version, about = "Check service uptime and record a rolling status history")]
pub struct Settings {
    /// Service catalog listing the apps and endpoints to check
    #[arg(long, default_value = "docs/services.json")]
    pub services: PathBuf,

    /// Status history file, read at start and rewritten at the end of the run
    #[arg(long, default_value = "docs/status.json")]
    pub status: PathBuf,

    /// Webhook receiving a message for every endpoint found down
    #[arg(long, env = "STATUS_WEBHOOK_URL")]
    pub webhook: Option<Url>,

    /// Per-request timeout for probes and notifications
    #[arg(long, default_value_t = 100)]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn from_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rewrites `-webhook <url>` style flags into their `--webhook` form.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(flag) if LEGACY_FLAGS.contains(&flag) => OsString::from(format!("-{}", flag)),
            _ => arg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        Settings::try_parse_from(normalize_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&["uptime-status"]);

        assert_eq!(settings.services, PathBuf::from("docs/services.json"));
        assert_eq!(settings.status, PathBuf::from("docs/status.json"));
        assert_eq!(settings.timeout(), Duration::from_secs(100));
    }

    #[test]
    fn test_legacy_webhook_flag() {
        let settings = parse(&["uptime-status", "-webhook", "https://hooks.example/abc"]);

        assert_eq!(
            settings.webhook.as_ref().map(Url::as_str),
            Some("https://hooks.example/abc")
        );
    }

    #[test]
    fn test_long_flags() {
        let settings = parse(&[
            "uptime-status",
            "--services",
            "catalog.yaml",
            "--status",
            "out/status.json",
            "--timeout-secs",
            "5",
        ]);

        assert_eq!(settings.services, PathBuf::from("catalog.yaml"));
        assert_eq!(settings.status, PathBuf::from("out/status.json"));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_webhook_is_rejected() {
        let result = Settings::try_parse_from(normalize_args(["uptime-status", "-webhook", "not a url"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_only_touches_known_flags() {
        let args = normalize_args(["bin", "-webhook", "https://h.example", "-v", "docs/x.json"]);
        let expected: Vec<OsString> = ["bin", "--webhook", "https://h.example", "-v", "docs/x.json"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }
}
