#![forbid(unsafe_code)]

//! Subscriber setup.
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! install a formatter:
//!
//! | Level | Emitted for |
//! |-------|-------------|
//! | `debug` | Ignored gestures, no-op reorders, storage writes |
//! | `info` | Committed reorders, deletes, updates, creates |
//! | `warn` | Dropped duplicate ids, repaired storage |
//!
//! The filter comes from `FAMSLAM_LOG`, then `RUST_LOG`, then `info`.

use std::fmt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Filter directive variable checked first.
pub const ENV_LOG: &str = "FAMSLAM_LOG";

/// Fallback filter directive variable.
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a format name (`pretty`/`text`/`fmt` or `json`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "fmt" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a filter from the first directive that parses, else `info`.
#[must_use]
pub fn filter_from<I>(directives: I) -> EnvFilter
where
    I: IntoIterator<Item = Option<String>>,
{
    directives
        .into_iter()
        .flatten()
        .filter(|d| !d.trim().is_empty())
        .find_map(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Filter from `FAMSLAM_LOG`, `RUST_LOG`, or `info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    filter_from([std::env::var(ENV_LOG).ok(), std::env::var(ENV_RUST_LOG).ok()])
}

/// Build a subscriber writing to `writer`.
pub fn subscriber<W>(
    format: LogFormat,
    filter: EnvFilter,
    writer: W,
) -> Box<dyn tracing::Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    match format {
        LogFormat::Pretty => Box::new(registry.with(layer)),
        LogFormat::Json => Box::new(registry.with(layer.json())),
    }
}

/// Install the global subscriber writing to stderr.
///
/// Returns false if a global subscriber was already installed.
pub fn init(format: LogFormat) -> bool {
    let subscriber = subscriber(format, env_filter(), std::io::stderr);
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        tracing::debug!(format = %format, "logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_names() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("fmt"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
        assert_eq!(LogFormat::default().to_string(), "pretty");
    }

    #[test]
    fn filter_prefers_first_valid_directive() {
        let filter = filter_from([Some("famslam_list=debug".into()), Some("warn".into())]);
        assert_eq!(filter.to_string(), "famslam_list=debug");
    }

    #[test]
    fn filter_skips_blank_and_missing() {
        let filter = filter_from([None, Some("  ".into()), Some("warn".into())]);
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(filter_from([None, None]).to_string(), "info");
    }
}
