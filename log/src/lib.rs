use std::{fmt::Display, str::FromStr};

use backtrace::Backtrace;
use tracing::level_filters::LevelFilter;

pub fn init(display_level: &bool, level_filter: &str) {
    let level_filter = match LevelFilter::from_str(level_filter) {
        Ok(level) => level,
        Err(err) => panic!("Invalid log level filter '{level_filter}': {err}"),
    };

    if tracing_subscriber::fmt()
        .with_level(*display_level)
        .with_max_level(level_filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        warn(None, "[Log] Subscriber is already installed");
    }
}

pub fn trace<T: Display>(prefix: Option<&str>, msg: T) {
    tracing::trace!("{}", line(prefix, "🐾", msg));
}

pub fn debug<T: Display>(prefix: Option<&str>, msg: T) {
    tracing::debug!("{}", line(prefix, "🐞", msg));
}

pub fn info<T: Display>(prefix: Option<&str>, msg: T) {
    tracing::info!("{}", line(prefix, "📢", msg));
}

pub fn warn<T: Display>(prefix: Option<&str>, msg: T) {
    tracing::warn!("{}", line(prefix, "⚠️", msg));
}

pub fn error<T: Display>(prefix: Option<&str>, msg: T) {
    let line = line(prefix, "🚨", msg);
    if backtrace_enabled() {
        tracing::error!("{line}\n{:?}", Backtrace::new());
    } else {
        tracing::error!("{line}");
    }
}

pub fn panic<T: Display>(prefix: Option<&str>, msg: T) -> ! {
    panic!("{}", line(prefix, "☠️", msg))
}

fn line<T: Display>(prefix: Option<&str>, fallback: &str, msg: T) -> String {
    format!("{} {msg}", prefix.unwrap_or(fallback))
}

fn backtrace_enabled() -> bool {
    std::env::var("RUST_BACKTRACE").is_ok_and(|var| var == "1" || var == "full")
}

#[cfg(test)]
mod tests {
    use super::line;

    #[test]
    fn line_uses_fallback_prefix() {
        assert_eq!(line(None, "📢", "[Mailer] Running"), "📢 [Mailer] Running");
        assert_eq!(line(Some("⚡"), "📢", 42), "⚡ 42");
    }

    #[test]
    #[should_panic(expected = "☠️ boom")]
    fn panic_formats_message() {
        super::panic(None, "boom");
    }
}
