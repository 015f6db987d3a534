//! Error reporting and logging setup shared by hollow's tests and its command-line tool.
//!
//! Call [`setup`] at the top of every test. It is idempotent, so tests sharing a process
//! do not fight over the global logger.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]

pub use color_eyre::eyre;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use std::sync::Once;

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(), // Catppuccin red (Maroon)
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),  // Catppuccin yellow (Peach)
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),  // Catppuccin green (Green)
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(), // Catppuccin blue (Blue)
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(), // Catppuccin teal (Teal)
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record
                .target()
                .style(Style::new().fg_rgb::<137, 180, 250>()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs color-eyre and color-backtrace (except on miri) and a logger that lets
/// everything through. Safe to call any number of times.
pub fn setup() {
    setup_with_level(LevelFilter::Trace);
}

/// Like [`setup`], with an explicit maximum log level. Only the first call in a process
/// takes effect.
pub fn setup_with_level(level: LevelFilter) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        #[cfg(not(miri))]
        install_hooks();

        if log::set_boxed_logger(Box::new(SimpleLogger)).is_ok() {
            log::set_max_level(level);
        }
    });
}

/// Parses a `RUST_LOG`-style level name (`warn`, `debug`, ...), case-insensitively
pub fn level_from_env(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(default)
}

#[cfg(not(miri))]
fn install_hooks() {
    use color_eyre::config::HookBuilder;
    use regex::Regex;
    use std::sync::LazyLock;

    /// Frames hidden from error backtraces: panic machinery, the test runner, and a few
    /// threading details.
    static IGNORE_FRAMES: LazyLock<Option<Regex>> = LazyLock::new(|| {
        Regex::new(r"^(std::panic|core::panic|test::run_test|__pthread_cond_wait|std::sys::(pal|backtrace)|std::thread::Builder|core::ops::function|test::__rust_begin_short_backtrace|<core::panic::|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once)")
            .ok()
    });

    fn ignored(name: &str) -> bool {
        IGNORE_FRAMES
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }

    let eyre_filter = move |frames: &mut Vec<&color_eyre::config::Frame>| {
        frames.retain(|frame| {
            frame
                .name
                .as_ref()
                .map(|n| !ignored(&n.to_string()))
                .unwrap_or(true)
        });
    };

    // another hook may already be installed by the host program
    let _ = HookBuilder::default()
        .add_frame_filter(Box::new(eyre_filter))
        .install();

    {
        use color_backtrace::{BacktracePrinter, Frame};

        let filter = move |frames: &mut Vec<&Frame>| {
            frames.retain(|frame| {
                frame
                    .name
                    .as_ref()
                    .map(|name| !ignored(name))
                    .unwrap_or(true)
            });
        };

        let stderr = color_backtrace::termcolor::StandardStream::stderr(
            color_backtrace::termcolor::ColorChoice::Auto,
        );
        let printer = BacktracePrinter::new().add_frame_filter(Box::new(filter));
        printer.install(Box::new(stderr));
    }
}
