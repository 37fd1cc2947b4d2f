use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::cell::Cell;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Log topics accepted by `--debug-filter`.
pub const TOPICS: [&str; 4] = ["arena", "robot", "collision", "scene"];

thread_local! {
    static CURRENT_TICK: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Tick shown as `[T#####]` on every record logged from this thread while
/// set. `Arena::tick` sets it for the duration of a tick.
pub fn set_tick_context(tick: Option<u64>) {
    CURRENT_TICK.with(|current| current.set(tick));
}

#[derive(Debug)]
struct ArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl ArenaLogger {
    // Pulls the number following `marker` out of a message, e.g. "Tick 42"
    fn extract_number(message: &str, marker: &str) -> Option<u64> {
        let start = message.find(marker)? + marker.len();
        let digits: String = message[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    // A "Tick N" in the message wins over the thread's tick context
    fn context(message: &str) -> String {
        match Self::extract_number(message, "Tick ").or_else(|| CURRENT_TICK.with(Cell::get)) {
            Some(tick) => format!("[T{:05}] ", tick),
            None => String::new(),
        }
    }
}

impl log::Log for ArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Topic filters only restrict the chatty levels
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = Self::context(&message);

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );

        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A closed stdout must not take the simulation down with it
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<ArenaLogger> = OnceLock::new();

/// Parses a level name as given on the command line. Unknown names fall
/// back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter: &str) -> HashSet<String> {
    filter
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Installs the process-wide logger with optional comma separated debug
/// topics (see [`TOPICS`]).
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ArenaLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

#[macro_export]
macro_rules! debug_arena {
    ($id:expr => $($arg:tt)+) => {
        log::debug!(target: "arena", "[E{}] {}", $id, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "arena", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_robot {
    ($id:expr => $($arg:tt)+) => {
        log::debug!(target: "robot", "[E{}] {}", $id, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "robot", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_collision {
    ($id:expr => $($arg:tt)+) => {
        log::debug!(target: "collision", "[E{}] {}", $id, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "collision", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_scene {
    ($($arg:tt)+) => {
        log::debug!(target: "scene", $($arg)+)
    };
}
