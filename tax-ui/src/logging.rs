use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LogConfig;

// --- Formatter ---

/// `2026-10-19T09:14:02.118204+05:30  WARN session.rs:141 message key=value`
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };

        write!(
            writer,
            "{}{}{} ",
            paint("\x1b[2m"),
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f%:z"),
            paint("\x1b[0m")
        )?;

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        write!(writer, "{}{:>5}{} ", paint(colour), meta.level(), paint("\x1b[0m"))?;

        let file = meta
            .file()
            .map(|f| f.rsplit(['/', '\\']).next().unwrap_or(f));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            write!(writer, "{}{file}:{line}{} ", paint("\x1b[36m"), paint("\x1b[0m"))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type Slot = Arc<Mutex<Option<File>>>;

/// Writer target that can be pointed at a file after initialization.
/// Records are dropped while it is empty.
#[derive(Clone)]
struct FileSlot(Slot);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

fn lock_slot(slot: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    // A panic mid-write leaves at worst a torn line; keep logging.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_slot(&self.0))
    }
}

// --- Statics ---

type SetStrFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type SetBoolFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetStrFn> = OnceLock::new();
static SET_CONSOLE_ENABLED: OnceLock<SetBoolFn> = OnceLock::new();
static FILE_SLOT: OnceLock<Slot> = OnceLock::new();

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| anyhow!("invalid log level '{directive}': {e}"))
}

fn store_level_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_LOG_LEVEL.set(Box::new(move |directive: &str| {
        let filter = parse_filter(directive)?;
        handle
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    }));
}

fn store_console_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_CONSOLE_ENABLED.set(Box::new(move |enabled: bool| {
        // The global level filter still caps what "trace" lets through.
        let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
        handle
            .reload(gate)
            .map_err(|e| anyhow!("console reload failed: {e}"))
    }));
}

// --- Public API ---

/// Changes the active log filter at runtime.
/// Accepts a bare level ("warn", "debug", ...) or any `EnvFilter` directive.
pub fn set_log_level(directive: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(f) => f(directive),
        None => bail!("logging not yet initialized"),
    }
}

/// Shows or hides console output without affecting the log file.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    match SET_CONSOLE_ENABLED.get() {
        Some(f) => f(enabled),
        None => bail!("logging not yet initialized"),
    }
}

/// Starts appending log records to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *lock_slot(slot) = Some(file);
            Ok(())
        }
        None => bail!("logging not yet initialized"),
    }
}

/// Installs the global subscriber and applies `config`. Call once at startup.
///
/// - Level: `RUST_LOG` when set, `config.level` otherwise.
/// - Console: stderr, coloured when attached to a terminal.
/// - File: appended to when `config.file` is set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let level = match from_env {
        Some(filter) => filter,
        None => parse_filter(&config.level)?,
    };

    let slot: Slot = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(slot.clone());

    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(level);

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(slot));

    tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    store_level_handle(level_handle);
    store_console_handle(console_handle);

    if !config.console {
        set_console_enabled(false)?;
    }
    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    info!(level = %config.level, file = ?config.file, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_slot_swallows_writes() {
        let slot = FileSlot(Arc::new(Mutex::new(None)));
        let mut writer = slot.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        writer.flush().unwrap();
    }

    #[test]
    fn filled_slot_appends_to_file() {
        let path = std::env::temp_dir().join(format!("tax-wizard-slot-{}.log", std::process::id()));
        let _ = fs::remove_file(&path);
        let file = File::options().create(true).append(true).open(&path).unwrap();
        let slot = FileSlot(Arc::new(Mutex::new(Some(file))));

        slot.make_writer().write_all(b"first\n").unwrap();
        slot.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn bad_directive_is_rejected() {
        let err = parse_filter("tax_ui=loud").unwrap_err();
        assert!(err.to_string().starts_with("invalid log level"));
    }
}
