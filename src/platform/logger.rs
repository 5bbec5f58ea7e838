use core::{fmt, str::FromStr};
use std::io::{self, Write};

use log::{Metadata, Record};
use spin::Mutex;

pub const LOG_LEVEL_ENV: &str = "SYSFILE_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

pub fn init() {
    let mut logger = Logger::new();
    if let Some(name) = process_name() {
        logger = logger.with_process_name(name);
    }
    if let Some(level) = level_from_env() {
        logger = logger.with_output(OutputBuilder::stderr().with_filter(level).build());
    }
    if logger.enable().is_err() {
        log::debug!("Logger already installed, keeping it");
    }
}

fn level_from_env() -> Option<log::LevelFilter> {
    let value = std::env::var(LOG_LEVEL_ENV).ok()?;
    log::LevelFilter::from_str(value.trim()).ok()
}

fn process_name() -> Option<String> {
    let arg0 = std::env::args_os().next()?;
    let name = std::path::Path::new(&arg0).file_name()?;
    Some(name.to_string_lossy().into_owned())
}

pub struct Output {
    endpoint: Mutex<Box<dyn Write + Send + 'static>>,
    filter: log::LevelFilter,
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Output")
            .field("endpoint", &"opaque")
            .field("filter", &self.filter)
            .finish()
    }
}

impl Default for Output {
    fn default() -> Self {
        OutputBuilder::stderr().build()
    }
}

pub struct OutputBuilder {
    endpoint: Box<dyn Write + Send + 'static>,
    filter: Option<log::LevelFilter>,
}

impl OutputBuilder {
    pub fn stderr() -> Self {
        Self::with_endpoint(io::stderr())
    }

    pub fn with_endpoint<T>(endpoint: T) -> Self
    where
        T: Write + Send + 'static,
    {
        Self {
            endpoint: Box::new(endpoint),
            filter: None,
        }
    }
    pub fn with_filter(mut self, filter: log::LevelFilter) -> Self {
        self.filter = Some(filter);
        self
    }
    pub fn build(self) -> Output {
        Output {
            endpoint: Mutex::new(self.endpoint),
            filter: self.filter.unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

#[derive(Debug, Default)]
pub struct Logger {
    output: Output,
    process_name: Option<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }
    pub fn with_process_name(mut self, name: String) -> Self {
        self.process_name = Some(name);
        self
    }
    pub fn enable(self) -> Result<&'static Self, log::SetLoggerError> {
        let leak = Box::leak(Box::new(self));
        log::set_logger(leak)?;
        log::set_max_level(leak.output.filter);
        Ok(leak)
    }
    fn write_record<W: Write + ?Sized>(
        record: &Record,
        process_name: Option<&str>,
        writer: &mut W,
    ) -> io::Result<()> {
        let target = record.module_path().unwrap_or(record.target());
        let level = record.level();
        let message = record.args();

        let process_name = process_name.unwrap_or("");
        let line = &LineFmt(record.line());
        writeln!(writer, "[{process_name}@{target}{line} {level}] {message}")
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.output.filter
    }
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut endpoint_guard = self.output.endpoint.lock();

            let _ = Self::write_record(
                record,
                self.process_name.as_deref(),
                endpoint_guard.as_mut(),
            );
        }
    }
    fn flush(&self) {
        let _ = self.output.endpoint.lock().flush();
    }
}

struct LineFmt(Option<u32>);
impl fmt::Display for LineFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(line) = self.0 {
            write!(f, ":{line}")
        } else {
            Ok(())
        }
    }
}
