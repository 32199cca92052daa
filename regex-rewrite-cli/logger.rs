// A logger that writes every record to stderr. Filtering is left to the
// global max level set from RUST_LOG in main.

use log::{self, Log};

#[derive(Debug)]
pub struct Logger(());

const LOGGER: &'static Logger = &Logger(());

impl Logger {
    /// Install the stderr logger as the global logger.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        match record.line() {
            Some(line) => eprintln!(
                "{}|{}:{}: {}",
                record.level(),
                record.target(),
                line,
                record.args()
            ),
            None => eprintln!(
                "{}|{}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
        }
    }

    fn flush(&self) {}
}
