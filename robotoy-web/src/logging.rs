use log::LevelFilter;

const LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use simplelog::{Config, SimpleLogger};

    // A second init (tests, re-entry) keeps the first logger.
    let _ = SimpleLogger::init(LOG_LEVEL, Config::default());
}

#[cfg(target_arch = "wasm32")]
pub fn init() {
    static LOGGER: MiniquadLogger = MiniquadLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOG_LEVEL);
    }
}

/// Forwards `log` records to the browser console through miniquad.
#[cfg(target_arch = "wasm32")]
struct MiniquadLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for MiniquadLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= LOG_LEVEL
    }

    fn log(&self, record: &log::Record) {
        use macroquad::miniquad;

        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            log::Level::Error => miniquad::error!("{}", record.args()),
            log::Level::Warn => miniquad::warn!("{}", record.args()),
            _ => miniquad::info!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}
