use core::cell::RefCell;
use core::fmt::Write;
use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record};
use pico_hid_kbd_lib::log_ring::LogRing;

/// Formatted records waiting for the serial port
static LOG_BUFFER: Mutex<RefCell<LogRing<4096>>> = Mutex::new(RefCell::new(LogRing::new()));

static LOGGER: SerialLogger = SerialLogger;

struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        critical_section::with(|cs| {
            let mut buf = LOG_BUFFER.borrow_ref_mut(cs);
            let _ = write!(buf, "[{}] {}\r\n", record.level(), record.args());
        });
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) {
    // Safety: Called once during setup before anything logs, there's no second core running.
    // The racy variants are the only ones available without compare-and-swap on the m0+.
    unsafe {
        let _ = log::set_logger_racy(&LOGGER);
        log::set_max_level_racy(level);
    }
}

/// Hands buffered bytes to `write` oldest first, `write` returns how many it took.
pub fn drain<F: FnMut(&[u8]) -> usize>(mut write: F) {
    critical_section::with(|cs| {
        let mut buf = LOG_BUFFER.borrow_ref_mut(cs);
        while !buf.is_empty() {
            let wrote = write(buf.front());
            if wrote == 0 {
                break;
            }
            buf.consume(wrote);
        }
    });
}
