//! Log capture for tests.
//!
//! Tests call [`setup`] once and then assert on emitted lines with
//! [`logs_contains_a_line_with`].
use std::io;
use std::sync::{LazyLock, Mutex, MutexGuard, Once};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

static INIT: Once = Once::new();

static CAPTURED_LOGS_GLOBAL_BUFFER: LazyLock<Mutex<String>> = LazyLock::new(|| Mutex::new(String::new()));

/// Installs the capturing subscriber for the whole test binary.
pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_ansi(false)
            .with_writer(LogCapturer)
            .try_init();
    });
}

/// True if any captured line contains every one of `patterns`.
///
/// # Panics
///
/// Will panic if the log buffer lock is poisoned.
#[must_use]
pub fn logs_contains_a_line_with(patterns: &[&str]) -> bool {
    captured_logs()
        .lines()
        .any(|line| patterns.iter().all(|pattern| line.contains(pattern)))
}

fn captured_logs() -> MutexGuard<'static, String> {
    CAPTURED_LOGS_GLOBAL_BUFFER
        .lock()
        .expect("the captured logs buffer should not be poisoned")
}

#[derive(Clone, Copy, Default)]
struct LogCapturer;

impl io::Write for LogCapturer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        captured_logs().push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapturer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}
