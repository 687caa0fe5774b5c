use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Enable or disable `log_info!` output.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Start holding warnings back instead of printing them, so they can be
/// shown after the ranked table.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Stop buffering and return everything collected since [`activate`].
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Record a warning. Buffered while active, otherwise printed to stderr.
pub fn warn(msg: String) {
    let line = format!("warning: {}", msg);
    if let Ok(mut guard) = BUFFER.lock() {
        if let Some(buf) = guard.as_mut() {
            buf.push(line);
            return;
        }
    }
    eprintln!("{}", line);
}

/// Print a progress message when verbose output is on.
pub fn info(msg: String) {
    if is_verbose() {
        eprintln!("{}", msg);
    }
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::diagnostics::warn(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::diagnostics::info(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_warnings_are_drained() {
        activate();
        crate::log_warn!("reference fetch failed: {}", "timeout");
        let messages = drain();
        assert!(messages
            .iter()
            .any(|m| m == "warning: reference fetch failed: timeout"));
        // Buffering stops after drain
        assert!(drain().is_empty());
    }
}
