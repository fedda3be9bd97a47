use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn spinner_enabled() -> bool {
    match env::var("EPH_PROGRESS") {
        Ok(value) => value != "0",
        Err(_) => io::stderr().is_terminal(),
    }
}

/// Busy indicator shown while a blocking build or install runs.
///
/// The render thread is signalled and joined when the guard drops, so the
/// line is cleared on success and error paths alike.
pub(crate) struct Spinner {
    stop: Option<Arc<AtomicBool>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Spinner {
    pub(crate) fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        if !spinner_enabled() {
            return Self {
                stop: None,
                handle: None,
            };
        }

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || Spinner::run(&label, &thread_stop));
        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    fn run(label: &str, stop: &AtomicBool) {
        const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        let mut idx = 0;
        while !stop.load(AtomicOrdering::Relaxed) {
            let frame = FRAMES[idx % FRAMES.len()];
            idx += 1;
            let line = format!("\r\x1b[2Keph ▸ {label} {frame}");
            let _ = io::stderr().write_all(line.as_bytes());
            let _ = io::stderr().flush();
            thread::sleep(Duration::from_millis(80));
        }
        let _ = io::stderr().write_all(b"\r\x1b[2K");
        let _ = io::stderr().flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.store(true, AtomicOrdering::Relaxed);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
