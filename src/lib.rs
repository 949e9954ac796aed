//! Solitaire Vision
//!
//! Recognizes the card grid of the EXAPUNKS solitaire minigame from captured
//! screen regions and exposes it as typed values for an external move solver.
//!
//! The crate owns two recognition strategies — pixel-exact matching against
//! loadable reference images, and a translation-tolerant quantized classifier
//! with a built-in template catalog — plus the slot geometry that maps
//! logical (column, row) positions to pixel bounding boxes at any capture
//! resolution. Screen capture, mouse input, the solving search and the
//! configuration GUI live outside this crate and connect through the
//! [`CaptureSource`], [`Solver`](automation::Solver) and
//! [`MoveExecutor`](automation::MoveExecutor) traits.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

pub mod automation;
pub mod card;
pub mod config;
pub mod geometry;
pub mod recognition;

pub use card::{Card, Suit, Value};
pub use config::{Anchor, RegionConfig};
pub use geometry::Bbox;
pub use recognition::{detect_grid, detect_grid_exact, CaptureSource, Detection, ReferenceLibrary};

/// Optional log file, appended to in addition to stdout.
static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Routes log lines to a file in addition to stdout. Pass `None` to stop
/// file logging.
pub fn set_log_file(path: Option<PathBuf>) {
    if let Ok(mut file) = LOG_FILE.lock() {
        *file = path;
    }
}

/// Logs a message with a timestamp to stdout and the configured log file.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    if let Ok(file) = LOG_FILE.lock() {
        if let Some(path) = file.as_ref() {
            if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = f.write_all(line.as_bytes());
            }
        }
    }
}
