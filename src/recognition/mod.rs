//! Card recognition from captured screen regions.
//!
//! This module provides:
//! - Quantization of raw samples into packed 2-bit bitmaps
//! - The built-in quantized template catalog
//! - Translation-tolerant fuzzy classification
//! - Pixel-exact matching against loadable reference images
//! - Full-grid identification over a capture source

pub mod bitmap;
pub mod classifier;
pub mod detect;
pub mod library;
pub mod templates;

pub use bitmap::quantize;
pub use classifier::{compare, difference, Distances, ROW_WEIGHTS};
pub use detect::{detect_grid, detect_grid_exact, CaptureSource, Detection, SlotReading};
pub use library::{decode_name, Reference, ReferenceLibrary};
pub use templates::{Template, CATALOG, CATALOG_LEN, TEMPLATE_SIZE};
