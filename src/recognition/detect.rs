//! Full-grid card identification.
//!
//! Walks every (column, row) slot of the configured grid, pulls a sample for
//! the slot's bounding box from the capture source, and classifies glyph and
//! color independently: the glyph from the quantized blue channel via the
//! fuzzy classifier, the color from the red-channel mean against a fixed
//! threshold. The legacy pixel-exact path consults the reference library
//! instead and is only usable on geometrically exact captures.

use anyhow::{bail, Result};
use image::{ImageBuffer, Rgba};

use crate::card::Card;
use crate::config::RegionConfig;
use crate::geometry::{capture_scale, rows_needed, slot_bbox, Bbox};
use crate::recognition::classifier::{compare, Distances};
use crate::recognition::library::ReferenceLibrary;
use crate::recognition::templates::CATALOG;

/// Red-channel mean above which a slot is classified red. Strictly
/// greater-than: a mean of exactly 200 is black.
pub const RED_THRESHOLD: f64 = 200.0;

/// Source of raw pixels for one capture snapshot.
///
/// Implemented outside this crate by whatever owns the screen or image data.
/// One `refresh()` plus the recognition pass that reads from it form an
/// atomic unit; the source must not be refreshed concurrently with a pass.
pub trait CaptureSource {
    /// Acquires a fresh capture snapshot. Sources over static images need
    /// not override this.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    /// Size of the current capture in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the `size`×`size` resample of `bbox`, which is given in
    /// capture coordinates. When `bbox` is already `size` pixels square this
    /// must be a pixel-exact crop.
    fn sample(&self, bbox: Bbox, size: u32) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>>;
}

/// Classification result for one slot.
#[derive(Clone, Debug)]
pub struct SlotReading {
    pub card: Card,
    /// Red-channel mean that produced the color flag.
    pub red_mean: f64,
    /// Full per-template score vector.
    pub distances: Distances,
}

/// Recognized deal: one `Vec<SlotReading>` per column, top row first.
#[derive(Clone, Debug)]
pub struct Detection {
    pub columns: Vec<Vec<SlotReading>>,
}

impl Detection {
    /// The column-major card grid without diagnostics.
    pub fn cards(&self) -> Vec<Vec<Card>> {
        self.columns
            .iter()
            .map(|col| col.iter().map(|slot| slot.card).collect())
            .collect()
    }
}

/// Mean of one channel over a sample.
pub fn channel_mean(img: &ImageBuffer<Rgba<u8>, Vec<u8>>, channel: usize) -> f64 {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }
    let total: f64 = img.pixels().map(|p| p[channel] as f64).sum();
    total / (width * height) as f64
}

fn slot_sample(
    source: &impl CaptureSource,
    config: &RegionConfig,
    scale: (f64, f64),
    col: u32,
    row: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let bbox = slot_bbox(config, col, row).scaled(scale);
    let n = config.sample_size;
    let img = source.sample(bbox, n)?;
    if img.dimensions() != (n, n) {
        bail!(
            "capture source returned {:?}, expected {}x{}",
            img.dimensions(),
            n,
            n
        );
    }
    Ok(img)
}

/// Recognizes the full grid through the translation-tolerant classifier.
///
/// Glyph identity comes from the blue channel, the red/black flag from the
/// red channel; the two are classified independently and combined. Never
/// fails on low confidence — every slot gets the best-scoring card plus its
/// score vector, and any confidence gate is the caller's responsibility.
pub fn detect_grid(source: &impl CaptureSource, config: &RegionConfig) -> Result<Detection> {
    let (width, height) = source.dimensions();
    let scale = capture_scale(width, height);
    let n = config.sample_size as usize;

    let mut columns = Vec::with_capacity(config.columns as usize);
    for col in 0..config.columns {
        let mut slots = Vec::with_capacity(rows_needed(config) as usize);
        for row in 0..rows_needed(config) {
            let img = slot_sample(source, config, scale, col, row)?;

            let red_mean = channel_mean(&img, 0);
            let is_red = red_mean > RED_THRESHOLD;

            let blue: Vec<u8> = img.pixels().map(|p| p[2]).collect();
            let (best, distances) = compare(&blue, n)?;
            let card = Card::from_glyph(CATALOG[best].name, is_red);

            crate::log(&format!(
                "card({},{}) red={:.2}->{} glyph={} {:?}",
                col,
                row,
                red_mean,
                is_red,
                CATALOG[best].name,
                distances
            ));

            slots.push(SlotReading {
                card,
                red_mean,
                distances,
            });
        }
        columns.push(slots);
    }

    Ok(Detection { columns })
}

/// Legacy pixel-exact recognition.
///
/// Samples every slot at its native bounding-box size (no resampling) and
/// matches the raw RGB bytes against the reference library. Slots that match
/// no reference come back as [`Card::UNKNOWN`]; that is a normal outcome the
/// caller handles, not an error. Only meaningful when the capture is
/// geometrically exact, i.e. at design resolution.
pub fn detect_grid_exact(
    source: &impl CaptureSource,
    config: &RegionConfig,
    library: &ReferenceLibrary,
) -> Result<Vec<Vec<Card>>> {
    let mut columns = Vec::with_capacity(config.columns as usize);
    for col in 0..config.columns {
        let mut cards = Vec::with_capacity(rows_needed(config) as usize);
        for row in 0..rows_needed(config) {
            let bbox = slot_bbox(config, col, row);
            let img = source.sample(bbox, bbox.width() as u32)?;
            let rgb: Vec<u8> = img.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect();
            cards.push(library.match_exact(&rgb));
        }
        columns.push(cards);
    }
    Ok(columns)
}
