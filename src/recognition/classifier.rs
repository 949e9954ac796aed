//! Translation-tolerant glyph classification.
//!
//! A quantized capture is compared against a template by sliding the template
//! over every valid alignment and scoring the XOR of the packed rows. The
//! per-cell distance is the 2-bit group value of the XOR (0–3), summed per
//! row and weighted: some rows separate visually confusable glyphs (6/8/9,
//! C/S) better than others and count more. The search returns early once an
//! alignment scores below the near-exact cutoff.

use anyhow::{bail, Result};

use crate::recognition::bitmap::quantize;
use crate::recognition::templates::{CATALOG, CATALOG_LEN, TEMPLATE_SIZE};

/// Per-row weights for the dissimilarity sum, tuned to disambiguate
/// confusable glyph rows.
pub const ROW_WEIGHTS: [f64; TEMPLATE_SIZE] = [
    1.0, 1.0, 1.0, 1.2, 2.0, 1.5, 1.0, 1.1, 2.0, 2.0, 1.5, 1.5,
];

/// Per-template dissimilarity scores, in catalog order. 0 means an exact
/// match at some alignment.
#[derive(Clone, Copy, Debug)]
pub struct Distances(pub [f64; CATALOG_LEN]);

impl Distances {
    /// Index and score of the best (lowest) entry. Strict less-than, so the
    /// first of equal minima wins.
    pub fn best(&self) -> (usize, f64) {
        let mut argmin = 0;
        for i in 1..CATALOG_LEN {
            if self.0[i] < self.0[argmin] {
                argmin = i;
            }
        }
        (argmin, self.0[argmin])
    }

    /// Score for a catalog glyph name, for diagnostics.
    pub fn score_for(&self, name: &str) -> Option<f64> {
        CATALOG
            .iter()
            .position(|t| t.name == name)
            .map(|i| self.0[i])
    }
}

/// Minimum weighted dissimilarity between a quantized capture and one
/// template over all translations.
///
/// `capture` holds N packed row-words of N cells each, N ≥ 12. For each
/// offset `(dx, dy)` the 12-cell submask at bit offset `2·dx` of rows
/// `dy..dy+12` is XORed against the template rows. Returns as soon as an
/// alignment's total falls below the near-exact cutoff (the template height),
/// otherwise the minimum over all alignments.
pub fn difference(capture: &[u64], template: &[u32; TEMPLATE_SIZE]) -> Result<f64> {
    let n = capture.len();
    let m = TEMPLATE_SIZE;
    if n < m {
        bail!("capture is {}x{} but templates are {}x{}", n, n, m, m);
    }

    let mask = (1u64 << (2 * m)) - 1;
    let mut min_diff = (4 * m * m) as f64;

    for dx in 0..=(n - m) {
        for dy in 0..=(n - m) {
            let mut diff = 0.0;
            for row in 0..m {
                let a = (capture[row + dy] >> (2 * dx)) & mask;
                let b = template[row] as u64;
                let mut d = a ^ b;
                let mut s = 0u64;
                while d > 0 {
                    s += d & 3;
                    d >>= 2;
                }
                diff += s as f64 * ROW_WEIGHTS[row];
            }
            if diff < m as f64 {
                // almost exact match
                return Ok(diff);
            } else if diff < min_diff {
                min_diff = diff;
            }
        }
    }
    Ok(min_diff)
}

/// Classifies a flattened `n`×`n` single-channel sample against the full
/// catalog.
///
/// Returns the index of the best-scoring template together with the full
/// score vector. Classification itself never fails: even a low-confidence
/// capture yields the argmin, and any confidence gate is the caller's to
/// apply to the returned scores.
pub fn compare(data: &[u8], n: usize) -> Result<(usize, Distances)> {
    let rows = quantize(data, n)?;
    let mut scores = [0.0f64; CATALOG_LEN];
    for (i, template) in CATALOG.iter().enumerate() {
        scores[i] = difference(&rows, &template.rows)?;
    }
    let distances = Distances(scores);
    Ok((distances.best().0, distances))
}
