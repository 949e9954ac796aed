//! Raw reference images for pixel-exact matching.
//!
//! Exact matching compares a capture byte-for-byte against a directory of
//! reference images, so it only works when the capture geometry is exactly
//! the one the references were taken at. The card identity is encoded in the
//! first two characters of each file name (value char, then suit char); names
//! are decoded into a validated manifest up front, so a malformed name is a
//! load-time error rather than a silent lookup miss.

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::card::{Card, Suit, Value};

/// `<value-char><suit-char>.<ext>`, value ∈ {H,0,9,8,7,6}, suit ∈ {H,D,C,S,R,B}.
const NAME_PATTERN: &str = r"^([H09876])([HDCSRB])\.[A-Za-z0-9]+$";

/// One loaded reference image.
#[derive(Clone, Debug)]
pub struct Reference {
    /// Card identity decoded from the file name.
    pub card: Card,
    /// Source file, kept for diagnostics.
    pub path: PathBuf,
    /// Flattened RGB pixel bytes.
    pub pixels: Vec<u8>,
}

/// The loadable collection of raw reference images.
///
/// Built once at startup and never mutated; safe to share across recognition
/// calls.
#[derive(Clone, Debug)]
pub struct ReferenceLibrary {
    references: Vec<Reference>,
}

/// Decodes a reference file name into a card identity.
pub fn decode_name(name: &str) -> Result<Card> {
    let pattern = Regex::new(NAME_PATTERN)?;
    if !pattern.is_match(name) {
        bail!("malformed reference image name: {:?}", name);
    }
    let mut chars = name.chars();
    let value = chars.next().and_then(Value::from_char);
    let suit = chars.next().and_then(Suit::from_char);
    match (value, suit) {
        (Some(value), Some(suit)) => Ok(Card::new(value, suit)),
        _ => bail!("malformed reference image name: {:?}", name),
    }
}

impl ReferenceLibrary {
    /// Loads every reference image from `dir`.
    ///
    /// The directory is enumerated once. Fails if the directory is missing,
    /// contains a file with an undecodable name, or yields zero entries —
    /// exact matching is unusable without references.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("cannot read reference directory {}", dir.display()))?;

        let mut references = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("unreadable file name in {}", dir.display()))?
                .to_string();
            let card = decode_name(&name)?;
            let pixels = image::open(&path)
                .with_context(|| format!("cannot open reference image {}", path.display()))?
                .to_rgb8()
                .into_raw();
            references.push(Reference { card, path, pixels });
        }

        if references.is_empty() {
            bail!("no reference images found in {}", dir.display());
        }

        crate::log(&format!(
            "Loaded {} reference images from {}",
            references.len(),
            dir.display()
        ));
        Ok(Self { references })
    }

    /// Returns the first reference whose pixel bytes are identical to the
    /// capture's, or [`Card::UNKNOWN`] when none match.
    ///
    /// An unknown capture is a normal outcome, not an error; callers treat it
    /// as an undetected slot.
    pub fn match_exact(&self, capture: &[u8]) -> Card {
        self.references
            .iter()
            .find(|r| r.pixels == capture)
            .map(|r| r.card)
            .unwrap_or(Card::UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter()
    }
}
