//! Slot geometry and resolution scaling.
//!
//! Logical (column, row) grid coordinates map to pixel bounding boxes in the
//! 1920×1080 design resolution; a pair of per-axis scale factors then maps
//! boxes and anchor points between the design resolution and the resolution
//! of a live capture, in either direction.

use crate::config::RegionConfig;

/// Design resolution all configured coordinates refer to.
pub const DESIGN_WIDTH: u32 = 1920;
pub const DESIGN_HEIGHT: u32 = 1080;

/// A full deal always contains 36 cards.
pub const DECK_SIZE: u32 = 36;

/// Pixel bounding box, `(left, top)` inclusive, `(right, bottom)` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bbox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bbox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Multiplies each coordinate independently by the per-axis factors,
    /// truncating toward zero. Usable both design→capture and capture→design.
    pub fn scaled(&self, scale: (f64, f64)) -> Bbox {
        Bbox {
            left: (self.left as f64 * scale.0) as i32,
            top: (self.top as f64 * scale.1) as i32,
            right: (self.right as f64 * scale.0) as i32,
            bottom: (self.bottom as f64 * scale.1) as i32,
        }
    }
}

/// Per-axis factors mapping design coordinates to a capture of the given
/// size.
pub fn capture_scale(width: u32, height: u32) -> (f64, f64) {
    (
        width as f64 / DESIGN_WIDTH as f64,
        height as f64 / DESIGN_HEIGHT as f64,
    )
}

/// Scales a fixed anchor point by the per-axis factors, truncating.
pub fn scale_point(point: (i32, i32), scale: (f64, f64)) -> (i32, i32) {
    (
        (point.0 as f64 * scale.0) as i32,
        (point.1 as f64 * scale.1) as i32,
    )
}

/// Number of grid rows needed to hold a full deal at the configured column
/// count.
pub fn rows_needed(config: &RegionConfig) -> u32 {
    DECK_SIZE.div_ceil(config.columns)
}

/// Horizontal gap between adjacent card slots.
///
/// Derived from the field width: the columns' left edges are spread evenly
/// over `field_width - card_width`, and the gap is what remains after the
/// card itself.
pub fn margin_x(config: &RegionConfig) -> f64 {
    let field_width = (config.field_right - config.field_left) as f64;
    let card_width = config.card_width as f64;
    (field_width - card_width) / (config.columns - 1) as f64 - card_width
}

/// Vertical step between stacked card rows.
pub fn margin_y(config: &RegionConfig) -> f64 {
    let field_height = (config.field_bottom - config.field_top) as f64;
    let card_height = config.card_height as f64;
    (field_height - card_height) / (rows_needed(config) - 1) as f64
}

/// Bounding box of the recognition sample for the card at grid position
/// `(col, row)`, in design coordinates.
pub fn slot_bbox(config: &RegionConfig, col: u32, row: u32) -> Bbox {
    let left = (col as f64 * (config.card_width as f64 + margin_x(config))
        + config.field_left as f64
        + config.offset_x as f64)
        .round() as i32;
    let top = (row as f64 * margin_y(config) + config.field_top as f64 + config.offset_y as f64)
        .round() as i32;
    let n = config.sample_size as i32;
    Bbox {
        left,
        top,
        right: left + n,
        bottom: top + n,
    }
}

/// The hand anchor in capture coordinates.
pub fn hand_point(config: &RegionConfig, scale: (f64, f64)) -> (i32, i32) {
    scale_point((config.hand.x, config.hand.y), scale)
}

/// The new-game button anchor in capture coordinates.
pub fn new_game_point(config: &RegionConfig, scale: (f64, f64)) -> (i32, i32) {
    scale_point((config.new_game.x, config.new_game.y), scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_x_zero_when_cards_touch() {
        // field 900 wide, 9 columns of width-100 cards: (900-100)/8 - 100 = 0
        let config = RegionConfig {
            field_left: 0,
            field_top: 0,
            field_right: 900,
            field_bottom: 700,
            columns: 9,
            card_width: 100,
            ..RegionConfig::default()
        };
        assert_eq!(margin_x(&config), 0.0);
    }

    #[test]
    fn test_margin_invariant() {
        // (columns-1) * (margin + card_width) == field_width - card_width
        let config = RegionConfig::default();
        let field_width = (config.field_right - config.field_left) as f64;
        let spread = (config.columns - 1) as f64 * (margin_x(&config) + config.card_width as f64);
        assert!((spread - (field_width - config.card_width as f64)).abs() < 1e-9);
    }

    #[test]
    fn test_rows_needed_rounds_up() {
        let mut config = RegionConfig::default();
        assert_eq!(rows_needed(&config), 4); // 36 / 9
        config.columns = 7;
        assert_eq!(rows_needed(&config), 6); // ceil(36 / 7)
    }

    #[test]
    fn test_slot_bbox_origin() {
        let config = RegionConfig::default();
        let bbox = slot_bbox(&config, 0, 0);
        assert_eq!(bbox.left, config.field_left + config.offset_x);
        assert_eq!(bbox.top, config.field_top + config.offset_y);
        assert_eq!(bbox.width(), config.sample_size as i32);
        assert_eq!(bbox.height(), config.sample_size as i32);
    }

    #[test]
    fn test_slot_bbox_column_step() {
        let config = RegionConfig::default();
        let step = config.card_width as f64 + margin_x(&config);
        let a = slot_bbox(&config, 0, 2);
        let b = slot_bbox(&config, 1, 2);
        assert_eq!(b.left - a.left, step.round() as i32);
        assert_eq!(b.top, a.top);
    }

    #[test]
    fn test_slot_bbox_row_step() {
        // Default field: (730-460-180)/3 = 30px between row tops.
        let config = RegionConfig::default();
        assert_eq!(margin_y(&config), 30.0);
        let a = slot_bbox(&config, 3, 0);
        let b = slot_bbox(&config, 3, 3);
        assert_eq!(a.left, b.left);
        assert_eq!(b.top - a.top, 90);
    }

    #[test]
    fn test_bbox_scaling_identity_and_shrink() {
        let bbox = Bbox {
            left: 100,
            top: 200,
            right: 114,
            bottom: 214,
        };
        assert_eq!(bbox.scaled((1.0, 1.0)), bbox);

        let half = bbox.scaled((0.5, 0.5));
        assert_eq!(half.left, 50);
        assert_eq!(half.top, 100);
        assert_eq!(half.right, 57);
        assert_eq!(half.bottom, 107);
    }

    #[test]
    fn test_capture_scale_axes_independent() {
        let scale = capture_scale(960, 1080);
        assert_eq!(scale, (0.5, 1.0));
    }

    #[test]
    fn test_anchor_points_scale_without_grid_arithmetic() {
        let config = RegionConfig::default();
        let scale = capture_scale(960, 540);
        assert_eq!(hand_point(&config, scale), (715, 140));
        assert_eq!(new_game_point(&config, scale), (700, 450));
    }
}
