//! Colour constants for the workout overlay.
//!
//! Colours are expressed directly as `Rgb565` so widgets can hand them to
//! `embedded-graphics` styles without conversion. Where the built-in
//! `RgbColor` constants fit they are used as is.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Display clear colour.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Panel-style top view and pause/summary text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Classic top view text and the "Workout Complete" banner.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure blue. Highlight for the selected menu entry.
pub const BLUE: Rgb565 = Rgb565::BLUE;

// =============================================================================
// Text Colors
// =============================================================================

/// Light gray (~87%) for deselected menu entries.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(27, 55, 27);

/// Menu entry that currently owns the input focus.
pub const SELECTED: Rgb565 = BLUE;

/// Menu entry without focus.
pub const DESELECTED: Rgb565 = LIGHT_GRAY;

// =============================================================================
// Texture Skin Colors
// =============================================================================
// Flat fills used by the default asset catalog in place of decoded bitmaps.

/// Dark slate used for panel and text block backgrounds.
pub const PANEL: Rgb565 = Rgb565::new(4, 9, 6);

/// Slightly lighter slate for panel borders.
pub const PANEL_EDGE: Rgb565 = Rgb565::new(9, 19, 12);

/// Track colour behind every progress fill.
pub const TRACK: Rgb565 = Rgb565::new(6, 12, 6);

/// Warm red fill (workout stage).
pub const FILL_RED: Rgb565 = Rgb565::new(29, 10, 6);

/// Green fill (warmup stage).
pub const FILL_GREEN: Rgb565 = Rgb565::new(6, 50, 10);

/// Blue fill (cooldown stage, selected level bars).
pub const FILL_BLUE: Rgb565 = Rgb565::new(4, 24, 29);

/// Muted gray fill for deselected level bars and inactive icons.
pub const FILL_GRAY: Rgb565 = Rgb565::new(14, 28, 14);

/// Active button background.
pub const BUTTON_ACTIVE: Rgb565 = Rgb565::new(28, 8, 8);

/// Dimmed button background.
pub const BUTTON_IDLE: Rgb565 = Rgb565::new(8, 16, 8);

/// Badge gold.
pub const GOLD: Rgb565 = Rgb565::new(31, 45, 4);

/// Badge silver.
pub const SILVER: Rgb565 = Rgb565::new(22, 45, 24);

/// Badge bronze.
pub const BRONZE: Rgb565 = Rgb565::new(24, 30, 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_colors_differ() {
        assert_ne!(SELECTED, DESELECTED);
    }

    #[test]
    fn test_stage_fills_are_distinct() {
        assert_ne!(FILL_RED, FILL_GREEN);
        assert_ne!(FILL_GREEN, FILL_BLUE);
        assert_ne!(FILL_BLUE, FILL_RED);
    }
}
