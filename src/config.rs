//! Application configuration constants.
//!
//! Layout numbers that never change at runtime are `const` so they cost
//! nothing per frame. The only runtime knob is [`DisplayConfig`], which the
//! simulator reads from the environment.

use std::time::Duration;

use embedded_graphics::geometry::Size;

// =============================================================================
// Display Configuration
// =============================================================================

/// Default viewport width in pixels.
pub const VIEWPORT_WIDTH: u32 = 1280;

/// Default viewport height in pixels.
pub const VIEWPORT_HEIGHT: u32 = 960;

/// Default viewport size.
pub const VIEWPORT: Size = Size::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~30 FPS). The simulator sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(33);

/// Frames per half blink period for flashing menu values.
pub const BLINK_FRAMES: u32 = 8;

// =============================================================================
// Text Configuration
// =============================================================================

/// Glyph height in pixels for a text scale of 1.0.
pub const GLYPH_HEIGHT_AT_UNIT_SCALE: f32 = 60.0;

// =============================================================================
// Assets
// =============================================================================

/// Directory textures are resolved against.
pub const ASSET_DIR: &str = "assets";

/// Maximum number of textures a catalog can hold.
pub const ASSET_CAPACITY: usize = 64;

/// Relative asset path for a texture name, used in diagnostics.
pub fn asset_path(name: &str) -> String {
    format!("{ASSET_DIR}/{name}")
}

// =============================================================================
// Runtime Display Configuration
// =============================================================================

/// Viewport and orientation of the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Physical viewport size.
    pub viewport: Size,
    /// Whether the display is mounted a quarter turn from upright.
    pub rotated: bool,
}

impl DisplayConfig {
    /// Read overrides from `HUD_VIEWPORT` (`WIDTHxHEIGHT`) and `HUD_ROTATED`.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(viewport) = std::env::var("HUD_VIEWPORT").ok().as_deref().and_then(parse_viewport) {
            config.viewport = viewport;
        }
        if let Ok(rotated) = std::env::var("HUD_ROTATED") {
            config.rotated = matches!(rotated.trim(), "1" | "true" | "yes");
        }
        config
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport: VIEWPORT,
            rotated: false,
        }
    }
}

/// Parse a `WIDTHxHEIGHT` string. Zero dimensions are rejected.
pub fn parse_viewport(value: &str) -> Option<Size> {
    let (w, h) = value.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok()?;
    let height = h.trim().parse::<u32>().ok()?;
    (width > 0 && height > 0).then(|| Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.viewport, Size::new(1280, 960));
        assert!(!config.rotated);
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("640x480"), Some(Size::new(640, 480)));
        assert_eq!(parse_viewport(" 800X600 "), Some(Size::new(800, 600)));
        assert_eq!(parse_viewport("0x480"), None);
        assert_eq!(parse_viewport("640"), None);
        assert_eq!(parse_viewport("axb"), None);
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(asset_path("pause_icon"), "assets/pause_icon");
    }
}
