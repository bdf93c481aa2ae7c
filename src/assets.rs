//! Texture lookup.
//!
//! Widgets refer to textures by name only. An [`AssetSource`] resolves a
//! name to a [`Texture`] when the tree is loaded; decoding real image files
//! is left to whoever implements the trait. [`AssetCatalog::default_skin`]
//! provides a flat-colour skin covering every texture the widget tree uses.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use heapless::index_map::FnvIndexMap;
use tracing::debug;

use crate::colors::{
    BRONZE,
    BUTTON_ACTIVE,
    BUTTON_IDLE,
    FILL_BLUE,
    FILL_GRAY,
    FILL_GREEN,
    FILL_RED,
    GOLD,
    PANEL,
    PANEL_EDGE,
    SILVER,
    TRACK,
    WHITE,
};
use crate::config::ASSET_CAPACITY;

// =============================================================================
// Texture Names
// =============================================================================

/// Names of every texture referenced by the widget tree.
pub mod names {
    pub const PROGRESS_BG_RED: &str = "progress_bg_red";
    pub const PROGRESS_FILL_RED: &str = "progress_fill_red";
    pub const PROGRESS_BG_GREEN: &str = "progress_bg_green";
    pub const PROGRESS_FILL_GREEN: &str = "progress_fill_green";
    pub const PROGRESS_BG_BLUE: &str = "progress_bg_blue";
    pub const PROGRESS_FILL_BLUE: &str = "progress_fill_blue";
    pub const LEVEL_BG_BLUE: &str = "level_bg_blue";
    pub const LEVEL_FILL_BLUE: &str = "level_fill_blue";
    pub const LEVEL_BG_GRAY: &str = "level_bg_gray";
    pub const LEVEL_FILL_GRAY: &str = "level_fill_gray";
    pub const TEXT_BOX: &str = "text_box";
    pub const BUTTON_FILL: &str = "button_fill";
    pub const BUTTON_DIM: &str = "button_dim";
    pub const BASIC_BOX: &str = "basic_box";
    pub const BADGE_CENTURY: &str = "badge_century";
    pub const BADGE_TWENTY_WEEKS: &str = "badge_twenty_weeks";
    pub const BADGE_STREAK: &str = "badge_streak";
    pub const STAGE_CONTAINER: &str = "stage_container";
    pub const WARMUP_ACTIVE: &str = "warmup_active";
    pub const WARMUP_INACTIVE: &str = "warmup_inactive";
    pub const WORKOUT_ACTIVE: &str = "workout_active";
    pub const WORKOUT_INACTIVE: &str = "workout_inactive";
    pub const COOLDOWN_ACTIVE: &str = "cooldown_active";
    pub const COOLDOWN_INACTIVE: &str = "cooldown_inactive";
    pub const PANEL_PROGRESS_BG: &str = "panel_progress_bg";
    pub const PANEL_PROGRESS_TRACK: &str = "panel_progress_track";
    pub const PANEL_PROGRESS_FILL: &str = "panel_progress_fill";
    pub const PAUSE_ICON: &str = "pause_icon";
    pub const TEXT_CONTAINER: &str = "text_container";
    pub const CHECKMARK: &str = "checkmark";
    pub const LEVEL_MENU_BG: &str = "level_menu_bg";
    pub const BRIGHTNESS_ICON: &str = "brightness_icon";
    pub const BRIGHTNESS_ICON_GRAY: &str = "brightness_icon_gray";
    pub const VOLUME_ICON: &str = "volume_icon";
    pub const VOLUME_ICON_GRAY: &str = "volume_icon_gray";
    pub const ARROWS: &str = "arrows";
    pub const ARROWS_GRAY: &str = "arrows_gray";
}

// =============================================================================
// Texture
// =============================================================================

/// A resolved texture: a flat rounded panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub fill: Rgb565,
    pub stroke: Option<Rgb565>,
    pub radius: u32,
}

impl Texture {
    pub const fn solid(fill: Rgb565) -> Self {
        Self {
            fill,
            stroke: None,
            radius: 0,
        }
    }

    pub const fn rounded(fill: Rgb565, radius: u32) -> Self {
        Self {
            fill,
            stroke: None,
            radius,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Rgb565) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Paint the texture over `area`. Empty areas draw nothing.
    pub fn draw<D>(&self, target: &mut D, area: Rectangle)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if area.size.width == 0 || area.size.height == 0 {
            return;
        }
        let style: PrimitiveStyle<Rgb565> = match self.stroke {
            Some(stroke) => PrimitiveStyleBuilder::new()
                .fill_color(self.fill)
                .stroke_color(stroke)
                .stroke_width(1)
                .build(),
            None => PrimitiveStyle::with_fill(self.fill),
        };
        let radius = self.radius.min(area.size.width / 2).min(area.size.height / 2);
        if radius == 0 {
            area.into_styled(style).draw(target).ok();
        } else {
            RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
                .into_styled(style)
                .draw(target)
                .ok();
        }
    }
}

// =============================================================================
// Asset Source
// =============================================================================

/// Resolves texture names.
pub trait AssetSource {
    fn texture(&self, name: &str) -> Option<Texture>;
}

/// Fixed-capacity name → texture table.
pub struct AssetCatalog {
    textures: FnvIndexMap<&'static str, Texture, ASSET_CAPACITY>,
}

impl AssetCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self {
            textures: FnvIndexMap::new(),
        }
    }

    /// Register or replace a texture. Returns `false` when the catalog is full.
    pub fn insert(&mut self, name: &'static str, texture: Texture) -> bool {
        self.textures.insert(name, texture).is_ok()
    }

    pub fn remove(&mut self, name: &str) -> Option<Texture> {
        self.textures.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Flat-colour skin for every texture the widget tree references.
    pub fn default_skin() -> Self {
        use names::*;

        let panel = Texture::rounded(PANEL, 8).with_stroke(PANEL_EDGE);
        let track = Texture::rounded(TRACK, 4);
        let entries: [(&'static str, Texture); 37] = [
            (PROGRESS_BG_RED, track),
            (PROGRESS_FILL_RED, Texture::rounded(FILL_RED, 3)),
            (PROGRESS_BG_GREEN, track),
            (PROGRESS_FILL_GREEN, Texture::rounded(FILL_GREEN, 3)),
            (PROGRESS_BG_BLUE, track),
            (PROGRESS_FILL_BLUE, Texture::rounded(FILL_BLUE, 3)),
            (LEVEL_BG_BLUE, track.with_stroke(FILL_BLUE)),
            (LEVEL_FILL_BLUE, Texture::rounded(FILL_BLUE, 3)),
            (LEVEL_BG_GRAY, track.with_stroke(FILL_GRAY)),
            (LEVEL_FILL_GRAY, Texture::rounded(FILL_GRAY, 3)),
            (TEXT_BOX, panel),
            (BUTTON_FILL, Texture::rounded(BUTTON_ACTIVE, 12)),
            (BUTTON_DIM, Texture::rounded(BUTTON_IDLE, 12)),
            (BASIC_BOX, panel),
            (BADGE_CENTURY, Texture::rounded(GOLD, 40)),
            (BADGE_TWENTY_WEEKS, Texture::rounded(SILVER, 40)),
            (BADGE_STREAK, Texture::rounded(BRONZE, 40)),
            (STAGE_CONTAINER, panel),
            (WARMUP_ACTIVE, Texture::rounded(FILL_GREEN, 4)),
            (WARMUP_INACTIVE, Texture::rounded(FILL_GRAY, 4)),
            (WORKOUT_ACTIVE, Texture::rounded(FILL_RED, 4)),
            (WORKOUT_INACTIVE, Texture::rounded(FILL_GRAY, 4)),
            (COOLDOWN_ACTIVE, Texture::rounded(FILL_BLUE, 4)),
            (COOLDOWN_INACTIVE, Texture::rounded(FILL_GRAY, 4)),
            (PANEL_PROGRESS_BG, panel),
            (PANEL_PROGRESS_TRACK, track),
            (PANEL_PROGRESS_FILL, Texture::rounded(FILL_RED, 3)),
            (PAUSE_ICON, Texture::rounded(WHITE, 10)),
            (TEXT_CONTAINER, panel),
            (CHECKMARK, Texture::rounded(FILL_GREEN, 20)),
            (LEVEL_MENU_BG, panel),
            (BRIGHTNESS_ICON, Texture::rounded(FILL_BLUE, 60)),
            (BRIGHTNESS_ICON_GRAY, Texture::rounded(FILL_GRAY, 60)),
            (VOLUME_ICON, Texture::rounded(FILL_BLUE, 16)),
            (VOLUME_ICON_GRAY, Texture::rounded(FILL_GRAY, 16)),
            (ARROWS, Texture::solid(FILL_BLUE)),
            (ARROWS_GRAY, Texture::solid(FILL_GRAY)),
        ];

        let mut catalog = Self::new();
        for (name, texture) in entries {
            catalog.insert(name, texture);
        }
        debug!(count = catalog.len(), "default texture skin registered");
        catalog
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for AssetCatalog {
    fn texture(&self, name: &str) -> Option<Texture> {
        self.textures.get(name).copied()
    }
}
