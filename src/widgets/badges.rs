//! Achievement badge row.
//!
//! Each unlocked badge joins the row on the right; the badges already on
//! screen slide one slot left so the row stays centred on the view's
//! position. A badge is unlocked at most once.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::{LinearMap, Vec};
use tracing::debug;

use super::{Image, Widget};
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{FlagKey, Message};
use crate::printer::Printer;

/// Badge radius. Images are twice this in both directions.
pub const BADGE_RADIUS: f32 = 40.0;

/// Gap added to the radius for each slot shift.
pub const BADGE_PADDING: f32 = 8.0;

/// Horizontal distance every existing badge moves when one is added.
pub const BADGE_SLOT: f32 = BADGE_RADIUS + BADGE_PADDING;

pub const BADGE_COUNT: usize = 3;

/// Achievements that can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Century,
    TwentyWeeks,
    Streak,
}

impl Badge {
    pub const ALL: [Self; BADGE_COUNT] = [Self::Century, Self::TwentyWeeks, Self::Streak];

    pub const fn texture(self) -> &'static str {
        match self {
            Self::Century => names::BADGE_CENTURY,
            Self::TwentyWeeks => names::BADGE_TWENTY_WEEKS,
            Self::Streak => names::BADGE_STREAK,
        }
    }

    /// Flag that unlocks this badge.
    pub const fn flag(self) -> FlagKey {
        match self {
            Self::Century => FlagKey::Badge1,
            Self::TwentyWeeks => FlagKey::Badge2,
            Self::Streak => FlagKey::Badge3,
        }
    }
}

/// Row of unlocked badges.
pub struct Badges {
    images: LinearMap<Badge, Image, BADGE_COUNT>,
    active: Vec<Badge, BADGE_COUNT>,
    position: Vec2,
    hidden: bool,
}

impl Badges {
    pub fn new(x: f32, y: f32) -> Self {
        let mut images = LinearMap::new();
        for badge in Badge::ALL {
            let image = Image::new(badge.texture(), x, y, 2.0 * BADGE_RADIUS, 2.0 * BADGE_RADIUS);
            // Capacity equals the number of badges.
            let _ = images.insert(badge, image);
        }
        Self {
            images,
            active: Vec::new(),
            position: Vec2::new(x, y),
            hidden: false,
        }
    }

    /// Unlock `badge`. Returns `false` if it is already on screen.
    pub fn add_badge(&mut self, badge: Badge) -> bool {
        if self.active.contains(&badge) {
            return false;
        }
        let count = self.active.len() as f32;
        for shown in &self.active {
            if let Some(image) = self.images.get_mut(shown) {
                image.move_by(-BADGE_SLOT, 0.0);
            }
        }
        if let Some(image) = self.images.get_mut(&badge) {
            image.set_position(self.position.x + count * BADGE_SLOT, self.position.y);
        }
        debug!(?badge, shown = self.active.len() + 1, "badge unlocked");
        self.active.push(badge).is_ok()
    }

    pub fn active(&self) -> &[Badge] {
        &self.active
    }

    pub fn badge_position(&self, badge: Badge) -> Option<Vec2> {
        self.images.get(&badge).map(Image::position)
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Widget for Badges {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        for (_, image) in self.images.iter_mut() {
            image.load_textures(assets)?;
        }
        Ok(())
    }

    fn build_vertices(&mut self) {
        for (_, image) in self.images.iter_mut() {
            image.build_vertices();
        }
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        for badge in &self.active {
            if let Some(image) = self.images.get(badge) {
                image.render(target, printer)?;
            }
        }
        Ok(())
    }

    /// Unlocks at most one badge per message, checked in badge order.
    fn update(&mut self, message: &Message) {
        if let Some(badge) = Badge::ALL.into_iter().find(|badge| message.flag(badge.flag())) {
            self.add_badge(badge);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        for (_, image) in self.images.iter_mut() {
            image.delete();
        }
    }
}
