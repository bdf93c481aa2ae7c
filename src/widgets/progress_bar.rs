//! Two-image progress bar.
//!
//! A background image spans the full bar; a fill image, inset from the
//! background, is scaled horizontally by the completion and shifted so it
//! stays anchored to the bar's left edge.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{Image, Widget};
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{FlagKey, FloatKey, Message};
use crate::printer::Printer;

/// Default bar width.
pub const BAR_WIDTH: f32 = 350.0;

/// Width of the brightness/volume level bars.
pub const LEVEL_BAR_WIDTH: f32 = 200.0;

/// Default bar height.
pub const BAR_HEIGHT: f32 = 18.0;

/// Horizontal space between background and fill.
pub const BAR_INSET_X: f32 = 12.0;

/// Vertical space between background and fill.
pub const BAR_INSET_Y: f32 = 12.0;

/// Built-in bar skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    Red,
    Green,
    Blue,
    BrightnessSelected,
    BrightnessUnselected,
}

impl BarStyle {
    /// (background, fill) texture names.
    pub const fn textures(self) -> (&'static str, &'static str) {
        match self {
            Self::Red => (names::PROGRESS_BG_RED, names::PROGRESS_FILL_RED),
            Self::Green => (names::PROGRESS_BG_GREEN, names::PROGRESS_FILL_GREEN),
            Self::Blue => (names::PROGRESS_BG_BLUE, names::PROGRESS_FILL_BLUE),
            Self::BrightnessSelected => (names::LEVEL_BG_BLUE, names::LEVEL_FILL_BLUE),
            Self::BrightnessUnselected => (names::LEVEL_BG_GRAY, names::LEVEL_FILL_GRAY),
        }
    }

    const fn is_level(self) -> bool {
        matches!(self, Self::BrightnessSelected | Self::BrightnessUnselected)
    }

    pub const fn width(self) -> f32 {
        if self.is_level() { LEVEL_BAR_WIDTH } else { BAR_WIDTH }
    }

    /// Float key the bar follows by default.
    pub const fn progress_key(self) -> FloatKey {
        if self.is_level() {
            FloatKey::BrightnessProgress
        } else {
            FloatKey::StageProgress
        }
    }
}

/// Horizontal progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    bg: Image,
    fill: Image,
    position: Vec2,
    width: f32,
    height: f32,
    inset: Vec2,
    completion: f32,
    progress_key: FloatKey,
    hides_on_flash: bool,
    hidden: bool,
}

impl ProgressBar {
    /// Bar with a built-in skin and default dimensions.
    pub fn new(style: BarStyle, x: f32, y: f32, initial_completion: f32) -> Self {
        let (bg, fill) = style.textures();
        let mut bar = Self::with_textures(
            bg,
            fill,
            x,
            y,
            style.width(),
            BAR_HEIGHT,
            Vec2::new(BAR_INSET_X, BAR_INSET_Y),
            initial_completion,
        );
        bar.progress_key = style.progress_key();
        bar.hides_on_flash = style.is_level();
        bar
    }

    /// Bar with custom textures and geometry. Follows stage progress.
    #[allow(clippy::too_many_arguments)]
    pub fn with_textures(
        bg: &'static str,
        fill: &'static str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        inset: Vec2,
        initial_completion: f32,
    ) -> Self {
        let mut bar = Self {
            bg: Image::new(bg, x, y, width, height),
            fill: Image::new(fill, x, y, width - inset.x, height - inset.y),
            position: Vec2::new(x, y),
            width,
            height,
            inset,
            completion: 1.0,
            progress_key: FloatKey::StageProgress,
            hides_on_flash: false,
            hidden: false,
        };
        bar.set_completion(initial_completion);
        bar
    }

    /// Follow a different float key.
    #[must_use]
    pub fn following(mut self, key: FloatKey) -> Self {
        self.progress_key = key;
        self
    }

    /// Set the filled fraction. Callers keep `completion` within [0, 1].
    pub fn set_completion(&mut self, completion: f32) {
        let track = self.width - self.inset.x;
        self.fill.scale(completion, 1.0, 1.0);
        self.fill.set_position(self.position.x - track * (1.0 - completion) / 2.0, self.position.y);
        self.completion = completion;
    }

    pub const fn completion(&self) -> f32 {
        self.completion
    }

    /// Current drawn width of the fill.
    pub fn fill_width(&self) -> f32 {
        self.fill.scaled_size().x
    }

    /// Centre of the fill image.
    pub const fn fill_position(&self) -> Vec2 {
        self.fill.position()
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.bg.set_size(width, height);
        self.fill.set_size(width - self.inset.x, height - self.inset.y);
        self.set_completion(self.completion);
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.bg.set_position(x, y);
        self.set_completion(self.completion);
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub const fn progress_key(&self) -> FloatKey {
        self.progress_key
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Widget for ProgressBar {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.bg.load_textures(assets)?;
        self.fill.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.bg.build_vertices();
        self.fill.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        self.bg.render(target, printer)?;
        self.fill.render(target, printer)
    }

    fn update(&mut self, message: &Message) {
        if self.hides_on_flash {
            self.hidden = message.flag(FlagKey::Flash);
        }
        let Some(value) = message.float(self.progress_key) else {
            return;
        };
        if (0.0..=1.0).contains(&value) {
            self.set_completion(value);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.bg.delete();
        self.fill.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::testing::{PixelQuery, TestDisplay};
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_initial_completion_scenario() {
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.5);
        assert_eq!(bar.completion(), 0.5);
        bar.set_completion(1.0);
        assert_eq!(bar.completion(), 1.0);
        assert!(approx(bar.fill_width(), BAR_WIDTH - BAR_INSET_X));
    }

    #[test]
    fn test_fill_is_left_anchored() {
        let bar = ProgressBar::new(BarStyle::Green, 100.0, 50.0, 0.25);
        let track = BAR_WIDTH - BAR_INSET_X;
        let left_edge = bar.fill_position().x - bar.fill_width() / 2.0;
        assert!(approx(left_edge, 100.0 - track / 2.0));
        assert!(approx(bar.fill_position().y, 50.0));
    }

    #[test]
    fn test_style_dimensions_and_keys() {
        let level = ProgressBar::new(BarStyle::BrightnessSelected, 0.0, 0.0, 0.75);
        assert_eq!(level.size(), Vec2::new(LEVEL_BAR_WIDTH, BAR_HEIGHT));
        assert_eq!(level.progress_key(), FloatKey::BrightnessProgress);
        let stage = ProgressBar::new(BarStyle::Blue, 0.0, 0.0, 0.0);
        assert_eq!(stage.progress_key(), FloatKey::StageProgress);
        let volume = ProgressBar::new(BarStyle::BrightnessUnselected, 0.0, 0.0, 0.0).following(FloatKey::VolumeProgress);
        assert_eq!(volume.progress_key(), FloatKey::VolumeProgress);
    }

    #[test]
    fn test_update_reads_progress_key() {
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.0);
        bar.update(&Message::new().with_float(FloatKey::StageProgress, 0.4));
        assert_eq!(bar.completion(), 0.4);
        // Other keys are ignored.
        bar.update(&Message::new().with_float(FloatKey::BrightnessProgress, 0.9));
        assert_eq!(bar.completion(), 0.4);
        // Missing value keeps the prior state.
        bar.update(&Message::new());
        assert_eq!(bar.completion(), 0.4);
    }

    #[test]
    fn test_level_bar_hides_while_flashing() {
        let mut bar = ProgressBar::new(BarStyle::BrightnessSelected, 0.0, 0.0, 0.5);
        bar.update(&Message::new().with_flag(FlagKey::Flash, true));
        assert!(bar.is_hidden());
        bar.update(&Message::new());
        assert!(!bar.is_hidden());

        let mut stage = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.5);
        stage.update(&Message::new().with_flag(FlagKey::Flash, true));
        assert!(!stage.is_hidden());
    }

    #[test]
    fn test_set_position_preserves_completion() {
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.3);
        bar.set_position(40.0, -10.0);
        assert_eq!(bar.completion(), 0.3);
        let track = BAR_WIDTH - BAR_INSET_X;
        let left_edge = bar.fill_position().x - bar.fill_width() / 2.0;
        assert!(approx(left_edge, 40.0 - track / 2.0));
        assert_eq!(bar.position(), Vec2::new(40.0, -10.0));
    }

    #[test]
    fn test_set_size_preserves_completion() {
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.5);
        bar.set_size(200.0, 30.0);
        assert_eq!(bar.completion(), 0.5);
        assert!(approx(bar.fill_width(), (200.0 - BAR_INSET_X) * 0.5));
        assert!(approx(bar.fill_position().x - bar.fill_width() / 2.0, -(200.0 - BAR_INSET_X) / 2.0));
    }

    #[test]
    fn test_render_draws_track_and_fill() {
        let mut printer = Printer::new(false);
        printer.load_fonts();
        let mut display = TestDisplay::new(Size::new(400, 100));
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.5);
        bar.load_textures(&AssetCatalog::default_skin()).unwrap();
        bar.build_vertices();
        bar.render(&mut display, &printer).unwrap();

        let fill = crate::colors::FILL_RED;
        // Left half of the track is filled, right half is not.
        assert_eq!(display.pixel(Point::new(200 - 100, 50)), Some(fill));
        assert_ne!(display.pixel(Point::new(200 + 100, 50)), Some(fill));
    }

    #[test]
    fn test_missing_fill_texture_fails_load() {
        let mut catalog = AssetCatalog::default_skin();
        catalog.remove(names::PROGRESS_FILL_RED);
        let mut bar = ProgressBar::new(BarStyle::Red, 0.0, 0.0, 0.5);
        assert_eq!(
            bar.load_textures(&catalog),
            Err(UiError::TextureLoad(names::PROGRESS_FILL_RED.to_owned()))
        );
    }

    proptest! {
        #[test]
        fn prop_set_completion_round_trips(p in 0.0f32..=1.0) {
            let mut bar = ProgressBar::new(BarStyle::Blue, 0.0, 0.0, 0.0);
            bar.set_completion(p);
            prop_assert_eq!(bar.completion(), p);
        }

        #[test]
        fn prop_out_of_range_update_is_ignored(start in 0.0f32..=1.0, v in prop_oneof![-100.0f32..-0.001, 1.001f32..100.0]) {
            let mut bar = ProgressBar::new(BarStyle::Green, 0.0, 0.0, start);
            bar.update(&Message::new().with_float(FloatKey::StageProgress, v));
            prop_assert_eq!(bar.completion(), start);
        }
    }
}
