//! Two-skin button with a text label.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{Image, Widget};
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{FlagKey, Message, Text, bounded_text};
use crate::printer::{FontFace, Printer};

pub const BUTTON_WIDTH: f32 = 400.0;
pub const BUTTON_HEIGHT: f32 = 55.0;
pub const BUTTON_TEXT_SCALE: f32 = 0.24;

/// Per-state look of a button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonSkin {
    pub texture: &'static str,
    pub color: Rgb565,
    pub face: FontFace,
}

/// Button whose active state follows one flag.
#[derive(Debug, Clone)]
pub struct Button {
    active_bg: Image,
    inactive_bg: Image,
    active: ButtonSkin,
    inactive: ButtonSkin,
    label: Text,
    key: Option<FlagKey>,
    position: Vec2,
    text_offset: Vec2,
    text_scale: f32,
    is_active: bool,
    hidden: bool,
}

impl Button {
    /// Default-skinned button of default size.
    pub fn new(label: &str, x: f32, y: f32, active_color: Rgb565, inactive_color: Rgb565, key: FlagKey) -> Self {
        Self::with_skins(
            label,
            x,
            y,
            Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT),
            ButtonSkin {
                texture: names::BUTTON_FILL,
                color: active_color,
                face: FontFace::Bold,
            },
            ButtonSkin {
                texture: names::BUTTON_DIM,
                color: inactive_color,
                face: FontFace::Medium,
            },
            Some(key),
        )
    }

    /// Fully custom button. With no key the active state only changes
    /// through [`Button::toggle_active`].
    pub fn with_skins(
        label: &str,
        x: f32,
        y: f32,
        size: Vec2,
        active: ButtonSkin,
        inactive: ButtonSkin,
        key: Option<FlagKey>,
    ) -> Self {
        Self {
            active_bg: Image::new(active.texture, x, y, size.x, size.y),
            inactive_bg: Image::new(inactive.texture, x, y, size.x, size.y),
            active,
            inactive,
            label: bounded_text(label),
            key,
            position: Vec2::new(x, y),
            text_offset: Vec2::default(),
            text_scale: BUTTON_TEXT_SCALE,
            is_active: false,
            hidden: false,
        }
    }

    /// Resize both backgrounds.
    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.active_bg.set_size(width, height);
        self.inactive_bg.set_size(width, height);
        self
    }

    /// Offset the label from the button centre.
    #[must_use]
    pub fn with_text_offset(mut self, dx: f32, dy: f32) -> Self {
        self.text_offset = Vec2::new(dx, dy);
        self
    }

    #[must_use]
    pub fn with_text_scale(mut self, scale: f32) -> Self {
        self.text_scale = scale;
        self
    }

    pub fn toggle_active(&mut self) {
        self.is_active = !self.is_active;
    }

    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.active_bg.size()
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Widget for Button {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.active_bg.load_textures(assets)?;
        self.inactive_bg.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.active_bg.build_vertices();
        self.inactive_bg.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        let (bg, skin) = if self.is_active {
            (&self.active_bg, &self.active)
        } else {
            (&self.inactive_bg, &self.inactive)
        };
        bg.render(target, printer)?;
        printer.print(
            target,
            self.position.x + self.text_offset.x,
            self.position.y + self.text_offset.y,
            self.text_scale,
            skin.color,
            skin.face,
            &self.label,
        )
    }

    fn update(&mut self, message: &Message) {
        if let Some(key) = self.key {
            self.is_active = message.flag(key);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.active_bg.delete();
        self.inactive_bg.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::colors::{BUTTON_ACTIVE, BUTTON_IDLE, RED, WHITE};
    use crate::testing::{PixelQuery, TestDisplay};

    fn ready(mut button: Button) -> Button {
        button.load_textures(&AssetCatalog::default_skin()).unwrap();
        button.build_vertices();
        button
    }

    fn printer() -> Printer {
        let mut printer = Printer::new(false);
        printer.load_fonts();
        printer
    }

    #[test]
    fn test_update_follows_flag() {
        let mut button = Button::new("Resume", 0.0, 0.0, WHITE, WHITE, FlagKey::ResumeButtonActive);
        assert!(!button.is_active());
        button.update(&Message::new().with_flag(FlagKey::ResumeButtonActive, true));
        assert!(button.is_active());
        button.update(&Message::new());
        assert!(!button.is_active());
    }

    #[test]
    fn test_toggle_active() {
        let mut button = Button::new("End", 0.0, 0.0, WHITE, WHITE, FlagKey::EndButtonActive);
        button.toggle_active();
        assert!(button.is_active());
        button.toggle_active();
        assert!(!button.is_active());
    }

    #[test]
    fn test_keyless_button_ignores_messages() {
        let skin = ButtonSkin { texture: names::BUTTON_FILL, color: WHITE, face: FontFace::Bold };
        let mut button = Button::with_skins("Ok", 0.0, 0.0, Vec2::new(100.0, 40.0), skin, skin, None);
        button.toggle_active();
        button.update(&Message::new().with_flag(FlagKey::ButtonActive, false));
        assert!(button.is_active());
    }

    #[test]
    fn test_render_uses_state_skin() {
        let printer = printer();
        let mut button = ready(Button::new("Go", 0.0, 0.0, RED, WHITE, FlagKey::ButtonActive));

        let mut display = TestDisplay::new(Size::new(500, 100));
        button.render(&mut display, &printer).unwrap();
        assert_eq!(display.pixel(Point::new(250 - 150, 50)), Some(BUTTON_IDLE));
        assert!(display.count(WHITE) > 0);
        assert_eq!(display.count(RED), 0);

        button.toggle_active();
        let mut display = TestDisplay::new(Size::new(500, 100));
        button.render(&mut display, &printer).unwrap();
        assert_eq!(display.pixel(Point::new(250 - 150, 50)), Some(BUTTON_ACTIVE));
        assert!(display.count(RED) > 0);
    }

    #[test]
    fn test_sized_button() {
        let button = Button::new("Back", 0.0, 0.0, WHITE, WHITE, FlagKey::ButtonActive).sized(360.0, 40.0);
        assert_eq!(button.size(), Vec2::new(360.0, 40.0));
        assert_eq!(button.label(), "Back");
    }
}
