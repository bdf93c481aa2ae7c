//! Background box with a value and an optional unit label.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{Image, Widget};
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{Message, Text, TextKey, bounded_text};
use crate::printer::{FontFace, Printer};

/// Default background size.
pub const TEXT_BLOCK_WIDTH: f32 = 200.0;
pub const TEXT_BLOCK_HEIGHT: f32 = 90.0;

/// Offset from the block centre to the text centre.
pub const TEXT_BLOCK_INSET: Vec2 = Vec2::new(0.0, -5.0);

/// Default text scale.
pub const TEXT_BLOCK_SCALE: f32 = 0.55;

/// Gap between the value and its label.
const LABEL_GAP: f32 = 10.0;

/// Value shown before the first update.
pub const INITIAL_TEXT: &str = "0";

/// Value box updated from one text key.
#[derive(Debug, Clone)]
pub struct TextBlock {
    bg: Image,
    text: Text,
    label: Option<(Text, FontFace)>,
    key: Option<TextKey>,
    color: Rgb565,
    face: FontFace,
    position: Vec2,
    text_scale: f32,
    inset: Vec2,
    hidden: bool,
}

impl TextBlock {
    pub fn new(text: &str, x: f32, y: f32, color: Rgb565, key: Option<TextKey>) -> Self {
        Self {
            bg: Image::new(names::TEXT_BOX, x, y, TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT),
            text: bounded_text(text),
            label: None,
            key,
            color,
            face: FontFace::Bold,
            position: Vec2::new(x, y),
            text_scale: TEXT_BLOCK_SCALE,
            inset: TEXT_BLOCK_INSET,
            hidden: false,
        }
    }

    /// Attach a fixed label drawn at half scale right of the value.
    #[must_use]
    pub fn with_label(mut self, label: &str, face: FontFace) -> Self {
        self.add_secondary_text(label, face);
        self
    }

    /// Replace the default background.
    #[must_use]
    pub fn with_background(mut self, texture: &'static str, width: f32, height: f32) -> Self {
        self.bg = Image::new(texture, self.position.x, self.position.y, width, height);
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.text_scale = scale;
        self
    }

    pub fn add_secondary_text(&mut self, label: &str, face: FontFace) {
        self.label = Some((bounded_text(label), face));
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = bounded_text(text);
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().map(|(label, _)| label.as_str())
    }

    pub const fn key(&self) -> Option<TextKey> {
        self.key
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Widget for TextBlock {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.bg.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.bg.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        self.bg.render(target, printer)?;

        let x = self.position.x + self.inset.x;
        let y = self.position.y + self.inset.y;
        let Some((label, label_face)) = &self.label else {
            return printer.print(target, x, y, self.text_scale, self.color, self.face, &self.text);
        };

        let label_scale = self.text_scale / 2.0;
        let main_width = printer.measure(&self.text, self.text_scale, self.face)?.width as f32;
        let label_width = printer.measure(label, label_scale, *label_face)?.width as f32;
        printer.print(target, x - label_width / 2.0, y, self.text_scale, self.color, self.face, &self.text)?;
        printer.print(target, x + main_width / 2.0 + LABEL_GAP, y, label_scale, self.color, *label_face, label)
    }

    fn update(&mut self, message: &Message) {
        if let Some(text) = self.key.and_then(|key| message.text(key)) {
            self.text = bounded_text(text);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
        self.bg.hide();
    }

    fn show(&mut self) {
        self.hidden = false;
        self.bg.show();
    }

    fn delete(&mut self) {
        self.bg.delete();
    }
}
