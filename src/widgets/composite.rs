//! Generic container: optional background, children, then text.
//!
//! Draw order is background, children in insertion order, then text specs in
//! insertion order. Later entries paint over earlier ones.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::warn;

use super::{Element, Image, Widget, load_children, render_children};
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{Message, Text, TextKey, bounded_text};
use crate::printer::{FontFace, Printer};

pub const COMPOSITE_WIDTH: f32 = 220.0;
pub const COMPOSITE_HEIGHT: f32 = 70.0;

/// Text drawn by a container, relative to its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: Text,
    pub color: Rgb565,
    pub offset: Vec2,
    pub scale: f32,
    pub key: Option<TextKey>,
    pub face: FontFace,
}

impl TextSpec {
    pub fn new(text: &str, color: Rgb565, offset: Vec2, scale: f32, key: Option<TextKey>, face: FontFace) -> Self {
        Self {
            text: bounded_text(text),
            color,
            offset,
            scale,
            key,
            face,
        }
    }
}

/// Container owning its children.
pub struct CompositeView {
    bg: Option<Image>,
    position: Vec2,
    children: Vec<Element>,
    texts: Vec<TextSpec>,
    hidden: bool,
}

impl CompositeView {
    /// Container with the default background.
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_background(Some(names::BASIC_BOX), x, y, COMPOSITE_WIDTH, COMPOSITE_HEIGHT)
    }

    /// Container with a custom background, or none.
    pub fn with_background(texture: Option<&'static str>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bg: texture.map(|texture| Image::new(texture, x, y, width, height)),
            position: Vec2::new(x, y),
            children: Vec::new(),
            texts: Vec::new(),
            hidden: false,
        }
    }

    /// Container with no background, used as a plain grouping node.
    pub fn group() -> Self {
        Self::with_background(None, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn add_element(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }

    /// Add an image placed relative to the container centre.
    pub fn add_image(&mut self, texture: &'static str, dx: f32, dy: f32, width: f32, height: f32) {
        self.add_element(Image::new(texture, self.position.x + dx, self.position.y + dy, width, height));
    }

    /// Add text placed relative to the container centre.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text(&mut self, text: &str, color: Rgb565, dx: f32, dy: f32, scale: f32, key: Option<TextKey>, face: FontFace) {
        self.texts.push(TextSpec::new(text, color, Vec2::new(dx, dy), scale, key, face));
    }

    #[must_use]
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.add_element(element);
        self
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn texts(&self) -> &[TextSpec] {
        &self.texts
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Widget for CompositeView {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        if let Some(bg) = &mut self.bg {
            bg.load_textures(assets)?;
        }
        load_children(&mut self.children, assets)
    }

    fn build_vertices(&mut self) {
        if let Some(bg) = &mut self.bg {
            bg.build_vertices();
        }
        for child in &mut self.children {
            child.build_vertices();
        }
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        if let Some(Err(err)) = self.bg.as_ref().map(|bg| bg.render(target, printer)) {
            warn!(%err, "composite background render failed");
        }
        render_children(&self.children, target, printer, "composite");
        for spec in &self.texts {
            let x = self.position.x + spec.offset.x;
            let y = self.position.y + spec.offset.y;
            if let Err(err) = printer.print(target, x, y, spec.scale, spec.color, spec.face, &spec.text) {
                warn!(%err, text = spec.text.as_str(), "composite text render failed");
            }
        }
        Ok(())
    }

    fn update(&mut self, message: &Message) {
        for child in &mut self.children {
            child.update(message);
        }
        for spec in &mut self.texts {
            if let Some(text) = spec.key.and_then(|key| message.text(key)) {
                spec.text = bounded_text(text);
            }
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        if let Some(bg) = &mut self.bg {
            bg.delete();
        }
        for child in &mut self.children {
            child.delete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, Texture};
    use crate::colors::{BLUE, PANEL, RED, WHITE};
    use crate::testing::{PixelQuery, TestDisplay};
    use crate::widgets::TextBlock;

    fn printer() -> Printer {
        let mut printer = Printer::new(false);
        printer.load_fonts();
        printer
    }

    #[test]
    fn test_add_image_is_relative() {
        let mut view = CompositeView::new(10.0, 20.0);
        view.add_image(names::CHECKMARK, -5.0, 5.0, 4.0, 4.0);
        let image = view.children()[0].as_image().unwrap();
        assert_eq!(image.position(), Vec2::new(5.0, 25.0));
    }

    #[test]
    fn test_update_reaches_children_and_keyed_text() {
        let mut view = CompositeView::new(0.0, 0.0);
        view.add_element(TextBlock::new("0", 0.0, 0.0, WHITE, Some(TextKey::Rank)));
        view.add_text("fixed", WHITE, 0.0, 0.0, 0.3, None, FontFace::Bold);
        view.add_text("0", WHITE, 0.0, 0.0, 0.3, Some(TextKey::Calories), FontFace::Bold);

        view.update(&Message::new().with_text(TextKey::Rank, "4").with_text(TextKey::Calories, "120"));

        assert_eq!(view.children()[0].as_text_block().unwrap().text(), "4");
        assert_eq!(view.texts()[0].text.as_str(), "fixed");
        assert_eq!(view.texts()[1].text.as_str(), "120");
    }

    #[test]
    fn test_draw_order_children_then_text() {
        let mut catalog = AssetCatalog::default_skin();
        catalog.insert("blue", Texture::solid(BLUE));

        let mut view = CompositeView::new(0.0, 0.0);
        view.add_image("blue", 0.0, 0.0, 100.0, 40.0);
        view.add_text("MMMM", RED, 0.0, 0.0, 0.3, None, FontFace::Bold);
        view.load_textures(&catalog).unwrap();
        view.build_vertices();

        let mut display = TestDisplay::new(Size::new(300, 100));
        view.render(&mut display, &printer()).unwrap();
        // Background is covered by the child, text sits on top of the child.
        assert_eq!(display.pixel(Point::new(150 - 100, 50 - 30)), Some(PANEL));
        assert!(display.count(BLUE) > 0);
        assert!(display.count(RED) > 0);
    }

    #[test]
    fn test_failed_child_does_not_stop_siblings() {
        let mut catalog = AssetCatalog::new();
        catalog.insert("white", Texture::solid(WHITE));

        let mut view = CompositeView::group();
        view.add_element(Image::new("white", -20.0, 0.0, 10.0, 10.0));
        view.add_element(Image::new("white", 20.0, 0.0, 10.0, 10.0));
        view.load_textures(&catalog).unwrap();
        view.build_vertices();
        if let Element::Image(image) = &mut view.children[0] {
            image.delete();
        }

        let mut display = TestDisplay::new(Size::new(100, 100));
        assert_eq!(view.render(&mut display, &printer()), Ok(()));
        assert_eq!(display.count(WHITE), 100);
    }

    #[test]
    fn test_load_stops_at_missing_child_texture() {
        let mut view = CompositeView::new(0.0, 0.0);
        view.add_image("nope", 0.0, 0.0, 1.0, 1.0);
        let result = view.load_textures(&AssetCatalog::default_skin());
        assert_eq!(result, Err(UiError::TextureLoad("nope".into())));
    }

    #[test]
    fn test_hidden_composite_draws_nothing() {
        let mut view = CompositeView::new(0.0, 0.0);
        view.load_textures(&AssetCatalog::default_skin()).unwrap();
        view.build_vertices();
        view.hide();
        let mut display = TestDisplay::new(Size::new(300, 100));
        view.render(&mut display, &printer()).unwrap();
        assert_eq!(display.count(PANEL), 0);
    }
}
