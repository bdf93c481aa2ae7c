//! Textured quad.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use tracing::debug;

use super::Widget;
use crate::assets::{AssetSource, Texture};
use crate::config::asset_path;
use crate::error::UiError;
use crate::geometry::{Mesh, Vec2, screen_rect};
use crate::message::Message;
use crate::printer::Printer;

/// A texture drawn centred on a widget-space position.
#[derive(Debug, Clone)]
pub struct Image {
    texture_name: Option<&'static str>,
    texture: Option<Texture>,
    mesh: Option<Mesh>,
    position: Vec2,
    size: Vec2,
    scale: [f32; 3],
    hidden: bool,
}

impl Image {
    pub fn new(texture: &'static str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            texture_name: Some(texture),
            ..Self::untextured(x, y, width, height)
        }
    }

    /// Image with no texture assigned; loading it fails with
    /// [`UiError::NoTexture`].
    pub fn untextured(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            texture_name: None,
            texture: None,
            mesh: None,
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            scale: [1.0; 3],
            hidden: false,
        }
    }

    /// Translate by (`dx`, `dy`).
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Replace the scale factors applied on top of the size.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.scale = [sx, sy, sz];
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn size(&self) -> Vec2 {
        self.size
    }

    pub const fn scale_factors(&self) -> [f32; 3] {
        self.scale
    }

    /// Size after scaling.
    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(self.size.x * self.scale[0], self.size.y * self.scale[1])
    }

    pub const fn texture_name(&self) -> Option<&'static str> {
        self.texture_name
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn is_loaded(&self) -> bool {
        self.texture.is_some()
    }

    pub const fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Physical rectangle the opaque quad covers on a `viewport`-sized target.
    pub fn screen_area(&self, viewport: Size, rotated: bool) -> Result<Rectangle, UiError> {
        let mesh = self.mesh.as_ref().ok_or(UiError::MeshNotBuilt)?;
        let extent = mesh.opaque_extent();
        let scaled = self.scaled_size();
        Ok(screen_rect(viewport, rotated, self.position, Vec2::new(scaled.x * extent.x, scaled.y * extent.y)))
    }
}

impl Widget for Image {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        let name = self.texture_name.ok_or(UiError::NoTexture)?;
        let texture = assets.texture(name).ok_or_else(|| UiError::TextureLoad(name.to_owned()))?;
        debug!(texture = name, path = %asset_path(name), "texture loaded");
        self.texture = Some(texture);
        Ok(())
    }

    fn build_vertices(&mut self) {
        self.mesh = Some(Mesh::build(self.size.y));
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        let texture = self.texture.ok_or(UiError::TextureNotLoaded)?;
        let area = self.screen_area(target.bounding_box().size, printer.rotated())?;
        texture.draw(target, area);
        Ok(())
    }

    fn update(&mut self, _message: &Message) {}

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.texture = None;
        self.mesh = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, names};
    use crate::colors::{BLACK, WHITE};
    use crate::testing::{PixelQuery, TestDisplay};

    fn white_catalog() -> AssetCatalog {
        let mut catalog = AssetCatalog::new();
        catalog.insert("white", Texture::solid(WHITE));
        catalog
    }

    fn ready(mut image: Image) -> Image {
        image.load_textures(&white_catalog()).unwrap();
        image.build_vertices();
        image
    }

    #[test]
    fn test_move_and_set_position() {
        let mut image = Image::new("white", 10.0, 20.0, 30.0, 40.0);
        image.move_by(5.0, -5.0);
        assert_eq!(image.position(), Vec2::new(15.0, 15.0));
        image.set_position(0.0, 0.0);
        image.set_size(8.0, 4.0);
        assert_eq!(image.position(), Vec2::default());
        assert_eq!(image.size(), Vec2::new(8.0, 4.0));
    }

    #[test]
    fn test_scale_affects_scaled_size() {
        let mut image = Image::new("white", 0.0, 0.0, 100.0, 10.0);
        image.scale(0.5, 2.0, 1.0);
        assert_eq!(image.scaled_size(), Vec2::new(50.0, 20.0));
        assert_eq!(image.scale_factors(), [0.5, 2.0, 1.0]);
    }

    #[test]
    fn test_load_missing_texture_fails() {
        let mut image = Image::new(names::PAUSE_ICON, 0.0, 0.0, 10.0, 10.0);
        let err = image.load_textures(&AssetCatalog::new()).unwrap_err();
        assert_eq!(err, UiError::TextureLoad(names::PAUSE_ICON.to_owned()));
        assert!(!image.is_loaded());
    }

    #[test]
    fn test_load_untextured_fails() {
        let mut image = Image::untextured(0.0, 0.0, 10.0, 10.0);
        assert_eq!(image.load_textures(&white_catalog()), Err(UiError::NoTexture));
    }

    #[test]
    fn test_render_requires_load_and_build() {
        let printer = Printer::new(false);
        let mut display = TestDisplay::new(Size::new(50, 50));
        let mut image = Image::new("white", 0.0, 0.0, 10.0, 10.0);
        assert_eq!(image.render(&mut display, &printer), Err(UiError::TextureNotLoaded));
        image.load_textures(&white_catalog()).unwrap();
        assert_eq!(image.render(&mut display, &printer), Err(UiError::MeshNotBuilt));
        image.build_vertices();
        assert_eq!(image.render(&mut display, &printer), Ok(()));
        assert_eq!(display.count(WHITE), 100);
    }

    #[test]
    fn test_render_position_is_centre_relative() {
        let printer = Printer::new(false);
        let mut display = TestDisplay::new(Size::new(100, 100));
        ready(Image::new("white", 20.0, 10.0, 4.0, 4.0)).render(&mut display, &printer).unwrap();
        // centre at (70, 40)
        assert_eq!(display.pixel(Point::new(69, 39)), Some(WHITE));
        assert_eq!(display.pixel(Point::new(50, 50)), Some(BLACK));
    }

    #[test]
    fn test_hidden_image_draws_nothing() {
        let printer = Printer::new(false);
        let mut display = TestDisplay::new(Size::new(50, 50));
        let mut image = ready(Image::new("white", 0.0, 0.0, 10.0, 10.0));
        image.hide();
        assert_eq!(image.render(&mut display, &printer), Ok(()));
        assert_eq!(display.count(WHITE), 0);
        image.show();
        image.render(&mut display, &printer).unwrap();
        assert_eq!(display.count(WHITE), 100);
    }

    #[test]
    fn test_delete_releases_resources() {
        let printer = Printer::new(false);
        let mut display = TestDisplay::new(Size::new(50, 50));
        let mut image = ready(Image::new("white", 0.0, 0.0, 10.0, 10.0));
        image.delete();
        assert!(image.mesh().is_none());
        assert_eq!(image.render(&mut display, &printer), Err(UiError::TextureNotLoaded));
    }

    #[test]
    fn test_rotated_render_swaps_extent() {
        let printer = Printer::new(true);
        let mut display = TestDisplay::new(Size::new(100, 100));
        ready(Image::new("white", 0.0, 0.0, 20.0, 6.0)).render(&mut display, &printer).unwrap();
        // 20 wide in widget space runs vertically on the panel.
        assert_eq!(display.pixel(Point::new(50, 41)), Some(WHITE));
        assert_eq!(display.pixel(Point::new(41, 50)), Some(BLACK));
    }
}
