//! Text measurement and drawing.
//!
//! The printer maps a widget's abstract text scale onto the mono fonts that
//! ship with `embedded-graphics`. Each [`FontFace`] has a ladder of fonts
//! ordered by glyph height; a scale selects the tallest font that still fits
//! `scale * GLYPH_HEIGHT_AT_UNIT_SCALE` and, beyond the top of the ladder,
//! integer magnification of the largest one.
//!
//! Glyph pixels are routed through [`GlyphSurface`], a `DrawTarget` adapter
//! that magnifies and, on rotated displays, turns them a quarter before they
//! reach the real target. Widgets therefore lay text out in the logical
//! frame and never deal with rotation themselves.

use embedded_graphics::mono_font::ascii::{
    FONT_5X8,
    FONT_6X10,
    FONT_6X12,
    FONT_6X13,
    FONT_6X13_BOLD,
    FONT_7X13_BOLD,
    FONT_7X14,
    FONT_7X14_BOLD,
    FONT_8X13,
    FONT_9X15,
    FONT_9X15_BOLD,
    FONT_9X18,
    FONT_9X18_BOLD,
    FONT_10X20,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};
use tracing::info;

use crate::config::GLYPH_HEIGHT_AT_UNIT_SCALE;
use crate::error::UiError;
use crate::geometry::Vec2;

// =============================================================================
// Font Faces
// =============================================================================

/// Typeface weights a widget can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Bold,
    Medium,
    Regular,
    Thin,
    Light,
}

impl FontFace {
    pub const COUNT: usize = 5;

    /// Faces registered by [`Printer::load_fonts`].
    pub const DEFAULT_FACES: [Self; 2] = [Self::Bold, Self::Medium];

    /// Fonts for this face, shortest first.
    fn ladder(self) -> &'static [&'static MonoFont<'static>] {
        match self {
            Self::Bold => &BOLD_LADDER,
            Self::Medium => &MEDIUM_LADDER,
            Self::Regular => &REGULAR_LADDER,
            Self::Thin | Self::Light => &LIGHT_LADDER,
        }
    }
}

const BOLD_LADDER: [&MonoFont<'static>; 7] = [
    &FONT_6X10,
    &FONT_6X13_BOLD,
    &FONT_7X13_BOLD,
    &FONT_7X14_BOLD,
    &FONT_9X15_BOLD,
    &FONT_9X18_BOLD,
    &FONT_10X20,
];

const MEDIUM_LADDER: [&MonoFont<'static>; 6] = [&FONT_6X10, &FONT_6X13, &FONT_7X14, &FONT_9X15, &FONT_9X18, &FONT_10X20];

const REGULAR_LADDER: [&MonoFont<'static>; 7] = [
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

const LIGHT_LADDER: [&MonoFont<'static>; 6] = [&FONT_5X8, &FONT_6X12, &FONT_8X13, &FONT_9X15, &FONT_9X18, &FONT_10X20];

/// A concrete font plus integer magnification.
#[derive(Clone, Copy)]
struct Glyphs {
    font: &'static MonoFont<'static>,
    magnify: u32,
}

impl Glyphs {
    fn resolve(face: FontFace, scale: f32) -> Self {
        let target = scale.max(0.0) * GLYPH_HEIGHT_AT_UNIT_SCALE;
        let ladder = face.ladder();
        let largest = ladder[ladder.len() - 1];
        let largest_height = largest.character_size.height as f32;

        if target > largest_height {
            let magnify = ((target / largest_height).round() as u32).max(1);
            return Self { font: largest, magnify };
        }

        let font = ladder
            .iter()
            .rev()
            .find(|font| font.character_size.height as f32 <= target)
            .copied()
            .unwrap_or(ladder[0]);
        Self { font, magnify: 1 }
    }

    fn measure(self, text: &str) -> Size {
        let count = text.chars().count() as u32;
        let height = self.font.character_size.height * self.magnify;
        if count == 0 {
            return Size::new(0, height);
        }
        let advance = self.font.character_size.width + self.font.character_spacing;
        let width = count * advance - self.font.character_spacing;
        Size::new(width * self.magnify, height)
    }
}

// =============================================================================
// Glyph Surface
// =============================================================================

/// Magnifies glyph pixels and applies display rotation.
///
/// Rotation maps logical `(x, y)` to physical `(y, H - 1 - x)` where `H` is
/// the physical height.
pub struct GlyphSurface<'a, D> {
    target: &'a mut D,
    origin: Point,
    magnify: i32,
    rotation: Option<i32>,
    logical: Size,
}

impl<D> Dimensions for GlyphSurface<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.logical)
    }
}

impl<D> DrawTarget for GlyphSurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let origin = self.origin;
        let magnify = self.magnify;
        let rotation = self.rotation;
        self.target.draw_iter(pixels.into_iter().flat_map(move |Pixel(point, color)| {
            let base = origin + (point - origin) * magnify;
            (0..magnify * magnify).map(move |i| {
                let p = base + Point::new(i % magnify, i / magnify);
                let p = match rotation {
                    Some(height) => Point::new(p.y, height - 1 - p.x),
                    None => p,
                };
                Pixel(p, color)
            })
        }))
    }
}

// =============================================================================
// Printer
// =============================================================================

/// One line of text for column layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub color: Rgb565,
    pub scale: f32,
    pub face: FontFace,
}

/// Measures and draws text in widget space.
#[derive(Debug, Clone)]
pub struct Printer {
    rotated: bool,
    loaded: [bool; FontFace::COUNT],
}

impl Printer {
    /// Printer with no fonts loaded yet.
    pub const fn new(rotated: bool) -> Self {
        Self {
            rotated,
            loaded: [false; FontFace::COUNT],
        }
    }

    /// Register the default faces (bold and medium).
    pub fn load_fonts(&mut self) {
        for face in FontFace::DEFAULT_FACES {
            self.load_face(face);
        }
        info!(rotated = self.rotated, "printer fonts loaded");
    }

    pub fn load_face(&mut self, face: FontFace) {
        self.loaded[face as usize] = true;
    }

    pub const fn is_loaded(&self, face: FontFace) -> bool {
        self.loaded[face as usize]
    }

    pub const fn rotated(&self) -> bool {
        self.rotated
    }

    /// Unload every face.
    pub fn delete(&mut self) {
        self.loaded = [false; FontFace::COUNT];
    }

    /// Size of the logical frame text is laid out in.
    pub const fn logical_size(&self, viewport: Size) -> Size {
        if self.rotated {
            Size::new(viewport.height, viewport.width)
        } else {
            viewport
        }
    }

    /// Widget-space point at (`x_percent`, `y_percent`) of the logical frame,
    /// measured from the top-left corner.
    pub fn percent_to_widget(&self, viewport: Size, x_percent: f32, y_percent: f32) -> Vec2 {
        let logical = self.logical_size(viewport);
        Vec2::new(
            (x_percent / 100.0 - 0.5) * logical.width as f32,
            (0.5 - y_percent / 100.0) * logical.height as f32,
        )
    }

    fn glyphs(&self, face: FontFace, scale: f32) -> Result<Glyphs, UiError> {
        if self.is_loaded(face) {
            Ok(Glyphs::resolve(face, scale))
        } else {
            Err(UiError::FontNotLoaded(face))
        }
    }

    /// Pixel size of `text` at `scale`.
    pub fn measure(&self, text: &str, scale: f32, face: FontFace) -> Result<Size, UiError> {
        Ok(self.glyphs(face, scale)?.measure(text))
    }

    /// Draw `text` centred on widget-space (`x`, `y`).
    #[allow(clippy::too_many_arguments)]
    pub fn print<D>(
        &self,
        target: &mut D,
        x: f32,
        y: f32,
        scale: f32,
        color: Rgb565,
        face: FontFace,
        text: &str,
    ) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let glyphs = self.glyphs(face, scale)?;
        let logical = self.logical_size(target.bounding_box().size);
        let size = glyphs.measure(text);
        let top_left = Point::new(
            (logical.width as f32 / 2.0 + x - size.width as f32 / 2.0).round() as i32,
            (logical.height as f32 / 2.0 - y - size.height as f32 / 2.0).round() as i32,
        );
        self.draw_glyphs(target, top_left, glyphs, color, text);
        Ok(())
    }

    /// Stack `lines` vertically, the whole block centred on `center`.
    pub fn print_column<D>(&self, target: &mut D, center: Vec2, spacing: f32, lines: &[TextLine<'_>]) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let logical = self.logical_size(target.bounding_box().size);
        let resolved = self.resolve_lines(lines)?;
        let total_height = resolved.iter().map(|(_, size)| size.height as f32).sum::<f32>()
            + spacing * lines.len().saturating_sub(1) as f32;

        let center_x = logical.width as f32 / 2.0 + center.x;
        let mut top = logical.height as f32 / 2.0 - center.y - total_height / 2.0;
        for (line, (glyphs, size)) in lines.iter().zip(resolved) {
            let left = center_x - size.width as f32 / 2.0;
            self.draw_glyphs(target, Point::new(left.round() as i32, top.round() as i32), glyphs, line.color, line.text);
            top += size.height as f32 + spacing;
        }
        Ok(())
    }

    /// Left-align `lines` from an absolute logical-pixel origin.
    pub fn print_lines_from<D>(&self, target: &mut D, origin: Point, spacing: f32, lines: &[TextLine<'_>]) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let resolved = self.resolve_lines(lines)?;
        let mut top = origin.y as f32;
        for (line, (glyphs, size)) in lines.iter().zip(resolved) {
            self.draw_glyphs(target, Point::new(origin.x, top.round() as i32), glyphs, line.color, line.text);
            top += size.height as f32 + spacing;
        }
        Ok(())
    }

    fn resolve_lines(&self, lines: &[TextLine<'_>]) -> Result<Vec<(Glyphs, Size)>, UiError> {
        lines
            .iter()
            .map(|line| {
                let glyphs = self.glyphs(line.face, line.scale)?;
                Ok((glyphs, glyphs.measure(line.text)))
            })
            .collect()
    }

    fn draw_glyphs<D>(&self, target: &mut D, top_left: Point, glyphs: Glyphs, color: Rgb565, text: &str)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let physical = target.bounding_box().size;
        let mut surface = GlyphSurface {
            target,
            origin: top_left,
            magnify: glyphs.magnify as i32,
            rotation: self.rotated.then_some(physical.height as i32),
            logical: self.logical_size(physical),
        };
        Text::with_baseline(text, top_left, MonoTextStyle::new(glyphs.font, color), Baseline::Top)
            .draw(&mut surface)
            .ok();
    }
}
