//! Multi-line text banner, pinned to the top or centred.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use tracing::{debug, warn};

use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{Text, bounded_text};
use crate::printer::{FontFace, Printer, TextLine};

pub const BANNER_MAX_LINES: usize = 8;

/// Distance from the top edge when pinned to the top.
pub const BANNER_TOP_PADDING: i32 = 60;

/// Minimum horizontal margin kept on each side.
pub const BANNER_SIDE_PADDING: f32 = 15.0;

/// Shrink attempts when integer glyph sizes overshoot the fitted scale.
const FIT_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerPosition {
    #[default]
    Top,
    Center,
}

/// Lines of text drawn as one block.
#[derive(Debug, Clone)]
pub struct BannerView {
    lines: Vec<Text, BANNER_MAX_LINES>,
    position: BannerPosition,
    spacing: f32,
    scale: f32,
    color: Rgb565,
}

impl BannerView {
    /// Banner with `lines` top to bottom. Lines past [`BANNER_MAX_LINES`] are
    /// dropped.
    pub fn new<'a>(
        lines: impl IntoIterator<Item = &'a str>,
        position: BannerPosition,
        spacing: f32,
        scale: f32,
        color: Rgb565,
    ) -> Self {
        let mut stored = Vec::new();
        for line in lines {
            if stored.push(bounded_text(line)).is_err() {
                warn!(max = BANNER_MAX_LINES, "banner line dropped");
                break;
            }
        }
        Self {
            lines: stored,
            position,
            spacing,
            scale,
            color,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Text::as_str)
    }

    pub const fn position(&self) -> BannerPosition {
        self.position
    }

    /// Width of the widest line at `scale`.
    fn widest(&self, printer: &Printer, scale: f32) -> Result<f32, UiError> {
        self.lines.iter().try_fold(0.0_f32, |widest, line| {
            Ok(widest.max(printer.measure(line, scale, FontFace::Bold)?.width as f32))
        })
    }

    /// Scale that keeps the widest line inside the frame minus side padding.
    pub fn fitted_scale(&self, printer: &Printer, viewport: Size) -> Result<f32, UiError> {
        let safe_width = printer.logical_size(viewport).width as f32 - 2.0 * BANNER_SIDE_PADDING;
        let mut scale = self.scale;
        for _ in 0..FIT_ATTEMPTS {
            let width = self.widest(printer, scale)?;
            if width <= safe_width {
                break;
            }
            scale *= safe_width / width;
            debug!(scale, width, safe_width, "banner scaled to fit");
        }
        Ok(scale)
    }

    pub fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let viewport = target.bounding_box().size;
        let scale = self.fitted_scale(printer, viewport)?;
        let lines: Vec<TextLine<'_>, BANNER_MAX_LINES> = self
            .lines
            .iter()
            .map(|line| TextLine {
                text: line,
                color: self.color,
                scale,
                face: FontFace::Bold,
            })
            .collect();

        match self.position {
            BannerPosition::Top => {
                let logical_width = printer.logical_size(viewport).width as f32;
                let left = (logical_width - self.widest(printer, scale)?) / 2.0;
                let origin = Point::new(left.round() as i32, BANNER_TOP_PADDING);
                printer.print_lines_from(target, origin, self.spacing, &lines)
            }
            BannerPosition::Center => printer.print_column(target, Vec2::default(), self.spacing, &lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::testing::{PixelQuery, TestDisplay};

    fn printer() -> Printer {
        let mut printer = Printer::new(false);
        printer.load_fonts();
        printer
    }

    /// Bounding rows and columns of non-black pixels.
    fn ink_bounds(display: &TestDisplay, size: Size) -> Option<(i32, i32, i32, i32)> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                if display.pixel(Point::new(x, y)) != Some(BLACK) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
                    });
                }
            }
        }
        bounds
    }

    #[test]
    fn test_keeps_scale_when_it_fits() {
        let banner = BannerView::new(["Ride on"], BannerPosition::Top, 8.0, 0.5, WHITE);
        assert_eq!(banner.fitted_scale(&printer(), Size::new(1280, 960)).unwrap(), 0.5);
    }

    #[test]
    fn test_wide_line_is_scaled_down() {
        let line = "Great job finishing todays interval ride";
        let banner = BannerView::new([line], BannerPosition::Center, 8.0, 2.0, WHITE);
        let printer = printer();
        let viewport = Size::new(1280, 960);
        let scale = banner.fitted_scale(&printer, viewport).unwrap();
        assert!(scale < 2.0);
        let width = printer.measure(line, scale, FontFace::Bold).unwrap().width as f32;
        assert!(width <= 1280.0 - 2.0 * BANNER_SIDE_PADDING);
    }

    #[test]
    fn test_extra_lines_are_dropped() {
        let many = ["line"; BANNER_MAX_LINES + 3];
        let banner = BannerView::new(many, BannerPosition::Top, 4.0, 0.3, WHITE);
        assert_eq!(banner.lines().count(), BANNER_MAX_LINES);
    }

    #[test]
    fn test_top_banner_starts_below_padding() {
        let size = Size::new(1280, 960);
        let banner = BannerView::new(["Warmup", "Next: intervals"], BannerPosition::Top, 8.0, 0.4, WHITE);
        let mut display = TestDisplay::new(size);
        banner.render(&mut display, &printer()).unwrap();
        let (left, top, right, _) = ink_bounds(&display, size).unwrap();
        assert!(top >= BANNER_TOP_PADDING);
        assert!(top < BANNER_TOP_PADDING + 20);
        // Block is horizontally centred.
        let slack = (left - (1279 - right)).abs();
        assert!(slack <= 12, "left {left} right {right}");
    }

    #[test]
    fn test_center_banner_straddles_middle() {
        let size = Size::new(1280, 960);
        let banner = BannerView::new(["Paused"], BannerPosition::Center, 8.0, 0.5, WHITE);
        let mut display = TestDisplay::new(size);
        banner.render(&mut display, &printer()).unwrap();
        let (_, top, _, bottom) = ink_bounds(&display, size).unwrap();
        assert!(top < 480 && bottom > 480 - 30);
    }
}
