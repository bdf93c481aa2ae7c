//! Pixel queries over the simulator display for render tests.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;

pub type TestDisplay = SimulatorDisplay<Rgb565>;

pub trait PixelQuery {
    /// Colour at `point`, `None` outside the display.
    fn pixel(&self, point: Point) -> Option<Rgb565>;

    /// Number of pixels painted `color`.
    fn count(&self, color: Rgb565) -> usize;

    fn same_pixels(&self, other: &Self) -> bool;
}

impl PixelQuery for TestDisplay {
    fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.bounding_box().contains(point).then(|| self.get_pixel(point))
    }

    fn count(&self, color: Rgb565) -> usize {
        self.bounding_box().points().filter(|&point| self.get_pixel(point) == color).count()
    }

    fn same_pixels(&self, other: &Self) -> bool {
        self.size() == other.size() && self.bounding_box().points().all(|point| self.get_pixel(point) == other.get_pixel(point))
    }
}
