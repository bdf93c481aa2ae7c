//! Hardware button legend in the lower-right corner.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::error::UiError;
use crate::printer::{FontFace, Printer, TextLine};

pub const LEGEND_SCALE: f32 = 0.7;

/// Centre of the legend in percent of the logical frame.
pub const LEGEND_CENTER_PERCENT: (f32, f32) = (90.0, 82.0);

/// Physical buttons, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendButton {
    Up,
    Ok,
    Down,
}

impl LegendButton {
    pub const ALL: [Self; 3] = [Self::Up, Self::Ok, Self::Down];

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Up => "^",
            Self::Ok => "o",
            Self::Down => "v",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Column of button glyphs, each drawn in its enabled or disabled colour.
#[derive(Debug, Clone)]
pub struct ButtonLegendView {
    enabled_navigation: Rgb565,
    enabled_ok: Rgb565,
    disabled: Rgb565,
    spacing: f32,
    enabled: [bool; 3],
}

impl ButtonLegendView {
    /// Legend with every button disabled.
    pub const fn new(enabled_navigation: Rgb565, enabled_ok: Rgb565, disabled: Rgb565, spacing: f32) -> Self {
        Self {
            enabled_navigation,
            enabled_ok,
            disabled,
            spacing,
            enabled: [false; 3],
        }
    }

    /// Enable or disable the button at `index` (0 up, 1 ok, 2 down).
    /// Out-of-range indices are ignored.
    pub fn set_button_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(slot) = self.enabled.get_mut(index) {
            *slot = enabled;
        }
    }

    pub fn is_enabled(&self, button: LegendButton) -> bool {
        self.enabled[button.index()]
    }

    /// Colour `button` is currently drawn in.
    pub fn color_of(&self, button: LegendButton) -> Rgb565 {
        if !self.is_enabled(button) {
            return self.disabled;
        }
        match button {
            LegendButton::Ok => self.enabled_ok,
            LegendButton::Up | LegendButton::Down => self.enabled_navigation,
        }
    }

    pub fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let lines = LegendButton::ALL.map(|button| TextLine {
            text: button.glyph(),
            color: self.color_of(button),
            scale: LEGEND_SCALE,
            face: FontFace::Bold,
        });
        let (x, y) = LEGEND_CENTER_PERCENT;
        let center = printer.percent_to_widget(target.bounding_box().size, x, y);
        printer.print_column(target, center, self.spacing, &lines)
    }
}
