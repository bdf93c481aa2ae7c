//! End-of-workout summary: completion banner, totals and badges.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::layout::{BuildContext, Content, Frame, Slot, build_flat};
use crate::assets::{AssetSource, names};
use crate::colors::{RED, WHITE};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{DisplayState, Message, TextKey, WorkoutStage};
use crate::printer::{FontFace, Printer};
use crate::widgets::text_block::{TEXT_BLOCK_HEIGHT, TEXT_BLOCK_WIDTH};
use crate::widgets::{Badges, CompositeView, Element, Widget, load_children, render_children};

pub const COMPLETE_TEXT: &str = "Workout Complete";

const BADGES: usize = 5;

fn completion_panel(frame: Frame, _ctx: &BuildContext) -> Element {
    let mut panel = CompositeView::with_background(Some(names::TEXT_CONTAINER), frame.x, frame.y, frame.width, frame.height);
    panel.add_text(COMPLETE_TEXT, RED, 40.0, 0.0, 0.3, None, FontFace::Bold);
    panel.add_image(names::CHECKMARK, -120.0, 0.0, 40.0, 42.0);
    panel.into()
}

const fn total(key: TextKey, label: &'static str, x: f32, y: f32) -> Slot {
    Slot {
        frame: Frame::new(x, y, TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT),
        content: Content::Text { key, label: Some(label) },
    }
}

const SLOTS: [Slot; 6] = [
    Slot {
        frame: Frame::new(0.0, -35.0, 450.0, 70.0),
        content: Content::Custom(completion_panel),
    },
    total(TextKey::DistanceMiles, "mi", -115.0, -140.0),
    total(TextKey::EnergyKj, "kJ", 115.0, -140.0),
    total(TextKey::SpeedPace, "/mi", -115.0, -260.0),
    total(TextKey::Calories, "cal", 115.0, -260.0),
    Slot {
        frame: Frame::new(0.0, 80.0, 0.0, 0.0),
        content: Content::Badges,
    },
];

/// Summary overlay, visible only in [`DisplayState::Summary`].
pub struct SummaryView {
    children: Vec<Element>,
    hidden: bool,
}

impl SummaryView {
    pub fn new() -> Self {
        let ctx = BuildContext {
            origin: Vec2::default(),
            text_color: WHITE,
            stage: WorkoutStage::default(),
        };
        Self {
            children: build_flat(&SLOTS, &ctx),
            hidden: true,
        }
    }

    pub fn badges(&self) -> Option<&Badges> {
        self.children[BADGES].as_badges()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Default for SummaryView {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SummaryView {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        load_children(&mut self.children, assets)
    }

    fn build_vertices(&mut self) {
        self.children.iter_mut().for_each(Widget::build_vertices);
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        render_children(&self.children, target, printer, "summary view");
        Ok(())
    }

    fn update(&mut self, message: &Message) {
        self.hidden = message.display_state() != DisplayState::Summary;
        if self.hidden {
            return;
        }
        for child in &mut self.children {
            child.update(message);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.children.iter_mut().for_each(Widget::delete);
    }
}
