//! Pause screen: icon plus Resume/Volume/Brightness/End buttons.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::layout::{BuildContext, Content, Frame, Slot, build_flat};
use crate::assets::{AssetSource, names};
use crate::colors::WHITE;
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{DisplayState, FlagKey, Message, WorkoutStage};
use crate::printer::Printer;
use crate::widgets::{Element, Widget, load_children, render_children};

pub const PAUSE_BUTTON_WIDTH: f32 = 360.0;
pub const PAUSE_BUTTON_HEIGHT: f32 = 40.0;

const fn button(label: &'static str, key: FlagKey, y: f32) -> Slot {
    Slot {
        frame: Frame::new(0.0, y, PAUSE_BUTTON_WIDTH, PAUSE_BUTTON_HEIGHT),
        content: Content::Button { label, key },
    }
}

const RESUME: usize = 1;

const SLOTS: [Slot; 5] = [
    Slot {
        frame: Frame::new(0.0, 50.0, 85.0, 115.0),
        content: Content::Image(names::PAUSE_ICON),
    },
    button("Resume", FlagKey::ResumeButtonActive, -100.0),
    button("Volume", FlagKey::VolumeButtonActive, -170.0),
    button("Brightness", FlagKey::BrightButtonActive, -240.0),
    button("End", FlagKey::EndButtonActive, -310.0),
];

/// Pause overlay, visible only in [`DisplayState::Pause`].
pub struct PauseView {
    children: Vec<Element>,
    hidden: bool,
}

impl PauseView {
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

    /// Whether the Resume button is the highlighted one.
    pub fn resume_selected(&self) -> bool {
        self.children[RESUME].as_button().is_some_and(|button| button.is_active())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Default for PauseView {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PauseView {
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
        render_children(&self.children, target, printer, "pause view");
        Ok(())
    }

    fn update(&mut self, message: &Message) {
        self.hidden = message.display_state() != DisplayState::Pause;
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
