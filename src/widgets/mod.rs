//! Widget components for the workout overlay.
//!
//! This module organizes the building blocks every view is made of:
//!
//! - [`image`]: textured quad, the leaf of every tree
//! - [`progress_bar`]: background + fill pair driven by a float key
//! - [`text_block`]: background with a primary value and optional label
//! - [`button`]: active/inactive skins with a label
//! - [`composite`]: generic container of children and text specs
//! - [`badges`]: achievement row that grows as milestones unlock
//!
//! # Architecture
//!
//! Every node implements [`Widget`]: textures are resolved once with
//! `load_textures`, meshes built once with `build_vertices`, then each frame
//! the shell calls `update` followed by `render` on the root. Containers hold
//! their children as [`Element`], a closed enum over every widget kind, and
//! forward calls by matching on it. Rendering is generic over the draw
//! target so the same tree draws into a `SimulatorDisplay` or a panel driver.

pub mod badges;
pub mod button;
pub mod composite;
pub mod image;
pub mod progress_bar;
pub mod text_block;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::warn;

pub use badges::{Badge, Badges};
pub use button::Button;
pub use composite::{CompositeView, TextSpec};
pub use image::Image;
pub use progress_bar::{BarStyle, ProgressBar};
pub use text_block::TextBlock;

use crate::assets::AssetSource;
use crate::error::UiError;
use crate::message::Message;
use crate::printer::Printer;
use crate::views::{LevelMenu, PTopView, PWorkoutView, PauseView, SpeedMenu, SummaryView, TopView, WorkoutView};

/// Capability set shared by every node in the tree.
pub trait Widget {
    /// Resolve textures. Stops at the first missing asset.
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError>;

    /// Build meshes. Must run after `load_textures` and before `render`.
    fn build_vertices(&mut self);

    /// Draw into `target`. Hidden widgets draw nothing and succeed.
    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Apply the frame's message.
    fn update(&mut self, message: &Message);

    fn hide(&mut self);

    fn show(&mut self);

    /// Release textures and meshes. Rendering afterwards fails until the
    /// widget is loaded again.
    fn delete(&mut self);
}

// =============================================================================
// Element
// =============================================================================

/// Any widget, as stored by containers.
pub enum Element {
    Image(Image),
    ProgressBar(ProgressBar),
    TextBlock(TextBlock),
    Button(Button),
    Composite(Box<CompositeView>),
    Badges(Box<Badges>),
    Workout(Box<WorkoutView>),
    PWorkout(Box<PWorkoutView>),
    Top(Box<TopView>),
    PTop(Box<PTopView>),
    Pause(Box<PauseView>),
    Summary(Box<SummaryView>),
    LevelMenu(Box<LevelMenu>),
    SpeedMenu(Box<SpeedMenu>),
}

macro_rules! dispatch {
    ($element:expr, $widget:ident => $body:expr) => {
        match $element {
            Element::Image($widget) => $body,
            Element::ProgressBar($widget) => $body,
            Element::TextBlock($widget) => $body,
            Element::Button($widget) => $body,
            Element::Composite($widget) => $body,
            Element::Badges($widget) => $body,
            Element::Workout($widget) => $body,
            Element::PWorkout($widget) => $body,
            Element::Top($widget) => $body,
            Element::PTop($widget) => $body,
            Element::Pause($widget) => $body,
            Element::Summary($widget) => $body,
            Element::LevelMenu($widget) => $body,
            Element::SpeedMenu($widget) => $body,
        }
    };
}

macro_rules! element_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(impl From<$ty> for Element {
            fn from(widget: $ty) -> Self {
                Self::$variant(widget)
            }
        })*
    };
    (boxed $($variant:ident($ty:ty)),* $(,)?) => {
        $(impl From<$ty> for Element {
            fn from(widget: $ty) -> Self {
                Self::$variant(Box::new(widget))
            }
        })*
    };
}

element_from!(Image(Image), ProgressBar(ProgressBar), TextBlock(TextBlock), Button(Button));
element_from!(boxed
    Composite(CompositeView),
    Badges(Badges),
    Workout(WorkoutView),
    PWorkout(PWorkoutView),
    Top(TopView),
    PTop(PTopView),
    Pause(PauseView),
    Summary(SummaryView),
    LevelMenu(LevelMenu),
    SpeedMenu(SpeedMenu),
);

impl Element {
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_progress_bar(&self) -> Option<&ProgressBar> {
        match self {
            Self::ProgressBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            Self::TextBlock(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeView> {
        match self {
            Self::Composite(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_badges(&self) -> Option<&Badges> {
        match self {
            Self::Badges(badges) => Some(badges),
            _ => None,
        }
    }
}

impl Widget for Element {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        dispatch!(self, widget => widget.load_textures(assets))
    }

    fn build_vertices(&mut self) {
        dispatch!(self, widget => widget.build_vertices());
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        dispatch!(self, widget => widget.render(target, printer))
    }

    fn update(&mut self, message: &Message) {
        dispatch!(self, widget => widget.update(message));
    }

    fn hide(&mut self) {
        dispatch!(self, widget => widget.hide());
    }

    fn show(&mut self) {
        dispatch!(self, widget => widget.show());
    }

    fn delete(&mut self) {
        dispatch!(self, widget => widget.delete());
    }
}

// =============================================================================
// Child Helpers
// =============================================================================

/// Render every child, logging failures so siblings still draw.
pub(crate) fn render_children<'a, D, I>(children: I, target: &mut D, printer: &Printer, owner: &'static str)
where
    D: DrawTarget<Color = Rgb565>,
    I: IntoIterator<Item = &'a Element>,
{
    for child in children {
        if let Err(err) = child.render(target, printer) {
            warn!(owner, %err, "child render failed");
        }
    }
}

/// Load every child, stopping at the first failure.
pub(crate) fn load_children<'a, I>(children: I, assets: &dyn AssetSource) -> Result<(), UiError>
where
    I: IntoIterator<Item = &'a mut Element>,
{
    for child in children {
        child.load_textures(assets)?;
    }
    Ok(())
}
