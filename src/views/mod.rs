//! Screens assembled from the primitive widgets.
//!
//! - [`layout`]: declarative slot tables and the builders that read them
//! - [`top`] / [`p_top`]: in-workout readouts, classic and panel styles
//! - [`workout`] / [`p_workout`]: stage progress for each style
//! - [`pause`], [`summary`], [`menus`]: full-screen overlays
//!
//! [`workout_hud`] puts one of each into a single root container.

pub mod layout;
pub mod menus;
pub mod p_top;
pub mod p_workout;
pub mod pause;
pub mod summary;
pub mod top;
pub mod workout;

pub use menus::{LevelKind, LevelMenu, SpeedMenu};
pub use p_top::PTopView;
pub use p_workout::PWorkoutView;
pub use pause::PauseView;
pub use summary::SummaryView;
pub use top::TopView;
pub use workout::WorkoutView;

use crate::message::{DisplayState, WorkoutStage};
use crate::widgets::CompositeView;

/// Visual style of the in-workout readouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HudStyle {
    /// Red value boxes with the icon stage strip.
    #[default]
    Classic,
    /// White value boxes, clock and segmented stage progress.
    Panel,
}

/// Root of the overlay: top view, pause, summary and the three menus.
pub fn workout_hud(style: HudStyle, stage: WorkoutStage) -> CompositeView {
    let mut root = CompositeView::group();
    match style {
        HudStyle::Classic => root.add_element(TopView::new(DisplayState::Main, stage)),
        HudStyle::Panel => root.add_element(PTopView::new(DisplayState::Main, stage)),
    }
    root.add_element(PauseView::new());
    root.add_element(SummaryView::new());
    root.add_element(LevelMenu::brightness());
    root.add_element(LevelMenu::volume());
    root.add_element(SpeedMenu::new());
    root
}
