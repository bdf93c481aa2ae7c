//! Classic top-of-view readouts: two value boxes above the stage strip.

use super::layout::{BuildContext, Content, DisplayStateView, Frame, StateSlot, forward_widget};
use crate::colors::RED;
use crate::geometry::Vec2;
use crate::message::{DisplayState, TextKey, WorkoutStage};
use crate::widgets::Element;
use crate::widgets::text_block::{TEXT_BLOCK_HEIGHT, TEXT_BLOCK_WIDTH};

use DisplayState::{Info, Main, Pause};

/// States with a layout. Any other state hides the view.
pub const TOP_VIEW_STATES: [DisplayState; 3] = [Main, Info, Pause];

const RANK: Content = Content::Text { key: TextKey::Rank, label: None };

const SLOTS: [StateSlot<DisplayState>; 3] = [
    StateSlot {
        frame: Frame::new(-115.0, 300.0, TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT),
        contents: &[
            (Main, RANK),
            (Info, Content::Text { key: TextKey::SpeedPace, label: Some("/mi") }),
            (Pause, RANK),
        ],
    },
    StateSlot {
        frame: Frame::new(115.0, 300.0, TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT),
        contents: &[
            (Main, Content::Text { key: TextKey::EnergyKj, label: Some("kJ") }),
            (Info, Content::Text { key: TextKey::DistanceMiles, label: Some("mi") }),
        ],
    },
    StateSlot {
        frame: Frame::new(0.0, 235.0, 450.0, 30.0),
        contents: &[(Main, Content::StageView), (Info, Content::StageView), (Pause, Content::StageView)],
    },
];

/// Rank/energy/pace/distance boxes with the stage strip.
pub struct TopView {
    view: DisplayStateView,
}

impl TopView {
    pub fn new(starting_state: DisplayState, stage: WorkoutStage) -> Self {
        let ctx = BuildContext {
            origin: Vec2::default(),
            text_color: RED,
            stage,
        };
        Self {
            view: DisplayStateView::new("top view", &TOP_VIEW_STATES, &SLOTS, &ctx, starting_state),
        }
    }

    pub const fn state(&self) -> DisplayState {
        self.view.state()
    }

    pub fn set_state(&mut self, state: DisplayState) {
        self.view.set_state(state);
    }

    pub const fn is_hidden(&self) -> bool {
        self.view.is_hidden()
    }

    pub fn children(&self, state: DisplayState) -> Option<&[Option<Element>]> {
        self.view.children(state)
    }
}

forward_widget!(TopView, view);
