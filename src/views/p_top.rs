//! Panel top-of-view readouts: clock, two value boxes and panel progress.

use super::layout::{BuildContext, Content, DisplayStateView, Frame, StateSlot, forward_widget};
use super::p_workout::{P_WORKOUT_HEIGHT, P_WORKOUT_POSITION, P_WORKOUT_WIDTH};
use crate::colors::WHITE;
use crate::geometry::Vec2;
use crate::message::{DisplayState, TextKey, WorkoutStage};
use crate::widgets::Element;
use crate::widgets::text_block::{TEXT_BLOCK_HEIGHT, TEXT_BLOCK_WIDTH};

use DisplayState::{HeartRate, Info, Main, Pause};

/// States with a layout: every in-workout state.
pub const P_TOP_VIEW_STATES: [DisplayState; 4] = [Main, Info, HeartRate, Pause];

const CLOCK: Content = Content::Text { key: TextKey::Clock, label: None };
const STAGES: Content = Content::PanelStageView;

const fn text_frame(x: f32, y: f32) -> Frame {
    Frame::new(x, y, TEXT_BLOCK_WIDTH, TEXT_BLOCK_HEIGHT)
}

const SLOTS: [StateSlot<DisplayState>; 4] = [
    StateSlot {
        frame: text_frame(-240.0, 430.0),
        contents: &[
            (Main, CLOCK),
            (Info, CLOCK),
            (HeartRate, CLOCK),
            (Pause, Content::Text { key: TextKey::Rank, label: None }),
        ],
    },
    StateSlot {
        frame: text_frame(235.0, 355.0),
        contents: &[
            (Main, Content::Text { key: TextKey::Rank, label: None }),
            (Info, Content::Text { key: TextKey::SpeedPace, label: Some("/mi") }),
            (HeartRate, Content::Text { key: TextKey::HeartRate, label: Some("bpm") }),
        ],
    },
    StateSlot {
        frame: text_frame(235.0, 245.0),
        contents: &[
            (Main, Content::Text { key: TextKey::EnergyKj, label: Some("kJ") }),
            (Info, Content::Text { key: TextKey::DistanceMiles, label: Some("mi") }),
        ],
    },
    StateSlot {
        frame: Frame::new(P_WORKOUT_POSITION.x, P_WORKOUT_POSITION.y, P_WORKOUT_WIDTH, P_WORKOUT_HEIGHT),
        contents: &[(Main, STAGES), (Info, STAGES), (HeartRate, STAGES), (Pause, STAGES)],
    },
];

/// Panel-style top view.
pub struct PTopView {
    view: DisplayStateView,
}

impl PTopView {
    pub fn new(starting_state: DisplayState, stage: WorkoutStage) -> Self {
        let ctx = BuildContext {
            origin: Vec2::default(),
            text_color: WHITE,
            stage,
        };
        Self {
            view: DisplayStateView::new("panel top view", &P_TOP_VIEW_STATES, &SLOTS, &ctx, starting_state),
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

forward_widget!(PTopView, view);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::widgets::{TextBlock, Widget};

    fn block(view: &PTopView, state: DisplayState, slot: usize) -> Option<&TextBlock> {
        view.children(state)?[slot].as_ref()?.as_text_block()
    }

    #[test]
    fn test_heart_rate_layout() {
        let view = PTopView::new(Main, WorkoutStage::Warmup);
        assert_eq!(block(&view, HeartRate, 0).and_then(TextBlock::key), Some(TextKey::Clock));
        assert_eq!(block(&view, HeartRate, 1).and_then(TextBlock::label), Some("bpm"));
        assert!(view.children(HeartRate).unwrap()[2].is_none());
        assert!(matches!(view.children(HeartRate).unwrap()[3], Some(Element::PWorkout(_))));
    }

    #[test]
    fn test_pause_shows_rank_in_clock_slot() {
        let view = PTopView::new(Pause, WorkoutStage::Warmup);
        assert_eq!(block(&view, Pause, 0).and_then(TextBlock::key), Some(TextKey::Rank));
        assert!(view.children(Pause).unwrap()[1].is_none());
    }

    #[test]
    fn test_hidden_after_workout_states() {
        let mut view = PTopView::new(Main, WorkoutStage::Warmup);
        for state in [DisplayState::Summary, DisplayState::MenuBrightness, DisplayState::Off] {
            view.update(&Message::new().with_display_state(state));
            assert!(view.is_hidden(), "{state:?}");
        }
        view.update(&Message::new().with_display_state(HeartRate).with_text(TextKey::HeartRate, "141"));
        assert!(!view.is_hidden());
        assert_eq!(block(&view, HeartRate, 1).map(TextBlock::text), Some("141"));
    }

    #[test]
    fn test_set_state_hides_other_arrays() {
        let mut view = PTopView::new(Main, WorkoutStage::Warmup);
        view.set_state(Info);
        assert_eq!(view.state(), Info);
        assert!(block(&view, Main, 0).is_some_and(TextBlock::is_hidden));
        assert!(block(&view, Info, 0).is_some_and(|b| !b.is_hidden()));
    }

    #[test]
    fn test_update_shows_state_hidden_by_set_state() {
        let mut view = PTopView::new(Main, WorkoutStage::Warmup);
        view.set_state(Info);
        view.update(&Message::new().with_display_state(Main));
        assert_eq!(view.state(), Main);
        assert!(block(&view, Main, 0).is_some_and(|b| !b.is_hidden()));
        assert!(block(&view, Info, 0).is_some_and(TextBlock::is_hidden));
    }
}
