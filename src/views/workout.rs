//! Stage strip: three stage icons and the current stage's progress bar.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::layout::{BuildContext, Content, Frame, StateChildren, StateSlot};
use crate::assets::{AssetSource, names};
use crate::colors::WHITE;
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{FloatKey, Message, WorkoutStage};
use crate::printer::Printer;
use crate::widgets::{BarStyle, Element, Widget};

use WorkoutStage::{Cooldown, Warmup, Workout};

pub const WORKOUT_VIEW_WIDTH: f32 = 450.0;
pub const WORKOUT_VIEW_HEIGHT: f32 = 30.0;

const ICON_WIDTH: f32 = 12.0;
const ICON_HEIGHT: f32 = 16.0;

/// Frames are relative to the view's centre.
const SLOTS: [StateSlot<WorkoutStage>; 5] = [
    StateSlot {
        frame: Frame::new(0.0, 0.0, WORKOUT_VIEW_WIDTH, WORKOUT_VIEW_HEIGHT),
        contents: &[
            (Warmup, Content::Image(names::STAGE_CONTAINER)),
            (Workout, Content::Image(names::STAGE_CONTAINER)),
            (Cooldown, Content::Image(names::STAGE_CONTAINER)),
        ],
    },
    StateSlot {
        frame: Frame::new(-200.0, 0.0, ICON_WIDTH, ICON_HEIGHT),
        contents: &[
            (Warmup, Content::Image(names::WARMUP_ACTIVE)),
            (Workout, Content::Image(names::WARMUP_INACTIVE)),
            (Cooldown, Content::Image(names::WARMUP_INACTIVE)),
        ],
    },
    StateSlot {
        frame: Frame::new(-176.0, 0.0, ICON_WIDTH, ICON_HEIGHT),
        contents: &[
            (Warmup, Content::Image(names::WORKOUT_INACTIVE)),
            (Workout, Content::Image(names::WORKOUT_ACTIVE)),
            (Cooldown, Content::Image(names::WORKOUT_INACTIVE)),
        ],
    },
    StateSlot {
        frame: Frame::new(-152.0, 0.0, ICON_WIDTH, ICON_HEIGHT),
        contents: &[
            (Warmup, Content::Image(names::COOLDOWN_INACTIVE)),
            (Workout, Content::Image(names::COOLDOWN_INACTIVE)),
            (Cooldown, Content::Image(names::COOLDOWN_ACTIVE)),
        ],
    },
    StateSlot {
        frame: Frame::new(40.0, 0.0, 350.0, 18.0),
        contents: &[
            (Warmup, Content::Bar(BarStyle::Green)),
            (Workout, Content::Bar(BarStyle::Red)),
            (Cooldown, Content::Bar(BarStyle::Blue)),
        ],
    },
];

/// Stage strip indexed by [`WorkoutStage`].
pub struct WorkoutView {
    children: StateChildren<WorkoutStage>,
    position: Vec2,
    stage: WorkoutStage,
    hidden: bool,
}

impl WorkoutView {
    pub fn new(x: f32, y: f32, stage: WorkoutStage) -> Self {
        let ctx = BuildContext {
            origin: Vec2::new(x, y),
            text_color: WHITE,
            stage,
        };
        Self {
            children: StateChildren::build(&WorkoutStage::ALL, &SLOTS, &ctx),
            position: Vec2::new(x, y),
            stage,
            hidden: false,
        }
    }

    pub const fn stage(&self) -> WorkoutStage {
        self.stage
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn children(&self, stage: WorkoutStage) -> &[Option<Element>] {
        self.children.get(stage).unwrap_or_default()
    }
}

impl Widget for WorkoutView {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.children.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.children.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        self.children.render_state(self.stage, target, printer, "workout view");
        Ok(())
    }

    fn update(&mut self, message: &Message) {
        self.stage = message.workout_stage();
        self.children.update_state(self.stage, &message.delegate(FloatKey::StageProgress));
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.children.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::colors;
    use crate::testing::{PixelQuery, TestDisplay};

    fn bar(view: &WorkoutView, stage: WorkoutStage) -> &crate::widgets::ProgressBar {
        view.children(stage)[4].as_ref().and_then(Element::as_progress_bar).unwrap()
    }

    #[test]
    fn test_every_stage_has_full_array() {
        let view = WorkoutView::new(0.0, 235.0, Warmup);
        for stage in WorkoutStage::ALL {
            assert_eq!(view.children(stage).len(), SLOTS.len());
            assert!(view.children(stage).iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_active_icon_matches_stage() {
        let view = WorkoutView::new(0.0, 235.0, Warmup);
        let icon = |stage: WorkoutStage, slot: usize| {
            view.children(stage)[slot].as_ref().and_then(Element::as_image).and_then(|i| i.texture_name())
        };
        assert_eq!(icon(Warmup, 1), Some(names::WARMUP_ACTIVE));
        assert_eq!(icon(Workout, 2), Some(names::WORKOUT_ACTIVE));
        assert_eq!(icon(Cooldown, 3), Some(names::COOLDOWN_ACTIVE));
        assert_eq!(icon(Cooldown, 1), Some(names::WARMUP_INACTIVE));
    }

    #[test]
    fn test_frames_follow_origin() {
        let view = WorkoutView::new(10.0, 235.0, Warmup);
        assert_eq!(bar(&view, Warmup).position(), Vec2::new(50.0, 235.0));
        let icon = view.children(Warmup)[1].as_ref().and_then(Element::as_image).unwrap();
        assert_eq!(icon.position(), Vec2::new(-190.0, 235.0));
    }

    #[test]
    fn test_update_switches_stage_and_feeds_progress() {
        let mut view = WorkoutView::new(0.0, 0.0, Warmup);
        let msg = Message::new()
            .with_workout_stage(Workout)
            .with_float(FloatKey::StageProgress, 0.6);
        view.update(&msg);
        assert_eq!(view.stage(), Workout);
        assert_eq!(bar(&view, Workout).completion(), 0.6);
        assert_eq!(bar(&view, Warmup).completion(), 0.0);
    }

    #[test]
    fn test_render_draws_stage_bar_color() {
        let mut view = WorkoutView::new(0.0, 0.0, Warmup);
        view.load_textures(&AssetCatalog::default_skin()).unwrap();
        view.build_vertices();
        view.update(&Message::new().with_workout_stage(Cooldown).with_float(FloatKey::StageProgress, 1.0));
        let mut display = TestDisplay::new(Size::new(640, 480));
        view.render(&mut display, &Printer::new(false)).unwrap();
        assert!(display.count(colors::FILL_BLUE) > 0);
        assert_eq!(display.count(colors::FILL_GREEN), 0);
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let mut view = WorkoutView::new(0.0, 0.0, Warmup);
        view.load_textures(&AssetCatalog::default_skin()).unwrap();
        view.build_vertices();
        view.hide();
        let mut display = TestDisplay::new(Size::new(640, 480));
        view.render(&mut display, &Printer::new(false)).unwrap();
        assert_eq!(display.count(colors::BLACK), 640 * 480);
    }
}
