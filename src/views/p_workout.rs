//! Panel-style stage progress.
//!
//! Two modes, picked by the `MultiProgress` flag each frame:
//!
//! - single: one bar across the whole container
//! - multi: one segment per stage; the current stage's segment takes half
//!   the usable width and the other two a quarter each

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::warn;

use super::layout::Frame;
use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{FlagKey, FloatKey, Message, WorkoutStage};
use crate::printer::Printer;
use crate::widgets::{Image, ProgressBar, Widget};

pub const P_WORKOUT_WIDTH: f32 = 465.0;
pub const P_WORKOUT_HEIGHT: f32 = 50.0;
pub const P_WORKOUT_PADDING_X: f32 = 10.0;
pub const P_WORKOUT_PADDING_Y: f32 = 10.0;
pub const P_WORKOUT_POSITION: Vec2 = Vec2::new(105.0, 450.0);

/// Share of the usable width taken by the current stage's segment.
const ACTIVE_SHARE: f32 = 0.5;

/// Panel stage progress view.
pub struct PWorkoutView {
    bg: Image,
    single: ProgressBar,
    segments: [ProgressBar; 3],
    position: Vec2,
    width: f32,
    height: f32,
    stage: WorkoutStage,
    multi: bool,
    hidden: bool,
}

fn track(x: f32, y: f32, width: f32, height: f32) -> ProgressBar {
    ProgressBar::with_textures(
        names::PANEL_PROGRESS_TRACK,
        names::PANEL_PROGRESS_FILL,
        x,
        y,
        width,
        height,
        Vec2::default(),
        1.0,
    )
}

impl PWorkoutView {
    /// View centred in `frame`. Segments start as equal thirds.
    pub fn new(frame: Frame, stage: WorkoutStage) -> Self {
        let Frame { x, y, width, height } = frame;
        let bar_height = height - 2.0 * P_WORKOUT_PADDING_Y;
        let usable = usable_width(width);
        let segment_width = usable / 3.0;
        let left = x - width / 2.0 + P_WORKOUT_PADDING_X;
        let segment = |i: f32| {
            track(
                left + i * (segment_width + P_WORKOUT_PADDING_X) + segment_width / 2.0,
                y,
                segment_width,
                bar_height,
            )
        };

        let mut single = track(x, y, width - 2.0 * P_WORKOUT_PADDING_X, bar_height);
        single.hide();

        Self {
            bg: Image::new(names::PANEL_PROGRESS_BG, x, y, width, height),
            single,
            segments: [segment(0.0), segment(1.0), segment(2.0)],
            position: Vec2::new(x, y),
            width,
            height,
            stage,
            multi: true,
            hidden: false,
        }
    }

    /// View at the default panel placement.
    pub fn standard(stage: WorkoutStage) -> Self {
        Self::new(
            Frame::new(P_WORKOUT_POSITION.x, P_WORKOUT_POSITION.y, P_WORKOUT_WIDTH, P_WORKOUT_HEIGHT),
            stage,
        )
    }

    pub const fn stage(&self) -> WorkoutStage {
        self.stage
    }

    pub const fn is_multi(&self) -> bool {
        self.multi
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn single(&self) -> &ProgressBar {
        &self.single
    }

    pub const fn segments(&self) -> &[ProgressBar; 3] {
        &self.segments
    }

    /// Resize and fill the three segments for `stage`.
    fn arrange(&mut self, stage: WorkoutStage, progress: f32) {
        let usable = usable_width(self.width);
        let big = ACTIVE_SHARE * usable;
        let small = (1.0 - ACTIVE_SHARE) / 2.0 * usable;
        let pad = P_WORKOUT_PADDING_X;
        let left = self.position.x - self.width / 2.0;
        let bar_height = self.height - 2.0 * P_WORKOUT_PADDING_Y;

        // (width, left offset of centre, completion) per segment
        let layout = match stage {
            WorkoutStage::Warmup => [
                (big, pad + big / 2.0, progress),
                (small, 2.0 * pad + big + small / 2.0, 0.0),
                (small, 3.0 * pad + big + 1.5 * small, 0.0),
            ],
            WorkoutStage::Workout => [
                (small, pad + small / 2.0, 1.0),
                (big, 2.0 * pad + small + big / 2.0, progress),
                (small, 3.0 * pad + big + 1.5 * small, 0.0),
            ],
            WorkoutStage::Cooldown => [
                (small, pad + small / 2.0, 1.0),
                (small, 2.0 * pad + 1.5 * small, 1.0),
                (big, 3.0 * pad + 2.0 * small + big / 2.0, progress),
            ],
        };

        for (bar, (width, offset, completion)) in self.segments.iter_mut().zip(layout) {
            bar.set_size(width, bar_height);
            bar.set_position(left + offset, self.position.y);
            bar.set_completion(completion);
        }
    }
}

fn usable_width(width: f32) -> f32 {
    width - 4.0 * P_WORKOUT_PADDING_X
}

impl Widget for PWorkoutView {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.bg.load_textures(assets)?;
        self.single.load_textures(assets)?;
        for bar in &mut self.segments {
            bar.load_textures(assets)?;
        }
        Ok(())
    }

    fn build_vertices(&mut self) {
        self.bg.build_vertices();
        self.single.build_vertices();
        for bar in &mut self.segments {
            bar.build_vertices();
        }
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        if let Err(err) = self.bg.render(target, printer) {
            warn!(%err, "panel progress background render failed");
        }
        if self.multi {
            for bar in &self.segments {
                if let Err(err) = bar.render(target, printer) {
                    warn!(%err, "panel progress segment render failed");
                }
            }
        } else if let Err(err) = self.single.render(target, printer) {
            warn!(%err, "panel progress bar render failed");
        }
        Ok(())
    }

    fn update(&mut self, message: &Message) {
        self.hidden = !message.display_state().is_in_workout();
        self.stage = message.workout_stage();
        self.multi = message.flag(FlagKey::MultiProgress);

        if !self.multi {
            self.single.show();
            self.single.update(&message.delegate(FloatKey::StageProgress));
            self.segments.iter_mut().for_each(Widget::hide);
            return;
        }

        self.single.hide();
        self.segments.iter_mut().for_each(Widget::show);
        let progress = message.float(FloatKey::StageProgress).unwrap_or(0.0).clamp(0.0, 1.0);
        self.arrange(self.stage, progress);
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.bg.delete();
        self.single.delete();
        self.segments.iter_mut().for_each(Widget::delete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::colors;
    use crate::message::DisplayState;
    use crate::testing::{PixelQuery, TestDisplay};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn multi(stage: WorkoutStage, progress: f32) -> Message {
        Message::new()
            .with_workout_stage(stage)
            .with_flag(FlagKey::MultiProgress, true)
            .with_float(FloatKey::StageProgress, progress)
    }

    const USABLE: f32 = P_WORKOUT_WIDTH - 4.0 * P_WORKOUT_PADDING_X;
    const LEFT: f32 = 105.0 - P_WORKOUT_WIDTH / 2.0;

    #[test]
    fn test_initial_segments_are_equal_thirds() {
        let view = PWorkoutView::standard(WorkoutStage::Warmup);
        for (i, bar) in view.segments().iter().enumerate() {
            assert!(approx(bar.size().x, USABLE / 3.0));
            let expected = LEFT + P_WORKOUT_PADDING_X + i as f32 * (USABLE / 3.0 + P_WORKOUT_PADDING_X) + USABLE / 6.0;
            assert!(approx(bar.position().x, expected));
        }
        assert!(view.single().is_hidden());
        assert!(approx(view.single().size().x, P_WORKOUT_WIDTH - 20.0));
    }

    #[test]
    fn test_warmup_layout() {
        let mut view = PWorkoutView::standard(WorkoutStage::Warmup);
        view.update(&multi(WorkoutStage::Warmup, 0.4));
        let [pb1, pb2, pb3] = view.segments();
        assert!(approx(pb1.size().x, USABLE / 2.0));
        assert!(approx(pb2.size().x, USABLE / 4.0));
        assert!(approx(pb1.position().x, LEFT + 10.0 + USABLE / 4.0));
        assert!(approx(pb3.position().x, LEFT + 30.0 + USABLE / 2.0 + 1.5 * USABLE / 4.0));
        assert_eq!(pb1.completion(), 0.4);
        assert_eq!(pb2.completion(), 0.0);
        assert_eq!(pb3.completion(), 0.0);
    }

    #[test]
    fn test_cooldown_fills_earlier_segments() {
        let mut view = PWorkoutView::standard(WorkoutStage::Warmup);
        view.update(&multi(WorkoutStage::Cooldown, 0.25));
        let [pb1, pb2, pb3] = view.segments();
        assert_eq!(pb1.completion(), 1.0);
        assert_eq!(pb2.completion(), 1.0);
        assert_eq!(pb3.completion(), 0.25);
        assert!(approx(pb3.size().x, USABLE / 2.0));
        // Right edge of the last segment sits one padding inside the container.
        let right = pb3.position().x + pb3.size().x / 2.0;
        assert!(approx(right, LEFT + P_WORKOUT_WIDTH - P_WORKOUT_PADDING_X));
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut view = PWorkoutView::standard(WorkoutStage::Workout);
        view.update(&multi(WorkoutStage::Workout, 1.7));
        assert_eq!(view.segments()[1].completion(), 1.0);
    }

    #[test]
    fn test_single_mode() {
        let mut view = PWorkoutView::standard(WorkoutStage::Workout);
        view.update(&Message::new().with_float(FloatKey::StageProgress, 0.3));
        assert!(!view.is_multi());
        assert!(!view.single().is_hidden());
        assert_eq!(view.single().completion(), 0.3);
        assert!(view.segments().iter().all(ProgressBar::is_hidden));
    }

    #[test]
    fn test_hidden_outside_workout_states() {
        let mut view = PWorkoutView::standard(WorkoutStage::Workout);
        view.update(&Message::new().with_display_state(DisplayState::Summary));
        assert!(view.is_hidden());
        view.update(&Message::new().with_display_state(DisplayState::Pause));
        assert!(!view.is_hidden());
    }

    #[test]
    fn test_render_multi_draws_fill() {
        let mut view = PWorkoutView::standard(WorkoutStage::Warmup);
        view.load_textures(&AssetCatalog::default_skin()).unwrap();
        view.build_vertices();
        view.update(&multi(WorkoutStage::Warmup, 0.5));
        let mut display = TestDisplay::new(Size::new(1280, 960));
        view.render(&mut display, &Printer::new(false)).unwrap();
        assert!(display.count(colors::FILL_RED) > 0);
        assert!(display.count(colors::TRACK) > 0);
    }
}
