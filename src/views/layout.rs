//! Declarative layout tables.
//!
//! Views describe their children as `const` tables of slots: a frame in
//! widget space plus what the slot holds. State-indexed views list, per
//! slot, which content appears in which state; states a slot does not list
//! leave that position empty. [`StateChildren::build`] interprets a table
//! once at construction and produces one fixed-size child array per state.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::debug;

use crate::assets::{AssetSource, names};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{DisplayState, FlagKey, Message, TextKey, WorkoutStage};
use crate::printer::{FontFace, Printer};
use crate::widgets::text_block::INITIAL_TEXT;
use crate::widgets::{BarStyle, Badges, Button, Element, Image, ProgressBar, TextBlock, Widget, render_children};

use super::{PWorkoutView, WorkoutView};

/// Centre and size of a slot in widget space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    const fn offset(self, origin: Vec2) -> Self {
        Self::new(self.x + origin.x, self.y + origin.y, self.width, self.height)
    }
}

/// What a slot holds.
#[derive(Clone, Copy)]
pub enum Content {
    Image(&'static str),
    /// Value box following `key`, with an optional fixed unit label.
    Text {
        key: TextKey,
        label: Option<&'static str>,
    },
    Bar(BarStyle),
    Button {
        label: &'static str,
        key: FlagKey,
    },
    Badges,
    /// Stage strip with icons and a progress bar.
    StageView,
    /// Single- or multi-segment stage progress.
    PanelStageView,
    /// Anything the other variants cannot describe.
    Custom(fn(Frame, &BuildContext) -> Element),
}

/// Values shared by every slot of one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildContext {
    pub origin: Vec2,
    pub text_color: Rgb565,
    pub stage: WorkoutStage,
}

impl Content {
    /// Construct the widget for this content at `frame`.
    pub fn instantiate(self, frame: Frame, ctx: &BuildContext) -> Element {
        let frame = frame.offset(ctx.origin);
        let Frame { x, y, width, height } = frame;
        match self {
            Self::Image(texture) => Image::new(texture, x, y, width, height).into(),
            Self::Text { key, label } => {
                let block = TextBlock::new(INITIAL_TEXT, x, y, ctx.text_color, Some(key)).with_background(
                    names::TEXT_BOX,
                    width,
                    height,
                );
                match label {
                    Some(label) => block.with_label(label, FontFace::Medium),
                    None => block,
                }
                .into()
            }
            Self::Bar(style) => {
                let mut bar = ProgressBar::new(style, x, y, 0.0);
                bar.set_size(width, height);
                bar.into()
            }
            Self::Button { label, key } => Button::new(label, x, y, ctx.text_color, ctx.text_color, key)
                .sized(width, height)
                .into(),
            Self::Badges => Badges::new(x, y).into(),
            Self::StageView => WorkoutView::new(x, y, ctx.stage).into(),
            Self::PanelStageView => PWorkoutView::new(frame, ctx.stage).into(),
            Self::Custom(build) => build(frame, ctx),
        }
    }
}

// =============================================================================
// Flat Tables
// =============================================================================

/// Slot present in every state.
#[derive(Clone, Copy)]
pub struct Slot {
    pub frame: Frame,
    pub content: Content,
}

/// Instantiate a flat table in order.
pub fn build_flat(slots: &[Slot], ctx: &BuildContext) -> Vec<Element> {
    slots.iter().map(|slot| slot.content.instantiate(slot.frame, ctx)).collect()
}

// =============================================================================
// State Tables
// =============================================================================

/// Slot whose content depends on the state.
#[derive(Clone, Copy)]
pub struct StateSlot<S: 'static> {
    pub frame: Frame,
    pub contents: &'static [(S, Content)],
}

impl<S: Copy + PartialEq> StateSlot<S> {
    fn content_for(&self, state: S) -> Option<Content> {
        self.contents.iter().find(|(s, _)| *s == state).map(|&(_, content)| content)
    }
}

/// One fixed child array per state, built once.
pub struct StateChildren<S> {
    arrays: Vec<(S, Vec<Option<Element>>)>,
}

impl<S: Copy + PartialEq> StateChildren<S> {
    /// Build arrays for `states` from `slots`. Every array has one entry per
    /// slot, `None` where the slot is empty in that state.
    pub fn build(states: &[S], slots: &[StateSlot<S>], ctx: &BuildContext) -> Self {
        let arrays = states
            .iter()
            .map(|&state| {
                let children = slots
                    .iter()
                    .map(|slot| slot.content_for(state).map(|content| content.instantiate(slot.frame, ctx)))
                    .collect();
                (state, children)
            })
            .collect();
        Self { arrays }
    }

    pub fn get(&self, state: S) -> Option<&[Option<Element>]> {
        self.arrays.iter().find(|(s, _)| *s == state).map(|(_, children)| children.as_slice())
    }

    pub fn get_mut(&mut self, state: S) -> Option<&mut [Option<Element>]> {
        self.arrays
            .iter_mut()
            .find(|(s, _)| *s == state)
            .map(|(_, children)| children.as_mut_slice())
    }

    pub fn has_state(&self, state: S) -> bool {
        self.get(state).is_some()
    }

    fn all_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.arrays.iter_mut().flat_map(|(_, children)| children.iter_mut().flatten())
    }

    pub fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        for child in self.all_mut() {
            child.load_textures(assets)?;
        }
        Ok(())
    }

    pub fn build_vertices(&mut self) {
        self.all_mut().for_each(Widget::build_vertices);
    }

    pub fn delete(&mut self) {
        self.all_mut().for_each(Widget::delete);
    }

    /// Forward `message` to the children of `state` only.
    pub fn update_state(&mut self, state: S, message: &Message) {
        if let Some(children) = self.get_mut(state) {
            for child in children.iter_mut().flatten() {
                child.update(message);
            }
        }
    }

    /// Render the children of `state`. Returns `false` when the state has no
    /// array.
    pub fn render_state<D>(&self, state: S, target: &mut D, printer: &Printer, owner: &'static str) -> bool
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.get(state) {
            Some(children) => {
                render_children(children.iter().flatten(), target, printer, owner);
                true
            }
            None => false,
        }
    }

    /// Show the children of `state` and hide every other array.
    pub fn show_only(&mut self, state: S) {
        for (s, children) in &mut self.arrays {
            for child in children.iter_mut().flatten() {
                if *s == state {
                    child.show();
                } else {
                    child.hide();
                }
            }
        }
    }
}

// =============================================================================
// Display-State Views
// =============================================================================

/// Child arrays keyed by [`DisplayState`], hidden in states without one.
pub struct DisplayStateView {
    children: StateChildren<DisplayState>,
    state: DisplayState,
    hidden: bool,
    owner: &'static str,
}

impl DisplayStateView {
    pub fn new(
        owner: &'static str,
        states: &[DisplayState],
        slots: &[StateSlot<DisplayState>],
        ctx: &BuildContext,
        starting_state: DisplayState,
    ) -> Self {
        Self {
            children: StateChildren::build(states, slots, ctx),
            state: starting_state,
            hidden: false,
            owner,
        }
    }

    pub const fn state(&self) -> DisplayState {
        self.state
    }

    /// Select `state` without a message, hiding every other array.
    pub fn set_state(&mut self, state: DisplayState) {
        self.state = state;
        self.children.show_only(state);
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn children(&self, state: DisplayState) -> Option<&[Option<Element>]> {
        self.children.get(state)
    }
}

impl Widget for DisplayStateView {
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
        if self.children.render_state(self.state, target, printer, self.owner) {
            Ok(())
        } else {
            Err(UiError::NoLayoutForState(self.state))
        }
    }

    fn update(&mut self, message: &Message) {
        let state = message.display_state();
        if !self.children.has_state(state) {
            self.hidden = true;
            return;
        }
        if state != self.state {
            debug!(view = self.owner, ?state, "display state changed");
            self.children.show_only(state);
        }
        self.hidden = false;
        self.state = state;
        self.children.update_state(state, message);
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

/// Implement [`Widget`] by forwarding to a field.
macro_rules! forward_widget {
    ($ty:ty, $field:ident) => {
        impl $crate::widgets::Widget for $ty {
            fn load_textures(
                &mut self,
                assets: &dyn $crate::assets::AssetSource,
            ) -> Result<(), $crate::error::UiError> {
                $crate::widgets::Widget::load_textures(&mut self.$field, assets)
            }

            fn build_vertices(&mut self) {
                $crate::widgets::Widget::build_vertices(&mut self.$field);
            }

            fn render<D>(
                &self,
                target: &mut D,
                printer: &$crate::printer::Printer,
            ) -> Result<(), $crate::error::UiError>
            where
                D: embedded_graphics::draw_target::DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>,
            {
                $crate::widgets::Widget::render(&self.$field, target, printer)
            }

            fn update(&mut self, message: &$crate::message::Message) {
                $crate::widgets::Widget::update(&mut self.$field, message);
            }

            fn hide(&mut self) {
                $crate::widgets::Widget::hide(&mut self.$field);
            }

            fn show(&mut self) {
                $crate::widgets::Widget::show(&mut self.$field);
            }

            fn delete(&mut self) {
                $crate::widgets::Widget::delete(&mut self.$field);
            }
        }
    };
}

pub(crate) use forward_widget;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;

    const CTX: BuildContext = BuildContext {
        origin: Vec2::new(0.0, 0.0),
        text_color: WHITE,
        stage: WorkoutStage::Warmup,
    };

    const SLOTS: [StateSlot<DisplayState>; 2] = [
        StateSlot {
            frame: Frame::new(-10.0, 5.0, 20.0, 10.0),
            contents: &[
                (DisplayState::Main, Content::Image(names::TEXT_BOX)),
                (DisplayState::Info, Content::Text { key: TextKey::Rank, label: Some("th") }),
            ],
        },
        StateSlot {
            frame: Frame::new(10.0, 5.0, 20.0, 10.0),
            contents: &[(DisplayState::Main, Content::Bar(BarStyle::Red))],
        },
    ];

    #[test]
    fn test_build_one_array_per_state() {
        let children = StateChildren::build(&[DisplayState::Main, DisplayState::Info], &SLOTS, &CTX);
        let main = children.get(DisplayState::Main).unwrap();
        let info = children.get(DisplayState::Info).unwrap();
        assert_eq!(main.len(), 2);
        assert_eq!(info.len(), 2);
        assert!(main[0].as_ref().and_then(Element::as_image).is_some());
        assert!(main[1].as_ref().and_then(Element::as_progress_bar).is_some());
        assert_eq!(info[0].as_ref().and_then(Element::as_text_block).and_then(TextBlock::label), Some("th"));
        assert!(info[1].is_none());
        assert!(!children.has_state(DisplayState::Pause));
    }

    #[test]
    fn test_bar_takes_frame_size() {
        let children = StateChildren::build(&[DisplayState::Main], &SLOTS, &CTX);
        let bar = children.get(DisplayState::Main).unwrap()[1].as_ref().and_then(Element::as_progress_bar).unwrap();
        assert_eq!(bar.size(), Vec2::new(20.0, 10.0));
        assert_eq!(bar.position(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_origin_offsets_frames() {
        let ctx = BuildContext { origin: Vec2::new(100.0, -50.0), ..CTX };
        let children = build_flat(&[Slot { frame: Frame::new(1.0, 2.0, 3.0, 4.0), content: Content::Image("x") }], &ctx);
        assert_eq!(children[0].as_image().unwrap().position(), Vec2::new(101.0, -48.0));
    }

    #[test]
    fn test_update_state_only_touches_that_array() {
        let slots = [StateSlot {
            frame: Frame::new(0.0, 0.0, 10.0, 10.0),
            contents: &[
                (DisplayState::Main, Content::Text { key: TextKey::Rank, label: None }),
                (DisplayState::Pause, Content::Text { key: TextKey::Rank, label: None }),
            ],
        }];
        let mut children = StateChildren::build(&[DisplayState::Main, DisplayState::Pause], &slots, &CTX);
        children.update_state(DisplayState::Main, &Message::new().with_text(TextKey::Rank, "9"));
        let text = |children: &StateChildren<DisplayState>, state| {
            children.get(state).unwrap()[0].as_ref().and_then(Element::as_text_block).map(|b| b.text().to_owned())
        };
        assert_eq!(text(&children, DisplayState::Main).as_deref(), Some("9"));
        assert_eq!(text(&children, DisplayState::Pause).as_deref(), Some("0"));
    }

    #[test]
    fn test_show_only_hides_other_arrays() {
        let mut children = StateChildren::build(&[DisplayState::Main, DisplayState::Info], &SLOTS, &CTX);
        children.show_only(DisplayState::Info);
        let main_image = children.get(DisplayState::Main).unwrap()[0].as_ref().and_then(Element::as_image).unwrap();
        assert!(main_image.is_hidden());
        let info_block = children.get(DisplayState::Info).unwrap()[0].as_ref().and_then(Element::as_text_block).unwrap();
        assert!(!info_block.is_hidden());
    }
}
