//! Settings menus shown outside the workout screens.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::assets::{AssetSource, names};
use crate::colors::{DESELECTED, SELECTED};
use crate::error::UiError;
use crate::geometry::Vec2;
use crate::message::{DisplayState, FlagKey, FloatKey, Message, Text, TextKey, bounded_text};
use crate::printer::{FontFace, Printer};
use crate::widgets::text_block::INITIAL_TEXT;
use crate::widgets::{BarStyle, CompositeView, Element, Image, ProgressBar, Widget};

pub const BACK_TEXT: &str = "Back";

/// Initial level shown before the first progress value arrives.
pub const LEVEL_INITIAL: f32 = 0.75;

const LEVEL_MENU_POSITION: Vec2 = Vec2::new(0.0, 100.0);
const LEVEL_MENU_SIZE: f32 = 300.0;
const LEVEL_BAR_POSITION: Vec2 = Vec2::new(0.0, 10.0);

/// Highlight for a label that is active when `selected` is `active_when`.
const fn highlight(selected: bool, active_when: bool) -> Rgb565 {
    if selected == active_when { SELECTED } else { DESELECTED }
}

// =============================================================================
// Level Menus
// =============================================================================

/// Which setting a [`LevelMenu`] adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Brightness,
    Volume,
}

impl LevelKind {
    pub const fn state(self) -> DisplayState {
        match self {
            Self::Brightness => DisplayState::MenuBrightness,
            Self::Volume => DisplayState::MenuVolume,
        }
    }

    pub const fn selected_key(self) -> FlagKey {
        match self {
            Self::Brightness => FlagKey::BrightnessSelected,
            Self::Volume => FlagKey::VolumeSelected,
        }
    }

    pub const fn progress_key(self) -> FloatKey {
        match self {
            Self::Brightness => FloatKey::BrightnessProgress,
            Self::Volume => FloatKey::VolumeProgress,
        }
    }

    /// Active and gray icon textures.
    const fn icons(self) -> (&'static str, &'static str) {
        match self {
            Self::Brightness => (names::BRIGHTNESS_ICON, names::BRIGHTNESS_ICON_GRAY),
            Self::Volume => (names::VOLUME_ICON, names::VOLUME_ICON_GRAY),
        }
    }

    const fn icon_size(self) -> Vec2 {
        match self {
            Self::Brightness => Vec2::new(150.0, 150.0),
            Self::Volume => Vec2::new(150.0, 100.0),
        }
    }

    /// Position and scale of the "Back" label.
    const fn back(self) -> (Vec2, f32) {
        match self {
            Self::Brightness => (Vec2::new(0.0, -100.0), 0.325),
            Self::Volume => (Vec2::new(0.0, -200.0), 0.5),
        }
    }
}

/// Brightness or volume menu: icon, level bar and a "Back" entry.
pub struct LevelMenu {
    kind: LevelKind,
    selected_view: CompositeView,
    deselected_view: CompositeView,
    selected: bool,
    flash: bool,
    hidden: bool,
}

impl LevelMenu {
    pub fn new(kind: LevelKind) -> Self {
        let (active_icon, gray_icon) = kind.icons();
        let skin = |icon: &'static str, style: BarStyle| {
            let mut view = CompositeView::with_background(
                Some(names::LEVEL_MENU_BG),
                LEVEL_MENU_POSITION.x,
                LEVEL_MENU_POSITION.y,
                LEVEL_MENU_SIZE,
                LEVEL_MENU_SIZE,
            );
            let icon_size = kind.icon_size();
            view.add_image(icon, 0.0, 25.0, icon_size.x, icon_size.y);
            view.add_element(
                ProgressBar::new(style, LEVEL_BAR_POSITION.x, LEVEL_BAR_POSITION.y, LEVEL_INITIAL)
                    .following(kind.progress_key()),
            );
            view
        };
        Self {
            kind,
            selected_view: skin(active_icon, BarStyle::BrightnessSelected),
            deselected_view: skin(gray_icon, BarStyle::BrightnessUnselected),
            selected: false,
            flash: false,
            hidden: true,
        }
    }

    pub fn brightness() -> Self {
        Self::new(LevelKind::Brightness)
    }

    pub fn volume() -> Self {
        Self::new(LevelKind::Volume)
    }

    pub const fn kind(&self) -> LevelKind {
        self.kind
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn is_flashing(&self) -> bool {
        self.flash
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Colour of the "Back" entry: highlighted unless the level is selected.
    pub const fn back_color(&self) -> Rgb565 {
        highlight(self.selected, false)
    }

    /// Level shown by the current skin.
    pub fn level(&self) -> Option<f32> {
        let view = if self.selected { &self.selected_view } else { &self.deselected_view };
        view.children().iter().find_map(Element::as_progress_bar).map(ProgressBar::completion)
    }
}

impl Widget for LevelMenu {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.selected_view.load_textures(assets)?;
        self.deselected_view.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.selected_view.build_vertices();
        self.deselected_view.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        if self.selected {
            self.selected_view.render(target, printer)?;
        } else {
            self.deselected_view.render(target, printer)?;
        }
        let (position, scale) = self.kind.back();
        printer.print(target, position.x, position.y, scale, self.back_color(), FontFace::Bold, BACK_TEXT)
    }

    fn update(&mut self, message: &Message) {
        if message.display_state() != self.kind.state() {
            self.hidden = true;
            return;
        }
        self.hidden = false;
        self.flash = message.flag(FlagKey::Flash);
        self.selected = message.flag(self.kind.selected_key());
        self.selected_view.update(message);
        self.deselected_view.update(message);
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.selected_view.delete();
        self.deselected_view.delete();
    }
}

// =============================================================================
// Speed Menu
// =============================================================================

const SPEED_TITLE: (&str, Vec2, f32) = ("Speed", Vec2::new(0.0, 120.0), 0.5);
const SPEED_VALUE: (Vec2, f32) = (Vec2::new(-40.0, 20.0), 0.75);
const SPEED_BACK: (Vec2, f32) = (Vec2::new(0.0, -200.0), 0.5);
const ARROWS_POSITION: Vec2 = Vec2::new(120.0, 20.0);
const ARROWS_SIZE: Vec2 = Vec2::new(30.0, 40.0);

/// Speed menu: title, current speed with up/down arrows, and "Back".
pub struct SpeedMenu {
    arrows_active: Image,
    arrows_inactive: Image,
    speed: Text,
    selected: bool,
    flash: bool,
    hidden: bool,
}

impl SpeedMenu {
    pub fn new() -> Self {
        let arrows = |texture| Image::new(texture, ARROWS_POSITION.x, ARROWS_POSITION.y, ARROWS_SIZE.x, ARROWS_SIZE.y);
        Self {
            arrows_active: arrows(names::ARROWS),
            arrows_inactive: arrows(names::ARROWS_GRAY),
            speed: bounded_text(INITIAL_TEXT),
            selected: false,
            flash: false,
            hidden: false,
        }
    }

    pub fn speed(&self) -> &str {
        &self.speed
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Default for SpeedMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SpeedMenu {
    fn load_textures(&mut self, assets: &dyn AssetSource) -> Result<(), UiError> {
        self.arrows_active.load_textures(assets)?;
        self.arrows_inactive.load_textures(assets)
    }

    fn build_vertices(&mut self) {
        self.arrows_active.build_vertices();
        self.arrows_inactive.build_vertices();
    }

    fn render<D>(&self, target: &mut D, printer: &Printer) -> Result<(), UiError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }
        let color = highlight(self.selected, true);

        let (title, position, scale) = SPEED_TITLE;
        printer.print(target, position.x, position.y, scale, color, FontFace::Bold, title)?;

        if !self.flash {
            let (position, scale) = SPEED_VALUE;
            printer.print(target, position.x, position.y, scale, color, FontFace::Bold, &self.speed)?;
        }

        if self.selected {
            self.arrows_active.render(target, printer)?;
        } else {
            self.arrows_inactive.render(target, printer)?;
        }

        let (position, scale) = SPEED_BACK;
        let back_color = highlight(self.selected, false);
        printer.print(target, position.x, position.y, scale, back_color, FontFace::Bold, BACK_TEXT)
    }

    fn update(&mut self, message: &Message) {
        if message.display_state() != DisplayState::MenuSpeed {
            self.hidden = true;
            return;
        }
        self.hidden = false;
        self.selected = message.flag(FlagKey::SpeedSelected);
        self.flash = message.flag(FlagKey::Flash);
        if let Some(speed) = message.text(TextKey::SpeedPace) {
            self.speed = bounded_text(speed);
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn delete(&mut self) {
        self.arrows_active.delete();
        self.arrows_inactive.delete();
    }
}
