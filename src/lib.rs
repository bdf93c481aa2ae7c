// Crate-level lints: allow the numeric patterns pixel math relies on
#![allow(clippy::cast_possible_truncation)] // f32 -> i32 for pixel coordinates
#![allow(clippy::cast_precision_loss)] // u32/usize -> f32 in layout calculations
#![allow(clippy::cast_possible_wrap)] // u32 -> i32 within viewport ranges
#![allow(clippy::cast_sign_loss)] // f32 -> u32 for sizes known to be positive
#![allow(clippy::too_many_arguments)] // print() mirrors the text draw call shape
#![allow(clippy::struct_excessive_bools)] // widget visibility/selection flags
#![allow(clippy::similar_names)] // pb1/pb2/pb3 and friends
#![allow(clippy::module_name_repetitions)]

//! Augmented-reality workout overlay.
//!
//! A retained widget tree draws the heads-up display seen during a guided
//! ride: rank, energy, pace and distance readouts, the stage progress strip,
//! pause and summary screens, and the brightness/volume/speed menus.
//!
//! # Frame Model
//!
//! The shell owns the root widget and drives it in three phases:
//!
//! 1. **Startup:** `load_textures` against an [`AssetSource`], then
//!    `build_vertices`. A missing texture fails here, once.
//! 2. **Per frame:** build a [`Message`] from the ride data, call `update` on
//!    the root, then `render` into any `DrawTarget<Color = Rgb565>`.
//! 3. **Teardown:** `delete` releases every texture and mesh.
//!
//! Widgets position themselves in a centred, y-up coordinate space. The
//! [`geometry`] module maps that space onto the physical display, including
//! the rotated mounting used by some headsets.
//!
//! # Modules
//!
//! - [`widgets`]: primitive widgets and the [`Element`] tree node
//! - [`views`]: screens composed from declarative layout tables
//! - [`overlays`]: button legend and text banners drawn through the printer
//! - [`printer`]: text measurement and drawing over mono fonts
//! - [`message`]: the per-frame record the shell fills in
//! - [`assets`], [`geometry`], [`colors`], [`config`]: support
//! - [`profiling`]: frame timings and the session event log
//!
//! [`AssetSource`]: assets::AssetSource
//! [`Message`]: message::Message
//! [`Element`]: widgets::Element

pub mod assets;
pub mod colors;
pub mod config;
pub mod error;
pub mod geometry;
pub mod message;
pub mod overlays;
pub mod printer;
pub mod profiling;
pub mod views;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use assets::{AssetCatalog, AssetSource, Texture};
pub use config::DisplayConfig;
pub use error::UiError;
pub use message::{Action, DisplayState, FlagKey, FloatKey, Message, TextKey, WorkoutStage};
pub use printer::{FontFace, Printer};
pub use views::{HudStyle, workout_hud};
pub use widgets::{Element, Widget};
