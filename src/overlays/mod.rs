//! Text-only overlays drawn directly through the [`Printer`](crate::printer::Printer).
//!
//! These sit outside the widget tree: they own no textures and have no
//! per-frame message, so the shell renders them after the root widget.

pub mod banner;
pub mod legend;

pub use banner::{BannerPosition, BannerView};
pub use legend::{ButtonLegendView, LegendButton};
