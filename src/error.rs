//! Error type shared by every widget.

use thiserror::Error;

use crate::message::DisplayState;
use crate::printer::FontFace;

/// Failures surfaced by loading and rendering the widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// The widget was constructed without a texture name.
    #[error("widget has no texture assigned")]
    NoTexture,

    /// The asset source has no texture under this name.
    #[error("failed to load texture `{0}`")]
    TextureLoad(String),

    /// Render was called before `load_textures`, or after `delete`.
    #[error("texture has not been loaded")]
    TextureNotLoaded,

    /// Render was called before `build_vertices`.
    #[error("vertex mesh has not been built")]
    MeshNotBuilt,

    /// The printer has no typeface loaded for this face.
    #[error("font face {0:?} is not loaded")]
    FontNotLoaded(FontFace),

    /// A state-indexed view has no child layout for the current state.
    #[error("no layout for display state {0:?}")]
    NoLayoutForState(DisplayState),
}
