//! Image editing module
//!
//! The only supported mutation is stamping a line of text onto the pixel
//! buffer (overlay).

pub mod overlay;

pub use overlay::{OverlayStyle, TextOverlay};
