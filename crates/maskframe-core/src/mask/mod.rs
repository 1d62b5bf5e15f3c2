//! Crop mask overlay.
//!
//! The mask asset is a bitmap the size of the framing container. Once it has
//! loaded it is inverted a single time and the result is cached with the
//! mask. The inverted bitmap is then drawn over the image at a fixed opacity
//! so everything outside the frame reads as dimmed.
//!
//! ## Degraded mode
//!
//! A mask that never loads, or fails to decode, is not an error for the
//! editor: it keeps the default container and simply draws no overlay.

mod composite;
mod decode;
mod invert;
mod slot;

pub use composite::{composite_over, BlendMode};
pub use decode::{decode_mask, rgba_from_raw};
pub use invert::{invert_mask, MaskInversion};
pub use slot::{LoadedMask, MaskId, MaskSlot, MaskState, MaskTicket};
