//! Book input staging: editable draft form and its submit flow

mod draft;
mod session;

pub use draft::{BookDraft, Chip};
pub use session::{BookInputSession, InputEvent};
