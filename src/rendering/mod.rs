//! Frame buffers, the overlay compositor, and terminal backends.

pub mod frame;
pub mod overlay;
pub mod terminal;
