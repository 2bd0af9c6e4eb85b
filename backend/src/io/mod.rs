//! # IO Layer
//!
//! Everything that touches the outside world: reading raw text from files or
//! standard input, and rendering the row table for a terminal. Business rules
//! stay in the domain layer.

pub mod acquisition;
pub mod render;

pub use acquisition::*;
pub use render::*;
