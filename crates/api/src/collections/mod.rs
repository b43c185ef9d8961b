//! Per-entity collection handles
//!
//! Each handle exposes the uniform operation set over one entity kind.
//! All handles share the injected store; each write runs in its own
//! session.

mod authors;
mod authorships;
mod books;
mod publishers;

pub use authors::Authors;
pub use authorships::Authorships;
pub use books::Books;
pub use publishers::Publishers;
