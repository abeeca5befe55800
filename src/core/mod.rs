//! Core building blocks shared by every layout
//!
//! The arena tree, the flat row substrate, error types, and logging setup.

mod error;
mod flatten;
pub mod logging;
mod tree;

pub use error::*;
pub use flatten::*;
pub use logging::*;
pub use tree::*;
