//! Request handlers.

pub mod agent;
pub mod health;
pub mod summarize;

pub use agent::*;
pub use health::*;
pub use summarize::*;
