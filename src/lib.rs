//! Villancico generator - creates AI-generated Christmas carols
//!
//! This application builds a carol prompt from a user-supplied topic (and an
//! optional child's name and age), generates lyrics and a festive illustration
//! through hosted AI providers, optionally composes a melody through a
//! long-polled music generation service, and saves the artifacts locally.

pub mod ai;
pub mod app;
pub mod artifacts;
pub mod error;
pub mod melody;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
