//! Website brief model and prompt assembly for sitebrief.
//!
//! This crate provides:
//! - The `FormState` brief and its state transitions
//! - Palette validation and the page archetype table
//! - The prompt document engine (`assemble`)
//! - Streaming aggregation of generated text
//! - Handlebars request prompts for the AI assist calls

pub mod builder;
pub mod form;
pub mod pages;
pub mod palette;
pub mod stream;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::assemble;
pub use form::{InspirableField, SiteAnalysis};
pub use pages::{page_instruction, PageArchetype};
pub use palette::{is_hex_color, Palette};
pub use stream::{drive, snapshots, Snapshot, StreamOutcome, StreamSession, StreamState};
pub use templates::render_template;
pub use types::{ColorScheme, FormState};
