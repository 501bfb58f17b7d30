//! Everyday Index - Table Maintenance Engine
//!
//! Keeps the markdown index table of a practice journal valid and aligned.
//!
//! Architecture:
//! ```text
//! RawEntry ──validate──▶ EntryRecord
//!                            │
//! host document ──parse──▶ TableDocument ──resolve──▶ TableSchema
//!                            │
//!                   next_identifier (sequential | date)
//!                            │
//!                  push_row ─▶ compute_widths ─▶ render
//!                            │
//!              AppliedEntry { document, filename, file_content }
//! ```

pub mod document;
pub mod engine;
pub mod identifier;
pub mod naming;
pub mod schema;
pub mod template;
pub mod width;

// Re-export key types for convenience
pub use document::{Alignment, LineEnding, TableDocument, TableRow};
pub use engine::{apply, AppliedEntry, IndexTableEngine, TableReport};
pub use identifier::next_identifier;
pub use naming::{entry_filename, full_sequence, sequence_suffix, slugify};
pub use schema::TableSchema;
pub use template::{EntryTemplate, TemplateContext};
pub use width::{compute_widths, display_width};
