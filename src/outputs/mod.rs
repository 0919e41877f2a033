//! Output generation: Markdown rendering and on-disk persistence.
//!
//! # Submodules
//!
//! - [`markdown`]: pure rendering of a validated digest into Markdown
//! - [`store`]: writes the rendered digest to a date-named file
//! - [`index`]: maintains the persistent date-keyed index JSON
//!
//! # Output structure
//!
//! ```text
//! digest_dir/
//! ├── 2025-05-06.md   # one digest per date, overwritten on rerun
//! ├── 2025-05-07.md
//! └── index.json      # [{date, title, tags}], newest first
//! ```

pub mod index;
pub mod markdown;
pub mod store;
