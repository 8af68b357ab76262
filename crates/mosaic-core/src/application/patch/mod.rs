//! The source-text patch engine.
//!
//! Structural edits to code files without a parse/re-print round trip:
//! changes are *computed* against a read-only structural scan of the
//! original text, but *applied* against the plain string, so untouched
//! code is never reflowed.
//!
//! A missing anchor (no imports, no JSX root, no `remotes` array) is not
//! an error: every function here degrades to an empty change set plus a
//! warning diagnostic, and callers simply skip the write.

pub mod federation;
pub mod imports;
pub mod jsx;
pub mod scanner;

pub use crate::domain::change::{StringChange, apply_string_changes};
pub use federation::{add_remote_definition, add_remote_route, add_remote_to_config};
pub use imports::add_import;
pub use jsx::{find_elements, insert_before_outermost_closing};
