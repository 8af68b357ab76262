//! TypeScript library generators.

pub mod library;

pub use library::{LibrarySchema, library_generator};
