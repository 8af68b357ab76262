//! Node application generators.

pub mod application;

pub use application::{NodeApplicationSchema, application_generator};
