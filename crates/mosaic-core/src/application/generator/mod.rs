//! The generator protocol.
//!
//! A generator is a plain function over the tree: normalize options,
//! mutate the tree (and/or the registry), collect deferred tasks, return.
//! Composition is direct invocation — a generator that depends on another
//! generator's effect calls it and waits for it to return, which gives
//! one total order of tree mutations and makes the final tree state a
//! deterministic function of the call order.
//!
//! Tasks never run during generation. The outermost caller commits the
//! tree first and only then runs the composed task, so a task can never
//! observe a partially mutated workspace.

pub mod capability;
pub mod task;

pub use capability::{CapabilityGenerator, CapabilityOptions, CapabilityRegistry, GeneratorContext};
pub use task::{GeneratorTask, TaskError, Tasks, run_tasks_in_serial};
