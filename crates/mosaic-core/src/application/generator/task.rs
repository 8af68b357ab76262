//! Deferred generator tasks.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// A task failed after tree mutation was already committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TaskError {
    message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<crate::error::MosaicError> for TaskError {
    fn from(err: crate::error::MosaicError) -> Self {
        Self::new(err.to_string())
    }
}

/// A deferred, zero-argument, side-effecting unit of work.
///
/// Produced by generators, owned and run by the outermost runner after
/// the whole tree mutation has been committed.
pub struct GeneratorTask {
    label: String,
    run: Box<dyn FnOnce() -> Result<(), TaskError>>,
}

impl GeneratorTask {
    pub fn new(
        label: impl Into<String>,
        run: impl FnOnce() -> Result<(), TaskError> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            run: Box::new(run),
        }
    }

    /// A task that does nothing; useful when an updater had no work.
    pub fn noop() -> Self {
        Self::new("noop", || Ok(()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn run(self) -> Result<(), TaskError> {
        debug!(task = %self.label, "running generator task");
        (self.run)()
    }
}

impl fmt::Debug for GeneratorTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorTask")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Compose tasks into one that runs them in order, fail-fast.
///
/// The first failure aborts the remaining tasks and surfaces unmodified.
pub fn run_tasks_in_serial(tasks: Vec<GeneratorTask>) -> GeneratorTask {
    GeneratorTask::new("serial", move || {
        for task in tasks {
            task.run()?;
        }
        Ok(())
    })
}

/// The ordered task collection a generator hands back to its caller.
#[derive(Debug, Default)]
pub struct Tasks(Vec<GeneratorTask>);

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: GeneratorTask) {
        self.0.push(task);
    }

    pub fn extend(&mut self, other: Tasks) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collapse into a single fail-fast serial task.
    pub fn into_serial(self) -> GeneratorTask {
        run_tasks_in_serial(self.0)
    }
}

impl IntoIterator for Tasks {
    type Item = GeneratorTask;
    type IntoIter = std::vec::IntoIter<GeneratorTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_task(log: &Rc<RefCell<Vec<&'static str>>>, id: &'static str) -> GeneratorTask {
        let log = Rc::clone(log);
        GeneratorTask::new(id, move || {
            log.borrow_mut().push(id);
            Ok(())
        })
    }

    #[test]
    fn serial_runs_in_array_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composed = run_tasks_in_serial(vec![
            recording_task(&log, "a"),
            recording_task(&log, "b"),
            recording_task(&log, "c"),
        ]);
        composed.run().unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_failure_aborts_the_rest_and_surfaces_unmodified() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let failing = GeneratorTask::new("boom", || Err(TaskError::new("install failed")));
        let composed = run_tasks_in_serial(vec![failing, recording_task(&log, "b")]);

        let err = composed.run().unwrap_err();
        assert_eq!(err, TaskError::new("install failed"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn tasks_collection_composes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tasks = Tasks::new();
        tasks.push(recording_task(&log, "first"));
        let mut nested = Tasks::new();
        nested.push(recording_task(&log, "second"));
        tasks.extend(nested);

        assert_eq!(tasks.len(), 2);
        tasks.into_serial().run().unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn noop_task_succeeds() {
        assert!(GeneratorTask::noop().run().is_ok());
    }
}
