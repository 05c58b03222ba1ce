//! Task dependency graph: registration, validation and execution order.

use std::collections::HashMap;

use super::Task;
use crate::error::TaskError;

/// Visit state for the depth-first walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path.
    Visiting,
    /// Fully explored.
    Done,
}

/// An explicitly constructed set of named tasks.
///
/// Tasks keep their registration order, which is also the order used by
/// listings and by [`validate`](Self::validate).
#[derive(Default)]
pub struct TaskGraph {
    tasks: Vec<Box<dyn Task>>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for TaskGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tasks.iter().map(|t| t.name()))
            .finish()
    }
}

impl TaskGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DuplicateTask`] if the name is already taken.
    pub fn register(&mut self, task: Box<dyn Task>) -> Result<(), TaskError> {
        let name = task.name().to_string();
        if self.index.contains_key(&name) {
            return Err(TaskError::DuplicateTask(name));
        }
        self.index.insert(name, self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Look up a task by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Task> {
        self.index
            .get(name)
            .and_then(|&i| self.tasks.get(i))
            .map(Box::as_ref)
    }

    /// All tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.iter().map(Box::as_ref)
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check that every dependency exists and that there are no cycles.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingDependency`] or
    /// [`TaskError::DependencyCycle`] for the first problem found.
    pub fn validate(&self) -> Result<(), TaskError> {
        let mut marks = HashMap::new();
        let mut path = Vec::new();
        let mut order = Vec::new();
        for task in self.tasks() {
            self.visit(task, &mut marks, &mut path, &mut order)?;
        }
        Ok(())
    }

    /// Flatten the requested tasks into the order they must run.
    ///
    /// Dependencies come before their dependents, depth-first in the order
    /// they are listed, and a task reachable through several paths appears
    /// only once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownTask`] if a requested name is not
    /// registered, plus the errors of [`validate`](Self::validate) for the
    /// part of the graph that is reachable.
    pub fn execution_order<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<&dyn Task>, TaskError> {
        let roots = names
            .iter()
            .map(|n| {
                self.get(n.as_ref())
                    .ok_or_else(|| TaskError::UnknownTask(n.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut marks = HashMap::new();
        let mut path = Vec::new();
        let mut order = Vec::new();
        for task in roots {
            self.visit(task, &mut marks, &mut path, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'g>(
        &'g self,
        task: &'g dyn Task,
        marks: &mut HashMap<&'g str, Mark>,
        path: &mut Vec<&'g str>,
        order: &mut Vec<&'g dyn Task>,
    ) -> Result<(), TaskError> {
        let name = task.name();
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|n| *n == name).unwrap_or(0);
                let mut cycle: Vec<&str> = path.iter().skip(start).copied().collect();
                cycle.push(name);
                return Err(TaskError::DependencyCycle(cycle.join(" → ")));
            }
            None => {}
        }

        marks.insert(name, Mark::Visiting);
        path.push(name);
        for dep in task.dependencies() {
            let dep_task = self.get(dep).ok_or_else(|| TaskError::MissingDependency {
                task: name.to_string(),
                dependency: (*dep).to_string(),
            })?;
            self.visit(dep_task, marks, path, order)?;
        }
        path.pop();
        marks.insert(name, Mark::Done);
        order.push(task);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::tasks::{Context, TaskResult};

    use anyhow::Result;

    struct MockTask {
        name: &'static str,
        deps: &'static [&'static str],
    }

    impl Task for MockTask {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "mock"
        }
        fn dependencies(&self) -> &[&str] {
            self.deps
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            Ok(TaskResult::Ok)
        }
    }

    fn graph(specs: &[(&'static str, &'static [&'static str])]) -> TaskGraph {
        let mut graph = TaskGraph::new();
        for &(name, deps) in specs {
            graph.register(Box::new(MockTask { name, deps })).unwrap();
        }
        graph
    }

    fn names(order: &[&dyn Task]) -> Vec<String> {
        order.iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut g = graph(&[("a", &[])]);
        let err = g
            .register(Box::new(MockTask {
                name: "a",
                deps: &[],
            }))
            .unwrap_err();
        assert!(matches!(err, TaskError::DuplicateTask(ref n) if n == "a"));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn linear_chain_runs_dependencies_first() {
        let g = graph(&[("c", &["b"]), ("b", &["a"]), ("a", &[])]);
        let order = g.execution_order(&["c"]).unwrap();
        assert_eq!(names(&order), ["a", "b", "c"]);
    }

    #[test]
    fn dependencies_run_in_listed_order() {
        let g = graph(&[("all", &["z", "y", "x"]), ("x", &[]), ("y", &[]), ("z", &[])]);
        let order = g.execution_order(&["all"]).unwrap();
        assert_eq!(names(&order), ["z", "y", "x", "all"]);
    }

    #[test]
    fn diamond_runs_shared_dependency_once() {
        let g = graph(&[
            ("top", &["left", "right"]),
            ("left", &["base"]),
            ("right", &["base"]),
            ("base", &[]),
        ]);
        let order = g.execution_order(&["top"]).unwrap();
        assert_eq!(names(&order), ["base", "left", "right", "top"]);
    }

    #[test]
    fn several_roots_share_one_walk() {
        let g = graph(&[("a", &[]), ("b", &["a"])]);
        let order = g.execution_order(&["a", "b", "a"]).unwrap();
        assert_eq!(names(&order), ["a", "b"]);
    }

    #[test]
    fn unknown_root_rejected() {
        let g = graph(&[("a", &[])]);
        let err = g.execution_order(&["nope"]).err().unwrap();
        assert!(matches!(err, TaskError::UnknownTask(ref n) if n == "nope"));
    }

    #[test]
    fn missing_dependency_reported() {
        let g = graph(&[("a", &["ghost"])]);
        let err = g.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Task 'a' depends on unknown task 'ghost'"
        );
    }

    #[test]
    fn cycle_reported_with_path() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let err = g.validate().unwrap_err();
        assert!(matches!(err, TaskError::DependencyCycle(ref p) if p == "a → b → c → a"));
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let g = graph(&[("a", &["a"])]);
        assert!(matches!(
            g.execution_order(&["a"]),
            Err(TaskError::DependencyCycle(_))
        ));
    }

    #[test]
    fn debug_lists_task_names() {
        let g = graph(&[("a", &[]), ("b", &[])]);
        assert_eq!(format!("{g:?}"), r#"["a", "b"]"#);
    }
}
