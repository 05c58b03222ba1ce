//! Idempotent filesystem primitives (check + apply pattern).
pub mod fs;
pub mod output_file;
pub mod stale_tree;

use anyhow::Result;

pub use output_file::OutputFile;
pub use stale_tree::StaleTree;

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use sitebuild::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "12 bytes differ".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// Description of what is currently there.
        current: String,
    },
    /// Resource cannot be applied (e.g., a directory sits where a file should
    /// go). Processing treats this as a failure.
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created, updated or removed.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
}

/// Unified interface for resources that can be checked, applied and removed.
///
/// Callers check [`current_state`](Self::current_state) first and only call
/// [`apply`](Self::apply) or [`remove`](Self::remove) when it differs from
/// what they want.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource to its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be written.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource.
    ///
    /// Default implementation returns an error; override in resources
    /// that support removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed, or if removal is
    /// not supported for this resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn description(&self) -> String {
        (**self).description()
    }

    fn current_state(&self) -> Result<ResourceState> {
        (**self).current_state()
    }

    fn apply(&self) -> Result<ResourceChange> {
        (**self).apply()
    }

    fn remove(&self) -> Result<ResourceChange> {
        (**self).remove()
    }
}
