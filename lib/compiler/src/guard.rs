use thiserror::Error;

/// The reason a [`RecursionGuard`] refused to mark a hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// The hash is already being resolved further up the stack.
    #[error("'{0}' is already being resolved")]
    AlreadyMarked(String),
    /// The stack already holds the maximum number of hashes.
    #[error("maximum recursion depth of {0} exceeded")]
    DepthExceeded(usize),
}

/// Detects cycles and runaway nesting while resolving nested queries.
///
/// Every successful [`RecursionGuard::mark`] must be paired with an
/// [`RecursionGuard::unmark`] of the same hash once the nested query is resolved.
#[derive(Debug, Clone)]
pub struct RecursionGuard {
    marked: Vec<String>,
    max_depth: usize,
}

impl RecursionGuard {
    pub fn new(max_depth: usize) -> Self {
        Self {
            marked: Vec::new(),
            max_depth,
        }
    }

    pub fn mark(&mut self, hash: &str) -> Result<(), GuardError> {
        if self.is_marked(hash) {
            return Err(GuardError::AlreadyMarked(hash.to_owned()));
        }
        if self.marked.len() >= self.max_depth {
            return Err(GuardError::DepthExceeded(self.max_depth));
        }
        self.marked.push(hash.to_owned());
        Ok(())
    }

    pub fn unmark(&mut self, hash: &str) {
        if let Some(position) = self.marked.iter().rposition(|marked| marked == hash) {
            self.marked.remove(position);
        }
    }

    pub fn is_marked(&self, hash: &str) -> bool {
        self.marked.iter().any(|marked| marked == hash)
    }

    pub fn depth(&self) -> usize {
        self.marked.len()
    }

    pub fn clear(&mut self) {
        self.marked.clear();
    }
}
