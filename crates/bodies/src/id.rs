use std::fmt;

use serde::Serialize;

/// Identifier of a body within one session. Never reused, not even across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter. Uniqueness follows from the counter alone.
#[derive(Debug, Clone, Default)]
pub struct IdDispenser {
    next: u64,
}

impl IdDispenser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
