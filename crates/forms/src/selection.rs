//! Per-field selection state
//!
//! ```text
//! Disabled --ancestors met--> Loading --ok--> Ready
//!     ^                          |  \--err--> Error
//!     +------ancestor empty------+------------+
//! Ready/Error --ancestor changed--> Loading
//! ```

/// Interaction state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Disabled,
    Loading,
    Ready,
    /// Fetch failed; disabled until an ancestor changes
    Error,
}

impl SelectionState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Request for the options of one field, issued by the engine
///
/// Only the ticket with the latest generation for its field may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub field: String,
    pub source: String,
    pub ancestors: Vec<String>,
    pub(crate) generation: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SelectionSlot {
    pub state: SelectionState,
    /// Generation of the latest issued fetch; bumped on every invalidation
    pub generation: u64,
}

impl SelectionSlot {
    pub fn disable(&mut self, next_generation: u64) {
        self.state = SelectionState::Disabled;
        self.generation = next_generation;
    }
}
