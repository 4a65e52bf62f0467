use crate::state::CardState;

/// Rejected transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The two states are not neighbours in the card state graph.
    NonAdjacent { from: CardState, to: CardState },
    /// A transition is already live; stop it before starting another.
    AlreadyRunning,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::NonAdjacent { from, to } => {
                write!(f, "cannot transition from {from:?} to {to:?}; states are not adjacent")
            }
            TransitionError::AlreadyRunning => write!(f, "a card transition is already running"),
        }
    }
}

impl std::error::Error for TransitionError {}
