//! Discrete card states and the rules for moving between them.

/// Resting positions of the card, ordered from least to most expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardState {
    Collapsed,
    Expanded,
    FullyExpanded,
}

impl CardState {
    pub const ALL: [CardState; 3] = [
        CardState::Collapsed,
        CardState::Expanded,
        CardState::FullyExpanded,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            CardState::Collapsed => 0,
            CardState::Expanded => 1,
            CardState::FullyExpanded => 2,
        }
    }

    /// Whether a single transition may connect `self` and `other`.
    pub fn is_adjacent(self, other: CardState) -> bool {
        self.index().abs_diff(other.index()) == 1
    }

    /// The state a transition out of `self` heads to.
    ///
    /// Only `Expanded` has a choice; the end states always move to `Expanded`.
    pub fn next(self, prefer_forward: bool) -> CardState {
        match self {
            CardState::Collapsed | CardState::FullyExpanded => CardState::Expanded,
            CardState::Expanded if prefer_forward => CardState::FullyExpanded,
            CardState::Expanded => CardState::Collapsed,
        }
    }
}

/// Direction of a vertical drag relative to the card's expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Toward fuller expansion (dragging up).
    Forward,
    /// Toward collapse (dragging down).
    Backward,
}

impl TransitionDirection {
    /// Downward translation is backward; everything else, including no
    /// movement at all, counts as forward.
    pub fn from_translation(translation_y: f32) -> Self {
        if translation_y > 0.0 {
            TransitionDirection::Backward
        } else {
            TransitionDirection::Forward
        }
    }

    pub fn is_forward(self) -> bool {
        self == TransitionDirection::Forward
    }
}

/// Holds the committed card state and the forward-preference guess used
/// before a drag has picked a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStateMachine {
    current: CardState,
    prefers_forward: bool,
}

impl Default for CardStateMachine {
    fn default() -> Self {
        Self::new(CardState::Collapsed)
    }
}

impl CardStateMachine {
    pub fn new(initial: CardState) -> Self {
        Self {
            current: initial,
            prefers_forward: true,
        }
    }

    pub fn current(&self) -> CardState {
        self.current
    }

    pub fn next(&self, prefer_forward: bool) -> CardState {
        self.current.next(prefer_forward)
    }

    /// Next state using the stored preference.
    pub fn next_guess(&self) -> CardState {
        self.next(self.prefers_forward)
    }

    pub fn prefers_forward(&self) -> bool {
        self.prefers_forward
    }

    pub fn set_prefers_forward(&mut self, prefers_forward: bool) {
        self.prefers_forward = prefers_forward;
    }

    pub fn commit(&mut self, state: CardState) {
        if state != self.current {
            log::debug!("card state {:?} -> {state:?}", self.current);
        }
        self.current = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_states_always_move_to_expanded() {
        for prefer_forward in [true, false] {
            assert_eq!(CardState::Collapsed.next(prefer_forward), CardState::Expanded);
            assert_eq!(
                CardState::FullyExpanded.next(prefer_forward),
                CardState::Expanded
            );
        }
    }

    #[test]
    fn expanded_follows_preference() {
        assert_eq!(CardState::Expanded.next(true), CardState::FullyExpanded);
        assert_eq!(CardState::Expanded.next(false), CardState::Collapsed);
    }

    #[test]
    fn next_is_always_adjacent() {
        for state in CardState::ALL {
            for prefer_forward in [true, false] {
                assert!(state.is_adjacent(state.next(prefer_forward)));
            }
        }
        assert!(!CardState::Collapsed.is_adjacent(CardState::FullyExpanded));
        assert!(!CardState::Expanded.is_adjacent(CardState::Expanded));
    }

    #[test]
    fn zero_translation_is_forward() {
        assert_eq!(
            TransitionDirection::from_translation(0.0),
            TransitionDirection::Forward
        );
        assert_eq!(
            TransitionDirection::from_translation(-3.0),
            TransitionDirection::Forward
        );
        assert_eq!(
            TransitionDirection::from_translation(0.5),
            TransitionDirection::Backward
        );
    }

    #[test]
    fn commit_replaces_current_state() {
        let mut machine = CardStateMachine::default();
        assert_eq!(machine.current(), CardState::Collapsed);
        assert!(machine.prefers_forward());

        machine.commit(CardState::FullyExpanded);
        assert_eq!(machine.current(), CardState::FullyExpanded);

        machine.commit(CardState::Expanded);
        machine.set_prefers_forward(false);
        assert_eq!(machine.next_guess(), CardState::Collapsed);
    }
}
