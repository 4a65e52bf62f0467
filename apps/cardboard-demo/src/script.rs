//! The scripted session the demo replays.

use cardboard_ui::{CardState, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Put the pointer down at an absolute height.
    Press(f32),
    /// Put the pointer down just below the card's live top edge.
    Grab,
    /// Move the pointer relative to where it last was.
    MoveBy(f32),
    Release,
    /// Programmatic trigger, as a tap on the handle would.
    Toggle,
    Resize(Size),
    /// Let frames run for this many milliseconds.
    Wait(u64),
    /// Run frames until nothing is animating, then check the resting state.
    Settle(CardState),
}

fn swipe(from: f32, distance: f32, moves: usize) -> Vec<Step> {
    let mut steps = vec![Step::Press(from)];
    let moves = moves.max(1);
    steps.extend((0..moves).map(|_| Step::MoveBy(distance / moves as f32)));
    steps.push(Step::Release);
    steps
}

/// Expand by dragging, interrupt the next animation and reverse it, then
/// use the programmatic trigger around a container resize.
pub fn session() -> Vec<Step> {
    let mut steps = Vec::new();
    // The collapsed card's top edge sits at 724 in an 844pt container.
    steps.extend(swipe(760.0, -120.0, 12));
    steps.push(Step::Settle(CardState::Expanded));

    steps.extend(swipe(660.0, -100.0, 10));
    steps.push(Step::Wait(120));
    steps.push(Step::Grab);
    steps.extend([10.0, 20.0, 30.0, 40.0, 40.0].map(Step::MoveBy));
    steps.push(Step::Release);
    steps.push(Step::Settle(CardState::Collapsed));

    steps.push(Step::Toggle);
    steps.push(Step::Settle(CardState::Expanded));
    steps.push(Step::Resize(Size::new(390.0, 700.0)));
    // The interrupted drag last went down, so the toggle collapses.
    steps.push(Step::Toggle);
    steps.push(Step::Settle(CardState::Collapsed));
    steps
}
