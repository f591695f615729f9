//! Referee controls.
//!
//! The host polls its devices and hands the engine one `InputState` per
//! tick. `InputFrame` is the plain-data implementation used by the CLI, the
//! autopilot and tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Whistle,
    /// Punch, or bribe when the ice-cream truck is close
    Context,
}

pub trait InputState {
    /// Went down this tick.
    fn was_pressed(&self, control: Control) -> bool;
    /// Went up this tick.
    fn was_released(&self, control: Control) -> bool;
    fn is_held(&self, control: Control) -> bool;
}

/// No controls touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputState for NoInput {
    fn was_pressed(&self, _: Control) -> bool {
        false
    }

    fn was_released(&self, _: Control) -> bool {
        false
    }

    fn is_held(&self, _: Control) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pressed: BTreeSet<Control>,
    released: BTreeSet<Control>,
    held: BTreeSet<Control>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) -> &mut Self {
        self.pressed.insert(control);
        self.held.insert(control);
        self
    }

    pub fn release(&mut self, control: Control) -> &mut Self {
        self.released.insert(control);
        self.held.remove(&control);
        self
    }

    /// Single-tick tap: pressed and already up again.
    pub fn tap(control: Control) -> Self {
        let mut frame = Self::new();
        frame.pressed.insert(control);
        frame
    }

    /// Frame for the next tick: held controls stay held, edges clear.
    pub fn next(&self) -> Self {
        Self { pressed: BTreeSet::new(), released: BTreeSet::new(), held: self.held.clone() }
    }

    pub fn held(&self) -> impl Iterator<Item = Control> + '_ {
        self.held.iter().copied()
    }
}

impl InputState for InputFrame {
    fn was_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn was_released(&self, control: Control) -> bool {
        self.released.contains(&control)
    }

    fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_edges() {
        let mut frame = InputFrame::new();
        frame.press(Control::Left);
        assert!(frame.was_pressed(Control::Left));
        assert!(frame.is_held(Control::Left));

        let mut next = frame.next();
        assert!(!next.was_pressed(Control::Left));
        assert!(next.is_held(Control::Left));

        next.release(Control::Left);
        assert!(next.was_released(Control::Left));
        assert!(!next.is_held(Control::Left));
    }

    #[test]
    fn test_tap_is_not_held() {
        let frame = InputFrame::tap(Control::Whistle);
        assert!(frame.was_pressed(Control::Whistle));
        assert!(!frame.is_held(Control::Whistle));
    }

    #[test]
    fn test_no_input() {
        assert!(!NoInput.was_pressed(Control::Context));
        assert!(!NoInput.is_held(Control::Up));
    }
}
