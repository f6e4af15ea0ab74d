//! Held-key tracking
//!
//! Hosts deliver key events; the simulation wants "which controls are down
//! this tick". Terminals that report releases give exact hold spans. The
//! rest only report presses (plus auto-repeat), so a press counts as held
//! for a fixed number of ticks and each repeat extends it.

use crate::sim::TickInput;

/// The four logical movement controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::P1Up,
        Control::P1Down,
        Control::P2Up,
        Control::P2Down,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// What the host can tell us about keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyReporting {
    /// Press and release events are both delivered
    PressRelease,
    /// Only presses; each holds the key for `hold_ticks`
    PressOnly { hold_ticks: u32 },
}

/// Turns key events into per-tick control snapshots
#[derive(Debug, Clone)]
pub struct KeyTracker {
    reporting: KeyReporting,
    /// First tick at which each control is no longer held
    held_until: [u64; 4],
    now: u64,
}

impl KeyTracker {
    pub fn new(reporting: KeyReporting) -> Self {
        Self {
            reporting,
            held_until: [0; 4],
            now: 0,
        }
    }

    pub fn reporting(&self) -> KeyReporting {
        self.reporting
    }

    /// Key went down (or auto-repeated)
    pub fn press(&mut self, control: Control) {
        self.held_until[control.index()] = match self.reporting {
            KeyReporting::PressRelease => u64::MAX,
            KeyReporting::PressOnly { hold_ticks } => self.now + u64::from(hold_ticks),
        };
    }

    pub fn release(&mut self, control: Control) {
        self.held_until[control.index()] = 0;
    }

    /// Drop every held key, e.g. when the host loses focus
    pub fn release_all(&mut self) {
        self.held_until = [0; 4];
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.now < self.held_until[control.index()]
    }

    /// Controls held for the current tick; advances to the next tick
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            p1_up: self.is_held(Control::P1Up),
            p1_down: self.is_held(Control::P1Down),
            p2_up: self.is_held(Control::P2Up),
            p2_down: self.is_held(Control::P2Down),
        };
        self.now += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut keys = KeyTracker::new(KeyReporting::PressRelease);
        assert!(keys.snapshot().is_idle());

        keys.press(Control::P1Up);
        for _ in 0..100 {
            assert!(keys.snapshot().p1_up);
        }
        keys.release(Control::P1Up);
        assert!(keys.snapshot().is_idle());
    }

    #[test]
    fn test_press_only_expires() {
        let mut keys = KeyTracker::new(KeyReporting::PressOnly { hold_ticks: 3 });
        keys.press(Control::P2Down);
        for _ in 0..3 {
            let input = keys.snapshot();
            assert!(input.p2_down && !input.p2_up);
        }
        assert!(!keys.snapshot().p2_down);
    }

    #[test]
    fn test_repeat_extends_hold() {
        let mut keys = KeyTracker::new(KeyReporting::PressOnly { hold_ticks: 2 });
        keys.press(Control::P1Down);
        keys.snapshot();
        keys.press(Control::P1Down);
        assert!(keys.snapshot().p1_down);
        assert!(keys.snapshot().p1_down);
        assert!(!keys.snapshot().p1_down);
    }

    #[test]
    fn test_opposite_keys_both_reported() {
        let mut keys = KeyTracker::new(KeyReporting::PressRelease);
        keys.press(Control::P1Up);
        keys.press(Control::P1Down);
        let input = keys.snapshot();
        assert!(input.p1_up && input.p1_down);
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyTracker::new(KeyReporting::PressRelease);
        for c in Control::ALL {
            keys.press(c);
        }
        keys.release_all();
        assert!(keys.snapshot().is_idle());
    }
}
