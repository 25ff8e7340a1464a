//! Time-window button debouncing
//!
//! A press is accepted whenever the button reads held and at least one
//! debounce window has passed since the last accepted press. Release is not
//! tracked: holding a button repeats the press once per window, which is
//! what makes "hold UP" ramp a value.

use crate::input::button::{Button, ButtonLevels, Presses};
use crate::time::{has_elapsed, Tick};

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: Tick = 150;

/// Debouncer for a single button
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    /// Tick of the last accepted press
    last_pressed: Tick,
    /// Minimum ticks between accepted presses
    window: Tick,
}

impl ButtonDebouncer {
    /// Create a debouncer
    ///
    /// The last-press stamp starts at `now`, so a button held through power
    /// up is not accepted until one window has passed.
    pub fn new(window: Tick, now: Tick) -> Self {
        Self {
            last_pressed: now,
            window,
        }
    }

    /// Feed one sample; returns true when a press is accepted
    pub fn sample(&mut self, held: bool, now: Tick) -> bool {
        if held && has_elapsed(now, self.last_pressed, self.window) {
            self.last_pressed = now;
            true
        } else {
            false
        }
    }

    /// Tick of the last accepted press
    pub fn last_pressed(&self) -> Tick {
        self.last_pressed
    }

    /// Debounce window (ms)
    pub fn window(&self) -> Tick {
        self.window
    }
}

/// One debouncer per button, indexed by [`Button::index`]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBank {
    debouncers: [ButtonDebouncer; Button::COUNT],
}

impl ButtonBank {
    /// Create a bank with the same window for every button
    pub fn new(window: Tick, now: Tick) -> Self {
        Self {
            debouncers: [ButtonDebouncer::new(window, now); Button::COUNT],
        }
    }

    /// Sample every button and return the accepted presses
    pub fn poll(&mut self, levels: ButtonLevels, now: Tick) -> Presses {
        let mut presses = Presses::NONE;
        for button in Button::ALL {
            if self.debouncers[button.index()].sample(levels.is_pressed(button), now) {
                presses.insert(button);
            }
        }
        presses
    }

    /// Debouncer for one button
    pub fn debouncer(&self, button: Button) -> &ButtonDebouncer {
        &self.debouncers[button.index()]
    }
}
