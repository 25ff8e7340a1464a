//! Button identities and per-tick level/press sets

/// The three menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Increase / switch on
    Up,
    /// Decrease / switch off
    Down,
    /// Cycle to the next parameter
    Mode,
}

impl Button {
    /// Number of buttons
    pub const COUNT: usize = 3;

    /// All buttons in index order
    pub const ALL: [Button; Self::COUNT] = [Button::Up, Button::Down, Button::Mode];

    /// Stable index for per-button tables
    pub const fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Mode => 2,
        }
    }

    const fn mask(self) -> u8 {
        1 << self.index()
    }
}

/// Raw "held down" state of every button for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    /// UP held
    pub up: bool,
    /// DOWN held
    pub down: bool,
    /// MODE held
    pub mode: bool,
}

impl ButtonLevels {
    /// Nothing held
    pub const NONE: Self = Self {
        up: false,
        down: false,
        mode: false,
    };

    /// Only `button` held
    pub fn only(button: Button) -> Self {
        Self::NONE.with(button)
    }

    /// Copy with `button` held as well
    pub fn with(mut self, button: Button) -> Self {
        match button {
            Button::Up => self.up = true,
            Button::Down => self.down = true,
            Button::Mode => self.mode = true,
        }
        self
    }

    /// Check if `button` is held
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Mode => self.mode,
        }
    }
}

/// Debounced presses accepted on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presses(u8);

impl Presses {
    /// No presses
    pub const NONE: Self = Self(0);

    /// Record a press
    pub fn insert(&mut self, button: Button) {
        self.0 |= button.mask();
    }

    /// Check if `button` was pressed
    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// True if nothing was pressed
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Pressed buttons in index order
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}
