//! PCF8574 backpack wiring
//!
//! The common "LCD1602 I2C" backpack wires the expander as:
//!
//! | Bit | Signal     |
//! |-----|------------|
//! | P0  | RS         |
//! | P1  | RW         |
//! | P2  | EN         |
//! | P3  | Backlight  |
//! | P4  | D4         |
//! | P5  | D5         |
//! | P6  | D6         |
//! | P7  | D7         |

/// Register select: data when set, command when clear
pub const RS: u8 = 1 << 0;
/// Read/write: held low, the driver never reads
pub const RW: u8 = 1 << 1;
/// Enable strobe
pub const EN: u8 = 1 << 2;
/// Backlight transistor
pub const BACKLIGHT: u8 = 1 << 3;

/// Expander byte with `nibble` on D4..D7 and control `flags` on P0..P3
pub const fn nibble_byte(nibble: u8, flags: u8) -> u8 {
    ((nibble & 0x0F) << 4) | (flags & 0x0F)
}

/// Strobe a nibble: EN high then low, as one bus transfer
pub const fn strobe(nibble: u8, flags: u8) -> [u8; 2] {
    let byte = nibble_byte(nibble, flags) & !RW;
    [byte | EN, byte & !EN]
}
