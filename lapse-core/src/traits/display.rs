//! Text display trait for the two-row character panel

use crate::display::Screen;

/// Errors that can occur while writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the display failed
    Bus,
    /// Display was not initialized
    NotInitialized,
}

/// Character display with a fixed number of rows
pub trait TextDisplay {
    /// Move the cursor to the start of `row` and write `text`
    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Write every row of a screen
    fn render(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        for (row, text) in screen.rows().enumerate() {
            self.write_row(row as u8, text)?;
        }
        Ok(())
    }
}
