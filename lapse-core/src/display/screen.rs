//! Fixed-width screen buffer

use heapless::String;

use crate::config::MAX_LCD_COLUMNS;

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 2;

/// One row of text
pub type Line = String<MAX_LCD_COLUMNS>;

/// Screen content, every row padded to exactly `columns` characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
    columns: u8,
}

impl Screen {
    /// Blank screen `columns` wide (capped at [`MAX_LCD_COLUMNS`])
    pub fn new(columns: u8) -> Self {
        let columns = columns.min(MAX_LCD_COLUMNS as u8);
        let mut screen = Self {
            lines: core::array::from_fn(|_| String::new()),
            columns,
        };
        for row in 0..SCREEN_ROWS {
            screen.set_row(row, "");
        }
        screen
    }

    /// Set the content of a row, padding with spaces or truncating
    pub fn set_row(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let width = self.columns as usize;
        line.clear();
        for c in text.chars().take(width) {
            if line.push(c).is_err() {
                break;
            }
        }
        while line.len() < width {
            if line.push(' ').is_err() {
                break;
            }
        }
    }

    /// Content of a row
    pub fn row(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// All rows, top first
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Row width in characters
    pub fn columns(&self) -> u8 {
        self.columns
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[{} | {}]", self.lines[0].as_str(), self.lines[1].as_str());
    }
}
