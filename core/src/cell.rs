use core::fmt;
use serde::{Deserialize, Serialize};

/// What a cell shows on the rendered grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[default]
    Hidden,
    Adjacent(u8),
    Flagged,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Hidden => f.write_str("_"),
            Label::Adjacent(count) => write!(f, "{count}"),
            Label::Flagged => f.write_str("X"),
        }
    }
}

/// One grid position. Both flags only ever go from `false` to `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    label: Label,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn label(&self) -> Label {
        self.label
    }

    pub fn set_mine(&mut self) {
        self.is_mine = true;
    }

    /// Marks the cell revealed, returns `false` if it already was.
    pub fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.is_revealed, true)
    }

    pub fn set_label(&mut self, label: Label) {
        self.label = label;
    }
}
