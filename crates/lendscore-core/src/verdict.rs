//! Verdict: the class a classifier assigns to one application.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Predicted default status for one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Class 0.
    NonDefaulter,
    /// Class 1.
    Defaulter,
}

impl Verdict {
    /// Map a classifier class index to a verdict. Only 0 and 1 are valid.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Self::NonDefaulter),
            1 => Some(Self::Defaulter),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::NonDefaulter => 0,
            Self::Defaulter => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NonDefaulter => "Non-Defaulter",
            Self::Defaulter => "Defaulter",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
