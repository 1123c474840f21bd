//! Error types for dish geometry and field storage.

use std::error::Error;
use std::fmt;

/// Errors from dish construction and field-store operations.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// The bounding box has zero cells per side.
    ZeroSize,
    /// The disk radius is non-positive, non-finite, or exceeds the
    /// half-width of the bounding box.
    RadiusOutOfRange {
        /// The configured radius.
        radius: f32,
        /// The largest radius the box can hold.
        max: f32,
    },
    /// A chemical name appears twice in the registration list.
    DuplicateChemical {
        /// The duplicated name.
        name: String,
    },
    /// A command referenced a chemical layer that was never registered.
    UnknownChemical {
        /// The unresolved name.
        name: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "dish size must be at least 1 cell"),
            Self::RadiusOutOfRange { radius, max } => {
                write!(f, "dish radius {radius} outside (0, {max}]")
            }
            Self::DuplicateChemical { name } => {
                write!(f, "chemical '{name}' registered twice")
            }
            Self::UnknownChemical { name } => write!(f, "unknown chemical '{name}'"),
        }
    }
}

impl Error for FieldError {}
