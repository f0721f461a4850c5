//! Error types for board profile validation.
//!
//! The interrupt layer itself has no runtime failure path: register writes
//! and pin reads always succeed.  The only thing that can be wrong is a
//! board profile whose pins or mask bits do not match the silicon, and that
//! is caught while the profile constants are const-evaluated.  All variants
//! are `Copy` so `BoardProfile::validate` stays a `const fn`.

use core::fmt;

// ---------------------------------------------------------------------------
// Profile errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// A sensor pin number has no port mapping on this MCU family.
    PinOutOfRange(u8),
    /// A sensor pin lives on a different port than the profile's group.
    PinOutsideGroup(u8),
    /// Both sensor channels were assigned the same physical pin.
    DuplicateSensorPin(u8),
    /// The pin has no interrupt number under the profile's numbering.
    NotAnInterrupt(u8),
    /// The combined mask does not equal the two sensor pins' bits.
    MaskMismatch { expected: u8, actual: u8 },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinOutOfRange(pin) => write!(f, "pin D{pin} out of range"),
            Self::PinOutsideGroup(pin) => write!(f, "pin D{pin} outside pin-change group"),
            Self::DuplicateSensorPin(pin) => write!(f, "pin D{pin} used by both channels"),
            Self::NotAnInterrupt(pin) => write!(f, "pin D{pin} has no interrupt number"),
            Self::MaskMismatch { expected, actual } => {
                write!(f, "mask {actual:#010b} does not match sensor bits {expected:#010b}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ProfileError>;
