//! Arduino digital pin numbers → AVR port / bit for the ATmega168/328 family.
//!
//! Single source of truth for "which register bit is pin Dn".  Board
//! profiles only name Arduino pin numbers; everything that touches a
//! register goes through [`port_bit`].
//!
//! | Arduino pins | Port  | PCINT group | Mask register |
//! |--------------|-------|-------------|---------------|
//! | D0 – D7      | PORTD | 2           | PCMSK2        |
//! | D8 – D13     | PORTB | 0           | PCMSK0        |
//! | D14 – D19    | PORTC | 1           | PCMSK1        |

use serde::Serialize;

/// Highest Arduino digital pin number on the 28-pin ATmega168/328.
pub const MAX_PIN: u8 = 19;

/// One of the three pin-change interrupt groups.  The discriminant is the
/// group's bit index in PCICR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum PcintGroup {
    /// PORTB, PCINT0..7, vector `PCINT0`.
    PortB = 0,
    /// PORTC, PCINT8..14, vector `PCINT1`.
    PortC = 1,
    /// PORTD, PCINT16..23, vector `PCINT2`.
    PortD = 2,
}

impl PcintGroup {
    /// Bit pattern for PCICR that enables this group.
    pub const fn enable_mask(self) -> u8 {
        1 << self as u8
    }
}

/// Location of a digital pin inside its port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBit {
    pub group: PcintGroup,
    pub bit: u8,
}

impl PortBit {
    /// Single-bit mask for this pin within its port / PCMSK register.
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }
}

/// Map an Arduino digital pin to its port and bit.
/// Returns `None` for pins that do not exist on this MCU family.
pub const fn port_bit(pin: u8) -> Option<PortBit> {
    match pin {
        0..=7 => Some(PortBit { group: PcintGroup::PortD, bit: pin }),
        8..=13 => Some(PortBit { group: PcintGroup::PortB, bit: pin - 8 }),
        14..=MAX_PIN => Some(PortBit { group: PcintGroup::PortC, bit: pin - 14 }),
        _ => None,
    }
}
