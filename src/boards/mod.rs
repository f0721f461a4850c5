//! Board profiles — the build-time pin map and register layout.
//!
//! A [`BoardProfile`] fixes which Arduino pins carry the two light-barrier
//! channels, which pin-change group they live in, how the mask bits for a
//! channel are derived, and how pin numbers translate to interrupt numbers.
//! Display pins ride along as passive data for the display driver; nothing
//! in this crate drives them.
//!
//! Every shipped profile is checked by [`BoardProfile::validate`] during
//! const evaluation, so a wrong pin or mask is a build error.
//!
//! ## Selection
//!
//! Exactly one profile is [`ACTIVE`] per build, chosen by Cargo feature:
//!
//! | Feature                   | Profile                            |
//! |---------------------------|------------------------------------|
//! | `board-uno` (default)     | [`uno::ARDUINO_UNO`]               |
//! | `board-atmega168`         | [`atmega168::ATMEGA168_CONTROLLER`] |
//! | `board-atmega168-barrier` | [`atmega168::ATMEGA168_BARRIER`]    |

pub mod atmega168;
pub mod uno;

use serde::Serialize;

use crate::edge::Channel;
use crate::error::{ProfileError, Result};
use crate::pins::{self, PcintGroup};

#[cfg(any(
    all(feature = "board-uno", feature = "board-atmega168"),
    all(feature = "board-uno", feature = "board-atmega168-barrier"),
    all(feature = "board-atmega168", feature = "board-atmega168-barrier"),
))]
compile_error!("select exactly one board-* feature (use --no-default-features)");

/// The profile selected for this build.
#[cfg(feature = "board-uno")]
pub const ACTIVE: &BoardProfile = &uno::ARDUINO_UNO;
/// The profile selected for this build.
#[cfg(feature = "board-atmega168")]
pub const ACTIVE: &BoardProfile = &atmega168::ATMEGA168_CONTROLLER;
/// The profile selected for this build.
#[cfg(feature = "board-atmega168-barrier")]
pub const ACTIVE: &BoardProfile = &atmega168::ATMEGA168_BARRIER;

/// Every profile this crate ships.
pub const ALL: [&BoardProfile; 3] = [
    &uno::ARDUINO_UNO,
    &atmega168::ATMEGA168_CONTROLLER,
    &atmega168::ATMEGA168_BARRIER,
];

const _: () = assert!(uno::ARDUINO_UNO.validate().is_ok());
const _: () = assert!(atmega168::ATMEGA168_CONTROLLER.validate().is_ok());
const _: () = assert!(atmega168::ATMEGA168_BARRIER.validate().is_ok());

// ---------------------------------------------------------------------------
// Layout policies
// ---------------------------------------------------------------------------

/// How a channel's pin-change mask bits are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaskLayout {
    /// Both sensor bits are set and cleared together, whichever channel is
    /// named.  Detaching either channel disarms both.
    Combined(u8),
    /// One bit per channel: `1 << interrupt_number`.
    PerChannel,
}

/// How Arduino pin numbers map to the interrupt numbers accepted by
/// `attach_interrupt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterruptNumbering {
    /// Arduino core numbering for INT0/INT1: D2 → 0, D3 → 1.
    External,
    /// The interrupt number is the pin number itself.
    Identity,
}

impl InterruptNumbering {
    pub const fn interrupt_for_pin(self, pin: u8) -> Option<u8> {
        match self {
            Self::External => match pin {
                2 => Some(0),
                3 => Some(1),
                _ => None,
            },
            Self::Identity => Some(pin),
        }
    }
}

/// Pins owned by the multiplexed BCD display driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayPins {
    /// BCD data lines A, B, C, D (shared by all digits).
    pub bcd: [u8; 4],
    /// Lamp test, active low.
    pub lamp_test: u8,
    /// Blanking input, active low.
    pub blank: u8,
    /// Per-digit latch enables, digit 0 first.
    pub latch_enable: [u8; 4],
}

// ---------------------------------------------------------------------------
// BoardProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardProfile {
    name: &'static str,
    interrupt_pin0: u8,
    interrupt_pin1: u8,
    group: PcintGroup,
    mask_layout: MaskLayout,
    numbering: InterruptNumbering,
    button: Option<u8>,
    display: DisplayPins,
}

impl BoardProfile {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Physical pin wired to the given light-barrier channel.
    pub const fn interrupt_pin(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Int0 => self.interrupt_pin0,
            Channel::Int1 => self.interrupt_pin1,
        }
    }

    pub const fn group(&self) -> PcintGroup {
        self.group
    }

    /// PCICR bits that enable this profile's pin-change group.
    pub const fn group_enable_mask(&self) -> u8 {
        self.group.enable_mask()
    }

    pub const fn mask_layout(&self) -> MaskLayout {
        self.mask_layout
    }

    pub const fn numbering(&self) -> InterruptNumbering {
        self.numbering
    }

    /// Push-button input, if this board has one.
    pub const fn button(&self) -> Option<u8> {
        self.button
    }

    pub const fn display(&self) -> &DisplayPins {
        &self.display
    }

    /// PCMSK bits armed by `attach(channel)` and disarmed by `detach(channel)`.
    pub const fn channel_mask(&self, channel: Channel) -> u8 {
        match self.mask_layout {
            MaskLayout::Combined(bits) => bits,
            MaskLayout::PerChannel => {
                match self.numbering.interrupt_for_pin(self.interrupt_pin(channel)) {
                    Some(n) if n < 8 => 1 << n,
                    _ => 0,
                }
            }
        }
    }

    /// The port bits of both sensor pins, independent of the mask layout.
    pub const fn sensor_bits(&self) -> u8 {
        let mut bits = 0;
        if let Some(pb) = pins::port_bit(self.interrupt_pin0) {
            bits |= pb.mask();
        }
        if let Some(pb) = pins::port_bit(self.interrupt_pin1) {
            bits |= pb.mask();
        }
        bits
    }

    /// Equivalent of Arduino's `digitalPinToInterrupt`.
    pub const fn digital_pin_to_interrupt(&self, pin: u8) -> Option<u8> {
        self.numbering.interrupt_for_pin(pin)
    }

    /// Resolve an interrupt number back to the sensor channel it belongs to.
    pub fn channel_for_interrupt(&self, interrupt: u8) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|&ch| self.digital_pin_to_interrupt(self.interrupt_pin(ch)) == Some(interrupt))
    }

    /// Check that pins, group, numbering and mask agree with the silicon.
    pub const fn validate(&self) -> Result<()> {
        if self.interrupt_pin0 == self.interrupt_pin1 {
            return Err(ProfileError::DuplicateSensorPin(self.interrupt_pin0));
        }

        let sensor_pins = [self.interrupt_pin0, self.interrupt_pin1];
        let mut i = 0;
        while i < sensor_pins.len() {
            let pin = sensor_pins[i];
            let Some(pb) = pins::port_bit(pin) else {
                return Err(ProfileError::PinOutOfRange(pin));
            };
            if pb.group as u8 != self.group as u8 {
                return Err(ProfileError::PinOutsideGroup(pin));
            }
            let Some(n) = self.numbering.interrupt_for_pin(pin) else {
                return Err(ProfileError::NotAnInterrupt(pin));
            };
            if let MaskLayout::PerChannel = self.mask_layout {
                let actual = if n < 8 { 1 << n } else { 0 };
                if actual != pb.mask() {
                    return Err(ProfileError::MaskMismatch { expected: pb.mask(), actual });
                }
            }
            i += 1;
        }

        if let MaskLayout::Combined(bits) = self.mask_layout {
            let expected = self.sensor_bits();
            if bits != expected {
                return Err(ProfileError::MaskMismatch { expected, actual: bits });
            }
        }
        Ok(())
    }
}
