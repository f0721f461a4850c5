//! Edge-triggered interrupt emulation on top of pin-change interrupts.
//!
//! The light-barrier pins only have PCINT: one vector per port, fired on
//! any level change of any unmasked pin, with no hint of which pin moved or
//! in which direction.  [`EdgeEmulator`] rebuilds the usual
//! "attach handler to pin, fire on RISING/FALLING" contract on top of it.
//!
//! ## Shared direction
//!
//! There is **one** [`Direction`] for both channels.  Every `attach` call
//! overwrites it, whichever channel it names.  Firmware that attaches
//! channel 0 as `Falling` after channel 1 as `Rising` gets both channels on
//! `Falling`.  Consumers calibrated against this behaviour depend on it.
//!
//! ## Vector handling
//!
//! On each pin-change vector both sensor pins are sampled.  A channel fires
//! when its pin's level is HIGH for `Rising` or LOW for `Falling`.  Both
//! channels are checked on every vector, not just the pin that changed, so
//! a change on one line can fire the other channel when that line happens
//! to sit at the matching level.  This is a level check, not a true edge
//! detector; downstream debouncing expects it.
//!
//! ## Channel state machine
//!
//! ```text
//! Detached ──attach──▶ Armed ──vector, level matches──▶ callback ─┐
//!    ▲                   ▲ └──────────────────────────────────────┘
//!    └──────detach───────┘
//! ```
//!
//! "Armed" is not stored anywhere; it is the channel's bits in PCMSKn.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::boards::BoardProfile;
use crate::ports::{PinChangeRegisters, PinLevels, TriggerSink};

/// Trigger direction.  Defaults to `Rising` at power-on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Rising,
    Falling,
}

/// One of the two fixed light-barrier channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Reported through `trigger_int0`.
    Int0,
    /// Reported through `trigger_int1`.
    Int1,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Int0, Channel::Int1];

    pub const fn index(self) -> u8 {
        self as u8
    }
}

// ───────────────────────────────────────────────────────────────
// Arduino-shaped interface
// ───────────────────────────────────────────────────────────────

/// The platform's `attachInterrupt` / `detachInterrupt` /
/// `digitalPinToInterrupt` trio.  Callers written against it cannot tell
/// whether a native external interrupt or the PCINT emulation sits behind
/// it.
pub trait InterruptController {
    /// `handler` is accepted for signature compatibility and ignored: the
    /// light-barrier callbacks are fixed.
    fn attach_interrupt(&mut self, interrupt: u8, handler: fn(), mode: Direction);

    fn detach_interrupt(&mut self, interrupt: u8);

    fn digital_pin_to_interrupt(&self, pin: u8) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// EdgeEmulator
// ───────────────────────────────────────────────────────────────

pub struct EdgeEmulator<R, P, T> {
    profile: &'static BoardProfile,
    registers: R,
    pins: P,
    triggers: T,
    mode: Direction,
}

impl<R, P, T> EdgeEmulator<R, P, T>
where
    R: PinChangeRegisters,
    P: PinLevels,
    T: TriggerSink,
{
    /// Build the emulator.  Both channels start detached; the direction
    /// starts as `Rising`.  Call [`init`](Self::init) before attaching.
    pub fn new(profile: &'static BoardProfile, registers: R, pins: P, triggers: T) -> Self {
        Self {
            profile,
            registers,
            pins,
            triggers,
            mode: Direction::default(),
        }
    }

    /// Enable the profile's pin-change group.  Idempotent.
    pub fn init(&mut self) {
        self.registers.enable_group();
        info!(
            "edge: {} ready (int0=D{}, int1=D{}, group {:?})",
            self.profile.name(),
            self.profile.interrupt_pin(Channel::Int0),
            self.profile.interrupt_pin(Channel::Int1),
            self.profile.group()
        );
    }

    /// Set the shared direction and arm `channel`.
    pub fn attach(&mut self, channel: Channel, direction: Direction) {
        self.mode = direction;
        let bits = self.profile.channel_mask(channel);
        self.registers.set_mask(bits);
        debug!("edge: attach {:?} {:?} (mask +{:#010b})", channel, direction, bits);
    }

    /// Disarm `channel`.  The shared direction is left as is.
    pub fn detach(&mut self, channel: Channel) {
        let bits = self.profile.channel_mask(channel);
        self.registers.clear_mask(bits);
        debug!("edge: detach {:?} (mask -{:#010b})", channel, bits);
    }

    /// Pin-change vector body.  Runs with interrupts disabled; never logs.
    pub fn on_pin_change(&mut self) {
        let want_high = self.mode == Direction::Rising;
        for channel in Channel::ALL {
            let pin = self.profile.interrupt_pin(channel);
            if self.pins.is_high(pin) == want_high {
                match channel {
                    Channel::Int0 => self.triggers.trigger_int0(),
                    Channel::Int1 => self.triggers.trigger_int1(),
                }
            }
        }
    }

    /// The direction both channels currently trigger on.
    pub fn mode(&self) -> Direction {
        self.mode
    }

    /// Whether all of `channel`'s mask bits are set.
    pub fn is_armed(&self, channel: Channel) -> bool {
        let bits = self.profile.channel_mask(channel);
        self.registers.mask() & bits == bits
    }

    pub fn profile(&self) -> &'static BoardProfile {
        self.profile
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    pub fn triggers(&self) -> &T {
        &self.triggers
    }
}

impl<R, P, T> InterruptController for EdgeEmulator<R, P, T>
where
    R: PinChangeRegisters,
    P: PinLevels,
    T: TriggerSink,
{
    fn attach_interrupt(&mut self, interrupt: u8, _handler: fn(), mode: Direction) {
        match self.profile.channel_for_interrupt(interrupt) {
            Some(channel) => self.attach(channel, mode),
            None => warn!("edge: attach ignored, interrupt {} is not a sensor channel", interrupt),
        }
    }

    fn detach_interrupt(&mut self, interrupt: u8) {
        match self.profile.channel_for_interrupt(interrupt) {
            Some(channel) => self.detach(channel),
            None => warn!("edge: detach ignored, interrupt {} is not a sensor channel", interrupt),
        }
    }

    fn digital_pin_to_interrupt(&self, pin: u8) -> Option<u8> {
        self.profile.digital_pin_to_interrupt(pin)
    }
}
