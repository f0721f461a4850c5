//! [`PinLevels`] over two `embedded-hal` input pins.
//!
//! Lets the emulator run on any HAL that hands out typed GPIO inputs.  The
//! vector handler has no error path, so a failed read is taken as LOW.

use embedded_hal::digital::InputPin;

use crate::boards::BoardProfile;
use crate::edge::Channel;
use crate::ports::PinLevels;

pub struct HalInputs<P0, P1> {
    pin0: u8,
    input0: P0,
    pin1: u8,
    input1: P1,
}

impl<P0: InputPin, P1: InputPin> HalInputs<P0, P1> {
    /// `input0` must be the pin wired to channel 0 of `profile`, `input1`
    /// the one wired to channel 1.
    pub fn new(profile: &BoardProfile, input0: P0, input1: P1) -> Self {
        Self {
            pin0: profile.interrupt_pin(Channel::Int0),
            input0,
            pin1: profile.interrupt_pin(Channel::Int1),
            input1,
        }
    }

    pub fn release(self) -> (P0, P1) {
        (self.input0, self.input1)
    }
}

impl<P0: InputPin, P1: InputPin> PinLevels for HalInputs<P0, P1> {
    fn is_high(&mut self, pin: u8) -> bool {
        if pin == self.pin0 {
            self.input0.is_high().unwrap_or(false)
        } else if pin == self.pin1 {
            self.input1.is_high().unwrap_or(false)
        } else {
            false
        }
    }
}
