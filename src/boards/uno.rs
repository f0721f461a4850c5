//! Arduino Uno (ATmega328P).
//!
//! The light barrier sits on D2/D3 (PD2/PD3 = PCINT18/19).  Both channels
//! are armed and disarmed together through a fixed two-bit PCMSK2 pattern,
//! and interrupt numbers follow the Arduino core (D2 → 0, D3 → 1) so
//! existing `attach_interrupt(digital_pin_to_interrupt(..))` calls keep
//! working unchanged.

use super::{BoardProfile, DisplayPins, InterruptNumbering, MaskLayout};
use crate::pins::PcintGroup;

/// PCMSK2 bits for PD2 and PD3.
pub const SENSOR_MASK: u8 = 0b0000_1100;

pub const ARDUINO_UNO: BoardProfile = BoardProfile {
    name: "arduino-uno",
    interrupt_pin0: 2,
    interrupt_pin1: 3,
    group: PcintGroup::PortD,
    mask_layout: MaskLayout::Combined(SENSOR_MASK),
    numbering: InterruptNumbering::External,
    button: None,
    display: DisplayPins {
        bcd: [12, 13, 4, 5],
        lamp_test: 6,
        blank: 7,
        latch_enable: [8, 9, 10, 11],
    },
};
