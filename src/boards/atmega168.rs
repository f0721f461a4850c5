//! Bare ATmega168 boards.
//!
//! The light barrier uses D0/D1 (PD0/PD1 = PCINT16/17), which are not
//! external-interrupt pins on this part.  Each channel gets its own PCMSK2
//! bit, computed as `1 << interrupt_number`, and the interrupt number is
//! simply the pin number.
//!
//! Two layouts share the chip: the controller, which also carries a
//! push-button, and the sensor head, which swaps the two barrier lines.

use super::{BoardProfile, DisplayPins, InterruptNumbering, MaskLayout};
use crate::pins::PcintGroup;

const DISPLAY: DisplayPins = DisplayPins {
    bcd: [8, 9, 10, 11],
    lamp_test: 15,
    blank: 14,
    latch_enable: [16, 17, 18, 19],
};

pub const ATMEGA168_CONTROLLER: BoardProfile = BoardProfile {
    name: "atmega168-controller",
    interrupt_pin0: 0,
    interrupt_pin1: 1,
    group: PcintGroup::PortD,
    mask_layout: MaskLayout::PerChannel,
    numbering: InterruptNumbering::Identity,
    button: Some(2),
    display: DISPLAY,
};

pub const ATMEGA168_BARRIER: BoardProfile = BoardProfile {
    name: "atmega168-barrier",
    interrupt_pin0: 1,
    interrupt_pin1: 0,
    group: PcintGroup::PortD,
    mask_layout: MaskLayout::PerChannel,
    numbering: InterruptNumbering::Identity,
    button: None,
    display: DISPLAY,
};
