//! Light-barrier interrupt layer for ATmega168/328 boards.
//!
//! The light barrier's two sensor lines sit on pins that only have
//! pin-change interrupts.  This crate emulates per-channel, edge-triggered
//! interrupts on top of them and hands each detected edge to one of two
//! fixed callbacks supplied by the firmware.
//!
//! ```text
//! pin level change ──▶ PCINTn vector ──▶ EdgeEmulator::on_pin_change
//!                                          ├─ sample D(int0) ─▶ trigger_int0
//!                                          └─ sample D(int1) ─▶ trigger_int1
//! ```
//!
//! Everything except the `avr` backend builds on the host, which is where
//! the tests run.

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

pub mod boards;
pub mod drivers;
pub mod edge;
pub mod error;
pub mod pins;
pub mod ports;
pub mod shared;

pub use boards::BoardProfile;
pub use edge::{Channel, Direction, EdgeEmulator, InterruptController};
pub use shared::SharedEdgeInterrupts;
