//! Hardware drivers and adapters behind the port traits.

#[cfg(feature = "avr")]
pub mod avr;
pub mod hal_inputs;
pub mod pcint;
