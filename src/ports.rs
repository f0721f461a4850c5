//! Port traits — the boundary between the edge emulator and the hardware.
//!
//! ```text
//!   MaskRegister ──▶ PinChangeRegisters ──▶ ┌──────────────┐
//!   PinLevels ────────────────────────────▶ │ EdgeEmulator │ ──▶ TriggerSink
//!                                           └──────────────┘
//! ```
//!
//! Each backend (AVR registers, embedded-hal pins, the host simulation in
//! the integration tests) implements these traits.  The emulator consumes
//! them via generics, so the backend is fixed at composition time and no
//! call goes through a vtable.

// ───────────────────────────────────────────────────────────────
// Registers
// ───────────────────────────────────────────────────────────────

/// An owned, 8-bit memory-mapped register.
pub trait MaskRegister {
    fn read(&self) -> u8;

    /// OR `mask` into the register.
    fn enable(&mut self, mask: u8);

    /// Clear the bits of `mask` from the register.
    fn disable(&mut self, mask: u8);
}

/// The pin-change interrupt controller for one PCINT group.
pub trait PinChangeRegisters {
    /// Turn on pin-change sensing for the group.  Idempotent.
    fn enable_group(&mut self);

    /// Deliver change notifications for the pins in `bits`.
    fn set_mask(&mut self, bits: u8);

    /// Stop change notifications for the pins in `bits`.
    fn clear_mask(&mut self, bits: u8);

    /// Current mask register contents.
    fn mask(&self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Pin levels
// ───────────────────────────────────────────────────────────────

/// Live digital level of a pin, by Arduino pin number (`digitalRead`).
///
/// Called from interrupt context: implementations must not block.
pub trait PinLevels {
    fn is_high(&mut self, pin: u8) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Trigger callbacks
// ───────────────────────────────────────────────────────────────

/// The two fixed light-barrier callbacks provided by the consuming firmware.
///
/// Called from interrupt context.
pub trait TriggerSink {
    fn trigger_int0(&mut self);
    fn trigger_int1(&mut self);
}

/// Plain function pointers, for firmware that defines the callbacks as
/// free functions.
#[derive(Debug, Clone, Copy)]
pub struct FnTriggers {
    pub int0: fn(),
    pub int1: fn(),
}

impl TriggerSink for FnTriggers {
    fn trigger_int0(&mut self) {
        (self.int0)();
    }

    fn trigger_int1(&mut self) {
        (self.int1)();
    }
}
