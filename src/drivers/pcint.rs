//! Pin-change register driver.
//!
//! Wraps the group enable register (PCICR) and the group's mask register
//! (PCMSKn).  The driver knows nothing about channels or directions; it
//! only sets and clears bits.
//!
//! AVR has no atomic bit-set for PCMSKn, so every read-modify-write runs
//! inside a critical section.  The vector handler never sees a half-written
//! mask.

use log::debug;

use crate::boards::BoardProfile;
use crate::ports::{MaskRegister, PinChangeRegisters};

/// Driver over a control register `C` (PCICR) and a mask register `M`
/// (PCMSKn).
pub struct PinChangeDriver<C, M> {
    control: C,
    mask: M,
    group_bits: u8,
}

impl<C: MaskRegister, M: MaskRegister> PinChangeDriver<C, M> {
    pub fn new(control: C, mask: M, profile: &BoardProfile) -> Self {
        Self {
            control,
            mask,
            group_bits: profile.group_enable_mask(),
        }
    }

    /// Current control register contents.
    pub fn control(&self) -> u8 {
        self.control.read()
    }

    /// Release the underlying registers.
    pub fn release(self) -> (C, M) {
        (self.control, self.mask)
    }
}

impl<C: MaskRegister, M: MaskRegister> PinChangeRegisters for PinChangeDriver<C, M> {
    fn enable_group(&mut self) {
        critical_section::with(|_| self.control.enable(self.group_bits));
        debug!("pcint: group enable {:#05b}", self.group_bits);
    }

    fn set_mask(&mut self, bits: u8) {
        critical_section::with(|_| self.mask.enable(bits));
    }

    fn clear_mask(&mut self, bits: u8) {
        critical_section::with(|_| self.mask.disable(bits));
    }

    fn mask(&self) -> u8 {
        self.mask.read()
    }
}

// ── RAM-backed register ───────────────────────────────────────

/// A register that lives in RAM.  Stands in for PCICR/PCMSKn on the host
/// and in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowRegister(u8);

impl ShadowRegister {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }
}

impl MaskRegister for ShadowRegister {
    fn read(&self) -> u8 {
        self.0
    }

    fn enable(&mut self, mask: u8) {
        self.0 |= mask;
    }

    fn disable(&mut self, mask: u8) {
        self.0 &= !mask;
    }
}
