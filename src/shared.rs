//! The one process-wide emulator instance, shared between the foreground
//! and the pin-change vector.
//!
//! [`SharedEdgeInterrupts`] is built in a `static` with [`new`], receives
//! its [`EdgeEmulator`] once at startup via [`install`], and lives until
//! power-off.  Every access runs inside a critical section, so
//! `attach`/`detach` cannot interleave with the vector.  Only the
//! registration interface is exposed; there is no way to borrow the
//! emulator from arbitrary call sites.
//!
//! Trigger callbacks run while the vector holds the emulator.  A callback
//! that calls back into the same instance is ignored with a warning
//! (queries answer as if not installed) instead of panicking.
//!
//! [`new`]: SharedEdgeInterrupts::new
//! [`install`]: SharedEdgeInterrupts::install

use core::cell::RefCell;

use critical_section::Mutex;
use log::warn;

use crate::edge::{Channel, Direction, EdgeEmulator, InterruptController};
use crate::pins::PcintGroup;
use crate::ports::{PinChangeRegisters, PinLevels, TriggerSink};

pub struct SharedEdgeInterrupts<R, P, T> {
    inner: Mutex<RefCell<Option<EdgeEmulator<R, P, T>>>>,
}

impl<R, P, T> SharedEdgeInterrupts<R, P, T>
where
    R: PinChangeRegisters,
    P: PinLevels,
    T: TriggerSink,
{
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Take ownership of the emulator and enable its pin-change group.
    /// A second install is refused and the offered emulator dropped.
    pub fn install(&self, mut emulator: EdgeEmulator<R, P, T>) -> bool {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            if slot.is_some() {
                return false;
            }
            emulator.init();
            *slot = Some(emulator);
            true
        })
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    pub fn attach(&self, channel: Channel, direction: Direction) {
        self.with(|emu| emu.attach(channel, direction));
    }

    pub fn detach(&self, channel: Channel) {
        self.with(|emu| emu.detach(channel));
    }

    /// See [`InterruptController::attach_interrupt`].
    pub fn attach_interrupt(&self, interrupt: u8, handler: fn(), mode: Direction) {
        self.with(|emu| emu.attach_interrupt(interrupt, handler, mode));
    }

    /// See [`InterruptController::detach_interrupt`].
    pub fn detach_interrupt(&self, interrupt: u8) {
        self.with(|emu| emu.detach_interrupt(interrupt));
    }

    pub fn digital_pin_to_interrupt(&self, pin: u8) -> Option<u8> {
        self.peek(|emu| emu.digital_pin_to_interrupt(pin)).flatten()
    }

    pub fn mode(&self) -> Option<Direction> {
        self.peek(EdgeEmulator::mode)
    }

    pub fn is_armed(&self, channel: Channel) -> bool {
        self.peek(|emu| emu.is_armed(channel)).unwrap_or(false)
    }

    /// Entry point for a PCINT vector.  Firmware may route every PCINT
    /// vector here; vectors of other groups are ignored.  Does nothing
    /// before `install`.
    pub fn on_vector(&self, group: PcintGroup) {
        critical_section::with(|cs| {
            let Ok(mut slot) = self.inner.borrow(cs).try_borrow_mut() else {
                return;
            };
            if let Some(emu) = slot.as_mut() {
                if emu.profile().group() == group {
                    emu.on_pin_change();
                }
            }
        });
    }

    fn with(&self, f: impl FnOnce(&mut EdgeEmulator<R, P, T>)) {
        let outcome = critical_section::with(|cs| match self.inner.borrow(cs).try_borrow_mut() {
            Ok(mut slot) => Some(slot.as_mut().map(f).is_some()),
            Err(_) => None,
        });
        match outcome {
            Some(true) => {}
            Some(false) => warn!("edge: not installed, call ignored"),
            None => warn!("edge: called from a trigger callback, call ignored"),
        }
    }

    fn peek<U>(&self, f: impl FnOnce(&EdgeEmulator<R, P, T>) -> U) -> Option<U> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow()
                .ok()
                .and_then(|slot| slot.as_ref().map(f))
        })
    }
}

impl<R, P, T> Default for SharedEdgeInterrupts<R, P, T>
where
    R: PinChangeRegisters,
    P: PinLevels,
    T: TriggerSink,
{
    fn default() -> Self {
        Self::new()
    }
}
