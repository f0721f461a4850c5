//! Simulated ATmega pin-change hardware for integration tests.
//!
//! [`SimMcu`] owns PCICR, one PCMSKn, the digital pin levels, and the
//! trigger counters.  The emulator gets lightweight handles into it, so a
//! test can drive pin levels and inspect registers while the emulator
//! holds its "hardware".
//!
//! A pin change raises the group vector exactly like the silicon: only if
//! the level actually changed, the pin is in the profile's group, its
//! PCMSKn bit is set, and the group is enabled in PCICR.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use lichtschranke::boards::BoardProfile;
use lichtschranke::drivers::pcint::PinChangeDriver;
use lichtschranke::pins;
use lichtschranke::ports::{MaskRegister, PinLevels, TriggerSink};
use lichtschranke::{Channel, EdgeEmulator};

// ── SimMcu ────────────────────────────────────────────────────

pub struct SimMcu {
    profile: &'static BoardProfile,
    pcicr: Cell<u8>,
    pcmsk: Cell<u8>,
    levels: Cell<u32>,
    fired: Cell<[u32; 2]>,
    history: RefCell<Vec<Channel>>,
}

impl SimMcu {
    pub fn new(profile: &'static BoardProfile) -> Self {
        Self {
            profile,
            pcicr: Cell::new(0),
            pcmsk: Cell::new(0),
            levels: Cell::new(0),
            fired: Cell::new([0; 2]),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Start with unrelated PCMSKn bits already set by other firmware.
    pub fn with_mask(profile: &'static BoardProfile, pcmsk: u8) -> Self {
        let mcu = Self::new(profile);
        mcu.pcmsk.set(pcmsk);
        mcu
    }

    pub fn registers(&self) -> PinChangeDriver<SimReg<'_>, SimReg<'_>> {
        PinChangeDriver::new(SimReg(&self.pcicr), SimReg(&self.pcmsk), self.profile)
    }

    pub fn pins(&self) -> SimPins<'_> {
        SimPins(&self.levels)
    }

    pub fn triggers(&self) -> SimTriggers<'_> {
        SimTriggers {
            fired: &self.fired,
            history: &self.history,
        }
    }

    pub fn pcicr(&self) -> u8 {
        self.pcicr.get()
    }

    pub fn pcmsk(&self) -> u8 {
        self.pcmsk.get()
    }

    pub fn level(&self, pin: u8) -> bool {
        self.levels.get() & (1 << pin) != 0
    }

    /// `[trigger_int0 calls, trigger_int1 calls]`.
    pub fn fired(&self) -> [u32; 2] {
        self.fired.get()
    }

    pub fn history(&self) -> Vec<Channel> {
        self.history.borrow().clone()
    }

    pub fn clear_fired(&self) {
        self.fired.set([0; 2]);
        self.history.borrow_mut().clear();
    }

    /// Change a pin level.  Returns `true` when the group's PCINT vector
    /// would be raised.
    pub fn set_level(&self, pin: u8, high: bool) -> bool {
        let before = self.level(pin);
        let levels = self.levels.get();
        self.levels.set(if high { levels | 1 << pin } else { levels & !(1 << pin) });
        if before == high {
            return false;
        }

        let Some(pb) = pins::port_bit(pin) else {
            return false;
        };
        pb.group == self.profile.group()
            && self.pcicr.get() & self.profile.group_enable_mask() != 0
            && self.pcmsk.get() & pb.mask() != 0
    }

    /// Change a pin level and run the vector if the hardware would.
    pub fn drive(&self, emu: &mut SimEmulator<'_>, pin: u8, high: bool) -> bool {
        let raised = self.set_level(pin, high);
        if raised {
            emu.on_pin_change();
        }
        raised
    }

    /// Change a channel's pin level and run the vector if the hardware would.
    pub fn drive_channel(&self, emu: &mut SimEmulator<'_>, channel: Channel, high: bool) -> bool {
        self.drive(emu, self.profile.interrupt_pin(channel), high)
    }
}

pub type SimEmulator<'a> =
    EdgeEmulator<PinChangeDriver<SimReg<'a>, SimReg<'a>>, SimPins<'a>, SimTriggers<'a>>;

/// Build an initialised emulator over `mcu`.
pub fn emulator(mcu: &SimMcu) -> SimEmulator<'_> {
    let mut emu = EdgeEmulator::new(mcu.profile, mcu.registers(), mcu.pins(), mcu.triggers());
    emu.init();
    emu
}

// ── Handles ───────────────────────────────────────────────────

pub struct SimReg<'a>(&'a Cell<u8>);

impl MaskRegister for SimReg<'_> {
    fn read(&self) -> u8 {
        self.0.get()
    }

    fn enable(&mut self, mask: u8) {
        self.0.set(self.0.get() | mask);
    }

    fn disable(&mut self, mask: u8) {
        self.0.set(self.0.get() & !mask);
    }
}

pub struct SimPins<'a>(&'a Cell<u32>);

impl PinLevels for SimPins<'_> {
    fn is_high(&mut self, pin: u8) -> bool {
        self.0.get() & (1 << pin) != 0
    }
}

pub struct SimTriggers<'a> {
    fired: &'a Cell<[u32; 2]>,
    history: &'a RefCell<Vec<Channel>>,
}

impl SimTriggers<'_> {
    fn record(&mut self, channel: Channel) {
        let mut fired = self.fired.get();
        fired[channel.index() as usize] += 1;
        self.fired.set(fired);
        self.history.borrow_mut().push(channel);
    }
}

impl TriggerSink for SimTriggers<'_> {
    fn trigger_int0(&mut self) {
        self.record(Channel::Int0);
    }

    fn trigger_int1(&mut self) {
        self.record(Channel::Int1);
    }
}
