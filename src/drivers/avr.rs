//! AVR backend: PCICR / PCMSKn and PINx through `avr-device`, plus a
//! blocking USART0 `log` backend.
//!
//! Only compiled with the `avr` feature.  The chip module follows the
//! selected board feature.

use core::fmt::{self, Write};
use core::marker::PhantomData;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

#[cfg(feature = "board-uno")]
use avr_device::atmega328p as mcu;
#[cfg(any(feature = "board-atmega168", feature = "board-atmega168-barrier"))]
use avr_device::atmega168 as mcu;

use crate::pins::{self, PcintGroup};
use crate::ports::{MaskRegister, PinLevels};

fn exint() -> &'static mcu::exint::RegisterBlock {
    // SAFETY: only `Pcicr` and `Pcmsk` dereference this, and both are
    // created from the one `EXINT` singleton consumed by `split_exint`.
    unsafe { &*mcu::EXINT::ptr() }
}

/// Split the external-interrupt peripheral into the group enable register
/// and the mask register of `group`.
pub fn split_exint(_exint: mcu::EXINT, group: PcintGroup) -> (Pcicr, Pcmsk) {
    (Pcicr { _owned: PhantomData }, Pcmsk { group })
}

/// Pin Change Interrupt Control Register.
pub struct Pcicr {
    _owned: PhantomData<()>,
}

impl MaskRegister for Pcicr {
    fn read(&self) -> u8 {
        exint().pcicr().read().bits()
    }

    fn enable(&mut self, mask: u8) {
        // SAFETY: PCIE0..2 are the only implemented bits; reserved bits
        // read back as zero and are written back unchanged.
        exint().pcicr().modify(|r, w| unsafe { w.bits(r.bits() | mask) });
    }

    fn disable(&mut self, mask: u8) {
        // SAFETY: see `enable`.
        exint().pcicr().modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
    }
}

/// Pin Change Mask Register for one group.
pub struct Pcmsk {
    group: PcintGroup,
}

impl MaskRegister for Pcmsk {
    fn read(&self) -> u8 {
        match self.group {
            PcintGroup::PortB => exint().pcmsk0().read().bits(),
            PcintGroup::PortC => exint().pcmsk1().read().bits(),
            PcintGroup::PortD => exint().pcmsk2().read().bits(),
        }
    }

    fn enable(&mut self, mask: u8) {
        // SAFETY: every PCMSKn bit selects one pin; any value is valid.
        match self.group {
            PcintGroup::PortB => exint().pcmsk0().modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
            PcintGroup::PortC => exint().pcmsk1().modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
            PcintGroup::PortD => exint().pcmsk2().modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
        };
    }

    fn disable(&mut self, mask: u8) {
        // SAFETY: see `enable`.
        match self.group {
            PcintGroup::PortB => exint().pcmsk0().modify(|r, w| unsafe { w.bits(r.bits() & !mask) }),
            PcintGroup::PortC => exint().pcmsk1().modify(|r, w| unsafe { w.bits(r.bits() & !mask) }),
            PcintGroup::PortD => exint().pcmsk2().modify(|r, w| unsafe { w.bits(r.bits() & !mask) }),
        };
    }
}

/// Reads PINB / PINC / PIND.  Sensor pins are inputs after reset, so no
/// direction setup is needed.
pub struct PortPins {
    portb: mcu::PORTB,
    portc: mcu::PORTC,
    portd: mcu::PORTD,
}

impl PortPins {
    pub fn new(portb: mcu::PORTB, portc: mcu::PORTC, portd: mcu::PORTD) -> Self {
        Self { portb, portc, portd }
    }
}

impl PinLevels for PortPins {
    fn is_high(&mut self, pin: u8) -> bool {
        let Some(pb) = pins::port_bit(pin) else {
            return false;
        };
        let levels = match pb.group {
            PcintGroup::PortB => self.portb.pinb().read().bits(),
            PcintGroup::PortC => self.portc.pinc().read().bits(),
            PcintGroup::PortD => self.portd.pind().read().bits(),
        };
        levels & pb.mask() != 0
    }
}

// ---------------------------------------------------------------------------
// Serial logger
// ---------------------------------------------------------------------------

const UDRE0: u8 = 5;
const TXEN0: u8 = 3;
const UCSZ00: u8 = 1;

fn usart0() -> &'static mcu::usart0::RegisterBlock {
    // SAFETY: only `SerialLogger` touches USART0, after `install_logger`
    // consumed the peripheral.
    unsafe { &*mcu::USART0::ptr() }
}

struct Tx;

impl Write for Tx {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let usart = usart0();
        for byte in s.bytes() {
            while usart.ucsr0a().read().bits() & (1 << UDRE0) == 0 {}
            // SAFETY: UDR0 accepts any byte.
            usart.udr0().write(|w| unsafe { w.bits(byte) });
        }
        Ok(())
    }
}

/// Writes one line per record to USART0.  Blocks until the line is out,
/// so keep it away from vector context.
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let _ = write!(Tx, "{} {}: {}\r\n", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Configure USART0 for 8N1 at `baud` and register [`SerialLogger`].
///
/// Must run once, before interrupts are enabled.
pub fn install_logger(
    _usart: mcu::USART0,
    cpu_hz: u32,
    baud: u32,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    let ubrr = (cpu_hz / (16 * baud)).saturating_sub(1) as u16;
    let usart = usart0();
    // SAFETY: baud divisor, transmitter enable and 8-bit frame are all
    // documented values for these registers.
    usart.ubrr0().write(|w| unsafe { w.bits(ubrr) });
    usart.ucsr0b().write(|w| unsafe { w.bits(1 << TXEN0) });
    usart.ucsr0c().write(|w| unsafe { w.bits(0b11 << UCSZ00) });

    // SAFETY: AVR has no atomic CAS; this runs single-threaded with
    // interrupts still disabled.
    unsafe {
        log::set_logger_racy(&LOGGER)?;
        log::set_max_level_racy(level);
    }
    Ok(())
}
