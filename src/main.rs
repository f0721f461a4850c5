//! Light-barrier firmware — AVR entry point.
//!
//! Wires the active board profile to the PCINT vectors:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  PCINT0/1/2 vectors ──▶ LIGHT_BARRIER.on_vector(group)   │
//! │                              │                           │
//! │                    EdgeEmulator (ACTIVE profile)         │
//! │                  Pcicr · Pcmsk · PortPins                │
//! │                              │                           │
//! │                 trigger_int0 / trigger_int1              │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use core::cell::Cell;

use critical_section::Mutex;
use log::{info, LevelFilter};

use lichtschranke::boards::ACTIVE;
use lichtschranke::drivers::avr::{self, Pcicr, Pcmsk, PortPins};
use lichtschranke::drivers::pcint::PinChangeDriver;
use lichtschranke::pins::PcintGroup;
use lichtschranke::ports::FnTriggers;
use lichtschranke::{Channel, Direction, EdgeEmulator, SharedEdgeInterrupts};

#[cfg(feature = "board-uno")]
use avr_device::atmega328p as mcu;
#[cfg(any(feature = "board-atmega168", feature = "board-atmega168-barrier"))]
use avr_device::atmega168 as mcu;

type LightBarrier = SharedEdgeInterrupts<PinChangeDriver<Pcicr, Pcmsk>, PortPins, FnTriggers>;

static LIGHT_BARRIER: LightBarrier = SharedEdgeInterrupts::new();

const CPU_HZ: u32 = 16_000_000;
const LOG_BAUD: u32 = 9_600;

/// Passes seen per channel since boot, reported by the main loop.
static PASSES: Mutex<Cell<[u16; 2]>> = Mutex::new(Cell::new([0; 2]));

fn count_pass(channel: Channel) {
    critical_section::with(|cs| {
        let cell = PASSES.borrow(cs);
        let mut passes = cell.get();
        let slot = &mut passes[channel.index() as usize];
        *slot = slot.wrapping_add(1);
        cell.set(passes);
    });
}

fn trigger_int0() {
    count_pass(Channel::Int0);
}

fn trigger_int1() {
    count_pass(Channel::Int1);
}

// ── Vectors ───────────────────────────────────────────────────

macro_rules! define_isr {
    ($chip:ident: $($name:ident => $group:expr),+ $(,)?) => {
        $(
            #[avr_device::interrupt($chip)]
            fn $name() {
                LIGHT_BARRIER.on_vector($group);
            }
        )+
    };
}

#[cfg(feature = "board-uno")]
define_isr!(atmega328p:
    PCINT0 => PcintGroup::PortB,
    PCINT1 => PcintGroup::PortC,
    PCINT2 => PcintGroup::PortD,
);

#[cfg(any(feature = "board-atmega168", feature = "board-atmega168-barrier"))]
define_isr!(atmega168:
    PCINT0 => PcintGroup::PortB,
    PCINT1 => PcintGroup::PortC,
    PCINT2 => PcintGroup::PortD,
);

// ── Main ──────────────────────────────────────────────────────

#[avr_device::entry]
fn main() -> ! {
    let Some(dp) = mcu::Peripherals::take() else {
        // Peripherals already taken: nothing sane left to do.
        halt();
    };

    let _ = avr::install_logger(dp.USART0, CPU_HZ, LOG_BAUD, LevelFilter::Info);

    let (pcicr, pcmsk) = avr::split_exint(dp.EXINT, ACTIVE.group());
    let registers = PinChangeDriver::new(pcicr, pcmsk, ACTIVE);
    let pins = PortPins::new(dp.PORTB, dp.PORTC, dp.PORTD);
    let triggers = FnTriggers {
        int0: trigger_int0,
        int1: trigger_int1,
    };

    LIGHT_BARRIER.install(EdgeEmulator::new(ACTIVE, registers, pins, triggers));
    LIGHT_BARRIER.attach(Channel::Int0, Direction::Rising);
    LIGHT_BARRIER.attach(Channel::Int1, Direction::Rising);
    info!("{}: light barrier armed", ACTIVE.name());

    // SAFETY: all shared state is initialised above.
    unsafe { avr_device::interrupt::enable() };

    let mut reported = [0u16; 2];
    loop {
        avr_device::asm::sleep();
        let passes = critical_section::with(|cs| PASSES.borrow(cs).get());
        if passes != reported {
            info!("passes: int0={} int1={}", passes[0], passes[1]);
            reported = passes;
        }
    }
}

fn halt() -> ! {
    avr_device::interrupt::disable();
    loop {
        avr_device::asm::nop();
    }
}

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    halt();
}
