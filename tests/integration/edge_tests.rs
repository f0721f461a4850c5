//! Edge emulation against the simulated pin-change hardware.
//!
//! Covers direction matching, detach, the shared direction across
//! channels, and the both-channels-per-vector sampling.

use lichtschranke::boards::{self, atmega168::ATMEGA168_CONTROLLER, uno::ARDUINO_UNO};
use lichtschranke::{Channel, Direction};

use super::mock_hw::{emulator, SimMcu};

const DIRECTIONS: [Direction; 2] = [Direction::Rising, Direction::Falling];

/// Level at which a line sits when it does not match `direction`.
fn idle_level(direction: Direction) -> bool {
    direction == Direction::Falling
}

fn other(channel: Channel) -> Channel {
    match channel {
        Channel::Int0 => Channel::Int1,
        Channel::Int1 => Channel::Int0,
    }
}

// ── Direction matching ────────────────────────────────────────

#[test]
fn matching_transition_fires_only_that_channel() {
    for profile in boards::ALL {
        for direction in DIRECTIONS {
            for channel in Channel::ALL {
                let mcu = SimMcu::new(profile);
                let idle = idle_level(direction);
                mcu.set_level(profile.interrupt_pin(Channel::Int0), idle);
                mcu.set_level(profile.interrupt_pin(Channel::Int1), idle);

                let mut emu = emulator(&mcu);
                emu.attach(channel, direction);

                assert!(mcu.drive_channel(&mut emu, channel, !idle));
                let mut expected = [0; 2];
                expected[channel.index() as usize] = 1;
                assert_eq!(
                    mcu.fired(),
                    expected,
                    "{} {:?} {:?}: matching edge",
                    profile.name(),
                    direction,
                    channel
                );

                // Back to idle is the opposite edge.
                assert!(mcu.drive_channel(&mut emu, channel, idle));
                assert_eq!(
                    mcu.fired(),
                    expected,
                    "{} {:?} {:?}: opposite edge",
                    profile.name(),
                    direction,
                    channel
                );
            }
        }
    }
}

#[test]
fn uno_rising_on_pin0_fires_trigger_int0_once() {
    let mcu = SimMcu::new(&ARDUINO_UNO);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Rising);

    // D2 low → high, D3 stays low.
    assert!(mcu.drive(&mut emu, 2, true));

    assert_eq!(mcu.fired(), [1, 0]);
    assert_eq!(mcu.history(), vec![Channel::Int0]);
}

#[test]
fn no_vector_before_attach() {
    for profile in boards::ALL {
        let mcu = SimMcu::new(profile);
        let mut emu = emulator(&mcu);
        for channel in Channel::ALL {
            assert!(!mcu.drive_channel(&mut emu, channel, true));
            assert!(!mcu.drive_channel(&mut emu, channel, false));
        }
        assert_eq!(mcu.fired(), [0, 0], "{}", profile.name());
    }
}

#[test]
fn unchanged_level_raises_no_vector() {
    let mcu = SimMcu::new(&ATMEGA168_CONTROLLER);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Falling);
    assert!(!mcu.drive_channel(&mut emu, Channel::Int0, false));
    assert_eq!(mcu.fired(), [0, 0]);
}

// ── Detach ────────────────────────────────────────────────────

#[test]
fn detached_channel_never_fires_from_its_pin() {
    for profile in boards::ALL {
        for direction in DIRECTIONS {
            for channel in Channel::ALL {
                let mcu = SimMcu::new(profile);
                let mut emu = emulator(&mcu);
                emu.attach(channel, direction);
                emu.detach(channel);
                assert!(!emu.is_armed(channel));

                for high in [true, false, true, false] {
                    mcu.drive_channel(&mut emu, channel, high);
                }
                assert_eq!(
                    mcu.fired()[channel.index() as usize],
                    0,
                    "{} {:?} {:?}",
                    profile.name(),
                    direction,
                    channel
                );
            }
        }
    }
}

#[test]
fn detach_keeps_the_direction() {
    let mcu = SimMcu::new(&ATMEGA168_CONTROLLER);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Falling);
    emu.detach(Channel::Int0);
    assert_eq!(emu.mode(), Direction::Falling);
}

#[test]
fn uno_detach_of_either_channel_disarms_both() {
    let mcu = SimMcu::new(&ARDUINO_UNO);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Rising);
    emu.attach(Channel::Int1, Direction::Rising);
    emu.detach(Channel::Int1);

    assert!(!emu.is_armed(Channel::Int0));
    assert!(!mcu.drive_channel(&mut emu, Channel::Int0, true));
    assert_eq!(mcu.fired(), [0, 0]);
}

#[test]
fn per_channel_detach_leaves_the_other_channel_armed() {
    let mcu = SimMcu::new(&ATMEGA168_CONTROLLER);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Rising);
    emu.attach(Channel::Int1, Direction::Rising);
    emu.detach(Channel::Int0);

    assert!(emu.is_armed(Channel::Int1));
    assert!(mcu.drive_channel(&mut emu, Channel::Int1, true));
    assert_eq!(mcu.fired(), [0, 1]);
}

// ── Shared direction ──────────────────────────────────────────

#[test]
fn attach_on_one_channel_changes_the_other_channels_direction() {
    for profile in boards::ALL {
        let mcu = SimMcu::new(profile);
        let mut emu = emulator(&mcu);
        emu.attach(Channel::Int1, Direction::Rising);
        emu.attach(Channel::Int0, Direction::Falling);

        assert!(mcu.drive_channel(&mut emu, Channel::Int1, true));
        assert_eq!(mcu.fired()[1], 0, "{}", profile.name());
    }
}

#[test]
fn direction_applies_to_both_channels_after_any_attach() {
    let mcu = SimMcu::new(&ATMEGA168_CONTROLLER);
    let mut emu = emulator(&mcu);
    mcu.set_level(0, true);
    mcu.set_level(1, true);
    emu.attach(Channel::Int0, Direction::Rising);
    emu.attach(Channel::Int1, Direction::Falling);

    // Channel 0 was attached as Rising but now triggers on Falling.
    assert!(mcu.drive_channel(&mut emu, Channel::Int0, false));
    assert_eq!(mcu.fired(), [1, 0]);
}

// ── Both channels sampled per vector ──────────────────────────

#[test]
fn vector_samples_both_channels() {
    let mcu = SimMcu::new(&ATMEGA168_CONTROLLER);
    let mut emu = emulator(&mcu);
    emu.attach(Channel::Int0, Direction::Rising);

    // Channel 1 is detached but already high when channel 0 rises.
    mcu.set_level(1, true);
    assert!(mcu.drive_channel(&mut emu, Channel::Int0, true));
    assert_eq!(mcu.history(), vec![Channel::Int0, Channel::Int1]);
}

#[test]
fn change_on_one_line_can_fire_the_other() {
    for profile in boards::ALL {
        for channel in Channel::ALL {
            let mcu = SimMcu::new(profile);
            let mut emu = emulator(&mcu);
            emu.attach(Channel::Int0, Direction::Rising);
            emu.attach(Channel::Int1, Direction::Rising);

            mcu.drive_channel(&mut emu, other(channel), true);
            mcu.clear_fired();

            // Falling edge on `channel`: only the still-high other line matches.
            assert!(mcu.drive_channel(&mut emu, channel, true));
            mcu.clear_fired();
            assert!(mcu.drive_channel(&mut emu, channel, false));
            assert_eq!(mcu.history(), vec![other(channel)], "{}", profile.name());
        }
    }
}
