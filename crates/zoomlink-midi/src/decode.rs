//! Zoom R16/R24 byte mapping
//!
//! In DAW-control mode the recorder sends on MIDI channel 1:
//! - Note On (0x90) for buttons: velocity 127 = press, 0 = release
//! - CC 60 (0xB0) for the jog wheel: 1 = clockwise, 65 = anticlockwise
//! - Pitch bend (0xE0-0xE8) for faders 1-8 and the master fader
//!
//! Transport buttons may additionally arrive as MMC SysEx. Anything outside
//! this table decodes to `None` and never reaches the session.

use midly::live::LiveEvent;
use midly::MidiMessage;
use zoomlink_core::{ControllerId, ControllerInputEvent, Slot};

const NOTE_ON_CH1: u8 = 0x90;
const CONTROL_CHANGE_CH1: u8 = 0xB0;

const JOG_CC: u8 = 60;
const JOG_CLOCKWISE: u8 = 1;
const JOG_ANTICLOCKWISE: u8 = 65;

/// Pitch bend channel (0-based) of the master fader
const MASTER_FADER_CHANNEL: u8 = 8;

const VELOCITY_PRESS: u8 = 127;
const VELOCITY_RELEASE: u8 = 0;

/// Decode one raw MIDI message into a controller event
pub fn decode(bytes: &[u8]) -> Option<ControllerInputEvent> {
    let status = *bytes.first()?;
    if status == 0xF0 {
        return decode_mmc(bytes);
    }

    let LiveEvent::Midi { channel, message } = LiveEvent::parse(bytes).ok()? else {
        return None;
    };

    match message {
        // midly keeps velocity-0 note-ons as NoteOn; the raw status decides
        MidiMessage::NoteOn { key, vel } | MidiMessage::NoteOff { key, vel }
            if status == NOTE_ON_CH1 =>
        {
            button(key.as_int(), vel.as_int())
        }
        MidiMessage::Controller { controller, value } if status == CONTROL_CHANGE_CH1 => {
            jog(controller.as_int(), value.as_int())
        }
        MidiMessage::PitchBend { bend } => {
            // Only the most significant 7 bits carry the fader position
            let value = (bend.0.as_int() >> 7) as u8;
            fader(channel.as_int(), value)
        }
        _ => None,
    }
}

fn button(note: u8, velocity: u8) -> Option<ControllerInputEvent> {
    let control = match note {
        // Three rows of buttons (play, mute, rec) per channel strip
        0..=23 => ControllerId::Pmr(Slot::new(usize::from(note % 8))?),
        46 => ControllerId::BankDown,
        47 => ControllerId::BankUp,
        54 => ControllerId::F1,
        55 => ControllerId::F2,
        56 => ControllerId::F3,
        57 => ControllerId::F4,
        58 => ControllerId::F5,
        91 => ControllerId::Rew,
        92 => ControllerId::Ff,
        93 => ControllerId::Stop,
        94 => ControllerId::Play,
        95 => ControllerId::Rec,
        96 => ControllerId::Up,
        97 => ControllerId::Down,
        98 => ControllerId::Left,
        99 => ControllerId::Right,
        _ => return None,
    };

    match velocity {
        VELOCITY_PRESS => Some(ControllerInputEvent::on(control)),
        VELOCITY_RELEASE => Some(ControllerInputEvent::off(control)),
        _ => None,
    }
}

fn jog(controller: u8, value: u8) -> Option<ControllerInputEvent> {
    match (controller, value) {
        (JOG_CC, JOG_CLOCKWISE) => Some(ControllerInputEvent::on(ControllerId::JogWheel)),
        (JOG_CC, JOG_ANTICLOCKWISE) => Some(ControllerInputEvent::off(ControllerId::JogWheel)),
        _ => None,
    }
}

fn fader(channel: u8, value: u8) -> Option<ControllerInputEvent> {
    let control = if channel == MASTER_FADER_CHANNEL {
        ControllerId::MasterFader
    } else {
        ControllerId::Fader(Slot::new(usize::from(channel))?)
    };
    Some(ControllerInputEvent::with_value(control, value))
}

/// MIDI Machine Control: `F0 7F 7F 06 <command> F7` (all-call device id)
fn decode_mmc(bytes: &[u8]) -> Option<ControllerInputEvent> {
    let &[0xF0, 0x7F, 0x7F, 0x06, command, 0xF7] = bytes else {
        return None;
    };
    let control = match command {
        0x01 => ControllerId::Stop,
        0x02 => ControllerId::Play,
        0x04 => ControllerId::Ff,
        0x05 => ControllerId::Rew,
        0x06 => ControllerId::Rec,
        _ => return None,
    };
    Some(ControllerInputEvent::on(control))
}
