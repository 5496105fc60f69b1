//! Input event vocabulary
//!
//! Two disjoint sources feed the reducer:
//! - [`ControllerInputEvent`]: produced by the decoder from raw controller bytes
//! - [`HostStateEvent`]: produced by the host observer bridge
//!
//! Both are unioned into [`InputEvent`].

use crate::model::{Layout, BANK_SIZE};

/// On-screen fader/button position within a bank (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    /// All slots in order
    pub const ALL: [Slot; BANK_SIZE] = [
        Slot(0),
        Slot(1),
        Slot(2),
        Slot(3),
        Slot(4),
        Slot(5),
        Slot(6),
        Slot(7),
    ];

    /// Create a slot, `None` if `index >= BANK_SIZE`
    pub const fn new(index: usize) -> Option<Self> {
        if index < BANK_SIZE {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    /// Zero-based index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// One-based number as printed on the hardware
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

/// Every control on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerId {
    // Transport
    Rew,
    Ff,
    Stop,
    Play,
    Rec,

    // Function keys
    /// Shift latch
    F1,
    /// Ctrl latch
    F2,
    /// Layout cycle
    F3,
    /// Unassigned
    F4,
    /// Mode toggle
    F5,

    /// Jog wheel: `On` = clockwise, `Off` = anticlockwise
    JogWheel,

    // Navigation
    Up,
    Down,
    Left,
    Right,

    /// Channel fader 1-8
    Fader(Slot),
    MasterFader,

    /// Play/Mute/Record button above each fader
    Pmr(Slot),

    BankDown,
    BankUp,
}

/// Button edge (or jog direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    On,
    Off,
}

/// Decoded controller message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerInputEvent {
    pub control: ControllerId,
    pub action: ButtonAction,
    /// Physical value for continuous controls (0-127), 0 for buttons
    pub value: u8,
}

impl ControllerInputEvent {
    /// Button press
    pub fn on(control: ControllerId) -> Self {
        Self {
            control,
            action: ButtonAction::On,
            value: 0,
        }
    }

    /// Button release
    pub fn off(control: ControllerId) -> Self {
        Self {
            control,
            action: ButtonAction::Off,
            value: 0,
        }
    }

    /// Continuous control movement
    pub fn with_value(control: ControllerId, value: u8) -> Self {
        Self {
            control,
            action: ButtonAction::On,
            value: value.min(127),
        }
    }
}

/// State change reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStateEvent {
    /// Mute flag of an absolute track changed
    Muted { track: usize, on: bool },
    /// Solo flag of an absolute track changed
    Soloed { track: usize, on: bool },
    /// Record-arm flag of an absolute track changed
    Armed { track: usize, on: bool },
    /// Track bank scrolled; `start` is the first visible track
    TrackBankChanged { start: usize },
    /// Device parameter page scrolled; `start` is the first visible parameter
    DeviceBankChanged { start: usize },
    /// Host switched view
    LayoutChanged(Layout),
}

/// Anything the reducer can consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Controller(ControllerInputEvent),
    Host(HostStateEvent),
}

impl From<ControllerInputEvent> for InputEvent {
    fn from(event: ControllerInputEvent) -> Self {
        Self::Controller(event)
    }
}

impl From<HostStateEvent> for InputEvent {
    fn from(event: HostStateEvent) -> Self {
        Self::Host(event)
    }
}
