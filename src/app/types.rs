use lcdkeypad::{
    platform::{HalBacklight, HalKeySense},
    shield_hal::{Backlight, KeySense},
};

use super::keys::{KeyEventKind, KeySymbol};

pub(crate) type KeySenseDriver = KeySense<HalKeySense<'static>>;
pub(crate) type BacklightDriver = Backlight<HalBacklight<'static>>;

/// Everything the shield task owns; the only code that touches pins.
pub(crate) struct ShieldContext {
    pub(crate) key_sense: KeySenseDriver,
    pub(crate) backlight: BacklightDriver,
}

/// One raw sample stamped when it was read. The timestamp is a wrapping
/// millisecond counter; consumers compare with `wrapping_sub`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct KeyFrame {
    pub(crate) t_ms: u32,
    pub(crate) raw: u16,
}

/// What the keypad sinks forward out of the pipeline task.
#[derive(Clone, Copy, Debug)]
pub(crate) struct KeyNotification {
    pub(crate) kind: KeyEventKind,
    pub(crate) key: KeySymbol,
}
