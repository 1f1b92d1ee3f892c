use super::{tasks::key_label, KeyEventKind, KeySymbol};
use crate::app::{
    config::{BACKLIGHT_BOOT_INTENSITY, BACKLIGHT_STEP},
    types::{BacklightDriver, KeyNotification},
};

/// Maps decoded key activity onto the backlight: Up/Down step the
/// intensity (repeating while held), Right/Left jump to the limits,
/// Select toggles off and back to the boot level.
pub(crate) fn handle_key_notification(
    notification: KeyNotification,
    backlight: &mut BacklightDriver,
) {
    let current = backlight.intensity();
    let target = match (notification.kind, notification.key) {
        (KeyEventKind::Down | KeyEventKind::Held, KeySymbol::Up) => {
            current.saturating_add(BACKLIGHT_STEP)
        }
        (KeyEventKind::Down | KeyEventKind::Held, KeySymbol::Down) => {
            current.saturating_sub(BACKLIGHT_STEP)
        }
        (KeyEventKind::Down, KeySymbol::Right) => u8::MAX,
        (KeyEventKind::Down, KeySymbol::Left) => u8::MIN,
        (KeyEventKind::Down, KeySymbol::Select) => {
            if current == 0 {
                BACKLIGHT_BOOT_INTENSITY
            } else {
                0
            }
        }
        _ => return,
    };

    if target != current {
        backlight.set_intensity(target);
        esp_println::println!(
            "backlight: level={} key={}",
            target,
            key_label(notification.key)
        );
    }
}
