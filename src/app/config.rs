/// Backlight level applied at boot: full brightness.
pub(crate) const BACKLIGHT_BOOT_INTENSITY: u8 = 255;

/// Intensity change per Up/Down press or held repeat.
pub(crate) const BACKLIGHT_STEP: u8 = 16;

/// 1 kHz is comfortably above flicker perception for the shield's
/// transistor-driven backlight.
pub(crate) const BACKLIGHT_PWM_FREQ_KHZ: u32 = 1;
