//! Thin drivers for the two shield resources the application touches:
//! the shared analog key-sense line and the backlight PWM output.

use crate::platform::{BacklightOps, KeySenseOps};

/// Top of the shield's legal analog range (10-bit converter).
pub const KEY_RAW_MAX: u16 = 1023;

pub struct KeySense<A: KeySenseOps> {
    adc: A,
}

impl<A: KeySenseOps> KeySense<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn read_key_raw(&mut self) -> u16 {
        self.adc.read_raw().min(KEY_RAW_MAX)
    }
}

/// Pass-through intensity output. No filtering or ramping; the driver
/// only remembers the last level it wrote.
pub struct Backlight<B: BacklightOps> {
    pwm: B,
    intensity: u8,
}

impl<B: BacklightOps> Backlight<B> {
    pub fn new(mut pwm: B, intensity: u8) -> Self {
        pwm.set_duty(intensity);
        Self { pwm, intensity }
    }

    pub fn set_intensity(&mut self, intensity: u8) {
        self.pwm.set_duty(intensity);
        self.intensity = intensity;
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }
}
