use esp_hal::{
    analog::adc::{Adc, AdcPin},
    ledc::{channel::Channel, LowSpeed},
    peripherals::{ADC1, GPIO36},
    Blocking,
};

/// Raw reading of the shared key-sense line, in the shield's native
/// 10-bit domain (0..=1023). Implementations own any resolution scaling
/// so the shield's published calibration values apply unchanged.
pub trait KeySenseOps {
    fn read_raw(&mut self) -> u16;
}

pub trait BacklightOps {
    fn set_duty(&mut self, level: u8);
}

pub struct HalKeySense<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    pin: AdcPin<GPIO36<'d>, ADC1<'d>>,
}

impl<'d> HalKeySense<'d> {
    pub fn new(adc: Adc<'d, ADC1<'d>, Blocking>, pin: AdcPin<GPIO36<'d>, ADC1<'d>>) -> Self {
        Self { adc, pin }
    }
}

impl KeySenseOps for HalKeySense<'_> {
    fn read_raw(&mut self) -> u16 {
        // The ESP32 converter is 12-bit; the shield's ladder values are
        // published for a 10-bit Arduino converter.
        self.adc.read_blocking(&mut self.pin) >> 2
    }
}

pub struct HalBacklight<'d> {
    channel: Channel<'d, LowSpeed>,
}

impl<'d> HalBacklight<'d> {
    pub fn new(channel: Channel<'d, LowSpeed>) -> Self {
        Self { channel }
    }
}

impl BacklightOps for HalBacklight<'_> {
    fn set_duty(&mut self, level: u8) {
        // The channel timer runs at 8-bit duty resolution, so the
        // intensity byte maps directly onto the hardware duty register.
        self.channel.set_duty_hw(level as u32);
    }
}
