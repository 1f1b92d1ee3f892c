pub(crate) mod config;
mod keys;
mod shield;
pub(crate) mod types;

use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    ledc::{channel, timer, LSGlobalClkSource, Ledc, LowSpeed},
    time::Rate,
    timer::timg::TimerGroup,
};
use lcdkeypad::{
    platform::{HalBacklight, HalKeySense},
    shield_hal::{Backlight, KeySense},
};

use self::{
    config::{BACKLIGHT_BOOT_INTENSITY, BACKLIGHT_PWM_FREQ_KHZ},
    types::ShieldContext,
};

pub(crate) fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // The shield's key line (Arduino A0) lands on GPIO36/ADC1 here.
    // 11 dB attenuation covers the full 0..3.3 V ladder swing.
    let mut adc_config = AdcConfig::new();
    let adc_pin = adc_config.enable_pin(peripherals.GPIO36, Attenuation::_11dB);
    let adc = Adc::new(peripherals.ADC1, adc_config);
    let key_sense = KeySense::new(HalKeySense::new(adc, adc_pin));

    // Backlight (Arduino D10) on GPIO25 through an 8-bit LEDC channel,
    // so the intensity byte is the duty register verbatim.
    let mut ledc = Ledc::new(peripherals.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    let ledc = unsafe { make_static(&mut ledc) };

    let mut backlight_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    if backlight_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty8Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(BACKLIGHT_PWM_FREQ_KHZ),
        })
        .is_err()
    {
        halt_forever();
    }
    let backlight_timer = unsafe { make_static(&mut backlight_timer) };

    let mut backlight_channel = ledc.channel(channel::Number::Channel0, peripherals.GPIO25);
    if backlight_channel
        .configure(channel::config::Config {
            timer: backlight_timer,
            duty_pct: 100,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .is_err()
    {
        halt_forever();
    }

    let backlight = Backlight::new(
        HalBacklight::new(backlight_channel),
        BACKLIGHT_BOOT_INTENSITY,
    );
    let context = ShieldContext {
        key_sense,
        backlight,
    };

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(keys::tasks::key_pipeline_task());
        spawner.must_spawn(shield::shield_task(context));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
