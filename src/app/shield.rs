use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};

use super::{
    keys::{
        config::{KEY_PIPELINE_EVENTS, KEY_SAMPLE_PERIOD_MS},
        integration::handle_key_notification,
        tasks::push_key_input_sample,
    },
    types::{KeyFrame, ShieldContext},
};

/// Owns the shield hardware: reads one raw key sample per tick into the
/// pipeline and applies backlight reactions coming back out of it.
#[embassy_executor::task]
pub(crate) async fn shield_task(mut context: ShieldContext) {
    esp_println::println!("shield: ready backlight={}", context.backlight.intensity());

    let mut ticker = Ticker::every(Duration::from_millis(KEY_SAMPLE_PERIOD_MS));
    loop {
        match select(ticker.next(), KEY_PIPELINE_EVENTS.receive()).await {
            Either::First(()) => {
                let raw = context.key_sense.read_key_raw();
                // Truncation is deliberate: the engine runs on a
                // wrapping 32-bit millisecond clock.
                let t_ms = Instant::now().as_millis() as u32;
                push_key_input_sample(KeyFrame { t_ms, raw }).await;
            }
            Either::Second(notification) => {
                handle_key_notification(notification, &mut context.backlight);
            }
        }
    }
}
