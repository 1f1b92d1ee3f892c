use super::{
    config::{
        DEFAULT_HELD_INTERVAL_MS, KEY_CALIBRATION, KEY_EVENT_TRACE_ENABLED, KEY_PIPELINE_EVENTS,
        KEY_PIPELINE_INPUTS, KEY_TOLERANCE,
    },
    decode::{CalibrationError, CalibrationTable, KeyDecoder, LinearFitClassifier},
    KeyEventKind, KeySymbol, Keypad,
};
use crate::app::types::{KeyFrame, KeyNotification};

fn forward_down(key: KeySymbol) {
    let _ = KEY_PIPELINE_EVENTS.try_send(KeyNotification {
        kind: KeyEventKind::Down,
        key,
    });
}

fn forward_up(key: KeySymbol) {
    let _ = KEY_PIPELINE_EVENTS.try_send(KeyNotification {
        kind: KeyEventKind::Up,
        key,
    });
}

fn forward_held(key: KeySymbol) {
    let _ = KEY_PIPELINE_EVENTS.try_send(KeyNotification {
        kind: KeyEventKind::Held,
        key,
    });
}

pub(crate) fn build_decoder() -> KeyDecoder {
    match CalibrationTable::new(KEY_CALIBRATION, KEY_TOLERANCE) {
        Ok(table) => KeyDecoder::Table(table),
        Err(CalibrationError::OverlappingWindows { first, second }) => {
            // Misconfigured windows would misclassify silently; fall
            // back to the closed-form classifier and say so once.
            esp_println::println!(
                "keys: calibration_invalid first={} second={} fallback=linear_fit",
                key_label(first),
                key_label(second)
            );
            KeyDecoder::LinearFit(LinearFitClassifier::default())
        }
    }
}

#[embassy_executor::task]
pub(crate) async fn key_pipeline_task() {
    let mut keypad = Keypad::new(build_decoder(), DEFAULT_HELD_INTERVAL_MS);
    keypad.set_down_handler(Some(forward_down));
    keypad.set_up_handler(Some(forward_up));
    keypad.set_held_handler(Some(forward_held));

    loop {
        let frame = KEY_PIPELINE_INPUTS.receive().await;
        if let Some(event) = keypad.update(frame.raw, frame.t_ms) {
            if KEY_EVENT_TRACE_ENABLED {
                esp_println::println!(
                    "keys: event kind={} key={} t_ms={} raw={}",
                    kind_label(event.kind),
                    key_label(event.key),
                    event.t_ms,
                    frame.raw
                );
            }
        }
    }
}

pub(crate) async fn push_key_input_sample(frame: KeyFrame) {
    // Ordered delivery matters: a dropped sample can swallow an edge.
    KEY_PIPELINE_INPUTS.send(frame).await;
}

pub(crate) fn kind_label(kind: KeyEventKind) -> &'static str {
    match kind {
        KeyEventKind::Down => "down",
        KeyEventKind::Up => "up",
        KeyEventKind::Held => "held",
    }
}

pub(crate) fn key_label(key: KeySymbol) -> &'static str {
    match key {
        KeySymbol::Right => "right",
        KeySymbol::Up => "up",
        KeySymbol::Down => "down",
        KeySymbol::Left => "left",
        KeySymbol::Select => "select",
        KeySymbol::None => "none",
    }
}
