use super::core::{KeyEngine, KeyEvent, KeyEventKind, KeySymbol};
use super::decode::KeyDecoder;

/// Event sink: one plain function per event class. An unset sink is a
/// guaranteed no-op for that class, never an error.
pub type KeySinkFn = fn(KeySymbol);

/// Decoder + engine + sinks, the surface the integrator talks to.
pub struct Keypad {
    decoder: KeyDecoder,
    engine: KeyEngine,
    down_sink: Option<KeySinkFn>,
    up_sink: Option<KeySinkFn>,
    held_sink: Option<KeySinkFn>,
}

impl Keypad {
    pub fn new(decoder: KeyDecoder, default_held_interval_ms: u32) -> Self {
        Self {
            decoder,
            engine: KeyEngine::new(default_held_interval_ms),
            down_sink: None,
            up_sink: None,
            held_sink: None,
        }
    }

    /// One call per external tick. Sinks run synchronously on the
    /// caller before this returns; they must not block.
    pub fn update(&mut self, raw: u16, now_ms: u32) -> Option<KeyEvent> {
        let key = self.decoder.decode(raw);
        let event = self.engine.tick(now_ms, key);
        if let Some(event) = event {
            let sink = match event.kind {
                KeyEventKind::Down => self.down_sink,
                KeyEventKind::Up => self.up_sink,
                KeyEventKind::Held => self.held_sink,
            };
            if let Some(sink) = sink {
                sink(event.key);
            }
        }
        event
    }

    pub fn current_key(&self) -> KeySymbol {
        self.engine.current_key()
    }

    pub fn set_held_interval(&mut self, interval_ms: u32) {
        self.engine.set_held_interval(interval_ms);
    }

    /// Each setter replaces any previously registered sink; `None`
    /// disables that event class.
    pub fn set_down_handler(&mut self, sink: Option<KeySinkFn>) {
        self.down_sink = sink;
    }

    pub fn set_up_handler(&mut self, sink: Option<KeySinkFn>) {
        self.up_sink = sink;
    }

    pub fn set_held_handler(&mut self, sink: Option<KeySinkFn>) {
        self.held_sink = sink;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    // Raw samples inside the stock windows.
    const RAW_UP: u16 = 144;
    const RAW_LEFT: u16 = 505;
    const RAW_NONE: u16 = 1_023;

    fn keypad() -> Keypad {
        Keypad::new(KeyDecoder::default(), 250)
    }

    #[test]
    fn events_flow_without_any_sinks() {
        let mut keypad = keypad();
        let down = keypad.update(RAW_UP, 0);
        assert_eq!(down.map(|e| e.kind), Some(KeyEventKind::Down));
        let up = keypad.update(RAW_NONE, 100);
        assert_eq!(up.map(|e| e.kind), Some(KeyEventKind::Up));
        assert_eq!(up.map(|e| e.key), Some(KeySymbol::Up));
    }

    #[test]
    fn absent_sink_suppresses_only_that_class() {
        static DOWN_CALLS: AtomicU32 = AtomicU32::new(0);
        static HELD_CALLS: AtomicU32 = AtomicU32::new(0);

        fn count_down(_key: KeySymbol) {
            DOWN_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        fn count_held(_key: KeySymbol) {
            HELD_CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let mut keypad = keypad();
        keypad.set_down_handler(Some(count_down));
        keypad.set_held_handler(Some(count_held));
        // No up handler registered at all.

        keypad.update(RAW_UP, 0);
        keypad.update(RAW_UP, 300);
        keypad.update(RAW_NONE, 400);

        assert_eq!(DOWN_CALLS.load(Ordering::Relaxed), 1);
        assert_eq!(HELD_CALLS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn clearing_a_sink_mid_session_stops_its_dispatch() {
        static UP_CALLS: AtomicU32 = AtomicU32::new(0);

        fn count_up(_key: KeySymbol) {
            UP_CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let mut keypad = keypad();
        keypad.set_up_handler(Some(count_up));

        keypad.update(RAW_UP, 0);
        keypad.update(RAW_NONE, 100);
        assert_eq!(UP_CALLS.load(Ordering::Relaxed), 1);

        keypad.set_up_handler(None);
        keypad.update(RAW_LEFT, 200);
        keypad.update(RAW_NONE, 300);
        // The release still happened; only its dispatch is suppressed.
        assert_eq!(UP_CALLS.load(Ordering::Relaxed), 1);
        assert_eq!(keypad.current_key(), KeySymbol::None);
    }

    #[test]
    fn up_sink_receives_the_released_key() {
        static LAST_UP: AtomicU32 = AtomicU32::new(u32::MAX);

        fn record_up(key: KeySymbol) {
            LAST_UP.store(key as u32, Ordering::Relaxed);
        }

        let mut keypad = keypad();
        keypad.set_up_handler(Some(record_up));
        keypad.update(RAW_LEFT, 0);
        keypad.update(RAW_NONE, 100);
        assert_eq!(LAST_UP.load(Ordering::Relaxed), KeySymbol::Left as u32);
    }
}
