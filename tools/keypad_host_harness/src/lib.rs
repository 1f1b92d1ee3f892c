//! Host-side view of the firmware keypad core.
//!
//! The firmware modules are included by path, so `cargo test` in this
//! tool compiles their `#[cfg(test)]` suites for the build machine and
//! runs the scripted scenarios in `tests/` with no target hardware.

#[path = "../../../src/app/keys/core.rs"]
pub mod core;
#[path = "../../../src/app/keys/decode.rs"]
pub mod decode;
#[path = "../../../src/app/keys/keypad.rs"]
pub mod keypad;

pub use self::core::{KeyEngine, KeyEvent, KeyEventKind, KeySymbol, DEFAULT_HELD_INTERVAL_MS};
pub use self::decode::{
    CalibrationError, CalibrationTable, KeyDecoder, LinearFitClassifier, KEY_RAW_MAX,
    STOCK_CALIBRATION, STOCK_TOLERANCE,
};
pub use self::keypad::{KeySinkFn, Keypad};
