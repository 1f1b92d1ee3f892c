pub mod core;
pub mod decode;
pub mod keypad;

pub(crate) mod config;
pub(crate) mod integration;
pub(crate) mod tasks;

pub(crate) use self::core::{KeyEventKind, KeySymbol};
pub(crate) use self::keypad::Keypad;
