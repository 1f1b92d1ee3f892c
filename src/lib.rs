#![no_std]

pub mod platform;
pub mod shield_hal;
