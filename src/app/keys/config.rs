use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::app::types::{KeyFrame, KeyNotification};

/// Per-board ladder calibration, ordinal order (Right first). The stock
/// values match the shield reference design; boards drift, so this is
/// the one knob most installs end up touching.
pub(crate) const KEY_CALIBRATION: [u16; 5] = [0, 144, 329, 505, 742];
pub(crate) const KEY_TOLERANCE: u16 = 55;

pub(crate) const DEFAULT_HELD_INTERVAL_MS: u32 = 250;

/// 10 ms keeps edges well inside one held interval and the A/D settles
/// long before the next read, so no extra debounce layer is needed.
pub(crate) const KEY_SAMPLE_PERIOD_MS: u64 = 10;

pub(crate) const KEY_EVENT_TRACE_ENABLED: bool = true;

pub(crate) static KEY_PIPELINE_INPUTS: Channel<CriticalSectionRawMutex, KeyFrame, 32> =
    Channel::new();
pub(crate) static KEY_PIPELINE_EVENTS: Channel<CriticalSectionRawMutex, KeyNotification, 16> =
    Channel::new();
