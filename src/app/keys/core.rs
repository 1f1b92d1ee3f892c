use statig::{blocking::IntoStateMachineExt as _, prelude::*};

/// Held-repeat cadence used until the integrator overrides it. The
/// engine also falls back to this value after every release.
pub const DEFAULT_HELD_INTERVAL_MS: u32 = 250;

/// Discrete key identity on the shield's shared resistor ladder.
///
/// Declaration order is load-bearing: it follows ascending analog value
/// (`Right` sits at 0 V, `Select` highest, `None` is the open ladder),
/// and the linear-fit classifier maps its bucket indexes straight onto
/// these ordinals. Covered by `symbol_ordinals_match_ladder_order`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum KeySymbol {
    Right = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Select = 4,
    None = 5,
}

impl KeySymbol {
    /// Every pressable key, in ordinal (ascending ladder) order.
    pub const PRESSABLE: [KeySymbol; 5] = [
        KeySymbol::Right,
        KeySymbol::Up,
        KeySymbol::Down,
        KeySymbol::Left,
        KeySymbol::Select,
    ];

    pub fn from_bucket(bucket: u8) -> KeySymbol {
        match bucket {
            0 => KeySymbol::Right,
            1 => KeySymbol::Up,
            2 => KeySymbol::Down,
            3 => KeySymbol::Left,
            4 => KeySymbol::Select,
            _ => KeySymbol::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
    Held,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// For `Up` this is the key that was released, not the new state.
    pub key: KeySymbol,
    pub t_ms: u32,
}

#[derive(Clone, Copy, Debug)]
enum KeyHsmEvent {
    Sample { now_ms: u32, key: KeySymbol },
    SetHeldInterval { interval_ms: u32 },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    event: Option<KeyEvent>,
}

impl DispatchContext {
    fn emit(&mut self, event: KeyEvent) {
        // One authoritative event per tick; the state machine never
        // emits twice, this only pins the first if it ever did.
        if self.event.is_none() {
            self.event = Some(event);
        }
    }
}

/// Edge-triggered button event engine. One `tick` per externally paced
/// sample; at most one event comes back out.
pub struct KeyEngine {
    machine: statig::blocking::StateMachine<KeyHsm>,
    current: KeySymbol,
}

impl Default for KeyEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HELD_INTERVAL_MS)
    }
}

impl KeyEngine {
    pub fn new(default_held_interval_ms: u32) -> Self {
        Self {
            machine: KeyHsm::new(default_held_interval_ms).state_machine(),
            current: KeySymbol::None,
        }
    }

    pub fn tick(&mut self, now_ms: u32, key: KeySymbol) -> Option<KeyEvent> {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&KeyHsmEvent::Sample { now_ms, key }, &mut context);
        // The decoded sample is always the post-tick state, so a query
        // mid-dispatch already sees the new key.
        self.current = key;
        context.event
    }

    pub fn current_key(&self) -> KeySymbol {
        self.current
    }

    /// Takes effect on the next held comparison. Reverts to the default
    /// as a side effect of the next release.
    pub fn set_held_interval(&mut self, interval_ms: u32) {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&KeyHsmEvent::SetHeldInterval { interval_ms }, &mut context);
    }
}

struct KeyHsm {
    pressed_key: KeySymbol,
    held_interval_ms: u32,
    default_held_interval_ms: u32,
    last_held_ms: u32,
}

impl KeyHsm {
    fn new(default_held_interval_ms: u32) -> Self {
        Self {
            pressed_key: KeySymbol::None,
            held_interval_ms: default_held_interval_ms,
            default_held_interval_ms,
            last_held_ms: 0,
        }
    }

    fn begin_press(&mut self, now_ms: u32, key: KeySymbol) {
        self.pressed_key = key;
        self.last_held_ms = now_ms;
    }

    fn held_elapsed(&self, now_ms: u32) -> bool {
        // Unsigned difference so a timestamp counter rollover cannot
        // stall the repeat for a full wrap period.
        now_ms.wrapping_sub(self.last_held_ms) > self.held_interval_ms
    }
}

#[state_machine(initial = "State::idle()")]
impl KeyHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &KeyHsmEvent) -> Outcome<State> {
        match event {
            KeyHsmEvent::Sample { now_ms, key } => {
                if *key == KeySymbol::None {
                    return Handled;
                }
                self.begin_press(*now_ms, *key);
                context.emit(KeyEvent {
                    kind: KeyEventKind::Down,
                    key: *key,
                    t_ms: *now_ms,
                });
                Transition(State::pressed())
            }
            KeyHsmEvent::SetHeldInterval { interval_ms } => {
                self.held_interval_ms = *interval_ms;
                Handled
            }
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &KeyHsmEvent) -> Outcome<State> {
        match event {
            KeyHsmEvent::Sample { now_ms, key } => {
                if *key == self.pressed_key {
                    if self.held_elapsed(*now_ms) {
                        self.last_held_ms = *now_ms;
                        context.emit(KeyEvent {
                            kind: KeyEventKind::Held,
                            key: *key,
                            t_ms: *now_ms,
                        });
                    }
                    Handled
                } else if *key == KeySymbol::None {
                    let released = self.pressed_key;
                    self.held_interval_ms = self.default_held_interval_ms;
                    context.emit(KeyEvent {
                        kind: KeyEventKind::Up,
                        key: released,
                        t_ms: *now_ms,
                    });
                    Transition(State::idle())
                } else {
                    // One shared ladder means a key-to-key edge only
                    // shows up when bounce straddles two windows inside
                    // a single tick. That counts as a press of the new
                    // key; the old key gets no release on this tick.
                    self.begin_press(*now_ms, *key);
                    context.emit(KeyEvent {
                        kind: KeyEventKind::Down,
                        key: *key,
                        t_ms: *now_ms,
                    });
                    Handled
                }
            }
            KeyHsmEvent::SetHeldInterval { interval_ms } => {
                self.held_interval_ms = *interval_ms;
                Handled
            }
        }
    }
}
