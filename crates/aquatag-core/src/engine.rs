use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::device::DeviceConfig;
use crate::tuning::{
    FIRE_AGAIN, HIT_RETALIATE, RAND_SCALE, REFILL_STAY, Tuning, WALK_FIRE, WALK_STAY,
};

/// Behavior the player is currently executing. Transitions happen only
/// inside [`Engine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Walking,
    Firing,
    GettingHit,
    Refilling,
}

/// Output pin pulse requested by a tick. The caller (the node's GPIO
/// layer) turns this into a brief high-then-low edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPulse {
    Shot,
    HitDetect,
    Pump,
}

/// Game counters for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCounters {
    pub life_count: u32,
    pub shots_left: u32,
    pub shots_fired_total: u32,
    pub pump_cycles_total: f32,
}

impl PlayerCounters {
    fn full(tuning: &Tuning) -> Self {
        Self {
            life_count: tuning.max_life,
            shots_left: tuning.max_shots,
            shots_fired_total: 0,
            pump_cycles_total: 0.0,
        }
    }
}

/// Bookkeeping for an in-progress timed refill unit. At most one exists
/// at a time; it is dropped when the unit completes or is interrupted.
#[derive(Debug, Clone, Copy)]
struct RefillSession {
    started_at: Instant,
    ends_at: Instant,
}

/// Source of uniform transition draws over `[0, RAND_SCALE)`.
///
/// Production code wraps a real generator in [`RngDice`]; tests that need
/// to force a specific branch use a scripted implementation instead.
pub trait Dice {
    fn roll(&mut self) -> u32;
}

/// Dice backed by any `rand` generator.
pub struct RngDice<R: Rng>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self) -> u32 {
        self.0.random_range(0..RAND_SCALE)
    }
}

/// The player state machine.
///
/// All mutable game state lives here; every action handler receives it
/// through `&mut self`. The engine is strictly single-stepped: one call
/// to [`Engine::tick`] runs exactly one action to completion.
#[derive(Debug)]
pub struct Engine {
    device: DeviceConfig,
    tuning: Tuning,
    counters: PlayerCounters,
    state: GameState,
    session: Option<RefillSession>,
    halted: bool,
}

impl Engine {
    pub fn new(device: DeviceConfig, tuning: Tuning) -> Self {
        Self {
            counters: PlayerCounters::full(&tuning),
            device,
            tuning,
            state: GameState::Walking,
            session: None,
            halted: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn counters(&self) -> &PlayerCounters {
        &self.counters
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// True once the life count has reached zero. A halted engine refuses
    /// all further ticks; the device must be restarted externally.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run one action for the current state. Returns the pin pulse the
    /// action requested, if any.
    ///
    /// `now` is sampled by the caller once per tick; the refill deadline
    /// is a plain comparison against it, not a timer.
    pub fn tick(&mut self, now: Instant, dice: &mut impl Dice) -> Option<PinPulse> {
        // Game over check runs before dispatch, independent of the
        // GettingHit handler's own guard.
        if self.counters.life_count == 0 {
            if !self.halted {
                self.halted = true;
                tracing::warn!("Game over");
            }
            return None;
        }

        match self.state {
            GameState::Walking => self.walking(dice),
            GameState::Firing => self.firing(dice),
            GameState::GettingHit => self.getting_hit(dice),
            GameState::Refilling => self.refilling(now, dice),
        }
    }

    fn walking(&mut self, dice: &mut impl Dice) -> Option<PinPulse> {
        tracing::info!(shots_left = self.counters.shots_left, "Walking");
        if self.counters.shots_left == 0 {
            self.state = GameState::Refilling;
            return None;
        }
        let r = dice.roll();
        self.state = if r < WALK_STAY {
            GameState::Walking
        } else if r < WALK_FIRE {
            GameState::Firing
        } else {
            GameState::GettingHit
        };
        None
    }

    fn firing(&mut self, dice: &mut impl Dice) -> Option<PinPulse> {
        if self.counters.shots_left == 0 {
            // Entered firing with an empty magazine: nothing leaves.
            self.state = GameState::Walking;
            return None;
        }
        self.counters.shots_left -= 1;
        self.counters.shots_fired_total += 1;
        tracing::info!(
            shots_left = self.counters.shots_left,
            shots_fired_total = self.counters.shots_fired_total,
            "Firing"
        );
        let pulse = self.device.water_emitting.then_some(PinPulse::Shot);

        if self.counters.shots_left == 0 {
            self.state = GameState::Walking;
        } else if dice.roll() < FIRE_AGAIN {
            self.state = GameState::Firing;
        } else {
            self.state = GameState::Walking;
        }
        pulse
    }

    fn getting_hit(&mut self, dice: &mut impl Dice) -> Option<PinPulse> {
        // Normally unreachable at zero life (the tick preamble halts
        // first), but the handler guards on its own anyway.
        if self.counters.life_count == 0 {
            return None;
        }
        self.counters.life_count -= 1;
        tracing::info!(lifecount = self.counters.life_count, "Getting hit");

        self.state = if self.counters.shots_left > 0 {
            if dice.roll() < HIT_RETALIATE {
                GameState::Firing
            } else {
                GameState::Walking
            }
        } else {
            GameState::Walking
        };
        self.device
            .pulses_hit_detection()
            .then_some(PinPulse::HitDetect)
    }

    fn refilling(&mut self, now: Instant, dice: &mut impl Dice) -> Option<PinPulse> {
        tracing::info!(
            shots_left = self.counters.shots_left,
            pump_cycles_total = self.counters.pump_cycles_total,
            "Refilling"
        );
        if self.counters.shots_left == self.tuning.max_shots {
            // Already full: abort, consuming no time and skipping the
            // interruption draw.
            self.session = None;
            self.state = GameState::Walking;
            return None;
        }

        let mut pulse = None;
        match self.session {
            None => {
                let session = RefillSession {
                    started_at: now,
                    ends_at: now + self.tuning.refill_unit(),
                };
                tracing::debug!(
                    started_at = ?session.started_at,
                    ends_at = ?session.ends_at,
                    "Refill unit started"
                );
                self.session = Some(session);
            },
            Some(session) if now < session.ends_at => {
                // Unit still in progress, keep waiting.
            },
            Some(_) => {
                self.counters.shots_left += 1;
                self.counters.pump_cycles_total += 1.0 / self.tuning.max_shots as f32;
                self.session = None;
                if self.device.water_emitting {
                    pulse = Some(PinPulse::Pump);
                    tracing::info!(shots_left = self.counters.shots_left, "Added one shot");
                }
            },
        }

        if self.tuning.refill_interruptible {
            if dice.roll() < REFILL_STAY {
                self.state = GameState::Refilling;
            } else {
                // Interrupted mid-refill: any open unit is lost.
                self.state = GameState::Firing;
                self.session = None;
            }
        } else {
            self.state = GameState::Refilling;
        }
        pulse
    }
}
