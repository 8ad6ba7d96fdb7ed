use std::time::Duration;

use serde::Deserialize;

/// Delay between state machine actions.
pub const ACTION_DELAY: Duration = Duration::from_millis(250);
/// Gamemaster trigger cadence, as a multiple of the action delay.
pub const GAMEMASTER_DELAY_MULT: u32 = 4;
/// Width of an output pin pulse.
pub const PIN_PULSE_WIDTH: Duration = Duration::from_millis(1);
/// Time to refill a single shot.
pub const REFILL_UNIT: Duration = Duration::from_millis(500);
/// Time to refill an empty magazine (MAX_SHOTS * REFILL_UNIT).
pub const REFILL_TOTAL: Duration = Duration::from_secs(12);
/// Magazine capacity.
pub const MAX_SHOTS: u32 = 24;
/// Starting life count.
pub const MAX_LIFE: u32 = 200;

/// Transition draws are uniform over `[0, RAND_SCALE)`.
///
/// The original firmware compared a `[0, 100)` draw against 97.5, mixing
/// float and integer. The thresholds below carry one extra digit instead.
pub const RAND_SCALE: u32 = 1000;
/// Walking: below this, keep walking.
pub const WALK_STAY: u32 = 850;
/// Walking: below this (and at or above WALK_STAY), start firing.
pub const WALK_FIRE: u32 = 975;
/// Firing: below this, fire again next tick.
pub const FIRE_AGAIN: u32 = 600;
/// Getting hit with shots left: below this, retaliate by firing.
pub const HIT_RETALIATE: u32 = 850;
/// Refilling: below this, keep refilling; otherwise interrupt to firing.
pub const REFILL_STAY: u32 = 950;

/// Gameplay timing and capacity knobs, overridable from `aquatag.toml`.
///
/// Transition thresholds are deliberately not configurable; they define
/// the game, not the device.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub action_delay_ms: u64,
    pub pin_pulse_width_ms: u64,
    pub refill_unit_ms: u64,
    pub max_shots: u32,
    pub max_life: u32,
    /// When false a refill unit always runs to completion.
    pub refill_interruptible: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            action_delay_ms: ACTION_DELAY.as_millis() as u64,
            pin_pulse_width_ms: PIN_PULSE_WIDTH.as_millis() as u64,
            refill_unit_ms: REFILL_UNIT.as_millis() as u64,
            max_shots: MAX_SHOTS,
            max_life: MAX_LIFE,
            refill_interruptible: true,
        }
    }
}

impl Tuning {
    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    /// Cadence of the gamemaster's periodic trigger pulse.
    pub fn gamemaster_delay(&self) -> Duration {
        self.action_delay() * GAMEMASTER_DELAY_MULT
    }

    pub fn pin_pulse_width(&self) -> Duration {
        Duration::from_millis(self.pin_pulse_width_ms)
    }

    pub fn refill_unit(&self) -> Duration {
        Duration::from_millis(self.refill_unit_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_matches_constants() {
        let t = Tuning::default();
        assert_eq!(t.action_delay(), ACTION_DELAY);
        assert_eq!(t.pin_pulse_width(), PIN_PULSE_WIDTH);
        assert_eq!(t.refill_unit(), REFILL_UNIT);
        assert_eq!(t.max_shots, MAX_SHOTS);
        assert_eq!(t.max_life, MAX_LIFE);
        assert!(t.refill_interruptible);
    }

    #[test]
    fn refill_total_is_full_magazine() {
        assert_eq!(REFILL_UNIT * MAX_SHOTS, REFILL_TOTAL);
    }

    #[test]
    fn thresholds_fit_the_scale() {
        for t in [WALK_STAY, WALK_FIRE, FIRE_AGAIN, HIT_RETALIATE, REFILL_STAY] {
            assert!(t < RAND_SCALE, "threshold {t} outside draw range");
        }
        assert!(WALK_STAY < WALK_FIRE);
    }

    #[test]
    fn parse_tuning_table() {
        let toml_str = r#"
action_delay_ms = 100
refill_unit_ms = 250
max_shots = 12
refill_interruptible = false
"#;
        let t: Tuning = toml::from_str(toml_str).unwrap();
        assert_eq!(t.action_delay_ms, 100);
        assert_eq!(t.refill_unit_ms, 250);
        assert_eq!(t.max_shots, 12);
        assert!(!t.refill_interruptible);
        // untouched keys keep their defaults
        assert_eq!(t.max_life, MAX_LIFE);
    }

    #[test]
    fn gamemaster_delay_is_four_actions() {
        let t = Tuning::default();
        assert_eq!(t.gamemaster_delay(), ACTION_DELAY * 4);
    }
}
