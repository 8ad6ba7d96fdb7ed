pub mod device;
pub mod engine;
pub mod notifier;
pub mod tuning;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::engine::{Dice, Engine, PinPulse, RngDice};

    /// Deterministic dice for transition-sequence regression tests.
    pub fn seeded_dice(seed: u64) -> RngDice<StdRng> {
        RngDice(StdRng::seed_from_u64(seed))
    }

    /// Dice that replays a fixed script of draws, for forcing specific
    /// transitions. Panics when the script runs dry so a test that
    /// consumes an unexpected draw fails loudly.
    pub struct ScriptedDice {
        script: VecDeque<u32>,
        rolls: usize,
    }

    impl ScriptedDice {
        pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
            Self {
                script: script.into_iter().collect(),
                rolls: 0,
            }
        }

        /// A dice that must never be rolled.
        pub fn empty() -> Self {
            Self::new([])
        }

        /// Number of draws consumed so far.
        pub fn rolls(&self) -> usize {
            self.rolls
        }
    }

    impl Dice for ScriptedDice {
        fn roll(&mut self) -> u32 {
            self.rolls += 1;
            self.script
                .pop_front()
                .expect("ScriptedDice ran out of draws")
        }
    }

    /// Run `n` engine ticks spaced `step` apart, collecting the pulses.
    pub fn run_ticks(
        engine: &mut Engine,
        n: u32,
        start: Instant,
        step: Duration,
        dice: &mut impl Dice,
    ) -> Vec<PinPulse> {
        let mut pulses = Vec::new();
        for i in 0..n {
            if let Some(pulse) = engine.tick(start + step * i, dice) {
                pulses.push(pulse);
            }
        }
        pulses
    }
}
