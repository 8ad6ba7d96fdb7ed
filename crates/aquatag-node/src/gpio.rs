use std::time::Duration;

use aquatag_core::engine::PinPulse;

/// Simulated digital output bank.
///
/// Each pulse is a brief high-then-low edge pair; the simulation logs
/// both edges instead of driving real pins. Pin numbers match the
/// original board layout so captures line up with hardware traces.
pub struct PinBank {
    pulse_width: Duration,
}

impl PinBank {
    pub fn new(pulse_width: Duration) -> Self {
        Self { pulse_width }
    }

    fn pin_number(pulse: PinPulse) -> u8 {
        match pulse {
            PinPulse::Pump => 4,
            PinPulse::Shot => 5,
            PinPulse::HitDetect => 6,
        }
    }

    /// Drive one output pulse, holding the line high for the configured
    /// width.
    pub async fn pulse(&self, pulse: PinPulse) {
        let pin = Self::pin_number(pulse);
        tracing::debug!(pin, ?pulse, "Pin high");
        tokio::time::sleep(self.pulse_width).await;
        tracing::debug!(pin, ?pulse, "Pin low");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_mapping_matches_board_layout() {
        assert_eq!(PinBank::pin_number(PinPulse::Pump), 4);
        assert_eq!(PinBank::pin_number(PinPulse::Shot), 5);
        assert_eq!(PinBank::pin_number(PinPulse::HitDetect), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_holds_for_the_configured_width() {
        let bank = PinBank::new(Duration::from_millis(1));
        let before = tokio::time::Instant::now();
        bank.pulse(PinPulse::Shot).await;
        assert_eq!(before.elapsed(), Duration::from_millis(1));
    }
}
