use serde::Deserialize;

/// Device role flags, fixed after startup.
///
/// A node is either an active player or a gamemaster. Gamemasters do not
/// run the state machine; they emit periodic trigger pulses to stimulate
/// other devices on the network.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Physical actuation pulses (shot/pump) are active. When false the
    /// node is a pure simulator with no emission hardware.
    pub water_emitting: bool,
    /// Gamemaster/observer role: suppress the player state machine.
    pub gamemaster: bool,
    /// Emit event payloads over the datagram link.
    pub network_enabled: bool,
    /// Use the statically configured address instead of dynamic assignment.
    pub static_address: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            water_emitting: false,
            gamemaster: false,
            network_enabled: true,
            static_address: false,
        }
    }
}

impl DeviceConfig {
    /// True when a hit-detection pulse should be emitted: only passive
    /// player devices carry the hit-detection hardware.
    pub fn pulses_hit_detection(&self) -> bool {
        !self.water_emitting && !self.gamemaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_networked_player() {
        let d = DeviceConfig::default();
        assert!(!d.water_emitting);
        assert!(!d.gamemaster);
        assert!(d.network_enabled);
        assert!(!d.static_address);
    }

    #[test]
    fn hit_detection_only_on_passive_players() {
        let passive = DeviceConfig::default();
        assert!(passive.pulses_hit_detection());

        let emitting = DeviceConfig {
            water_emitting: true,
            ..DeviceConfig::default()
        };
        assert!(!emitting.pulses_hit_detection());

        let master = DeviceConfig {
            gamemaster: true,
            ..DeviceConfig::default()
        };
        assert!(!master.pulses_hit_detection());
    }

    #[test]
    fn parse_device_table() {
        let toml_str = r#"
water_emitting = true
gamemaster = false
network_enabled = false
"#;
        let d: DeviceConfig = toml::from_str(toml_str).unwrap();
        assert!(d.water_emitting);
        assert!(!d.network_enabled);
        assert!(!d.static_address);
    }
}
