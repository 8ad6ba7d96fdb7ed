mod config;
mod gpio;
mod net;
mod notifier;
mod stimulus;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use aquatag_core::engine::{Engine, PinPulse, RngDice};
use aquatag_core::notifier::STARTUP_PAYLOAD;

use config::NodeConfig;
use gpio::PinBank;
use net::UdpSink;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = NodeConfig::load();
    config.validate();

    let sink = if config.device.network_enabled {
        if config.network.startup_grace_ms > 0 {
            tracing::info!(
                grace_ms = config.network.startup_grace_ms,
                "Waiting for network controller startup"
            );
            tokio::time::sleep(Duration::from_millis(config.network.startup_grace_ms)).await;
        }
        match UdpSink::bring_up(&config.network, config.device.static_address).await {
            Ok(sink) => {
                let sink = Arc::new(sink);
                sink.send(STARTUP_PAYLOAD).await;
                tracing::info!("Start message sent");
                Some(sink)
            },
            Err(e) => {
                tracing::error!(error = %e, "Network link failed to initialize");
                halt_forever().await
            },
        }
    } else {
        None
    };

    let (trigger_tx, trigger_rx) = mpsc::channel(64);
    tokio::spawn(stimulus::run_stdin(trigger_tx));
    tokio::spawn(notifier::run(trigger_rx, sink));

    tracing::info!("Player simulator started");

    let pins = PinBank::new(config.tuning.pin_pulse_width());
    if config.device.gamemaster {
        run_gamemaster(&config, &pins).await
    } else {
        run_player(config, &pins).await
    }
}

/// The player loop: one engine action per interval tick.
async fn run_player(config: NodeConfig, pins: &PinBank) -> ! {
    let mut engine = Engine::new(config.device, config.tuning.clone());
    let mut dice = RngDice(StdRng::from_os_rng());
    let mut interval = tokio::time::interval(config.tuning.action_delay());

    loop {
        interval.tick().await;
        if let Some(pulse) = engine.tick(Instant::now(), &mut dice) {
            pins.pulse(pulse).await;
        }
        if engine.is_halted() {
            // The engine already logged "Game over".
            halt_forever().await
        }
    }
}

/// Gamemaster role: no state machine, just a periodic trigger pulse on
/// the shot pin to stimulate other devices on the network.
async fn run_gamemaster(config: &NodeConfig, pins: &PinBank) -> ! {
    let mut interval = tokio::time::interval(config.tuning.gamemaster_delay());
    loop {
        interval.tick().await;
        pins.pulse(PinPulse::Shot).await;
    }
}

/// Park the task permanently; the device must be restarted externally.
async fn halt_forever() -> ! {
    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}
