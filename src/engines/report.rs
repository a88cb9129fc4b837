use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Metadata attached to every engine report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub algorithm: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    pub seed: Option<u64>,
}

/// Started clock for a run; `finish` turns it into a `RunInfo`
pub struct RunClock {
    algorithm: &'static str,
    started_at: DateTime<Utc>,
    start: Instant,
    seed: Option<u64>,
}

impl RunClock {
    pub fn start(algorithm: &'static str, seed: Option<u64>) -> Self {
        log::info!("Starting {}", algorithm);
        Self {
            algorithm,
            started_at: Utc::now(),
            start: Instant::now(),
            seed,
        }
    }

    pub fn finish(self) -> RunInfo {
        let elapsed_ms = self.start.elapsed().as_millis();
        log::info!("{} finished in {} ms", self.algorithm, elapsed_ms);
        RunInfo {
            algorithm: self.algorithm.to_string(),
            started_at: self.started_at,
            elapsed_ms,
            seed: self.seed,
        }
    }
}

/// Run `f` and log how long it took
pub fn timed<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    log::debug!("({}) Δt: {:.4} seconds", label, start.elapsed().as_secs_f64());
    result
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
