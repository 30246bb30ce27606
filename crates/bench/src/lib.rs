use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SMALL_SIZE_LIMIT: usize = 4_096;
const MEDIUM_SIZE_LIMIT: usize = 16_384;
const RNG_SEED: u64 = 0x5EED_2026;

/// Sample size, warm-up and measurement time for one input-size tier.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    pub sample_size: usize,
    pub warm_up: Duration,
    pub measurement: Duration,
}

pub const SMALL_RUNTIME: RuntimeConfig = RuntimeConfig {
    sample_size: 15,
    warm_up: Duration::from_millis(100),
    measurement: Duration::from_millis(200),
};

pub const MEDIUM_RUNTIME: RuntimeConfig = RuntimeConfig {
    sample_size: 15,
    warm_up: Duration::from_millis(500),
    measurement: Duration::from_millis(1000),
};

pub const LARGE_RUNTIME: RuntimeConfig = RuntimeConfig {
    sample_size: 10,
    warm_up: Duration::from_millis(800),
    measurement: Duration::from_millis(1500),
};

impl RuntimeConfig {
    pub fn for_size(size: usize) -> Self {
        if size <= SMALL_SIZE_LIMIT {
            SMALL_RUNTIME
        } else if size <= MEDIUM_SIZE_LIMIT {
            MEDIUM_RUNTIME
        } else {
            LARGE_RUNTIME
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        group.sample_size(self.sample_size);
        group.warm_up_time(self.warm_up);
        group.measurement_time(self.measurement);
    }
}

pub fn apply_runtime_config_for_size<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    size: usize,
) {
    RuntimeConfig::for_size(size).apply(group);
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}
