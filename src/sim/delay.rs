//! 消息传输时延生成器

use super::time::SimTime;
use crate::error::ConfigError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// 为每条消息产生非负的传输时延。
pub trait DelayGenerator: Send {
    fn next_delay(&mut self) -> SimTime;

    /// 从当前种子重新开始，重放同一序列。
    fn reset(&mut self);

    /// 切换到一个新的种子（并从头开始）。
    fn generate_new_seed(&mut self);

    fn seed(&self) -> u64;
}

/// 恒为 0 的时延。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayGenerator for NoDelay {
    fn next_delay(&mut self) -> SimTime {
        SimTime::ZERO
    }

    fn reset(&mut self) {}

    fn generate_new_seed(&mut self) {}

    fn seed(&self) -> u64 {
        0
    }
}

/// `[min, max]` 区间内均匀分布的随机时延。
///
/// 新种子由一条独立的种子流产生，因此整组重复实验只由初始种子决定。
#[derive(Debug, Clone)]
pub struct RandomDelay {
    min: u64,
    max: u64,
    seed: u64,
    rng: ChaCha20Rng,
    seeder: ChaCha20Rng,
}

impl RandomDelay {
    pub fn new(min: u64, max: u64, seed: u64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidDelayRange { min, max });
        }
        Ok(Self {
            min,
            max,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            seeder: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

impl DelayGenerator for RandomDelay {
    fn next_delay(&mut self) -> SimTime {
        SimTime(self.rng.gen_range(self.min..=self.max))
    }

    fn reset(&mut self) {
        self.rng = ChaCha20Rng::seed_from_u64(self.seed);
    }

    fn generate_new_seed(&mut self) {
        self.seed = self.seeder.r#gen();
        self.reset();
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
