//! Seeded order workloads for scenarios and benchmarks.
//!
//! Same seed, same orders: runs are reproducible across implementations.

use crate::types::pack_size::PackSize;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal};
use thiserror::Error;

/// The sizes a warehouse typically starts with.
pub const STANDARD_PACK_SIZES: [u32; 5] = [250, 500, 1000, 2000, 5000];

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("invalid order range {min}..={max}")]
    InvalidRange { min: u32, max: u32 },

    #[error("invalid log-normal parameters: mu={mu}, sigma={sigma}")]
    InvalidLogNormal { mu: f64, sigma: f64 },

    #[error("invalid log-normal parameters: {0}")]
    LogNormal(#[from] rand_distr::NormalError),

    #[error("cannot draw {count} distinct pack sizes from 1..={max}")]
    TooManySizes { count: usize, max: u32 },
}

/// How order quantities are drawn.
#[derive(Debug, Clone, Copy)]
pub enum OrderDistribution {
    /// Every quantity in `min..=max` equally likely
    Uniform { min: u32, max: u32 },
    /// Mostly small orders with a long tail, capped at `max`
    LogNormal { mu: f64, sigma: f64, max: u32 },
}

enum Sampler {
    Uniform { min: u32, max: u32 },
    LogNormal { dist: LogNormal<f64>, max: u32 },
}

/// Endless, seeded stream of order quantities (all `>= 1`).
pub struct OrderStream {
    rng: StdRng,
    sampler: Sampler,
}

impl OrderStream {
    pub fn new(distribution: OrderDistribution, seed: u64) -> Result<Self, WorkloadError> {
        let sampler = match distribution {
            OrderDistribution::Uniform { min, max } => {
                if min == 0 || min > max {
                    return Err(WorkloadError::InvalidRange { min, max });
                }
                Sampler::Uniform { min, max }
            }
            OrderDistribution::LogNormal { mu, sigma, max } => {
                if max == 0 {
                    return Err(WorkloadError::InvalidRange { min: 1, max });
                }
                if !(mu.is_finite() && sigma.is_finite() && sigma >= 0.0) {
                    return Err(WorkloadError::InvalidLogNormal { mu, sigma });
                }
                Sampler::LogNormal {
                    dist: LogNormal::new(mu, sigma)?,
                    max,
                }
            }
        };

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            sampler,
        })
    }

    pub fn next_order(&mut self) -> u32 {
        match &self.sampler {
            Sampler::Uniform { min, max } => self.rng.random_range(*min..=*max),
            Sampler::LogNormal { dist, max } => {
                let raw = dist.sample(&mut self.rng).round();
                if raw.is_nan() {
                    return 1;
                }
                raw.clamp(1.0, f64::from(*max)) as u32
            }
        }
    }
}

impl Iterator for OrderStream {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_order())
    }
}

/// `count` distinct sizes drawn from `1..=max`, strictly descending.
pub fn random_pack_sizes(
    count: usize,
    max: u32,
    seed: u64,
) -> Result<Vec<PackSize>, WorkloadError> {
    if count > max as usize {
        return Err(WorkloadError::TooManySizes { count, max });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sizes: Vec<PackSize> = index::sample(&mut rng, max as usize, count)
        .into_iter()
        .filter_map(|i| PackSize::new(i as u32 + 1))
        .collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(sizes)
}

/// [`STANDARD_PACK_SIZES`] as a descending size list.
pub fn standard_pack_sizes() -> Vec<PackSize> {
    STANDARD_PACK_SIZES
        .iter()
        .rev()
        .filter_map(|&v| PackSize::new(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_orders() {
        let dist = OrderDistribution::Uniform { min: 1, max: 20_000 };
        let a: Vec<u32> = OrderStream::new(dist, 42).expect("valid").take(100).collect();
        let b: Vec<u32> = OrderStream::new(dist, 42).expect("valid").take(100).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|&q| (1..=20_000).contains(&q)));
    }

    #[test]
    fn test_log_normal_is_capped() {
        let dist = OrderDistribution::LogNormal {
            mu: 7.0,
            sigma: 1.5,
            max: 50_000,
        };
        let stream = OrderStream::new(dist, 7).expect("valid");

        assert!(stream.take(1_000).all(|q| (1..=50_000).contains(&q)));
    }

    #[test]
    fn test_rejects_invalid_distributions() {
        assert!(matches!(
            OrderStream::new(OrderDistribution::Uniform { min: 0, max: 10 }, 1),
            Err(WorkloadError::InvalidRange { .. })
        ));
        assert!(matches!(
            OrderStream::new(OrderDistribution::Uniform { min: 11, max: 10 }, 1),
            Err(WorkloadError::InvalidRange { .. })
        ));
        assert!(matches!(
            OrderStream::new(
                OrderDistribution::LogNormal {
                    mu: 1.0,
                    sigma: -1.0,
                    max: 10
                },
                1
            ),
            Err(WorkloadError::InvalidLogNormal { .. })
        ));
        assert!(matches!(
            OrderStream::new(
                OrderDistribution::LogNormal {
                    mu: f64::NAN,
                    sigma: 1.0,
                    max: 10
                },
                1
            ),
            Err(WorkloadError::InvalidLogNormal { .. })
        ));
        assert!(matches!(
            OrderStream::new(
                OrderDistribution::LogNormal {
                    mu: 1.0,
                    sigma: f64::INFINITY,
                    max: 10
                },
                1
            ),
            Err(WorkloadError::InvalidLogNormal { .. })
        ));
    }

    #[test]
    fn test_log_normal_extremes_stay_in_range() {
        let huge = OrderDistribution::LogNormal {
            mu: 800.0,
            sigma: 0.0,
            max: 1_000,
        };
        let tiny = OrderDistribution::LogNormal {
            mu: -800.0,
            sigma: 0.0,
            max: 1_000,
        };

        let huge: Vec<u32> = OrderStream::new(huge, 5).expect("valid").take(10).collect();
        let tiny: Vec<u32> = OrderStream::new(tiny, 5).expect("valid").take(10).collect();

        assert_eq!(huge, vec![1_000; 10]);
        assert_eq!(tiny, vec![1; 10]);
    }

    #[test]
    fn test_random_pack_sizes() {
        let sizes = random_pack_sizes(6, 100, 3).expect("enough room");

        assert_eq!(sizes.len(), 6);
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
        assert!(sizes.iter().all(|s| (1..=100).contains(&s.value())));
        assert!(matches!(
            random_pack_sizes(11, 10, 3),
            Err(WorkloadError::TooManySizes { .. })
        ));
    }

    #[test]
    fn test_standard_pack_sizes_descending() {
        let values: Vec<u32> = standard_pack_sizes().iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![5000, 2000, 1000, 500, 250]);
    }
}
