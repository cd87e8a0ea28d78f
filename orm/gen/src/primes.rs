//! Prime constants for generated `hashCode` methods.
//!
//! The hash-code synthesizer takes its seed and multiplier from an injected
//! [`PrimeSource`]. [`RandomPrimes`] draws a fresh pair per class,
//! [`SharedPerRun`] reuses the first pair for a whole run, and [`FixedPrimes`]
//! always returns the same pair.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half-open range the seed prime is drawn from.
pub const SEED_RANGE: (u32, u32) = (2, 10);
/// Half-open range the multiplier prime is drawn from.
pub const MULTIPLIER_RANGE: (u32, u32) = (10, 100);

const FALLBACK: HashPrimes = HashPrimes {
    seed: 7,
    multiplier: 31,
};

/// Seed and multiplier used by one `hashCode` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashPrimes {
    pub seed: u32,
    pub multiplier: u32,
}

/// Supplies the primes for each synthesized `hashCode`.
pub trait PrimeSource {
    fn next_primes(&mut self) -> HashPrimes;
}

/// Draws a fresh pair for every call.
#[derive(Debug)]
pub struct RandomPrimes {
    rng: StdRng,
}

impl RandomPrimes {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source: the same seed yields the same sequence of pairs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn draw(&mut self, (low, high): (u32, u32)) -> Option<u32> {
        let start = self.rng.gen_range(low..high);
        prime_in_range(start, low, high)
    }
}

impl PrimeSource for RandomPrimes {
    fn next_primes(&mut self) -> HashPrimes {
        HashPrimes {
            seed: self.draw(SEED_RANGE).unwrap_or(FALLBACK.seed),
            multiplier: self.draw(MULTIPLIER_RANGE).unwrap_or(FALLBACK.multiplier),
        }
    }
}

/// Caches the first pair drawn from `inner` and returns it for every later call.
#[derive(Debug)]
pub struct SharedPerRun<S> {
    inner: S,
    cached: Option<HashPrimes>,
}

impl<S: PrimeSource> SharedPerRun<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, cached: None }
    }
}

impl<S: PrimeSource> PrimeSource for SharedPerRun<S> {
    fn next_primes(&mut self) -> HashPrimes {
        *self.cached.get_or_insert_with(|| self.inner.next_primes())
    }
}

/// Always returns the same pair.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrimes(pub HashPrimes);

impl Default for FixedPrimes {
    fn default() -> Self {
        FixedPrimes(FALLBACK)
    }
}

impl PrimeSource for FixedPrimes {
    fn next_primes(&mut self) -> HashPrimes {
        self.0
    }
}

/// Primality by trial division.
///
/// ```
/// use orm_gen::primes::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(97));
/// assert!(!is_prime(1));
/// assert!(!is_prime(91));
/// ```
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Finds a prime in `[low, high)` scanning upward from `start`, then downward
/// from `start` when the upward scan leaves the range.
pub fn prime_in_range(start: u32, low: u32, high: u32) -> Option<u32> {
    let start = start.clamp(low, high.saturating_sub(1));
    (start..high)
        .find(|&n| is_prime(n))
        .or_else(|| (low..start).rev().find(|&n| is_prime(n)))
}
