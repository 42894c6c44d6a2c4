//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, so a seeded session replays the same word sequence.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound). Returns 0 for an empty range.
    pub fn next_index(&mut self, upper_bound: usize) -> usize {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as usize
    }

    /// Pick an index in [0, len) that differs from `previous` whenever
    /// `len > 1`. The draw is uniform over the remaining indices.
    pub fn next_index_excluding(&mut self, len: usize, previous: Option<usize>) -> usize {
        match previous {
            Some(prev) if len > 1 && prev < len => {
                let pick = self.next_index(len - 1);
                if pick >= prev {
                    pick + 1
                } else {
                    pick
                }
            }
            _ => self.next_index(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_index(1000), rng2.next_index(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.next_index(100);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn excluding_never_repeats_previous() {
        let mut rng = Rng::new(9);
        for prev in 0..4 {
            for _ in 0..50 {
                let pick = rng.next_index_excluding(4, Some(prev));
                assert_ne!(pick, prev);
                assert!(pick < 4);
            }
        }
    }

    #[test]
    fn excluding_single_item_returns_it() {
        let mut rng = Rng::new(5);
        assert_eq!(rng.next_index_excluding(1, Some(0)), 0);
        assert!(rng.next_index_excluding(3, None) < 3);
    }
}
