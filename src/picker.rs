use rand::Rng;

/// Pick one element uniformly at random. Returns `None` for an empty slice.
///
/// The index is `trunc(u * len)` for `u` drawn from `[0, 1)`, clamped so it
/// can never reach `len` even if the float product rounds up.
pub fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let u: f64 = rng.random();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let index = ((u * items.len() as f64) as usize).min(items.len() - 1);
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Always yields the largest possible value, so `u` is as close to 1 as
    /// the generator allows.
    struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn empty_yields_none() {
        let items: [u32; 0] = [];
        assert_eq!(pick(&items, &mut rand::rng()), None);
    }

    #[test]
    fn single_item_always_chosen() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(pick(&["only"], &mut rng), Some(&"only"));
        }
    }

    #[test]
    fn extreme_draws_stay_in_range() {
        let items = [0, 1, 2, 3, 4];
        assert_eq!(pick(&items, &mut MaxRng), Some(&4));
        assert_eq!(pick(&items, &mut ZeroRng), Some(&0));
    }

    #[test]
    fn never_returns_index_len() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=17usize {
            let items: Vec<usize> = (0..n).collect();
            let mut hits = vec![0u32; n];
            for _ in 0..2_000 {
                let &i = pick(&items, &mut rng).unwrap();
                assert!(i < n);
                hits[i] += 1;
            }
            // every index is reachable, including the last one
            assert!(hits.iter().all(|&h| h > 0), "n={n} hits={hits:?}");
        }
    }
}
