//! Ranking of permutations through their Lehmer code, i.e. the factorial
//! number system.

use super::FACT_UNTIL_12;

/// Rank a permutation of `0..perm.len()`. For every position we count the
/// symbols to its right that are smaller than it and weigh that count by the
/// factorial of the number of positions after it. Lexicographically ordered
/// permutations get consecutive ranks, so the result lies in
/// `0..perm.len()!`.
///
/// The result is meaningless if `perm` is not a permutation.
///
/// # Panics
///
/// Panics if `perm` has more than 12 elements, because the rank would not fit
/// in a `u32`.
#[must_use]
pub fn rank(perm: &[u8]) -> u32 {
    assert!(perm.len() < FACT_UNTIL_12.len());
    perm.iter()
        .enumerate()
        .map(|(i, &symbol)| {
            let smaller_after = perm[i + 1..]
                .iter()
                .filter(|&&other| other < symbol)
                .count();
            smaller_after as u32 * FACT_UNTIL_12[perm.len() - 1 - i]
        })
        .sum()
}

/// The inverse of [`rank`]: rebuild the permutation of `0..N` whose rank is
/// `index`. Returns `None` if `index` is not below `N!`.
#[must_use]
pub fn unrank<const N: usize>(mut index: u32) -> Option<[u8; N]> {
    if N >= FACT_UNTIL_12.len() || index >= FACT_UNTIL_12[N] {
        return None;
    }
    // Symbols that have not been placed yet, in increasing order. Only the
    // first `pool_len` entries are meaningful.
    let mut pool: [u8; N] = std::array::from_fn(|i| i as u8);
    let mut pool_len = N;
    let mut perm = [0; N];
    for (i, slot) in perm.iter_mut().enumerate() {
        let fact = FACT_UNTIL_12[N - 1 - i];
        let digit = (index / fact) as usize;
        index %= fact;
        *slot = pool[digit];
        pool.copy_within(digit + 1..pool_len, digit);
        pool_len -= 1;
    }
    Some(perm)
}
