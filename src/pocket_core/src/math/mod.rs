pub mod lehmer;
pub mod n_ary;

/// A precomputed factorial table for 0! to 12!, where index[i] is i!. 12! is
/// the largest factorial that fits in a `u32`.
const FACT_UNTIL_12: [u32; 13] = {
    let mut arr = [0; 13];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};

/// `n!` for `n <= 12`.
///
/// # Panics
///
/// Panics if `n > 12`.
#[must_use]
pub const fn factorial(n: usize) -> u32 {
    FACT_UNTIL_12[n]
}
