//! Positional base-n numbers over fixed-size digit arrays.

/// Interpret `digits` as a number written in `base`, most significant digit
/// first.
#[must_use]
pub fn rank(digits: &[u8], base: u8) -> u32 {
    digits
        .iter()
        .fold(0, |acc, &digit| acc * u32::from(base) + u32::from(digit))
}

/// The inverse of [`rank`] for exactly `N` digits. Returns `None` if `value`
/// needs more than `N` digits.
#[must_use]
pub fn unrank<const N: usize>(mut value: u32, base: u8) -> Option<[u8; N]> {
    let base = u32::from(base);
    let mut digits = [0; N];
    for digit in digits.iter_mut().rev() {
        *digit = (value % base) as u8;
        value /= base;
    }
    (value == 0).then_some(digits)
}
