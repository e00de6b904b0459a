//! Base-36 codec over the `0-9a-z` alphabet.

use crate::Error;

/// Digits in ascending order of value.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns the number of base-36 digits [`encode_bytes`] emits for `byte_count` input bytes, i.e.
/// `ceil(8 * byte_count / log2(36))`.
pub fn encoded_len(byte_count: usize) -> usize {
    ((byte_count * 8) as f64 / 36f64.log2()).ceil() as usize
}

/// Encodes `bytes`, read as one unsigned little-endian integer, into base-36 digits, most
/// significant first.
///
/// The output always has [`encoded_len`] digits, so an integer with a small value yields leading
/// `'0'`s. Empty input yields an empty string.
///
/// # Examples
///
/// ```rust
/// use cuid2::base36;
///
/// assert_eq!(base36::encode_bytes(&[0xff]), "73");
/// assert_eq!(base36::encode_bytes(&[0x00, 0x01]), "0074");
/// ```
pub fn encode_bytes(bytes: &[u8]) -> String {
    let mut value = bytes.to_vec();
    let mut digits = vec![0u8; encoded_len(bytes.len())];
    write_digits(&mut value, &mut digits);
    debug_assert!(digits.is_ascii());
    // SAFETY: `write_digits` fills `digits` with ASCII alphanumerics only.
    unsafe { String::from_utf8_unchecked(digits) }
}

/// Fills `out` with the base-36 digits of the little-endian integer in `value`, most significant
/// first, dividing `value` down in place. Digits beyond the value's magnitude are `'0'`.
pub(crate) fn write_digits(value: &mut [u8], out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        let mut rem = 0u32;
        for e in value.iter_mut().rev() {
            let cur = (rem << 8) | *e as u32;
            *e = (cur / 36) as u8;
            rem = cur % 36;
        }
        *slot = ALPHABET[rem as usize];
    }
}

/// Encodes `value` into base-36 digits, most significant first, without leading zeros.
///
/// Zero yields an empty string.
pub fn encode_u64(mut value: u64) -> String {
    // u64::MAX takes 13 digits
    let mut buffer = [0u8; 13];
    let mut start = buffer.len();
    while value > 0 {
        start -= 1;
        buffer[start] = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    buffer[start..].iter().map(|&e| e as char).collect()
}

/// Decodes base-36 digits, most significant first, into an integer.
///
/// Letters are accepted in either case. Values beyond the 64-bit range wrap around silently; an
/// empty string decodes to zero.
///
/// # Examples
///
/// ```rust
/// use cuid2::base36;
///
/// assert_eq!(base36::decode("z"), Ok(35));
/// assert_eq!(base36::decode("10"), Ok(36));
/// assert!(base36::decode("1-0").is_err());
/// ```
pub fn decode(src: &str) -> Result<i64, Error> {
    src.chars().try_fold(0i64, |acc, c| {
        let digit = c.to_digit(36).ok_or(Error::InvalidDigit(c))?;
        Ok(acc.wrapping_mul(36).wrapping_add(digit as i64))
    })
}
