//! Unit conversions for derived attributes

use kineticpanel_domain::constants::BYTES_PER_MEGABYTE;

/// Round `value` to `decimals` places, halves rounding up.
#[allow(clippy::cast_possible_wrap)]
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Bytes to megabytes with two decimal places.
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_mb(bytes: i64) -> f64 {
    round_half_up(bytes as f64 / BYTES_PER_MEGABYTE as f64, 2)
}

/// Bytes to whole megabytes, truncating. Display-only.
pub fn bytes_to_whole_mb(bytes: i64) -> i64 {
    bytes / BYTES_PER_MEGABYTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_gibibytes_is_2048_mb() {
        assert_eq!(bytes_to_mb(2_147_483_648), 2048.0);
        assert_eq!(bytes_to_whole_mb(2_147_483_648), 2048);
    }

    #[test]
    fn fractional_megabytes_keep_two_decimals() {
        // 1.5 MiB
        assert_eq!(bytes_to_mb(1_572_864), 1.5);
        // 1 MiB + 5243 bytes = 1.00500011... MiB
        assert_eq!(bytes_to_mb(1_048_576 + 5_243), 1.01);
        assert_eq!(bytes_to_whole_mb(1_572_864), 1);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(12.344, 2), 12.34);
    }
}
