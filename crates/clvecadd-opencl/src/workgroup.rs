//! Local work-group sizing for a one-dimensional dispatch.

/// Largest local work size that divides `global` and does not exceed `max`.
///
/// OpenCL 1.x rejects a dispatch whose global size is not a multiple of the
/// local size, so the device maximum alone is only usable when it divides the
/// input length. Returns `0` when `global` is `0` and `1` when `max` is `0`.
pub fn local_work_size(global: usize, max: usize) -> usize {
    if global == 0 {
        return 0;
    }
    let upper = max.clamp(1, global);
    if global.is_multiple_of(upper) {
        return upper;
    }
    (1..upper).rev().find(|&size| global.is_multiple_of(size)).unwrap_or(1)
}

/// Device work-group maximum, optionally capped by configuration.
pub fn effective_max(device_max: usize, cap: Option<usize>) -> usize {
    match cap {
        Some(cap) => device_max.min(cap),
        None => device_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_length_uses_device_maximum() {
        assert_eq!(local_work_size(32 * 1024 * 1024, 256), 256);
        assert_eq!(local_work_size(4096, 1024), 1024);
    }

    #[test]
    fn odd_length_falls_back_to_a_divisor() {
        assert_eq!(local_work_size(1000, 256), 250);
        assert_eq!(local_work_size(7, 256), 7);
        assert_eq!(local_work_size(7, 4), 1);
    }

    #[test]
    fn prime_length_above_max_uses_one() {
        assert_eq!(local_work_size(10_007, 256), 1);
    }

    #[test]
    fn zero_cases() {
        assert_eq!(local_work_size(0, 256), 0);
        assert_eq!(local_work_size(12, 0), 1);
    }

    #[test]
    fn cap_limits_device_maximum() {
        assert_eq!(effective_max(1024, Some(64)), 64);
        assert_eq!(effective_max(128, Some(512)), 128);
        assert_eq!(effective_max(256, None), 256);
    }
}
