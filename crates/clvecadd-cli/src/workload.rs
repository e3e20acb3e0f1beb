//! Input vectors for a run.

/// Ramp inputs `a[i] = i` and `b[i] = 2 * i` of length `len`.
///
/// `len` must not exceed [`MAX_ELEMENT_COUNT`](crate::config::MAX_ELEMENT_COUNT)
/// for the sums to stay within `i32`.
pub fn ramp_inputs(len: usize) -> (Vec<i32>, Vec<i32>) {
    let a: Vec<i32> = (0..len).map(|i| i as i32).collect();
    let b = a.iter().map(|&x| x.wrapping_mul(2)).collect();
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_elements() {
        let (a, b) = ramp_inputs(4);
        assert_eq!(a, [0, 1, 2, 3]);
        assert_eq!(b, [0, 2, 4, 6]);
    }

    #[test]
    fn empty() {
        let (a, b) = ramp_inputs(0);
        assert!(a.is_empty() && b.is_empty());
    }
}
