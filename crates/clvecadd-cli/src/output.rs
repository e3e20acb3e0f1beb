//! Result line printed on standard output.

/// Prefix of the single stdout line reported on success.
pub const EXECUTION_TIME_PREFIX: &str = "OpenCL execution time: ";

/// `OpenCL execution time: <seconds>s`
pub fn execution_time_line(seconds: f64) -> String {
    format!("{EXECUTION_TIME_PREFIX}{seconds}s")
}

/// Inverse of [`execution_time_line`].
pub fn parse_execution_time_line(line: &str) -> Option<f64> {
    line.strip_prefix(EXECUTION_TIME_PREFIX)?.strip_suffix('s')?.parse().ok()
}
