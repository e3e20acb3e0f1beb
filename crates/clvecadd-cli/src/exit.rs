// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_OFFLOAD_FAIL: i32 = 1;
pub const EXIT_CONFIG_FAIL: i32 = 2;
