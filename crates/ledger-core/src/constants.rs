pub const HASH_SEPARATOR: char = '-';
pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const GENESIS_INDEX: u64 = 0;
pub const DEFAULT_SENDER: &str = "Pedro";
pub const DEFAULT_AMOUNT: f64 = 1.0;
/// Chains shorter than this are verified sequentially even when a parallel scan is requested.
pub const PARALLEL_VERIFY_THRESHOLD: usize = 1024;
