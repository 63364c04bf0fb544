/// The number of reward tokens in a pool.
pub const NUM_REWARDS: usize = 3;
