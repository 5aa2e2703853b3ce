// Parameters of the regression network the fixtures target

/// Smallest-unit value of one coin
pub const COIN: i64 = 100_000_000;

/// One hundredth of a coin, the unit the reward schedule is written in
pub const MCOIN: i64 = COIN / 100;

/// Value of each of the two coinbase outputs
pub const BLOCK_REWARD: i64 = 2280 * MCOIN;

/// Height at which masternode payments activate
pub const MN_PAYMENT_START_HEIGHT: u32 = 240;

/// Superblock reward logic triggers every this many blocks
pub const SUPERBLOCK_CYCLE: u32 = 60;

/// Lowest-difficulty compact target the regression network accepts.
/// Fixtures carry no proof of work, so they stop validating after any
/// difficulty retarget away from this minimum.
pub const REGTEST_BITS: u32 = 0x207fffff;

/// Block version stamped on generated headers
pub const BLOCK_VERSION: u32 = 1;

/// Forward offset added to the wall clock when no timestamp is given,
/// keeping fixture blocks clear of "too far in the past" checks
pub const BLOCK_TIME_OFFSET_SECS: u32 = 600;

/// HASH160 of the second-tier reward recipient's public key,
/// a fixed test address on the regression network
pub const BACKBONE_PUBKEY_HASH: [u8; 20] = [
    0xb5, 0x06, 0xa5, 0xb1, 0x75, 0x06, 0xba, 0xb7, 0xa7, 0xe6,
    0x8e, 0xe5, 0x57, 0x04, 0x6d, 0x64, 0xa0, 0x1a, 0x6f, 0x0d,
];
