//! Platform limits enforced client-side before any network round-trip.

use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Hard ceiling for a single buy, in lamports (10 SOL). The builder rejects
/// larger amounts server-side; checking here saves a build+sign round-trip.
pub const MAX_BUY_LAMPORTS: u64 = 10 * LAMPORTS_PER_SOL;

/// Largest accepted token image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// On-chain metadata field limits.
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;

/// Default lease window for an unsigned transaction's blockhash. Using a
/// transaction past this window fails fast instead of broadcasting a payload
/// the cluster will reject with an ambiguous error.
pub const DEFAULT_TX_MAX_AGE_SECS: u64 = 60;

/// Default confirmation polling window and interval.
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_CONFIRM_POLL_MS: u64 = 500;

/// Default HTTP timeout for platform API and RPC requests.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
