//! SDK error types

use thiserror::Error;

use crate::core::types::ClaimRole;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Invalid input, caught before any network or on-chain effect
    #[error("Invalid parameters: {0}")]
    Validation(String),

    /// The wallet declined to sign; terminal for the attempt
    #[error("User rejected the signature request")]
    UserRejected,

    /// Wallet signing failed for a reason other than user rejection
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The unsigned transaction's blockhash lease has lapsed; rebuild required
    #[error("Transaction is stale: built more than {0}s ago, rebuild from a fresh blockhash")]
    StaleTransaction(u64),

    /// Submission was definitively rejected by the network or the send endpoint
    #[error("Broadcast rejected: {0}")]
    BroadcastRejected(String),

    /// Confirmation window elapsed; the transaction may still land
    #[error("Confirmation timed out for {0}; check the explorer before retrying")]
    ConfirmationTimeout(String),

    /// Zero fee balance for the requested role; no transaction was built
    #[error("Nothing to claim for role {0}")]
    ClaimNotAvailable(ClaimRole),

    /// Upstream 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream 409, e.g. duplicate mint on registry write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other upstream HTTP failure
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure before an HTTP status was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON-RPC error from the cluster
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Malformed wire payload: bad base64/bincode blob, unparseable counter, etc.
    #[error("Wire error: {0}")]
    Wire(String),
}

pub type SdkResult<T> = Result<T, SdkError>;
