//! One-stop imports for common SDK usage.

pub use crate::client::{
    BroadcastOutcome, Broadcaster, CurvepadClient, FeeService, QuoteTracker, RegistryService,
    SwapService, TxBuilderService,
};
pub use crate::config::SdkConfig;
pub use crate::core::amount::{format_sol, parse_sol};
pub use crate::core::error::{SdkError, SdkResult};
pub use crate::core::tx::{EphemeralMint, SignedTransaction, UnsignedTransaction};
pub use crate::core::types::{
    ClaimRole, FeeMetrics, LaunchRequest, SocialLinks, StagedArtifact, TokenKind, TokenRecord,
};
pub use crate::pipeline::{
    ClaimPipeline, DevBuyResult, FailureReason, LaunchOutcome, LaunchPipeline, LaunchState,
    LocalWallet, WalletSigner,
};
