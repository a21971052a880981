pub mod broadcast;
pub mod builder;
pub mod fees;
pub mod registry;
pub mod stager;
pub mod swap;

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;

use crate::api::ApiClient;
use crate::config::SdkConfig;
use crate::core::error::SdkResult;
use crate::core::tx::UnsignedTransaction;
use crate::core::types::{ClaimRole, FeeMetrics, LaunchRequest, StagedArtifact, TokenRecord};
use crate::pipeline::{
    ArtifactStore, ClaimPipeline, ClaimTxSource, FeeReader, LaunchOutcome, LaunchPipeline,
    TokenSink, TxBroadcaster, TxSource, WalletSigner,
};

pub use broadcast::{BroadcastOutcome, Broadcaster};
pub use builder::TxBuilderService;
pub use fees::FeeService;
pub use registry::{NewToken, RegistryService};
pub use stager::ArtifactStager;
pub use swap::{QuoteTicket, QuoteTracker, SwapService};

/// Main client with service-based architecture. Services share one API
/// client; each can also be used on its own.
pub struct CurvepadClient {
    /// Platform API client
    pub api: Arc<ApiClient>,
    /// Artifact staging service
    pub stager: ArtifactStager,
    /// Server-side transaction builder contracts
    pub builder: Arc<TxBuilderService>,
    /// Submission and confirmation service
    pub broadcaster: Arc<Broadcaster>,
    /// Durable token registry service
    pub registry: RegistryService,
    /// Swap quoting and execution service
    pub swap: SwapService,
    /// Live pool fee counters
    pub fees: FeeService,
}

impl CurvepadClient {
    pub fn new(config: SdkConfig) -> Self {
        let api = Arc::new(ApiClient::new(&config.api_url, config.http_timeout));
        let builder = Arc::new(TxBuilderService::new(api.clone(), config.tx_max_age));
        let broadcaster = Arc::new(Broadcaster::new(
            api.clone(),
            &config.rpc_url,
            &config.commitment,
            config.confirm_timeout,
            config.confirm_poll_interval,
            config.http_timeout,
        ));

        Self {
            stager: ArtifactStager::new(api.clone()),
            builder: builder.clone(),
            broadcaster: broadcaster.clone(),
            registry: RegistryService::new(api.clone()),
            swap: SwapService::new(api.clone(), builder, broadcaster),
            fees: FeeService::new(api.clone()),
            api,
        }
    }

    /// Run the full launch pipeline with the given wallet capability.
    pub fn launch(&self, req: &LaunchRequest, wallet: &dyn WalletSigner) -> LaunchOutcome {
        LaunchPipeline::new(&self.stager, self.builder.as_ref(), self.broadcaster.as_ref(), &self.registry)
            .run(req, wallet)
    }

    /// Claim accrued fees for the creator or partner share.
    pub fn claim(
        &self,
        mint: &Pubkey,
        wallet: &dyn WalletSigner,
        role: ClaimRole,
    ) -> SdkResult<BroadcastOutcome> {
        ClaimPipeline::new(&self.fees, self.builder.as_ref(), self.broadcaster.as_ref())
            .run(mint, wallet, role)
    }
}

// The production services are the pipeline's collaborators.

impl ArtifactStore for ArtifactStager {
    fn stage(&self, req: &LaunchRequest) -> SdkResult<StagedArtifact> {
        ArtifactStager::stage(self, req)
    }
}

impl TxSource for TxBuilderService {
    fn launch_tx(
        &self,
        mint: &Pubkey,
        req: &LaunchRequest,
        metadata_uri: &str,
        user_wallet: &Pubkey,
    ) -> SdkResult<UnsignedTransaction> {
        self.build_launch_tx(mint, &req.name, &req.symbol, metadata_uri, user_wallet)
    }

    fn swap_tx(
        &self,
        mint: &Pubkey,
        lamports: u64,
        user_wallet: &Pubkey,
        is_buy: bool,
    ) -> SdkResult<UnsignedTransaction> {
        self.build_swap_tx(mint, lamports, user_wallet, is_buy)
    }
}

impl ClaimTxSource for TxBuilderService {
    fn claim_tx(
        &self,
        mint: &Pubkey,
        claimant: &Pubkey,
        role: ClaimRole,
    ) -> SdkResult<UnsignedTransaction> {
        self.build_claim_tx(mint, claimant, role)
    }
}

impl TxBroadcaster for Broadcaster {
    fn broadcast(&self, tx: &crate::core::tx::SignedTransaction) -> SdkResult<BroadcastOutcome> {
        Broadcaster::broadcast(self, tx)
    }
}

impl TokenSink for RegistryService {
    fn register(&self, token: &NewToken) -> SdkResult<TokenRecord> {
        RegistryService::register(self, token)
    }
}

impl FeeReader for FeeService {
    fn fee_metrics(&self, mint: &Pubkey) -> SdkResult<FeeMetrics> {
        FeeService::fee_metrics(self, mint)
    }
}
