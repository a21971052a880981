//! Typed contracts for the server-side transaction builder.
//!
//! Pool creation, swaps and fee claims are all constructed server-side: the
//! builder holds the pool configuration key (fee tier, curve parameters) that
//! must not be client-trusted. The SDK owns the request/response contract and
//! the blockhash lease on the returned payload.

use std::sync::Arc;
use std::time::Duration;

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::api::{wire, ApiClient};
use crate::core::error::{SdkError, SdkResult};
use crate::core::tx::UnsignedTransaction;
use crate::core::types::ClaimRole;

pub struct TxBuilderService {
    api: Arc<ApiClient>,
    tx_max_age: Duration,
}

impl TxBuilderService {
    pub fn new(api: Arc<ApiClient>, tx_max_age: Duration) -> Self {
        Self { api, tx_max_age }
    }

    /// Build the launch transaction: creates the mint account keyed to the
    /// ephemeral mint pubkey and initializes the bonding-curve pool.
    /// Precondition: `metadata_uri` resolves, i.e. staging completed.
    pub fn build_launch_tx(
        &self,
        mint: &Pubkey,
        token_name: &str,
        token_symbol: &str,
        metadata_uri: &str,
        user_wallet: &Pubkey,
    ) -> SdkResult<UnsignedTransaction> {
        if metadata_uri.is_empty() {
            return Err(SdkError::Validation(
                "metadata URI must be staged before building the launch transaction".into(),
            ));
        }
        let response: wire::CreatePoolResponse = self.api.post_json(
            "/create-pool-transaction",
            &wire::CreatePoolRequest {
                mint: &mint.to_string(),
                token_name,
                token_symbol,
                metadata_uri,
                user_wallet: &user_wallet.to_string(),
            },
        )?;
        debug!(mint = %mint, "built launch transaction");
        UnsignedTransaction::decode_base64(&response.pool_tx, self.tx_max_age)
    }

    /// Build a swap against an existing pool.
    pub fn build_swap_tx(
        &self,
        mint: &Pubkey,
        lamports: u64,
        user_wallet: &Pubkey,
        is_buy: bool,
    ) -> SdkResult<UnsignedTransaction> {
        let response: wire::SwapTxResponse = self.api.post_json(
            "/swap-transaction",
            &wire::SwapTxRequest {
                mint: &mint.to_string(),
                amount: lamports,
                user_wallet: &user_wallet.to_string(),
                is_buy,
            },
        )?;
        debug!(mint = %mint, lamports, is_buy, "built swap transaction");
        UnsignedTransaction::decode_base64(&response.swap_tx, self.tx_max_age)
    }

    /// Build a fee-claim transaction for the creator or partner share.
    pub fn build_claim_tx(
        &self,
        mint: &Pubkey,
        claimant: &Pubkey,
        role: ClaimRole,
    ) -> SdkResult<UnsignedTransaction> {
        let mint_str = mint.to_string();
        let claimant_str = claimant.to_string();
        let response: wire::ClaimTxResponse = match role {
            ClaimRole::Creator => self.api.post_json(
                "/claim-creator-fee",
                &wire::ClaimCreatorRequest {
                    base_mint: &mint_str,
                    creator: &claimant_str,
                },
            )?,
            ClaimRole::Partner => self.api.post_json(
                "/claim-partner-fee",
                &wire::ClaimPartnerRequest {
                    base_mint: &mint_str,
                    fee_claimer: &claimant_str,
                },
            )?,
        };
        debug!(mint = %mint, %role, "built claim transaction");
        UnsignedTransaction::decode_base64(&response.claim_tx, self.tx_max_age)
    }
}
