//! Live pool fee counters.
//!
//! Counters arrive as decimal-string-encoded integers and are parsed as u128.
//! They are read fresh on every call and never cached: claim correctness
//! depends on freshness, and a stale zero would block a legitimate claim.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::api::{wire, ApiClient};
use crate::core::error::{SdkError, SdkResult};
use crate::core::types::{parse_raw_amount, FeeMetrics};

pub struct FeeService {
    api: Arc<ApiClient>,
}

impl FeeService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn fee_metrics(&self, mint: &Pubkey) -> SdkResult<FeeMetrics> {
        let response: wire::FeeMetricsResponse = self
            .api
            .get_json(&format!("/pool-fee-metrics?baseMint={mint}"))?;
        if !response.success {
            return Err(SdkError::Upstream {
                status: 200,
                message: "fee metrics endpoint reported failure".into(),
            });
        }
        let metrics = FeeMetrics {
            creator_base: parse_raw_amount(&response.creator_base_fee, "creatorBaseFee")?,
            creator_quote: parse_raw_amount(&response.creator_quote_fee, "creatorQuoteFee")?,
            partner_base: parse_raw_amount(&response.partner_base_fee, "partnerBaseFee")?,
            partner_quote: parse_raw_amount(&response.partner_quote_fee, "partnerQuoteFee")?,
        };
        debug!(
            mint = %mint,
            creator_base = metrics.creator_base,
            creator_quote = metrics.creator_quote,
            partner_base = metrics.partner_base,
            partner_quote = metrics.partner_quote,
            "read pool fee metrics"
        );
        Ok(metrics)
    }
}
