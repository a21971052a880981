//! Domain types shared across the launch and fee-settlement pipelines.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{MAX_BUY_LAMPORTS, MAX_IMAGE_BYTES, MAX_NAME_LEN, MAX_SYMBOL_LEN};
use crate::core::error::{SdkError, SdkResult};

/// Optional social links attached to token metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

/// What kind of token is being launched. Stored as a tagged variant rather
/// than a loose JSON blob so asset fields are validated at the boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenKind {
    Memecoin,
    #[serde(rename_all = "camelCase")]
    RealWorldAsset {
        asset_type: String,
        description: String,
        /// Appraised value in whole quote-currency units.
        value: u64,
        location: String,
        /// URIs of supporting documents.
        documents: Vec<String>,
    },
}

impl TokenKind {
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Memecoin => "memecoin",
            TokenKind::RealWorldAsset { .. } => "rwa",
        }
    }

    pub fn validate(&self) -> SdkResult<()> {
        if let TokenKind::RealWorldAsset {
            asset_type,
            description,
            location,
            ..
        } = self
        {
            if asset_type.trim().is_empty() {
                return Err(SdkError::Validation("asset type is required".into()));
            }
            if description.trim().is_empty() {
                return Err(SdkError::Validation("asset description is required".into()));
            }
            if location.trim().is_empty() {
                return Err(SdkError::Validation("asset location is required".into()));
            }
        }
        Ok(())
    }
}

/// Everything needed to attempt one launch. Ephemeral: created per attempt
/// and discarded after a terminal state.
#[derive(Clone, Debug)]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: Vec<u8>,
    pub kind: TokenKind,
    pub socials: SocialLinks,
    /// Same-session dev buy against the new pool, in lamports.
    pub dev_buy_lamports: Option<u64>,
}

impl LaunchRequest {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            description: None,
            image,
            kind: TokenKind::Memecoin,
            socials: SocialLinks::default(),
            dev_buy_lamports: None,
        }
    }

    /// Checked before any network effect; a validation failure here never
    /// costs the user an upload or a signature prompt.
    pub fn validate(&self) -> SdkResult<()> {
        if self.name.trim().is_empty() {
            return Err(SdkError::Validation("token name is required".into()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(SdkError::Validation(format!(
                "token name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(SdkError::Validation("token symbol is required".into()));
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(SdkError::Validation(format!(
                "token symbol exceeds {MAX_SYMBOL_LEN} characters"
            )));
        }
        if self.image.is_empty() {
            return Err(SdkError::Validation("token image is required".into()));
        }
        if self.image.len() > MAX_IMAGE_BYTES {
            return Err(SdkError::Validation(format!(
                "image exceeds {} bytes",
                MAX_IMAGE_BYTES
            )));
        }
        if let Some(lamports) = self.dev_buy_lamports {
            if lamports == 0 {
                return Err(SdkError::Validation("dev buy amount must be > 0".into()));
            }
            if lamports > MAX_BUY_LAMPORTS {
                return Err(SdkError::Validation(format!(
                    "dev buy amount exceeds platform ceiling of {MAX_BUY_LAMPORTS} lamports"
                )));
            }
        }
        self.kind.validate()
    }
}

/// Content-addressed URIs produced by staging. Immutable once returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedArtifact {
    pub image_uri: String,
    pub metadata_uri: String,
}

/// Durable record of a launched token. Exists only after the launch
/// transaction confirmed; `mint` is the natural key.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenRecord {
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub metadata_uri: String,
    pub pool_address: Option<Pubkey>,
    pub creator_wallet: Pubkey,
    pub kind: TokenKind,
    pub created_at: DateTime<Utc>,
}

/// Which share of pool fees a claim targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimRole {
    Creator,
    Partner,
}

impl fmt::Display for ClaimRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimRole::Creator => f.write_str("creator"),
            ClaimRole::Partner => f.write_str("partner"),
        }
    }
}

/// Live fee counters read from the pool, in raw integer units. Never cached:
/// claim correctness depends on freshness. Parsed from decimal strings, never
/// through floating point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeMetrics {
    pub creator_base: u128,
    pub creator_quote: u128,
    pub partner_base: u128,
    pub partner_quote: u128,
}

impl FeeMetrics {
    /// Exact integer comparison against zero; a claim is only worth building
    /// when at least one counter for the role is strictly positive.
    pub fn claimable(&self, role: ClaimRole) -> bool {
        match role {
            ClaimRole::Creator => self.creator_base > 0 || self.creator_quote > 0,
            ClaimRole::Partner => self.partner_base > 0 || self.partner_quote > 0,
        }
    }
}

/// Parse a decimal-string-encoded raw fee counter.
pub fn parse_raw_amount(value: &str, field: &'static str) -> SdkResult<u128> {
    value
        .parse::<u128>()
        .map_err(|_| SdkError::Wire(format!("{field} is not a decimal integer: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> LaunchRequest {
        LaunchRequest::new("Dogwifpool", "WIFP", vec![0u8; 64])
    }

    #[test]
    fn accepts_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let mut req = valid_request();
        req.name = " ".into();
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));

        let mut req = valid_request();
        req.symbol = "TOOLONGSYMBOL".into();
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));

        let mut req = valid_request();
        req.image.clear();
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn image_size_limit_is_exact() {
        let mut req = valid_request();
        req.image = vec![0u8; MAX_IMAGE_BYTES];
        assert!(req.validate().is_ok());

        req.image.push(0);
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn dev_buy_ceiling_is_exact() {
        let mut req = valid_request();
        req.dev_buy_lamports = Some(MAX_BUY_LAMPORTS);
        assert!(req.validate().is_ok());

        req.dev_buy_lamports = Some(MAX_BUY_LAMPORTS + 1);
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn rwa_fields_validated_at_boundary() {
        let mut req = valid_request();
        req.kind = TokenKind::RealWorldAsset {
            asset_type: "real-estate".into(),
            description: "".into(),
            value: 250_000,
            location: "Lisbon".into(),
            documents: vec![],
        };
        assert!(matches!(req.validate(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn claimable_uses_exact_integer_comparison() {
        let zero = FeeMetrics::default();
        assert!(!zero.claimable(ClaimRole::Creator));
        assert!(!zero.claimable(ClaimRole::Partner));

        let one = FeeMetrics {
            creator_base: 1,
            ..FeeMetrics::default()
        };
        assert!(one.claimable(ClaimRole::Creator));
        assert!(!one.claimable(ClaimRole::Partner));

        let quote_only = FeeMetrics {
            creator_quote: 1,
            ..FeeMetrics::default()
        };
        assert!(quote_only.claimable(ClaimRole::Creator));
    }

    #[test]
    fn parses_large_counters_without_precision_loss() {
        // Larger than f64 can represent exactly.
        let raw = "9007199254740993";
        assert_eq!(parse_raw_amount(raw, "creatorBaseFee").unwrap(), 9007199254740993);
        assert!(parse_raw_amount("12.5", "creatorBaseFee").is_err());
        assert!(parse_raw_amount("-1", "creatorBaseFee").is_err());
    }

    #[test]
    fn token_kind_serde_is_tagged() {
        let kind = TokenKind::RealWorldAsset {
            asset_type: "real-estate".into(),
            description: "warehouse".into(),
            value: 42,
            location: "Austin".into(),
            documents: vec!["ipfs://deed".into()],
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "realWorldAsset");
        assert_eq!(json["assetType"], "real-estate");

        let back: TokenKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, kind);
    }
}
