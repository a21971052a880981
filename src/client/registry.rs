//! Token registry writes.
//!
//! A row is written only after broadcast confirmed; `mint` is the natural key
//! and the server enforces uniqueness. A 409 here means the token is already
//! indexed (duplicate submission or client retry) and is non-fatal to the
//! launch: the token is live on-chain regardless.

use std::str::FromStr;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::api::{wire, ApiClient};
use crate::core::error::{SdkError, SdkResult};
use crate::core::types::{TokenKind, TokenRecord};

/// Payload for a registry write. Assembled by the pipeline from the launch
/// request, the staged artifact and the confirmed transaction.
#[derive(Clone, Debug)]
pub struct NewToken {
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub metadata_uri: String,
    pub creator_wallet: Pubkey,
    pub kind: TokenKind,
}

pub struct RegistryService {
    api: Arc<ApiClient>,
}

impl RegistryService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn register(&self, token: &NewToken) -> SdkResult<TokenRecord> {
        let asset_fields = match &token.kind {
            TokenKind::Memecoin => None,
            TokenKind::RealWorldAsset {
                asset_type,
                description,
                value,
                location,
                documents,
            } => Some(wire::AssetFields {
                asset_type: asset_type.clone(),
                description: description.clone(),
                value: *value,
                location: location.clone(),
                documents: documents.clone(),
            }),
        };

        let response: wire::TokenResponse = self.api.post_json(
            "/tokens",
            &wire::RegisterTokenRequest {
                mint: &token.mint.to_string(),
                name: &token.name,
                symbol: &token.symbol,
                image_url: &token.image_url,
                metadata_uri: &token.metadata_uri,
                creator_wallet: &token.creator_wallet.to_string(),
                token_type: Some(token.kind.label()),
                asset_fields,
            },
        )?;
        let record = from_wire(response.token)?;
        info!(mint = %record.mint, symbol = %record.symbol, "token registered");
        Ok(record)
    }
}

fn from_wire(token: wire::TokenWire) -> SdkResult<TokenRecord> {
    let parse = |field: &'static str, value: &str| {
        Pubkey::from_str(value)
            .map_err(|_| SdkError::Wire(format!("{field} is not a valid pubkey: {value:?}")))
    };
    let kind = match token.asset_fields {
        Some(fields) => TokenKind::RealWorldAsset {
            asset_type: fields.asset_type,
            description: fields.description,
            value: fields.value,
            location: fields.location,
            documents: fields.documents,
        },
        None => TokenKind::Memecoin,
    };
    Ok(TokenRecord {
        mint: parse("mint", &token.mint)?,
        name: token.name,
        symbol: token.symbol,
        image_url: token.image_url,
        metadata_uri: token.metadata_uri,
        pool_address: token
            .pool_address
            .as_deref()
            .map(|p| parse("poolAddress", p))
            .transpose()?,
        creator_wallet: parse("creatorWallet", &token.creator_wallet)?,
        kind,
        created_at: token.created_at,
    })
}
