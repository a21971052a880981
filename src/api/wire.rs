//! Wire DTOs for the platform API.
//!
//! Field names follow the JSON contract exactly (camelCase). Error bodies are
//! always `{ "error": string }` with the HTTP status carrying the kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// --- uploads ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadataRequest<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub image_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadataResponse {
    pub metadata_uri: String,
}

// --- transaction building --------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolRequest<'a> {
    pub mint: &'a str,
    pub token_name: &'a str,
    pub token_symbol: &'a str,
    pub metadata_uri: &'a str,
    pub user_wallet: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolResponse {
    pub pool_tx: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTxRequest<'a> {
    pub mint: &'a str,
    pub amount: u64,
    pub user_wallet: &'a str,
    pub is_buy: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTxResponse {
    pub swap_tx: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteRequest<'a> {
    pub mint: &'a str,
    pub amount: u64,
    pub is_buy: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteResponse {
    #[serde(deserialize_with = "number_or_decimal_string")]
    pub estimated_output: u64,
}

// --- broadcast -------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest<'a> {
    pub signed_transaction: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub success: bool,
    #[serde(default)]
    pub signature: String,
}

// --- token registry --------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTokenRequest<'a> {
    pub mint: &'a str,
    pub name: &'a str,
    pub symbol: &'a str,
    pub image_url: &'a str,
    pub metadata_uri: &'a str,
    pub creator_wallet: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_fields: Option<AssetFields>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFields {
    pub asset_type: String,
    pub description: String,
    pub value: u64,
    pub location: String,
    pub documents: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: TokenWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenWire {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub metadata_uri: String,
    #[serde(default)]
    pub pool_address: Option<String>,
    pub creator_wallet: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub asset_fields: Option<AssetFields>,
    pub created_at: DateTime<Utc>,
}

// --- fee settlement --------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeMetricsResponse {
    pub success: bool,
    pub creator_base_fee: String,
    pub creator_quote_fee: String,
    pub partner_base_fee: String,
    pub partner_quote_fee: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCreatorRequest<'a> {
    pub base_mint: &'a str,
    pub creator: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPartnerRequest<'a> {
    pub base_mint: &'a str,
    pub fee_claimer: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimTxResponse {
    pub claim_tx: String,
}

/// Quote outputs arrive as a JSON number from some deployments and as a
/// decimal string from others; accept both.
fn number_or_decimal_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("estimatedOutput is not a u64: {n}"))),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|_| D::Error::custom(format!("estimatedOutput is not a u64: {s:?}"))),
        other => Err(D::Error::custom(format!(
            "estimatedOutput has unexpected type: {other}"
        ))),
    }
}
