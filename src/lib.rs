/// Curvepad SDK
///
/// Client library for launching fungible tokens on a bonding-curve pool
/// and settling the fees they accrue. Provides high-level flows for:
/// - Artifact staging (image and metadata uploads)
/// - Launch transaction build, dual-sign, broadcast and confirmation
/// - Token registry indexing
/// - Swap quoting and execution against the curve
/// - Creator and partner fee claims
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod pipeline;
pub mod prelude;

pub use client::CurvepadClient;
pub use config::SdkConfig;
pub use core::{SdkError, SdkResult};
