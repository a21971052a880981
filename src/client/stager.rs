//! Artifact staging: image and metadata uploads to the content-addressed store.
//!
//! Staging is ordered before every on-chain step so a staging failure can
//! never leave a partial on-chain effect. An orphaned upload from an
//! abandoned attempt is harmless and is not cleaned up.

use std::sync::Arc;

use tracing::debug;

use crate::api::{wire, ApiClient};
use crate::core::constants::MAX_IMAGE_BYTES;
use crate::core::error::{SdkError, SdkResult};
use crate::core::types::{LaunchRequest, StagedArtifact};

pub struct ArtifactStager {
    api: Arc<ApiClient>,
}

impl ArtifactStager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Upload the image, then the metadata document referencing it. Both
    /// URIs are immutable once returned.
    pub fn stage(&self, req: &LaunchRequest) -> SdkResult<StagedArtifact> {
        let content_type = sniff_image_type(&req.image).ok_or_else(|| {
            SdkError::Validation("unsupported image type (png, jpeg, gif, webp accepted)".into())
        })?;
        if req.image.len() > MAX_IMAGE_BYTES {
            return Err(SdkError::Validation(format!(
                "image exceeds {MAX_IMAGE_BYTES} bytes"
            )));
        }

        let filename = format!("{}.{}", req.symbol.to_lowercase(), extension_for(content_type));
        let image: wire::UploadImageResponse =
            self.api
                .post_multipart("/upload/image", "image", &filename, content_type, &req.image)?;

        let metadata: wire::UploadMetadataResponse = self.api.post_json(
            "/upload/metadata",
            &wire::UploadMetadataRequest {
                name: &req.name,
                symbol: &req.symbol,
                description: req.description.as_deref(),
                image_url: &image.image_url,
                website: req.socials.website.as_deref(),
                twitter: req.socials.twitter.as_deref(),
                telegram: req.socials.telegram.as_deref(),
            },
        )?;

        debug!(
            image_uri = %image.image_url,
            metadata_uri = %metadata.metadata_uri,
            "staged launch artifacts"
        );

        Ok(StagedArtifact {
            image_uri: image.image_url,
            metadata_uri: metadata.metadata_uri,
        })
    }
}

/// Identify the image format from magic bytes. The upstream store rejects
/// disallowed types too; checking here avoids the upload round-trip.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        _ => "webp",
    }
}
