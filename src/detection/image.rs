// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image input handed to detection providers

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

use super::types::DetectionError;

/// Image bytes plus a content hash used as the cache identity
#[derive(Debug, Clone)]
pub struct ImageInput {
    bytes: Arc<[u8]>,
    content_hash: String,
}

impl ImageInput {
    /// Wrap raw image bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let content_hash = hex::encode(Sha256::digest(&bytes));
        Self {
            bytes: bytes.into(),
            content_hash,
        }
    }

    /// Read an image file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DetectionError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hex SHA-256 of the image bytes
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Cache key for detection outcomes of this image
    pub fn cache_key(&self) -> String {
        format!("detect:{}", self.content_hash)
    }

    /// Standard base64 encoding of the bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// MIME type sniffed from magic bytes
    pub fn mime_type(&self) -> &'static str {
        let b = &self.bytes[..];
        if b.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            "image/png"
        } else if b.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "image/jpeg"
        } else if b.starts_with(b"GIF8") {
            "image/gif"
        } else if b.len() >= 12 && &b[0..4] == b"RIFF" && &b[8..12] == b"WEBP" {
            "image/webp"
        } else {
            "application/octet-stream"
        }
    }
}
