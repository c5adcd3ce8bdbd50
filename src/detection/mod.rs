// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detection aggregation
//!
//! Queries image-label recognition services in priority order:
//! - Imagga, Google Cloud Vision, Clarifai, Hugging Face (each enabled by credentials)
//! - an offline fallback that always answers
//!
//! The first provider with usable labels wins. Results are cached by image
//! content hash.

pub mod clarifai;
pub mod fallback;
pub mod google_vision;
pub mod huggingface;
pub mod image;
pub mod imagga;
pub mod normalizer;
pub mod provider;
pub mod registry;
pub mod service;
pub mod types;

pub use fallback::FallbackProvider;
pub use image::ImageInput;
pub use normalizer::{RawLabel, CONFIDENCE_THRESHOLD, MAX_OBJECTS};
pub use provider::DetectionProvider;
pub use registry::ProviderRegistry;
pub use service::DetectionService;
pub use types::{DetectedObject, DetectionError, DetectionOutcome};
