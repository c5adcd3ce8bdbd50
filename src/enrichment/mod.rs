// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product enrichment lookup
//!
//! Resolves "product details" for a detected label from an ordered chain of
//! sources:
//! - Wikipedia page summaries
//! - Open Food Facts (food labels only)
//! - UPCitemdb and Barcode Lookup retail catalogs
//!
//! When every source comes back empty a description is synthesized from the
//! label, its category and Datamuse word associations.

pub mod barcode_lookup;
pub mod fallback;
pub mod open_food_facts;
pub mod service;
pub mod source;
pub mod types;
pub mod upcitemdb;
pub mod wikipedia;
pub mod word_assoc;

pub use fallback::FALLBACK_SOURCE;
pub use service::{product_cache_key, ProductEnrichmentService};
pub use source::ProductSource;
pub use types::{EnrichmentError, ProductDetail};
pub use word_assoc::WordAssociation;
