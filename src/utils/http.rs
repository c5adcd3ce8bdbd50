// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared HTTP client construction

use reqwest::Client;
use std::time::Duration;

/// User agent sent to public lookup APIs (Wikipedia and Open Food Facts ask for one)
pub const USER_AGENT: &str = concat!("scan-vision/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with a fixed per-request timeout
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}
