// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response bodies for the informational endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::version::{API_TITLE, VERSION_NUMBER};

/// GET / - service banner and endpoint index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

impl Default for RootResponse {
    fn default() -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            "ocrfromidcard".to_string(),
            "POST /ocrfromidcard - Upload an ID card image to extract information".to_string(),
        );

        Self {
            message: API_TITLE.to_string(),
            version: VERSION_NUMBER.to_string(),
            endpoints,
        }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: API_TITLE.to_string(),
        }
    }
}
