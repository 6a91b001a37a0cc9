// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credentials and their derived validity state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens shorter than this are fully hidden when masked
const MASK_MIN_LEN: usize = 12;
const MASK_HEAD: usize = 6;
const MASK_TAIL: usize = 4;

/// An opaque authentication token for one account.
///
/// Identified by its zero-based load-order index, which stays stable for the
/// lifetime of the process. `Debug` and `Display` only ever show the masked
/// form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    index: usize,
    token: String,
}

impl Credential {
    pub fn new(index: usize, token: impl Into<String>) -> Self {
        Self {
            index,
            token: token.into(),
        }
    }

    /// Build the ordered credential set from raw loader output
    pub fn from_raw(raw: Vec<String>) -> Vec<Credential> {
        raw.into_iter()
            .enumerate()
            .map(|(index, token)| Credential::new(index, token))
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The raw token. Only adapters talking to the remote service need this.
    pub fn expose(&self) -> &str {
        &self.token
    }

    pub fn masked(&self) -> String {
        mask(&self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("index", &self.index)
            .field("token", &self.masked())
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index + 1, self.masked())
    }
}

/// Mask a token for display: first 6 and last 4 characters
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.trim().chars().collect();
    if chars.len() < MASK_MIN_LEN {
        return "***".to_string();
    }
    let head: String = chars[..MASK_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_TAIL..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Validity of a credential, recomputed on demand by the gate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialState {
    #[default]
    Unknown,
    Valid,
    Expired,
    Invalid,
}

impl CredentialState {
    pub fn is_usable(self) -> bool {
        matches!(self, CredentialState::Valid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CredentialState::Unknown => "unknown",
            CredentialState::Valid => "valid",
            CredentialState::Expired => "expired",
            CredentialState::Invalid => "invalid",
        }
    }
}

impl fmt::Display for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
