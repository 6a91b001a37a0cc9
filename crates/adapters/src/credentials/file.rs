// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token file loader
//!
//! Accepts either a JSON array of strings or plain text with one token per
//! line. Blank lines and lines starting with `#` are ignored in text files.
//! Every JSON array element keeps its position, empty ones included, so the
//! gate can report them.

use super::{CredentialSource, SourceError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for FileCredentialSource {
    fn load(&self) -> Result<Vec<String>, SourceError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Read(self.path.clone(), e))?;
        parse_tokens(&content).map_err(|message| SourceError::Parse(self.path.clone(), message))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse token file content, preserving file order
pub fn parse_tokens(content: &str) -> Result<Vec<String>, String> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let tokens: Vec<String> = serde_json::from_str(trimmed).map_err(|e| e.to_string())?;
        return Ok(tokens
            .into_iter()
            .map(|t| t.trim().to_string())
            .collect());
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
