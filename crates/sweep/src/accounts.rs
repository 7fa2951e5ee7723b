//! Loading the list of target accounts.
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use snafu::ResultExt;

use crate::{ReadAccountsSnafu, Result};

/// Twelve digits at the start of the line. The end is not anchored, so
/// trailing content after the digits is tolerated.
// UNWRAP: safe because the pattern is a valid literal
static ACCOUNT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}").unwrap());

/// A syntactically valid AWS account id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Validates `line` (already trimmed) as an account id.
    pub fn parse(line: &str) -> Option<Self> {
        ACCOUNT_ID
            .is_match(line)
            .then(|| AccountId(line.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SkipReason {
    /// Nothing left after trimming.
    Empty,
    /// Does not start with twelve digits.
    InvalidAccountId,
}

/// An input line that was not turned into an [`AccountId`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedLine {
    /// 1-based.
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParsedAccounts {
    pub accounts: Vec<AccountId>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses one account id per line, keeping input order.
///
/// Lines are trimmed of trailing whitespace only. Bad lines are collected in
/// [`ParsedAccounts::skipped`] and never stop the parse.
pub fn parse_accounts(text: &str) -> ParsedAccounts {
    let mut parsed = ParsedAccounts::default();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let reason = if line.is_empty() {
            SkipReason::Empty
        } else if let Some(account) = AccountId::parse(line) {
            if line.len() > 12 {
                log::warn!("account line {} has content after the account id: {line:?}", i + 1);
            }
            parsed.accounts.push(account);
            continue;
        } else {
            SkipReason::InvalidAccountId
        };
        log::debug!("skipping line {}: {reason:?}", i + 1);
        parsed.skipped.push(SkippedLine {
            line_number: i + 1,
            content: raw.to_owned(),
            reason,
        });
    }
    parsed
}

/// Reads and parses the account file at `path`.
pub fn read_accounts(path: impl AsRef<Path>) -> Result<ParsedAccounts> {
    let path = path.as_ref();
    log::debug!("reading accounts from {}", path.display());
    let text = std::fs::read_to_string(path).context(ReadAccountsSnafu {
        path: path.to_path_buf(),
    })?;
    Ok(parse_accounts(&text))
}
