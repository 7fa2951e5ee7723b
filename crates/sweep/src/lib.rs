//! # Config sweep
//!
//! Disables AWS Config in every account listed in an input file, across a set
//! of regions, by assuming a role in each account and removing the `default`
//! configuration recorder and delivery channel.
//!
//! ## Usage
//!
//! The library is driven by the `disable-config` binary, but every step is
//! available on its own:
//!
//! 1. [`accounts::read_accounts`] loads and validates account ids.
//! 2. [`regions::resolve_regions`] decides which regions to visit.
//! 3. [`disable::sweep`] (or [`disable::sweep_account`] one account at a time)
//!    walks accounts × regions and returns structured reports.
//!
//! The cloud provider sits behind the [`provider::Provider`] and
//! [`provider::ConfigService`] traits. [`aws::Aws`] implements them with the
//! AWS SDK.
//!
//! Nothing in the library prints. Callers decide how to present the
//! [`disable::AccountReport`]s.
//!
//! ## Error Handling
//!
//! Operations return [`Error`]. Provider call failures are captured into the
//! reports rather than aborting the sweep, so only input loading and region
//! listing surface as hard errors.

use snafu::prelude::*;

pub mod accounts;
pub mod aws;
pub mod disable;
pub mod provider;
pub mod regions;

pub use accounts::AccountId;

/// Name of the recorder and delivery channel the sweep removes.
pub const DEFAULT_NAME: &str = "default";

/// Top-level error enum that encompasses all errors.
#[derive(snafu::Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read account file '{path:?}': {source}"))]
    ReadAccounts {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not list regions offering '{service}': {message}"))]
    ListRegions { service: String, message: String },

    #[snafu(display("Could not determine the caller identity: {message}"))]
    CallerIdentity { message: String },

    #[snafu(display("Could not determine the partition of '{arn}'"))]
    Partition { arn: String },

    #[snafu(display("Could not assume role '{role_arn}': {message}"))]
    AssumeRole { role_arn: String, message: String },

    #[snafu(display("{operation} failed: {message}"))]
    Service {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    /// Flattens an SDK error into a [`Error::Service`], keeping the whole
    /// error chain in the message.
    pub fn service(operation: &'static str, err: impl std::error::Error) -> Self {
        Error::Service {
            operation,
            message: error_message(err),
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Renders an error and all of its sources on one line.
pub(crate) fn error_message(err: impl std::error::Error) -> String {
    aws_sdk_config::error::DisplayErrorContext(err).to_string()
}
