//! The cloud provider operations a sweep needs.
//!
//! [`crate::aws::Aws`] is the real implementation. Tests drive the sweep with
//! an in-memory provider.
use std::future::Future;

use crate::{AccountId, Result};

/// AWS Config operations within one account and region.
pub trait ConfigService {
    /// Names of the configuration recorders that exist.
    fn describe_recorders(&self) -> impl Future<Output = Result<Vec<String>>>;

    fn stop_recorder(&self, name: &str) -> impl Future<Output = Result<()>>;

    fn delete_delivery_channel(&self, name: &str) -> impl Future<Output = Result<()>>;

    fn delete_recorder(&self, name: &str) -> impl Future<Output = Result<()>>;
}

/// Account and region level operations.
pub trait Provider {
    /// Credentials scoped to one target account.
    type Session;

    /// Config client for one account and region.
    type Config: ConfigService;

    /// Every region in which the Config service is offered.
    fn config_regions(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Assumes `role` in `account`.
    fn assume_role(
        &self,
        account: &AccountId,
        role: &str,
    ) -> impl Future<Output = Result<Self::Session>>;

    fn config_client(&self, session: &Self::Session, region: &str) -> Self::Config;
}
