//! The AWS SDK implementation of [`Provider`].
use std::time::SystemTime;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};
use snafu::OptionExt;

use crate::{
    error_message,
    provider::{ConfigService, Provider},
    AccountId, AssumeRoleSnafu, CallerIdentitySnafu, Error, PartitionSnafu, Result,
};

/// Session name used for every assumed role.
pub const SESSION_NAME: &str = "EnableConfig";

/// Public SSM parameter path listing the regions that offer AWS Config.
pub const CONFIG_REGIONS_PATH: &str = "/aws/service/global-infrastructure/services/config/regions";

/// A wrapper around the operator's own `SdkConfig`.
pub struct Aws(pub SdkConfig);

impl Aws {
    /// Loads the operator's credentials and region from the environment.
    pub async fn from_env() -> Self {
        Aws(aws_config::defaults(BehaviorVersion::latest()).load().await)
    }
}

impl AsRef<SdkConfig> for Aws {
    fn as_ref(&self) -> &SdkConfig {
        &self.0
    }
}

/// Returns the partition field of an ARN, e.g. `aws`, `aws-cn` or `aws-us-gov`.
pub fn partition_from_arn(arn: &str) -> Option<&str> {
    let mut fields = arn.split(':');
    match (fields.next(), fields.next()) {
        (Some("arn"), Some(partition)) if !partition.is_empty() => Some(partition),
        _ => None,
    }
}

pub fn role_arn(partition: &str, account: &AccountId, role: &str) -> String {
    format!("arn:{partition}:iam::{account}:role/{role}")
}

impl Provider for Aws {
    type Session = SdkConfig;
    type Config = ConfigClient;

    async fn config_regions(&self) -> Result<Vec<String>> {
        let client = aws_sdk_ssm::Client::new(&self.0);
        let mut pages = client
            .get_parameters_by_path()
            .path(CONFIG_REGIONS_PATH)
            .into_paginator()
            .send();
        let mut regions = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| Error::ListRegions {
                service: "config".into(),
                message: error_message(e),
            })?;
            regions.extend(
                page.parameters()
                    .iter()
                    .filter_map(|p| p.value().map(str::to_owned)),
            );
        }
        regions.sort();
        Ok(regions)
    }

    async fn assume_role(&self, account: &AccountId, role: &str) -> Result<SdkConfig> {
        let sts = aws_sdk_sts::Client::new(&self.0);
        let identity = sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| Error::CallerIdentity {
                message: error_message(e),
            })?;
        let caller_arn = identity.arn().context(CallerIdentitySnafu {
            message: "response is missing the caller ARN",
        })?;
        let partition = partition_from_arn(caller_arn).context(PartitionSnafu { arn: caller_arn })?;

        let role_arn = role_arn(partition, account, role);
        log::debug!("assuming {role_arn} as {caller_arn}");
        let out = sts
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(SESSION_NAME)
            .send()
            .await
            .map_err(|e| Error::AssumeRole {
                role_arn: role_arn.clone(),
                message: error_message(e),
            })?;
        let creds = out.credentials().context(AssumeRoleSnafu {
            role_arn: &role_arn,
            message: "response is missing credentials",
        })?;
        let credentials = Credentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            Some(creds.session_token().to_owned()),
            SystemTime::try_from(*creds.expiration()).ok(),
            "config-sweep",
        );
        log::trace!("credentials for {role_arn} expire at {:?}", creds.expiration());

        Ok(self
            .0
            .to_builder()
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .build())
    }

    fn config_client(&self, session: &SdkConfig, region: &str) -> ConfigClient {
        let conf = aws_sdk_config::config::Builder::from(session)
            .region(Region::new(region.to_owned()))
            .build();
        ConfigClient(aws_sdk_config::Client::from_conf(conf))
    }
}

/// AWS Config client bound to one account and region.
pub struct ConfigClient(pub aws_sdk_config::Client);

impl ConfigService for ConfigClient {
    async fn describe_recorders(&self) -> Result<Vec<String>> {
        let out = self
            .0
            .describe_configuration_recorders()
            .send()
            .await
            .map_err(|e| Error::service("DescribeConfigurationRecorders", e))?;
        Ok(out
            .configuration_recorders()
            .iter()
            .map(|r| r.name().unwrap_or_default().to_owned())
            .collect())
    }

    async fn stop_recorder(&self, name: &str) -> Result<()> {
        self.0
            .stop_configuration_recorder()
            .configuration_recorder_name(name)
            .send()
            .await
            .map_err(|e| Error::service("StopConfigurationRecorder", e))?;
        Ok(())
    }

    async fn delete_delivery_channel(&self, name: &str) -> Result<()> {
        self.0
            .delete_delivery_channel()
            .delivery_channel_name(name)
            .send()
            .await
            .map_err(|e| Error::service("DeleteDeliveryChannel", e))?;
        Ok(())
    }

    async fn delete_recorder(&self, name: &str) -> Result<()> {
        self.0
            .delete_configuration_recorder()
            .configuration_recorder_name(name)
            .send()
            .await
            .map_err(|e| Error::service("DeleteConfigurationRecorder", e))?;
        Ok(())
    }
}
