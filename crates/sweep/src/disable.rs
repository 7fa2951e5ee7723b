//! Disabling AWS Config across accounts and regions.
use crate::{
    provider::{ConfigService, Provider},
    regions::{policy_for, RegionPolicy},
    AccountId, DEFAULT_NAME,
};

/// One mutating call made against a region with a recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Step {
    StopRecorder,
    DeleteDeliveryChannel,
    DeleteRecorder,
}

impl Step {
    /// Order in which the steps are attempted.
    pub const ALL: [Step; 3] = [
        Step::StopRecorder,
        Step::DeleteDeliveryChannel,
        Step::DeleteRecorder,
    ];
}

impl core::fmt::Display for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Step::StopRecorder => "Stopped Configuration Recorder",
            Step::DeleteDeliveryChannel => "Deleted Delivery Channel",
            Step::DeleteRecorder => "Deleted Configuration Recorder",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StepOutcome {
    pub step: Step,
    /// `None` when the call succeeded.
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionOutcome {
    /// The region has no configuration recorder.
    NoRecorder,
    /// The existence check failed in an opt-in region.
    RegionDisabled { error: String },
    /// The region's recorder is deliberately left alone.
    Preserved,
    /// A recorder existed and every step was attempted.
    Disabled { steps: Vec<StepOutcome> },
    /// The existence check failed. The rest of the account's regions are
    /// not visited.
    DescribeFailed { error: String },
    /// A recorder exists but no changes were requested.
    DryRun { recorders: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RegionReport {
    pub region: String,
    pub outcome: RegionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountOutcome {
    AssumeFailed { error: String },
    Swept { regions: Vec<RegionReport> },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AccountReport {
    pub account: AccountId,
    pub outcome: AccountOutcome,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SweepOptions {
    /// Check for recorders without changing anything.
    pub dry_run: bool,
}

/// Stops and deletes the `default` recorder and delivery channel.
///
/// Every step is attempted, even if an earlier one fails.
pub async fn disable_recorder(client: &impl ConfigService) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(Step::ALL.len());
    for step in Step::ALL {
        let result = match step {
            Step::StopRecorder => client.stop_recorder(DEFAULT_NAME).await,
            Step::DeleteDeliveryChannel => client.delete_delivery_channel(DEFAULT_NAME).await,
            Step::DeleteRecorder => client.delete_recorder(DEFAULT_NAME).await,
        };
        if let Err(e) = &result {
            log::debug!("{step:?} failed: {e}");
        }
        outcomes.push(StepOutcome {
            step,
            error: result.err().map(|e| e.to_string()),
        });
    }
    outcomes
}

/// Applies the region's policy and disables its recorder if there is one.
pub async fn sweep_region(
    client: &impl ConfigService,
    region: &str,
    options: SweepOptions,
) -> RegionOutcome {
    let policy = policy_for(region);
    log::trace!("{region} policy: {policy:?}");
    if policy == RegionPolicy::SkipDisable {
        return RegionOutcome::Preserved;
    }

    let recorders = match client.describe_recorders().await {
        Ok(recorders) => recorders,
        Err(e) if policy == RegionPolicy::OptInExistenceCheck => {
            return RegionOutcome::RegionDisabled {
                error: e.to_string(),
            }
        }
        Err(e) => {
            return RegionOutcome::DescribeFailed {
                error: e.to_string(),
            }
        }
    };

    if recorders.is_empty() {
        RegionOutcome::NoRecorder
    } else if options.dry_run {
        RegionOutcome::DryRun { recorders }
    } else {
        RegionOutcome::Disabled {
            steps: disable_recorder(client).await,
        }
    }
}

/// Assumes `role` in `account` and sweeps each region in order.
pub async fn sweep_account<P: Provider>(
    provider: &P,
    account: &AccountId,
    regions: &[String],
    role: &str,
    options: SweepOptions,
) -> AccountReport {
    let session = match provider.assume_role(account, role).await {
        Ok(session) => session,
        Err(e) => {
            log::warn!("could not assume {role} in {account}: {e}");
            return AccountReport {
                account: account.clone(),
                outcome: AccountOutcome::AssumeFailed {
                    error: e.to_string(),
                },
            };
        }
    };

    let mut reports = Vec::with_capacity(regions.len());
    for region in regions {
        log::info!("sweeping {account} {region}");
        let client = provider.config_client(&session, region);
        let outcome = sweep_region(&client, region, options).await;
        let stop = matches!(outcome, RegionOutcome::DescribeFailed { .. });
        reports.push(RegionReport {
            region: region.clone(),
            outcome,
        });
        if stop {
            log::warn!("abandoning remaining regions of {account} after {region}");
            break;
        }
    }

    AccountReport {
        account: account.clone(),
        outcome: AccountOutcome::Swept { regions: reports },
    }
}

/// Sweeps every account, one after another.
pub async fn sweep<P: Provider>(
    provider: &P,
    accounts: &[AccountId],
    regions: &[String],
    role: &str,
    options: SweepOptions,
) -> Vec<AccountReport> {
    let mut reports = Vec::with_capacity(accounts.len());
    for account in accounts {
        reports.push(sweep_account(provider, account, regions, role, options).await);
    }
    reports
}
