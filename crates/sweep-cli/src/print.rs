//! Human readable status lines.
use colored::Colorize;
use sweep::{
    accounts::{ParsedAccounts, SkipReason},
    disable::{AccountOutcome, AccountReport, RegionOutcome},
    regions::RegionSource,
    AccountId,
};

pub fn skipped_lines(parsed: &ParsedAccounts) -> Vec<String> {
    parsed
        .skipped
        .iter()
        .map(|skipped| match skipped.reason {
            SkipReason::Empty => format!("Unable to process line: {}", skipped.content),
            SkipReason::InvalidAccountId => format!(
                "Invalid account number {}, skipping",
                skipped.content.trim_end()
            ),
        })
        .collect()
}

pub fn account_list(accounts: &[AccountId]) -> String {
    let ids = accounts.iter().map(AccountId::as_str).collect::<Vec<_>>();
    format!("List of AWS accounts is {ids:?}")
}

pub fn region_list(regions: &[String], source: RegionSource) -> String {
    match source {
        RegionSource::Operator => format!("Disabling Config in these regions: {regions:?}"),
        RegionSource::Provider => format!("Disabling Config in all available regions {regions:?}"),
    }
}

pub fn assumed_banner(account: &AccountId) -> String {
    let rule = "-----------------------------------------";
    format!(
        "{}\n{}\n{}\n",
        rule.bold(),
        format!("||||Assumed session for {account}||||").bold(),
        rule.bold()
    )
}

/// Lines describing the outcome for one account.
pub fn account_report(report: &AccountReport, role: &str) -> Vec<String> {
    let account = &report.account;
    let regions = match &report.outcome {
        AccountOutcome::AssumeFailed { .. } => {
            return vec![format!(
                "Unable to assume role {role} in account {account} {}",
                "❌".red()
            )]
        }
        AccountOutcome::Swept { regions } => regions,
    };

    let mut lines = vec![assumed_banner(account)];
    for region_report in regions {
        let region = &region_report.region;
        match &region_report.outcome {
            RegionOutcome::NoRecorder => {
                lines.push(format!("No recorders exist in {account} in {region} 😞"))
            }
            RegionOutcome::RegionDisabled { .. } => lines.push(format!(
                "Account {account} has {region} region disabled {}",
                "❌".red()
            )),
            RegionOutcome::Preserved => lines.push(format!(
                "Not disabling config in the {account} in region {region}"
            )),
            RegionOutcome::DescribeFailed { error } => {
                lines.push(format!("{error} {}", "❌".red()))
            }
            RegionOutcome::DryRun { recorders } => lines.push(format!(
                "Would disable recorders {recorders:?} in {account} region {region} (dry run)"
            )),
            RegionOutcome::Disabled { steps } => {
                for outcome in steps {
                    lines.push(match &outcome.error {
                        None => format!(
                            "{} in {account} region {region} {}",
                            outcome.step,
                            "✅".green()
                        ),
                        Some(error) => {
                            format!("{error} in {account} region {region} {}", "❌".red())
                        }
                    });
                }
                lines.push(String::new());
            }
        }
    }
    lines
}
