//! Disables AWS Config in every account listed in a file.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweep::{
    accounts::{read_accounts, SkippedLine},
    aws::Aws,
    disable::{sweep_account, AccountReport, SweepOptions},
    regions::resolve_regions,
};

mod print;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Sets the verbosity level
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Path to a file containing one AWS account id per line.
    input_file: PathBuf,

    /// Role name to assume in each account.
    #[clap(long = "assume_role", alias = "assume-role")]
    assume_role: String,

    /// Comma separated list of regions to disable Config in.
    /// If not specified, all regions offering Config are used.
    #[clap(long = "enabled_regions", alias = "enabled-regions")]
    enabled_regions: Option<String>,

    /// Only report which recorders would be disabled.
    #[clap(long)]
    dry_run: bool,

    /// Write the per account and region results to this file as JSON.
    #[clap(long)]
    report: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    role: &'a str,
    dry_run: bool,
    regions: &'a [String],
    skipped: &'a [SkippedLine],
    accounts: &'a [AccountReport],
}

#[::tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        verbosity,
        input_file,
        assume_role,
        enabled_regions,
        dry_run,
        report,
    } = Cli::parse();

    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("sweep", level)
        .filter_module("disable_config", level)
        .init();

    log::info!("dry_run: {dry_run}");

    let parsed = read_accounts(&input_file)?;
    for line in print::skipped_lines(&parsed) {
        println!("{line}");
    }
    println!("{}", print::account_list(&parsed.accounts));

    let aws = Aws::from_env().await;
    log::debug!("operator region: {:?}", aws.as_ref().region());
    let (regions, source) = resolve_regions(enabled_regions.as_deref(), &aws).await?;
    println!("{}", print::region_list(&regions, source));

    let options = SweepOptions { dry_run };
    let mut reports = Vec::with_capacity(parsed.accounts.len());
    for account in &parsed.accounts {
        let account_report = sweep_account(&aws, account, &regions, &assume_role, options).await;
        for line in print::account_report(&account_report, &assume_role) {
            println!("{line}");
        }
        reports.push(account_report);
    }

    if let Some(path) = report {
        let contents = serde_json::to_string_pretty(&Report {
            role: &assume_role,
            dry_run,
            regions: &regions,
            skipped: &parsed.skipped,
            accounts: &reports,
        })?;
        std::fs::write(&path, contents)
            .with_context(|| format!("could not write report to {}", path.display()))?;
        log::info!("wrote report to {}", path.display());
    }

    Ok(())
}
