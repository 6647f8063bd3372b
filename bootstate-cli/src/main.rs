use std::time::Duration;

use clap::{ArgAction, Parser};
use colored::Colorize;
use log::LevelFilter;

use bootstate_core::lock_table::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_WAIT_TIMEOUT_SECS};
use bootstate_core::{
    BackendRequest, BootstrapReport, BucketOutcome, ProvisionError, TableOutcome, WaitPolicy,
    bootstrap,
};
use bootstate_provider_aws::AwsProvider;

/// Region used when `--region` is not given
const DEFAULT_REGION: &str = "us-west-2";

#[derive(Parser, Debug)]
#[command(name = "bootstate")]
#[command(
    about = "Provision the S3 bucket and DynamoDB lock table for a Terraform S3 backend",
    long_about = None
)]
struct Cli {
    /// Project name; the state bucket is named <project>-terraform-state
    #[arg(long, env = "BOOTSTATE_PROJECT")]
    project: String,

    /// AWS region for both resources
    #[arg(long, default_value = DEFAULT_REGION)]
    region: String,

    /// Named AWS profile to load credentials from
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Maximum seconds to wait for the lock table to become active
    #[arg(long, default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    wait_timeout: u64,

    /// Seconds between lock table status checks
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(
            Duration::from_secs(self.poll_interval),
            Duration::from_secs(self.wait_timeout),
        )
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), String> {
    let request = BackendRequest::new(&cli.project, &cli.region).map_err(|e| e.to_string())?;

    let aws = AwsProvider::new(request.bucket().region(), cli.profile.as_deref()).await;
    let report = bootstrap(&aws.s3, &aws.dynamodb, &request, &cli.wait_policy())
        .await
        .map_err(|e| failure_message(&e))?;

    for line in progress_lines(&request, &report) {
        eprintln!("{} {}", "✓".green(), line);
    }
    eprintln!();
    if report.changed() {
        eprintln!(
            "{}",
            "Terraform backend resources created successfully!"
                .green()
                .bold()
        );
    } else {
        eprintln!("{}", "Terraform backend resources already exist.".green());
    }
    eprintln!("{}", "Backend configuration:".bold());

    // The backend block is the only thing written to stdout
    print!("{}", report.backend);

    Ok(())
}

/// Message for a failed run, naming the resource that could not be provisioned
fn failure_message(error: &ProvisionError) -> String {
    match error.resource() {
        Some(resource) => format!("Failed to create {}: {}", resource, error),
        None => error.to_string(),
    }
}

/// One line per step the run took, in order
fn progress_lines(request: &BackendRequest, report: &BootstrapReport) -> Vec<String> {
    let mut lines = Vec::new();
    let bucket = request.bucket().name();
    let table = request.table().name();

    match &report.bucket {
        BucketOutcome::AlreadyExists => lines.push(format!("Bucket {} already exists", bucket)),
        BucketOutcome::Created { applied } => {
            lines.push(format!("Created S3 bucket: {}", bucket));
            lines.extend(applied.iter().map(|setting| setting.to_string()));
        }
    }

    match &report.table {
        TableOutcome::AlreadyExists => {
            lines.push(format!("DynamoDB table {} already exists", table))
        }
        TableOutcome::Created { .. } => {
            lines.push(format!("Created DynamoDB table: {}", table));
            lines.push(format!("Table {} is active", table));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstate_core::{BackendBlock, BucketSetting, Step};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bootstate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--project", "acme"]);
        assert_eq!(cli.project, "acme");
        assert_eq!(cli.region, "us-west-2");
        assert_eq!(cli.wait_policy(), WaitPolicy::default());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_custom_wait_and_verbosity() {
        let cli = parse(&[
            "--project",
            "acme",
            "--region",
            "eu-west-1",
            "--wait-timeout",
            "60",
            "--poll-interval",
            "5",
            "-vv",
        ]);
        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.wait_policy().max_attempts(), 12);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = Cli::try_parse_from(["bootstate", "--project", "acme", "--poll-interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_message_names_resource() {
        let error = ProvisionError::bucket("acme-terraform-state", Step::Create, "AccessDenied");
        let message = failure_message(&error);
        assert!(message.starts_with("Failed to create S3 bucket:"));

        let error = ProvisionError::Timeout {
            table: "terraform-state-lock".to_string(),
            attempts: 25,
            timeout: Duration::from_secs(500),
        };
        let message = failure_message(&error);
        assert!(message.starts_with("Failed to create DynamoDB table:"));
        assert!(message.contains("Timed out"));
        assert!(message.contains("500s limit"));
    }

    #[test]
    fn test_failure_message_for_invalid_input() {
        let error = ProvisionError::invalid_input("project name must not be empty");
        assert_eq!(
            failure_message(&error),
            "Invalid input: project name must not be empty"
        );
    }

    #[test]
    fn test_progress_lines_for_fresh_run() {
        let request = BackendRequest::new("acme", "us-west-2").unwrap();
        let report = BootstrapReport {
            bucket: BucketOutcome::Created {
                applied: vec![
                    BucketSetting::Versioning,
                    BucketSetting::Encryption,
                    BucketSetting::PublicAccessBlock,
                ],
            },
            table: TableOutcome::Created { polls: 2 },
            backend: BackendBlock::new(request.bucket(), request.table()),
        };

        assert_eq!(
            progress_lines(&request, &report),
            vec![
                "Created S3 bucket: acme-terraform-state",
                "Enabled bucket versioning",
                "Enabled default encryption",
                "Blocked public access",
                "Created DynamoDB table: terraform-state-lock",
                "Table terraform-state-lock is active",
            ]
        );
    }

    #[test]
    fn test_progress_lines_for_existing_resources() {
        let request = BackendRequest::new("acme", "us-west-2").unwrap();
        let report = BootstrapReport {
            bucket: BucketOutcome::AlreadyExists,
            table: TableOutcome::AlreadyExists,
            backend: BackendBlock::new(request.bucket(), request.table()),
        };

        assert_eq!(
            progress_lines(&request, &report),
            vec![
                "Bucket acme-terraform-state already exists",
                "DynamoDB table terraform-state-lock already exists",
            ]
        );
    }
}
