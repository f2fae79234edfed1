//! Main entrypoint for the token distribution bootstrap.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let plan_path: PathBuf = parse_env_var("DISTRIBUTION_PLAN_PATH")?;
    let deployments_dir: PathBuf =
        maybe_parse_env_var("DEPLOYMENTS_DIR")?.unwrap_or_else(|| PathBuf::from("deployments"));
    let network: String =
        maybe_parse_env_var("NETWORK_NAME")?.unwrap_or_else(|| "unknown".to_owned());

    let plan_data = std::fs::read_to_string(&plan_path)
        .with_context(|| format!("unable to read the plan at {}", plan_path.display()))?;
    let plan: distribution_bootstrap::DistributionPlan =
        serde_json::from_str(&plan_data).context("unable to parse the plan")?;

    let now = chrono::Local::now();
    let timestamp = u64::try_from(now.timestamp()).context("system time is before the epoch")?;
    let deployment = distribution_bootstrap::bootstrap(&plan, timestamp)?;
    info!(
        message = "Distribution bootstrapped",
        ledger = %deployment.record.ledger,
        vested_lock = %deployment.record.vested_lock,
        total_supply = deployment.ledger.total_supply(),
    );

    let path = distribution_bootstrap::save_record(
        &deployments_dir,
        &network,
        &now.naive_local(),
        &deployment.record,
    )?;
    info!(message = "Deployment record saved", path = %path.display());

    Ok(())
}

/// Get the value of process environment variable `key` and parse it into the type `T`.
///
/// Returns an error if the variable is not set, if the value is an invalid unicode, or if
/// the value could not be parsed.
fn parse_env_var<T>(key: &'static str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    maybe_parse_env_var(key)?.with_context(|| format!("{key} env var is not set"))
}

/// Like [`parse_env_var`], but returns `None` if the variable is not set.
fn maybe_parse_env_var<T>(key: &'static str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let Some(raw) = std::env::var_os(key) else {
        return Ok(None);
    };
    let string = raw
        .into_string()
        .map_err(|_| anyhow::format_err!("{key} env var is not a valid unicode string"))?;
    let value = string
        .parse()
        .map_err(|err| anyhow::format_err!("{key} env var is not valid: {err}"))?;
    Ok(Some(value))
}
