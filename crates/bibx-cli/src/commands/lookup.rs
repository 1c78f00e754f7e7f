use std::time::Duration;

use bibx_core::{BatchFetcher, BibKey, FetchPolicy, KeyScheme, OpenLibraryClient, RetryConfig};

use crate::cli::{Cli, LookupArgs};
use crate::error::CliError;

use super::CommandOutput;

pub async fn run(args: &LookupArgs, cli: &Cli) -> Result<CommandOutput, CliError> {
    let keys = args
        .keys
        .iter()
        .map(|raw| BibKey::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let scheme = KeyScheme::parse(&args.scheme)?;

    let mut policy = FetchPolicy::default()
        .with_request_timeout(Duration::from_millis(cli.timeout_ms))
        .with_retry(RetryConfig::exponential(
            cli.max_attempts,
            Duration::from_millis(cli.initial_delay_ms),
        ));
    if let Some(cap) = cli.max_concurrency {
        policy = policy.with_max_concurrency(cap);
    }

    let client = OpenLibraryClient::new()
        .with_base_url(&cli.base_url)
        .with_scheme(scheme)
        .with_request_timeout(policy.request_timeout);

    let fetcher = BatchFetcher::new(client, &policy);
    let result = fetcher.fetch_batch(&keys).await;

    Ok(CommandOutput::Batch(result))
}
