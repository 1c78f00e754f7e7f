//! CLI argument definitions for bibx.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lookup` | Fetch record(s) for one or more keys |
//! | `schemes` | List supported key schemes |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Exit non-zero when any key failed |
//! | `--base-url` | openlibrary.org | Lookup service base address |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--max-attempts` | `3` | Attempts per key, first try included |
//! | `--initial-delay-ms` | `1000` | First backoff delay; doubles per retry |
//! | `--max-concurrency` | unbounded | Cap on in-flight lookups |
//!
//! # Examples
//!
//! ```bash
//! # Look one ISBN up
//! bibx lookup 978-1593276034
//!
//! # Fan out over several keys with a concurrency cap
//! bibx lookup 978-1593276034 978-0134685991 978-1118883665 --max-concurrency 2
//!
//! # Fail the pipeline when any key could not be fetched
//! bibx lookup 978-1593276034 --strict
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 📚 bibx - Resilient bibliographic record lookup
///
/// Fetch book records by key from an Open Library style service with
/// concurrent fan-out, bounded retries, and per-key fault isolation.
#[derive(Debug, Parser)]
#[command(
    name = "bibx",
    author,
    version,
    about = "Resilient bibliographic record lookup CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Exit with code 5 when any key's pipeline ended in a failure.
    ///
    /// Useful for CI/CD pipelines; not-found keys do not count as failures.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Base address of the lookup service.
    #[arg(long, global = true, default_value = bibx_core::OPEN_LIBRARY_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Attempts per key, the first try included.
    #[arg(long, global = true, default_value_t = 3)]
    pub max_attempts: u32,

    /// First backoff delay in milliseconds; doubles before every further retry.
    #[arg(long, global = true, default_value_t = 1_000)]
    pub initial_delay_ms: u64,

    /// Upper bound on concurrent lookups (unbounded when omitted).
    #[arg(long, global = true)]
    pub max_concurrency: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📖 Fetch record(s) for one or more bibliographic keys.
    ///
    /// Every key gets exactly one outcome, in input order: a record, a
    /// confirmed absence, or the failure that exhausted its retries.
    ///
    /// # Examples
    ///
    ///   bibx lookup 978-1593276034
    ///   bibx lookup 978-1593276034 978-0134685991 --pretty
    ///   bibx lookup 76374665 --scheme oclc
    Lookup(LookupArgs),

    /// 🔑 List supported key schemes.
    Schemes,
}

/// Arguments for the `lookup` command.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// One or more bibliographic keys (e.g. ISBNs).
    #[arg(required = true, num_args = 1..)]
    pub keys: Vec<String>,

    /// Key scheme the records are addressed under.
    ///
    /// Supported schemes:
    /// - isbn (default)
    /// - oclc
    /// - lccn
    /// - olid
    #[arg(long, default_value = "isbn")]
    pub scheme: String,
}
