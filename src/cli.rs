//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use cms_bulk::{DEFAULT_API_BASE, DEFAULT_CATALOG_URL, DEFAULT_PAGE_SIZE};

/// Bulk download every dataset from a CMS-style open-data portal.
///
/// Fetches the portal's data.json catalog and downloads each dataset's
/// distributions into a per-dataset directory. Reruns skip artifacts that
/// already exist, so an interrupted run picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "cms-bulk")]
#[command(author, version, about)]
pub struct Args {
    /// Directory to download datasets into
    #[arg(short = 'o', long, default_value = "cms_data")]
    pub output_dir: PathBuf,

    /// Pause between requests in seconds (0 to disable, max 300)
    #[arg(short = 'd', long, default_value_t = 0.5, value_parser = parse_delay)]
    pub delay: f64,

    /// Rows requested per API page (1-50000)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u64).range(1..=50_000))]
    pub page_size: u64,

    /// Catalog URL to fetch
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Base URL for the paginated data API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Download every temporal version of each dataset, not just the latest
    #[arg(long)]
    pub all_versions: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Validates the inter-request delay: finite, non-negative, at most 300s.
fn parse_delay(value: &str) -> Result<f64, String> {
    let delay: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !delay.is_finite() || delay < 0.0 {
        return Err("delay must be a non-negative number".to_string());
    }
    if delay > 300.0 {
        return Err("delay must be at most 300 seconds".to_string());
    }
    Ok(delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["cms-bulk"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("cms_data"));
        assert!((args.delay - 0.5).abs() < f64::EPSILON);
        assert_eq!(args.page_size, 5000); // DEFAULT_PAGE_SIZE
        assert_eq!(args.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(args.api_base, DEFAULT_API_BASE);
        assert!(!args.all_versions);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_output_dir_short_flag() {
        let args = Args::try_parse_from(["cms-bulk", "-o", "/tmp/data"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("/tmp/data"));
    }

    #[test]
    fn test_cli_delay_accepts_zero() {
        let args = Args::try_parse_from(["cms-bulk", "-d", "0"]).unwrap();
        assert!(args.delay.abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_delay_rejects_negative() {
        let result = Args::try_parse_from(["cms-bulk", "-d", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_delay_rejects_non_numeric_and_non_finite() {
        for bad in ["fast", "NaN", "inf", "301"] {
            let result = Args::try_parse_from(["cms-bulk", "-d", bad]);
            assert!(result.is_err(), "delay `{bad}` should be rejected");
        }
    }

    #[test]
    fn test_cli_page_size_bounds() {
        let args = Args::try_parse_from(["cms-bulk", "--page-size", "1"]).unwrap();
        assert_eq!(args.page_size, 1);

        let result = Args::try_parse_from(["cms-bulk", "--page-size", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let result = Args::try_parse_from(["cms-bulk", "--page-size", "50001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_all_versions_flag() {
        let args = Args::try_parse_from(["cms-bulk", "--all-versions"]).unwrap();
        assert!(args.all_versions);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["cms-bulk", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["cms-bulk", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["cms-bulk", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
