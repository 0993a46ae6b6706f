//! Command-line arguments.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mutiny")]
#[command(version, about = "Generate seeded mutants of a Python source file", long_about = None)]
pub struct Cli {
    /// Python source file to mutate
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Number of mutants to generate
    #[arg(value_name = "COUNT", required_unless_present_any = ["report", "config"])]
    pub count: Option<usize>,

    /// Random seed (default 123)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory for mutant files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Write a JSON manifest of every plan
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Load seed and mutant count from a JSON file; flags override it
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the per-category site report and exit
    #[arg(long)]
    pub report: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["mutiny", "prog.py", "5"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("prog.py"));
        assert_eq!(cli.count, Some(5));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.output, PathBuf::from("."));
        assert!(!cli.report);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "mutiny", "prog.py", "2", "-s", "9", "-o", "out", "--manifest", "m.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.manifest, Some(PathBuf::from("m.json")));
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_count_required_without_report() {
        assert!(Cli::try_parse_from(["mutiny", "prog.py"]).is_err());
        assert!(Cli::try_parse_from(["mutiny", "prog.py", "--report"]).is_ok());
        assert!(Cli::try_parse_from(["mutiny", "prog.py", "--config", "c.json"]).is_ok());
    }

    #[test]
    fn test_malformed_count() {
        assert!(Cli::try_parse_from(["mutiny", "prog.py", "many"]).is_err());
        assert!(Cli::try_parse_from(["mutiny"]).is_err());
    }
}
