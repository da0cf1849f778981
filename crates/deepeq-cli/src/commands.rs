use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use deepeq_diff::{Comparator, Comparison, DiffConfig};
use serde_json::{json, Value};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli { command, verbose, format } = cli;
    match command {
        Command::Diff(args) => cmd_diff(args, verbose, &format),
        Command::Config(args) => cmd_config(args, verbose, &format),
    }
}

/// Build the effective configuration: file first, then flags.
pub fn load_config(overrides: &Overrides, verbose: bool) -> anyhow::Result<DiffConfig> {
    let mut config = match &overrides.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<DiffConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DiffConfig::default(),
    };

    if let Some(max_diffs) = overrides.max_diffs {
        config.max_diff_count = max_diffs;
    }
    if let Some(max_depth) = overrides.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(precision) = overrides.float_precision {
        config.float_precision = precision;
    }
    if verbose {
        config.log_errors = true;
    }
    Ok(config)
}

fn read_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as JSON", path.display()))
}

/// Compare the two documents named by `args`.
pub fn diff_files(args: &DiffArgs, verbose: bool) -> anyhow::Result<Comparison> {
    let config = load_config(&args.overrides, verbose)?;
    let left = read_document(&args.left)?;
    let right = read_document(&args.right)?;

    tracing::debug!(
        left = %args.left.display(),
        right = %args.right.display(),
        max_diff_count = config.max_diff_count,
        max_depth = config.max_depth,
        "comparing documents"
    );
    Ok(Comparator::new(config).compare(&left, &right))
}

pub fn comparison_json(comparison: &Comparison) -> Value {
    let warnings: Vec<String> = comparison.warnings.iter().map(ToString::to_string).collect();
    json!({
        "equal": comparison.is_equal(),
        "diffs": comparison.diffs,
        "warnings": warnings,
    })
}

fn cmd_diff(args: DiffArgs, verbose: bool, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let comparison = diff_files(&args, verbose)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comparison_json(&comparison))?);
        }
        OutputFormat::Text => {
            if comparison.is_equal() {
                println!("{} No differences.", "✓".green().bold());
            } else {
                println!(
                    "{} {} difference(s):",
                    "✗".red().bold(),
                    comparison.len().to_string().bold()
                );
                for diff in &comparison.diffs {
                    println!("  {}", diff.red());
                }
            }
            for warning in &comparison.warnings {
                println!("  {} {}", "warning:".yellow(), warning);
            }
        }
    }

    Ok(if comparison.is_equal() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_config(args: ConfigArgs, verbose: bool, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let config = load_config(&args.overrides, verbose)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => print!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn diff_args(left: PathBuf, right: PathBuf) -> DiffArgs {
        DiffArgs { left, right, overrides: Overrides::default() }
    }

    #[test]
    fn defaults_without_file() {
        let config = load_config(&Overrides::default(), false).unwrap();
        assert_eq!(config, DiffConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "deepeq.toml", "max_diff_count = 2\nmax_depth = 9\n");
        let overrides = Overrides {
            max_depth: Some(3),
            config: Some(path),
            ..Default::default()
        };

        let config = load_config(&overrides, true).unwrap();
        assert_eq!(config.max_diff_count, 2);
        assert_eq!(config.max_depth, 3);
        assert!(config.log_errors);
    }

    #[test]
    fn bad_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "broken.toml", "max_depth = \"deep\"");
        let overrides = Overrides { config: Some(path), ..Default::default() };

        let err = load_config(&overrides, false).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn oversized_precision_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "deepeq.toml", "float_precision = 70000\n");
        let overrides = Overrides { config: Some(path), ..Default::default() };

        let err = load_config(&overrides, false).unwrap_err();
        assert!(err.to_string().contains("deepeq.toml"));
    }

    #[test]
    fn identical_documents() {
        let dir = tempfile::tempdir().unwrap();
        let left = write_file(&dir, "a.json", r#"{"name": "svc", "ports": [80]}"#);
        let right = write_file(&dir, "b.json", r#"{"ports": [80], "name": "svc"}"#);

        let comparison = diff_files(&diff_args(left, right), false).unwrap();
        assert!(comparison.is_equal());
    }

    #[test]
    fn differing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let left = write_file(&dir, "a.json", r#"{"name": "svc", "ports": [80, 443]}"#);
        let right = write_file(&dir, "b.json", r#"{"name": "api", "ports": [80]}"#);

        let comparison = diff_files(&diff_args(left, right), false).unwrap();
        assert_eq!(
            comparison.diffs,
            ["map[name]: svc != api", "map[ports].slice[1]: 443 != <no value>"]
        );
    }

    #[test]
    fn integral_and_decimal_numbers_match() {
        let dir = tempfile::tempdir().unwrap();
        let left = write_file(&dir, "a.json", r#"{"replicas": 3, "ratio": 1}"#);
        let right = write_file(&dir, "b.json", r#"{"replicas": 3.0, "ratio": 1.00000000001}"#);

        let comparison = diff_files(&diff_args(left, right), false).unwrap();
        assert!(comparison.is_equal());
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let left = write_file(&dir, "a.json", "{");
        let right = write_file(&dir, "b.json", "{}");

        let err = diff_files(&diff_args(left, right), false).unwrap_err();
        assert!(err.to_string().contains("as JSON"));
    }

    #[test]
    fn json_report_shape() {
        let comparison = Comparison {
            diffs: vec!["1 != 2".into()],
            warnings: Vec::new(),
        };
        let report = comparison_json(&comparison);
        assert_eq!(report["equal"], json!(false));
        assert_eq!(report["diffs"], json!(["1 != 2"]));
        assert_eq!(report["warnings"], json!([]));
    }
}
