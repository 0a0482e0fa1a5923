use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::checker::{CheckResult, TreeChecker};
use crate::cli::{CheckArgs, Cli};
use crate::config::{Config, ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, compile_query};
use crate::output::{ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::scanner::{DirectoryScanner, FileScanner, TreeFileFilter};
use crate::{EXIT_CONFIG_ERROR, EXIT_RULES_FAILED, EXIT_SUCCESS, Result, TreeGuardError};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Check every tree file under `args.paths` and report the results.
///
/// Returns the process exit code: [`EXIT_SUCCESS`] when every rule holds,
/// [`EXIT_RULES_FAILED`] when any file has a failing finding.
///
/// # Errors
/// Returns an error if the rule file is missing or invalid, a path does not
/// exist, a tree file cannot be read or parsed, or the report cannot be written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Load and compile the rule file
    let loader = FileConfigLoader::new();
    let config = load_config(&loader, args.config.as_deref())?;
    let query = compile_query(&config)?;
    let query = match args.max_depth {
        Some(depth) => query.max_depth(depth),
        None => query,
    };
    let checker = TreeChecker::new(query).with_tag_key(config.tag_key.clone());

    // 2. Collect tree files
    let mut exclude_patterns = config.exclude.clone();
    exclude_patterns.extend(args.exclude.iter().cloned());
    let scanner = DirectoryScanner::new(TreeFileFilter::new(&exclude_patterns)?);
    let mut files = Vec::new();
    for path in &args.paths {
        files.extend(scanner.scan(path)?);
    }
    info!(files = files.len(), "checking trees");

    // 3. Check, format, write
    let results = check_files(&checker, &files)?;
    let output = format_output(args.format, &results, cli.color.into(), cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if results.iter().any(CheckResult::is_failed) {
        Ok(EXIT_RULES_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Load the rule file at `path`, or the default one when no path is given.
///
/// # Errors
/// Returns an error if the file cannot be loaded, or if no path is given and
/// no default rule file exists.
pub fn load_config<L: ConfigLoader>(loader: &L, path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return loader.load_from_path(path);
    }
    loader.load()?.ok_or_else(|| {
        TreeGuardError::Config(format!(
            "No rule file found ({LOCAL_CONFIG_NAME}). Run `tree-guard init` or pass --config."
        ))
    })
}

/// Check files in parallel. Results keep the order of `files`.
///
/// # Errors
/// Returns the first read or parse error encountered.
pub fn check_files(checker: &TreeChecker, files: &[PathBuf]) -> Result<Vec<CheckResult>> {
    files
        .par_iter()
        .map(|path| checker.check_file(path))
        .collect()
}

fn format_output(
    format: OutputFormat,
    results: &[CheckResult],
    color_mode: ColorMode,
    verbose: u8,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(results),
        OutputFormat::Json => JsonFormatter.format(results),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
        debug!(path = %path.display(), "wrote report");
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
