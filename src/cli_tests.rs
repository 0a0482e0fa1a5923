use std::path::PathBuf;

use super::*;

#[test]
fn cli_check_default_path() {
    let cli = Cli::parse_from(["tree-guard", "check"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.paths, vec![PathBuf::from(".")]);
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.config.is_none());
            assert!(args.max_depth.is_none());
        }
        Commands::Init(_) => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_paths() {
    let cli = Cli::parse_from(["tree-guard", "check", "trees", "main.json"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(
                args.paths,
                vec![PathBuf::from("trees"), PathBuf::from("main.json")]
            );
        }
        Commands::Init(_) => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_options() {
    let cli = Cli::parse_from([
        "tree-guard",
        "check",
        "-c",
        "rules.toml",
        "--format",
        "json",
        "-o",
        "report.json",
        "-x",
        "**/vendor/**",
        "--exclude",
        "*.min.json",
        "--max-depth",
        "4",
    ]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.config, Some(PathBuf::from("rules.toml")));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.output, Some(PathBuf::from("report.json")));
            assert_eq!(args.exclude, vec!["**/vendor/**", "*.min.json"]);
            assert_eq!(args.max_depth, Some(4));
        }
        Commands::Init(_) => panic!("Expected Check command"),
    }
}

#[test]
fn cli_rejects_unknown_format() {
    let result = Cli::try_parse_from(["tree-guard", "check", "--format", "sarif"]);
    assert!(result.is_err());
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from(["tree-guard", "-vv", "check", "--color", "never", "--quiet"]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert_eq!(cli.color, ColorChoice::Never);
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["tree-guard", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from(".tree-guard.toml"));
            assert!(!args.force);
        }
        Commands::Check(_) => panic!("Expected Init command"),
    }
}

#[test]
fn cli_init_with_output_and_force() {
    let cli = Cli::parse_from(["tree-guard", "init", "-o", "rules.toml", "--force"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from("rules.toml"));
            assert!(args.force);
        }
        Commands::Check(_) => panic!("Expected Init command"),
    }
}

#[test]
fn color_choice_maps_to_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Never), ColorMode::Never);
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["tree-guard"]).is_err());
}
