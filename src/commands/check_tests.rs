use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use crate::cli::Commands;

use super::*;

const RULES: &str = r#"
[rules.WhileStatement]
message = "There should be no [while] loops"
forbid = true
"#;

const CLEAN_TREE: &str = r#"{"type":"Program","body":[]}"#;
const WHILE_TREE: &str = r#"{"type":"Program","body":[{"type":"WhileStatement","test":{"type":"Identifier","name":"x"},"body":{"type":"BlockStatement","body":[]}}]}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("rules.toml"), RULES).unwrap();
        std::fs::create_dir(dir.path().join("trees")).unwrap();
        Self { dir }
    }

    fn tree(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join("trees").join(name), content).unwrap();
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn run(&self, extra: &[&str]) -> (Result<i32>, String) {
        let report = self.path("report.txt");
        let rules = self.path("rules.toml");
        let trees = self.path("trees");
        let mut argv = vec![
            "tree-guard",
            "--color",
            "never",
            "check",
            trees.as_str(),
            "-c",
            rules.as_str(),
            "-o",
            report.as_str(),
        ];
        argv.extend_from_slice(extra);
        let cli = Cli::parse_from(argv);
        let Commands::Check(args) = &cli.command else {
            panic!("Expected Check command");
        };
        let code = run_check_impl(args, &cli);
        let output = std::fs::read_to_string(&report).unwrap_or_default();
        (code, output)
    }
}

struct StubLoader {
    local: Option<Config>,
}

impl ConfigLoader for StubLoader {
    fn load(&self) -> Result<Option<Config>> {
        Ok(self.local.clone())
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        Err(TreeGuardError::Config(format!("asked for {}", path.display())))
    }
}

#[test]
fn clean_trees_exit_success() {
    let ws = Workspace::new();
    ws.tree("a.json", CLEAN_TREE);

    let (code, output) = ws.run(&[]);

    assert_eq!(code.unwrap(), EXIT_SUCCESS);
    assert!(output.contains("1 files checked: 1 passed, 0 failed"));
}

#[test]
fn violations_exit_rules_failed() {
    let ws = Workspace::new();
    ws.tree("a.json", CLEAN_TREE);
    ws.tree("b.json", WHILE_TREE);

    let (code, output) = ws.run(&[]);

    assert_eq!(code.unwrap(), EXIT_RULES_FAILED);
    assert!(output.contains("b.json"));
    assert!(output.contains("WhileStatement: There should be no `while` loops"));
    assert!(output.contains("2 files checked: 1 passed, 1 failed"));
}

#[test]
fn json_report() {
    let ws = Workspace::new();
    ws.tree("b.json", WHILE_TREE);

    let (code, output) = ws.run(&["--format", "json"]);

    assert_eq!(code.unwrap(), EXIT_RULES_FAILED);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["summary"]["failed"], 1);
    assert_eq!(parsed["results"][0]["findings"][0]["kind"], "WhileStatement");
}

#[test]
fn exclude_skips_files() {
    let ws = Workspace::new();
    ws.tree("a.json", CLEAN_TREE);
    ws.tree("bad.json", WHILE_TREE);

    let (code, output) = ws.run(&["-x", "**/bad.json"]);

    assert_eq!(code.unwrap(), EXIT_SUCCESS);
    assert!(output.contains("1 files checked"));
}

#[test]
fn max_depth_override_limits_matching() {
    let ws = Workspace::new();
    ws.tree(
        "nested.json",
        r#"{"type":"Program","body":[{"type":"BlockStatement","body":[{"type":"WhileStatement"}]}]}"#,
    );

    let (unbounded, _) = ws.run(&[]);
    let (bounded, _) = ws.run(&["--max-depth", "1"]);

    assert_eq!(unbounded.unwrap(), EXIT_RULES_FAILED);
    assert_eq!(bounded.unwrap(), EXIT_SUCCESS);
}

#[test]
fn malformed_tree_is_an_error() {
    let ws = Workspace::new();
    ws.tree("broken.json", "{ not json");

    let (code, _) = ws.run(&[]);

    assert!(matches!(code, Err(TreeGuardError::TreeParse { .. })));
}

#[test]
fn missing_rule_file_is_an_error() {
    let ws = Workspace::new();
    ws.tree("a.json", CLEAN_TREE);
    std::fs::remove_file(ws.dir.path().join("rules.toml")).unwrap();

    let (code, _) = ws.run(&[]);

    assert!(matches!(code, Err(TreeGuardError::FileRead { .. })));
}

#[test]
fn load_config_prefers_explicit_path() {
    let loader = StubLoader {
        local: Some(Config::default()),
    };

    let err = load_config(&loader, Some(Path::new("custom.toml"))).unwrap_err();

    assert!(err.to_string().contains("asked for custom.toml"));
}

#[test]
fn load_config_falls_back_to_local() {
    let loader = StubLoader {
        local: Some(Config::default()),
    };

    assert_eq!(load_config(&loader, None).unwrap(), Config::default());
}

#[test]
fn load_config_without_any_rule_file() {
    let loader = StubLoader { local: None };

    let err = load_config(&loader, None).unwrap_err();

    assert!(err.to_string().contains("No rule file found"));
}

#[test]
fn check_files_keeps_input_order() {
    let ws = Workspace::new();
    let names = ["c.json", "a.json", "b.json"];
    for name in names {
        ws.tree(name, CLEAN_TREE);
    }
    let files: Vec<PathBuf> = names
        .iter()
        .map(|n| ws.dir.path().join("trees").join(n))
        .collect();
    let checker = TreeChecker::new(crate::assert::Query::new());

    let results = check_files(&checker, &files).unwrap();

    let paths: Vec<&Path> = results.iter().map(CheckResult::path).collect();
    assert_eq!(paths, files.iter().map(PathBuf::as_path).collect::<Vec<_>>());
}
