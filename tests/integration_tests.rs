//! Integration tests for the stackcmp CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a stackcmp command isolated from the user's config
fn stackcmp(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stackcmp").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("STACKCMP_FORMAT")
        .env_remove("STACKCMP_THEME")
        .env_remove("STACKCMP_LOG");
    cmd
}

// ============================================================================
// Basic
// ============================================================================

#[test]
fn test_help_lists_views() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("factors"))
        .stdout(predicate::str::contains("timeline"))
        .stdout(predicate::str::contains("roi"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_version() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackcmp"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp).arg("radar").assert().failure();
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn test_factors_csv() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Factor,MicrosoftStack,AzurePowerApps,Difference\n",
        ))
        .stdout(predicate::str::contains("Scalability,6,9,3\n"));
}

#[test]
fn test_factors_min_score_filter() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--min-score", "9", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial Cost").not())
        .stdout(predicate::str::contains("Security Features,8,9,1"));
}

#[test]
fn test_factors_min_score_out_of_range() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--min-score", "11"])
        .assert()
        .failure();
}

#[test]
fn test_factors_focus_md() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--focus", "scalability,learning curve", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Scalability**"))
        .stdout(predicate::str::contains("**Learning Curve**"));
}

#[test]
fn test_factors_styled() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score Profile"))
        .stdout(predicate::str::contains("Score Summary"))
        .stdout(predicate::str::contains("10 factor(s)"));
}

#[test]
fn test_factors_no_raw_hides_table() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["factors", "--no-raw", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score Summary").not());
}

#[test]
fn test_timeline_json() {
    let tmp = TempDir::new().unwrap();
    let output = stackcmp(&tmp)
        .args(["timeline", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total_days"]["MicrosoftStack"], 225);
    assert_eq!(parsed["total_days"]["AzurePowerApps"], 165);
}

#[test]
fn test_costs_totals() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["costs", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$205,000.00"))
        .stdout(predicate::str::contains("$190,000.00"))
        .stdout(predicate::str::contains("$-15,000.00"));
}

#[test]
fn test_features_md_symbols() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["features", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Mobile Support | ⚠️ | ✅ |"))
        .stdout(predicate::str::contains("❌ - Not Supported"));
}

#[test]
fn test_summary() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["summary", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key Findings"))
        .stdout(predicate::str::contains("Rapid prototyping needs"));
}

#[test]
fn test_dashboard_md() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["dashboard", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Comprehensive Comparison Matrix"))
        .stdout(predicate::str::contains("## ROI Calculator"));
}

#[test]
fn test_dashboard_csv_rejected() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["dashboard", "-f", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("export"));
}

// ============================================================================
// ROI calculator
// ============================================================================

#[test]
fn test_roi_defaults() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["roi", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$110,000.00"))
        .stdout(predicate::str::contains("$54,000.00"));
}

#[test]
fn test_roi_lower_boundary_json() {
    let tmp = TempDir::new().unwrap();
    let output = stackcmp(&tmp)
        .args([
            "roi",
            "--users",
            "10",
            "--months",
            "6",
            "--complexity",
            "low",
            "--roi",
            "0",
            "-f",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["output"]["cost_a"], 44800.0);
    assert_eq!(parsed["output"]["cost_b"], 25920.0);
    assert_eq!(parsed["output"]["roi_a"], 0.0);
    assert_eq!(parsed["output"]["roi_b"], 0.0);
}

#[test]
fn test_roi_upper_boundary_csv() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args([
            "roi",
            "--users",
            "1000",
            "--months",
            "36",
            "--complexity",
            "HIGH",
            "--roi",
            "200",
            "-f",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MicrosoftStack,4745000.00,9490000.00"))
        .stdout(predicate::str::contains("AzurePowerApps,1911000.00,3822000.00"));
}

#[test]
fn test_roi_rejects_out_of_range_flags() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp).args(["roi", "--users", "0"]).assert().failure();
    stackcmp(&tmp).args(["roi", "--months", "48"]).assert().failure();
    stackcmp(&tmp).args(["roi", "--roi", "250"]).assert().failure();
    stackcmp(&tmp)
        .args(["roi", "--complexity", "extreme"])
        .assert()
        .failure();
}

#[test]
fn test_roi_uses_project_config_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".stackcmp.yaml"),
        "roi:\n  users: 100\n  complexity: high\n",
    )
    .unwrap();
    // (100 * 100 * 12 + 50000) * 1.3
    stackcmp(&tmp)
        .args(["roi", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$221,000.00"));
}

#[test]
fn test_roi_rejects_out_of_range_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stackcmp.yaml"), "roi:\n  months: 60\n").unwrap();
    stackcmp(&tmp).arg("roi").assert().failure();
}

// ============================================================================
// Export / verify / report
// ============================================================================

#[test]
fn test_export_to_stdout() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["export", "costs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Category,MicrosoftStack,AzurePowerApps\nLicensing,50000,70000\n",
        ));
}

#[test]
fn test_export_all_then_verify() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["export", "all", "--dir", "out"])
        .assert()
        .success();

    for name in [
        "comparison_data.csv",
        "timeline_data.csv",
        "cost_analysis.csv",
        "feature_comparison.csv",
    ] {
        let path = tmp.path().join("out").join(name);
        assert!(path.exists(), "missing {}", name);
        stackcmp(&tmp)
            .args(["verify", path.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("matches"));
    }
}

#[test]
fn test_verify_detects_edits() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("timeline_data.csv");
    stackcmp(&tmp)
        .args(["export", "timeline", "-o", path.to_str().unwrap()])
        .assert()
        .success();

    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("Testing,30,30,Medium", "Testing,30,30,Low");
    fs::write(&path, edited).unwrap();

    stackcmp(&tmp)
        .args(["verify", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("5"));
}

#[test]
fn test_verify_rejects_bad_header() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, "Category,Microsoft Stack,Azure Power Apps\nLicensing,1,2\n").unwrap();
    stackcmp(&tmp)
        .args(["verify", path.to_str().unwrap(), "--table", "costs"])
        .assert()
        .failure();
}

#[test]
fn test_report_prints_notice() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .arg("report")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Full report export will be available in the next version",
        ));
    stackcmp(&tmp)
        .args(["report", "--kind", "pdf"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PDF export"));
}

// ============================================================================
// Config / completions
// ============================================================================

#[test]
fn test_config_set_and_show() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["config", "set", "theme", "dark"])
        .assert()
        .success();
    let content = fs::read_to_string(tmp.path().join(".stackcmp.yaml")).unwrap();
    assert!(content.contains("theme: dark"));

    stackcmp(&tmp)
        .args(["config", "show", "theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_config_complexity_any_case() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["config", "set", "roi.complexity", "High"])
        .assert()
        .success();

    stackcmp(&tmp)
        .args(["config", "show", "roi.complexity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("high"));

    let output = stackcmp(&tmp)
        .args(["roi", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["output"]["cost_a"], 143000.0);
}

#[test]
fn test_theme_and_format_flags_ignore_case() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["costs", "--theme", "DARK", "-f", "CSV"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Category,MicrosoftStack,AzurePowerApps\n"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["config", "set", "theme", "purple"])
        .assert()
        .failure();
    assert!(!tmp.path().join(".stackcmp.yaml").exists());
}

#[test]
fn test_config_unset() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stackcmp.yaml"), "roi:\n  users: 30\n").unwrap();
    stackcmp(&tmp)
        .args(["config", "unset", "roi.users"])
        .assert()
        .success();
    stackcmp(&tmp)
        .args(["config", "unset", "roi.users"])
        .assert()
        .failure();
}

#[test]
fn test_env_format_override() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .env("STACKCMP_FORMAT", "csv")
        .arg("costs")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Category,MicrosoftStack,AzurePowerApps\n"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    stackcmp(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stackcmp"));
}
