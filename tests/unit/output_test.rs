//! Tests for command result serialization

use packwright::core::models::LintResult;
use packwright::core::services::{LintReport, OwnershipResolver, plan};
use packwright::output::{LintSummary, ListResult, PlanResult};

use crate::common::{TestRepo, addr};

fn report() -> LintReport {
    LintReport {
        results: vec![
            LintResult::new(0, "ok\n", "", "flake8"),
            LintResult::new(1, "", "would reformat a.py\n", "black").with_partition(Some("py3".to_string())),
            LintResult::new(0, "", "", "black"),
        ],
        formatters: ["black".to_string()].into_iter().collect(),
    }
}

#[test]
fn test_lint_summary_fields() {
    let summary = LintSummary::new(&report(), Some("packwright fmt"));

    assert_eq!(summary.exit_code, 1);
    assert_eq!(summary.results.len(), 3);
    assert_eq!(
        summary.summary,
        vec![
            "",
            "✕ black failed.",
            "✓ flake8 succeeded.",
            "",
            "(One or more formatters failed. Run `packwright fmt` to fix.)",
        ]
    );
}

#[test]
fn test_lint_summary_json() {
    let json = serde_json::to_value(LintSummary::new(&report(), Some("packwright fmt"))).unwrap();

    assert_eq!(json["exit_code"], 1);
    assert!(json.get("lines").is_none());
    assert_eq!(json["results"][1]["linter_name"], "black");
    assert_eq!(json["results"][1]["partition_description"], "py3");
    assert!(json["results"][0].get("partition_description").is_none());
}

#[test]
fn test_no_hint_without_fix_command() {
    let summary = LintSummary::new(&report(), None);
    assert_eq!(summary.summary, vec!["", "✕ black failed.", "✓ flake8 succeeded."]);
}

#[test]
fn test_empty_report_has_no_summary() {
    let summary = LintSummary::new(&LintReport::default(), Some("packwright fmt"));
    assert_eq!(summary.exit_code, 0);
    assert!(summary.summary.is_empty());
}

#[test]
fn test_plan_json_uses_address_strings() {
    let repo = TestRepo::new();
    let graph = repo.graph();
    let resolver = OwnershipResolver::new(&graph).unwrap();
    let result = PlanResult {
        plans: vec![plan(&resolver, &addr("src/python/foo:dist")).unwrap()],
    };
    let json = serde_json::to_value(&result).unwrap();

    let foo = &json["plans"][0];
    assert_eq!(foo["address"], "src/python/foo:dist");
    assert_eq!(foo["name"], "foo");
    assert_eq!(foo["owned"], serde_json::json!(["src/python/foo/bar:lib"]));
    assert_eq!(foo["requirements"], serde_json::json!(["requests>=2.31"]));
}

#[test]
fn test_list_json_uses_kind_names() {
    let repo = TestRepo::new();
    let graph = repo.graph();
    let result = ListResult {
        targets: graph.targets().cloned().collect(),
    };
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["targets"][0]["address"], "3rdparty:requests");
    assert_eq!(json["targets"][0]["kind"], "python_requirement");
    assert_eq!(json["targets"][0]["requirements"], serde_json::json!(["requests>=2.31"]));
    assert!(json["targets"][0].get("provides").is_none());
}
