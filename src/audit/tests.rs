use super::*;
use crate::color_space::parse_hex;
use crate::types::{
    Bounds, ColorToken, DomElement, IssueType, LocatedColor, LocatedFont, MatchStatus, Point,
    TypographyToken,
};

fn located_color(hex: &str, x: f64, y: f64) -> LocatedColor {
    LocatedColor::new(
        parse_hex(hex).expect("valid hex"),
        Bounds::new(x - 10.0, y - 10.0, 20.0, 20.0),
        Point::new(x, y),
    )
}

fn located_font(family: &str, size: &str, weight: &str, x: f64, y: f64) -> LocatedFont {
    LocatedFont {
        font_family: family.into(),
        font_size: size.into(),
        font_weight: weight.into(),
        bounds: Bounds::new(x - 40.0, y - 8.0, 80.0, 16.0),
        centroid: Point::new(x, y),
    }
}

fn design_system() -> TokenSet {
    TokenSet {
        colors: vec![
            ColorToken::new("Color/Primary/500", "#3B82F6"),
            ColorToken::new("Color/Danger/500", "#EF4444"),
            ColorToken::new("Color/Gray/900", "#111827"),
        ],
        typography: vec![
            TypographyToken {
                role: "body-md".into(),
                font_family: "Inter, sans-serif".into(),
                font_size: "16px".into(),
                font_weight: "400".into(),
            },
            TypographyToken {
                role: "Heading Large".into(),
                font_family: "Inter".into(),
                font_size: "32px".into(),
                font_weight: "700".into(),
            },
        ],
    }
}

fn capture() -> CaptureBundle {
    CaptureBundle {
        colors: vec![
            located_color("#3B82F6", 100.0, 100.0), // exact primary: pass
            located_color("#F59E0B", 400.0, 100.0), // amber: fail
            located_color("#3A80F0", 110.0, 105.0), // near primary: pass/warn, next to the first
        ],
        fonts: vec![
            located_font("\"Inter\"", "16px", "400", 600.0, 300.0), // pass
            located_font("Inter", "30px", "600", 400.0, 110.0),     // weight off: warn
        ],
        dom: Some(vec![
            DomElement::new(".warning-banner", Bounds::new(390.0, 90.0, 20.0, 20.0))
                .with_style("backgroundColor", "rgb(245, 158, 11)"),
            DomElement::new("h1.title", Bounds::new(360.0, 102.0, 80.0, 16.0))
                .with_style("color", "#111827"),
        ]),
    }
}

#[test]
fn pipeline_reports_only_actionable_issues_by_default() {
    let report = run_audit(&capture(), &design_system(), &Config::default());

    assert!(report.issues.iter().all(|i| i.status != MatchStatus::Pass));
    let numbers: Vec<usize> = report.issues.iter().map(|i| i.number).collect();
    let expected: Vec<usize> = (1..=report.issues.len()).collect();
    assert_eq!(numbers, expected);
    assert_eq!(report.stats.total, report.issues.len());
    assert!(report.has_failures());

    // fail band first
    let first_warn = report
        .issues
        .iter()
        .position(|i| i.status == MatchStatus::Warn)
        .unwrap_or(report.issues.len());
    assert!(report.issues[..first_warn]
        .iter()
        .all(|i| i.status == MatchStatus::Fail));
}

#[test]
fn complete_mode_includes_every_sample() {
    let mut config = Config::default();
    config.report.include_passes = true;
    let report = run_audit(&capture(), &design_system(), &config);

    assert_eq!(report.issues.len(), 5);
    assert!(report.stats.pass >= 2);
    assert_eq!(report.issues.last().map(|i| i.status), Some(MatchStatus::Pass));
    // passes never produce fixes
    assert!(report
        .fixes
        .iter()
        .all(|f| report.issues.iter().any(|i| i.id == f.issue_id && i.status != MatchStatus::Pass)));
}

#[test]
fn fixes_resolve_selectors_from_dom() {
    let report = run_audit(&capture(), &design_system(), &Config::default());

    let amber = report
        .issues
        .iter()
        .find(|i| i.source.value == "#F59E0B")
        .expect("amber issue");
    let amber_fix = report
        .fixes
        .iter()
        .find(|f| f.issue_id == amber.id)
        .expect("amber fix");
    assert_eq!(amber_fix.selector.as_deref(), Some(".warning-banner"));
    assert_eq!(amber_fix.property, "background-color");

    let heading = report
        .issues
        .iter()
        .find(|i| i.issue_type == IssueType::Font)
        .expect("font issue");
    let heading_fix = report
        .fixes
        .iter()
        .find(|f| f.issue_id == heading.id)
        .expect("font fix");
    assert_eq!(heading_fix.selector.as_deref(), Some("h1.title"));
    assert_eq!(heading_fix.property, "font");
    assert_eq!(heading_fix.new_value, "var(--font-heading-large)");

    assert!(report.css.contains(".warning-banner {\n  background-color: "));
    assert!(report.css.contains("h1.title {\n  font: var(--font-heading-large);\n}"));
    assert_eq!(report.fix_summary.total, report.fixes.len());
    assert_eq!(report.fix_summary.without_selector, 0);
}

#[test]
fn neighbouring_markers_cluster_in_report() {
    // amber color (400,100) and heading font (400,110) sit 10px apart
    let report = run_audit(&capture(), &design_system(), &Config::default());

    let clustered: Vec<&str> = report
        .markers
        .clusters
        .iter()
        .flat_map(|c| c.issues.iter().map(|i| i.source.value.as_str()))
        .collect();
    assert!(clustered.contains(&"#F59E0B"), "clusters: {clustered:?}");
    assert_eq!(
        report.markers.standalone.len()
            + report
                .markers
                .clusters
                .iter()
                .map(|c| c.issues.len())
                .sum::<usize>(),
        report.issues.len()
    );
}

#[test]
fn empty_catalogue_degrades_instead_of_failing() {
    let report = run_audit(&capture(), &TokenSet::default(), &Config::default());

    let colors = filter_by_type(&report.issues, IssueType::Color);
    assert_eq!(colors.len(), 3);
    assert!(colors.iter().all(|i| i.status == MatchStatus::Fail));
    assert!(colors.iter().all(|i| i.suggestion.is_none()));
    assert!(colors[0].message.ends_with("(ΔE: ∞)"));

    let fonts = filter_by_type(&report.issues, IssueType::Font);
    assert_eq!(fonts.len(), 2);
    assert!(fonts.iter().all(|i| i.status == MatchStatus::Warn));
    assert!(report.fixes.is_empty());
    assert_eq!(report.css, "");
}

#[test]
fn report_without_dom_uses_comment_snippets() {
    let mut bundle = capture();
    bundle.dom = None;
    let report = run_audit(&bundle, &design_system(), &Config::default());

    assert!(!report.fixes.is_empty());
    assert!(report.fixes.iter().all(|f| f.selector.is_none()));
    assert!(report.fixes.iter().all(|f| f.css_code.starts_with("/* Use: ")));
    assert_eq!(report.fix_summary.with_selector, 0);
}

#[test]
fn report_is_deterministic() {
    let a = run_audit(&capture(), &design_system(), &Config::default());
    let b = run_audit(&capture(), &design_system(), &Config::default());
    assert_eq!(a, b);
}

#[tokio::test]
async fn catalogue_variant_matches_sync_pipeline() {
    let tokens = design_system();
    let via_catalogue = run_audit_with_catalogue(&capture(), &tokens, &Config::default())
        .await
        .expect("audit with catalogue");
    assert_eq!(via_catalogue, run_audit(&capture(), &tokens, &Config::default()));
}
