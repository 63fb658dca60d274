use tracing::debug;

use crate::types::{
    resolve_token_color, ColorMatch, FontMatch, Issue, IssueSource, IssueStats, IssueType,
    MatchStatus, Suggestion,
};

/// Actionable issues only: `pass` results are dropped.
pub fn generate_issues(color_matches: &[ColorMatch], font_matches: &[FontMatch]) -> Vec<Issue> {
    build(color_matches, font_matches, false)
}

/// Every result, passes included, for full audit reports.
pub fn generate_all_issues(color_matches: &[ColorMatch], font_matches: &[FontMatch]) -> Vec<Issue> {
    build(color_matches, font_matches, true)
}

fn build(color_matches: &[ColorMatch], font_matches: &[FontMatch], include_passes: bool) -> Vec<Issue> {
    let keep = |status: MatchStatus| include_passes || status.is_actionable();
    let mut issues: Vec<Issue> = Vec::with_capacity(color_matches.len() + font_matches.len());

    // Provisional numbering: colors first, then fonts. Replaced after sorting.
    for m in color_matches.iter().filter(|m| keep(m.status)) {
        let number = issues.len() + 1;
        issues.push(issue_from_color(number, m));
    }
    for m in font_matches.iter().filter(|m| keep(m.status)) {
        let number = issues.len() + 1;
        issues.push(issue_from_font(number, m));
    }

    // `sort_by_key` is stable, so order within a severity band is preserved.
    issues.sort_by_key(|issue| issue.status.severity_rank());
    renumber(&mut issues);

    debug!(
        colors = color_matches.len(),
        fonts = font_matches.len(),
        issues = issues.len(),
        include_passes,
        "generated issue taxonomy"
    );
    issues
}

/// Dense `1..=N` numbering with matching `issue-<n>` ids.
pub fn renumber(issues: &mut [Issue]) {
    for (idx, issue) in issues.iter_mut().enumerate() {
        issue.number = idx + 1;
        issue.id = issue_id(issue.number);
    }
}

fn issue_id(number: usize) -> String {
    format!("issue-{number}")
}

fn issue_from_color(number: usize, m: &ColorMatch) -> Issue {
    let hex = m.source.display_hex();
    let message = match (m.status, &m.token) {
        (MatchStatus::Pass, Some(token)) => format!("Color {} matches `{}`", hex, token.path),
        (MatchStatus::Warn, Some(token)) => format!(
            "Color {} close to `{}` (ΔE: {})",
            hex,
            token.path,
            format_delta_e(m.delta_e)
        ),
        _ => format!(
            "Color {} not found in design system (ΔE: {})",
            hex,
            format_delta_e(m.delta_e)
        ),
    };
    let suggestion = m.token.as_ref().map(|token| Suggestion {
        token_name: token.path.clone(),
        css_variable: Some(token.css_variable()),
        value: Some(resolve_token_color(token).to_string()),
    });

    Issue {
        id: issue_id(number),
        number,
        issue_type: IssueType::Color,
        status: m.status,
        message,
        marker: m.source.centroid,
        bounds: m.source.bounds,
        source: IssueSource {
            value: hex,
            rgb: Some(m.source.rgb),
        },
        suggestion,
    }
}

fn issue_from_font(number: usize, m: &FontMatch) -> Issue {
    let message = match &m.token {
        Some(token) if m.issues.is_empty() => format!("Font matches `{}`", token.role),
        Some(token) => format!("Font differs from `{}`: {}", token.role, m.issues.join("; ")),
        None => format!("Font {}: no matching token found", m.source.describe()),
    };
    let suggestion = m.token.as_ref().map(|token| Suggestion {
        token_name: token.role.clone(),
        css_variable: Some(token.css_variable()),
        value: Some(token.describe()),
    });

    Issue {
        id: issue_id(number),
        number,
        issue_type: IssueType::Font,
        status: m.status,
        message,
        marker: m.source.centroid,
        bounds: m.source.bounds,
        source: IssueSource {
            value: m.source.describe(),
            rgb: None,
        },
        suggestion,
    }
}

/// One decimal place; an unbounded distance renders as `∞`.
fn format_delta_e(delta_e: f64) -> String {
    if delta_e.is_finite() {
        format!("{:.1}", delta_e)
    } else {
        "∞".to_string()
    }
}

pub fn issue_stats(issues: &[Issue]) -> IssueStats {
    let count = |status: MatchStatus| issues.iter().filter(|i| i.status == status).count();
    let total = issues.len();
    let pass = count(MatchStatus::Pass);
    let warn = count(MatchStatus::Warn);
    let fail = count(MatchStatus::Fail);
    let rate = |n: usize| {
        if total == 0 {
            0.0
        } else {
            n as f64 / total as f64 * 100.0
        }
    };

    IssueStats {
        total,
        pass,
        warn,
        fail,
        pass_rate: rate(pass),
        fail_rate: rate(fail),
    }
}

pub fn filter_by_type(issues: &[Issue], issue_type: IssueType) -> Vec<Issue> {
    issues
        .iter()
        .filter(|i| i.issue_type == issue_type)
        .cloned()
        .collect()
}

pub fn filter_by_status(issues: &[Issue], status: MatchStatus) -> Vec<Issue> {
    issues
        .iter()
        .filter(|i| i.status == status)
        .cloned()
        .collect()
}

/// Everything that is not a pass.
pub fn actionable_issues(issues: &[Issue]) -> Vec<Issue> {
    issues
        .iter()
        .filter(|i| i.status.is_actionable())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::typography::NO_MATCHING_TOKEN;
    use crate::types::{Bounds, ColorToken, LocatedColor, LocatedFont, Point, Rgb, TypographyToken};

    fn color_match(rgb: Rgb, status: MatchStatus, delta_e: f64, token: Option<&str>) -> ColorMatch {
        ColorMatch {
            source: LocatedColor::new(
                rgb,
                Bounds::new(10.0, 20.0, 30.0, 40.0),
                Point::new(25.0, 40.0),
            ),
            token: token.map(|path| ColorToken::new(path, "#3B82F6")),
            delta_e,
            status,
        }
    }

    fn font_match(status: MatchStatus, issues: &[&str], role: Option<&str>) -> FontMatch {
        FontMatch {
            source: LocatedFont {
                font_family: "Inter".into(),
                font_size: "14px".into(),
                font_weight: "400".into(),
                bounds: Bounds::new(0.0, 0.0, 50.0, 10.0),
                centroid: Point::new(25.0, 5.0),
            },
            token: role.map(|r| TypographyToken {
                role: r.into(),
                font_family: "Inter".into(),
                font_size: "16px".into(),
                font_weight: "400".into(),
            }),
            status,
            issues: issues.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn failures_sort_first_and_numbers_are_dense() {
        let colors = vec![
            color_match(Rgb::new(1, 1, 1), MatchStatus::Warn, 5.0, Some("Color/A")),
            color_match(Rgb::new(2, 2, 2), MatchStatus::Fail, 20.0, Some("Color/B")),
        ];
        let fonts = vec![font_match(
            MatchStatus::Fail,
            &["Font size: expected 16px, found 14px", "Font weight: expected 700, found 400"],
            Some("body-md"),
        )];

        let issues = generate_issues(&colors, &fonts);

        assert_eq!(issues.len(), 3);
        let numbers: Vec<usize> = issues.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["issue-1", "issue-2", "issue-3"]);
        assert_eq!(issues[0].status, MatchStatus::Fail);
        assert_eq!(issues[1].status, MatchStatus::Fail);
        assert_eq!(issues[2].status, MatchStatus::Warn);
        // stable within the band: color before font
        assert_eq!(issues[0].issue_type, IssueType::Color);
        assert_eq!(issues[1].issue_type, IssueType::Font);
    }

    #[test]
    fn passes_are_dropped_unless_complete_mode() {
        let colors = vec![color_match(Rgb::new(59, 130, 246), MatchStatus::Pass, 0.0, Some("Color/Primary/500"))];
        let fonts = vec![font_match(MatchStatus::Pass, &[], Some("body-md"))];

        assert!(generate_issues(&colors, &fonts).is_empty());

        let all = generate_all_issues(&colors, &fonts);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "Color #3B82F6 matches `Color/Primary/500`");
        assert_eq!(all[1].message, "Font matches `body-md`");
    }

    #[test]
    fn messages_follow_status_templates() {
        let colors = vec![
            color_match(Rgb::new(58, 128, 240), MatchStatus::Warn, 4.26, Some("Color/Primary/500")),
            color_match(Rgb::new(255, 0, 0), MatchStatus::Fail, f64::INFINITY, None),
        ];
        let issues = generate_issues(&colors, &[]);

        assert_eq!(issues[0].message, "Color #FF0000 not found in design system (ΔE: ∞)");
        assert_eq!(issues[1].message, "Color #3A80F0 close to `Color/Primary/500` (ΔE: 4.3)");
    }

    #[test]
    fn font_messages_cover_missing_token() {
        let fonts = vec![font_match(MatchStatus::Warn, &[NO_MATCHING_TOKEN], None)];
        let issues = generate_issues(&[], &fonts);
        assert_eq!(issues[0].message, "Font Inter 14px/400: no matching token found");
        assert!(issues[0].suggestion.is_none());
    }

    #[test]
    fn markers_bounds_and_suggestions_carry_over() {
        let colors = vec![color_match(Rgb::new(1, 2, 3), MatchStatus::Fail, 12.0, Some("Color/Primary/500"))];
        let issue = &generate_issues(&colors, &[])[0];

        assert_eq!(issue.marker, Point::new(25.0, 40.0));
        assert_eq!(issue.bounds, Bounds::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(issue.source.value, "#010203");
        assert_eq!(issue.source.rgb, Some(Rgb::new(1, 2, 3)));
        let suggestion = issue.suggestion.as_ref().expect("suggestion");
        assert_eq!(suggestion.token_name, "Color/Primary/500");
        assert_eq!(suggestion.css_variable.as_deref(), Some("var(--color-primary-500)"));
        assert_eq!(suggestion.value.as_deref(), Some("#3B82F6"));
    }

    #[test]
    fn generation_is_idempotent() {
        let colors = vec![
            color_match(Rgb::new(1, 1, 1), MatchStatus::Warn, 5.0, Some("Color/A")),
            color_match(Rgb::new(2, 2, 2), MatchStatus::Fail, 20.0, Some("Color/B")),
            color_match(Rgb::new(3, 3, 3), MatchStatus::Warn, 6.0, Some("Color/C")),
        ];
        let fonts = vec![font_match(MatchStatus::Warn, &["Font weight: expected 700, found 400"], Some("body"))];

        assert_eq!(generate_issues(&colors, &fonts), generate_issues(&colors, &fonts));
    }

    #[test]
    fn stats_and_filters() {
        let colors = vec![
            color_match(Rgb::new(1, 1, 1), MatchStatus::Pass, 1.0, Some("Color/A")),
            color_match(Rgb::new(2, 2, 2), MatchStatus::Fail, 20.0, Some("Color/B")),
            color_match(Rgb::new(3, 3, 3), MatchStatus::Warn, 6.0, Some("Color/C")),
        ];
        let fonts = vec![font_match(MatchStatus::Pass, &[], Some("body"))];
        let all = generate_all_issues(&colors, &fonts);

        let stats = issue_stats(&all);
        assert_eq!((stats.total, stats.pass, stats.warn, stats.fail), (4, 2, 1, 1));
        assert!((stats.pass_rate - 50.0).abs() < 1e-9);
        assert!((stats.fail_rate - 25.0).abs() < 1e-9);

        assert_eq!(filter_by_type(&all, IssueType::Font).len(), 1);
        assert_eq!(filter_by_status(&all, MatchStatus::Pass).len(), 2);
        let actionable = actionable_issues(&all);
        assert_eq!(actionable.len(), 2);
        assert!(actionable.iter().all(|i| i.status != MatchStatus::Pass));
    }

    #[test]
    fn stats_of_empty_list_are_zero() {
        let stats = issue_stats(&[]);
        assert_eq!(stats, IssueStats::default());
    }
}
