//! CSS remediation for issues that carry a token suggestion.
//!
//! Each fix is anchored to a DOM selector when a snapshot is available:
//! exact bounds first, then the element containing the marker, then the
//! element whose origin is nearest. Without DOM data the fix degrades to a
//! comment-only snippet.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::color_space::parse_css_color;
use crate::types::{DomElement, Fix, FixSummary, Issue, IssueType, Rgb};

const PROPERTY_BACKGROUND: &str = "background-color";
const PROPERTY_COLOR: &str = "color";
const PROPERTY_FONT: &str = "font";

/// One fix per issue with a `suggestion.cssVariable`, in issue order.
pub fn generate_fixes(issues: &[Issue], dom: Option<&[DomElement]>) -> Vec<Fix> {
    let fixes: Vec<Fix> = issues
        .iter()
        .filter_map(|issue| {
            let new_value = issue.css_variable()?.to_string();
            let element = dom.and_then(|elements| resolve_element(issue, elements));
            let property = determine_property(issue, element);
            let selector = element.map(|e| e.selector.clone());
            let css_code = css_snippet(selector.as_deref(), property, &new_value);
            trace!(
                issue = %issue.id,
                selector = selector.as_deref().unwrap_or("-"),
                property,
                "resolved fix"
            );
            Some(Fix {
                issue_id: issue.id.clone(),
                selector,
                property: property.to_string(),
                old_value: issue.source.value.clone(),
                new_value,
                css_code,
            })
        })
        .collect();
    debug!(
        issues = issues.len(),
        fixes = fixes.len(),
        with_dom = dom.is_some(),
        "generated fixes"
    );
    fixes
}

/// Selector of the element an issue belongs to, if any.
pub fn resolve_selector(issue: &Issue, elements: &[DomElement]) -> Option<String> {
    resolve_element(issue, elements).map(|e| e.selector.clone())
}

fn resolve_element<'a>(issue: &Issue, elements: &'a [DomElement]) -> Option<&'a DomElement> {
    if let Some(exact) = elements.iter().find(|e| e.bounds == issue.bounds) {
        return Some(exact);
    }
    if let Some(containing) = elements.iter().find(|e| e.bounds.contains(&issue.marker)) {
        return Some(containing);
    }

    let origin = issue.bounds.origin();
    let mut nearest: Option<(&DomElement, f64)> = None;
    for element in elements {
        let distance = element.bounds.origin().distance_to(&origin);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((element, distance));
        }
    }
    nearest.map(|(element, _)| element)
}

/// `font` for typography; for colors, whichever computed style the source color matches.
pub fn determine_property(issue: &Issue, element: Option<&DomElement>) -> &'static str {
    if issue.issue_type == IssueType::Font {
        return PROPERTY_FONT;
    }
    let (Some(source), Some(element)) = (issue_color(issue), element) else {
        return PROPERTY_BACKGROUND;
    };

    let matches_style = |value: Option<&str>| value.and_then(parse_css_color) == Some(source);
    if matches_style(element.background_color()) {
        PROPERTY_BACKGROUND
    } else if matches_style(element.color()) {
        PROPERTY_COLOR
    } else {
        PROPERTY_BACKGROUND
    }
}

fn issue_color(issue: &Issue) -> Option<Rgb> {
    issue
        .source
        .rgb
        .or_else(|| parse_css_color(&issue.source.value))
}

fn css_snippet(selector: Option<&str>, property: &str, value: &str) -> String {
    match selector {
        Some(selector) => format!("{selector} {{\n  {property}: {value};\n}}"),
        None => comment_snippet(value),
    }
}

fn comment_snippet(value: &str) -> String {
    format!("/* Use: {value} */")
}

/// Merges fixes into one rule block per selector, in first-seen order.
///
/// A repeated property within a selector keeps its first declaration.
/// Fixes without a selector follow the blocks as standalone comments.
pub fn consolidate_fixes(fixes: &[Fix]) -> String {
    let mut blocks: Vec<(&str, Vec<(&str, &str)>)> = Vec::new();
    let mut comments: Vec<String> = Vec::new();

    for fix in fixes {
        let Some(selector) = fix.selector.as_deref() else {
            comments.push(comment_snippet(&fix.new_value));
            continue;
        };
        let idx = match blocks.iter().position(|(s, _)| *s == selector) {
            Some(idx) => idx,
            None => {
                blocks.push((selector, Vec::new()));
                blocks.len() - 1
            }
        };
        let declarations = &mut blocks[idx].1;
        if !declarations.iter().any(|(p, _)| *p == fix.property) {
            declarations.push((fix.property.as_str(), fix.new_value.as_str()));
        }
    }

    let mut parts: Vec<String> = blocks
        .into_iter()
        .map(|(selector, declarations)| {
            let body: Vec<String> = declarations
                .into_iter()
                .map(|(property, value)| format!("  {property}: {value};"))
                .collect();
            format!("{selector} {{\n{}\n}}", body.join("\n"))
        })
        .collect();
    parts.extend(comments);
    parts.join("\n\n")
}

pub fn fix_summary(fixes: &[Fix]) -> FixSummary {
    let mut by_property: BTreeMap<String, usize> = BTreeMap::new();
    for fix in fixes {
        *by_property.entry(fix.property.clone()).or_default() += 1;
    }
    let with_selector = fixes.iter().filter(|f| f.selector.is_some()).count();

    FixSummary {
        total: fixes.len(),
        with_selector,
        without_selector: fixes.len() - with_selector,
        by_property,
    }
}
