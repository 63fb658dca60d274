//! Design-system tokens supplied by the token catalogue.
//!
//! Tokens are read-only to the engine. Color tokens arrive either with a flat
//! hex string or a `{ "hex": ... }` object; [`resolve_token_color`] is the one
//! place that normalizes the two shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw color value of a token as delivered by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorTokenValue {
    Hex(String),
    Object { hex: String },
}

impl From<&str> for ColorTokenValue {
    fn from(value: &str) -> Self {
        ColorTokenValue::Hex(value.to_string())
    }
}

/// A design-system color entry, e.g. `Color/Primary/500`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub path: String,
    #[serde(alias = "value")]
    pub hex: ColorTokenValue,
}

impl ColorToken {
    pub fn new(path: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hex: ColorTokenValue::Hex(hex.into()),
        }
    }

    /// `Category/Sub/Name` -> `var(--category-sub-name)`.
    pub fn css_variable(&self) -> String {
        format!("var(--{})", kebab_identifier(&self.path))
    }
}

/// Hex string of a token regardless of the shape it was delivered in.
pub fn resolve_token_color(token: &ColorToken) -> &str {
    match &token.hex {
        ColorTokenValue::Hex(hex) => hex,
        ColorTokenValue::Object { hex } => hex,
    }
}

/// A design-system typography role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub role: String,
    pub font_family: String,
    #[serde(deserialize_with = "css_value")]
    pub font_size: String,
    #[serde(deserialize_with = "css_value")]
    pub font_weight: String,
}

impl TypographyToken {
    /// `Role Name` -> `var(--font-role-name)`.
    pub fn css_variable(&self) -> String {
        format!("var(--font-{})", kebab_identifier(&self.role))
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {}/{}",
            self.font_family, self.font_size, self.font_weight
        )
    }
}

/// The full token catalogue for one theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    #[serde(default)]
    pub colors: Vec<ColorToken>,
    #[serde(default)]
    pub typography: Vec<TypographyToken>,
}

/// Font sizes and weights arrive as `"16px"` / `"400"` or as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum CssValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accepts a string or a number and yields the string the matchers compare.
/// Whole floats drop their fraction (`400.0` -> `"400"`).
pub(crate) fn css_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CssValue::deserialize(deserializer)? {
        CssValue::Text(text) => text,
        CssValue::Integer(n) => n.to_string(),
        CssValue::Float(n) => n.to_string(),
    })
}

/// Each `/` and each whitespace run becomes one hyphen; output is lower-case.
fn kebab_identifier(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_whitespace = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch == '/' {
            out.push('-');
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_path_maps_to_css_variable() {
        let token = ColorToken::new("Color/Primary/500", "#3B82F6");
        assert_eq!(token.css_variable(), "var(--color-primary-500)");

        let spaced = ColorToken::new("Brand / Accent Light", "#FFFFFF");
        assert_eq!(spaced.css_variable(), "var(--brand---accent-light)");

        let tabbed = ColorToken::new("Surface\t \tRaised//Low", "#FFFFFF");
        assert_eq!(tabbed.css_variable(), "var(--surface-raised--low)");
    }

    #[test]
    fn typography_role_maps_to_css_variable() {
        let token = TypographyToken {
            role: "Heading Large".into(),
            font_family: "Inter".into(),
            font_size: "32px".into(),
            font_weight: "700".into(),
        };
        assert_eq!(token.css_variable(), "var(--font-heading-large)");
    }

    #[test]
    fn token_value_accepts_flat_and_object_shapes() {
        let flat: ColorToken =
            serde_json::from_str(r##"{"path":"Color/Gray/100","hex":"#F3F4F6"}"##).unwrap();
        let nested: ColorToken =
            serde_json::from_str(r##"{"path":"Color/Gray/100","value":{"hex":"#F3F4F6"}}"##)
                .unwrap();

        assert_eq!(resolve_token_color(&flat), "#F3F4F6");
        assert_eq!(resolve_token_color(&nested), "#F3F4F6");
    }

    #[test]
    fn typography_accepts_numeric_size_and_weight() {
        let set: TokenSet = serde_json::from_str(
            r#"{"typography":[{"role":"body-md","fontFamily":"Inter","fontSize":16,"fontWeight":400}]}"#,
        )
        .unwrap();
        let token = &set.typography[0];
        assert_eq!(token.font_size, "16");
        assert_eq!(token.font_weight, "400");

        let fractional: TypographyToken = serde_json::from_str(
            r#"{"role":"caption","fontFamily":"Inter","fontSize":"12px","fontWeight":500.0}"#,
        )
        .unwrap();
        assert_eq!(fractional.font_weight, "500");
    }

    #[test]
    fn typography_rejects_non_scalar_weight() {
        let parsed = serde_json::from_str::<TypographyToken>(
            r#"{"role":"caption","fontFamily":"Inter","fontSize":"12px","fontWeight":[400]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn token_set_fields_default_to_empty() {
        let set: TokenSet = serde_json::from_str("{}").unwrap();
        assert!(set.colors.is_empty());
        assert!(set.typography.is_empty());
    }
}
