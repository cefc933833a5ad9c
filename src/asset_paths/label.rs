use std::sync::OnceLock;

use regex::Regex;

use super::Identifier;

/// Fixed text that precedes the digits in an image's descriptive label.
pub const LABEL_PREFIX: &str = "IMG_";

/// Matcher for the `alt="IMG_<digits>"` attribute that carries an image identifier.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    attribute: Regex,
    loose_attribute: Regex,
}

impl LabelPattern {
    /// Shared matcher for the fixed [`LABEL_PREFIX`].
    pub fn shared() -> &'static Self {
        static PATTERN: OnceLock<LabelPattern> = OnceLock::new();
        PATTERN.get_or_init(|| Self {
            attribute: Regex::new(&format!(
                r#"(?:^|\s)alt="{}(\d+)""#,
                regex::escape(LABEL_PREFIX)
            ))
            .expect("invalid label regex"),
            loose_attribute: Regex::new(&format!(
                r#"(?:^|\s)alt\s*=\s*(?:"{prefix}(\d+)"|'{prefix}(\d+)')"#,
                prefix = regex::escape(LABEL_PREFIX)
            ))
            .expect("invalid loose label regex"),
        })
    }

    /// Regex fragment matching the label attribute, for embedding into block patterns.
    pub fn fragment() -> String {
        format!(r#"alt="{}\d+""#, regex::escape(LABEL_PREFIX))
    }

    /// Pull the identifier out of an `<img>` tag's attribute text.
    ///
    /// Returns `None` when no whole `alt` attribute of the expected shape is present.
    pub fn extract(&self, image_attrs: &str) -> Option<Identifier> {
        let caps = self.attribute.captures(image_attrs)?;
        Identifier::parse(caps.get(1)?.as_str()).ok()
    }

    /// Like [`LabelPattern::extract`], but also accepts single quotes and spaces around `=`.
    pub fn extract_loose(&self, image_attrs: &str) -> Option<Identifier> {
        let caps = self.loose_attribute.captures(image_attrs)?;
        let digits = caps.get(1).or_else(|| caps.get(2))?;
        Identifier::parse(digits.as_str()).ok()
    }

    /// Label text for an identifier, e.g. `IMG_2055`.
    pub fn label_for(id: &Identifier) -> String {
        format!("{LABEL_PREFIX}{id}")
    }
}
