use serde::Deserialize;

use super::Identifier;

/// Where a page sits relative to the `pics/` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// Page at the site root, next to `pics/`.
    Root,
    /// Page inside `pics/`, one level below the root.
    Nested,
}

impl PageMode {
    /// Relative prefix that reaches the `pics/` directory from a page in this mode.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Root => "pics/",
            Self::Nested => "../pics/",
        }
    }
}

/// File name of the 320px thumbnail for an identifier.
pub fn thumbnail_file_name(id: &Identifier) -> String {
    format!("img_{id}_320.jpg")
}

/// File name of the 1600px full-size image for an identifier.
pub fn full_size_file_name(id: &Identifier) -> String {
    format!("img_{id}_1600.jpg")
}

/// Page-relative path used for an image's `src` attribute.
pub fn thumbnail_link(mode: PageMode, id: &Identifier) -> String {
    format!("{}thumbs/{}", mode.prefix(), thumbnail_file_name(id))
}

/// Page-relative path used for the wrapping link's `href` attribute.
pub fn full_size_link(mode: PageMode, id: &Identifier) -> String {
    format!("{}full/{}", mode.prefix(), full_size_file_name(id))
}
