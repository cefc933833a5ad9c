//! Permissive pattern accepting any wrapped image, with looser label matching.

use regex::Captures;

use super::{DocumentRewriter, PassState};
use crate::asset_paths::PageMode;

pub(super) const PATTERN: &str = concat!(
    r#"<a(?P<lead>\s+)(?P<before>(?:[^>]*\s)?)href="[^"]*"(?P<after>[^>]*)>"#,
    r#"(?P<gap>\s*)<img(?P<img_lead>\s+)(?P<img>[^>]*)>(?P<tail>\s*)</a>"#,
);

pub(super) fn rewrite_block(
    rewriter: &DocumentRewriter,
    caps: &Captures<'_>,
    mode: PageMode,
    state: &mut PassState,
) -> String {
    let original = &caps[0];
    let Some(id) = rewriter.label.extract_loose(&caps["img"]) else {
        return original.to_string();
    };

    // Same identifier already rewritten earlier in this document.
    if state.identifiers.contains(&id) && original.contains(&format!("img_{id}_")) {
        return original.to_string();
    }

    let (href, image) = rewriter.targets(&caps["img"], mode, &id);
    let rebuilt = format!(
        "<a{lead}{before}href=\"{href}\"{after}>{gap}<img{img_lead}{image}>{tail}</a>",
        lead = &caps["lead"],
        before = &caps["before"],
        after = &caps["after"],
        gap = &caps["gap"],
        img_lead = &caps["img_lead"],
        tail = &caps["tail"],
    );

    if rebuilt != original {
        state.record(id);
    }
    rebuilt
}
