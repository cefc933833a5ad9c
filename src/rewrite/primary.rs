//! Pattern for anchors wrapping an image labelled with a whole `alt="IMG_<digits>"` attribute.

use regex::Captures;

use super::{DocumentRewriter, PassState};
use crate::asset_paths::{LabelPattern, PageMode};

pub(super) fn pattern() -> String {
    format!(
        concat!(
            r#"<a(?P<lead>\s+)(?P<before>(?:[^>]*\s)?)href="[^"]*"(?P<after>[^>]*)>"#,
            r#"(?P<gap>\s*)<img(?P<img_lead>\s+)(?P<img>(?:[^>]*\s)?{label}[^>]*)>"#,
            r#"(?P<tail>\s*)</a>"#,
        ),
        label = LabelPattern::fragment()
    )
}

pub(super) fn rewrite_block(
    rewriter: &DocumentRewriter,
    caps: &Captures<'_>,
    mode: PageMode,
    state: &mut PassState,
) -> String {
    let original = &caps[0];
    let Some(id) = rewriter.label.extract(&caps["img"]) else {
        return original.to_string();
    };

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
