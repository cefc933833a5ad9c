//! Rewrites remote photo-host links inside anchor/image blocks to local gallery paths.
//!
//! Pages were authored by hand over several years and disagree on markup details, so two
//! patterns are tried in sequence. The primary pattern covers the common shape: `href`
//! anywhere in the anchor and an image labelled `alt="IMG_<digits>"`. The fallback pattern
//! accepts any wrapped image, also reads labels written as `alt='IMG_<digits>'` or with
//! spaces around `=`, and only runs when the primary pass left the document untouched.

mod fallback;
mod primary;

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use log::debug;
use regex::{Captures, Regex};

use crate::asset_paths::{Identifier, LabelPattern, PageMode, full_size_link, thumbnail_link};

/// Which pattern produced the changes in a [`RewriteResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePass {
    /// Images labelled with a whole `alt="IMG_<digits>"` attribute.
    Primary,
    /// Any wrapped image, with looser label matching.
    Fallback,
}

/// Outcome of rewriting one document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// Document text after rewriting.
    pub text: String,
    /// Identifiers whose blocks were changed.
    pub identifiers: BTreeSet<Identifier>,
    /// Number of blocks whose text changed.
    pub replacements: usize,
    /// Pass that produced the changes, `None` when the document is unchanged.
    pub pass: Option<RewritePass>,
    /// Whether the fallback pattern was tried.
    pub fallback_attempted: bool,
}

impl RewriteResult {
    /// True when the rewritten text differs from the input.
    pub fn changed(&self) -> bool {
        self.pass.is_some()
    }
}

/// Compiled patterns for rewriting gallery pages.
#[derive(Debug, Clone)]
pub struct DocumentRewriter {
    primary: Regex,
    fallback: Regex,
    src_attribute: Regex,
    label: &'static LabelPattern,
}

/// Per-call bookkeeping shared by both passes.
#[derive(Debug, Default)]
struct PassState {
    identifiers: BTreeSet<Identifier>,
    replacements: usize,
}

impl PassState {
    fn record(&mut self, id: Identifier) {
        debug!("rewrote block for {}", LabelPattern::label_for(&id));
        self.identifiers.insert(id);
        self.replacements += 1;
    }

    fn finish(self, text: String, pass: RewritePass, fallback_attempted: bool) -> RewriteResult {
        RewriteResult {
            text,
            identifiers: self.identifiers,
            replacements: self.replacements,
            pass: Some(pass),
            fallback_attempted,
        }
    }
}

impl DocumentRewriter {
    /// Compile the block patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            primary: Regex::new(&primary::pattern()).context("invalid primary block regex")?,
            fallback: Regex::new(fallback::PATTERN).context("invalid fallback block regex")?,
            src_attribute: Regex::new(r#"(?P<lead>^|\s)src="[^"]*""#)
                .context("invalid src attribute regex")?,
            label: LabelPattern::shared(),
        })
    }

    /// Rewrite every recognised block in `text` for a page in the given mode.
    ///
    /// Blocks whose image carries no `IMG_<digits>` label are copied through unchanged. A block
    /// only counts as a replacement when its text actually changes, so a document that was
    /// already rewritten reports zero replacements.
    pub fn rewrite_document(&self, text: &str, mode: PageMode) -> RewriteResult {
        let mut state = PassState::default();

        let primary = self.run_pass(&self.primary, text, &mut state, |this, caps, state| {
            primary::rewrite_block(this, caps, mode, state)
        });
        if primary != text {
            return state.finish(primary, RewritePass::Primary, false);
        }

        let fallback = self.run_pass(&self.fallback, text, &mut state, |this, caps, state| {
            fallback::rewrite_block(this, caps, mode, state)
        });
        if fallback != text {
            return state.finish(fallback, RewritePass::Fallback, true);
        }

        RewriteResult {
            text: text.to_string(),
            identifiers: state.identifiers,
            replacements: state.replacements,
            pass: None,
            fallback_attempted: true,
        }
    }

    fn run_pass<F>(
        &self,
        pattern: &Regex,
        text: &str,
        state: &mut PassState,
        mut rewrite: F,
    ) -> String
    where
        F: FnMut(&Self, &Captures<'_>, &mut PassState) -> String,
    {
        pattern
            .replace_all(text, |caps: &Captures<'_>| rewrite(self, caps, state))
            .into_owned()
    }

    fn replace_src(&self, image_attrs: &str, new_src: &str) -> String {
        self.src_attribute
            .replace_all(image_attrs, |caps: &Captures<'_>| {
                format!("{}src=\"{}\"", &caps["lead"], new_src)
            })
            .into_owned()
    }

    /// New `href` value and rewritten `<img>` attribute text for an image.
    fn targets(&self, image_attrs: &str, mode: PageMode, id: &Identifier) -> (String, String) {
        let href = full_size_link(mode, id);
        let image = self.replace_src(image_attrs, &thumbnail_link(mode, id));
        (href, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> DocumentRewriter {
        DocumentRewriter::new().unwrap()
    }

    fn id(value: &str) -> Identifier {
        Identifier::parse(value).unwrap()
    }

    #[test]
    fn rewrites_nested_page_block() {
        let input = r#"<a href="https://flickr.com/x"><img src="https://flickr.com/y" alt="IMG_2055"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Nested);

        assert_eq!(
            result.text,
            r#"<a href="../pics/full/img_2055_1600.jpg"><img src="../pics/thumbs/img_2055_320.jpg" alt="IMG_2055"></a>"#
        );
        assert_eq!(result.replacements, 1);
        assert_eq!(result.identifiers, BTreeSet::from([id("2055")]));
        assert_eq!(result.pass, Some(RewritePass::Primary));
        assert!(!result.fallback_attempted);
    }

    #[test]
    fn rewrites_root_page_block() {
        let input = r#"<a href="https://flickr.com/x"><img src="https://flickr.com/y" alt="IMG_1288"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(
            result.text,
            r#"<a href="pics/full/img_1288_1600.jpg"><img src="pics/thumbs/img_1288_320.jpg" alt="IMG_1288"></a>"#
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let rewriter = rewriter();
        let input = r#"<p>
  <a href="https://flickr.com/photos/1" title="Ride"><img src="https://live.staticflickr.com/1.jpg" alt="IMG_1300" width="320"></a>
  <a class="pic" href="https://flickr.com/photos/2"><img alt="IMG_1301" src="https://live.staticflickr.com/2.jpg"></a>
</p>"#;

        let first = rewriter.rewrite_document(input, PageMode::Root);
        assert_eq!(first.replacements, 2);
        assert!(first.text.contains(r#"href="pics/full/img_1300_1600.jpg""#));
        assert!(first.text.contains(r#"<a class="pic" href="pics/full/img_1301_1600.jpg">"#));

        let second = rewriter.rewrite_document(&first.text, PageMode::Root);
        assert!(!second.changed());
        assert_eq!(second.replacements, 0);
        assert!(second.identifiers.is_empty());
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn already_rewritten_document_reports_nothing() {
        let input = r#"<a href="../pics/full/img_2055_1600.jpg"><img src="../pics/thumbs/img_2055_320.jpg" alt="IMG_2055"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Nested);

        assert_eq!(result.text, input);
        assert_eq!(result.replacements, 0);
        assert!(result.identifiers.is_empty());
        assert!(result.fallback_attempted);
        assert_eq!(result.pass, None);
    }

    #[test]
    fn leaves_unlabelled_blocks_byte_for_byte() {
        let input = "<a  href=\"https://example.com/about\" >\n  <img src=\"logo.png\" alt=\"Logo\" />\n</a>\n\
<a class=\"x\" href=\"https://flickr.com/z\"><img src=\"https://flickr.com/z.jpg\" alt=\"DSC_0001\"></a>";
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(result.text, input);
        assert_eq!(result.replacements, 0);
        assert!(result.fallback_attempted);
    }

    #[test]
    fn unlabelled_block_is_untouched_beside_a_rewritten_one() {
        let input = r#"<a href="https://example.com"><img src="logo.png" alt="Logo"></a>
<a href="https://flickr.com/x"><img src="https://flickr.com/y" alt="IMG_1290"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert!(result.text.starts_with(r#"<a href="https://example.com"><img src="logo.png" alt="Logo"></a>"#));
        assert_eq!(result.replacements, 1);
    }

    #[test]
    fn primary_handles_href_after_other_attributes() {
        let input = r#"<a class="thumb" data-index="4" href="https://flickr.com/x" target="_blank"><img src="https://flickr.com/y" alt="IMG_1446"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Nested);

        assert_eq!(
            result.text,
            r#"<a class="thumb" data-index="4" href="../pics/full/img_1446_1600.jpg" target="_blank"><img src="../pics/thumbs/img_1446_320.jpg" alt="IMG_1446"></a>"#
        );
        assert_eq!(result.pass, Some(RewritePass::Primary));
        assert!(!result.fallback_attempted);
        assert_eq!(result.replacements, 1);
    }

    #[test]
    fn fallback_reads_single_quoted_labels() {
        let input = r#"<a class="thumb" href="https://flickr.com/x"><img src="https://flickr.com/y" alt='IMG_1446'></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Nested);

        assert_eq!(
            result.text,
            r#"<a class="thumb" href="../pics/full/img_1446_1600.jpg"><img src="../pics/thumbs/img_1446_320.jpg" alt='IMG_1446'></a>"#
        );
        assert_eq!(result.pass, Some(RewritePass::Fallback));
        assert!(result.fallback_attempted);
        assert_eq!(result.replacements, 1);

        let again = rewriter().rewrite_document(&result.text, PageMode::Nested);
        assert_eq!(again.replacements, 0);
        assert_eq!(again.text, result.text);
    }

    #[test]
    fn fallback_is_skipped_once_primary_changes_something() {
        let input = r#"<a href="https://flickr.com/a"><img src="https://flickr.com/a.jpg" alt="IMG_1500"></a>
<a class="late" href="https://flickr.com/b"><img src="https://flickr.com/b.jpg" alt = 'IMG_1501'></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(result.pass, Some(RewritePass::Primary));
        assert!(!result.fallback_attempted);
        assert_eq!(result.replacements, 1);
        assert_eq!(result.identifiers, BTreeSet::from([id("1500")]));
        assert!(result.text.ends_with(
            r#"<a class="late" href="https://flickr.com/b"><img src="https://flickr.com/b.jpg" alt = 'IMG_1501'></a>"#
        ));
    }

    #[test]
    fn preserves_whitespace_and_other_attributes() {
        let input = "<a\n   href=\"https://flickr.com/x\" title=\"Jump\">\n    <img\n      class=\"pic\" src=\"https://flickr.com/y\" data-src=\"keep\" alt=\"IMG_1700\" />\n  </a>";
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(
            result.text,
            "<a\n   href=\"pics/full/img_1700_1600.jpg\" title=\"Jump\">\n    <img\n      class=\"pic\" src=\"pics/thumbs/img_1700_320.jpg\" data-src=\"keep\" alt=\"IMG_1700\" />\n  </a>"
        );
    }

    #[test]
    fn counts_each_changed_block_once() {
        let input = r#"<a href="u1"><img src="s1" alt="IMG_1"></a><a href="u2"><img src="s2" alt="IMG_2"></a><a href="u3"><img src="s3" alt="IMG_1"></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(result.replacements, 3);
        assert_eq!(result.identifiers, BTreeSet::from([id("1"), id("2")]));
    }

    #[test]
    fn fallback_leaves_repeat_of_rewritten_identifier_alone() {
        let input = r#"<a class="c" href="https://flickr.com/5"><img src="https://flickr.com/5.jpg" alt='IMG_5'></a>
<a class="c" href="pics/full/img_5_1600.jpg"><img src="custom.jpg" alt='IMG_5'></a>"#;
        let result = rewriter().rewrite_document(input, PageMode::Root);

        assert_eq!(result.pass, Some(RewritePass::Fallback));
        assert_eq!(result.replacements, 1);
        assert!(result.text.ends_with(r#"<img src="custom.jpg" alt='IMG_5'></a>"#));
    }
}
