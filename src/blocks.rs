//! Protected-block extraction and restore.
//!
//! Editor blocks and page-builder containers are replaced by opaque
//! placeholders before the destructive passes run, then re-spliced verbatim
//! afterwards so nested builder markup can never be corrupted. Two kinds of
//! region are recognized: comment-delimited editor blocks with matching
//! open/close names, and `<div>` containers carrying a known builder class
//! or class prefix (depth-scanned, since no parser API exposes "the whole
//! container including its raw markup" reliably for malformed fragments).
//!
//! The depth scan assumes well-formed, non-overlapping `<div>` nesting; a
//! container with no balanced close is left unextracted rather than
//! guessed at.

use std::sync::LazyLock;

use regex::Regex;

/// Reserved placeholder prefix. The format is improbable enough not to
/// collide with document text, and extraction refuses to wrap any candidate
/// whose body already contains it, so a placeholder can never be nested
/// inside another extracted block.
pub const PLACEHOLDER_PREFIX: &str = "[[TRACE_CLEANER_PROTECTED_BLOCK_";

const PLACEHOLDER_SUFFIX: &str = "]]";

/// Cap on repeated comment-block passes, guarding against pathological
/// nested/malformed markup looping forever. Partial extraction is fine.
const MAX_COMMENT_BLOCK_PASSES: usize = 10;

/// Builder class markers scanned in order after comment-delimited blocks.
/// A marker matches as a substring of the `class` attribute, so plain class
/// names and prefixes (`brxe-`, `oxy-`, `fusion-`) go through the same scan.
pub const PROTECTED_CLASS_MARKERS: &[&str] = &[
    "wp-block-rank-math-faq-block",
    "rank-math-block",
    "elementor-element",
    "elementor-widget",
    "et_pb_section",
    "et_pb_row",
    "brxe-",
    "vc_row",
    "fl-row",
    "oxy-",
    "fusion-",
];

#[allow(clippy::expect_used)]
static EDITOR_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*(wp:\S+(?:\s+[^>]+)?)\s-->(.*?)<!--\s*(/wp:\S+)\s-->")
        .expect("EDITOR_BLOCK regex")
});

#[allow(clippy::expect_used)]
static OPEN_BLOCK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wp:(\S+)").expect("OPEN_BLOCK_NAME regex"));

#[allow(clippy::expect_used)]
static CLOSE_BLOCK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/wp:(\S+)").expect("CLOSE_BLOCK_NAME regex"));

/// One extracted region: the placeholder now sitting in the residual HTML
/// and the original markup to splice back, byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBlock {
    pub placeholder: String,
    pub markup: String,
}

/// Residual HTML plus the ordered list of extracted blocks.
#[derive(Debug, Clone, Default)]
pub struct ExtractedBlocks {
    pub html: String,
    pub blocks: Vec<ProtectedBlock>,
}

fn next_placeholder(counter: &mut usize) -> String {
    let placeholder = format!("{PLACEHOLDER_PREFIX}{counter}{PLACEHOLDER_SUFFIX}");
    *counter += 1;
    placeholder
}

/// Extracts every protected region from `html`, replacing each with a
/// placeholder unique within this invocation.
#[must_use]
pub fn extract(html: &str) -> ExtractedBlocks {
    let mut blocks = Vec::new();
    let mut counter = 0usize;
    let mut html = html.to_string();

    // Comment-delimited editor blocks. Repeated passes pick up blocks that
    // only become self-contained once their inner blocks are placeholders.
    for _ in 0..MAX_COMMENT_BLOCK_PASSES {
        let mut found = false;
        let replaced = EDITOR_BLOCK
            .replace_all(&html, |caps: &regex::Captures| {
                let opening = caps[1].trim();
                let closing = caps[3].trim();
                let content = &caps[2];

                let open_name = OPEN_BLOCK_NAME
                    .captures(opening)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str());
                let close_name = CLOSE_BLOCK_NAME
                    .captures(closing)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str());

                match (open_name, close_name) {
                    (Some(open), Some(close))
                        if open == close && !content.contains(PLACEHOLDER_PREFIX) =>
                    {
                        let placeholder = next_placeholder(&mut counter);
                        blocks.push(ProtectedBlock {
                            placeholder: placeholder.clone(),
                            markup: caps[0].to_string(),
                        });
                        found = true;
                        placeholder
                    }
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();
        html = replaced;
        if !found {
            break;
        }
    }

    for marker in PROTECTED_CLASS_MARKERS {
        extract_by_class(&mut html, marker, &mut blocks, &mut counter);
    }

    ExtractedBlocks { html, blocks }
}

/// Extracts `<div>` containers whose class attribute contains `marker`.
fn extract_by_class(
    html: &mut String,
    marker: &str,
    blocks: &mut Vec<ProtectedBlock>,
    counter: &mut usize,
) {
    let Ok(open_div) = Regex::new(&format!(
        r#"(?i)<div[^>]*class="[^"]*{}[^"]*"[^>]*>"#,
        regex::escape(marker)
    )) else {
        return;
    };

    let mut offset = 0;
    while let Some(m) = open_div.find_at(html, offset) {
        let match_pos = m.start();

        // Skip matches sitting inside an unterminated placeholder region;
        // that text is already protected and must not be re-matched.
        if let Some(last) = html[..match_pos].rfind(PLACEHOLDER_PREFIX) {
            if let Some(end) = html[last..].find(PLACEHOLDER_SUFFIX) {
                if last + end > match_pos {
                    offset = m.end();
                    continue;
                }
            }
        }

        match complete_div_block(html, match_pos) {
            Some(block) if !block.contains(PLACEHOLDER_PREFIX) => {
                let placeholder = next_placeholder(counter);
                html.replace_range(match_pos..match_pos + block.len(), &placeholder);
                offset = match_pos + placeholder.len();
                blocks.push(ProtectedBlock {
                    placeholder,
                    markup: block,
                });
            }
            _ => {
                offset = m.end();
            }
        }
    }
}

/// Returns the full `<div>...</div>` block starting at `start`, tracking
/// nesting depth by scanning forward for the next open or close token.
/// A self-closing opening tag is a zero-depth, single-tag block.
/// Returns `None` when no balanced close exists (fail soft).
fn complete_div_block(html: &str, start: usize) -> Option<String> {
    let open_tag_end = html[start..].find('>')? + start;
    let open_tag = &html[start..=open_tag_end];

    // "<div ... />" and "<div ... / >" are single-tag blocks.
    let before_bracket = open_tag[..open_tag.len() - 1].trim_end();
    if before_bracket.ends_with('/') {
        return Some(open_tag.to_string());
    }

    let mut depth = 1usize;
    let mut pos = open_tag_end + 1;

    while depth > 0 && pos < html.len() {
        let next_open = html[pos..].find("<div").map(|i| i + pos);
        let next_close = html[pos..].find("</div>").map(|i| i + pos);

        match (next_open, next_close) {
            (None, None) => return None,
            (Some(open), close) if close.is_none_or(|c| open < c) => {
                depth += 1;
                pos = html[open..].find('>')? + open + 1;
            }
            (_, Some(close)) => {
                depth -= 1;
                pos = close + "</div>".len();
                if depth == 0 {
                    return Some(html[start..pos].to_string());
                }
            }
            (Some(_), None) => return None,
        }
    }

    None
}

/// Splices original block markup back into its placeholders, walking in
/// reverse insertion order so nested replacements cannot invalidate earlier
/// ones. Both the raw and the entity-escaped form of each placeholder are
/// replaced, since some rendering layers re-encode the brackets.
#[must_use]
pub fn restore(html: &str, blocks: &[ProtectedBlock]) -> String {
    let mut html = html.to_string();
    for block in blocks.iter().rev() {
        let escaped = html_escape::encode_quoted_attribute(&block.placeholder).to_string();
        if escaped != block.placeholder {
            html = html.replace(&escaped, &block.markup);
        }
        html = html.replace(&block.placeholder, &block.markup);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_comment_delimited_editor_block() {
        let html = "before <!-- wp:paragraph --><p data-llm=\"1\">x</p><!-- /wp:paragraph --> after";
        let extracted = extract(html);
        assert_eq!(extracted.blocks.len(), 1);
        assert!(extracted.html.contains(PLACEHOLDER_PREFIX));
        assert!(!extracted.html.contains("data-llm"));
        assert!(extracted.blocks[0].markup.starts_with("<!-- wp:paragraph -->"));
    }

    #[test]
    fn mismatched_block_names_are_not_extracted() {
        let html = "<!-- wp:paragraph --><p>x</p><!-- /wp:heading -->";
        let extracted = extract(html);
        assert!(extracted.blocks.is_empty());
        assert_eq!(extracted.html, html);
    }

    #[test]
    fn extracts_nested_builder_divs_with_depth_tracking() {
        let html = r#"<div class="elementor-element"><div class="inner"><p>x</p></div></div><p>tail</p>"#;
        let extracted = extract(html);
        assert_eq!(extracted.blocks.len(), 1);
        assert_eq!(
            extracted.blocks[0].markup,
            r#"<div class="elementor-element"><div class="inner"><p>x</p></div></div>"#
        );
        assert!(extracted.html.contains("<p>tail</p>"));
    }

    #[test]
    fn self_closing_div_is_single_tag_block() {
        let html = r#"<div class="brxe-container" />rest"#;
        let extracted = extract(html);
        assert_eq!(extracted.blocks.len(), 1);
        assert_eq!(extracted.blocks[0].markup, r#"<div class="brxe-container" />"#);
    }

    #[test]
    fn unclosed_div_fails_soft() {
        let html = r#"<div class="vc_row"><p>never closed"#;
        let extracted = extract(html);
        assert!(extracted.blocks.is_empty());
        assert_eq!(extracted.html, html);
    }

    #[test]
    fn placeholder_bearing_content_is_not_double_wrapped() {
        let inner = format!("{PLACEHOLDER_PREFIX}0{PLACEHOLDER_SUFFIX}");
        let html = format!(r#"<div class="et_pb_section">{inner}</div>"#);
        let extracted = extract(&html);
        assert!(extracted.blocks.is_empty());
    }

    #[test]
    fn restore_is_reverse_order_and_byte_identical() {
        let html = concat!(
            r#"<div class="et_pb_section"><div class="et_pb_row"><p>a</p></div></div>"#,
            "<!-- wp:list --><ul><li>b</li></ul><!-- /wp:list -->",
        );
        let extracted = extract(html);
        assert_eq!(extracted.blocks.len(), 2);
        let restored = restore(&extracted.html, &extracted.blocks);
        assert_eq!(restored, html);
    }

    #[test]
    fn restore_handles_entity_escaped_placeholders() {
        let blocks = vec![ProtectedBlock {
            placeholder: format!("{PLACEHOLDER_PREFIX}0{PLACEHOLDER_SUFFIX}"),
            markup: "<div>block</div>".to_string(),
        }];
        // Brackets survive entity encoding unchanged, so the escaped form
        // equals the raw form; both paths must restore.
        let html = format!("x {PLACEHOLDER_PREFIX}0{PLACEHOLDER_SUFFIX} y");
        assert_eq!(restore(&html, &blocks), "x <div>block</div> y");
    }

    #[test]
    fn sibling_editor_blocks_extracted_in_one_pass() {
        let html = "<!-- wp:quote -->x<!-- /wp:quote --><p>mid</p><!-- wp:list -->y<!-- /wp:list -->";
        let extracted = extract(html);
        assert_eq!(extracted.blocks.len(), 2);
        assert_eq!(restore(&extracted.html, &extracted.blocks), html);
    }

    #[test]
    fn nested_mismatching_pair_is_left_untouched() {
        // The outer opener pairs up with the inner closer first; the names
        // differ, so the region is skipped rather than corrupted.
        let html = concat!(
            "<!-- wp:group -->",
            "<!-- wp:paragraph --><p>inner</p><!-- /wp:paragraph -->",
            "<!-- /wp:group -->",
        );
        let extracted = extract(html);
        assert!(extracted.blocks.is_empty());
        assert_eq!(extracted.html, html);
    }
}
