use log::trace;

use crate::field::{SEPARATOR, conceal_double_colon, includes_field, is_valid_field_name};

use super::tree::{Element, RenderedNode, Tag};

/// How a direct child of a block takes part in field detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    /// Starts a new visual line.
    LineBreak,
    /// Bullet or collapse marker; invisible for positioning.
    ListMarker,
    /// Inline styling wrapping exactly one text run.
    StyledLabel,
    Text,
    Other,
}

impl NodeKind {
    fn of(node: &RenderedNode) -> Self {
        let RenderedNode::Element(el) = node else {
            return NodeKind::Text;
        };
        match &el.tag {
            Tag::Br => NodeKind::LineBreak,
            Tag::Div
                if el.class().starts_with("list-") || el.class().contains("collapse-indicator") =>
            {
                NodeKind::ListMarker
            }
            tag if tag.is_styling() && matches!(el.children.as_slice(), [RenderedNode::Text(_)]) => {
                NodeKind::StyledLabel
            }
            _ => NodeKind::Other,
        }
    }
}

fn styled_text_mut(node: &mut RenderedNode) -> Option<&mut String> {
    match node {
        RenderedNode::Element(el) => match el.children.as_mut_slice() {
            [RenderedNode::Text(text)] => Some(text),
            _ => None,
        },
        RenderedNode::Text(_) => None,
    }
}

fn conceal(text: &mut String, replacement: &str) {
    trace!("concealing rendered field {text:?}");
    *text = conceal_double_colon(text, replacement);
}

/// Conceals field separators among the direct children of one block.
///
/// Only the first meaningful child of each visual line is eligible, where
/// visual lines are delimited by `<br>`. Whitespace-only text and list
/// markers don't count. A styled label holding a bare field name (as in
/// `<strong>Priority</strong>:: High`) hands eligibility to the text that
/// follows it, which must then start with `::`.
pub fn conceal_block(block: &mut Element, replacement: &str) {
    if !block.text_content().contains(SEPARATOR) {
        return;
    }

    let mut position = 0usize;
    let mut after_styled_label = false;

    for node in &mut block.children {
        position += 1;
        let kind = NodeKind::of(node);

        if kind == NodeKind::LineBreak {
            position = 0;
            after_styled_label = false;
            continue;
        }
        if position > 1 {
            continue;
        }

        match kind {
            NodeKind::ListMarker => position -= 1,
            NodeKind::StyledLabel => {
                let Some(text) = styled_text_mut(node) else {
                    continue;
                };
                let content = text.trim();
                if content.is_empty() {
                    position -= 1;
                } else if includes_field(content) {
                    conceal(text, replacement);
                } else if is_valid_field_name(content) {
                    after_styled_label = true;
                    position -= 1;
                }
            }
            NodeKind::Text => {
                let RenderedNode::Text(text) = node else {
                    continue;
                };
                let content = text.trim();
                if content.is_empty() {
                    position -= 1;
                } else if after_styled_label {
                    if content.starts_with(SEPARATOR) {
                        conceal(text, replacement);
                    }
                } else if includes_field(content) {
                    conceal(text, replacement);
                }
            }
            NodeKind::LineBreak | NodeKind::Other => {}
        }
    }
}

/// Applies [`conceal_block`] to every paragraph, list item and heading in
/// the tree.
pub fn conceal_rendered(root: &mut RenderedNode, replacement: &str) {
    root.for_each_element_mut(&mut |el| {
        if el.tag.is_field_block() {
            conceal_block(el, replacement);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendered::render_markdown;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> RenderedNode {
        RenderedNode::text(s)
    }

    fn styled(tag: Tag, s: &str) -> RenderedNode {
        RenderedNode::element(tag, vec![text(s)])
    }

    fn br() -> RenderedNode {
        RenderedNode::element(Tag::Br, vec![])
    }

    fn block(children: Vec<RenderedNode>) -> Element {
        Element::new(Tag::P).with_children(children)
    }

    fn concealed(children: Vec<RenderedNode>) -> Vec<RenderedNode> {
        let mut el = block(children);
        conceal_block(&mut el, ":");
        el.children
    }

    #[test]
    fn styled_label_then_separator() {
        assert_eq!(
            concealed(vec![styled(Tag::Strong, "Priority"), text(":: High")]),
            vec![styled(Tag::Strong, "Priority"), text(": High")]
        );
    }

    #[test]
    fn plain_text_field() {
        assert_eq!(concealed(vec![text("Priority:: High")]), vec![text("Priority: High")]);
    }

    #[test]
    fn each_visual_line_is_eligible() {
        assert_eq!(
            concealed(vec![text("a:: b"), br(), text("c:: d")]),
            vec![text("a: b"), br(), text("c: d")]
        );
    }

    #[rstest]
    #[case("[draft]:: note", "[draft]: note")]
    #[case("[draft:: note", "[draft:: note")]
    #[case(":: orphan", ":: orphan")]
    #[case("a:: b:: c", "a: b:: c")]
    fn bracket_and_name_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(concealed(vec![text(input)]), vec![text(expected)]);
    }

    #[test]
    fn list_markers_and_whitespace_are_skipped() {
        let marker = RenderedNode::Element(Element::new(Tag::Div).with_class("list-bullet"));
        let collapse =
            RenderedNode::Element(Element::new(Tag::Div).with_class("tree-item collapse-indicator"));
        assert_eq!(
            concealed(vec![marker.clone(), collapse.clone(), text("  "), text("Key:: v")]),
            vec![marker, collapse, text("  "), text("Key: v")]
        );
    }

    #[test]
    fn whitespace_before_styled_label() {
        assert_eq!(
            concealed(vec![text(" "), styled(Tag::Em, "Key"), text(":: v")]),
            vec![text(" "), styled(Tag::Em, "Key"), text(": v")]
        );
    }

    #[test]
    fn field_inside_styled_label() {
        assert_eq!(
            concealed(vec![styled(Tag::Mark, "Key:: v")]),
            vec![styled(Tag::Mark, "Key: v")]
        );
    }

    #[test]
    fn only_first_child_of_a_line_is_eligible() {
        let children = vec![text("intro "), styled(Tag::Em, "x"), text(" Key:: v")];
        assert_eq!(concealed(children.clone()), children);
    }

    #[test]
    fn styled_label_with_invalid_name_consumes_position() {
        let children = vec![styled(Tag::Strong, "[x"), text(":: v")];
        assert_eq!(concealed(children.clone()), children);
    }

    #[test]
    fn text_after_label_must_start_with_separator() {
        let children = vec![styled(Tag::Strong, "Bold"), text(" text:: v")];
        assert_eq!(concealed(children.clone()), children);
    }

    #[test]
    fn inline_code_first_child_blocks_line() {
        let code = RenderedNode::element(Tag::Code, vec![text("a")]);
        let children = vec![code, text(":: b")];
        assert_eq!(concealed(children.clone()), children);
    }

    #[test]
    fn empty_glyph_removes_separator() {
        let mut el = block(vec![text("Key:: v")]);
        conceal_block(&mut el, "");
        assert_eq!(el.children, vec![text("Key v")]);
    }

    #[test]
    fn rendered_document_end_to_end() {
        let mut root = render_markdown(
            "**Priority**:: High\n\n- Owner:: Sam\n- [draft:: no\n\n## Due:: soon\n\n```\nA:: b\n```",
        );
        conceal_rendered(&mut root, "→");
        assert_eq!(
            root.to_html(),
            concat!(
                "<div><p><strong>Priority</strong>→ High</p>",
                "<ul><li><div class=\"list-bullet\"></div>Owner→ Sam</li>",
                "<li><div class=\"list-bullet\"></div>[draft:: no</li></ul>",
                "<h2>Due→ soon</h2><pre>A:: b\n</pre></div>"
            )
        );
    }

    #[test]
    fn inline_br_tag_resets_the_line() {
        let mut root = render_markdown("a:: b<br>c:: d");
        conceal_rendered(&mut root, "→");
        assert_eq!(root.to_html(), "<div><p>a→ b<br>c→ d</p></div>");
    }

    #[test]
    fn concealing_twice_is_a_no_op() {
        let mut root = render_markdown("a:: b\nc:: d");
        conceal_rendered(&mut root, ":");
        let once = root.clone();
        conceal_rendered(&mut root, ":");
        assert_eq!(root, once);
    }
}
