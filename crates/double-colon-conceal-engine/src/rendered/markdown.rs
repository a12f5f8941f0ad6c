use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag as MdTag};

use super::tree::{Element, RenderedNode, Tag};

/// Class of the marker element placed at the start of every list item.
pub const LIST_BULLET_CLASS: &str = "list-bullet";

/// Renders markdown into a tree rooted at a `div`.
///
/// Line breaks inside a paragraph are kept as `<br>` (no strict line breaks),
/// so every source line of a paragraph is its own visual line. Consecutive
/// text events are merged into one text node, and list items start with a
/// bullet marker element.
pub fn render_markdown(src: &str) -> RenderedNode {
    let parser = Parser::new_ext(src, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS);
    let mut stack: Vec<Element> = vec![Element::new(Tag::Div)];

    for event in parser {
        match event {
            Event::Start(tag) => {
                let mut el = Element::new(tag_for(&tag));
                if matches!(tag, MdTag::Item) {
                    el.children.push(RenderedNode::Element(
                        Element::new(Tag::Div).with_class(LIST_BULLET_CLASS),
                    ));
                }
                if let MdTag::CodeBlock(CodeBlockKind::Fenced(lang)) = &tag
                    && !lang.is_empty()
                {
                    el = el.with_class(format!("language-{lang}"));
                }
                stack.push(el);
            }
            Event::End(_) => {
                if stack.len() > 1
                    && let Some(el) = stack.pop()
                {
                    push_child(&mut stack, RenderedNode::Element(el));
                }
            }
            Event::InlineHtml(html) if is_line_break_tag(&html) => {
                push_child(&mut stack, RenderedNode::element(Tag::Br, vec![]))
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                push_text(&mut stack, &text);
            }
            Event::Code(code) => push_child(
                &mut stack,
                RenderedNode::element(Tag::Code, vec![RenderedNode::text(code.as_ref())]),
            ),
            Event::SoftBreak | Event::HardBreak => {
                push_child(&mut stack, RenderedNode::element(Tag::Br, vec![]))
            }
            Event::Rule => push_child(&mut stack, RenderedNode::element(Tag::Hr, vec![])),
            Event::TaskListMarker(checked) => {
                push_text(&mut stack, if checked { "[x] " } else { "[ ] " })
            }
            _ => {}
        }
    }

    // Unbalanced events can't happen with pulldown-cmark, but fold any
    // leftovers into their parents rather than dropping content.
    while stack.len() > 1 {
        if let Some(el) = stack.pop() {
            push_child(&mut stack, RenderedNode::Element(el));
        }
    }
    match stack.pop() {
        Some(root) => RenderedNode::Element(root),
        None => RenderedNode::element(Tag::Div, vec![]),
    }
}

fn tag_for(tag: &MdTag<'_>) -> Tag {
    match tag {
        MdTag::Paragraph => Tag::P,
        MdTag::Heading { level, .. } => Tag::Heading(heading_level(*level)),
        MdTag::BlockQuote(_) => Tag::Blockquote,
        MdTag::CodeBlock(_) => Tag::Pre,
        MdTag::List(Some(_)) => Tag::Ol,
        MdTag::List(None) => Tag::Ul,
        MdTag::Item => Tag::Li,
        MdTag::Emphasis => Tag::Em,
        MdTag::Strong => Tag::Strong,
        MdTag::Strikethrough => Tag::Del,
        MdTag::Link { .. } => Tag::A,
        _ => Tag::Span,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// `<br>`, `<br/>` or `<br />`, in any case.
fn is_line_break_tag(html: &str) -> bool {
    let Some(inner) = html.strip_prefix('<').and_then(|h| h.strip_suffix('>')) else {
        return false;
    };
    let inner = inner.trim_end_matches('/').trim_end();
    inner.eq_ignore_ascii_case("br")
}

fn push_child(stack: &mut [Element], node: RenderedNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(RenderedNode::Text(prev)) = parent.children.last_mut() {
        prev.push_str(text);
    } else {
        parent.children.push(RenderedNode::text(text));
    }
}
