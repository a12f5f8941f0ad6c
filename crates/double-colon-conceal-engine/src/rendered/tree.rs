use html_escape::{encode_double_quoted_attribute, encode_text};

/// Element tags the renderer produces and the rewriter distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Div,
    P,
    Li,
    Ul,
    Ol,
    Heading(u8),
    Blockquote,
    Pre,
    Code,
    Strong,
    Em,
    Mark,
    Del,
    A,
    Span,
    Br,
    Hr,
    Other(String),
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Tag::Div => "div",
            Tag::P => "p",
            Tag::Li => "li",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Heading(1) => "h1",
            Tag::Heading(2) => "h2",
            Tag::Heading(3) => "h3",
            Tag::Heading(4) => "h4",
            Tag::Heading(5) => "h5",
            Tag::Heading(_) => "h6",
            Tag::Blockquote => "blockquote",
            Tag::Pre => "pre",
            Tag::Code => "code",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::Mark => "mark",
            Tag::Del => "del",
            Tag::A => "a",
            Tag::Span => "span",
            Tag::Br => "br",
            Tag::Hr => "hr",
            Tag::Other(name) => name,
        }
    }

    /// Blocks whose direct children may start with a field.
    pub fn is_field_block(&self) -> bool {
        matches!(self, Tag::P | Tag::Li | Tag::Heading(_))
    }

    /// Inline styling that may wrap a field name.
    pub fn is_styling(&self) -> bool {
        matches!(self, Tag::Strong | Tag::Em | Tag::Mark | Tag::Del)
    }

    fn is_void(&self) -> bool {
        matches!(self, Tag::Br | Tag::Hr)
    }

    fn is_block(&self) -> bool {
        matches!(
            self,
            Tag::Div
                | Tag::P
                | Tag::Li
                | Tag::Ul
                | Tag::Ol
                | Tag::Heading(_)
                | Tag::Blockquote
                | Tag::Pre
                | Tag::Hr
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<String>,
    pub children: Vec<RenderedNode>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            class: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RenderedNode>) -> Self {
        self.children = children;
        self
    }

    pub fn class(&self) -> &str {
        self.class.as_deref().unwrap_or_default()
    }

    /// Concatenated text of all descendants; line breaks count as `\n`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_text(&self.children, &mut out);
        out
    }
}

fn push_text(nodes: &[RenderedNode], out: &mut String) {
    for node in nodes {
        match node {
            RenderedNode::Text(text) => out.push_str(text),
            RenderedNode::Element(el) if el.tag == Tag::Br => out.push('\n'),
            RenderedNode::Element(el) => push_text(&el.children, out),
        }
    }
}

/// One node of rendered output: a text run or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    Text(String),
    Element(Element),
}

impl RenderedNode {
    pub fn text(text: impl Into<String>) -> Self {
        RenderedNode::Text(text.into())
    }

    pub fn element(tag: Tag, children: Vec<RenderedNode>) -> Self {
        RenderedNode::Element(Element::new(tag).with_children(children))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            RenderedNode::Element(el) => Some(el),
            RenderedNode::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_text(std::slice::from_ref(self), &mut out);
        out
    }

    /// Calls `f` on every element in the subtree, parents before children.
    pub fn for_each_element_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        if let RenderedNode::Element(el) = self {
            f(el);
            for child in &mut el.children {
                child.for_each_element_mut(f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }

    /// Flattens the tree into display lines: blocks and line breaks start
    /// new lines, list bullets render as `• `.
    pub fn to_plain_lines(&self) -> Vec<String> {
        let mut lines = vec![String::new()];
        write_plain(self, &mut lines);
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }
}

fn write_html(node: &RenderedNode, out: &mut String) {
    match node {
        RenderedNode::Text(text) => out.push_str(&encode_text(text)),
        RenderedNode::Element(el) => {
            out.push('<');
            out.push_str(el.tag.name());
            if let Some(class) = &el.class {
                out.push_str(" class=\"");
                out.push_str(&encode_double_quoted_attribute(class));
                out.push('"');
            }
            out.push('>');
            if el.tag.is_void() {
                return;
            }
            for child in &el.children {
                write_html(child, out);
            }
            out.push_str("</");
            out.push_str(el.tag.name());
            out.push('>');
        }
    }
}

fn new_line(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
}

fn write_plain(node: &RenderedNode, lines: &mut Vec<String>) {
    match node {
        RenderedNode::Text(text) => {
            let mut parts = text.split('\n');
            if let Some(first) = parts.next()
                && let Some(last) = lines.last_mut()
            {
                last.push_str(first);
            }
            for part in parts {
                lines.push(part.to_string());
            }
        }
        RenderedNode::Element(el) => match el.tag {
            Tag::Br => lines.push(String::new()),
            Tag::Hr => {
                new_line(lines);
                lines.push("───".to_string());
                lines.push(String::new());
            }
            _ if el.class().starts_with("list-bullet") => {
                if let Some(last) = lines.last_mut() {
                    last.push_str("• ");
                }
            }
            ref tag => {
                let block = tag.is_block();
                if block {
                    new_line(lines);
                }
                for child in &el.children {
                    write_plain(child, lines);
                }
                if block {
                    new_line(lines);
                }
            }
        },
    }
}
