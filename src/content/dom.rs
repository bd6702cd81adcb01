use crate::widget::contract::MountedVisualization;

/// Elements that never have an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Attribute marking a mount point in serialized output.
pub const MOUNT_ATTR: &str = "data-visualization-mount";
/// Attribute carrying the per-render instance number of a mount point.
pub const INSTANCE_ATTR: &str = "data-instance";
/// Class of the placeholder emitted for unavailable embeds.
pub const PLACEHOLDER_CLASS: &str = "visualization-placeholder";

/// The output of one render pass: ordered, mixed markup and live widgets.
#[derive(Debug, Default, PartialEq)]
pub struct RenderedTree {
    /// Top-level nodes in document order.
    pub nodes: Vec<RenderedNode>,
}

/// One node of a [`RenderedTree`].
#[derive(Debug, PartialEq)]
pub enum RenderedNode {
    /// Pass-through element.
    Element(ElementNode),
    /// Pass-through text (already entity-decoded).
    Text(String),
    /// Pass-through comment.
    Comment(String),
    /// A live widget standing where its marker was.
    Visualization(MountedVisualization),
    /// Visible stand-in for an embed that could not be mounted.
    Placeholder(Placeholder),
}

/// A pass-through element.
///
/// Trees can be arbitrarily deep, so comparison and drop walk them with an explicit stack.
#[derive(Debug)]
pub struct ElementNode {
    /// Lower-case tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<RenderedNode>,
}

/// Stand-in for an unknown, untyped or faulted embed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// The key the marker asked for, if it had one.
    pub type_key: Option<String>,
    /// Text shown to the reader.
    pub text: String,
}

/// Borrowed, flattened view of one top-level node (see [`RenderedTree::outline`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineEntry<'a> {
    /// Element by tag name.
    Element(&'a str),
    /// Text node.
    Text(&'a str),
    /// Comment node.
    Comment,
    /// Mounted widget by key.
    Visualization(&'a str),
    /// Placeholder by requested key.
    Placeholder(Option<&'a str>),
}

impl ElementNode {
    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl PartialEq for ElementNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.name != b.name || a.attrs != b.attrs || a.children.len() != b.children.len() {
                return false;
            }
            for pair in a.children.iter().zip(&b.children) {
                match pair {
                    (RenderedNode::Element(x), RenderedNode::Element(y)) => pending.push((x, y)),
                    (RenderedNode::Element(_), _) | (_, RenderedNode::Element(_)) => return false,
                    (x, y) if x != y => return false,
                    _ => {}
                }
            }
        }
        true
    }
}

impl Drop for ElementNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let RenderedNode::Element(mut e) = node {
                pending.append(&mut e.children);
            }
        }
    }
}

impl RenderedTree {
    /// Summarize the top-level nodes in document order.
    pub fn outline(&self) -> Vec<OutlineEntry<'_>> {
        self.nodes.iter().map(RenderedNode::outline_entry).collect()
    }

    /// All mounted widgets, depth-first in document order.
    pub fn visualizations(&self) -> Vec<&MountedVisualization> {
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }

    /// Mutable access to all mounted widgets, depth-first in document order.
    pub fn visualizations_mut(&mut self) -> Vec<&mut MountedVisualization> {
        let mut out = Vec::new();
        collect_mut(&mut self.nodes, &mut out);
        out
    }

    /// Unmount every widget, cancelling any pending timed transitions.
    pub fn unmount_all(&mut self) {
        for v in self.visualizations_mut() {
            v.unmount();
        }
    }

    /// Concatenated text of all pass-through text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        text_into(&self.nodes, &mut out);
        out
    }

    /// Serialize the tree, writing mount points where widgets stand.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_nodes(&mut out, &self.nodes);
        out
    }
}

impl RenderedNode {
    fn outline_entry(&self) -> OutlineEntry<'_> {
        match self {
            Self::Element(e) => OutlineEntry::Element(&e.name),
            Self::Text(t) => OutlineEntry::Text(t),
            Self::Comment(_) => OutlineEntry::Comment,
            Self::Visualization(v) => OutlineEntry::Visualization(v.key()),
            Self::Placeholder(p) => OutlineEntry::Placeholder(p.type_key.as_deref()),
        }
    }
}

fn collect<'a>(nodes: &'a [RenderedNode], out: &mut Vec<&'a MountedVisualization>) {
    let mut stack = vec![nodes.iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(RenderedNode::Visualization(v)) => out.push(v),
            Some(RenderedNode::Element(e)) => stack.push(e.children.iter()),
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
}

fn collect_mut<'a>(nodes: &'a mut [RenderedNode], out: &mut Vec<&'a mut MountedVisualization>) {
    let mut stack = vec![nodes.iter_mut()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(RenderedNode::Visualization(v)) => out.push(v),
            Some(RenderedNode::Element(e)) => stack.push(e.children.iter_mut()),
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
}

fn text_into(nodes: &[RenderedNode], out: &mut String) {
    let mut stack = vec![nodes.iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(RenderedNode::Text(t)) => out.push_str(t),
            Some(RenderedNode::Element(e)) => stack.push(e.children.iter()),
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
}

enum Step<'a> {
    Open(&'a RenderedNode, Option<&'a str>),
    Close(&'a str),
}

fn write_nodes(out: &mut String, nodes: &[RenderedNode]) {
    let mut work: Vec<Step<'_>> = nodes.iter().rev().map(|n| Step::Open(n, None)).collect();
    while let Some(step) = work.pop() {
        match step {
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            Step::Open(RenderedNode::Element(e), _) => {
                write_start_tag(out, &e.name, &e.attrs);
                if VOID_ELEMENTS.contains(&e.name.as_str()) {
                    continue;
                }
                work.push(Step::Close(e.name.as_str()));
                work.extend(
                    e.children
                        .iter()
                        .rev()
                        .map(|c| Step::Open(c, Some(e.name.as_str()))),
                );
            }
            Step::Open(leaf, parent) => write_leaf(out, leaf, parent),
        }
    }
}

fn write_leaf(out: &mut String, node: &RenderedNode, parent: Option<&str>) {
    match node {
        RenderedNode::Element(_) => {}
        RenderedNode::Text(t) => {
            if parent.is_some_and(|p| RAW_TEXT_ELEMENTS.contains(&p)) {
                out.push_str(t);
            } else {
                escape_into(out, t, false);
            }
        }
        RenderedNode::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        RenderedNode::Visualization(v) => {
            let attrs = [
                (MOUNT_ATTR.to_string(), v.key().to_string()),
                (INSTANCE_ATTR.to_string(), v.instance_id().to_string()),
            ];
            write_start_tag(out, "div", &attrs);
            out.push_str("</div>");
        }
        RenderedNode::Placeholder(p) => {
            let mut attrs = vec![("class".to_string(), PLACEHOLDER_CLASS.to_string())];
            if let Some(k) = &p.type_key {
                attrs.push(("data-missing-type".to_string(), k.clone()));
            }
            write_start_tag(out, "div", &attrs);
            escape_into(out, &p.text, false);
            out.push_str("</div>");
        }
    }
}

pub(crate) fn write_start_tag(out: &mut String, name: &str, attrs: &[(String, String)]) {
    out.push('<');
    out.push_str(name);
    for (k, v) in attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        escape_into(out, v, true);
        out.push('"');
    }
    out.push('>');
}

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s, false);
    out
}

fn escape_into(out: &mut String, s: &str, attr_mode: bool) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attr_mode => out.push_str("&quot;"),
            '<' if !attr_mode => out.push_str("&lt;"),
            '>' if !attr_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/dom.rs"]
mod tests;
