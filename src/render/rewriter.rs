use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::content::dom::{ElementNode, Placeholder, RenderedNode, RenderedTree};
use crate::content::marker::{MarkerMatch, classify};
use crate::foundation::config::{RenderOptions, UnknownEmbedPolicy};
use crate::registry::table::VisualizationRegistry;
use crate::render::report::{FaultedEmbed, MountRecord, RenderReport, UnknownEmbed};
use crate::widget::contract::MountedVisualization;

/// Result of one render pass.
#[derive(Debug)]
pub struct RenderOutput {
    /// Rendered tree in document order.
    pub tree: RenderedTree,
    /// Diagnostics for operators.
    pub report: RenderReport,
}

/// Render lesson content, replacing every resolvable embed marker with a live widget.
///
/// Content is parsed as a body fragment by an HTML5 parser, so unclosed and mis-nested markup is
/// repaired before the rewrite sees it. Non-marker nodes pass through unchanged. Markers whose
/// key is unknown, missing, or whose widget panics while being built are dropped (or replaced by
/// a placeholder, per [`RenderOptions::unknown_embeds`]) and recorded in the report. This
/// function does not fail.
#[tracing::instrument(skip(content, registry, opts), fields(len = content.len()))]
pub fn render(
    content: &str,
    registry: &VisualizationRegistry,
    opts: &RenderOptions,
) -> RenderOutput {
    let html = Html::parse_fragment(content);

    let mut pass = RewritePass {
        registry,
        opts,
        report: RenderReport {
            recovered_parse_errors: html.errors.len(),
            ..RenderReport::default()
        },
    };
    let nodes = pass.walk(html.root_element());

    if !pass.report.is_clean() {
        tracing::warn!(summary = %pass.report.summary(), "render completed with missing embeds");
    } else {
        tracing::debug!(summary = %pass.report.summary(), "render completed");
    }

    RenderOutput {
        tree: RenderedTree { nodes },
        report: pass.report,
    }
}

/// An element under construction and the next source node to visit inside it.
struct Frame<N> {
    element: ElementNode,
    next: Option<N>,
}

struct RewritePass<'a> {
    registry: &'a VisualizationRegistry,
    opts: &'a RenderOptions,
    report: RenderReport,
}

impl RewritePass<'_> {
    /// Depth-first rewrite driven by an explicit stack of open elements.
    fn walk(&mut self, root: ElementRef<'_>) -> Vec<RenderedNode> {
        let mut stack = vec![Frame {
            element: ElementNode {
                name: String::new(),
                attrs: Vec::new(),
                children: Vec::new(),
            },
            next: root.first_child(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = frame.next else {
                let Some(mut done) = stack.pop() else {
                    break;
                };
                match stack.last_mut() {
                    Some(parent) => parent
                        .element
                        .children
                        .push(RenderedNode::Element(done.element)),
                    None => return std::mem::take(&mut done.element.children),
                }
                continue;
            };
            frame.next = node.next_sibling();

            match node.value() {
                Node::Text(t) => {
                    let s: &str = &t.text;
                    frame.element.children.push(RenderedNode::Text(s.to_string()));
                }
                Node::Comment(c) => {
                    let s: &str = &c.comment;
                    frame.element.children.push(RenderedNode::Comment(s.to_string()));
                }
                Node::Element(e) => match classify(e.name(), e.attrs()) {
                    MarkerMatch::NotMarker => {
                        let element = ElementNode {
                            name: e.name().to_string(),
                            attrs: e
                                .attrs()
                                .map(|(k, v)| (k.to_string(), v.to_string()))
                                .collect(),
                            children: Vec::new(),
                        };
                        stack.push(Frame {
                            element,
                            next: node.first_child(),
                        });
                    }
                    MarkerMatch::Marker(marker) => {
                        if let Some(n) = self.embed(Some(marker.type_key)) {
                            frame.element.children.push(n);
                        }
                    }
                    MarkerMatch::Untyped => {
                        if let Some(n) = self.embed(None) {
                            frame.element.children.push(n);
                        }
                    }
                },
                _ => {}
            }
        }
        Vec::new()
    }

    fn embed(&mut self, type_key: Option<String>) -> Option<RenderedNode> {
        let ordinal = self.report.markers_seen;
        self.report.markers_seen += 1;

        let Some(key) = type_key else {
            tracing::warn!(ordinal, "embed marker without a type key; omitted");
            self.report.unknown.push(UnknownEmbed {
                ordinal,
                type_key: None,
            });
            return self.unavailable(None);
        };

        let Some(entry) = self.registry.lookup(&key) else {
            tracing::warn!(ordinal, type_key = %key, "unknown visualization type; omitted");
            self.report.unknown.push(UnknownEmbed {
                ordinal,
                type_key: Some(key.clone()),
            });
            return self.unavailable(Some(key));
        };

        let instance_id = self.report.mounted.len();
        match MountedVisualization::mount(entry.key, instance_id, entry.factory()) {
            Ok(mounted) => {
                self.report.mounted.push(MountRecord {
                    ordinal,
                    key: key.clone(),
                    instance_id,
                });
                Some(RenderedNode::Visualization(mounted))
            }
            Err(message) => {
                tracing::warn!(ordinal, type_key = %key, panic = %message, "visualization failed to mount; omitted");
                self.report.faulted.push(FaultedEmbed {
                    ordinal,
                    key: key.clone(),
                    message,
                });
                self.unavailable(Some(key))
            }
        }
    }

    fn unavailable(&self, type_key: Option<String>) -> Option<RenderedNode> {
        match self.opts.unknown_embeds {
            UnknownEmbedPolicy::Omit => None,
            UnknownEmbedPolicy::Placeholder => Some(RenderedNode::Placeholder(Placeholder {
                type_key,
                text: self.opts.placeholder_text.clone(),
            })),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/rewriter.rs"]
mod tests;
