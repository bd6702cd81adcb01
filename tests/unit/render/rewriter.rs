use super::*;
use crate::content::dom::OutlineEntry;
use crate::registry::table::{ConceptFamily, RegistryEntry};
use crate::widget::contract::{Interaction, MountState, Visualization};

fn marker(key: &str) -> String {
    format!(r#"<div class="visualization-embed" data-type="{key}"></div>"#)
}

fn std_render(html: &str) -> RenderOutput {
    render(
        html,
        VisualizationRegistry::standard(),
        &RenderOptions::default(),
    )
}

fn exploding_factory() -> Box<dyn Visualization> {
    panic!("widget constructor blew up")
}

#[test]
fn markup_without_markers_passes_through_identically() {
    let html = concat!(
        r#"<h2 id="intro" class="title">Title</h2>"#,
        r#"<p>Some <strong>bold</strong> &amp; <a href="/x?a=1&amp;b=2" target="_blank">link</a></p>"#,
        "<ul><li>one</li><li>two</li></ul>",
        r#"<pre><code class="language-css">a &gt; b { color: red; }</code></pre>"#,
        r#"<table><tbody><tr><td colspan="2">cell</td></tr></tbody></table>"#,
        r#"<p><img src="a.png" alt="A"><br></p>"#,
        "<!-- authoring note -->",
    );
    let out = std_render(html);
    assert_eq!(out.tree.to_html(), html);
    assert_eq!(out.report.markers_seen, 0);
    assert!(out.report.is_clean());
}

#[test]
fn registered_marker_becomes_single_mount_point() {
    let out = std_render(&marker("css-intro-visualization"));
    assert_eq!(
        out.tree.outline(),
        vec![OutlineEntry::Visualization("css-intro-visualization")]
    );
    let html = out.tree.to_html();
    assert_eq!(
        html,
        r#"<div data-visualization-mount="css-intro-visualization" data-instance="0"></div>"#
    );
    assert!(!html.contains("visualization-embed"));
    assert_eq!(out.report.mounted.len(), 1);
}

#[test]
fn unknown_marker_renders_nothing_and_spares_siblings() {
    let html = format!("<p>A</p>{}<p>B</p>", marker("does-not-exist"));
    let out = std_render(&html);
    assert_eq!(out.tree.to_html(), "<p>A</p><p>B</p>");
    assert_eq!(
        out.report.unknown,
        vec![UnknownEmbed {
            ordinal: 0,
            type_key: Some("does-not-exist".to_string()),
        }]
    );
    assert!(!out.report.is_clean());
}

#[test]
fn untyped_marker_is_dropped() {
    let out = std_render(r#"<p>A</p><div class="visualization-embed"></div>"#);
    assert_eq!(out.tree.to_html(), "<p>A</p>");
    assert_eq!(out.report.unknown[0].type_key, None);
}

#[test]
fn placeholder_policy_marks_the_gap() {
    let opts = RenderOptions {
        unknown_embeds: UnknownEmbedPolicy::Placeholder,
        placeholder_text: "Missing".to_string(),
    };
    let out = render(&marker("nope"), VisualizationRegistry::standard(), &opts);
    assert_eq!(out.tree.outline(), vec![OutlineEntry::Placeholder(Some("nope"))]);
    assert_eq!(
        out.tree.to_html(),
        r#"<div class="visualization-placeholder" data-missing-type="nope">Missing</div>"#
    );
}

#[test]
fn document_order_is_preserved() {
    let html = format!("<p>A</p>{}<p>B</p>", marker("flexbox-visualizer"));
    let out = std_render(&html);
    assert_eq!(
        out.tree.outline(),
        vec![
            OutlineEntry::Element("p"),
            OutlineEntry::Visualization("flexbox-visualizer"),
            OutlineEntry::Element("p"),
        ]
    );
}

#[test]
fn marker_children_are_discarded() {
    let html = r#"<div class="visualization-embed" data-type="box-model-visualizer"><p>scaffold</p></div>"#;
    let out = std_render(html);
    assert_eq!(out.tree.text_content(), "");
    assert_eq!(out.tree.visualizations().len(), 1);
}

#[test]
fn nested_markers_are_replaced_in_place() {
    let html = format!(
        r#"<ul class="list"><li>x</li><li>{}</li></ul>"#,
        marker("flexbox-visualizer")
    );
    let out = std_render(&html);
    assert_eq!(
        out.tree.to_html(),
        r#"<ul class="list"><li>x</li><li><div data-visualization-mount="flexbox-visualizer" data-instance="0"></div></li></ul>"#
    );
}

#[test]
fn key_match_is_case_sensitive() {
    let out = std_render(&marker("Flexbox-Visualizer"));
    assert!(out.tree.visualizations().is_empty());
    assert_eq!(out.report.unknown.len(), 1);
}

#[test]
fn malformed_input_still_mounts_the_widget() {
    let html = r#"<p>Unclosed paragraph <div class="visualization-embed" data-type="css-intro-visualization">"#;
    let out = std_render(html);
    assert_eq!(
        out.tree.outline(),
        vec![
            OutlineEntry::Element("p"),
            OutlineEntry::Visualization("css-intro-visualization"),
        ]
    );
    assert_eq!(out.tree.text_content(), "Unclosed paragraph ");
}

#[test]
fn garbage_input_never_panics() {
    for html in [
        "",
        "<",
        "</p></div>",
        "<div class=\"visualization-embed\" data-type=",
        "<table><div class=\"visualization-embed\" data-type=\"flexbox-visualizer\"></div>",
        "<<<>>>&&&;;",
        "<script>if (a < b) {}</script>",
    ] {
        let _ = std_render(html);
    }
}

#[test]
fn same_type_embeds_are_independent() {
    let html = format!(
        "{}{}",
        marker("css-intro-visualization"),
        marker("css-intro-visualization")
    );
    let mut out = std_render(&html);
    let mut vs = out.tree.visualizations_mut();
    assert_eq!(vs.len(), 2);
    vs[0].dispatch(&Interaction::toggle("colors")).unwrap();
    assert_eq!(vs[0].view().unwrap()["rule_count"], 3);
    assert_eq!(vs[1].view().unwrap()["rule_count"], 0);
    assert_eq!(vs[1].instance_id(), 1);
}

#[test]
fn rendering_is_deterministic() {
    let html = format!(
        "<h1>T</h1>{}<p>x</p>{}",
        marker("request-flow-visualizer"),
        marker("missing")
    );
    let a = std_render(&html);
    let b = std_render(&html);
    assert_eq!(a.tree, b.tree);
    assert_eq!(a.tree.to_html(), b.tree.to_html());
    assert_eq!(a.report, b.report);
}

#[test]
fn panicking_factory_is_isolated_to_its_embed() {
    let registry = VisualizationRegistry::builder()
        .register(RegistryEntry::new(
            "exploding",
            "Exploding",
            ConceptFamily::CssBasics,
            exploding_factory,
        ))
        .unwrap()
        .build();
    let html = format!("<p>before</p>{}<p>after</p>", marker("exploding"));
    let out = render(&html, &registry, &RenderOptions::default());
    assert_eq!(out.tree.to_html(), "<p>before</p><p>after</p>");
    assert_eq!(out.report.faulted.len(), 1);
    assert!(out.report.faulted[0].message.contains("blew up"));
}

#[test]
fn unmount_all_stops_every_widget() {
    let mut out = std_render(&marker("request-flow-visualizer"));
    out.tree.visualizations_mut()[0]
        .dispatch(&Interaction::press("send"))
        .unwrap();
    assert!(out.tree.visualizations()[0].pending_transition().is_some());
    out.tree.unmount_all();
    let v = out.tree.visualizations()[0];
    assert_eq!(v.state(), MountState::Unmounted);
    assert_eq!(v.pending_transition(), None);
}

#[test]
fn report_counts_ordinals_across_outcomes() {
    let html = format!(
        "{}{}{}",
        marker("nope"),
        marker("box-model-visualizer"),
        marker("flexbox-visualizer")
    );
    let out = std_render(&html);
    assert_eq!(out.report.markers_seen, 3);
    assert_eq!(out.report.unknown[0].ordinal, 0);
    assert_eq!(
        out.report
            .mounted
            .iter()
            .map(|m| (m.ordinal, m.instance_id))
            .collect::<Vec<_>>(),
        vec![(1, 0), (2, 1)]
    );
    assert_eq!(out.report.summary(), "3 embed(s): 2 mounted, 1 unknown, 0 faulted");
}

#[test]
fn very_deep_nesting_renders_and_drops() {
    let depth = 10_000;
    let html = format!(
        "{}{}x{}",
        "<div>".repeat(depth),
        marker("flexbox-visualizer"),
        "</div>".repeat(depth)
    );
    let mut out = std_render(&html);
    assert_eq!(
        out.tree.to_html(),
        format!(
            r#"{}<div data-visualization-mount="flexbox-visualizer" data-instance="0"></div>x{}"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        )
    );
    assert_eq!(out.tree.text_content(), "x");
    assert_eq!(out.tree.visualizations().len(), 1);

    let again = std_render(&html);
    assert_eq!(out.tree, again.tree);

    out.tree.unmount_all();
    assert_eq!(out.tree.visualizations()[0].state(), MountState::Unmounted);
    drop(out);
}
