//! Flattening inline HTML into formatted text runs

use tracing::warn;

use crate::node::{Element, HtmlNode};
use crate::style::{RunStyle, TextRun};

/// Collect the runs of a subtree in document order
///
/// `b`/`strong` and `i`/`em` turn formatting on for their subtree. An `a`
/// collapses its whole subtree into one run carrying its `href`; an anchor
/// without a usable `href` still yields one run, just without a link.
pub fn extract_runs(node: &HtmlNode, inherited: RunStyle) -> Vec<TextRun> {
    let mut runs = Vec::new();
    collect(node, inherited, &mut runs);
    runs
}

/// Collect the runs of an element's subtree
pub fn element_runs(element: &Element, inherited: RunStyle) -> Vec<TextRun> {
    let mut runs = Vec::new();
    collect_element(element, inherited, &mut runs);
    runs
}

fn collect(node: &HtmlNode, style: RunStyle, out: &mut Vec<TextRun>) {
    match node {
        HtmlNode::Text(text) => {
            if !text.is_empty() {
                out.push(TextRun::plain(text.clone(), style));
            }
        }
        HtmlNode::Element(element) => collect_element(element, style, out),
    }
}

fn collect_element(element: &Element, inherited: RunStyle, out: &mut Vec<TextRun>) {
    let mut style = inherited;
    if element.is("b") || element.is("strong") {
        style = style.with_bold();
    }
    if element.is("i") || element.is("em") {
        style = style.with_italic();
    }

    if element.is("a") {
        let link = match element.attr("href") {
            Some("") => {
                warn!("anchor with empty href rendered as plain text");
                None
            }
            href => href.map(str::to_string),
        };
        out.push(TextRun {
            text: element.text_content(),
            style,
            link,
        });
        return;
    }

    for child in &element.children {
        collect(child, style, out);
    }
}
