//! Nested `ul`/`ol` rendering
//!
//! Lists become flat runs of "List Bullet"/"List Number" paragraphs. Nesting
//! is carried by the list level and a left indent that grows with it.

use docbridge_ooxml::{Paragraph, ParagraphStyle, Twips};
use tracing::debug;

use crate::error::RenderError;
use crate::node::{Element, HtmlNode};
use crate::render::{heading_size, Renderer};
use crate::runs::{element_runs, extract_runs};
use crate::style::{RunStyle, TextRun};

impl Renderer<'_> {
    /// Render the direct `li` children of `list`
    ///
    /// `depth` counts the `ul`/`ol` ancestors of the items, `list` included.
    pub(crate) fn render_list(
        &mut self,
        list: &Element,
        ordered: bool,
        depth: usize,
    ) -> Result<(), RenderError> {
        let level = depth.saturating_sub(1);
        let max = self.config.lists.max_depth;
        if level > max {
            return Err(RenderError::NestingTooDeep { level, max });
        }

        let style = if ordered {
            ParagraphStyle::ListNumber
        } else {
            ParagraphStyle::ListBullet
        };

        for item in list.child_elements().filter(|e| e.is("li")) {
            let base = RunStyle::sized(self.item_heading_size(item));

            let mut paragraph = Paragraph::with_style(style);
            paragraph.list_level = Some(level as u32);
            if level > 0 {
                let step = self.config.layout.list_indent_step_in;
                paragraph.indent_left = Some(Twips::from_inches(step * (level + 1) as f64));
            }
            let runs = self.item_runs(item, base);
            self.populate(&mut paragraph, runs);
            self.doc.push(paragraph);

            for nested in item.child_elements().filter(|e| e.is_list()) {
                debug!("Nested <{}> at level {}", nested.tag, level + 1);
                self.render_list(nested, nested.is("ol"), depth + 1)?;
            }
        }
        Ok(())
    }

    fn item_heading_size(&self, item: &Element) -> Option<u32> {
        match item.attr(&self.config.lists.heading_attribute)? {
            "1" => heading_size(1),
            "2" => heading_size(2),
            "3" => heading_size(3),
            _ => None,
        }
    }

    /// Runs of the item's own text, leaving out the lists nested directly in it
    fn item_runs(&self, item: &Element, base: RunStyle) -> Vec<TextRun> {
        let class = &self.config.lists.item_text_class;
        if let Some(marker) = find_marker(item, class) {
            return element_runs(marker, base);
        }

        item.children
            .iter()
            .filter(|child| !child.as_element().is_some_and(Element::is_list))
            .flat_map(|child| extract_runs(child, base))
            .collect()
    }
}

/// First `span` carrying `class` inside `item`, outside its direct child lists
fn find_marker<'e>(item: &'e Element, class: &str) -> Option<&'e Element> {
    item.child_elements()
        .filter(|child| !child.is_list())
        .find_map(|child| find_span(child, class))
}

fn find_span<'e>(element: &'e Element, class: &str) -> Option<&'e Element> {
    if element.is("span") && element.has_class(class) {
        return Some(element);
    }
    element
        .children
        .iter()
        .filter_map(HtmlNode::as_element)
        .find_map(|child| find_span(child, class))
}
