//! Slide renderer
//!
//! Turns a parsed [`Section`] into an HTML fragment. Sections of kind `title`
//! become title cards; every other kind becomes a text card with a bulleted
//! body and an optional side image.

use crate::section::Section;
use crate::template::TemplateError;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_fragment, Attribute, LocalName, ParseOpts, QualName};
use itertools::Itertools;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Inline height limit for title card images
const TITLE_IMAGE_STYLE: &str = "max-height: 400px;";

/// Which card layout a slide uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Title,
    Text,
}

impl CardKind {
    /// Pick the layout for a section
    pub fn for_section(section: &Section) -> Self {
        if section.is_title() {
            CardKind::Title
        } else {
            CardKind::Text
        }
    }

    /// CSS class added next to `slide` on the wrapper element
    pub fn class_name(self) -> &'static str {
        match self {
            CardKind::Title => "title_card",
            CardKind::Text => "text_card",
        }
    }
}

/// A rendered slide fragment
#[derive(Debug)]
pub struct Slide {
    id: usize,
    kind: CardKind,
    node: Handle,
}

impl Slide {
    /// Render a section into its slide
    pub fn render(section: &Section) -> Self {
        let kind = CardKind::for_section(section);
        let image = section.image().filter(|url| !url.is_empty());
        let mut lines = section.content().lines();

        let card = match kind {
            CardKind::Title => {
                let title = lines.next().unwrap_or_default();
                let subtitle = lines.next().unwrap_or_default();
                title_card(title, subtitle, image)
            }
            CardKind::Text => {
                let title = lines.next().unwrap_or_default();
                let mut body: Vec<&str> = lines.collect();
                // A line emptied by image link removal at the end is not a bullet
                if body.last() == Some(&"") {
                    body.pop();
                }
                text_card(title, &body, image)
            }
        };

        Self {
            id: section.id(),
            kind,
            node: wrap_slide(card, section.id(), &[kind.class_name()]),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// DOM identifier of the wrapper element
    pub fn element_id(&self) -> String {
        slide_element_id(self.id)
    }

    /// Root node of the fragment
    pub fn node(&self) -> &Handle {
        &self.node
    }

    /// Serialize the fragment, wrapper element included
    pub fn to_html(&self) -> Result<String, TemplateError> {
        let mut output = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        serialize(&mut output, &SerializableHandle::from(self.node.clone()), opts)
            .map_err(|e| TemplateError::Serialize(e.to_string()))?;
        String::from_utf8(output).map_err(|e| TemplateError::Serialize(e.to_string()))
    }
}

fn slide_element_id(id: usize) -> String {
    format!("slide{}", id)
}

/// Build a title card: optional image, then the title and subtitle headings
pub fn title_card(title: &str, subtitle: &str, image: Option<&str>) -> Handle {
    let card = create_element("div", vec![]);

    if let Some(src) = image {
        append_child(
            &card,
            create_element(
                "img",
                vec![
                    ("class", "center_img"),
                    ("src", src),
                    ("style", TITLE_IMAGE_STYLE),
                ],
            ),
        );
    }

    append_child(&card, text_element("h1", vec![("class", "center")], title));
    append_child(&card, text_element("h2", vec![("class", "center")], subtitle));
    card
}

/// Build a text card: a heading over a one-row table
///
/// The first cell holds `body` as a bulleted list, one item per line. Lines
/// are HTML, so inline markup such as `<b>` or `<a href>` carries through;
/// the heading is plain text. With an image the list cell takes half the
/// width and the image fills a second cell.
pub fn text_card(title: &str, body: &[&str], image: Option<&str>) -> Handle {
    let card = create_element("div", vec![]);
    append_child(&card, text_element("h1", vec![], title));

    let list = create_element("ul", vec![]);
    for line in body {
        let item = create_element("li", vec![]);
        append_markup(&item, line);
        append_child(&list, item);
    }

    let row = create_element("tr", vec![]);
    match image {
        Some(src) => {
            let text_cell = create_element("td", vec![("width", "50%")]);
            append_child(&text_cell, list);
            append_child(&row, text_cell);

            let image_cell = create_element("td", vec![]);
            append_child(
                &image_cell,
                create_element(
                    "img",
                    vec![("class", "center"), ("src", src), ("width", "50%")],
                ),
            );
            append_child(&row, image_cell);
        }
        None => {
            let text_cell = create_element("td", vec![]);
            append_child(&text_cell, list);
            append_child(&row, text_cell);
        }
    }

    let table = create_element("table", vec![]);
    append_child(&table, row);
    append_child(&card, table);
    card
}

/// Wrap a card in its slide element, `id="slide{id}"` and `class="slide ..."`
pub fn wrap_slide(card: Handle, id: usize, classes: &[&str]) -> Handle {
    let class = format!("slide {}", classes.iter().join(" "));
    let element_id = slide_element_id(id);
    let slide = create_element("div", vec![("class", &class), ("id", &element_id)]);
    append_child(&slide, card);
    slide
}

/// Attach `child` as the last child of `parent`
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create an element holding a single text node (none when `text` is empty)
fn text_element(tag: &str, attrs: Vec<(&str, &str)>, text: &str) -> Handle {
    let element = create_element(tag, attrs);
    if !text.is_empty() {
        append_child(&element, create_text(text));
    }
    element
}

/// Parse `markup` as the contents of an `<li>` and append the nodes to `parent`
fn append_markup(parent: &Handle, markup: &str) {
    let context = QualName::new(None, ns!(html), LocalName::from("li"));
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![], false)
        .one(markup);

    // Fragment parsing puts the parsed nodes under a synthetic <html> root
    let root = dom.document.children.borrow().first().cloned();
    if let Some(root) = root {
        for node in root.children.take() {
            append_child(parent, node);
        }
    }
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
