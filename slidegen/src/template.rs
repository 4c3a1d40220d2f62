//! HTML template document that slides are appended to

use crate::slide::{append_child, Slide};
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or writing a template
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error for {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template has no <body> element")]
    MissingBody,

    #[error("HTML serialization failed: {0}")]
    Serialize(String),
}

/// A parsed HTML template
pub struct Template {
    dom: RcDom,
    body: Handle,
}

impl Template {
    /// Parse template markup
    ///
    /// The HTML parser inserts `<html>`, `<head>` and `<body>` when the
    /// markup leaves them out, so any input yields a body to append to.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
        let body = find_element(&dom.document, "body").ok_or(TemplateError::MissingBody)?;
        Ok(Self { dom, body })
    }

    /// Read and parse a template file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        log::info!("Reading template from: {}", path.display());
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Append a slide as the last child of `<body>`
    pub fn append_slide(&mut self, slide: &Slide) {
        log::debug!("Appending {}", slide.element_id());
        append_child(&self.body, slide.node().clone());
    }

    /// Number of children currently under `<body>`
    pub fn body_len(&self) -> usize {
        self.body.children.borrow().len()
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> Result<String, TemplateError> {
        let mut output = Vec::new();
        let document = SerializableHandle::from(self.dom.document.clone());
        serialize(&mut output, &document, SerializeOpts::default())
            .map_err(|e| TemplateError::Serialize(e.to_string()))?;
        String::from_utf8(output).map_err(|e| TemplateError::Serialize(e.to_string()))
    }

    /// Serialize the document and write it to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TemplateError> {
        let path = path.as_ref();
        let html = self.to_html()?;
        log::info!("Writing HTML to: {}", path.display());
        fs::write(path, html).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Depth-first search for the first element named `tag`
fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == tag {
            return Some(node.clone());
        }
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;

    const TEMPLATE: &str = "<!DOCTYPE html><html><head><title>Deck</title></head>\
                            <body><script src=\"deck.js\"></script></body></html>";

    #[test]
    fn test_parse_keeps_template_content() {
        let template = Template::parse(TEMPLATE).unwrap();
        let html = template.to_html().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Deck</title>"));
        assert!(html.contains("<script src=\"deck.js\"></script>"));
        assert_eq!(template.body_len(), 1);
    }

    #[test]
    fn test_slides_appended_after_existing_children() {
        let mut template = Template::parse(TEMPLATE).unwrap();
        template.append_slide(&Slide::render(&Section::new("title", "A\nB\n", 0)));
        template.append_slide(&Slide::render(&Section::new("body", "C\nd\n", 1)));
        assert_eq!(template.body_len(), 3);

        let html = template.to_html().unwrap();
        let script = html.find("deck.js").unwrap();
        let first = html.find("id=\"slide0\"").unwrap();
        let second = html.find("id=\"slide1\"").unwrap();
        assert!(script < first && first < second);
        assert!(html.ends_with("</div></div></body></html>"));
    }

    #[test]
    fn test_parse_fragment_gets_body() {
        let mut template = Template::parse("<p>intro</p>").unwrap();
        template.append_slide(&Slide::render(&Section::new("body", "T\n", 0)));
        let html = template.to_html().unwrap();
        assert!(html.contains("<body><p>intro</p><div class=\"slide text_card\""));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Template::load("/nonexistent/template.html").err().unwrap();
        assert!(matches!(err, TemplateError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/template.html"));
    }
}
