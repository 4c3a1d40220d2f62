//! Section parser for slide source text
//!
//! A source file is a sequence of blocks. Each block opens with a directive
//! line (`%title`, `%body`, ...) naming its kind, followed by content lines up
//! to the first blank (or single-space) line or the end of the stream.

use regex::Regex;
use std::io::{self, BufRead};
use std::sync::OnceLock;

/// Kind of section that renders as a title card
pub const TITLE_KIND: &str = "title";

static IMAGE_LINK: OnceLock<Regex> = OnceLock::new();

/// Matches `![](URL)`, capturing the URL
fn image_link_pattern() -> &'static Regex {
    IMAGE_LINK.get_or_init(|| Regex::new(r"!\[\]\((.*?)\)").expect("image link pattern is valid"))
}

/// One parsed block of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    kind: String,
    content: String,
    id: usize,
    image: Option<String>,
}

impl Section {
    /// Create a section, pulling the first image link out of `raw_content`
    ///
    /// # Parameters
    /// * `kind` - Directive token found after the leading `%`
    /// * `raw_content` - Content lines of the block
    /// * `id` - Sequential identifier of the block within the source
    pub fn new(kind: impl Into<String>, raw_content: &str, id: usize) -> Self {
        let (content, image) = extract_image(raw_content);
        Self {
            kind: kind.into(),
            content,
            id,
            image,
        }
    }

    /// Directive token naming this section's kind
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Content with every image link removed
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// URL of the first image link in the raw content, if there was one
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Whether this section renders as a title card
    pub fn is_title(&self) -> bool {
        self.kind == TITLE_KIND
    }
}

/// Find the first `![](URL)` link and strip all of them
///
/// Only the first URL is returned; any further links are dropped from the
/// text without being recorded.
///
/// # Returns
/// The content with all image links removed, and the first link's URL
pub fn extract_image(content: &str) -> (String, Option<String>) {
    let pattern = image_link_pattern();
    let image = pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|url| url.as_str().to_string());

    match image {
        Some(url) => (pattern.replace_all(content, "").into_owned(), Some(url)),
        None => (content.to_string(), None),
    }
}

/// Read the next section from `reader`
///
/// # Parameters
/// * `reader` - Source positioned at the start of a directive line
/// * `id` - Identifier to give the section
///
/// # Returns
/// * `Ok(Some(Section))` - A directive block was read
/// * `Ok(None)` - End of input, or the next line is not a directive
/// * `Err(io::Error)` - The reader failed
pub fn read_section<R: BufRead>(reader: &mut R, id: usize) -> io::Result<Option<Section>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let Some(kind) = strip_line_ending(&line).strip_prefix('%') else {
        log::warn!(
            "Stopped reading before section {}: expected a '%' directive, found {:?}",
            id,
            strip_line_ending(&line)
        );
        return Ok(None);
    };
    let kind = kind.to_string();

    let mut content = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let text = strip_line_ending(&line);
        if is_terminator(text) {
            break;
        }
        content.push_str(text);
        content.push('\n');
    }

    Ok(Some(Section::new(kind, &content, id)))
}

/// A blank or single-space line ends a block
fn is_terminator(text: &str) -> bool {
    text.is_empty() || text == " "
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Iterator over the sections of a source, numbered from 0
pub struct Sections<R> {
    reader: R,
    next_id: usize,
    done: bool,
}

impl<R: BufRead> Sections<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            next_id: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Sections<R> {
    type Item = io::Result<Section>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_section(&mut self.reader, self.next_id) {
            Ok(Some(section)) => {
                self.next_id += 1;
                Some(Ok(section))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
