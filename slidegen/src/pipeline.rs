//! Slide deck build pipeline
//!
//! Reads sections from the input text one at a time, renders each into a
//! slide, and appends it to the template body in source order.

use crate::section::Sections;
use crate::slide::Slide;
use crate::template::{Template, TemplateError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while building a deck
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to open input {path}: {source}", path = .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),
}

/// Build a slide deck from files on disk
///
/// # Parameters
/// * `input` - Source text with `%kind` directive blocks
/// * `template` - HTML document whose `<body>` receives the slides
/// * `output` - Path where the finished document is written
///
/// # Returns
/// * `Ok(usize)` - Number of slides written
/// * `Err(BuildError)` - A file could not be opened, read or written
pub fn build_deck(input: &Path, template: &Path, output: &Path) -> Result<usize, BuildError> {
    let mut deck = Template::load(template)?;
    log::debug!("Template body starts with {} children", deck.body_len());

    log::info!("Reading sections from: {}", input.display());
    let file = File::open(input).map_err(|source| BuildError::Input {
        path: input.to_path_buf(),
        source,
    })?;
    let count = render_deck(BufReader::new(file), &mut deck)?;

    deck.save(output)?;
    Ok(count)
}

/// Render every section in `reader` into `deck`
///
/// # Returns
/// * `Ok(usize)` - Number of slides appended
/// * `Err(BuildError)` - The reader failed part way through
pub fn render_deck<R: BufRead>(reader: R, deck: &mut Template) -> Result<usize, BuildError> {
    let mut count = 0;
    for section in Sections::new(reader) {
        let section = section.map_err(BuildError::Read)?;
        let slide = Slide::render(&section);
        log::debug!(
            "Rendered section {} ({}) as {}",
            section.id(),
            section.kind(),
            slide.kind().class_name()
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", slide.to_html()?);
        }
        deck.append_slide(&slide);
        count += 1;
    }
    log::info!("Rendered {} slides", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TEMPLATE: &str = "<!DOCTYPE html><html><head></head><body></body></html>";

    const SOURCE: &str = "%title\nHello\nWorld\n\n\
                          %body\nMy Title\nline one\nline two\n \n\
                          %body\nPictures ![](http://x/img.png)\nsee right\n";

    #[test]
    fn test_render_deck_appends_in_order() {
        let mut deck = Template::parse(TEMPLATE).unwrap();
        let count = render_deck(Cursor::new(SOURCE), &mut deck).unwrap();
        assert_eq!(count, 3);
        assert_eq!(deck.body_len(), 3);

        let html = deck.to_html().unwrap();
        let positions: Vec<usize> = (0..3)
            .map(|i| html.find(&format!("id=\"slide{}\"", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!html.contains("id=\"slide3\""));
        assert!(!html.contains("![]("));
        assert!(html.contains("<li>see right</li></ul>"));
    }

    #[test]
    fn test_render_deck_empty_input() {
        let mut deck = Template::parse(TEMPLATE).unwrap();
        assert_eq!(render_deck(Cursor::new(""), &mut deck).unwrap(), 0);
        assert_eq!(
            deck.to_html().unwrap(),
            "<!DOCTYPE html><html><head></head><body></body></html>"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let render = || {
            let mut deck = Template::parse(TEMPLATE).unwrap();
            render_deck(Cursor::new(SOURCE), &mut deck).unwrap();
            deck.to_html().unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_build_deck_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.html");
        std::fs::write(&template, TEMPLATE).unwrap();

        let err = build_deck(
            &dir.path().join("missing.txt"),
            &template,
            &dir.path().join("gen.html"),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Input { .. }));
        assert!(!dir.path().join("gen.html").exists());
    }

    #[test]
    fn test_build_deck_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let template = dir.path().join("template.html");
        let output = dir.path().join("gen.html");
        std::fs::write(&input, SOURCE).unwrap();
        std::fs::write(&template, TEMPLATE).unwrap();

        assert_eq!(build_deck(&input, &template, &output).unwrap(), 3);
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<h1 class=\"center\">Hello</h1>"));
        assert!(html.contains("<li>line one</li><li>line two</li>"));
        assert!(html.contains("src=\"http://x/img.png\""));
    }
}
