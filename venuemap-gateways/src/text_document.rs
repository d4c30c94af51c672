use askama::Template;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use venuemap_core::{
    gateways::document::DocumentGateway,
    usecases::{DrawInstruction, Document},
};

const FORM_FEED: char = '\u{c}';

#[derive(Template)]
#[template(path = "document.txt")]
struct DocumentTemplate<'a> {
    pages: &'a [Vec<String>],
    form_feed: char,
}

/// Renders documents as plain text files.
///
/// Every draw instruction becomes one line, pages are separated by form feeds.
#[derive(Debug, Clone)]
pub struct TextDocumentGateway {
    dir: PathBuf,
    /// Horizontal resolution
    mm_per_column: f64,
}

impl TextDocumentGateway {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            mm_per_column: 2.0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn page_lines(&self, page: &[DrawInstruction]) -> Vec<String> {
        let left = page
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text { x, .. } => Some(*x),
                DrawInstruction::Line { x1, x2, .. } => Some(x1.min(*x2)),
                DrawInstruction::PageBreak => None,
            })
            .fold(f64::INFINITY, f64::min);
        let columns = |width: f64| (width / self.mm_per_column).round().max(0.0) as usize;
        let mut rows: Vec<(f64, String)> = page
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text { x, y, text, .. } => {
                    Some((*y, format!("{}{}", " ".repeat(columns(x - left)), text)))
                }
                DrawInstruction::Line { x1, y1, x2, .. } => Some((
                    *y1,
                    format!(
                        "{}{}",
                        " ".repeat(columns(x1.min(*x2) - left)),
                        "-".repeat(columns((x2 - x1).abs()))
                    ),
                )),
                DrawInstruction::PageBreak => None,
            })
            .collect();
        // stable: instructions on the same height keep their order
        rows.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        rows.into_iter().map(|(_, line)| line).collect()
    }

    pub fn render(&self, document: &Document) -> Result<String, askama::Error> {
        let pages: Vec<_> = document
            .pages()
            .map(|page| self.page_lines(page))
            .collect();
        DocumentTemplate {
            pages: &pages,
            form_feed: FORM_FEED,
        }
        .render()
    }
}

impl DocumentGateway for TextDocumentGateway {
    fn produce(&self, file_name: &str, document: &Document) -> io::Result<()> {
        let text = self
            .render(document)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, text)?;
        log::info!("Saved '{}' to {}", document.title, path.display());
        Ok(())
    }
}
