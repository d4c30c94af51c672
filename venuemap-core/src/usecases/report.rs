use super::prelude::*;
use crate::util::text::wrap_words;
use time::{macros::format_description, OffsetDateTime};

const NO_CONTACT: &str = "No contact";
const NO_PHONE: &str = "No phone";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    Text {
        x: f64,
        y: f64,
        size: f64,
        text: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    PageBreak,
}

/// A paginated document as a sequence of draw instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub instructions: Vec<DrawInstruction>,
}

impl Document {
    pub fn pages(&self) -> impl Iterator<Item = &[DrawInstruction]> {
        self.instructions
            .split(|i| matches!(i, DrawInstruction::PageBreak))
    }

    pub fn page_count(&self) -> usize {
        self.pages().count()
    }
}

/// Page geometry in millimeters.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub page_width    : f64,
    pub page_height   : f64,
    pub margin        : f64,
    pub line_height   : f64,
    /// Maximum number of characters per address line
    pub address_width : usize,
    pub title_size    : f64,
    pub text_size     : f64,
}

impl Default for ReportLayout {
    fn default() -> Self {
        // A4
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 20.0,
            line_height: 6.0,
            address_width: 60,
            title_size: 16.0,
            text_size: 10.0,
        }
    }
}

struct PageWriter<'a> {
    layout: &'a ReportLayout,
    pages: Vec<Vec<DrawInstruction>>,
    y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(layout: &'a ReportLayout) -> Self {
        Self {
            layout,
            pages: vec![vec![]],
            y: layout.margin,
        }
    }

    fn bottom(&self) -> f64 {
        self.layout.page_height - self.layout.margin
    }

    fn ensure_space(&mut self, height: f64) {
        if self.y + height > self.bottom() {
            self.pages.push(vec![]);
            self.y = self.layout.margin;
        }
    }

    fn push(&mut self, instruction: DrawInstruction) {
        if let Some(page) = self.pages.last_mut() {
            page.push(instruction);
        }
    }

    fn text(&mut self, indent: f64, size: f64, text: String) {
        self.ensure_space(self.layout.line_height);
        self.push(DrawInstruction::Text {
            x: self.layout.margin + indent,
            y: self.y,
            size,
            text,
        });
        self.y += self.layout.line_height;
    }

    fn separator(&mut self) {
        let gap = self.layout.line_height / 2.0;
        self.ensure_space(gap);
        let (x1, x2) = (
            self.layout.margin,
            self.layout.page_width - self.layout.margin,
        );
        self.push(DrawInstruction::Line {
            x1,
            y1: self.y,
            x2,
            y2: self.y,
        });
        self.y += gap;
    }

    fn finish(self) -> Vec<DrawInstruction> {
        let Self { layout, pages, .. } = self;
        let count = pages.len();
        let footer_y = layout.page_height - layout.margin / 2.0;
        let mut instructions = vec![];
        for (idx, mut page) in pages.into_iter().enumerate() {
            if idx > 0 {
                instructions.push(DrawInstruction::PageBreak);
            }
            page.push(DrawInstruction::Text {
                x: layout.margin,
                y: footer_y,
                size: layout.text_size,
                text: format!("Page {} of {}", idx + 1, count),
            });
            instructions.append(&mut page);
        }
        instructions
    }
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    timestamp
        .format(format)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Lay out the member list of the selected circle.
pub fn circle_report(
    selected: Option<&Circle>,
    layout: &ReportLayout,
    generated_at: OffsetDateTime,
) -> Result<Document> {
    let circle = selected.ok_or(Error::ExportPrecondition("no circle selected"))?;
    if circle.members.is_empty() {
        return Err(Error::ExportPrecondition("the circle contains no venues"));
    }
    let title = format!("Circle {} venues", circle.id);
    let size = layout.text_size;
    let mut w = PageWriter::new(layout);
    w.text(0.0, layout.title_size, title.clone());
    w.text(
        0.0,
        size,
        format!("Radius: {:.1} km", circle.radius.to_kilometers()),
    );
    w.text(0.0, size, format!("Venues: {}", circle.members.len()));
    w.text(
        0.0,
        size,
        format!("Generated: {}", format_timestamp(generated_at)),
    );
    w.separator();
    let indent = layout.margin / 4.0;
    for (idx, m) in circle.members.iter().enumerate() {
        w.text(0.0, size, format!("{}. {}", idx + 1, m.name));
        for (line_idx, line) in wrap_words(&m.address, layout.address_width)
            .into_iter()
            .enumerate()
        {
            let label = if line_idx == 0 { "Address: " } else { "         " };
            w.text(indent, size, format!("{label}{line}"));
        }
        w.text(indent, size, format!("Region: {}", m.region));
        w.text(
            indent,
            size,
            format!(
                "Contact: {}",
                m.contact_name.as_deref().unwrap_or(NO_CONTACT)
            ),
        );
        w.text(
            indent,
            size,
            format!("Phone: {}", m.phone.as_deref().unwrap_or(NO_PHONE)),
        );
        w.text(indent, size, format!("Type: {}", m.category));
        w.text(indent, size, format!("Distance: {:.1} km", m.distance_km));
        w.separator();
    }
    log::debug!("Laid out the report of circle {} on {} page(s)", circle.id, w.pages.len());
    Ok(Document {
        title,
        instructions: w.finish(),
    })
}
