//! Markdown export of idea lists.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Category, Idea};

pub const EXPORT_TITLE: &str = "IdeaNest Ideas Export";
pub const CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

const COLUMNS: [&str; 5] = ["Title", "Content", "Categories", "Created", "Pinned"];
const PINNED_MARKER: &str = "★";

/// A rendered export ready to be downloaded.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub filename: String,
    pub body: String,
}

impl ExportDocument {
    pub fn build(
        ideas: &[Idea],
        categories: &[Category],
        filter_label: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            filename: export_filename(generated_at),
            body: render_markdown(ideas, categories, filter_label, generated_at),
        }
    }

    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// `ideanest-ideas-YYYY-MM-DD-HHMM.md`
pub fn export_filename(at: DateTime<Utc>) -> String {
    format!("ideanest-ideas-{}.md", at.format("%Y-%m-%d-%H%M"))
}

/// Names of the idea's categories in category order. Unknown ids are skipped.
pub fn category_names(idea: &Idea, categories: &[Category]) -> String {
    categories
        .iter()
        .filter(|category| idea.has_category(&category.id))
        .map(|category| category.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_markdown(
    ideas: &[Idea],
    categories: &[Category],
    filter_label: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# {}", EXPORT_TITLE);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Generated on: {}",
        generated_at.format("%b %-d, %Y, %-I:%M:%S %p")
    );
    if let Some(label) = filter_label {
        let _ = writeln!(out);
        let _ = writeln!(out, "Filter: {}", label);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "| {} |", COLUMNS.join(" | "));
    let _ = writeln!(out, "|{}", "---|".repeat(COLUMNS.len()));

    for idea in ideas {
        let created = idea.created_at.format("%b %-d, %Y, %-I:%M %p").to_string();
        let pinned = if idea.is_pinned { PINNED_MARKER } else { "" };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            escape_cell(&idea.title),
            escape_cell(&idea.content),
            escape_cell(&category_names(idea, categories)),
            created,
            pinned
        );
    }

    out
}

fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
