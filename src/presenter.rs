use crate::error::ExportError;
use crate::event::{Fixture, OddsRow};
use crate::export::{self, ExportArtifact};
use tabled::{settings::Style, Table, Tabled};
use tracing::warn;

pub const NO_DATA_NOTICE: &str = "No player prop markets found for this game.";

/// What one render pass shows for a selected fixture.
#[derive(Debug)]
pub struct Presentation {
    pub caption: String,
    pub table: String,
    /// Set when there were no rows to show.
    pub notice: Option<&'static str>,
    /// Present only when there were rows to export.
    pub artifact: Option<ExportArtifact>,
    /// Export attempted but failed; the table is still valid.
    pub export_error: Option<ExportError>,
}

pub struct Presenter {
    sheet_name: String,
}

impl Presenter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    pub fn present(&self, fixture_name: &str, rows: &[OddsRow]) -> Presentation {
        let mut presentation = Presentation {
            caption: format!("{} - player odds ({} rows)", fixture_name, rows.len()),
            table: render_table(rows),
            notice: None,
            artifact: None,
            export_error: None,
        };

        if rows.is_empty() {
            presentation.notice = Some(NO_DATA_NOTICE);
            return presentation;
        }

        match export::build_artifact(fixture_name, rows, &self.sheet_name) {
            Ok(artifact) => presentation.artifact = Some(artifact),
            Err(e) => {
                warn!(fixture = %fixture_name, error = %e, "export failed");
                presentation.export_error = Some(e);
            }
        }
        presentation
    }
}

pub fn render_table(rows: &[OddsRow]) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}

#[derive(Tabled)]
struct FixtureLine<'a> {
    #[tabled(rename = "Game")]
    name: &'a str,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Event ID")]
    id: &'a str,
}

/// Table of fetched fixtures, in provider order.
pub fn render_fixtures(fixtures: &[Fixture]) -> String {
    let lines: Vec<FixtureLine> = fixtures
        .iter()
        .map(|f| FixtureLine {
            name: &f.name,
            start: f.start_label(),
            id: &f.id,
        })
        .collect();
    Table::new(lines).with(Style::modern()).to_string()
}
