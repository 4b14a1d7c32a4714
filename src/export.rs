use crate::error::ExportError;
use crate::event::{OddsRow, OddsValue};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const HEADER: [&str; 3] = ["Market", "Player", "Odds"];

/// Serialized spreadsheet offered for download after one render pass.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the buffer under `dir`, returning the path written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(disk_file_name(&self.file_name));
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote export");
        Ok(path)
    }
}

pub fn export_file_name(fixture_name: &str) -> String {
    format!("{}_player_odds.xlsx", fixture_name)
}

// Fixture names like "Team A / Team B" must not turn into directories.
fn disk_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// One sheet, a bold header row, then one spreadsheet row per odds row.
pub fn to_xlsx(rows: &[OddsRow], sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name)?;

        for (col, title) in HEADER.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &bold)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_string(r, 0, &row.market)?;
            sheet.write_string(r, 1, &row.player)?;
            match &row.odds {
                OddsValue::Number(n) => match n.as_f64() {
                    Some(value) => {
                        sheet.write_number(r, 2, value)?;
                    }
                    None => {
                        sheet.write_string(r, 2, n.to_string())?;
                    }
                },
                OddsValue::Text(s) => {
                    sheet.write_string(r, 2, s)?;
                }
            }
        }

        sheet.set_column_width(0, 32)?;
        sheet.set_column_width(1, 28)?;
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn build_artifact(
    fixture_name: &str,
    rows: &[OddsRow],
    sheet_name: &str,
) -> Result<ExportArtifact, ExportError> {
    Ok(ExportArtifact {
        file_name: export_file_name(fixture_name),
        mime_type: XLSX_MIME_TYPE,
        bytes: to_xlsx(rows, sheet_name)?,
    })
}
