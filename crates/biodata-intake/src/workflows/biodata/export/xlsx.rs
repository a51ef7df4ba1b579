use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use super::workbook::WorkbookLayout;
use super::RenderError;

/// Turns sheet layouts into workbook bytes.
pub trait WorkbookRenderer: Send + Sync {
    fn render(&self, layout: &WorkbookLayout) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

fn row_index(index: usize) -> Result<u32, RenderError> {
    u32::try_from(index).map_err(|_| RenderError::Layout(format!("row {index} out of range")))
}

fn column_index(index: usize) -> Result<u16, RenderError> {
    u16::try_from(index).map_err(|_| RenderError::Layout(format!("column {index} out of range")))
}

impl WorkbookRenderer for XlsxRenderer {
    fn render(&self, layout: &WorkbookLayout) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in &layout.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (column, label) in sheet.header.iter().enumerate() {
                worksheet.write_string_with_format(0, column_index(column)?, label, &header_format)?;
            }
            for (index, row) in sheet.rows.iter().enumerate() {
                let row_number = row_index(index + 1)?;
                for (column, value) in row.iter().enumerate() {
                    worksheet.write_string(row_number, column_index(column)?, value)?;
                }
            }
            if let Some(widths) = &sheet.column_widths {
                for (column, width) in widths.iter().enumerate() {
                    worksheet.set_column_width(column_index(column)?, *width)?;
                }
            }
            debug!(sheet = %sheet.name, rows = sheet.rows.len(), "worksheet written");
        }

        Ok(workbook.save_to_buffer()?)
    }
}
