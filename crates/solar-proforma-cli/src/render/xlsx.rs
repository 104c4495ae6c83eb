//! Rendering sink: writes a `WorkbookSpec` to an .xlsx file.
//!
//! All layout decisions live in the core's report assembler; this module
//! only maps cell values and presentation tags onto the xlsx writer.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;

use solar_proforma_core::report::{Cell, CellStyle, CellValue, NumberFormat, SheetSpec, WorkbookSpec};

const HEADER_FILL: Color = Color::RGB(0x1F4E78);
const SUBHEADER_FILL: Color = Color::RGB(0x4472C4);
const INPUT_FILL: Color = Color::RGB(0xE7E6E6);
const GRAND_TOTAL_FONT: Color = Color::RGB(0x006100);

// Title bar on the first row, data below a one-row gap, one column in
// from the narrow gutter column.
const DATA_START_ROW: u32 = 2;
const DATA_START_COL: u16 = 1;

pub fn write_workbook(spec: &WorkbookSpec, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    for sheet in &spec.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetSpec) -> Result<(), XlsxError> {
    for (col, width) in &sheet.column_widths {
        worksheet.set_column_width(*col, *width)?;
    }

    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center);
    worksheet.merge_range(
        0,
        DATA_START_COL,
        0,
        DATA_START_COL + sheet.title_span - 1,
        &sheet.title,
        &title_format,
    )?;

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_idx = DATA_START_ROW + i as u32;
        for (j, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_idx, DATA_START_COL + j as u16, cell)?;
        }
    }

    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    let format = cell_format(cell);

    match &cell.value {
        CellValue::Blank => {}
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, text, &format)?;
        }
        CellValue::Number(number) => {
            worksheet.write_number_with_format(
                row,
                col,
                number.to_f64().unwrap_or_default(),
                &format,
            )?;
        }
        CellValue::Integer(number) => {
            let format = format.set_align(FormatAlign::Center);
            worksheet.write_number_with_format(row, col, f64::from(*number), &format)?;
        }
    }

    Ok(())
}

fn cell_format(cell: &Cell) -> Format {
    let format = match cell.format {
        NumberFormat::General => Format::new(),
        NumberFormat::Currency => Format::new().set_num_format("$#,##0.00"),
        NumberFormat::UnitCost => Format::new().set_num_format("$0.00"),
        NumberFormat::RateFourDecimal => Format::new().set_num_format("$0.0000"),
        NumberFormat::Percent => Format::new().set_num_format("0.00%"),
        NumberFormat::WholeNumber => Format::new().set_num_format("#,##0"),
        NumberFormat::OneDecimal => Format::new().set_num_format("#,##0.0"),
    };

    match cell.style {
        CellStyle::Plain => format,
        CellStyle::SectionHeader => format
            .set_bold()
            .set_font_size(12)
            .set_font_color(Color::White)
            .set_background_color(HEADER_FILL),
        CellStyle::ColumnHeader => format
            .set_bold()
            .set_font_size(11)
            .set_font_color(Color::White)
            .set_background_color(SUBHEADER_FILL)
            .set_align(FormatAlign::Center)
            .set_text_wrap(),
        CellStyle::Bold => format.set_bold(),
        CellStyle::Input => format.set_bold().set_background_color(INPUT_FILL),
        CellStyle::GrandTotal => format
            .set_bold()
            .set_font_size(12)
            .set_font_color(GRAND_TOTAL_FONT),
    }
}
