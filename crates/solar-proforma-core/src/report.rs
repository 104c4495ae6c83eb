use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::proforma::ProFormaOutput;

// ---------------------------------------------------------------------------
// Workbook description
// ---------------------------------------------------------------------------
//
// The engine describes the finished workbook as data; a rendering sink owns
// fonts, fills, merging, and file output.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(Decimal),
    Integer(u32),
}

/// Emphasis applied by the rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStyle {
    Plain,
    /// Dark banner introducing a section
    SectionHeader,
    /// Lighter banner naming the columns beneath it
    ColumnHeader,
    Bold,
    /// Shaded user-supplied value
    Input,
    /// The headline figure of the summary sheet
    GrandTotal,
}

/// Number format applied by the rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    General,
    /// $#,##0.00
    Currency,
    /// $0.00
    UnitCost,
    /// $0.0000
    RateFourDecimal,
    /// 0.00%
    Percent,
    /// #,##0
    WholeNumber,
    /// #,##0.0
    OneDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    pub format: NumberFormat,
}

impl Cell {
    pub fn blank() -> Self {
        Cell {
            value: CellValue::Blank,
            style: CellStyle::Plain,
            format: NumberFormat::General,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Cell {
            value: CellValue::Text(text.into()),
            style: CellStyle::Plain,
            format: NumberFormat::General,
        }
    }

    pub fn styled_text(text: impl Into<String>, style: CellStyle) -> Self {
        Cell {
            value: CellValue::Text(text.into()),
            style,
            format: NumberFormat::General,
        }
    }

    pub fn number(value: Decimal, format: NumberFormat) -> Self {
        Cell {
            value: CellValue::Number(value),
            style: CellStyle::Plain,
            format,
        }
    }

    pub fn styled_number(value: Decimal, format: NumberFormat, style: CellStyle) -> Self {
        Cell {
            value: CellValue::Number(value),
            style,
            format,
        }
    }

    pub fn integer(value: u32) -> Self {
        Cell {
            value: CellValue::Integer(value),
            style: CellStyle::Plain,
            format: NumberFormat::General,
        }
    }
}

/// A single worksheet: tab name, title bar, column widths, and rows.
/// Rows begin one row below the title gap and one column in from the
/// left gutter; the sink owns the exact placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub title: String,
    /// Number of data columns the title bar spans
    pub title_span: u16,
    /// (zero-based column index, width) pairs
    pub column_widths: Vec<(u16, f64)>,
    pub rows: Vec<Vec<Cell>>,
}

/// Finished workbook description: the sole input to a rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookSpec {
    pub filename: String,
    pub sheets: Vec<SheetSpec>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Artifact filename: `{customer}_{project}_ProForma.xlsx`, spaces replaced
/// with underscores.
pub fn artifact_filename(customer_name: &str, project_name: &str) -> String {
    format!(
        "{}_{}_ProForma.xlsx",
        customer_name.replace(' ', "_"),
        project_name.replace(' ', "_")
    )
}

/// Package the pro-forma into the three-sheet workbook description:
/// inputs and assumptions, the 25-year cash flow, and the client summary.
pub fn assemble_workbook(output: &ProFormaOutput, generated_on: Option<NaiveDate>) -> WorkbookSpec {
    WorkbookSpec {
        filename: artifact_filename(&output.inputs.customer_name, &output.inputs.project_name),
        sheets: vec![
            inputs_sheet(output),
            cash_flow_sheet(output),
            summary_sheet(output, generated_on),
        ],
    }
}

fn project_title(output: &ProFormaOutput, subject: &str) -> String {
    format!(
        "{} - {} - {}",
        output.inputs.customer_name, output.inputs.project_name, subject
    )
}

fn section(rows: &mut Vec<Vec<Cell>>, heading: &str) {
    if !rows.is_empty() {
        rows.push(vec![]);
    }
    rows.push(vec![Cell::styled_text(heading, CellStyle::SectionHeader)]);
}

fn column_headers(rows: &mut Vec<Vec<Cell>>, headers: &[&str]) {
    rows.push(
        headers
            .iter()
            .map(|h| Cell::styled_text(*h, CellStyle::ColumnHeader))
            .collect(),
    );
}

fn inputs_sheet(output: &ProFormaOutput) -> SheetSpec {
    let inputs = &output.inputs;
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    section(&mut rows, "TOGGLE SETTINGS");
    column_headers(&mut rows, &["Setting", "Value", "Unit", "Notes"]);
    let itc_label = if inputs.itc_enabled {
        "With ITC (30%)"
    } else {
        "Without ITC"
    };
    rows.push(vec![
        Cell::text("ITC Status"),
        Cell::styled_text(itc_label, CellStyle::Input),
    ]);
    rows.push(vec![
        Cell::text("SREC Program"),
        Cell::styled_text(inputs.srec_program.to_string(), CellStyle::Input),
        Cell::blank(),
        Cell::text(inputs.jurisdiction.to_string()),
    ]);
    rows.push(vec![
        Cell::text("Utility Company"),
        Cell::styled_text(inputs.utility.to_string(), CellStyle::Input),
    ]);
    rows.push(vec![
        Cell::text("Escalation Rate"),
        Cell::styled_number(inputs.escalation.rate(), NumberFormat::Percent, CellStyle::Input),
    ]);

    section(&mut rows, "PROJECT INPUTS");
    column_headers(&mut rows, &["Input", "Value", "Unit"]);
    rows.push(vec![
        Cell::text("Customer Name"),
        Cell::text(inputs.customer_name.as_str()),
    ]);
    rows.push(vec![
        Cell::text("Project Name"),
        Cell::text(inputs.project_name.as_str()),
    ]);
    rows.push(vec![
        Cell::text("System Size"),
        Cell::number(inputs.system_size_kw, NumberFormat::General),
        Cell::text("kW"),
    ]);
    rows.push(vec![
        Cell::text("Total System Cost"),
        Cell::number(output.pricing.total_cost, NumberFormat::Currency),
        Cell::text("$"),
    ]);
    rows.push(vec![
        Cell::text("Cost per Watt"),
        Cell::number(output.pricing.total_unit_cost, NumberFormat::UnitCost),
        Cell::text("$/W"),
    ]);
    rows.push(vec![
        Cell::text("TSRF"),
        Cell::number(inputs.tsrf, NumberFormat::WholeNumber),
    ]);
    rows.push(vec![
        Cell::text("Electric Rate"),
        Cell::number(inputs.electric_rate, NumberFormat::RateFourDecimal),
        Cell::text("$/kWh"),
    ]);
    rows.push(vec![
        Cell::text("Tax Bracket"),
        Cell::number(inputs.tax_bracket, NumberFormat::Percent),
    ]);
    rows.push(vec![
        Cell::text("Panel Degradation"),
        Cell::number(inputs.degradation_rate, NumberFormat::Percent),
        Cell::text("per year"),
    ]);

    section(&mut rows, "COST BREAKDOWN");
    column_headers(&mut rows, &["Category", "$/W", "Total ($)"]);
    for line in &output.pricing.line_items {
        rows.push(vec![
            Cell::text(line.category.label()),
            Cell::number(line.unit_cost, NumberFormat::UnitCost),
            Cell::number(line.total, NumberFormat::Currency),
        ]);
    }
    rows.push(vec![
        Cell::styled_text("TOTAL PROJECT COST", CellStyle::Bold),
        Cell::styled_number(
            output.pricing.total_unit_cost,
            NumberFormat::UnitCost,
            CellStyle::Bold,
        ),
        Cell::styled_number(output.pricing.total_cost, NumberFormat::Currency, CellStyle::Bold),
    ]);

    SheetSpec {
        name: "Inputs & Assumptions".into(),
        title: project_title(output, "Pro-Forma Inputs"),
        title_span: 4,
        column_widths: vec![(0, 3.0), (1, 35.0), (2, 20.0), (3, 15.0), (4, 30.0)],
        rows,
    }
}

fn cash_flow_sheet(output: &ProFormaOutput) -> SheetSpec {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    column_headers(
        &mut rows,
        &[
            "Year",
            "Electric Rate",
            "Production",
            "Electric Savings",
            "SREC Value",
            "SRECs",
            "SREC Income",
            "Tax Savings",
            "Total Benefit",
            "Cumulative",
        ],
    );

    for record in &output.projection.years {
        rows.push(vec![
            Cell::integer(record.year),
            Cell::number(record.electric_rate, NumberFormat::RateFourDecimal),
            Cell::number(record.production_kwh, NumberFormat::WholeNumber),
            Cell::number(record.electric_savings, NumberFormat::Currency),
            Cell::number(record.srec_unit_value, NumberFormat::Currency),
            Cell::number(record.srec_count, NumberFormat::OneDecimal),
            Cell::number(record.srec_income, NumberFormat::Currency),
            Cell::number(record.tax_savings, NumberFormat::Currency),
            Cell::styled_number(record.total_benefit, NumberFormat::Currency, CellStyle::Bold),
            Cell::number(record.cumulative_benefit, NumberFormat::Currency),
        ]);
    }

    let mut column_widths: Vec<(u16, f64)> = vec![(0, 3.0), (1, 8.0)];
    for col in 2..=10 {
        column_widths.push((col, 14.0));
    }

    SheetSpec {
        name: "25-Year Cash Flow".into(),
        title: project_title(output, "25-Year Cash Flow"),
        title_span: 10,
        column_widths,
        rows,
    }
}

fn summary_sheet(output: &ProFormaOutput, generated_on: Option<NaiveDate>) -> SheetSpec {
    let inputs = &output.inputs;
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    section(&mut rows, "PROJECT OVERVIEW");
    rows.push(vec![
        Cell::text("Customer"),
        Cell::text(inputs.customer_name.as_str()),
    ]);
    rows.push(vec![
        Cell::text("Project"),
        Cell::text(inputs.project_name.as_str()),
    ]);
    rows.push(vec![
        Cell::text("System Size"),
        Cell::number(inputs.system_size_kw, NumberFormat::General),
        Cell::text("kW"),
    ]);
    rows.push(vec![
        Cell::text("Total Cost"),
        Cell::number(output.pricing.total_cost, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("Federal Tax Credit"),
        Cell::number(output.incentives.itc_amount, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("After-ITC Cost"),
        Cell::number(output.incentives.after_itc_cost, NumberFormat::Currency),
    ]);

    section(&mut rows, "KEY METRICS");
    rows.push(vec![
        Cell::text("Year 1 Production"),
        Cell::number(output.year_one.production_kwh, NumberFormat::WholeNumber),
        Cell::text("kWh"),
    ]);
    rows.push(vec![
        Cell::text("Year 1 Electric Savings"),
        Cell::number(output.year_one.electric_savings, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("Year 1 SREC Income"),
        Cell::number(output.year_one.srec_income, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("Year 1 Total Benefit"),
        Cell::number(output.year_one.total_benefit, NumberFormat::Currency),
    ]);
    match output.year_one.simple_payback_years {
        Some(payback) => rows.push(vec![
            Cell::text("Simple Payback"),
            Cell::number(payback.round_dp(1), NumberFormat::OneDecimal),
            Cell::text("years"),
        ]),
        None => rows.push(vec![
            Cell::text("Simple Payback"),
            Cell::text("Not computable"),
        ]),
    }

    section(&mut rows, "25-YEAR TOTALS");
    rows.push(vec![
        Cell::text("Total Electric Savings"),
        Cell::number(output.projection.totals.electric_savings, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("Total SREC Income"),
        Cell::number(output.projection.totals.srec_income, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::text("Total Tax Benefits"),
        Cell::number(output.projection.totals.tax_savings, NumberFormat::Currency),
    ]);
    rows.push(vec![
        Cell::styled_text("GRAND TOTAL BENEFITS", CellStyle::GrandTotal),
        Cell::styled_number(
            output.projection.totals.grand_total_benefit,
            NumberFormat::Currency,
            CellStyle::GrandTotal,
        ),
    ]);

    if let Some(date) = generated_on {
        rows.push(vec![]);
        rows.push(vec![
            Cell::text("Prepared"),
            Cell::text(date.format("%B %d, %Y").to_string()),
        ]);
    }

    SheetSpec {
        name: "Client Summary".into(),
        title: project_title(output, "Client Summary"),
        title_span: 3,
        column_widths: vec![(0, 3.0), (1, 35.0), (2, 20.0), (3, 15.0)],
        rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proforma::tests::{reference_schedule, standard_inputs};
    use crate::proforma::generate_pro_forma;
    use pretty_assertions::assert_eq;

    fn standard_workbook() -> WorkbookSpec {
        let result = generate_pro_forma(&standard_inputs(), &reference_schedule()).unwrap();
        assemble_workbook(&result.result, None)
    }

    #[test]
    fn test_filename_convention() {
        assert_eq!(
            artifact_filename("Acme Corp", "North Roof"),
            "Acme_Corp_North_Roof_ProForma.xlsx"
        );
        assert_eq!(artifact_filename("NDMU", "Notre Dame MD"), "NDMU_Notre_Dame_MD_ProForma.xlsx");
    }

    #[test]
    fn test_three_sheets_in_order() {
        let workbook = standard_workbook();
        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Inputs & Assumptions", "25-Year Cash Flow", "Client Summary"]
        );
    }

    #[test]
    fn test_cash_flow_sheet_shape() {
        let workbook = standard_workbook();
        let sheet = &workbook.sheets[1];

        // One header row plus 25 year rows, ten columns each
        assert_eq!(sheet.rows.len(), 26);
        for row in &sheet.rows {
            assert_eq!(row.len(), 10);
        }
        assert_eq!(sheet.rows[1][0].value, CellValue::Integer(1));
        assert_eq!(sheet.rows[25][0].value, CellValue::Integer(25));
    }

    #[test]
    fn test_inputs_sheet_carries_cost_breakdown() {
        let workbook = standard_workbook();
        let sheet = &workbook.sheets[0];

        let category_rows = sheet
            .rows
            .iter()
            .filter(|row| {
                row.len() == 3
                    && matches!(row[1].format, NumberFormat::UnitCost)
                    && matches!(row[2].format, NumberFormat::Currency)
                    && row[1].style == CellStyle::Plain
            })
            .count();
        assert_eq!(category_rows, 17, "one breakdown row per cost category");

        let has_total = sheet.rows.iter().any(|row| {
            matches!(row.first(), Some(Cell { value: CellValue::Text(t), .. }) if t == "TOTAL PROJECT COST")
        });
        assert!(has_total);
    }

    #[test]
    fn test_summary_sheet_grand_total() {
        let workbook = standard_workbook();
        let sheet = &workbook.sheets[2];

        let grand_total = sheet
            .rows
            .iter()
            .find(|row| {
                matches!(row.first(), Some(Cell { value: CellValue::Text(t), .. }) if t == "GRAND TOTAL BENEFITS")
            })
            .expect("summary sheet should carry the grand total row");
        assert_eq!(grand_total[1].style, CellStyle::GrandTotal);
        assert_eq!(grand_total[1].format, NumberFormat::Currency);
    }

    #[test]
    fn test_prepared_date_is_optional() {
        let result = generate_pro_forma(&standard_inputs(), &reference_schedule()).unwrap();

        let undated = assemble_workbook(&result.result, None);
        let dated = assemble_workbook(
            &result.result,
            Some(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()),
        );

        let last = |wb: &WorkbookSpec| wb.sheets[2].rows.last().cloned().unwrap();
        assert_ne!(last(&undated), last(&dated));
        assert_eq!(
            last(&dated)[1].value,
            CellValue::Text("August 07, 2026".into())
        );
    }
}
