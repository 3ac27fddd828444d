//! Non-interactive commands. Each writes plain text to the given writer.

use std::io::Write;

use clap::ValueEnum;
use color_eyre::eyre::WrapErr;
use hdsaviz_core::{Order, SensitivityResultSet, TableSource, combine, read_table, select_bars};

use crate::config::BarSettings;
use crate::dataset::Dataset;
use crate::util::format::{format_optional_index, format_with_conf};

/// Rows shown by `inspect` after the header
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderArg {
    First,
    #[default]
    Total,
}

impl From<OrderArg> for Order {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::First => Order::First,
            OrderArg::Total => Order::Total,
        }
    }
}

/// Ranked bars for every output, under the configured filter.
pub fn run_summary(
    dataset: &Dataset,
    bars: &BarSettings,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let results = &dataset.results;
    writeln!(out, "{} output measures", results.len())?;
    if let Some(params) = &dataset.params {
        writeln!(
            out,
            "input parameters: {} rows, {} columns",
            params.len(),
            params.columns().len()
        )?;
    }
    if let Some(model_results) = &dataset.model_results {
        writeln!(
            out,
            "model results: {} rows, {} columns",
            model_results.len(),
            model_results.columns().len()
        )?;
    }

    let filter = bars.filter();
    for (name, entry) in results.iter() {
        let second = match &entry.second_order {
            Some(table) => format!("{} pairs", table.len()),
            None => "no second order".to_string(),
        };
        writeln!(
            out,
            "\n{name}: {} parameters, {second}",
            entry.first_order.len()
        )?;

        let rows = select_bars(&entry.first_order, &filter);
        if rows.is_empty() {
            writeln!(out, "  (nothing above {})", filter.min_value)?;
        }
        for row in rows {
            let mark = if row.highlighted { "*" } else { " " };
            writeln!(
                out,
                " {mark}{:<16} S1 {:<16} ST {}",
                row.parameter,
                format_with_conf(row.s1, row.s1_conf),
                row.st
                    .map(|st| format_with_conf(st, row.st_conf))
                    .unwrap_or_else(|| format_optional_index(None)),
            )?;
        }
    }
    Ok(())
}

/// Parameters with a zero index in every output.
pub fn run_unused(
    results: &SensitivityResultSet,
    order: Order,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let combined = combine(results, order);
    let unused = combined.unused_parameters();
    writeln!(
        out,
        "{}: {} of {} parameters are zero for all {} outputs",
        order.display_name(),
        unused.len(),
        combined.parameters().len(),
        combined.outputs().len()
    )?;
    for name in unused {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

/// Shape, columns and first rows of a delimited file.
pub fn run_inspect(source: &TableSource, out: &mut impl Write) -> color_eyre::Result<()> {
    let path = source.path.as_path();
    let options = source.read_options()?;
    let table = read_table(path, &options)
        .wrap_err_with(|| format!("Failed to inspect {}", path.display()))?;

    writeln!(
        out,
        "{}: {} rows x {} columns",
        path.display(),
        table.len(),
        table.columns().len()
    )?;
    writeln!(out, "columns: {}", table.columns().join(", "))?;
    for row in table.rows().iter().take(PREVIEW_ROWS) {
        writeln!(out, "  {}", row.join(" | "))?;
    }
    if table.len() > PREVIEW_ROWS {
        writeln!(out, "  ... {} more", table.len() - PREVIEW_ROWS)?;
    }
    Ok(())
}
