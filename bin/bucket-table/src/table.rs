//! Text tables comparing bucketing schemes.

use std::{fmt, ops::RangeInclusive};

use anyhow::ensure;
use loghist::{Quantizer, QuantizerError, Scheme};

/// Largest number of rows a single table may hold.
pub const MAX_ROWS: u64 = 1_000_000;

/// A table of aligned text columns.
///
/// The first column is left-aligned, and every other column is right-aligned.
#[derive(Debug)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Returns the rows of the table, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = self.header.iter().map(String::len).collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (column, (cell, width)) in row.iter().zip(&widths).enumerate() {
                if column == 0 {
                    write!(f, "{:<width$}", cell, width = width)?;
                } else {
                    write!(f, "  {:>width$}", cell, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a table of the lower bound of every index in `indices` under each scheme.
pub fn bounds(
    quantizer: &Quantizer, schemes: &[Scheme], indices: RangeInclusive<i64>,
) -> Result<Table, QuantizerError> {
    let mut header = vec!["index".to_string()];
    header.extend(schemes.iter().map(Scheme::to_string));

    let mut table = Table::new(header);
    for index in indices {
        let mut row = vec![index.to_string()];
        for scheme in schemes {
            row.push(quantizer.mapping(*scheme).lower_bound(index)?.to_string());
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Builds a table of the bucket index and bucket range of each value under each scheme.
pub fn classify(quantizer: &Quantizer, schemes: &[Scheme], values: &[f64]) -> Result<Table, QuantizerError> {
    let mut header = vec!["value".to_string()];
    for scheme in schemes {
        header.push(format!("{} index", scheme));
        header.push(format!("{} bucket", scheme));
    }

    let mut table = Table::new(header);
    for value in values {
        let mut row = vec![value.to_string()];
        for scheme in schemes {
            let mapping = quantizer.mapping(*scheme);
            let range = mapping.bucket_bounds(*value)?;
            row.push(mapping.index(*value)?.to_string());
            row.push(format!("[{}, {})", range.start, range.end));
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Builds a table of the lower bound of the bucket holding each value under each scheme.
pub fn lower_bounds<I>(quantizer: &Quantizer, schemes: &[Scheme], values: I) -> Result<Table, QuantizerError>
where
    I: IntoIterator<Item = f64>,
{
    let mut header = vec!["value".to_string()];
    header.extend(schemes.iter().map(Scheme::to_string));

    let mut table = Table::new(header);
    for value in values {
        let mut row = vec![value.to_string()];
        for scheme in schemes {
            row.push(quantizer.mapping(*scheme).lower_bound_of(value)?.to_string());
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Returns the indices from `start` to `end`, inclusive.
///
/// # Errors
///
/// If `start` exceeds `end`, or the range holds more than [`MAX_ROWS`] indices, an error is returned.
pub fn indices(start: i64, end: i64) -> Result<RangeInclusive<i64>, anyhow::Error> {
    ensure!(start <= end, "Start index ({}) must not exceed end index ({}).", start, end);

    let rows = i128::from(end) - i128::from(start) + 1;
    ensure!(
        rows <= i128::from(MAX_ROWS),
        "Index range holds {} rows, more than the maximum of {}.",
        rows,
        MAX_ROWS
    );
    Ok(start..=end)
}

/// Returns the values from `start` to `end`, inclusive, `step` apart.
///
/// Values are computed as multiples of `step` from `start`, so rounding errors do not accumulate.
///
/// # Errors
///
/// If any argument is not finite, `step` is not positive, `start` exceeds `end`, or the range holds more than
/// [`MAX_ROWS`] values, an error is returned.
pub fn steps(start: f64, end: f64, step: f64) -> Result<impl Iterator<Item = f64>, anyhow::Error> {
    ensure!(
        start.is_finite() && end.is_finite() && start <= end,
        "Start value ({}) and end value ({}) must be finite, with start not exceeding end.",
        start,
        end
    );
    ensure!(step.is_finite() && step > 0.0, "Step ({}) must be finite and greater than 0.", step);

    // Slack keeps `end` itself in range when `(end - start) / step` rounds down to just below a whole number.
    let count = ((end - start) / step + 1.0e-9).floor();
    ensure!(
        count < MAX_ROWS as f64,
        "Value range holds more than the maximum of {} rows (step: {}).",
        MAX_ROWS,
        step
    );

    // The check above bounds `count`, so the conversion is exact.
    let count = count as u64;
    Ok((0..=count).map(move |k| start + k as f64 * step))
}
