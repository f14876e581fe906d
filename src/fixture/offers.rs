//! Synthetic offer dataset used as a CSV fixture.
//!
//! The dataset is 30 rows of eleven columns, each column built from a short
//! repeating pattern. Columns are assembled as an explicit ordered list of
//! `(name, values)` pairs and transposed into rows.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::error::FixtureError;

/// Header names in output order.
pub const OFFER_COLUMNS: [&str; 11] = [
    "OfferId",
    "CustomerId",
    "ProductId",
    "ProductRelevance",
    "OfferRelevance",
    "BannerCode",
    "Region",
    "Store",
    "Sponsored",
    "StartDate",
    "EndDate",
];

/// Number of data rows.
pub const OFFER_ROWS: usize = 30;

const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A named column of already-formatted values.
pub type Column = (&'static str, Vec<String>);

fn repeat<T: ToString>(value: T, times: usize) -> Vec<String> {
    vec![value.to_string(); times]
}

fn cycle<T: ToString>(pattern: &[T], times: usize) -> Vec<String> {
    pattern
        .iter()
        .map(ToString::to_string)
        .cycle()
        .take(pattern.len() * times)
        .collect()
}

fn concat(parts: Vec<Vec<String>>) -> Vec<String> {
    parts.into_iter().flatten().collect()
}

fn offer_window() -> Result<(NaiveDateTime, NaiveDateTime), FixtureError> {
    let start = NaiveDate::from_ymd_opt(2020, 5, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FixtureError::InvalidDate("2020-05-01 00:00:00".into()))?;
    // One year, one month and a day, less one second.
    let end = start + Duration::days(365 + 31 + 1) - Duration::seconds(1);
    Ok((start, end))
}

/// Builds every column of the offer dataset, in header order.
pub fn offer_columns() -> Result<Vec<Column>, FixtureError> {
    let (start, end) = offer_window()?;
    let relevance: Vec<f64> = (1..=5).map(|x| f64::from(x) / 100.0).collect();

    Ok(vec![
        ("OfferId", concat(vec![repeat(9000, 15), repeat(9001, 15)])),
        (
            "CustomerId",
            concat(vec![repeat(format!("{:06}", 1), 15), repeat(format!("{:06}", 2), 15)]),
        ),
        ("ProductId", cycle(&[10_000, 10_001, 10_002, 10_003, 10_004], 6)),
        ("ProductRelevance", cycle(relevance.as_slice(), 6)),
        ("OfferRelevance", repeat(0.25, OFFER_ROWS)),
        (
            "BannerCode",
            cycle(
                concat(vec![repeat(5000, 5), repeat(5001, 5), repeat(5002, 5)]).as_slice(),
                2,
            ),
        ),
        (
            "Region",
            concat(vec![repeat(6000, 5), repeat(6001, 5), repeat(6000, 20)]),
        ),
        (
            "Store",
            concat(vec![repeat(7000, 5), repeat(7001, 5), repeat(7000, 20)]),
        ),
        ("Sponsored", repeat(0, OFFER_ROWS)),
        ("StartDate", repeat(start.format(DATE_FORMAT), OFFER_ROWS)),
        ("EndDate", repeat(end.format(DATE_FORMAT), OFFER_ROWS)),
    ])
}

/// Turns a list of equally long columns into rows.
///
/// # Errors
/// `FixtureError::ColumnLength` if any column differs in length from the first.
pub fn transpose(columns: &[Column]) -> Result<Vec<Vec<&str>>, FixtureError> {
    let expected = columns.first().map_or(0, |(_, values)| values.len());
    if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != expected) {
        return Err(FixtureError::ColumnLength {
            column: name.to_string(),
            expected,
            actual: values.len(),
        });
    }

    Ok((0..expected)
        .map(|row| columns.iter().map(|(_, values)| values[row].as_str()).collect())
        .collect())
}

/// Renders the offer dataset as comma-separated text, one row per line.
pub fn render_offers_csv(include_header: bool) -> Result<String, FixtureError> {
    let columns = offer_columns()?;
    let rows = transpose(&columns)?;

    let mut out = String::new();
    if include_header {
        out.push_str(&OFFER_COLUMNS.join(","));
        out.push('\n');
    }
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_header_order() {
        let columns = offer_columns().unwrap();
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, OFFER_COLUMNS.to_vec());
        assert!(columns.iter().all(|(_, values)| values.len() == OFFER_ROWS));
    }

    #[test]
    fn csv_has_header_and_thirty_rows() {
        let csv = render_offers_csv(true).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), OFFER_ROWS + 1);
        assert_eq!(
            lines[0],
            "OfferId,CustomerId,ProductId,ProductRelevance,OfferRelevance,BannerCode,Region,Store,Sponsored,StartDate,EndDate"
        );
        assert!(lines[1..].iter().all(|l| l.split(',').count() == 11));
    }

    #[test]
    fn rows_match_patterns() {
        let csv = render_offers_csv(false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), OFFER_ROWS);
        assert_eq!(
            lines[0],
            "9000,000001,10000,0.01,0.25,5000,6000,7000,0,2020/05/01 00:00:00,2021/06/01 23:59:59"
        );
        assert_eq!(
            lines[7],
            "9000,000001,10002,0.03,0.25,5001,6001,7001,0,2020/05/01 00:00:00,2021/06/01 23:59:59"
        );
        assert_eq!(
            lines[29],
            "9001,000002,10004,0.05,0.25,5002,6000,7000,0,2020/05/01 00:00:00,2021/06/01 23:59:59"
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let columns: Vec<Column> = vec![("a", repeat(1, 3)), ("b", repeat(2, 2))];
        assert_eq!(
            transpose(&columns),
            Err(FixtureError::ColumnLength {
                column: "b".into(),
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn no_columns_means_no_rows() {
        assert!(transpose(&[]).unwrap().is_empty());
    }
}
