//! Monthly series model and CSV loading
//!
//! The series is parsed once and never mutated afterwards. Rows keep the order
//! they have in the file.

use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::config::ColumnNames;
use crate::error::SeriesError;

/// Display format for a month label
pub const MONTH_LABEL_FORMAT: &str = "%Y-%m";

/// One record of the series: a month (day fixed to 1) and its rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub month: NaiveDate,
    pub rate: f64,
}

impl Observation {
    pub fn new(month: NaiveDate, rate: f64) -> Self {
        Self { month, rate }
    }

    /// Month formatted as `YYYY-MM`
    pub fn label(&self) -> String {
        self.month.format(MONTH_LABEL_FORMAT).to_string()
    }
}

/// Ordered, immutable series of observations
///
/// Cloning is cheap: rows are shared.
#[derive(Debug, Clone)]
pub struct Series {
    rows: Arc<[Observation]>,
}

impl Series {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows: rows.into() }
    }

    /// Load a series from a CSV file on disk
    pub fn load(path: &Path, columns: &ColumnNames) -> Result<Self, SeriesError> {
        let file = File::open(path).map_err(|source| SeriesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let series = Self::from_reader(file, columns)?;
        tracing::info!(
            path = %path.display(),
            records = series.len(),
            "Loaded series"
        );
        Ok(series)
    }

    /// Parse a series from any CSV source with a header row
    ///
    /// Every row must have a parseable month and a finite rate; the first bad
    /// row fails the whole load.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnNames) -> Result<Self, SeriesError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let date_idx = column_index(&headers, &columns.date)?;
        let rate_idx = column_index(&headers, &columns.rate)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(parse_record(&record, date_idx, rate_idx, line)?);
        }

        if rows.is_empty() {
            return Err(SeriesError::Empty);
        }

        Ok(Self::new(rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.rows.get(index)
    }

    /// Rows in `range`, clipped to the series length
    pub fn slice(&self, range: Range<usize>) -> &[Observation] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.rows.iter()
    }

    /// Largest rate in the series, or 0.0 when empty (upper bound of the x domain)
    pub fn max_rate(&self) -> f64 {
        self.rows.iter().map(|o| o.rate).fold(0.0, f64::max)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, SeriesError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| SeriesError::MissingColumn(name.to_string()))
}

fn parse_record(
    record: &StringRecord,
    date_idx: usize,
    rate_idx: usize,
    line: u64,
) -> Result<Observation, SeriesError> {
    let malformed = |reason: String| SeriesError::MalformedRecord { line, reason };

    let raw_date = record
        .get(date_idx)
        .ok_or_else(|| malformed("missing date field".to_string()))?;
    let month = parse_year_month(raw_date).map_err(malformed)?;

    let raw_rate = record
        .get(rate_idx)
        .ok_or_else(|| malformed("missing rate field".to_string()))?;
    let rate: f64 = raw_rate
        .parse()
        .map_err(|_| malformed(format!("invalid rate '{raw_rate}'")))?;
    if !rate.is_finite() {
        return Err(malformed(format!("rate '{raw_rate}' is not finite")));
    }

    Ok(Observation::new(month, rate))
}

/// Parse `YYYY-M` or `YYYY-MM` into the first day of that month
pub fn parse_year_month(raw: &str) -> Result<NaiveDate, String> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| format!("invalid month '{raw}', expected YYYY-MM"))?;

    let year: i32 = year
        .parse()
        .map_err(|_| format!("invalid year in '{raw}'"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("invalid month in '{raw}'"))?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| format!("month out of range in '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "yearAndMonth,Unemployment Level,Unemployment Rate (in percentage)\n";

    fn load(body: &str) -> Result<Series, SeriesError> {
        let csv = format!("{HEADER}{body}");
        Series::from_reader(csv.as_bytes(), &ColumnNames::default())
    }

    #[test]
    fn test_parse_year_month_single_and_double_digit() {
        assert_eq!(
            parse_year_month("2020-3").unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
        );
        assert_eq!(
            parse_year_month("1999-12").unwrap(),
            NaiveDate::from_ymd_opt(1999, 12, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_year_month_rejects_garbage() {
        assert!(parse_year_month("2020").is_err());
        assert!(parse_year_month("2020-13").is_err());
        assert!(parse_year_month("2020-0").is_err());
        assert!(parse_year_month("abcd-01").is_err());
        assert!(parse_year_month("2020-01-15").is_err());
    }

    #[test]
    fn test_load_keeps_file_order() {
        let series = load("2020-1,5000,3.5\n2020-2,5100,3.6\n2019-12,4900,3.4\n").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(0).unwrap().label(), "2020-01");
        assert_eq!(series.get(2).unwrap().label(), "2019-12");
        assert_eq!(series.get(1).unwrap().rate, 3.6);
    }

    #[test]
    fn test_load_trims_whitespace() {
        let csv = " yearAndMonth , Unemployment Rate (in percentage) \n 2021-07 , 5.4 \n";
        let series = Series::from_reader(csv.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(series.get(0).unwrap().rate, 5.4);
    }

    #[test]
    fn test_load_rejects_bad_rate() {
        let err = load("2020-1,5000,3.5\n2020-2,5100,n/a\n").unwrap_err();
        match err {
            SeriesError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("n/a"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_empty_rate_and_nan() {
        assert!(matches!(
            load("2020-1,5000,\n").unwrap_err(),
            SeriesError::MalformedRecord { .. }
        ));
        assert!(matches!(
            load("2020-1,5000,NaN\n").unwrap_err(),
            SeriesError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let err = load("2020/01,5000,3.5\n").unwrap_err();
        assert!(matches!(err, SeriesError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_column() {
        let csv = "month,rate\n2020-1,3.5\n";
        let err = Series::from_reader(csv.as_bytes(), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn(ref c) if c == "yearAndMonth"));
    }

    #[test]
    fn test_load_custom_columns() {
        let csv = "month,rate\n2020-1,3.5\n";
        let columns = ColumnNames {
            date: "month".to_string(),
            rate: "rate".to_string(),
        };
        let series = Series::from_reader(csv.as_bytes(), &columns).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_load_empty_file() {
        assert!(matches!(load("").unwrap_err(), SeriesError::Empty));
    }

    #[test]
    fn test_slice_and_max_rate() {
        let series = load("2020-1,0,3.5\n2020-2,0,14.7\n2020-3,0,8.0\n").unwrap();
        assert_eq!(series.max_rate(), 14.7);
        assert_eq!(series.slice(1..3).len(), 2);
        assert_eq!(series.slice(2..10).len(), 1);
        assert!(series.slice(5..10).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}2020-1,5000,3.5").unwrap();
        let series = Series::load(file.path(), &ColumnNames::default()).unwrap();
        assert_eq!(series.len(), 1);

        let missing = Series::load(Path::new("/nonexistent/rates.csv"), &ColumnNames::default());
        assert!(matches!(missing, Err(SeriesError::Io { .. })));
    }
}
