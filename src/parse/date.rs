use chrono::{Datelike, Local, NaiveDate, TimeZone};
use regex::Regex;

/// A date recovered from free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: String,
    /// Epoch milliseconds, local midnight of the recovered date
    pub timestamp: i64,
}

/// Four-digit year in the supported range (1900–2099)
pub fn is_valid_year(s: &str) -> bool {
    Regex::new(r"^(19|20)\d{2}$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

/// Epoch millis for January 1 of `year`, local midnight
pub fn year_start_timestamp(year: i32) -> Option<i64> {
    Local
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// Try to recover a date from arbitrary text.
///
/// Patterns, most specific first: a month-name + year phrase, then a numeric
/// date (`MM/DD/YYYY`, `DD/MM/YYYY` or `YYYY-MM-DD`, year 1900–2100), then a
/// bare 4-digit year (1900–2099). A year inside "March 2021" or "03/15/2021"
/// is not bare, so those phrases resolve to their own month or day rather
/// than January 1.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    month_year(text)
        .or_else(|| numeric_date(text))
        .or_else(|| bare_year(text))
}

const MONTH_PATTERN: &str = "January|February|March|April|May|June|July|August|September|\
                             October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

fn month_year(text: &str) -> Option<ParsedDate> {
    let re = Regex::new(&format!(r"(?i)\b({})\s+((19|20)\d{{2}})\b", MONTH_PATTERN)).ok()?;
    let caps = re.captures(text)?;
    let month = month_number(caps.get(1)?.as_str())?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(ParsedDate {
        year: year.to_string(),
        timestamp: local_midnight_millis(date)?,
    })
}

fn numeric_date(text: &str) -> Option<ParsedDate> {
    let re = Regex::new(r"\b\d{1,4}[-/]\d{1,2}[-/]\d{2,4}\b").ok()?;
    let raw = re.find(text)?.as_str();
    for format in ["%m/%d/%Y", "%d/%m/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format)
            && (1900..=2100).contains(&date.year())
        {
            return Some(ParsedDate {
                year: date.year().to_string(),
                timestamp: local_midnight_millis(date)?,
            });
        }
    }
    None
}

fn bare_year(text: &str) -> Option<ParsedDate> {
    let re = Regex::new(r"\b((19|20)\d{2})\b").ok()?;
    let year: i32 = re.captures(text)?.get(1)?.as_str().parse().ok()?;
    Some(ParsedDate {
        year: year.to_string(),
        timestamp: year_start_timestamp(year)?,
    })
}

fn month_number(name: &str) -> Option<u32> {
    const PREFIXES: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_ascii_lowercase();
    PREFIXES
        .iter()
        .position(|p| lower.starts_with(p))
        .map(|i| i as u32 + 1)
}

fn local_midnight_millis(date: NaiveDate) -> Option<i64> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
