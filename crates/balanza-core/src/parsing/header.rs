use crate::error::BalanzaError;
use crate::layout::schema::MonthLanguage;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `31 DE DICIEMBRE DE 2019`; English titles use `OF` or the same `DE`.
static DAY_MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s+(?:DE|OF)\s+([A-Za-z]+),?\s+(?:DE\s+)?(\d{4})\b")
        .expect("title date pattern is valid")
});

/// `DECEMBER 31, 2019`
static MONTH_DAY_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})\b").expect("title date pattern is valid")
});

/// Extract the publication date from the sheet title line.
pub fn parse_publication_date(
    title: &str,
    language: MonthLanguage,
) -> Result<NaiveDate, BalanzaError> {
    let (day, month, year) = match language {
        MonthLanguage::Spanish => spanish_parts(title),
        MonthLanguage::English => english_parts(title),
    }
    .ok_or_else(|| unparsable(title, "no '<day> DE <month> DE <year>' date found"))?;

    let month_number = month_number(&month, language)
        .ok_or_else(|| unparsable(title, &format!("unknown month '{}'", month)))?;

    NaiveDate::from_ymd_opt(year, month_number, day)
        .ok_or_else(|| unparsable(title, &format!("{year}-{month_number}-{day} is not a calendar date")))
}

fn spanish_parts(title: &str) -> Option<(u32, String, i32)> {
    let caps = DAY_MONTH_YEAR_RE.captures(title)?;
    // "OF" is English only
    if caps.get(0)?.as_str().to_uppercase().contains(" OF ") {
        return None;
    }
    parts(&caps, 1, 2, 3)
}

fn english_parts(title: &str) -> Option<(u32, String, i32)> {
    if let Some(caps) = DAY_MONTH_YEAR_RE.captures(title) {
        return parts(&caps, 1, 2, 3);
    }
    let caps = MONTH_DAY_YEAR_RE.captures(title)?;
    parts(&caps, 2, 1, 3)
}

fn parts(caps: &Captures, day: usize, month: usize, year: usize) -> Option<(u32, String, i32)> {
    let day = caps.get(day)?.as_str().parse().ok()?;
    let month = caps.get(month)?.as_str().to_string();
    let year = caps.get(year)?.as_str().parse().ok()?;
    Some((day, month, year))
}

fn month_number(name: &str, language: MonthLanguage) -> Option<u32> {
    let upper = name.to_uppercase();
    let n = match language {
        MonthLanguage::Spanish => match upper.as_str() {
            "ENERO" => 1,
            "FEBRERO" => 2,
            "MARZO" => 3,
            "ABRIL" => 4,
            "MAYO" => 5,
            "JUNIO" => 6,
            "JULIO" => 7,
            "AGOSTO" => 8,
            "SEPTIEMBRE" | "SETIEMBRE" => 9,
            "OCTUBRE" => 10,
            "NOVIEMBRE" => 11,
            "DICIEMBRE" => 12,
            _ => return None,
        },
        MonthLanguage::English => match upper.as_str() {
            "JANUARY" => 1,
            "FEBRUARY" => 2,
            "MARCH" => 3,
            "APRIL" => 4,
            "MAY" => 5,
            "JUNE" => 6,
            "JULY" => 7,
            "AUGUST" => 8,
            "SEPTEMBER" => 9,
            "OCTOBER" => 10,
            "NOVEMBER" => 11,
            "DECEMBER" => 12,
            _ => return None,
        },
    };
    Some(n)
}

fn unparsable(title: &str, reason: &str) -> BalanzaError {
    BalanzaError::UnparsableTitle {
        title: title.to_string(),
        reason: reason.to_string(),
    }
}
