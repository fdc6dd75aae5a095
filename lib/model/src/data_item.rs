use crate::{DataItemError, WikiPage};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataItemKind {
    /// A wiki page. Also the kind of every inverse property.
    #[default]
    Page,
    /// Free text.
    Blob,
    Number,
    Boolean,
    Uri,
    Time,
}

impl DataItemKind {
    /// Resolves the type id stored for a property declaration (e.g. `_num`).
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        let type_id = type_id.trim_start_matches('_');
        Some(match type_id {
            "wpg" => Self::Page,
            "txt" | "str" | "cod" | "tel" => Self::Blob,
            "num" | "qty" | "tem" => Self::Number,
            "uri" | "ema" | "anu" => Self::Uri,
            "boo" => Self::Boolean,
            "dat" => Self::Time,
            _ => return None,
        })
    }

    /// The canonical type id of this kind.
    pub fn type_id(self) -> &'static str {
        match self {
            Self::Page => "_wpg",
            Self::Blob => "_txt",
            Self::Number => "_num",
            Self::Boolean => "_boo",
            Self::Uri => "_uri",
            Self::Time => "_dat",
        }
    }
}

impl Display for DataItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Page => "page",
            Self::Blob => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Uri => "URI",
            Self::Time => "date",
        })
    }
}

/// A single value of the knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    Page(WikiPage),
    Blob(String),
    Number(f64),
    Boolean(bool),
    Uri(String),
    Time(TimeValue),
}

impl DataItem {
    /// Builds a data item of the given kind from its user-facing text.
    pub fn parse(kind: DataItemKind, text: &str) -> Result<Self, DataItemError> {
        let text = text.trim();
        let invalid = || DataItemError::InvalidValue {
            kind,
            value: text.to_owned(),
        };
        Ok(match kind {
            DataItemKind::Page => Self::Page(WikiPage::parse(text)),
            DataItemKind::Blob => Self::Blob(text.to_owned()),
            DataItemKind::Number => {
                let number = text
                    .replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| invalid())?;
                if !number.is_finite() {
                    return Err(invalid());
                }
                Self::Number(number)
            }
            DataItemKind::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Self::Boolean(true),
                "false" | "no" | "0" => Self::Boolean(false),
                _ => return Err(invalid()),
            },
            DataItemKind::Uri => {
                if text.is_empty() || !text.contains(':') {
                    return Err(invalid());
                }
                Self::Uri(text.to_owned())
            }
            DataItemKind::Time => Self::Time(text.parse()?),
        })
    }

    pub fn kind(&self) -> DataItemKind {
        match self {
            Self::Page(_) => DataItemKind::Page,
            Self::Blob(_) => DataItemKind::Blob,
            Self::Number(_) => DataItemKind::Number,
            Self::Boolean(_) => DataItemKind::Boolean,
            Self::Uri(_) => DataItemKind::Uri,
            Self::Time(_) => DataItemKind::Time,
        }
    }

    /// The string used when ordering and pattern-matching this value.
    pub fn sort_key(&self) -> String {
        match self {
            Self::Page(page) => page.sort_key(),
            _ => self.to_string(),
        }
    }
}

impl Display for DataItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Blob(text) | Self::Uri(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Time(time) => write!(f, "{time}"),
        }
    }
}

/// A point in time of the proleptic Gregorian calendar, without a time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeValue {
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Option<Self> {
        let valid = (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_month(year, month)
            && hour < 24
            && minute < 60
            && second < 60;
        valid.then_some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The `xsd:dateTime` lexical form.
    pub fn to_xsd_date_time(&self) -> String {
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
            format_year(self.year),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// The Julian day of this point in time, used to compare dates numerically.
    pub fn julian_day(&self) -> f64 {
        let month = i64::from(self.month);
        let a = (14 - month) / 12;
        let y = i64::from(self.year) + 4800 - a;
        let m = month + 12 * a - 3;
        let day_number = i64::from(self.day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4)
            - y.div_euclid(100)
            + y.div_euclid(400)
            - 32045;
        #[allow(clippy::cast_precision_loss, reason = "Day numbers are far below 2^52")]
        let day_number = day_number as f64;
        day_number + (f64::from(self.hour) - 12.0) / 24.0
            + f64::from(self.minute) / 1440.0
            + f64::from(self.second) / 86400.0
    }

    fn has_time(&self) -> bool {
        self.hour != 0 || self.minute != 0 || self.second != 0
    }
}

impl std::str::FromStr for TimeValue {
    type Err = DataItemError;

    /// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `YYYY-MM-DD[T ]HH:MM[:SS]`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || DataItemError::InvalidTime(text.to_owned());
        let (date, time) = match text.split_once(['T', ' ']) {
            Some((date, time)) => (date, Some(time)),
            None => (text, None),
        };

        let (negative, date) = match date.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, date),
        };
        let mut parts = date.split('-');
        let year = parts
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let year = if negative { -year } else { year };
        let month = parse_component(parts.next(), 1).ok_or_else(invalid)?;
        let day = parse_component(parts.next(), 1).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let (hour, minute, second) = match time {
            None => (0, 0, 0),
            Some(time) => {
                let mut parts = time.split(':');
                let hour = parse_component(parts.next(), 0).ok_or_else(invalid)?;
                let minute = parse_component(parts.next(), 0).ok_or_else(invalid)?;
                let second = parse_component(parts.next(), 0).ok_or_else(invalid)?;
                if parts.next().is_some() {
                    return Err(invalid());
                }
                (hour, minute, second)
            }
        };

        Self::new(year, month, day, hour, minute, second).ok_or_else(invalid)
    }
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.has_time() {
            f.write_str(&self.to_xsd_date_time())
        } else {
            write!(
                f,
                "{}-{:02}-{:02}",
                format_year(self.year),
                self.month,
                self.day
            )
        }
    }
}

fn parse_component(part: Option<&str>, default: u8) -> Option<u8> {
    match part {
        None => Some(default),
        Some(part) => part.parse().ok(),
    }
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
