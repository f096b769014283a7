use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// `YYYYMMDD_HHMMSS` wall-clock label for `time` in its own zone
pub fn timestamp_label<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%Y%m%d_%H%M%S").to_string()
}

/// Export file name for a given moment, e.g. `PhotoShape_20240131_235959.png`
pub fn export_file_name<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("PhotoShape_{}.png", timestamp_label(time))
}

/// Suggested name for a new export, stamped with the local time
pub fn default_export_file_name() -> String {
    export_file_name(&Local::now())
}
