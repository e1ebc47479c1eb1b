//! Supported languages, locales and timezones.

use chrono_tz::TZ_VARIANTS;

use crate::model::localization::TimezoneDto;

pub const LANGUAGES: [&str; 2] = ["en", "fi"];
pub const LOCALES: [&str; 2] = ["en", "fi"];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_TIMEZONE: &str = "Europe/Helsinki";

/// Describes every supported timezone for the localization endpoint.
pub fn timezones() -> Vec<TimezoneDto> {
    TZ_VARIANTS
        .iter()
        .map(|tz| {
            let identifier = tz.name();
            let (area, location) = identifier.split_once('/').unwrap_or((identifier, identifier));

            TimezoneDto {
                timezone: area.to_string(),
                identifier: identifier.to_string(),
                value: location.replace('_', " ").replace('/', " / "),
            }
        })
        .collect()
}
