use crate::models::{ComparablePerson, RawPerson};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Convert a raw heterogeneous person record into a matching-ready
/// `ComparablePerson`.
///
/// This never fails: every missing or malformed field degrades to an
/// absent value instead of an error. Only the first name token is kept
/// for matching because the entry forms only ask end users for a first
/// name reliably; surnames and middle names are too inconsistent across
/// independently-entered trees to be a useful exact-match key.
pub fn normalize_person(raw: &RawPerson) -> ComparablePerson {
    let name = first_name_token(raw.name());
    let alias_name = {
        let alias = first_name_token(raw.alias_name());
        if alias.is_empty() {
            None
        } else {
            Some(alias)
        }
    };

    let dob = raw.dob().map(str::to_string);
    let birth_year = parse_birth_year(raw.dob());

    let relationship_to_owner = if raw.is_owner() {
        "Self".to_string()
    } else {
        raw.relationship()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("N/A")
            .to_string()
    };

    ComparablePerson {
        id: raw.id().to_string(),
        name,
        alias_name,
        dob,
        birth_year,
        is_deceased: raw.is_deceased().unwrap_or(false),
        birth_place: normalize_field(raw.born_place()),
        current_place: normalize_field(raw.current_place()),
        religion: normalize_field(raw.religion()),
        caste: normalize_field(raw.caste()),
        relationship_to_owner,
        original: raw.clone(),
    }
}

/// First whitespace-delimited token of a name, lowercased.
/// Empty string when the name is missing or blank.
fn first_name_token(name: Option<&str>) -> String {
    name.and_then(|n| n.split_whitespace().next())
        .map(|t| t.to_lowercase())
        .unwrap_or_default()
}

/// Trim and lowercase a free-text field; empty becomes absent.
fn normalize_field(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Extract a birth year from a stored DOB string.
///
/// Accepts ISO dates ("1950-03-14"), ISO datetimes, or any string with a
/// leading 4-digit year. The literal "N/A" and unparseable values yield
/// `None`, never an error.
pub fn parse_birth_year(dob: Option<&str>) -> Option<i32> {
    let dob = dob?.trim();
    if dob.is_empty() || dob == "N/A" {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
        return Some(date.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(dob, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.year());
    }

    // Fall back to a leading 4-digit year ("1950", "1950/03/14")
    let prefix: String = dob.chars().take_while(|c| c.is_ascii_digit()).collect();
    if prefix.len() == 4 {
        return prefix.parse().ok();
    }

    None
}
