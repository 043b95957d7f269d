use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in the timezone named by `canonical_timezone`, e.g. "Europe/Chisinau".
///
/// Returns `None` if the timezone name is not a valid, canonical timezone.
pub fn get_local_today(canonical_timezone: &str) -> Option<Date> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use super::{get_local_offset, get_local_today};

    #[test]
    fn utc_has_zero_offset() {
        let offset = get_local_offset("Etc/UTC").expect("Etc/UTC should be a valid timezone");

        assert!(offset.is_utc());
    }

    #[test]
    fn invalid_timezone_has_no_today() {
        assert_eq!(get_local_today("Not/AZone"), None);
    }
}
