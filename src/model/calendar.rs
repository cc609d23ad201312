//! Conversions from the truncated day-number timescale (`tjd`) to civil dates
//! and the compact `YY.DDD` labels drawn on the timeline axes.

/// Offset added to a `tjd` value to obtain the day number fed into the
/// Fliegel–Van Flandern style conversion.
const DAY_NUMBER_REFERENCE: f64 = 2_444_000.0;

/// Last day number of the Julian calendar (4 Oct 1582).
const GREGORIAN_REFORM: f64 = 2_299_160.0;

/// A civil calendar date. `day` keeps the fractional part of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilDate {
    pub day: f64,
    pub month: u32,
    pub year: i32,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Convert a day count to a civil (day, month, year) date.
pub fn julian_day_to_civil_date(day_count: f64) -> CivilDate {
    let shifted = day_count + 0.5 + DAY_NUMBER_REFERENCE;
    let z = shifted.floor();
    let fraction = shifted - z;

    let b = if z > GREGORIAN_REFORM {
        let a = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + a - (a / 4.0).floor()
    } else {
        z
    };

    let c = b + 1524.0;
    let d = ((c - 122.1) / 365.25).floor();
    let e = (d * 365.25).floor();
    let g = ((c - e) / 30.6001).floor();
    let day = (c - e) + fraction - (30.6001 * g).floor();

    let month = if g < 13.5 { g - 1.0 } else { g - 13.0 };
    let year = if month > 2.5 { d - 4716.0 } else { d - 4715.0 };

    CivilDate {
        day,
        month: month as u32,
        year: year as i32,
    }
}

/// Day of year using the closed-form month offset (62 for leap years, 63 otherwise).
pub fn civil_date_to_day_of_year(day: f64, month: u32, year: i32) -> i32 {
    let leap_constant: i64 = if is_leap_year(year) { 62 } else { 63 };
    let month = i64::from(month);

    let offset = if month <= 2 {
        ((month - 1) * leap_constant) / 2
    } else {
        ((month + 1) * 153) / 5 - leap_constant
    };

    (offset as f64 + day).trunc() as i32
}

/// Format a day count as `YY.DDD`, e.g. `12915.5 -> "14.258"`.
pub fn day_count_to_short_label(day_count: f64) -> String {
    let date = julian_day_to_civil_date(day_count);
    let day_of_year = civil_date_to_day_of_year(date.day, date.month, date.year);
    format!("{:02}.{:03}", date.year.rem_euclid(100), day_of_year)
}

/// Two-digit year of a day count, as shown in the short label.
pub fn short_year(day_count: f64) -> i32 {
    julian_day_to_civil_date(day_count).year.rem_euclid(100)
}
