#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CharCursor,
    error::{Error, RmcField, TokenError},
    tokenizer::{Choice, GpsFloat, Tokenizer},
};

/// A fix position.
///
/// Both coordinates are kept in NMEA packed form scaled down by 100: the
/// latitude `5133.82` (51° 33.82') is stored as `51.3382`. Use
/// [`to_degrees`](Self::to_degrees) for decimal degrees.
///
/// Negative latitude is South, negative longitude is West.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude, `dd.mmmm`
    pub latitude: GpsFloat,
    /// Longitude, `ddd.mmmm`
    pub longitude: GpsFloat,
}

impl Position {
    /// Position at latitude and longitude zero.
    pub const fn new() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    /// Converts both coordinates to signed decimal degrees.
    ///
    /// ```rust
    /// use nmea0183_position_queue::Position;
    ///
    /// let position = Position { latitude: 51.3382, longitude: -0.4224 };
    /// let (lat, lon) = position.to_degrees();
    /// assert!((lat - 51.563_667).abs() < 1e-6);
    /// assert!((lon + 0.704).abs() < 1e-6);
    /// ```
    pub fn to_degrees(&self) -> (GpsFloat, GpsFloat) {
        (
            packed_to_degrees(self.latitude),
            packed_to_degrees(self.longitude),
        )
    }
}

fn packed_to_degrees(value: GpsFloat) -> GpsFloat {
    let magnitude = if value < 0.0 { -value } else { value };
    let degrees = magnitude as u32 as GpsFloat;
    let minutes = (magnitude - degrees) * 100.0;
    let result = degrees + minutes / 60.0;
    if value < 0.0 { -result } else { result }
}

/// Fix status from field 2 of a GPRMC sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// V - Invalid, receiver warning
    Invalid,
    /// A - Valid
    Valid,
}

/// Scratch record filled by the GPRMC decoder.
///
/// Every field is written as soon as it is parsed. A decode that fails part
/// way leaves the fields before the failure updated and the rest stale; there
/// is no rollback.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CurrentFix {
    /// Fix position
    pub position: Position,
    /// Speed over ground in knots
    pub speed_in_knots: GpsFloat,
    /// True course in degrees
    pub true_course: GpsFloat,
    /// Magnetic variation in degrees, always non-negative
    pub magnetic_variation: GpsFloat,
    /// UTC time of day as sent, `hhmmss.ss`
    pub time_of_day: GpsFloat,
    /// UTC date as sent, `ddmmyy`
    pub date: u32,
}

impl CurrentFix {
    /// An all-zero fix.
    pub const fn new() -> Self {
        Self {
            position: Position::new(),
            speed_in_knots: 0.0,
            true_course: 0.0,
            magnetic_variation: 0.0,
            time_of_day: 0.0,
            date: 0,
        }
    }
}

#[cfg(feature = "datetime")]
#[cfg_attr(docsrs, doc(cfg(feature = "datetime")))]
impl CurrentFix {
    /// The fix time of day in UTC, or [`None`] if a component is out of range.
    ///
    /// Fractional seconds are rounded to the nearest millisecond.
    pub fn utc_time(&self) -> Option<time::Time> {
        if self.time_of_day.is_nan() || self.time_of_day < 0.0 {
            return None;
        }
        let whole = self.time_of_day as u32;
        let fraction = self.time_of_day - whole as GpsFloat;
        let millis = ((fraction * 1000.0 + 0.5) as u16).min(999);

        let hour = u8::try_from(whole / 10000).ok()?;
        let (minute, second) = ((whole / 100 % 100) as u8, (whole % 100) as u8);
        time::Time::from_hms_milli(hour, minute, second, millis).ok()
    }

    /// The fix date in UTC, or [`None`] if a component is out of range.
    ///
    /// Two digit years from 83 to 99 are in the 1900s, the rest in the 2000s.
    pub fn utc_date(&self) -> Option<time::Date> {
        let (day, month, year) = (self.date / 10000, self.date / 100 % 100, self.date % 100);
        let month = time::Month::try_from(month as u8).ok()?;
        let year = match year {
            83..=99 => year + 1900,
            _ => year + 2000,
        };

        time::Date::from_calendar_date(year as i32, month, u8::try_from(day).ok()?).ok()
    }

    /// The fix date and time in UTC.
    pub fn utc_datetime(&self) -> Option<time::PrimitiveDateTime> {
        let date = self.utc_date()?;
        Some(time::PrimitiveDateTime::new(date, self.utc_time()?))
    }
}

/// RMC - Recommended Minimum Navigation Information
///
/// Decodes the eleven fields following an already consumed `$GPRMC` tag into
/// `fix`, stopping at the first field that does not match.
///
/// ```text
///        1         2 3       4 5        6 7   8   9      10  11
///        |         | |       | |        | |   |   |      |   |
/// $GPRMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,ddmmyy,x.x,a*hh
/// ```
///
/// Field 11 is the East/West flag of the magnetic variation, but a `W` there
/// negates the *longitude* a second time, exactly like field 6 does. The
/// variation keeps its unsigned value. Receivers that report a western
/// variation therefore produce a longitude with the opposite sign.
pub fn decode<C: CharCursor>(
    tokenizer: &mut Tokenizer<'_, C>,
    fix: &mut CurrentFix,
) -> Result<Validity, Error> {
    tokenizer.match_comma().map_err(at(RmcField::TimeOfDay))?;
    fix.time_of_day = tokenizer.parse_decimal().map_err(at(RmcField::TimeOfDay))?;

    tokenizer.match_comma().map_err(at(RmcField::Validity))?;
    let validity = match tokenizer
        .match_either(b'V', b'A')
        .map_err(at(RmcField::Validity))?
    {
        Choice::First => Validity::Invalid,
        Choice::Second => Validity::Valid,
    };

    tokenizer.match_comma().map_err(at(RmcField::Latitude))?;
    let latitude = tokenizer.parse_decimal().map_err(at(RmcField::Latitude))?;
    fix.position.latitude = latitude / 100.0;

    tokenizer.match_comma().map_err(at(RmcField::LatitudeHemisphere))?;
    if tokenizer
        .match_either(b'N', b'S')
        .map_err(at(RmcField::LatitudeHemisphere))?
        == Choice::Second
    {
        fix.position.latitude = -fix.position.latitude;
    }

    tokenizer.match_comma().map_err(at(RmcField::Longitude))?;
    let longitude = tokenizer.parse_decimal().map_err(at(RmcField::Longitude))?;
    fix.position.longitude = longitude / 100.0;

    tokenizer.match_comma().map_err(at(RmcField::LongitudeHemisphere))?;
    if tokenizer
        .match_either(b'E', b'W')
        .map_err(at(RmcField::LongitudeHemisphere))?
        == Choice::Second
    {
        fix.position.longitude = -fix.position.longitude;
    }

    tokenizer.match_comma().map_err(at(RmcField::SpeedInKnots))?;
    fix.speed_in_knots = tokenizer.parse_decimal().map_err(at(RmcField::SpeedInKnots))?;

    tokenizer.match_comma().map_err(at(RmcField::TrueCourse))?;
    fix.true_course = tokenizer.parse_decimal().map_err(at(RmcField::TrueCourse))?;

    tokenizer.match_comma().map_err(at(RmcField::Date))?;
    let (date, _) = tokenizer.parse_uint().map_err(at(RmcField::Date))?;
    fix.date = date;

    tokenizer.match_comma().map_err(at(RmcField::MagneticVariation))?;
    let variation = tokenizer.parse_decimal();
    fix.magnetic_variation = variation.map_err(at(RmcField::MagneticVariation))?;

    tokenizer.match_comma().map_err(at(RmcField::VariationHemisphere))?;
    if tokenizer
        .match_either(b'E', b'W')
        .map_err(at(RmcField::VariationHemisphere))?
        == Choice::Second
    {
        fix.position.longitude = -fix.position.longitude;
    }

    log::trace!("GPRMC decoded: {:?} {:?}", validity, fix.position);
    Ok(validity)
}

fn at(field: RmcField) -> impl FnOnce(TokenError) -> Error {
    move |error| Error::field(field, error)
}
