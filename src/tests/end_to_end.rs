use crate::{
    CharCursor, Counters, CurrentFix, Error, GpsFloat, Outcome, PositionTracker, RmcField,
    SentenceBuffer, Tokenizer, Validity, rmc,
};

const SENTENCE: &str = "$GPRMC,220516,A,5133.82,N,00042.24,W,173.8,231.8,130694,004.2,W*70\r\n";

type Tracker = PositionTracker<SentenceBuffer<256>, 3>;

fn approx(a: GpsFloat, b: GpsFloat) -> bool {
    (a - b).abs() < 1e-9
}

fn valid_at(minutes: u32) -> heapless::String<96> {
    use core::fmt::Write;

    let mut s = heapless::String::new();
    write!(
        s,
        "$GPRMC,120000,A,{minutes:04}.00,N,00100.00,E,0,0,010120,0,E\r\n"
    )
    .unwrap();
    s
}

#[test]
fn test_reference_sentence_fields() {
    // Post tag: decode field by field and look at the fix right after field 6
    // and again after field 11.
    let mut buffer = SentenceBuffer::<128>::new();
    buffer.add_str(SENTENCE);
    let mut tokenizer = Tokenizer::new(&mut buffer);
    assert_eq!(tokenizer.parse_tag().unwrap(), "$GPRMC");

    let mut fix = CurrentFix::new();
    assert_eq!(rmc::decode(&mut tokenizer, &mut fix), Ok(Validity::Valid));
    assert!(approx(fix.position.latitude, 51.3382));
    assert!(approx(fix.speed_in_knots, 173.8));
    assert!(approx(fix.true_course, 231.8));
    assert!(approx(fix.magnetic_variation, 4.2));
    assert_eq!(fix.date, 130694);

    // Suspect: field 6 makes the longitude -0.4224, then the `W` of the
    // magnetic variation (field 11) flips it back to +0.4224.
    assert!(approx(fix.position.longitude, 0.4224));
}

#[test]
fn test_reference_sentence_longitude_before_variation_flag() {
    // The same sentence cut after field 6 leaves the single negation visible.
    let mut buffer = SentenceBuffer::<128>::new();
    buffer.add_str("$GPRMC,220516,A,5133.82,N,00042.24,W\n");
    let mut tokenizer = Tokenizer::new(&mut buffer);
    tokenizer.parse_tag().unwrap();

    let mut fix = CurrentFix::new();
    let result = rmc::decode(&mut tokenizer, &mut fix);
    assert!(matches!(
        result,
        Err(Error::InvalidField {
            field: RmcField::SpeedInKnots,
            ..
        })
    ));
    assert!(approx(fix.position.longitude, -0.4224));
}

#[test]
fn test_reference_sentence_is_queued() {
    let mut tracker = Tracker::default();
    tracker.add_str(SENTENCE);

    assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
    assert_eq!(tracker.queue().len(), 1);
    assert_eq!(
        tracker.counters(),
        Counters {
            processed_sentences: 1,
            valid_gprmc: 1,
            invalid_gprmc: 0,
        }
    );

    let position = tracker.latest().unwrap().position();
    assert!(approx(position.latitude, 51.3382));
    assert!(approx(position.longitude, 0.4224));
    assert_eq!(tracker.current_fix().position, *position);
}

#[test]
fn test_invalid_fix_is_counted_not_queued() {
    let mut tracker = Tracker::default();
    tracker.add_str(SENTENCE);
    tracker.add_str("$GPRMC,220517,V,5133.90,N,00042.30,W,0.0,0.0,130694,004.2,W\r\n");

    assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
    assert_eq!(tracker.parse_sentence(), Ok(Outcome::InvalidFix));

    assert_eq!(tracker.queue().len(), 1);
    assert_eq!(tracker.invalid_gprmc(), 1);
    assert_eq!(tracker.valid_gprmc(), 1);
    // The scratch record follows the last decode, the queue does not.
    assert!(approx(tracker.current_fix().position.latitude, 51.3390));
    assert!(approx(
        tracker.latest().unwrap().position().latitude,
        51.3382
    ));
}

#[test]
fn test_invalid_fix_needs_hemisphere_flags() {
    let mut tracker = Tracker::default();
    tracker.add_str("$GPRMC,220517,V,,,,,,,130694,,*34\r\n");
    tracker.add_str("$GPRMC,220517,V,5133.83,N,00042.25,W,0.0,0.0,130694,004.2,E*71\r\n");

    assert!(matches!(
        tracker.parse_sentence(),
        Err(Error::InvalidField {
            field: RmcField::LatitudeHemisphere,
            ..
        })
    ));
    assert_eq!(tracker.parse_sentence(), Ok(Outcome::InvalidFix));
    assert_eq!(tracker.invalid_gprmc(), 1);
    assert!(tracker.queue().is_empty());
}

#[test]
fn test_queue_keeps_newest_in_order() {
    let mut tracker = Tracker::default();
    for minutes in 1..=5 {
        tracker.add_str(&valid_at(minutes));
        assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
        assert!(tracker.queue().len() <= 3);
        assert!(approx(
            tracker.latest().unwrap().position().latitude,
            minutes as GpsFloat / 100.0
        ));
    }

    let latitudes: heapless::Vec<GpsFloat, 3> = tracker
        .queue()
        .iter()
        .map(|e| e.position().latitude)
        .collect();
    assert_eq!(latitudes.len(), 3);
    assert!(approx(latitudes[0], 0.03));
    assert!(approx(latitudes[1], 0.04));
    assert!(approx(latitudes[2], 0.05));
}

#[test]
fn test_stream_with_noise() {
    let mut tracker = Tracker::default();
    tracker.add_str("$GPGSV,3,1,11,03,03,111,00*74\r\n");
    tracker.add_str(SENTENCE);
    tracker.add_str("garbage\r\n");
    tracker.add_str("$GPRMC,220516,A,5133.82\r\n");
    tracker.add_str("$GPRMC,220518,A,5133.84,S,00042.26,E,1,2,130694,0,E\r\n");

    assert!(matches!(
        tracker.parse_sentence(),
        Err(Error::UnrecognizedSentence(_))
    ));
    assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
    assert!(matches!(
        tracker.parse_sentence(),
        Err(Error::UnrecognizedSentence(_))
    ));
    assert!(matches!(
        tracker.parse_sentence(),
        Err(Error::InvalidField { .. })
    ));
    assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
    assert_eq!(tracker.parse_sentence(), Ok(Outcome::Idle));

    assert_eq!(tracker.processed_sentences(), 5);
    assert_eq!(tracker.valid_gprmc(), 2);
    assert_eq!(tracker.invalid_gprmc(), 0);
    assert!(!tracker.cursor().is_sentence_available());
    assert!(tracker.cursor().is_empty());

    let position = tracker.latest().unwrap().position();
    assert!(approx(position.latitude, -51.3384));
    assert!(approx(position.longitude, 0.4226));
}

#[test]
fn test_bytes_arrive_one_at_a_time() {
    let mut tracker = Tracker::default();
    let mut outcomes = 0;
    for byte in SENTENCE.bytes() {
        tracker.extend_from_slice(&[byte]);
        if tracker.parse_sentence() != Ok(Outcome::Idle) {
            outcomes += 1;
        }
    }
    assert_eq!(outcomes, 1);
    assert_eq!(tracker.valid_gprmc(), 1);
}

#[cfg(feature = "datetime")]
#[test]
fn test_reference_sentence_timestamp() {
    let mut tracker = Tracker::default();
    tracker.add_str(SENTENCE);
    tracker.parse_sentence().unwrap();

    let datetime = tracker.current_fix().utc_datetime().unwrap();
    assert_eq!(
        datetime,
        time::PrimitiveDateTime::new(
            time::Date::from_calendar_date(1994, time::Month::June, 13).unwrap(),
            time::Time::from_hms(22, 5, 16).unwrap(),
        )
    );
}
