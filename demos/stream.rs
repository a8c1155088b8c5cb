use nmea0183_position_queue::{DefaultTracker, Outcome};

const STREAM: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
$GPRMC,220516,A,5133.82,N,00042.24,W,173.8,231.8,130694,004.2,E*70\r\n\
$GPRMC,220517,V,5133.83,N,00042.25,W,0.0,0.0,130694,004.2,E*71\r\n\
$GPRMC,220518,A,5133.84,N,00042.26,W,173.8,231.8,130694,004.2,E*68\r\n";

fn main() {
    let mut tracker = DefaultTracker::default();

    // Feed the stream in small chunks, the way a UART would deliver it.
    for chunk in STREAM.chunks(16) {
        tracker.extend_from_slice(chunk);

        loop {
            match tracker.parse_sentence() {
                Ok(Outcome::Idle) => break,
                Ok(outcome) => println!("{outcome:?}: {:?}", tracker.current_fix()),
                Err(e) => println!("Dropped sentence: {e}"),
            }
        }
    }

    println!("{:?}", tracker.counters());
    for entry in tracker.queue() {
        let (lat, lon) = entry.position().to_degrees();
        println!("{lat:.5}, {lon:.5}");
    }
}
