use proptest::prelude::*;

use crate::{DecodeError, checksum, decode};

const VALID_LINES: [&str; 6] = [
    "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
    "$GPGLL,4916.45,N,12311.12,W,225444,A*31",
    "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39",
    "$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75",
    "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25",
    "$GPZDA,160012.71,11,03,2004,-1,00*7D",
];

/// A valid line, a body index and a printable replacement character.
fn mutation() -> impl Strategy<Value = (&'static str, usize, char)> {
    (0..VALID_LINES.len(), any::<prop::sample::Index>(), 0x20u8..0x7f)
        .prop_map(|(line, index, c)| {
            let line = VALID_LINES[line];
            let body_len = line.find('*').unwrap_or(line.len()) - 1;
            (line, 1 + index.index(body_len), char::from(c))
        })
}

proptest! {
    #[test]
    fn prop_single_character_mutation_is_detected((line, at, c) in mutation()) {
        let original = line.as_bytes()[at] as char;
        prop_assume!(original != c);

        let mut mutated = line.to_owned();
        mutated.replace_range(at..=at, &c.to_string());

        match decode(&mutated) {
            Err(DecodeError::ChecksumMismatch { .. }) | Err(DecodeError::Frame(_)) => {}
            other => prop_assert!(false, "{mutated:?} decoded to {other:?}"),
        }
    }

    #[test]
    fn prop_correct_checksum_is_accepted(body in "[A-Z]{3}(,[A-Z0-9.]{0,6}){0,20}") {
        let line = format!("$GP{body}*{:02X}\r\n", checksum(&format!("GP{body}")));

        match decode(&line) {
            Err(DecodeError::ChecksumMismatch { .. }) | Err(DecodeError::Frame(_)) => {
                prop_assert!(false, "{line:?} was rejected before decoding");
            }
            _ => {}
        }
    }

    #[test]
    fn prop_decoding_never_panics(line in "\\PC{0,96}") {
        let _ = decode(&line);
    }
}

#[test]
fn test_valid_lines_decode() {
    for line in VALID_LINES {
        assert!(decode(line).is_ok(), "Failed: {line:?}");
    }
}
