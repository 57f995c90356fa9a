//! Decoding of OPcache status bodies
//!
//! Two body layouts are understood:
//! - comma-separated: `v0,v1,...,v8` with `.` as decimal point
//! - pipe-separated: `v0|v1|...|v7`, where `,` may appear as a locale decimal separator
//!
//! Either layout may be followed by an in-band `|<status>` suffix. A full transcript
//! (`<body>|<http status>`) parses into a [`RawSample`] through [`std::str::FromStr`].

use std::str::FromStr;

use tracing::debug;

use crate::error::ParseError;
use crate::models::{RawSample, FIELD_COUNT, STATUS_OK};

/// Field count of the pipe-separated layout; the reserved field is absent
const PIPE_FIELD_COUNT: usize = FIELD_COUNT - 1;

/// Values and optional in-band status decoded from one body
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    pub values: [f64; FIELD_COUNT],
    pub status: Option<u16>,
}

/// Decode a status body
pub fn decode_body(body: &str) -> Result<DecodedBody, ParseError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = body.split('|').collect();
    match parts.len() {
        1 => Ok(DecodedBody {
            values: parse_comma_fields(parts[0])?,
            status: None,
        }),
        2 => Ok(DecodedBody {
            values: parse_comma_fields(parts[0])?,
            status: Some(parse_status(parts[1])?),
        }),
        PIPE_FIELD_COUNT => Ok(DecodedBody {
            values: parse_pipe_fields(&parts)?,
            status: None,
        }),
        n if n == PIPE_FIELD_COUNT + 1 => Ok(DecodedBody {
            values: parse_pipe_fields(&parts[..PIPE_FIELD_COUNT])?,
            status: Some(parse_status(parts[PIPE_FIELD_COUNT])?),
        }),
        got => Err(ParseError::FieldCount {
            expected: "9 comma-separated or 8 pipe-separated",
            got,
        }),
    }
}

/// Turn an HTTP response into a sample
///
/// Bodies of non-200 responses are never decoded. An in-band status suffix, when
/// present, takes over from the transport status.
pub fn decode_response(body: &str, http_status: u16) -> Result<RawSample, ParseError> {
    if http_status != STATUS_OK {
        debug!(http_status, "Skipping body of non-200 response");
        return Ok(RawSample::status_only(http_status));
    }

    let decoded = decode_body(body)?;
    match decoded.status {
        Some(status) if status != STATUS_OK => {
            debug!(status, "Body carries a non-200 in-band status");
            Ok(RawSample::status_only(status))
        }
        status => Ok(RawSample::new(
            decoded.values,
            status.unwrap_or(http_status),
        )),
    }
}

/// Render a response the way it is shown in debug output
pub fn transcript(body: &str, http_status: u16) -> String {
    format!("{}|{:03}", body.trim(), http_status)
}

impl FromStr for RawSample {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, status) = s
            .trim()
            .rsplit_once('|')
            .ok_or_else(|| ParseError::InvalidStatus(String::new()))?;
        decode_response(body, parse_status(status)?)
    }
}

fn parse_comma_fields(payload: &str) -> Result<[f64; FIELD_COUNT], ParseError> {
    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            expected: "9",
            got: fields.len(),
        });
    }

    let mut values = [0.0; FIELD_COUNT];
    for (index, field) in fields.iter().enumerate() {
        values[index] = parse_number(index, field)?;
    }
    Ok(values)
}

fn parse_pipe_fields(fields: &[&str]) -> Result<[f64; FIELD_COUNT], ParseError> {
    let mut values = [0.0; FIELD_COUNT];
    for (index, field) in fields.iter().enumerate() {
        values[index] = parse_number(index, &field.replace(',', "."))?;
    }
    Ok(values)
}

fn parse_number(index: usize, field: &str) -> Result<f64, ParseError> {
    let field = field.trim();
    let value: f64 = field.parse().map_err(|_| ParseError::NotNumeric {
        index,
        value: field.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::OutOfRange { index, value });
    }
    Ok(value)
}

fn parse_status(field: &str) -> Result<u16, ParseError> {
    let field = field.trim();
    field
        .parse()
        .map_err(|_| ParseError::InvalidStatus(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_comma_body() {
        let decoded = decode_body("85,15,90,100,5,95,70,30,0").unwrap();
        assert_eq!(
            decoded.values,
            [85.0, 15.0, 90.0, 100.0, 5.0, 95.0, 70.0, 30.0, 0.0]
        );
        assert_eq!(decoded.status, None);
    }

    #[test]
    fn test_decode_comma_body_with_status_suffix() {
        let decoded = decode_body("1,2,3,4,5,6,7,8,9|200\n").unwrap();
        assert_eq!(decoded.values[8], 9.0);
        assert_eq!(decoded.status, Some(200));
    }

    #[test]
    fn test_decode_pipe_body_normalizes_decimal_commas() {
        let decoded = decode_body("12,5|87,5|10|20|30|40|1,25|2").unwrap();
        assert_eq!(decoded.values[0], 12.5);
        assert_eq!(decoded.values[1], 87.5);
        assert_eq!(decoded.values[6], 1.25);
        assert_eq!(decoded.values[8], 0.0);
        assert_eq!(decoded.status, None);
    }

    #[test]
    fn test_decode_pipe_body_with_status_suffix() {
        let decoded = decode_body("1|2|3|4|5|6|7|8|200").unwrap();
        assert_eq!(decoded.values[7], 8.0);
        assert_eq!(decoded.status, Some(200));
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        assert_eq!(
            decode_body("1,2,3"),
            Err(ParseError::FieldCount {
                expected: "9",
                got: 3
            })
        );
        assert!(matches!(
            decode_body("1|2|3|4"),
            Err(ParseError::FieldCount { got: 4, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_non_numeric_and_negative() {
        assert_eq!(
            decode_body("1,2,x,4,5,6,7,8,9"),
            Err(ParseError::NotNumeric {
                index: 2,
                value: "x".to_string()
            })
        );
        assert!(matches!(
            decode_body("1,2,3,4,5,-6,7,8,9"),
            Err(ParseError::OutOfRange { index: 5, .. })
        ));
        assert!(matches!(
            decode_body("1,2,3,4,5,6,7,inf,9"),
            Err(ParseError::OutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_empty_and_bad_status() {
        assert_eq!(decode_body("   "), Err(ParseError::Empty));
        assert_eq!(
            decode_body("1,2,3,4,5,6,7,8,9|ok"),
            Err(ParseError::InvalidStatus("ok".to_string()))
        );
    }

    #[test]
    fn test_decode_response_skips_body_of_failed_request() {
        let sample = decode_response("<html>Not Found</html>", 404).unwrap();
        assert_eq!(sample, RawSample::status_only(404));
    }

    #[test]
    fn test_decode_response_honours_in_band_status() {
        let sample = decode_response("garbage|503", 200);
        assert!(sample.is_err());

        let sample = decode_response("1,2,3,4,5,6,7,8,9|503", 200).unwrap();
        assert_eq!(sample.http_status, 503);
    }

    #[test]
    fn test_parse_transcript() {
        let sample: RawSample = "85,15,90,100,5,95,70,30,0|200".parse().unwrap();
        assert_eq!(sample.http_status, 200);
        assert_eq!(sample.total_key_slots(), 100.0);

        let legacy: RawSample = "1|2|3|4|5|6|7|8|200".parse().unwrap();
        assert_eq!(legacy.http_status, 200);
        assert_eq!(legacy.free_string_memory(), 8.0);

        let failed: RawSample = "whatever|404".parse().unwrap();
        assert_eq!(failed, RawSample::status_only(404));
    }

    #[test]
    fn test_parse_transcript_without_status() {
        assert!("1,2,3,4,5,6,7,8,9".parse::<RawSample>().is_err());
    }

    #[test]
    fn test_transcript_pads_status() {
        assert_eq!(transcript("", 0), "|000");
        assert_eq!(transcript("1,2\n", 200), "1,2|200");
    }
}
