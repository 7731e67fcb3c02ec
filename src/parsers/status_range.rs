use crate::error::{Error, Result};

/// Inclusive range of HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRange {
    pub start: u16,
    pub end: u16,
}

impl StatusRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, code: u16) -> bool {
        code >= self.start && code <= self.end
    }
}

/// Parse a compact list of status ranges such as `200`, `200-299` or
/// `200-299,400-499`. An empty string means no filtering.
pub fn parse_status_ranges(text: &str) -> Result<Vec<StatusRange>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',').map(parse_status_range).collect()
}

fn parse_status_range(token: &str) -> Result<StatusRange> {
    let bounds: Vec<&str> = token.split('-').collect();

    match bounds.as_slice() {
        [code] => {
            let code = parse_bound(token, code)?;
            Ok(StatusRange::new(code, code))
        }
        [start, end] => Ok(StatusRange::new(
            parse_bound(token, start)?,
            parse_bound(token, end)?,
        )),
        _ => Err(Error::StatusRangeFormat {
            token: token.to_string(),
            reason: "there should be zero or one dashes".to_string(),
        }),
    }
}

fn parse_bound(token: &str, bound: &str) -> Result<u16> {
    bound.parse().map_err(|_| Error::StatusRangeFormat {
        token: token.to_string(),
        reason: format!("expected an integer status code, got {:?}", bound),
    })
}
