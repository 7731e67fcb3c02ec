//! Line-by-line comparison used by the `test` subcommand.

/// First way in which rendered output differs from the expected text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("Difference on line {line}\nwant:\n  {want:?}\ngot:\n  {got:?}")]
    Line { line: usize, want: String, got: String },

    #[error("Actual output longer than expected (want {want} lines, got {got}).\nContinues with\n  {next:?}")]
    TooLong { want: usize, got: usize, next: String },

    #[error("Actual output shorter than expected (want {want} lines, got {got}).\nShould continue with\n  {next:?}")]
    TooShort { want: usize, got: usize, next: String },
}

/// Compare two texts after normalizing CRLF line endings.
pub fn assert_no_diff(actual: &str, expected: &str) -> Result<(), Mismatch> {
    let actual = actual.replace("\r\n", "\n");
    let expected = expected.replace("\r\n", "\n");
    if actual == expected {
        return Ok(());
    }

    let actual_lines: Vec<&str> = actual.split('\n').collect();
    let expected_lines: Vec<&str> = expected.split('\n').collect();

    for (i, got) in actual_lines.iter().enumerate() {
        let Some(want) = expected_lines.get(i) else {
            return Err(Mismatch::TooLong {
                want: expected_lines.len(),
                got: actual_lines.len(),
                next: got.to_string(),
            });
        };
        if got != want {
            return Err(Mismatch::Line {
                line: i + 1,
                want: want.to_string(),
                got: got.to_string(),
            });
        }
    }

    // Every actual line matched, so the expected text has more lines
    Err(Mismatch::TooShort {
        want: expected_lines.len(),
        got: actual_lines.len(),
        next: expected_lines[actual_lines.len()].to_string(),
    })
}
