//! `split` / `split_args` — byte-separator splitting and REPL-style
//! argument tokenizing.

use super::{DksError, DksString};

impl DksString {
    /// Splits the payload on every (possibly multi-byte) occurrence of
    /// `sep`, returning the pieces as owned `DKS` strings. An empty `sep`
    /// or a payload with no occurrences returns the whole payload as a
    /// single-element result.
    pub fn split(&self, sep: &[u8]) -> Vec<DksString> {
        let buf = self.as_slice();
        if sep.is_empty() || buf.len() < sep.len() {
            return vec![DksString::new(buf)];
        }
        let mut out = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;
        while i + sep.len() <= buf.len() {
            if &buf[i..i + sep.len()] == sep {
                out.push(DksString::new(&buf[start..i]));
                i += sep.len();
                start = i;
            } else {
                i += 1;
            }
        }
        out.push(DksString::new(&buf[start..]));
        out
    }
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// REPL-style argument splitter: whitespace-separated tokens, with
/// double-quoted tokens supporting `\n \r \t \a \b \\ \" \xHH` escapes and
/// single-quoted tokens supporting only `\'`/`\\` escapes (everything else
/// literal). A closing quote must be followed by whitespace or end of
/// input, else the line is malformed.
pub fn split_args(line: &[u8]) -> Result<Vec<DksString>, DksError> {
    let mut out = Vec::new();
    let mut i = 0usize;
    let n = line.len();

    loop {
        while i < n && line[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= n {
            break;
        }

        let mut current = Vec::new();
        let mut in_quotes = false;
        let mut in_single = false;

        loop {
            if in_quotes {
                if i + 3 < n && line[i] == b'\\' && line[i + 1] == b'x' && is_hex_digit(line[i + 2]) && is_hex_digit(line[i + 3]) {
                    current.push((hex_val(line[i + 2]) << 4) | hex_val(line[i + 3]));
                    i += 4;
                } else if i + 1 < n && line[i] == b'\\' {
                    let escaped = match line[i + 1] {
                        b'n' => Some(b'\n'),
                        b'r' => Some(b'\r'),
                        b't' => Some(b'\t'),
                        b'a' => Some(0x07),
                        b'b' => Some(0x08),
                        b'\\' => Some(b'\\'),
                        b'"' => Some(b'"'),
                        _ => None,
                    };
                    match escaped {
                        Some(c) => {
                            current.push(c);
                            i += 2;
                        }
                        None => return Err(DksError::Unterminated),
                    }
                } else if i < n && line[i] == b'"' {
                    // Closing quote must be followed by whitespace or EOS.
                    if i + 1 < n && !line[i + 1].is_ascii_whitespace() {
                        return Err(DksError::Unterminated);
                    }
                    i += 1;
                    break;
                } else if i >= n {
                    return Err(DksError::Unterminated);
                } else {
                    current.push(line[i]);
                    i += 1;
                }
            } else if in_single {
                if i + 1 < n && line[i] == b'\\' && line[i + 1] == b'\'' {
                    current.push(b'\'');
                    i += 2;
                } else if i < n && line[i] == b'\'' {
                    if i + 1 < n && !line[i + 1].is_ascii_whitespace() {
                        return Err(DksError::Unterminated);
                    }
                    i += 1;
                    break;
                } else if i >= n {
                    return Err(DksError::Unterminated);
                } else {
                    current.push(line[i]);
                    i += 1;
                }
            } else if i >= n || line[i].is_ascii_whitespace() {
                break;
            } else if line[i] == b'"' {
                in_quotes = true;
                i += 1;
            } else if line[i] == b'\'' {
                in_single = true;
                i += 1;
            } else {
                current.push(line[i]);
                i += 1;
            }
        }

        out.push(DksString::new(&current));
    }

    Ok(out)
}
