//! `cat_printf` / `cat_fmt` / `cat_repr` — formatted and quoted appends.

use super::DksString;
use std::fmt::Write as _;

/// One argument consumed by [`DksString::cat_fmt`]'s mini format language.
/// C varargs have no Rust equivalent, so callers build an explicit list of
/// typed arguments instead (the order must match the `%`-directives in the
/// format string).
#[derive(Debug)]
pub enum FmtArg<'a> {
    /// `%s` — a plain UTF-8 string.
    Str(&'a str),
    /// `%S` — another `DKS` string's payload.
    Dks(&'a DksString),
    /// `%i` — a 32-bit signed integer.
    I32(i32),
    /// `%I` — a 64-bit signed integer.
    I64(i64),
    /// `%u` — a 32-bit unsigned integer.
    U32(u32),
    /// `%U` — a 64-bit unsigned integer.
    U64(u64),
    /// `%b` / `%B` — a raw byte slice, appended without interpretation.
    Bytes(&'a [u8]),
}

impl DksString {
    /// Printf-style append using Rust's native formatting machinery:
    /// callers pass a [`format_args!`] value, e.g.
    /// `s.cat_printf(format_args!("{n} items"))`.
    pub fn cat_printf(&mut self, args: std::fmt::Arguments<'_>) {
        let mut tmp = String::new();
        // `write!` to a `String` cannot fail.
        tmp.write_fmt(args).unwrap();
        self.cat(tmp.as_bytes());
    }

    /// Appends `fmt` to `self`, expanding exactly the directives
    /// `{%b, %B, %s, %S, %i, %I, %u, %U, %%}` against `args` in order.
    /// Any other `%X` directive is echoed verbatim (both the `%` and `X`).
    ///
    /// # Panics
    /// Panics if `fmt` consumes more arguments than `args` supplies, or if
    /// an argument's type does not match the directive consuming it.
    pub fn cat_fmt(&mut self, fmt: &str, args: &[FmtArg<'_>]) {
        let mut arg_iter = args.iter();
        let bytes = fmt.as_bytes();
        let mut i = 0usize;
        let mut out = Vec::new();
        while i < bytes.len() {
            if bytes[i] != b'%' || i + 1 >= bytes.len() {
                out.push(bytes[i]);
                i += 1;
                continue;
            }
            let directive = bytes[i + 1];
            match directive {
                b'%' => out.push(b'%'),
                b's' => match arg_iter.next() {
                    Some(FmtArg::Str(s)) => out.extend_from_slice(s.as_bytes()),
                    other => panic!("cat_fmt: %s expected Str argument, got {other:?}"),
                },
                b'S' => match arg_iter.next() {
                    Some(FmtArg::Dks(d)) => out.extend_from_slice(d.as_slice()),
                    _ => panic!("cat_fmt: %S expected Dks argument"),
                },
                b'i' => match arg_iter.next() {
                    Some(FmtArg::I32(v)) => {
                        let mut tmp = [0u8; 20];
                        let n = crate::primitives::i64_to_buf(&mut tmp, *v as i64);
                        out.extend_from_slice(&tmp[..n]);
                    }
                    _ => panic!("cat_fmt: %i expected I32 argument"),
                },
                b'I' => match arg_iter.next() {
                    Some(FmtArg::I64(v)) => {
                        let mut tmp = [0u8; 20];
                        let n = crate::primitives::i64_to_buf(&mut tmp, *v);
                        out.extend_from_slice(&tmp[..n]);
                    }
                    _ => panic!("cat_fmt: %I expected I64 argument"),
                },
                b'u' => match arg_iter.next() {
                    Some(FmtArg::U32(v)) => {
                        let mut tmp = [0u8; 20];
                        let n = crate::primitives::u64_to_buf(&mut tmp, *v as u64);
                        out.extend_from_slice(&tmp[..n]);
                    }
                    _ => panic!("cat_fmt: %u expected U32 argument"),
                },
                b'U' => match arg_iter.next() {
                    Some(FmtArg::U64(v)) => {
                        let mut tmp = [0u8; 20];
                        let n = crate::primitives::u64_to_buf(&mut tmp, *v);
                        out.extend_from_slice(&tmp[..n]);
                    }
                    _ => panic!("cat_fmt: %U expected U64 argument"),
                },
                b'b' | b'B' => match arg_iter.next() {
                    Some(FmtArg::Bytes(b)) => out.extend_from_slice(b),
                    _ => panic!("cat_fmt: %b expected Bytes argument"),
                },
                other => {
                    // Unknown directive: echo both bytes verbatim.
                    out.push(b'%');
                    out.push(other);
                }
            }
            i += 2;
        }
        self.cat(&out);
    }

    /// Appends a quote-and-escape representation of `bytes` — the inverse
    /// of [`split_args`](super::split::split_args): non-printable bytes
    /// become `\xHH`, and `\n \r \t \a \b \\ "` get their C-style escapes,
    /// the whole thing wrapped in double quotes.
    pub fn cat_repr(&mut self, bytes: &[u8]) {
        let mut out = Vec::with_capacity(bytes.len() + 2);
        out.push(b'"');
        for &b in bytes {
            match b {
                b'\\' => out.extend_from_slice(b"\\\\"),
                b'"' => out.extend_from_slice(b"\\\""),
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\r' => out.extend_from_slice(b"\\r"),
                b'\t' => out.extend_from_slice(b"\\t"),
                0x07 => out.extend_from_slice(b"\\a"),
                0x08 => out.extend_from_slice(b"\\b"),
                0x20..=0x7e => out.push(b),
                _ => {
                    out.push(b'\\');
                    out.push(b'x');
                    let hex = format!("{b:02X}");
                    out.extend_from_slice(hex.as_bytes());
                }
            }
        }
        out.push(b'"');
        self.cat(&out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s2_cat_fmt() {
        let mut s = DksString::new(b"--");
        s.cat_fmt(
            "Hello %s World %I,%I--",
            &[
                FmtArg::Str("Hi!"),
                FmtArg::I64(i64::MIN),
                FmtArg::I64(i64::MAX),
            ],
        );
        assert_eq!(
            s.as_slice(),
            b"--Hello Hi! World -9223372036854775808,9223372036854775807--"
        );
        assert_eq!(s.len(), 60);
    }

    #[test]
    fn cat_fmt_echoes_unknown_directive() {
        let mut s = DksString::new_empty();
        s.cat_fmt("100%Q done", &[]);
        assert_eq!(s.as_slice(), b"100%Q done");
    }

    #[test]
    fn cat_fmt_percent_escape() {
        let mut s = DksString::new_empty();
        s.cat_fmt("100%%", &[]);
        assert_eq!(s.as_slice(), b"100%");
    }

    #[test]
    fn cat_printf_uses_rust_formatting() {
        let mut s = DksString::new_empty();
        s.cat_printf(format_args!("{}-{}", 1, "two"));
        assert_eq!(s.as_slice(), b"1-two");
    }

    #[test]
    fn cat_repr_escapes_controls_and_quotes() {
        let mut s = DksString::new_empty();
        s.cat_repr(b"a\n\"b\\c\x01");
        assert_eq!(s.as_slice(), b"\"a\\n\\\"b\\\\c\\x01\"");
    }
}
