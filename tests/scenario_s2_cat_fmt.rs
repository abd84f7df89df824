//! S2: `cat_fmt`/`cat_printf`/`cat_repr` composition, `split`/`split_args`
//! round trips, and `DataBox` formatting consistency.

use datakit_core::dks::format::FmtArg;
use datakit_core::dks::split::split_args;
use datakit_core::dks::DksString;
use datakit_core::DataBox;

#[test]
fn cat_fmt_expands_every_directive() {
    let mut s = DksString::new_empty();
    let name = DksString::new(b"redis");
    s.cat_fmt(
        "%S has %i keys, %U bytes used (%%full)",
        &[
            FmtArg::Dks(&name),
            FmtArg::I32(-7),
            FmtArg::U64(4096),
        ],
    );
    assert_eq!(s.as_slice(), b"redis has -7 keys, 4096 bytes used (%full)");
}

#[test]
fn cat_fmt_echoes_unknown_directive_verbatim() {
    let mut s = DksString::new_empty();
    s.cat_fmt("100%z done", &[]);
    assert_eq!(s.as_slice(), b"100%z done");
}

#[test]
fn cat_printf_uses_native_formatting() {
    let mut s = DksString::new_empty();
    s.cat_printf(format_args!("{} of {}", 3, 10));
    assert_eq!(s.as_slice(), b"3 of 10");
}

#[test]
fn cat_repr_escapes_and_split_args_reverses_it() {
    let mut s = DksString::new_empty();
    s.cat_repr(b"hello\nworld\t\"quoted\"");
    let reprd = s.as_slice().to_vec();

    let line = [reprd, b" second".to_vec()].concat();
    let parts = split_args(&line).unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].as_slice(), b"hello\nworld\t\"quoted\"");
    assert_eq!(parts[1].as_slice(), b"second");
}

#[test]
fn split_args_rejects_unterminated_quote() {
    assert!(split_args(br#"foo "bar"#).is_err());
}

#[test]
fn split_on_separator_matches_simple_tokenizer() {
    let s = DksString::new(b"a,bb,,ccc");
    let parts = s.split(b",");
    let rendered: Vec<&[u8]> = parts.iter().map(|p| p.as_slice()).collect();
    assert_eq!(rendered, vec![b"a".as_slice(), b"bb", b"", b"ccc"]);
}

#[test]
fn databox_display_matches_canonical_format_for_whole_number_floats() {
    let b = DataBox::Float32(299.0);
    assert_eq!(b.to_string(), "299.0");
    assert_eq!(b.to_string(), datakit_core::canonical_format(&b));
}
