use super::*;

// === Navigation ===

#[test]
fn current_and_peek() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.peek(), 0);
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
}

#[test]
fn advance_n_stops_at_eof() {
    let mut cursor = Cursor::new("abc");
    cursor.advance_n(10);
    assert_eq!(cursor.pos(), 3);
    assert!(cursor.is_eof());
}

// === Tokens ===

#[test]
fn eat_whitespace_returns_run() {
    let mut cursor = Cursor::new(" \t\n x");
    assert_eq!(cursor.eat_whitespace(), " \t\n ");
    assert_eq!(cursor.current(), b'x');
    assert_eq!(cursor.eat_whitespace(), "");
}

#[test]
fn eat_ident_accepts_underscores_and_digits() {
    let mut cursor = Cursor::new("Enemy_2.X");
    assert_eq!(cursor.eat_ident(), Some("Enemy_2"));
    assert_eq!(cursor.current(), b'.');
}

#[test]
fn eat_ident_rejects_leading_digit() {
    let mut cursor = Cursor::new("2Enemy");
    assert_eq!(cursor.eat_ident(), None);
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn eat_ident_non_ascii() {
    let mut cursor = Cursor::new("Héros.X");
    assert_eq!(cursor.eat_ident(), Some("Héros"));
    assert_eq!(cursor.current(), b'.');
}

#[test]
fn eat_number_forms() {
    for (src, expected) in [("12+", "12"), ("1.5)", "1.5"), (".5", ".5"), ("3.", "3.")] {
        let mut cursor = Cursor::new(src);
        assert_eq!(cursor.eat_number(), Some(expected), "{src}");
    }
    assert_eq!(Cursor::new(".x").eat_number(), None);
    assert_eq!(Cursor::new("x1").eat_number(), None);
}

// === String literals ===

#[test]
fn string_literal_simple() {
    let mut cursor = Cursor::new("\"hello\" + x");
    assert!(cursor.eat_string_literal());
    assert_eq!(cursor.slice_from(0), "\"hello\"");
}

#[test]
fn string_literal_with_escapes() {
    let src = r#""say \"hi\" \\" rest"#;
    let mut cursor = Cursor::new(src);
    assert!(cursor.eat_string_literal());
    assert_eq!(cursor.slice_from(0), r#""say \"hi\" \\""#);
}

#[test]
fn string_literal_unterminated() {
    let mut cursor = Cursor::new("\"never closed");
    assert!(!cursor.eat_string_literal());
    assert!(cursor.is_eof());

    let mut cursor = Cursor::new("\"trailing escape\\");
    assert!(!cursor.eat_string_literal());
    assert!(cursor.is_eof());
}

#[test]
fn current_char_multibyte() {
    let cursor = Cursor::new("é");
    assert_eq!(cursor.current_char(), Some('é'));
    assert_eq!(Cursor::new("").current_char(), None);
}
