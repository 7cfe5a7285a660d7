use pretty_assertions::assert_eq;
use scout_engine::{display_lines, SummaryAccumulator};

fn push_all(chunks: &[&[u8]]) -> Vec<String> {
    let mut accumulator = SummaryAccumulator::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        lines = accumulator.push(chunk);
    }
    lines
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn line_break_in_a_later_chunk_is_resplit_from_full_text() {
    let mut accumulator = SummaryAccumulator::new();

    assert_eq!(accumulator.push(b"Hello\nWo"), strings(&["Hello", "Wo"]));
    assert_eq!(accumulator.push(b"rld\n"), strings(&["Hello", "World"]));
    assert_eq!(accumulator.text(), "Hello\nWorld\n");
}

#[test]
fn final_lines_do_not_depend_on_chunking() {
    let text = "Point one\n\n  \nPoint two\nPoint three";
    let expected = display_lines(text);
    let bytes = text.as_bytes();

    for split in 0..=bytes.len() {
        let (head, tail) = bytes.split_at(split);
        assert_eq!(push_all(&[head, tail]), expected, "split at {split}");
    }

    let singles: Vec<&[u8]> = bytes.chunks(1).collect();
    assert_eq!(push_all(&singles), expected);
}

#[test]
fn multibyte_characters_survive_any_chunk_boundary() {
    let text = "Résumé — naïve 日本語 🚀\nzweite Zeile\n";
    let bytes = text.as_bytes();

    for split in 0..=bytes.len() {
        let (head, tail) = bytes.split_at(split);
        assert_eq!(
            push_all(&[head, tail]),
            strings(&["Résumé — naïve 日本語 🚀", "zweite Zeile"]),
            "split at {split}"
        );
    }

    let singles: Vec<&[u8]> = bytes.chunks(1).collect();
    let mut accumulator = SummaryAccumulator::new();
    for chunk in singles {
        accumulator.push(chunk);
    }
    assert_eq!(accumulator.text(), text);
}

#[test]
fn incomplete_sequence_is_held_until_completed() {
    let mut accumulator = SummaryAccumulator::new();
    let rocket = "🚀".as_bytes();

    assert_eq!(accumulator.push(&rocket[..2]), Vec::<String>::new());
    assert_eq!(accumulator.text(), "");
    assert_eq!(accumulator.push(&rocket[2..]), strings(&["🚀"]));
}

#[test]
fn trailing_incomplete_sequence_is_not_flushed() {
    let mut accumulator = SummaryAccumulator::new();
    let mut chunk = b"done\n".to_vec();
    chunk.extend_from_slice(&"é".as_bytes()[..1]);

    assert_eq!(accumulator.push(&chunk), strings(&["done"]));
    assert_eq!(accumulator.text(), "done\n");
}

#[test]
fn malformed_bytes_are_replaced_not_fatal() {
    let mut accumulator = SummaryAccumulator::new();

    let lines = accumulator.push(b"ok \xFF here\n");

    assert_eq!(lines, strings(&["ok \u{FFFD} here"]));
}

#[test]
fn declared_charset_is_honoured() {
    let mut accumulator = SummaryAccumulator::for_content_type(Some("text/plain; charset=latin1"));

    let lines = accumulator.push(b"caf\xE9\n");

    assert_eq!(lines, strings(&["café"]));
}

#[test]
fn empty_chunk_keeps_current_lines() {
    let mut accumulator = SummaryAccumulator::new();
    accumulator.push(b"one\n");

    assert_eq!(accumulator.push(b""), strings(&["one"]));
}
