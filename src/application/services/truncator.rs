/// Returns the first `max_chars` characters of `text`, or `text` itself when
/// it is already short enough. Counts Unicode scalar values and never cuts
/// through one.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
