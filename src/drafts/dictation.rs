//! Dictated text handling.

/// Append a dictated increment to `content`, separated by one space.
///
/// Surrounding whitespace of the increment is dropped; an empty increment
/// leaves the content as it was.
pub fn append_transcript(content: &mut String, increment: &str) {
    let increment = increment.trim();
    if increment.is_empty() {
        return;
    }
    if !content.is_empty() && !content.ends_with(char::is_whitespace) {
        content.push(' ');
    }
    content.push_str(increment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_empty() {
        let mut content = String::new();
        append_transcript(&mut content, "call the bakery");
        assert_eq!(content, "call the bakery");
    }

    #[test]
    fn test_append_separates_with_space() {
        let mut content = "call the bakery".to_string();
        append_transcript(&mut content, " about the cake ");
        assert_eq!(content, "call the bakery about the cake");
    }

    #[test]
    fn test_append_after_trailing_space() {
        let mut content = "notes: ".to_string();
        append_transcript(&mut content, "buy flour");
        assert_eq!(content, "notes: buy flour");
    }

    #[test]
    fn test_blank_increment_is_ignored() {
        let mut content = "unchanged".to_string();
        append_transcript(&mut content, "   ");
        assert_eq!(content, "unchanged");
    }
}
