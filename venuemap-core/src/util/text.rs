fn is_word_separator(c: char) -> bool {
    c.is_whitespace()
}

pub fn split_text_into_words(text: &str) -> Vec<&str> {
    text.split(is_word_separator)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Break `text` into lines of at most `width` characters.
///
/// Words longer than `width` are split.
/// A `width` of 0 is treated as 1.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];
    let mut line = String::new();
    for word in split_text_into_words(text) {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            let line_len = line.chars().count();
            let needed = if line.is_empty() { word_len } else { line_len + 1 + word_len };
            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                break;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                continue;
            }
            // The word alone does not fit
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(idx, _)| idx)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_owned());
            word = &word[split_at..];
            if word.is_empty() {
                break;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_text_into_words() {
        assert_eq!(
            vec!["A-a,B", "#", "b", "C_c;d", "-", "D"],
            split_text_into_words(" A-a,B # b\tC_c;d - D \n ")
        );
    }

    #[test]
    fn wrap_address() {
        assert_eq!(
            vec!["1 High Street,", "Guildford, GU1", "3AA, UK"],
            wrap_words("1 High Street, Guildford, GU1 3AA, UK", 15)
        );
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn wrap_long_word() {
        assert_eq!(vec!["abcd", "efgh", "ij k"], wrap_words("abcdefghij k", 4));
    }

    #[test]
    fn wrap_with_zero_width() {
        assert_eq!(vec!["a", "b", "c"], wrap_words("ab c", 0));
    }
}
