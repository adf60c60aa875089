/// A run of text as it appears in a page's content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub text: String,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        TextFragment { text: text.into() }
    }
}

/// Split the output of `lopdf::Document::extract_text` into fragments.
///
/// lopdf ends every text object (`BT` .. `ET`) with a newline, so each non-blank line is one
/// fragment.
pub fn fragments_from_text(text: &str) -> Vec<TextFragment> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(TextFragment::new)
        .collect()
}

/// Join fragments with a single space each
pub fn join_fragments(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_skip_blank_lines() {
        let fragments = fragments_from_text("Title\n\n  \nFirst line  \nSecond\n");
        assert_eq!(
            fragments,
            vec![
                TextFragment::new("Title"),
                TextFragment::new("First line"),
                TextFragment::new("Second"),
            ]
        );
    }

    #[test]
    fn test_join_fragments() {
        let fragments = vec![TextFragment::new("Hello"), TextFragment::new("world")];
        assert_eq!(join_fragments(&fragments), "Hello world");
        assert_eq!(join_fragments(&[]), "");
    }
}
