use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Single(u64),
    Range(u64, u64),
}

impl Token {
    /// Parse one comma-separated token like "5" or "5-10".
    ///
    /// Returns `None` for anything that is not a page number or a `start-end` pair.
    fn parse(s: &str) -> Option<Self> {
        if let Some((start, end)) = s.split_once('-') {
            let start = start.trim().parse::<u64>().ok()?;
            let end = end.trim().parse::<u64>().ok()?;
            Some(Token::Range(start, end))
        } else {
            s.parse::<u64>().ok().map(Token::Single)
        }
    }

    fn add_to(self, pages: &mut BTreeSet<u32>, max_page: u32) {
        let (start, end) = match self {
            Token::Single(p) => (p, p),
            Token::Range(start, end) => (start, end),
        };

        // Clamp instead of enumerating so "1-4000000000" stays cheap.
        let start = start.max(1);
        let end = end.min(u64::from(max_page));
        if start > end {
            return;
        }

        // Both bounds are within 1..=max_page here, so they fit in u32.
        pages.extend(start as u32..=end as u32);
    }
}

/// Parse a page specification like "1, 3, 5-10, 15" into sorted, distinct 1-based page numbers.
///
/// Malformed tokens, out-of-range pages and descending ranges are dropped without error. An
/// empty result means nothing valid was selected.
pub fn parse_range(spec: &str, max_page: u32) -> Vec<u32> {
    let mut pages = BTreeSet::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match Token::parse(part) {
            Some(token) => token.add_to(&mut pages, max_page),
            None => tracing::trace!(token = part, "skipping malformed page token"),
        }
    }

    pages.into_iter().collect()
}

/// Summarize a page selection for use in output file names.
///
/// Gives "all" when every page of the document is selected, otherwise the page numbers joined
/// with commas, with consecutive runs collapsed to "start-end".
pub fn range_descriptor(pages: &[u32], total_pages: u32) -> String {
    if total_pages > 0 && pages.len() == total_pages as usize {
        return "all".to_string();
    }

    let mut parts = Vec::new();
    let mut iter = pages.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while let Some(&next) = iter.peek() {
            if next != end + 1 {
                break;
            }
            end = next;
            iter.next();
        }

        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(",")
}
