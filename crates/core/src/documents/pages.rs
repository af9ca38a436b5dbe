//! Page-range selectors.

/// Parse a selector such as `"1-3,5"` into sorted, de-duplicated 1-based
/// page numbers within `1..=max_pages`.
///
/// Spaces are ignored and malformed tokens are skipped. An empty selector
/// selects every page; a selector that yields nothing, including one made
/// only of spaces, selects page 1.
pub fn parse_page_selection(selector: &str, max_pages: u32) -> Vec<u32> {
    if selector.is_empty() {
        return (1..=max_pages).collect();
    }
    let selector: String = selector.chars().filter(|c| *c != ' ').collect();

    let in_range = |page: u32| (1..=max_pages).contains(&page);
    let mut pages = Vec::new();

    for token in selector.split(',') {
        match token.split_once('-') {
            Some((start, end)) => {
                let (Some(start), Some(end)) = (parse_number(start), parse_number(end)) else {
                    continue;
                };
                if start == 0 || end == 0 || start > max_pages {
                    continue;
                }
                pages.extend(start..=end.min(max_pages));
            }
            None => {
                if let Some(page) = parse_number(token).filter(|p| in_range(*p)) {
                    pages.push(page);
                }
            }
        }
    }

    pages.sort_unstable();
    pages.dedup();
    if pages.is_empty() {
        pages.push(1);
    }
    pages
}

/// Only plain ASCII digits count; signs and blanks do not.
fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
