//! Keyword highlighting for OCR output.

use regex::RegexBuilder;

/// Split a comma-separated keyword list, dropping blank entries.
pub fn parse_keywords(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wrap every case-insensitive occurrence of each keyword in
/// `<span style='color:{color}'>…</span>`, keeping the matched text's case.
///
/// All keywords are matched in a single pass, longest first, so a keyword
/// is never highlighted inside markup inserted for another one.
pub fn highlight_keywords<S: AsRef<str>>(text: &str, keywords: &[S], color: &str) -> String {
    let mut keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .collect();
    if text.is_empty() || keywords.is_empty() {
        return text.to_string();
    }

    keywords.sort_by(|a, b| b.len().cmp(&a.len()));
    keywords.dedup();

    let pattern = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("<span style='color:{color}'>{}</span>", &caps[0])
            })
            .into_owned(),
        Err(_) => text.to_string(),
    }
}
