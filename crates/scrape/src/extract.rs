use scraper::{Html, Selector};

/// Extract the count from the first `<h1>` of `html`.
///
/// Every ASCII digit of the heading's text content is concatenated and
/// parsed, so `"1,234 results"` yields `1234`. Returns `None` when there is no
/// heading, the heading holds no digits, or the digits overflow `u64`.
pub fn extract_count(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;
    let digits: String =
        heading.text().flat_map(str::chars).filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(digits = %digits, "heading digits do not fit a u64");
            None
        },
    }
}
