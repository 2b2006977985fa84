use scraper::{ElementRef, Selector};

use super::Error;

/// Text of the first element matched by `selector` under `element`.
pub(super) fn child_text<'a>(
    selector: &Selector,
    element: ElementRef<'a>,
    parent_label: &str,
    child_label: &str,
) -> Result<&'a str, Error> {
    let child = element.select(selector).next().ok_or_else(|| {
        Error::html_parse_error(&format!("every {parent_label} should have a {child_label}"))
    })?;
    inner_text(child, child_label)
}

/// First non-blank text node inside `element`.
pub(super) fn inner_text<'a>(element: ElementRef<'a>, label: &str) -> Result<&'a str, Error> {
    element
        .text()
        .find(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::text_node_parse_error(&format!("{label} should have text inside")))
}
