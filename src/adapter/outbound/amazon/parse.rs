//! Product page extraction.
//!
//! Amazon ships several page layouts; each field is tried against a list of
//! selectors in order and the first non-empty match wins.

use scraper::{ElementRef, Html, Selector};
use url::Url;

const TITLE_SELECTORS: &[&str] = &["#productTitle", "#title", ".product-title-word-break"];

const PRICE_SELECTORS: &[&str] = &[
    ".a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price",
];

const AVAILABILITY_SELECTORS: &[&str] = &["#availability"];

const CAPTCHA_SELECTORS: &[&str] = &["form[action*='validateCaptcha']", "#captchacharacters"];

/// Fields read off a product page, price still as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    pub price_text: String,
    pub availability: Option<String>,
}

/// Why a page could not be read as a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// Served a robot check or CAPTCHA instead of the product.
    RobotCheck,
    /// No known title element; the layout is not recognized.
    MissingTitle,
    /// Title found but no price element.
    MissingPrice,
}

/// Extract title, price text and availability from a product page.
pub fn parse_product_page(html: &str) -> Result<Listing, PageError> {
    let document = Html::parse_document(html);

    if is_robot_check(&document) {
        return Err(PageError::RobotCheck);
    }

    let title = first_match(&document, TITLE_SELECTORS, full_text).ok_or(PageError::MissingTitle)?;
    let price_text =
        first_match(&document, PRICE_SELECTORS, leading_text).ok_or(PageError::MissingPrice)?;
    let availability = first_match(&document, AVAILABILITY_SELECTORS, full_text);

    Ok(Listing {
        title,
        price_text,
        availability,
    })
}

fn is_robot_check(document: &Html) -> bool {
    if CAPTCHA_SELECTORS.iter().any(|s| select_first(document, s).is_some()) {
        return true;
    }
    select_first(document, "title")
        .map(full_text)
        .is_some_and(|t| t.to_lowercase().contains("robot check"))
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn first_match(
    document: &Html,
    selectors: &[&str],
    extract: fn(ElementRef<'_>) -> String,
) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| select_first(document, s))
        .map(extract)
        .find(|text| !text.is_empty())
}

/// All text under the element, whitespace collapsed.
fn full_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First non-blank text node. Price containers repeat the amount in split
/// visual spans after the screen-reader copy.
fn leading_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Amazon product id (ASIN) for a product URL.
///
/// Recognizes `/dp/<ASIN>`, `/gp/product/<ASIN>` and `/ASIN/<ASIN>` paths and
/// falls back to the last path segment.
#[must_use]
pub fn extract_asin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();

    let marked = segments.windows(2).find_map(|pair| match pair {
        [marker, id] if (*marker == "dp" || *marker == "product" || *marker == "ASIN") && is_asin(id) => {
            Some((*id).to_string())
        }
        _ => None,
    });

    marked.or_else(|| segments.last().map(|s| (*s).to_string()))
}

fn is_asin(candidate: &str) -> bool {
    candidate.len() == 10
        && candidate
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
