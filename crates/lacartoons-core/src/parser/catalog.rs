//! Catalog page parser for lacartoons.com
//!
//! The catalog never fails as a whole: missing pieces become placeholders,
//! and a card that cannot be read is logged and left out.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::ExtractError;
use crate::types::{CatalogPage, SeriesSummary, NOT_AVAILABLE, NO_IMAGE, UNKNOWN};
use crate::url::absolutize;

use super::extract::{compile, isolate, squashed_text, select_first, Fallback, FieldRule, Read};

const PAGINATION: &str = "ul.pagination";
const PAGE_ITEM: &str = "li.page-item";
const SERIES_CARD: &str = ".conjuntos-series a";

const NAME: FieldRule = FieldRule::new(".nombre-serie", Read::Text, Fallback::Placeholder(UNKNOWN));
const CHANNEL: FieldRule = FieldRule::new(
    ".marcador.marcadorSeries",
    Read::Text,
    Fallback::Placeholder(NOT_AVAILABLE),
);
const YEAR: FieldRule = FieldRule::new(".marcador-ano", Read::Text, Fallback::Placeholder(NOT_AVAILABLE));
const RATING: FieldRule = FieldRule::new(".valoracion", Read::Text, Fallback::Placeholder(NOT_AVAILABLE));
const IMAGE: FieldRule = FieldRule::new("img", Read::Link("src"), Fallback::Placeholder(NO_IMAGE));

/// Parse a catalog listing page.
///
/// # Arguments
/// * `html` - Raw HTML of a catalog page
/// * `base` - Site origin used to absolutize links
pub fn parse_catalog(html: &str, base: &Url) -> CatalogPage {
    let document = Html::parse_document(html);
    extract_catalog(&document, base)
}

/// Extract a catalog page from an already parsed document.
pub fn extract_catalog(document: &Html, base: &Url) -> CatalogPage {
    let root = document.root_element();

    let total_pages = isolate("catalog pagination", |total: &mut u32| {
        *total = extract_total_pages(root)?;
        Ok(())
    })
    .into_value()
    .max(1);

    let items = isolate("catalog cards", |items: &mut Vec<SeriesSummary>| {
        let card_selector = compile(SERIES_CARD)?;
        for card in root.select(&card_selector) {
            let summary = isolate("catalog card", |slot: &mut Option<SeriesSummary>| {
                *slot = Some(parse_series_card(card, base)?);
                Ok(())
            });
            if let Some(summary) = summary.into_value() {
                items.push(summary);
            }
        }
        Ok(())
    })
    .into_value();

    CatalogPage { total_pages, items }
}

/// Highest purely numeric page item, 1 when there is none.
fn extract_total_pages(root: ElementRef<'_>) -> Result<u32, ExtractError> {
    let Some(pagination) = select_first(root, PAGINATION)? else {
        return Ok(1);
    };

    let item_selector = compile(PAGE_ITEM)?;
    let highest = pagination
        .select(&item_selector)
        .filter_map(|item| parse_page_number(&squashed_text(item)))
        .max();

    Ok(highest.unwrap_or(1))
}

/// Parse a page item label, accepting ASCII digits only.
fn parse_page_number(label: &str) -> Option<u32> {
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}

fn parse_series_card(card: ElementRef<'_>, base: &Url) -> Result<SeriesSummary, ExtractError> {
    let href = card.value().attr("href").unwrap_or_default();

    Ok(SeriesSummary {
        url: absolutize(base, href)?,
        name: NAME.extract(card, base)?,
        channel: CHANNEL.extract(card, base)?,
        year: YEAR.extract(card, base)?,
        rating: RATING.extract(card, base)?,
        image_url: IMAGE.extract(card, base)?,
    })
}
