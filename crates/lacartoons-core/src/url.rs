//! URL helpers for lacartoons.com
//!
//! All links pulled out of a page go through [`absolutize`], so callers never
//! see a relative URL. [`build_catalog_url`] turns catalog filters into the
//! query string the site's search form produces.

use url::Url;

use crate::error::ExtractError;
use crate::types::CatalogQuery;

/// Production origin of the site
pub const BASE_URL: &str = "https://www.lacartoons.com";

/// Marker the site's search form sends alongside a title search ("✓")
const UTF8_MARKER: &str = "✓";

/// Resolves a possibly-relative link against the site origin
///
/// # Arguments
/// * `base` - Site origin
/// * `href` - Link as found in the markup (relative, protocol-relative or absolute)
///
/// # Example
/// ```
/// use lacartoons_core::url::absolutize;
/// use url::Url;
///
/// let base = Url::parse("https://www.lacartoons.com").unwrap();
/// assert_eq!(
///     absolutize(&base, "/serie/8").unwrap(),
///     "https://www.lacartoons.com/serie/8"
/// );
/// ```
pub fn absolutize(base: &Url, href: &str) -> Result<String, ExtractError> {
    let href = href.trim();
    base.join(href)
        .map(String::from)
        .map_err(|source| ExtractError::InvalidLink {
            href: href.to_string(),
            source,
        })
}

/// Builds the catalog listing URL for the given filters
///
/// Absent or empty filters are left out. A title search also carries the
/// `utf8` marker first, matching what the site's own form submits.
///
/// # Example
/// ```
/// use lacartoons_core::url::build_catalog_url;
/// use lacartoons_core::CatalogQuery;
/// use url::Url;
///
/// let base = Url::parse("https://www.lacartoons.com").unwrap();
/// let query = CatalogQuery { category_id: Some(3), page: Some(2), ..Default::default() };
/// assert_eq!(
///     build_catalog_url(&base, &query),
///     "https://www.lacartoons.com/?Categoria_id=3&page=2"
/// );
/// ```
pub fn build_catalog_url(base: &Url, query: &CatalogQuery) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let Some(title) = query.title.as_deref().filter(|t| !t.is_empty()) {
        params.push(("utf8", UTF8_MARKER.to_string()));
        params.push(("Titulo", title.to_string()));
    }
    if let Some(category_id) = query.category_id {
        params.push(("Categoria_id", category_id.to_string()));
    }
    if let Some(page) = query.page {
        params.push(("page", page.to_string()));
    }

    let mut url = base.clone();
    url.set_path("/");
    if params.is_empty() {
        url.set_query(None);
    } else {
        let encoded = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&encoded));
    }

    url.to_string()
}
