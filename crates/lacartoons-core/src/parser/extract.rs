//! Field-level extraction primitives shared by the page parsers
//!
//! A [`FieldRule`] declares, once per output field, where the value lives,
//! how it is read and what happens when it is missing. [`isolate`] runs a
//! group of related reads and turns any fault into a logged, degraded value
//! instead of aborting the whole page.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::ExtractError;
use crate::url::absolutize;

/// How the value of a matched element is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// All descendant text, trimmed once at the ends
    Text,
    /// Every text node trimmed and concatenated (see [`squashed_text`])
    Squashed,
    /// Attribute value, trimmed, resolved against the site origin
    Link(&'static str),
}

/// What a rule yields when its element or attribute is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Absence is reported as a fault
    Required,
    /// Absence silently yields the given placeholder
    Placeholder(&'static str),
}

/// Declarative description of one output field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub selector: &'static str,
    pub read: Read,
    pub fallback: Fallback,
}

impl FieldRule {
    pub const fn new(selector: &'static str, read: Read, fallback: Fallback) -> Self {
        Self {
            selector,
            read,
            fallback,
        }
    }

    /// Apply the rule to the first match below `scope`
    ///
    /// Only structural absence is covered by the fallback. A link that is
    /// present but cannot be resolved is always a fault.
    pub fn extract(&self, scope: ElementRef<'_>, base: &Url) -> Result<String, ExtractError> {
        let selector = compile(self.selector)?;
        let Some(element) = scope.select(&selector).next() else {
            return self.absent(ExtractError::MissingElement(self.selector));
        };

        match self.read {
            Read::Text => Ok(trimmed_text(element)),
            Read::Squashed => Ok(squashed_text(element)),
            Read::Link(attr) => match element.value().attr(attr).map(str::trim) {
                Some(href) if !href.is_empty() => absolutize(base, href),
                _ => self.absent(ExtractError::MissingAttribute {
                    selector: self.selector,
                    attr,
                }),
            },
        }
    }

    fn absent(&self, fault: ExtractError) -> Result<String, ExtractError> {
        match self.fallback {
            Fallback::Required => Err(fault),
            Fallback::Placeholder(value) => Ok(value.to_string()),
        }
    }
}

/// Parse one of the hard-coded selectors
pub fn compile(selector: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|_| ExtractError::InvalidSelector(selector))
}

/// First element under `scope` matching `selector`
pub fn select_first<'a>(
    scope: ElementRef<'a>,
    selector: &'static str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let compiled = compile(selector)?;
    Ok(scope.select(&compiled).next())
}

/// All descendant text joined verbatim and trimmed at the ends
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Every descendant text node trimmed, empties dropped, joined with no separator
///
/// `<a><span>12-</span> El inicio </a>` becomes `"12-El inicio"`.
pub fn squashed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Direct child text nodes only, each trimmed, joined with no separator
pub fn direct_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .collect()
}

/// First direct child text node that is not blank, trimmed
pub fn first_text_node(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .find(|t| !t.is_empty())
}

/// Strip surrounding whitespace and trailing hyphens from a number label
///
/// `"Capitulo 12 -"` becomes `"Capitulo 12"`.
pub fn strip_number_label(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

/// Outcome of a fault-isolated group of reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Group<T> {
    /// Every read in the group succeeded
    Complete(T),
    /// A read failed; `value` holds whatever was assembled before the fault
    Degraded { value: T, error: ExtractError },
}

impl<T> Group<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Group::Degraded { .. })
    }

    pub fn into_value(self) -> T {
        match self {
            Group::Complete(value) | Group::Degraded { value, .. } => value,
        }
    }
}

/// Run `fill` against a default value, absorbing any fault it reports
///
/// `fill` writes into the value as it goes, so a failure part-way keeps the
/// fields written before it. Faults are logged under `group`.
pub fn isolate<T, F>(group: &'static str, fill: F) -> Group<T>
where
    T: Default,
    F: FnOnce(&mut T) -> Result<(), ExtractError>,
{
    let mut value = T::default();
    match fill(&mut value) {
        Ok(()) => Group::Complete(value),
        Err(error) => {
            tracing::warn!(group, error = %error, "extraction group degraded");
            Group::Degraded { value, error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://www.lacartoons.com").unwrap()
    }

    fn fragment(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_text_rule_reads_trimmed_text() {
        let doc = fragment(r#"<div><p class="name">  Coraje  </p></div>"#);
        let rule = FieldRule::new(".name", Read::Text, Fallback::Placeholder("N/A"));
        assert_eq!(rule.extract(doc.root_element(), &base()).unwrap(), "Coraje");
    }

    #[test]
    fn test_placeholder_on_missing_element() {
        let doc = fragment("<div></div>");
        let rule = FieldRule::new(".name", Read::Text, Fallback::Placeholder("Desconocido"));
        assert_eq!(
            rule.extract(doc.root_element(), &base()).unwrap(),
            "Desconocido"
        );
    }

    #[test]
    fn test_required_rule_faults_on_missing_element() {
        let doc = fragment("<div></div>");
        let rule = FieldRule::new(".valoracion1", Read::Text, Fallback::Required);
        assert_eq!(
            rule.extract(doc.root_element(), &base()),
            Err(ExtractError::MissingElement(".valoracion1"))
        );
    }

    #[test]
    fn test_link_rule_absolutizes() {
        let doc = fragment(r#"<img class="poster" src="/assets/p.jpg">"#);
        let rule = FieldRule::new("img.poster", Read::Link("src"), Fallback::Required);
        assert_eq!(
            rule.extract(doc.root_element(), &base()).unwrap(),
            "https://www.lacartoons.com/assets/p.jpg"
        );
    }

    #[test]
    fn test_link_rule_missing_attribute_uses_placeholder() {
        let doc = fragment(r#"<img class="poster">"#);
        let rule = FieldRule::new("img", Read::Link("src"), Fallback::Placeholder("Sin imagen"));
        assert_eq!(
            rule.extract(doc.root_element(), &base()).unwrap(),
            "Sin imagen"
        );
    }

    #[test]
    fn test_link_rule_broken_link_is_fault_even_with_placeholder() {
        let doc = fragment(r#"<img src="http://[broken">"#);
        let rule = FieldRule::new("img", Read::Link("src"), Fallback::Placeholder("Sin imagen"));
        assert!(matches!(
            rule.extract(doc.root_element(), &base()),
            Err(ExtractError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let doc = fragment("<div></div>");
        let rule = FieldRule::new("p:nth-of-type(", Read::Text, Fallback::Placeholder(""));
        assert_eq!(
            rule.extract(doc.root_element(), &base()),
            Err(ExtractError::InvalidSelector("p:nth-of-type("))
        );
    }

    #[test]
    fn test_squashed_text_drops_whitespace_between_nodes() {
        let doc = fragment("<a><span> 12- </span>\n   El inicio  </a>");
        let a = select_first(doc.root_element(), "a").unwrap().unwrap();
        assert_eq!(squashed_text(a), "12-El inicio");
    }

    #[test]
    fn test_direct_text_skips_nested_elements() {
        let doc = fragment("<h4> Temporada <b>ignorado</b> 1 </h4>");
        let h4 = select_first(doc.root_element(), "h4").unwrap().unwrap();
        assert_eq!(direct_text(h4), "Temporada1");
    }

    #[test]
    fn test_first_text_node_skips_blank_nodes() {
        let doc = fragment("<h3>\n  <i></i> Capitulo 3 - <span>Titulo</span></h3>");
        let h3 = select_first(doc.root_element(), "h3").unwrap().unwrap();
        assert_eq!(first_text_node(h3).as_deref(), Some("Capitulo 3 -"));
    }

    #[test]
    fn test_strip_number_label() {
        assert_eq!(strip_number_label("12-"), "12");
        assert_eq!(strip_number_label("  Capitulo 3 - "), "Capitulo 3");
        assert_eq!(strip_number_label("7"), "7");
        assert_eq!(strip_number_label("-1"), "-1");
    }

    #[test]
    fn test_isolate_complete() {
        let group: Group<Vec<u8>> = isolate("numbers", |out: &mut Vec<u8>| {
            out.push(1);
            out.push(2);
            Ok(())
        });
        assert!(!group.is_degraded());
        assert_eq!(group.into_value(), vec![1, 2]);
    }

    #[test]
    fn test_isolate_keeps_partial_value_on_fault() {
        let group: Group<Vec<u8>> = isolate("numbers", |out: &mut Vec<u8>| {
            out.push(1);
            Err(ExtractError::MissingElement("li"))
        });
        assert!(group.is_degraded());
        assert_eq!(group.into_value(), vec![1]);
    }

    proptest! {
        #[test]
        fn prop_strip_number_label_never_ends_with_hyphen(
            digits in "[0-9]{1,4}",
            tail in "[ -]{0,4}",
        ) {
            let raw = format!("{}{}", digits, tail);
            let stripped = strip_number_label(&raw);
            prop_assert_eq!(stripped, digits);
        }
    }
}
