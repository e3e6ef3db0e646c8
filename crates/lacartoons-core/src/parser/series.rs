//! Series detail parser for lacartoons.com
//!
//! Parses a series page into its info block and its season listing.
//! The info block is all-or-nothing; the season listing degrades.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{ExtractError, LaCartoonsError, Result};
use crate::types::{EpisodeSummary, Season, SeriesDetail, NOT_AVAILABLE, UNKNOWN};
use crate::url::absolutize;

use super::extract::{
    compile, direct_text, first_text_node, isolate, select_first, squashed_text,
    strip_number_label, Fallback, FieldRule, Read,
};

const INFO_CONTAINER: &str = ".all-serie";
const EPISODES_CONTAINER: &str = ".contenedor-episodio-temporada";

const TITLE_HEADER: &str = "h2.subtitulo-serie-seccion";
const TITLE_CHANNEL: FieldRule = FieldRule::new("span", Read::Squashed, Fallback::Required);

const BACKDROP: FieldRule = FieldRule::new("img.fondo-serie-seccion", Read::Link("src"), Fallback::Required);
const POSTER: FieldRule = FieldRule::new(".imagen-serie img", Read::Link("src"), Fallback::Required);
const EPISODE_COUNT: FieldRule = FieldRule::new(
    ".informacion-serie-seccion p:nth-of-type(1) span",
    Read::Squashed,
    Fallback::Required,
);
const LANGUAGE: FieldRule = FieldRule::new(
    ".informacion-serie-seccion p:nth-of-type(2) span",
    Read::Squashed,
    Fallback::Required,
);
const YEAR: FieldRule = FieldRule::new(".marcador.marcador-año", Read::Squashed, Fallback::Required);
const RATING: FieldRule = FieldRule::new(".valoracion1", Read::Squashed, Fallback::Required);
const SYNOPSIS: FieldRule = FieldRule::new(
    ".informacion-serie-seccion p:nth-of-type(5) span",
    Read::Squashed,
    Fallback::Required,
);

const SEASON_HEADER: &str = "h4.accordion";
const SEASON_PANEL: &str = "div.episodio-panel";
const EPISODE_LIST: &str = "ul.listas-de-episodion";
const EPISODE_ITEM: &str = "li";
const EPISODE_LINK: &str = "a";
const EPISODE_NUMBER: &str = "span";

/// Parse series detail from a series page.
///
/// # Arguments
/// * `html` - Raw HTML of the series page
/// * `base` - Site origin used to absolutize links
///
/// # Returns
/// * `Ok(SeriesDetail)` with the info block and whatever seasons could be read
/// * `Err(LaCartoonsError::RequiredInfoNotFound)` if a mandatory container is missing
/// * `Err(LaCartoonsError::Extraction)` if a mandatory info field is missing
pub fn parse_series_detail(html: &str, base: &Url) -> Result<SeriesDetail> {
    let document = Html::parse_document(html);
    extract_series_detail(&document, base)
}

/// Extract series detail from an already parsed document.
pub fn extract_series_detail(document: &Html, base: &Url) -> Result<SeriesDetail> {
    let root = document.root_element();

    let info = required_container(root, INFO_CONTAINER)?;
    let episodes = required_container(root, EPISODES_CONTAINER)?;

    let mut detail = extract_info_block(info, base)?;
    detail.seasons = parse_seasons(episodes, base);

    Ok(detail)
}

fn required_container<'a>(root: ElementRef<'a>, container: &'static str) -> Result<ElementRef<'a>> {
    select_first(root, container)?.ok_or(LaCartoonsError::RequiredInfoNotFound { container })
}

/// Read every info-block field; the first fault aborts the whole block.
fn extract_info_block(info: ElementRef<'_>, base: &Url) -> std::result::Result<SeriesDetail, ExtractError> {
    let backdrop_url = BACKDROP.extract(info, base)?;

    let (title, channel) = match select_first(info, TITLE_HEADER)? {
        Some(header) => {
            let title = first_text_node(header).ok_or(ExtractError::MissingText(TITLE_HEADER))?;
            (title, TITLE_CHANNEL.extract(header, base)?)
        }
        None => (UNKNOWN.to_string(), NOT_AVAILABLE.to_string()),
    };

    Ok(SeriesDetail {
        backdrop_url,
        title,
        channel,
        poster_url: POSTER.extract(info, base)?,
        episode_count: EPISODE_COUNT.extract(info, base)?,
        language: LANGUAGE.extract(info, base)?,
        year: YEAR.extract(info, base)?,
        rating: RATING.extract(info, base)?,
        synopsis: SYNOPSIS.extract(info, base)?,
        seasons: Vec::new(),
    })
}

/// Parse the season listing in document order.
///
/// Each header takes the first `div.episodio-panel` among its following
/// siblings; headers with none are left out. A fault ends the listing and
/// keeps the seasons completed before it.
pub fn parse_seasons(episodes: ElementRef<'_>, base: &Url) -> Vec<Season> {
    isolate("series seasons", |seasons: &mut Vec<Season>| {
        let header_selector = compile(SEASON_HEADER)?;
        let panel_selector = compile(SEASON_PANEL)?;

        for header in episodes.select(&header_selector) {
            let panel = header
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| panel_selector.matches(sibling));

            let Some(panel) = panel else {
                continue;
            };

            seasons.push(Season {
                name: direct_text(header),
                episodes: parse_panel_episodes(panel, base)?,
            });
        }
        Ok(())
    })
    .into_value()
}

fn parse_panel_episodes(panel: ElementRef<'_>, base: &Url) -> std::result::Result<Vec<EpisodeSummary>, ExtractError> {
    let Some(list) = select_first(panel, EPISODE_LIST)? else {
        return Ok(Vec::new());
    };

    let item_selector = compile(EPISODE_ITEM)?;
    let mut episodes = Vec::new();

    for item in list.select(&item_selector) {
        let Some(link) = select_first(item, EPISODE_LINK)? else {
            continue;
        };
        episodes.push(parse_episode_link(link, base)?);
    }

    Ok(episodes)
}

fn parse_episode_link(link: ElementRef<'_>, base: &Url) -> std::result::Result<EpisodeSummary, ExtractError> {
    let url = absolutize(base, link.value().attr("href").unwrap_or_default())?;
    let full_text = squashed_text(link);

    let (number, title) = match select_first(link, EPISODE_NUMBER)? {
        Some(span) => {
            let raw = squashed_text(span);
            let title = if raw.is_empty() {
                full_text.clone()
            } else {
                full_text.replacen(&raw, "", 1)
            };
            (strip_number_label(&raw), clean_title(&title))
        }
        None => (NOT_AVAILABLE.to_string(), clean_title(&full_text)),
    };

    Ok(EpisodeSummary { url, number, title })
}

/// Trim whitespace and hyphens from both ends of an episode title.
fn clean_title(text: &str) -> String {
    text.trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.lacartoons.com").unwrap()
    }

    const INFO_BLOCK: &str = r#"
        <div class="all-serie">
            <img class="fondo-serie-seccion" src="/assets/fondo.jpg">
            <h2 class="subtitulo-serie-seccion">
                Coraje, el perro cobarde
                <span>Cartoon Network</span>
            </h2>
            <div class="imagen-serie"><img src="/assets/poster.jpg"></div>
            <div class="informacion-serie-seccion">
                <p>Episodios: <span>52</span></p>
                <p>Idioma: <span>Latino</span></p>
                <p><span class="marcador marcador-año">1999</span></p>
                <p><span class="valoracion1">4.8</span></p>
                <p>Reseña: <span>Un perro miedoso protege a sus dueños.</span></p>
            </div>
        </div>
    "#;

    fn page(info: &str, episodes: &str) -> String {
        format!("<html><body>{}{}</body></html>", info, episodes)
    }

    const EPISODES_BLOCK: &str = r#"
        <div class="contenedor-episodio-temporada">
            <h4 class="accordion">Temporada <i></i> 1</h4>
            <div class="episodio-panel">
                <ul class="listas-de-episodion">
                    <li><a href="/serie/capitulo/1?t=1"><span>Capitulo 1-</span> El pollo de la queja</a></li>
                    <li>Sin enlace</li>
                    <li><a href="/serie/capitulo/2?t=1"><span>Capitulo 2 -</span> - Un gato en la casa</a></li>
                </ul>
            </div>
            <h4 class="accordion">Temporada 2</h4>
            <h4 class="accordion">Temporada 3</h4>
            <div class="episodio-panel">
                <ul class="listas-de-episodion">
                    <li><a href="/serie/capitulo/27?t=3"><span>12-</span>Doce 12- y más</a></li>
                </ul>
            </div>
        </div>
    "#;

    #[test]
    fn test_info_block_fields() {
        let detail = parse_series_detail(&page(INFO_BLOCK, EPISODES_BLOCK), &base()).unwrap();
        assert_eq!(detail.backdrop_url, "https://www.lacartoons.com/assets/fondo.jpg");
        assert_eq!(detail.title, "Coraje, el perro cobarde");
        assert_eq!(detail.channel, "Cartoon Network");
        assert_eq!(detail.poster_url, "https://www.lacartoons.com/assets/poster.jpg");
        assert_eq!(detail.episode_count, "52");
        assert_eq!(detail.language, "Latino");
        assert_eq!(detail.year, "1999");
        assert_eq!(detail.rating, "4.8");
        assert_eq!(detail.synopsis, "Un perro miedoso protege a sus dueños.");
    }

    #[test]
    fn test_seasons_in_document_order() {
        let detail = parse_series_detail(&page(INFO_BLOCK, EPISODES_BLOCK), &base()).unwrap();
        let names: Vec<&str> = detail.seasons.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Temporada1", "Temporada 2", "Temporada 3"]);
    }

    #[test]
    fn test_header_takes_next_panel_after_header() {
        let detail = parse_series_detail(&page(INFO_BLOCK, EPISODES_BLOCK), &base()).unwrap();
        assert_eq!(detail.seasons[1].episodes, detail.seasons[2].episodes);
        assert_eq!(
            detail.seasons[2].episodes[0].url,
            "https://www.lacartoons.com/serie/capitulo/27?t=3"
        );
    }

    #[test]
    fn test_panel_found_past_interleaved_sibling() {
        let episodes = r#"
            <div class="contenedor-episodio-temporada">
                <h4 class="accordion">Temporada 1</h4>
                <span class="icono"></span>
                <br>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="/serie/capitulo/1"><span>1</span> Uno</a></li>
                    </ul>
                </div>
            </div>
        "#;
        let detail = parse_series_detail(&page(INFO_BLOCK, episodes), &base()).unwrap();
        assert_eq!(detail.seasons.len(), 1);
        assert_eq!(detail.seasons[0].name, "Temporada 1");
        assert_eq!(detail.seasons[0].episodes.len(), 1);
        assert_eq!(detail.seasons[0].episodes[0].title, "Uno");
    }

    #[test]
    fn test_trailing_header_without_panel_is_dropped() {
        let episodes = r#"
            <div class="contenedor-episodio-temporada">
                <h4 class="accordion">Temporada 1</h4>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="/serie/capitulo/1"><span>1</span> Uno</a></li>
                    </ul>
                </div>
                <h4 class="accordion">Temporada 2</h4>
            </div>
        "#;
        let detail = parse_series_detail(&page(INFO_BLOCK, episodes), &base()).unwrap();
        assert_eq!(detail.seasons.len(), 1);
        assert_eq!(detail.seasons[0].name, "Temporada 1");
        assert_eq!(detail.title, "Coraje, el perro cobarde");
    }

    #[test]
    fn test_episode_entries() {
        let detail = parse_series_detail(&page(INFO_BLOCK, EPISODES_BLOCK), &base()).unwrap();
        let episodes = &detail.seasons[0].episodes;

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].url, "https://www.lacartoons.com/serie/capitulo/1?t=1");
        assert_eq!(episodes[0].number, "Capitulo 1");
        assert_eq!(episodes[0].title, "El pollo de la queja");
        assert_eq!(episodes[1].number, "Capitulo 2");
        assert_eq!(episodes[1].title, "Un gato en la casa");
    }

    #[test]
    fn test_episode_number_removed_once() {
        let detail = parse_series_detail(&page(INFO_BLOCK, EPISODES_BLOCK), &base()).unwrap();
        let episode = &detail.seasons[2].episodes[0];
        assert_eq!(episode.number, "12");
        assert_eq!(episode.title, "Doce 12- y más");
    }

    #[test]
    fn test_episode_without_number_span() {
        let episodes = r#"
            <div class="contenedor-episodio-temporada">
                <h4 class="accordion">Especiales</h4>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="/serie/capitulo/90"> - Especial de Navidad</a></li>
                    </ul>
                </div>
            </div>
        "#;
        let detail = parse_series_detail(&page(INFO_BLOCK, episodes), &base()).unwrap();
        let episode = &detail.seasons[0].episodes[0];
        assert_eq!(episode.number, "N/A");
        assert_eq!(episode.title, "Especial de Navidad");
    }

    #[test]
    fn test_missing_info_container() {
        let result = parse_series_detail(&page("", EPISODES_BLOCK), &base());
        assert!(matches!(
            result,
            Err(LaCartoonsError::RequiredInfoNotFound { container: ".all-serie" })
        ));
    }

    #[test]
    fn test_missing_episodes_container() {
        let result = parse_series_detail(&page(INFO_BLOCK, ""), &base());
        assert!(matches!(
            result,
            Err(LaCartoonsError::RequiredInfoNotFound {
                container: ".contenedor-episodio-temporada"
            })
        ));
    }

    #[test]
    fn test_missing_mandatory_field_is_extraction_error() {
        let info = INFO_BLOCK.replace(r#"<p><span class="valoracion1">4.8</span></p>"#, "<p></p>");
        let result = parse_series_detail(&page(&info, EPISODES_BLOCK), &base());
        match result {
            Err(LaCartoonsError::Extraction(ExtractError::MissingElement(selector))) => {
                assert_eq!(selector, ".valoracion1");
            }
            other => panic!("Expected Extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_title_header_uses_placeholders() {
        let start = INFO_BLOCK.find("<h2").unwrap();
        let end = INFO_BLOCK.find("</h2>").unwrap() + "</h2>".len();
        let info = format!("{}{}", &INFO_BLOCK[..start], &INFO_BLOCK[end..]);

        let detail = parse_series_detail(&page(&info, EPISODES_BLOCK), &base()).unwrap();
        assert_eq!(detail.title, "Desconocido");
        assert_eq!(detail.channel, "N/A");
    }

    #[test]
    fn test_broken_episode_link_keeps_earlier_seasons() {
        let episodes = r#"
            <div class="contenedor-episodio-temporada">
                <h4 class="accordion">Temporada 1</h4>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="/serie/capitulo/1"><span>1</span> Uno</a></li>
                    </ul>
                </div>
                <h4 class="accordion">Temporada 2</h4>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="http://[broken"><span>1</span> Roto</a></li>
                    </ul>
                </div>
                <h4 class="accordion">Temporada 3</h4>
                <div class="episodio-panel">
                    <ul class="listas-de-episodion">
                        <li><a href="/serie/capitulo/9"><span>1</span> Nueve</a></li>
                    </ul>
                </div>
            </div>
        "#;
        let detail = parse_series_detail(&page(INFO_BLOCK, episodes), &base()).unwrap();
        assert_eq!(detail.seasons.len(), 1);
        assert_eq!(detail.seasons[0].name, "Temporada 1");
        assert_eq!(detail.synopsis, "Un perro miedoso protege a sus dueños.");
    }

    #[test]
    fn test_panel_without_list_yields_empty_season() {
        let episodes = r#"
            <div class="contenedor-episodio-temporada">
                <h4 class="accordion">Temporada 1</h4>
                <div class="episodio-panel"></div>
            </div>
        "#;
        let detail = parse_series_detail(&page(INFO_BLOCK, episodes), &base()).unwrap();
        assert_eq!(detail.seasons.len(), 1);
        assert!(detail.seasons[0].episodes.is_empty());
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title(" - El inicio - "), "El inicio");
        assert_eq!(clean_title("Sin guiones"), "Sin guiones");
        assert_eq!(clean_title("---"), "");
    }
}
