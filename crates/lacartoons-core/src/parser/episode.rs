//! Episode playback page parser for lacartoons.com
//!
//! Never fails: each group of fields is read in isolation and falls back
//! to empty strings.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::ExtractError;
use crate::types::{EpisodeDetail, EpisodeInfo};
use crate::url::absolutize;

use super::extract::{
    compile, direct_text, first_text_node, isolate, select_first, squashed_text,
    strip_number_label, Fallback, FieldRule, Read,
};

const SERIES_TITLE: &str = "h2.subtitulo-linea";
const VIDEO: FieldRule = FieldRule::new(
    "div.serie-video-informacion iframe",
    Read::Link("src"),
    Fallback::Placeholder(""),
);
const INFO_HEADER: &str = "div.serie-video-informacion h3";
const INFO_TITLE: &str = "span";
const NAV_CONTROLS: &str = "div.controles-episodios";
const NAV_LINK: &str = "a";
const REVIEW: FieldRule = FieldRule::new("div.resena-serie p", Read::Squashed, Fallback::Placeholder(""));

#[derive(Default)]
struct NavLinks {
    previous: String,
    next: String,
}

/// Parse an episode playback page.
///
/// # Arguments
/// * `html` - Raw HTML of the episode page
/// * `base` - Site origin used to absolutize links
pub fn parse_episode_detail(html: &str, base: &Url) -> EpisodeDetail {
    let document = Html::parse_document(html);
    extract_episode_detail(&document, base)
}

/// Extract episode detail from an already parsed document.
pub fn extract_episode_detail(document: &Html, base: &Url) -> EpisodeDetail {
    let root = document.root_element();

    let series_title = isolate("episode series title", |title: &mut String| {
        if let Some(header) = select_first(root, SERIES_TITLE)? {
            *title = direct_text(header);
        }
        Ok(())
    })
    .into_value();

    let video_url = isolate("episode video", |url: &mut String| {
        *url = VIDEO.extract(root, base)?;
        Ok(())
    })
    .into_value();

    let episode_info = isolate("episode info", |info: &mut EpisodeInfo| {
        let Some(header) = select_first(root, INFO_HEADER)? else {
            return Ok(());
        };
        info.number_info = first_text_node(header)
            .map(|label| strip_number_label(&label))
            .unwrap_or_default();
        if let Some(span) = select_first(header, INFO_TITLE)? {
            info.title = squashed_text(span);
        }
        Ok(())
    })
    .into_value();

    let nav = isolate("episode navigation", |nav: &mut NavLinks| {
        if let Some(controls) = select_first(root, NAV_CONTROLS)? {
            *nav = extract_nav_links(controls, base)?;
        }
        Ok(())
    })
    .into_value();

    let review = isolate("episode review", |review: &mut String| {
        *review = REVIEW.extract(root, base)?;
        Ok(())
    })
    .into_value();

    EpisodeDetail {
        series_title,
        video_url,
        episode_info,
        previous_url: nav.previous,
        next_url: nav.next,
        review,
    }
}

/// Previous and next links; both stay empty unless there are at least two.
fn extract_nav_links(controls: ElementRef<'_>, base: &Url) -> Result<NavLinks, ExtractError> {
    let link_selector = compile(NAV_LINK)?;
    let links: Vec<ElementRef<'_>> = controls.select(&link_selector).take(2).collect();

    let [previous, next] = links.as_slice() else {
        return Ok(NavLinks::default());
    };

    Ok(NavLinks {
        previous: absolutize(base, previous.value().attr("href").unwrap_or_default())?,
        next: absolutize(base, next.value().attr("href").unwrap_or_default())?,
    })
}
