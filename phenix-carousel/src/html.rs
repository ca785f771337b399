//! HTML serialisation of the carousel view.
//!
//! The server uses [`render_html`] for first paint; the browser binding
//! re-renders the inner markup with [`render_inner`] after each effect.
//! The root element carries the entry as `data-*` attributes so the
//! binding can rebuild a [`Carousel`] without another request.

use std::fmt;
use std::str::FromStr;

use phenix_model::Category;
use thiserror::Error;

use crate::component::Carousel;
use crate::view::{
    dot_label, CarouselView, Controls, Slide, EMPTY_LABEL, NEXT_LABEL,
    PREVIOUS_LABEL, UNAVAILABLE_LABEL,
};

pub const ROOT_CLASS: &str = "carousel";
pub const DATA_IMAGES: &str = "data-images";
pub const DATA_TITLE: &str = "data-title";
pub const DATA_CATEGORY: &str = "data-category";
pub const DATA_ACTION: &str = "data-action";
pub const DATA_INDEX: &str = "data-index";

pub const ACTION_PREVIOUS: &str = "previous";
pub const ACTION_NEXT: &str = "next";
pub const ACTION_GO: &str = "go";

const UNAVAILABLE_ICON: &str = concat!(
    r#"<svg class="carousel-unavailable-icon" viewBox="0 0 24 24" "#,
    r#"width="48" height="48" aria-hidden="true" fill="none" "#,
    r#"stroke="currentColor" stroke-width="2">"#,
    r#"<rect x="3" y="3" width="18" height="18" rx="2"/>"#,
    r#"<circle cx="8.5" cy="8.5" r="1.5"/>"#,
    r#"<path d="M21 15l-5-5L5 21"/></svg>"#
);

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Full component markup, root element included.
pub fn render_html(carousel: &Carousel) -> String {
    let images = serde_json::to_string(carousel.images())
        .unwrap_or_else(|_| "[]".to_string());

    let mut out = String::new();
    out.push_str(&format!(
        r#"<div class="{ROOT_CLASS}" {DATA_IMAGES}="{}" {DATA_TITLE}="{}" {DATA_CATEGORY}="{}">"#,
        escape_html(&images),
        escape_html(carousel.title()),
        carousel.category().as_str(),
    ));
    out.push_str(&render_inner(&carousel.view()));
    out.push_str("</div>");
    out
}

/// Markup inside the root element.
pub fn render_inner(view: &CarouselView) -> String {
    let gallery = match view {
        CarouselView::Empty => {
            return format!(
                r#"<div class="carousel-empty"><span>{}</span></div>"#,
                escape_html(EMPTY_LABEL)
            );
        }
        CarouselView::Gallery(gallery) => gallery,
    };

    let mut out = String::from(r#"<div class="carousel-frame">"#);
    match &gallery.slide {
        Slide::Image { src, alt, eager } => {
            out.push_str(&format!(
                r#"<img class="carousel-image" src="{}" alt="{}" loading="{}">"#,
                escape_html(src),
                escape_html(alt),
                if *eager { "eager" } else { "lazy" },
            ));
        }
        Slide::Unavailable => {
            out.push_str(r#"<div class="carousel-unavailable">"#);
            out.push_str(UNAVAILABLE_ICON);
            out.push_str(&format!(
                "<span>{}</span></div>",
                escape_html(UNAVAILABLE_LABEL)
            ));
        }
    }
    if let Some(controls) = &gallery.controls {
        render_controls(&mut out, controls);
    }
    out.push_str("</div>");
    out
}

fn render_controls(out: &mut String, controls: &Controls) {
    out.push_str(&arrow_button("carousel-prev", ACTION_PREVIOUS, PREVIOUS_LABEL, "&#8249;"));
    out.push_str(&arrow_button("carousel-next", ACTION_NEXT, NEXT_LABEL, "&#8250;"));

    out.push_str(r#"<div class="carousel-dots">"#);
    for dot in &controls.dots {
        out.push_str(&format!(
            r#"<button type="button" class="carousel-dot{}" {DATA_ACTION}="{ACTION_GO}" {DATA_INDEX}="{}" aria-label="{}"{}></button>"#,
            if dot.active { " active" } else { "" },
            dot.index,
            escape_html(&dot_label(dot.index)),
            if dot.active { r#" aria-current="true""# } else { "" },
        ));
    }
    out.push_str("</div>");

    out.push_str(&format!(
        r#"<div class="carousel-counter">{}</div>"#,
        escape_html(&controls.counter)
    ));
}

fn arrow_button(class: &str, action: &str, label: &str, glyph: &str) -> String {
    format!(
        r#"<button type="button" class="carousel-arrow {class}" {DATA_ACTION}="{action}" aria-label="{}">{glyph}</button>"#,
        escape_html(label)
    )
}

/// Why a root element could not be turned back into a [`Carousel`].
#[derive(Debug, Error)]
pub enum HydrateError {
    #[error("invalid data-images: {0}")]
    Images(#[from] serde_json::Error),

    #[error("missing data-category")]
    MissingCategory,

    #[error("invalid data-category: {0}")]
    Category(String),
}

/// Rebuilds a carousel from the root's `data-*` attribute values, as
/// written by [`render_html`].
pub fn carousel_from_attributes(
    images: Option<&str>,
    title: Option<&str>,
    category: Option<&str>,
) -> Result<Carousel, HydrateError> {
    let images: Vec<String> = match images {
        Some(raw) => serde_json::from_str(raw)?,
        None => Vec::new(),
    };
    let category = category.ok_or(HydrateError::MissingCategory)?;
    let category = Category::from_str(category)
        .map_err(|err| HydrateError::Category(err.to_string()))?;
    Ok(Carousel::new(images, title.unwrap_or_default(), category))
}

/// Hydrates each root independently. A root that fails is logged and
/// left as server markup; the others still hydrate.
pub fn hydrate_each<R, T, E, F>(
    roots: impl IntoIterator<Item = R>,
    mut hydrate: F,
) -> Vec<T>
where
    E: fmt::Debug,
    F: FnMut(R) -> Result<T, E>,
{
    roots
        .into_iter()
        .enumerate()
        .filter_map(|(position, root)| match hydrate(root) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(position, "skipping carousel: {err:?}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CarouselInput;

    #[test]
    fn empty_renders_placeholder_only() {
        let html = render_html(&Carousel::new(Vec::new(), "Rien", Category::Art));
        assert!(html.contains("Aucune image"));
        assert!(!html.contains("<img"));
        assert!(!html.contains(DATA_ACTION));
    }

    #[test]
    fn single_image_has_no_affordances() {
        let html = render_html(&Carousel::new(
            vec!["rose.JPG".into()],
            "Rose",
            Category::Art,
        ));
        assert!(html.contains(r#"src="/art/rose.JPG""#));
        assert!(!html.contains("carousel-arrow"));
        assert!(!html.contains("carousel-dot"));
        assert!(!html.contains("carousel-counter"));
    }

    #[test]
    fn multiple_images_render_controls() {
        let mut carousel = Carousel::new(
            vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
            "Trio",
            Category::Fittings,
        );
        carousel.apply(CarouselInput::NextClicked);
        let html = render_html(&carousel);

        assert_eq!(html.matches("carousel-arrow").count(), 2);
        assert_eq!(html.matches(r#"data-action="go""#).count(), 3);
        assert_eq!(html.matches("carousel-dot active").count(), 1);
        assert!(html.contains(r#"data-index="1" aria-label="Aller à l&#39;image 2" aria-current="true""#));
        assert!(html.contains(">2 / 3<"));
        assert!(html.contains(r#"src="/amenagement/b.jpg""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn load_error_shows_unavailable_with_controls() {
        let mut carousel =
            Carousel::new(vec!["a.jpg".into(), "b.jpg".into()], "Duo", Category::Art);
        carousel.apply(CarouselInput::ImageFailed);
        let html = render_inner(&carousel.view());
        assert!(html.contains("Image non disponible"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("<img"));
        assert!(html.contains("carousel-arrow"));
    }

    #[test]
    fn root_attributes_are_escaped() {
        let html = render_html(&Carousel::new(
            vec!["a\".jpg".into()],
            "L'Aigle <Royal>",
            Category::Art,
        ));
        assert!(html.contains(r#"data-title="L&#39;Aigle &lt;Royal&gt;""#));
        assert!(html.contains(r#"data-images="[&quot;a\&quot;.jpg&quot;]""#));
        assert!(html.contains(r#"data-category="art""#));
    }

    #[test]
    fn attributes_rebuild_the_rendered_carousel() {
        let carousel = carousel_from_attributes(
            Some(r#"["portail-1.jpg","portail-2.jpg"]"#),
            Some("Portail"),
            Some("amenagement"),
        )
        .expect("valid attributes");

        assert_eq!(carousel.images(), ["portail-1.jpg", "portail-2.jpg"]);
        assert_eq!(carousel.title(), "Portail");
        assert_eq!(carousel.category(), Category::Fittings);
    }

    #[test]
    fn bad_attributes_are_reported() {
        assert!(matches!(
            carousel_from_attributes(Some("[not json"), None, Some("art")),
            Err(HydrateError::Images(_))
        ));
        assert!(matches!(
            carousel_from_attributes(None, None, None),
            Err(HydrateError::MissingCategory)
        ));
        assert!(matches!(
            carousel_from_attributes(None, None, Some("sculpture")),
            Err(HydrateError::Category(_))
        ));
    }

    #[test]
    fn one_broken_root_does_not_stop_the_others() {
        let roots = [
            (Some(r#"["a.jpg"]"#), "art"),
            (Some("{broken"), "art"),
            (None, "amenagement"),
            (Some(r#"["b.jpg","c.jpg"]"#), "amenagement"),
        ];

        let hydrated = hydrate_each(roots, |(images, category)| {
            carousel_from_attributes(images, Some("Entrée"), Some(category))
        });

        assert_eq!(hydrated.len(), 3);
        assert_eq!(hydrated[0].images(), ["a.jpg"]);
        assert!(hydrated[1].is_empty());
        assert_eq!(hydrated[2].images().len(), 2);
    }
}
