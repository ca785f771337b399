use axum::{Extension, extract::State, response::Html};
use phenix_carousel::{Carousel, escape_html, render_html};
use phenix_model::{Category, GalleryEntry, GalleryOrder, sort_by_numeric_suffix};

use super::layout::{NavItem, Page};
use crate::infra::{app_state::AppState, errors::AppResult};

fn heading(category: Category) -> (&'static str, &'static str, &'static str) {
    match category {
        Category::Art => (
            "Art en fer",
            "Sculptures et pièces uniques forgées à la main.",
            "Aucune œuvre disponible pour le moment.",
        ),
        Category::Fittings => (
            "Aménagements métalliques",
            "Toutes les créations de la catégorie \"aménagement\".",
            "Aucun aménagement disponible pour le moment.",
        ),
    }
}

/// One card: carousel over the numerically ordered images, then the text.
pub fn render_entry(entry: &GalleryEntry) -> String {
    let images = sort_by_numeric_suffix(&entry.images);
    let carousel = Carousel::new(images, entry.title.clone(), entry.category);
    format!(
        r#"<article class="gallery-card" id="entry-{id}">
{carousel}
<div class="gallery-card-body"><h2>{title}</h2><p>{description}</p></div>
</article>"#,
        id = entry.id,
        carousel = render_html(&carousel),
        title = escape_html(&entry.title),
        description = escape_html(&entry.description),
    )
}

pub fn render_gallery(category: Category, entries: &[GalleryEntry]) -> String {
    let (title, intro, empty) = heading(category);
    let content = if entries.is_empty() {
        format!(r#"<p class="gallery-empty">{empty}</p>"#)
    } else {
        let cards: String = entries.iter().map(render_entry).collect();
        format!(r#"<div class="gallery-grid">{cards}</div>"#)
    };
    format!(
        r#"<section class="gallery-intro"><h1>{title}</h1><p>{}</p></section>
<section class="gallery">{content}</section>"#,
        escape_html(intro)
    )
}

pub async fn gallery_page(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
) -> AppResult<Html<String>> {
    let entries = state
        .db
        .gallery()
        .list(category, GalleryOrder::NewestFirst)
        .await?;
    let active = match category {
        Category::Art => NavItem::Art,
        Category::Fittings => NavItem::Fittings,
    };
    Ok(Html(
        Page {
            title: category.label(),
            active,
            body: render_gallery(category, &entries),
            carousel: !entries.is_empty(),
        }
        .render(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(images: &[&str]) -> GalleryEntry {
        GalleryEntry {
            id: 7,
            title: "Portail Noir".into(),
            description: "Portail <imposant>".into(),
            category: Category::Fittings,
            images: images.iter().map(|i| i.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_first_image_by_numeric_suffix() {
        let html = render_entry(&entry(&["portail-noir-2.JPG", "portail-noir-1.JPG"]));
        assert!(html.contains(r#"src="/amenagement/portail-noir-1.JPG""#));
        assert!(html.contains("Portail &lt;imposant&gt;"));
        assert!(html.contains("1 / 2"));
    }

    #[test]
    fn entry_without_images_shows_placeholder() {
        let html = render_entry(&entry(&[]));
        assert!(html.contains("Aucune image"));
    }

    #[test]
    fn empty_gallery_message() {
        let html = render_gallery(Category::Art, &[]);
        assert!(html.contains("Aucune œuvre disponible pour le moment."));
    }
}
