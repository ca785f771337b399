use phenix_carousel::escape_html;

use crate::routes::paths;

pub const SITE_NAME: &str = "Phenix Ferronnerie";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Art,
    Fittings,
    Contact,
    Admin,
}

const NAV: [(NavItem, &str, &str); 4] = [
    (NavItem::Home, paths::HOME, "Accueil"),
    (NavItem::Art, "/art", "Art"),
    (NavItem::Fittings, "/amenagement", "Aménagement"),
    (NavItem::Contact, paths::CONTACT_PAGE, "Contact"),
];

/// Loads the carousel bundle and hydrates every carousel on the page.
const CAROUSEL_SCRIPT: &str = r#"<script type="module">
import init, { hydrateAll } from "/pkg/phenix_carousel.js";
init().then(() => hydrateAll()).catch((err) => console.warn("carousel", err));
</script>"#;

#[derive(Debug)]
pub struct Page<'a> {
    pub title: &'a str,
    pub active: NavItem,
    pub body: String,
    pub carousel: bool,
}

impl Page<'_> {
    pub fn render(&self) -> String {
        let nav: String = NAV
            .iter()
            .map(|(item, href, label)| {
                let class = if *item == self.active { r#" class="active""# } else { "" };
                format!(r#"<a href="{href}"{class}>{label}</a>"#)
            })
            .collect();

        let title = if self.active == NavItem::Home {
            SITE_NAME.to_string()
        } else {
            format!("{} | {SITE_NAME}", escape_html(self.title))
        };
        let script = if self.carousel { CAROUSEL_SCRIPT } else { "" };

        format!(
            r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/styles.css">
</head>
<body>
<header class="site-header"><a class="brand" href="/">{SITE_NAME}</a><nav>{nav}</nav></header>
<main>
{body}
</main>
<footer class="site-footer"><p>Acier, feu et précision, créations {SITE_NAME}.</p></footer>
{script}
</body>
</html>
"#,
            body = self.body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_active_link_and_escapes_title() {
        let html = Page {
            title: "<Art>",
            active: NavItem::Art,
            body: String::new(),
            carousel: false,
        }
        .render();
        assert!(html.contains(r#"<a href="/art" class="active">Art</a>"#));
        assert!(html.contains("<title>&lt;Art&gt; | Phenix Ferronnerie</title>"));
        assert!(!html.contains("hydrateAll"));
    }
}
