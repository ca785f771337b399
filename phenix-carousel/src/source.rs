//! Image reference classification and source resolution.

use phenix_model::Category;

const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// A gallery image reference, classified once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// Externally hosted asset, used verbatim.
    Absolute(&'a str),
    /// Bare filename inside the category's asset directory.
    Local(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(reference: &'a str) -> Self {
        if ABSOLUTE_SCHEMES
            .iter()
            .any(|scheme| reference.starts_with(scheme))
        {
            ImageRef::Absolute(reference)
        } else {
            ImageRef::Local(reference)
        }
    }

    pub fn resolve(self, category: Category) -> String {
        match self {
            ImageRef::Absolute(url) => url.to_string(),
            ImageRef::Local(filename) => {
                format!("/{}/{}", category.asset_dir(), filename)
            }
        }
    }
}

/// Renderable address for `reference` within `category`.
pub fn resolve_source(reference: &str, category: Category) -> String {
    ImageRef::classify(reference).resolve(category)
}

/// Alt text for the image at `index` (zero based).
pub fn alt_text(title: &str, index: usize) -> String {
    format!("{title} - Image {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_local_and_absolute_references() {
        let images = ["a.jpg", "https://cdn.example.com/b.jpg"];
        let resolved: Vec<_> = images
            .iter()
            .map(|image| resolve_source(image, Category::Art))
            .collect();
        assert_eq!(resolved, ["/art/a.jpg", "https://cdn.example.com/b.jpg"]);
        assert_eq!(images, ["a.jpg", "https://cdn.example.com/b.jpg"]);
    }

    #[test]
    fn fittings_use_the_amenagement_directory() {
        assert_eq!(
            resolve_source("portail-blanc.JPG", Category::Fittings),
            "/amenagement/portail-blanc.JPG"
        );
    }

    #[test]
    fn plain_http_is_absolute() {
        assert_eq!(
            ImageRef::classify("http://example.com/x.png"),
            ImageRef::Absolute("http://example.com/x.png")
        );
        assert_eq!(ImageRef::classify("httpx.png"), ImageRef::Local("httpx.png"));
    }

    #[test]
    fn resolution_is_stable_across_calls() {
        let first = resolve_source("rose.JPG", Category::Art);
        let second = resolve_source("rose.JPG", Category::Art);
        assert_eq!(first, second);
    }

    #[test]
    fn alt_text_is_one_based() {
        assert_eq!(alt_text("L'Aigle Royal", 0), "L'Aigle Royal - Image 1");
    }
}
