//! Typed view model derived from a carousel's state.

pub const EMPTY_LABEL: &str = "Aucune image";
pub const UNAVAILABLE_LABEL: &str = "Image non disponible";
pub const PREVIOUS_LABEL: &str = "Image précédente";
pub const NEXT_LABEL: &str = "Image suivante";

pub fn dot_label(index: usize) -> String {
    format!("Aller à l'image {}", index + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselView {
    /// Zero images: placeholder only.
    Empty,
    Gallery(GalleryView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub slide: Slide,
    /// Absent when there is a single image.
    pub controls: Option<Controls>,
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Image {
        src: String,
        alt: String,
        /// Only the first image is loaded eagerly.
        eager: bool,
    },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub dots: Vec<Dot>,
    pub counter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

impl Controls {
    pub fn new(index: usize, count: usize) -> Self {
        Self {
            dots: (0..count)
                .map(|i| Dot {
                    index: i,
                    active: i == index,
                })
                .collect(),
            counter: format!("{} / {}", index + 1, count),
        }
    }
}

impl CarouselView {
    pub fn is_empty(&self) -> bool {
        matches!(self, CarouselView::Empty)
    }

    pub fn controls(&self) -> Option<&Controls> {
        match self {
            CarouselView::Empty => None,
            CarouselView::Gallery(gallery) => gallery.controls.as_ref(),
        }
    }

    pub fn slide(&self) -> Option<&Slide> {
        match self {
            CarouselView::Empty => None,
            CarouselView::Gallery(gallery) => Some(&gallery.slide),
        }
    }
}
