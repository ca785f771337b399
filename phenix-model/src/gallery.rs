use crate::category::Category;
use chrono::{DateTime, Utc};

/// One titled, categorized record with an ordered set of images.
///
/// `images` holds either bare filenames bundled under the category's asset
/// directory or absolute URLs returned by the blob store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GalleryEntry {
    pub id: i32,
    #[cfg_attr(feature = "serde", serde(rename = "titre", alias = "title"))]
    pub title: String,
    pub description: String,
    pub category: Category,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin payload for creating or replacing an entry.
///
/// Every field is optional on the wire so the handlers can answer with a
/// precise message instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryEntryInput {
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "titre", alias = "title")
    )]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Option<Vec<String>>,
}

/// Validated entry content handed to the repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntryDraft {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

impl GalleryEntryInput {
    /// Title and description must be present and non-blank; missing images
    /// become an empty list.
    pub fn into_draft(self) -> Option<GalleryEntryDraft> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let description = self.description.filter(|d| !d.trim().is_empty())?;
        Some(GalleryEntryDraft {
            title,
            description,
            images: self.images.unwrap_or_default(),
        })
    }
}

/// Listing order for gallery queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryOrder {
    /// Admin tables list entries by id.
    IdAscending,
    /// Public pages show the latest work first.
    NewestFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title_and_description() {
        let missing_title = GalleryEntryInput {
            title: None,
            description: Some("Pièce unique".into()),
            images: None,
        };
        assert!(missing_title.into_draft().is_none());

        let blank_description = GalleryEntryInput {
            title: Some("Portail".into()),
            description: Some("   ".into()),
            images: None,
        };
        assert!(blank_description.into_draft().is_none());
    }

    #[test]
    fn draft_defaults_images_to_empty() {
        let input = GalleryEntryInput {
            title: Some("Portail Blanc".into()),
            description: Some("Portail en fer forgé".into()),
            images: None,
        };
        let draft = input.into_draft().expect("valid input");
        assert!(draft.images.is_empty());
        assert_eq!(draft.title, "Portail Blanc");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn input_accepts_french_and_english_title_keys() {
        let french: GalleryEntryInput =
            serde_json::from_str(r#"{"titre":"Ange","description":"d"}"#)
                .expect("titre");
        let english: GalleryEntryInput =
            serde_json::from_str(r#"{"title":"Ange","description":"d"}"#)
                .expect("title");
        assert_eq!(french, english);
    }
}
