use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The two galleries of the site.
///
/// The storage and URL representation of `Fittings` is `"amenagement"`,
/// which is also the name of its asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    #[cfg_attr(feature = "serde", serde(rename = "art"))]
    Art,
    #[cfg_attr(feature = "serde", serde(rename = "amenagement"))]
    Fittings,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Art, Category::Fittings];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Art => "art",
            Category::Fittings => "amenagement",
        }
    }

    /// Directory under the public root holding the bundled images.
    pub const fn asset_dir(self) -> &'static str {
        self.as_str()
    }

    /// Human readable heading used by the public pages.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Art => "Art en fer",
            Category::Fittings => "Aménagements",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "art" => Ok(Category::Art),
            "amenagement" => Ok(Category::Fittings),
            other => Err(ModelError::UnknownCategory(other.to_string())),
        }
    }
}
