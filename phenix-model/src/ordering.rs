//! Display ordering for gallery images.
//!
//! Bundled photos are named `portail-noir-1.JPG`, `portail-noir-2.JPG`, ...
//! and the galleries present them by that trailing number rather than by the
//! order they were stored in.

/// Number used to order an image reference.
///
/// Takes the digit run directly before an alphabetic extension
/// (`escalier-3.jpeg` → 3), otherwise a trailing digit run (`rose12` → 12),
/// otherwise 0. Runs too long for `u64` saturate.
pub fn numeric_suffix(name: &str) -> u64 {
    let stem = match name.rfind('.') {
        Some(dot) if is_alpha_extension(&name[dot + 1..]) => Some(&name[..dot]),
        _ => None,
    };

    stem.and_then(trailing_digits)
        .or_else(|| trailing_digits(name))
        .map(|digits| digits.parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Returns a copy of `images` ordered by [`numeric_suffix`]. Equal suffixes
/// keep their relative order.
pub fn sort_by_numeric_suffix<S: AsRef<str> + Clone>(images: &[S]) -> Vec<S> {
    let mut sorted = images.to_vec();
    sorted.sort_by_key(|image| numeric_suffix(image.as_ref()));
    sorted
}

fn is_alpha_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphabetic())
}

fn trailing_digits(s: &str) -> Option<&str> {
    let start = s
        .bytes()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |pos| pos + 1);
    (start < s.len()).then(|| &s[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_before_extension() {
        assert_eq!(numeric_suffix("portail-noir-2.JPG"), 2);
        assert_eq!(numeric_suffix("rembarde-interieur-15.jpeg"), 15);
    }

    #[test]
    fn suffix_without_extension() {
        assert_eq!(numeric_suffix("sketch12"), 12);
    }

    #[test]
    fn no_digits_orders_first() {
        assert_eq!(numeric_suffix("portail-kaki.JPG"), 0);
        assert_eq!(numeric_suffix("velo"), 0);
    }

    #[test]
    fn non_alphabetic_extension_falls_back_to_trailing_digits() {
        assert_eq!(numeric_suffix("scan-9.mp4"), 4);
        assert_eq!(numeric_suffix("archive.tar7"), 7);
    }

    #[test]
    fn sorts_gallery_images() {
        let images = vec![
            "portail-kaki-2.JPG".to_string(),
            "portail-kaki.JPG".to_string(),
            "porte-jardin-10.jpg".to_string(),
            "porte-jardin-3.jpg".to_string(),
        ];
        assert_eq!(
            sort_by_numeric_suffix(&images),
            vec![
                "portail-kaki.JPG",
                "portail-kaki-2.JPG",
                "porte-jardin-3.jpg",
                "porte-jardin-10.jpg",
            ]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let images = ["b.jpg", "a.jpg", "c-1.jpg"];
        assert_eq!(sort_by_numeric_suffix(&images), ["b.jpg", "a.jpg", "c-1.jpg"]);
    }
}
