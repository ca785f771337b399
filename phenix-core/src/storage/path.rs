use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};

const PREFIX: &str = "artwork";
const SUFFIX_LEN: usize = 11;

/// Object key for an uploaded image:
/// `artwork/<unix-millis>-<random>-<original name>`.
///
/// Path separators in the original name are replaced so the key stays a
/// single segment under the prefix.
pub fn upload_path<R: Rng + ?Sized>(
    original_name: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let random: String = (0..SUFFIX_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect();
    let name = original_name.replace(['/', '\\'], "_");
    format!("{PREFIX}/{}-{random}-{name}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn builds_prefixed_key() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let path = upload_path("portail noir.jpg", now, &mut rng);

        let rest = path.strip_prefix("artwork/1700000000123-").expect("prefix");
        let (random, name) = rest.split_once('-').expect("random segment");
        assert_eq!(random.len(), SUFFIX_LEN);
        assert!(random.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(name, "portail noir.jpg");
    }

    #[test]
    fn flattens_directories_in_name() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(1);
        let path = upload_path("../etc/passwd", now, &mut rng);
        assert_eq!(path.matches('/').count(), 1);
        assert!(path.ends_with("-.._etc_passwd"));
    }
}
