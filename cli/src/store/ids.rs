use chrono::{DateTime, Utc};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// `<prefix>-<unix millis>-<7 random base-36 chars>`.
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
        let id = generate_id("theme", now);
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0], "theme");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 7);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_id_is_unique_within_a_millisecond() {
        let now = Utc::now();
        assert_ne!(generate_id("profile", now), generate_id("profile", now));
    }
}
