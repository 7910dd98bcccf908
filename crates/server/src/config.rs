//! Server configuration

use symptocare_core::Coordinates;

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    /// Gemini keys in fallback order
    pub gemini_api_keys: Vec<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    /// Sent to Nominatim and Overpass, both require an identifying agent
    pub user_agent: String,
    pub search_radius_m: u32,
    pub max_facilities: usize,
    pub default_city: String,
    pub default_coordinates: Coordinates,
    pub http_timeout_secs: u64,
    pub rate_limit_rps: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:8080"),
            gemini_api_keys: gemini_keys(env_nonempty),
            gemini_model: env_or("GEMINI_MODEL", "gemini-flash-lite-latest"),
            gemini_base_url: env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            anthropic_api_key: env_nonempty("ANTHROPIC_API_KEY"),
            anthropic_base_url: env_or("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
            nominatim_url: env_or("NOMINATIM_URL", "https://nominatim.openstreetmap.org"),
            overpass_url: env_or(
                "OVERPASS_URL",
                "https://overpass-api.de/api/interpreter",
            ),
            user_agent: env_or(
                "HTTP_USER_AGENT",
                concat!("symptocare/", env!("CARGO_PKG_VERSION")),
            ),
            search_radius_m: env_parse("SEARCH_RADIUS_M", 5000),
            max_facilities: env_parse("MAX_FACILITIES", 15),
            default_city: env_or("DEFAULT_CITY", "New Delhi"),
            default_coordinates: default_coordinates(env_nonempty),
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS", 20),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS", 20),
            cors_origins: env_or("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env_nonempty(key).unwrap_or_else(|| default.to_string())
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_nonempty(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// `DEFAULT_LAT`/`DEFAULT_LON`, or New Delhi when either is missing, unparsable or out of range
fn default_coordinates(lookup: impl Fn(&str) -> Option<String>) -> Coordinates {
    const NEW_DELHI: Coordinates = Coordinates {
        lat: 28.6139,
        lon: 77.2090,
    };

    let coord = |key: &str, fallback: f64| {
        lookup(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(fallback)
    };

    Coordinates::new(coord("DEFAULT_LAT", NEW_DELHI.lat), coord("DEFAULT_LON", NEW_DELHI.lon))
        .unwrap_or(NEW_DELHI)
}

/// `GEMINI_API_KEYS` (comma separated) first, then `GEMINI_API_KEY`, `_2`, `_3`.
fn gemini_keys(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let listed = lookup("GEMINI_API_KEYS").unwrap_or_default();
    let numbered = ["GEMINI_API_KEY", "GEMINI_API_KEY_2", "GEMINI_API_KEY_3"]
        .into_iter()
        .filter_map(&lookup);

    merge_keys(listed.split(',').map(str::to_string).chain(numbered))
}

/// Trim, drop empties and duplicates, keep first-seen order
fn merge_keys(keys: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for key in keys {
        let key = key.trim().to_string();
        if !key.is_empty() && !merged.contains(&key) {
            merged.push(key);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keys_dedupes_in_order() {
        let keys = merge_keys(
            ["b", " a ", "", "b", "c"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(keys, ["b", "a", "c"]);
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_listed_keys_precede_numbered_keys() {
        let keys = gemini_keys(vars(&[
            ("GEMINI_API_KEY", "single"),
            ("GEMINI_API_KEY_3", "third"),
            ("GEMINI_API_KEYS", "list-a, list-b"),
        ]));
        assert_eq!(keys, ["list-a", "list-b", "single", "third"]);
    }

    #[test]
    fn test_keys_shared_across_sources_collapse() {
        let keys = gemini_keys(vars(&[
            ("GEMINI_API_KEYS", "k1,k2"),
            ("GEMINI_API_KEY", "k2"),
            ("GEMINI_API_KEY_2", "k3"),
        ]));
        assert_eq!(keys, ["k1", "k2", "k3"]);
    }

    #[test]
    fn test_blank_key_entries_are_dropped() {
        let keys = gemini_keys(vars(&[
            ("GEMINI_API_KEYS", " , ,k1,,"),
            ("GEMINI_API_KEY_2", "   "),
        ]));
        assert_eq!(keys, ["k1"]);
        assert!(gemini_keys(vars(&[])).is_empty());
    }

    #[test]
    fn test_default_coordinates_from_vars() {
        let coords = default_coordinates(vars(&[("DEFAULT_LAT", "18.52"), ("DEFAULT_LON", "73.85")]));
        assert_eq!(coords, Coordinates { lat: 18.52, lon: 73.85 });
    }

    #[test]
    fn test_invalid_default_coordinates_use_new_delhi() {
        let new_delhi = Coordinates {
            lat: 28.6139,
            lon: 77.2090,
        };
        assert_eq!(
            default_coordinates(vars(&[("DEFAULT_LAT", "95.0"), ("DEFAULT_LON", "73.85")])),
            new_delhi
        );
        assert_eq!(
            default_coordinates(vars(&[("DEFAULT_LAT", "north")])),
            new_delhi
        );
        assert_eq!(default_coordinates(vars(&[])), new_delhi);
    }
}
