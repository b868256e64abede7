//! # Location Resolver
//!
//! Maps free-text location strings ("Berlin, Germany / Remote",
//! "Germany (remote)") to approximate coordinates and a canonical country
//! name using a static gazetteer.
//!
//! Lookup order:
//! 1. Exact match on the trimmed, lowercased whole string.
//! 2. Exact match on each delimiter-split token, in token order.
//! 3. Bidirectional substring match (gazetteer key contained in the input, or
//!    the input contained in a key) for the whole string, then each token.
//!    Ties between overlapping keys are broken by the longest key.
//!
//! The token-exact pass runs before any substring pass so that
//! "Berlin, Germany" resolves to Berlin rather than Germany. Precision is
//! deliberately coarse: many jobs share a country-level coordinate.

use once_cell::sync::Lazy;
use serde::Serialize;

/// A resolved place: map coordinates plus canonical country/region name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub lat: f64,
    pub lng: f64,
    pub country: &'static str,
}

/// Latitude/longitude pair attached to a geocoded job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Country used when no gazetteer entry matches.
pub const UNRESOLVED_COUNTRY: &str = "Worldwide";

type Entry = (&'static str, f64, f64, &'static str);

// "worldwide", "remote", "anywhere", "global" are intentionally absent so
// fully-remote listings stay off the map.
static GAZETTEER: Lazy<Vec<Entry>> = Lazy::new(|| {
    vec![
        // Europe
        ("france", 46.603354, 1.888334, "France"),
        ("paris", 48.8566, 2.3522, "France"),
        ("lyon", 45.7640, 4.8357, "France"),
        ("germany", 51.1657, 10.4515, "Germany"),
        ("berlin", 52.52, 13.405, "Germany"),
        ("munich", 48.1351, 11.582, "Germany"),
        ("münchen", 48.1351, 11.582, "Germany"),
        ("hamburg", 53.5511, 9.9937, "Germany"),
        ("cologne", 50.9375, 6.9603, "Germany"),
        ("köln", 50.9375, 6.9603, "Germany"),
        ("frankfurt", 50.1109, 8.6821, "Germany"),
        ("frankfurt am main", 50.1109, 8.6821, "Germany"),
        ("stuttgart", 48.7758, 9.1829, "Germany"),
        ("düsseldorf", 51.2277, 6.7735, "Germany"),
        ("dusseldorf", 51.2277, 6.7735, "Germany"),
        ("leipzig", 51.3397, 12.3731, "Germany"),
        ("dortmund", 51.5136, 7.4653, "Germany"),
        ("essen", 51.4556, 7.0116, "Germany"),
        ("bremen", 53.0793, 8.8017, "Germany"),
        ("dresden", 51.0504, 13.7373, "Germany"),
        ("hannover", 52.3759, 9.732, "Germany"),
        ("nuremberg", 49.4521, 11.0767, "Germany"),
        ("nürnberg", 49.4521, 11.0767, "Germany"),
        ("uk", 55.3781, -3.436, "United Kingdom"),
        ("united kingdom", 55.3781, -3.436, "United Kingdom"),
        ("london", 51.5074, -0.1278, "United Kingdom"),
        ("spain", 40.4637, -3.7492, "Spain"),
        ("madrid", 40.4168, -3.7038, "Spain"),
        ("barcelona", 41.3851, 2.1734, "Spain"),
        ("italy", 41.8719, 12.5674, "Italy"),
        ("netherlands", 52.1326, 5.2913, "Netherlands"),
        ("amsterdam", 52.3676, 4.9041, "Netherlands"),
        ("portugal", 39.3999, -8.2245, "Portugal"),
        ("lisbon", 38.7223, -9.1393, "Portugal"),
        ("ireland", 53.1424, -7.6921, "Ireland"),
        ("dublin", 53.3498, -6.2603, "Ireland"),
        ("switzerland", 46.8182, 8.2275, "Switzerland"),
        ("zurich", 47.3769, 8.5417, "Switzerland"),
        ("austria", 47.5162, 14.5501, "Austria"),
        ("vienna", 48.2082, 16.3738, "Austria"),
        ("poland", 51.9194, 19.1451, "Poland"),
        ("sweden", 60.1282, 18.6435, "Sweden"),
        ("stockholm", 59.3293, 18.0686, "Sweden"),
        ("denmark", 56.2639, 9.5018, "Denmark"),
        ("copenhagen", 55.6761, 12.5683, "Denmark"),
        ("norway", 60.472, 8.4689, "Norway"),
        ("finland", 61.9241, 25.7482, "Finland"),
        ("belgium", 50.5039, 4.4699, "Belgium"),
        ("brussels", 50.8503, 4.3517, "Belgium"),
        ("czech republic", 49.8175, 15.473, "Czech Republic"),
        ("prague", 50.0755, 14.4378, "Czech Republic"),
        ("romania", 45.9432, 24.9668, "Romania"),
        ("greece", 39.0742, 21.8243, "Greece"),
        ("hungary", 47.1625, 19.5033, "Hungary"),
        ("budapest", 47.4979, 19.0402, "Hungary"),
        ("ukraine", 48.3794, 31.1656, "Ukraine"),
        ("croatia", 45.1, 15.2, "Croatia"),
        ("bulgaria", 42.7339, 25.4858, "Bulgaria"),
        ("serbia", 44.0165, 21.0059, "Serbia"),
        ("slovakia", 48.669, 19.699, "Slovakia"),
        ("lithuania", 55.1694, 23.8813, "Lithuania"),
        ("latvia", 56.8796, 24.6032, "Latvia"),
        ("estonia", 58.5953, 25.0136, "Estonia"),
        ("tallinn", 59.437, 24.7536, "Estonia"),
        ("warsaw", 52.2297, 21.0122, "Poland"),
        ("krakow", 50.0647, 19.945, "Poland"),
        ("milan", 45.4642, 9.19, "Italy"),
        ("rome", 41.9028, 12.4964, "Italy"),
        ("helsinki", 60.1699, 24.9384, "Finland"),
        ("oslo", 59.9139, 10.7522, "Norway"),
        ("manchester", 53.4808, -2.2426, "United Kingdom"),
        ("edinburgh", 55.9533, -3.1883, "United Kingdom"),
        // Americas
        ("usa", 37.0902, -95.7129, "USA"),
        ("united states", 37.0902, -95.7129, "USA"),
        ("us", 37.0902, -95.7129, "USA"),
        ("new york", 40.7128, -74.006, "USA"),
        ("san francisco", 37.7749, -122.4194, "USA"),
        ("los angeles", 34.0522, -118.2437, "USA"),
        ("seattle", 47.6062, -122.3321, "USA"),
        ("austin", 30.2672, -97.7431, "USA"),
        ("chicago", 41.8781, -87.6298, "USA"),
        ("boston", 42.3601, -71.0589, "USA"),
        ("denver", 39.7392, -104.9903, "USA"),
        ("canada", 56.1304, -106.3468, "Canada"),
        ("toronto", 43.6532, -79.3832, "Canada"),
        ("vancouver", 49.2827, -123.1207, "Canada"),
        ("montreal", 45.5017, -73.5673, "Canada"),
        ("brazil", -14.235, -51.9253, "Brazil"),
        ("mexico", 23.6345, -102.5528, "Mexico"),
        ("argentina", -38.4161, -63.6167, "Argentina"),
        ("colombia", 4.5709, -74.2973, "Colombia"),
        ("chile", -35.6751, -71.543, "Chile"),
        // Asia Pacific
        ("india", 20.5937, 78.9629, "India"),
        ("bangalore", 12.9716, 77.5946, "India"),
        ("mumbai", 19.076, 72.8777, "India"),
        ("japan", 36.2048, 138.2529, "Japan"),
        ("tokyo", 35.6762, 139.6503, "Japan"),
        ("australia", -25.2744, 133.7751, "Australia"),
        ("sydney", -33.8688, 151.2093, "Australia"),
        ("melbourne", -37.8136, 144.9631, "Australia"),
        ("singapore", 1.3521, 103.8198, "Singapore"),
        ("china", 35.8617, 104.1954, "China"),
        ("south korea", 35.9078, 127.7669, "South Korea"),
        ("korea", 35.9078, 127.7669, "South Korea"),
        ("indonesia", -0.7893, 113.9213, "Indonesia"),
        ("philippines", 12.8797, 121.774, "Philippines"),
        ("vietnam", 14.0583, 108.2772, "Vietnam"),
        ("thailand", 15.87, 100.9925, "Thailand"),
        ("malaysia", 4.2105, 101.9758, "Malaysia"),
        ("new zealand", -40.9006, 174.886, "New Zealand"),
        ("pakistan", 30.3753, 69.3451, "Pakistan"),
        // Middle East & Africa
        ("israel", 31.0461, 34.8516, "Israel"),
        ("tel aviv", 32.0853, 34.7818, "Israel"),
        ("uae", 23.4241, 53.8478, "UAE"),
        ("dubai", 25.2048, 55.2708, "UAE"),
        ("south africa", -30.5595, 22.9375, "South Africa"),
        ("nigeria", 9.082, 8.6753, "Nigeria"),
        ("kenya", -0.0236, 37.9062, "Kenya"),
        ("egypt", 26.8206, 30.8025, "Egypt"),
        // Regions
        ("europe", 54.526, 15.2551, "Europe"),
        ("european union", 54.526, 15.2551, "Europe"),
        ("eu", 54.526, 15.2551, "Europe"),
        ("emea", 48.0, 10.0, "EMEA"),
        ("apac", 25.0, 115.0, "APAC"),
        ("asia", 34.0479, 100.6197, "Asia"),
        ("latam", -15.0, -60.0, "LATAM"),
        ("americas", 19.0, -96.0, "Americas"),
        ("north america", 45.0, -100.0, "North America"),
    ]
});

fn exact(needle: &str) -> Option<Resolved> {
    GAZETTEER
        .iter()
        .find(|(key, _, _, _)| *key == needle)
        .map(|&(_, lat, lng, country)| Resolved { lat, lng, country })
}

/// Substring match in both directions; among multiple candidates the longest
/// gazetteer key wins, which keeps overlapping entries deterministic
/// ("frankfurt am main" beats "frankfurt" for the same input).
fn substring(needle: &str) -> Option<Resolved> {
    GAZETTEER
        .iter()
        .filter(|(key, _, _, _)| needle.contains(key) || key.contains(needle))
        .max_by_key(|(key, _, _, _)| key.len())
        .map(|&(_, lat, lng, country)| Resolved { lat, lng, country })
}

/// Split a raw location string on common delimiters into trimmed,
/// lowercased, non-empty tokens.
fn tokens(raw: &str) -> Vec<String> {
    raw.split([',', ';', '/', '-', '–', '|'])
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Resolve a free-text location to coordinates + country. `None` means the
/// string could not be matched; callers fall back to [`UNRESOLVED_COUNTRY`]
/// and leave coordinates absent.
pub fn resolve(location: &str) -> Option<Resolved> {
    let whole = location.trim().to_lowercase();
    if whole.is_empty() {
        return None;
    }

    if let Some(hit) = exact(&whole) {
        return Some(hit);
    }

    let toks = tokens(location);
    for tok in &toks {
        if let Some(hit) = exact(tok) {
            return Some(hit);
        }
    }

    if let Some(hit) = substring(&whole) {
        return Some(hit);
    }
    for tok in &toks {
        if let Some(hit) = substring(tok) {
            return Some(hit);
        }
    }

    None
}
