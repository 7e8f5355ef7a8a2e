use std::collections::HashSet;
use url::Url;

/// Product documentation pages scanned by default
pub const DEFAULT_CATALOG: &[&str] = &[
    "https://geprc.com/downloads/cinebot30/",
    "https://geprc.com/downloads/cinelog20/",
    "https://geprc.com/downloads/cinelog25/",
    "https://geprc.com/downloads/cinelog25-v2/",
    "https://geprc.com/downloads/cinelog30/",
    "https://geprc.com/downloads/cinelog30-v2/",
    "https://geprc.com/downloads/cinelog30-v3/",
    "https://geprc.com/downloads/cinelog35/",
    "https://geprc.com/downloads/cinelog35-performance/",
    "https://geprc.com/downloads/cinelog35-v2/",
    "https://geprc.com/downloads/cinepro/",
    "https://geprc.com/downloads/crocodileseries/",
    "https://geprc.com/downloads/crocodile5-baby-lr/",
    "https://geprc.com/downloads/crocodile75-v3/",
    "https://geprc.com/downloads/crown/",
    "https://geprc.com/downloads/darkstar16/",
    "https://geprc.com/downloads/darkstar20/",
    "https://geprc.com/downloads/domain-3-6/",
    "https://geprc.com/downloads/domain-4-2/",
    "https://geprc.com/downloads/mark4-7-inch/",
    "https://geprc.com/downloads/mark4-series/",
    "https://geprc.com/downloads/mark5/",
    "https://geprc.com/downloads/mk5d-lr7/",
    "https://geprc.com/downloads/moz7/",
    "https://geprc.com/downloads/moz7-v2/",
    "https://geprc.com/downloads/phantom/",
    "https://geprc.com/downloads/racer/",
    "https://geprc.com/downloads/rocket/",
    "https://geprc.com/downloads/smart16/",
    "https://geprc.com/downloads/smart35/",
    "https://geprc.com/downloads/thinking-p16/",
    "https://geprc.com/downloads/tinygo/",
    "https://geprc.com/downloads/vapord/",
    "https://geprc.com/downloads/",
    "https://geprc.com/electronics/vtx-table/",
    "https://geprc.com/electronics/vtx-manual/",
    "https://geprc.com/electronics/receiver-manual/",
    "https://geprc.com/electronics/fc-manual/",
    "https://geprc.com/electronics/fc-config/",
    "https://geprc.com/camera/gopro8-naked/",
    "https://geprc.com/camera/naked-gopro-10/",
];

/// Removes repeated entries, keeping the first occurrence of each in order
pub fn dedup<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.iter()
        .map(|url| url.as_ref())
        .filter(|url| seen.insert(*url))
        .map(|url| url.to_string())
        .collect()
}

/// Parses a catalog entry as an absolute URL the renderer can open
pub fn parse(url: &str) -> Option<Url> {
    Url::parse(url).ok()
}

/// Returns true if the entry parses as an absolute URL
pub fn is_valid(url: &str) -> bool {
    parse(url).is_some()
}
