//! Provider directory: map raw FCC filer names to site slugs.
//!
//! Broadband Data Collection filings name providers the way their legal
//! entities are registered ("Charter Communications", "Space Exploration
//! Technologies Corp."). The site and the chat panels address providers by
//! short slugs instead.

/// Known names (lowercase, corporate suffix already stripped) to slugs.
///
/// Order matters for the partial-match pass: earlier entries win.
const SLUGS: &[(&str, &str)] = &[
    // Major cable
    ("charter communications", "spectrum"),
    ("charter", "spectrum"),
    ("spectrum", "spectrum"),
    ("comcast", "xfinity"),
    ("comcast cable", "xfinity"),
    ("xfinity", "xfinity"),
    ("cox communications", "cox"),
    ("cox", "cox"),
    ("altice usa", "optimum"),
    ("optimum", "optimum"),
    ("cablevision", "optimum"),
    ("mediacom", "mediacom"),
    ("mediacom communications", "mediacom"),
    ("suddenlink", "suddenlink"),
    ("atlantic broadband", "atlantic-broadband"),
    ("wow", "wow"),
    ("wideopenwest", "wow"),
    ("rcn", "rcn"),
    ("astound broadband", "astound"),
    ("grande communications", "grande"),
    // Fiber and telco
    ("at&t", "att"),
    ("at&t services", "att"),
    ("att", "att"),
    ("verizon", "verizon"),
    ("verizon fios", "verizon"),
    ("frontier", "frontier"),
    ("frontier communications", "frontier"),
    ("centurylink", "centurylink"),
    ("lumen", "centurylink"),
    ("windstream", "windstream"),
    ("windstream holdings", "windstream"),
    ("consolidated communications", "consolidated"),
    ("cincinnati bell", "cincinnati-bell"),
    ("altafiber", "altafiber"),
    ("ziply fiber", "ziply"),
    ("ziply", "ziply"),
    ("google fiber", "google-fiber"),
    ("earthlink", "earthlink"),
    ("sonic", "sonic"),
    ("c spire", "c-spire"),
    // 5G and fixed wireless
    ("t-mobile", "t-mobile"),
    ("t-mobile home internet", "t-mobile"),
    ("verizon wireless", "verizon"),
    ("verizon 5g", "verizon"),
    ("starry", "starry"),
    // Satellite
    ("hughesnet", "hughesnet"),
    ("hughes network systems", "hughesnet"),
    ("viasat", "viasat"),
    ("echostar", "viasat"),
    ("starlink", "starlink"),
    ("space exploration technologies", "starlink"),
    ("spacex", "starlink"),
    // Regional fiber
    ("epb", "epb"),
    ("epb fiber", "epb"),
    ("allo", "allo"),
    ("allo communications", "allo"),
    ("metronet", "metronet"),
    ("lumos", "lumos"),
    ("fidium", "fidium"),
    ("fidium fiber", "fidium"),
    ("quantum fiber", "quantum-fiber"),
    ("brightspeed", "brightspeed"),
    ("breezeline", "breezeline"),
    ("usa communications", "usa-communications"),
    ("gvtc", "gvtc"),
    ("tachus", "tachus"),
];

/// Suffixes dropped before lookup, longest first so "corp." wins over "corp".
const LOOKUP_SUFFIXES: &[&str] = &[
    "communications",
    "communication",
    "corporation",
    "holdings",
    "services",
    "l.l.c.",
    "l.l.c",
    "corp.",
    "inc.",
    "corp",
    "inc",
    "llc",
];

/// Suffixes dropped from display names. Unlike lookup, "Communications"
/// stays so "Cox Communications" keeps reading naturally.
const DISPLAY_SUFFIXES: &[&str] = &[
    "corporation",
    "holdings",
    "services",
    "l.l.c.",
    "l.l.c",
    "corp.",
    "inc.",
    "corp",
    "inc",
    "llc",
];

/// Legal names that read better as their consumer brand.
const BRAND_RENAMES: &[(&str, &str)] = &[
    ("Space Exploration Technologies", "Starlink"),
    ("Charter Communications", "Spectrum"),
    ("Comcast Cable", "Xfinity"),
];

/// Remove one trailing corporate suffix (and a comma or whitespace before
/// it), matching case-insensitively.
fn strip_suffix<'a>(name: &'a str, suffixes: &[&str]) -> &'a str {
    let lower = name.to_ascii_lowercase();
    for suffix in suffixes {
        if lower.ends_with(suffix) {
            let head = &name[..name.len() - suffix.len()];
            let head = head.trim_end();
            return head.strip_suffix(',').unwrap_or(head);
        }
    }
    name
}

fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = strip_suffix(&lower, LOOKUP_SUFFIXES);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a provider name to its slug.
///
/// Tries an exact lookup on the normalized name, then the first entry where
/// either name contains the other.
pub fn resolve_slug(name: &str) -> Option<&'static str> {
    let clean = normalize(name);
    if clean.is_empty() {
        return None;
    }

    if let Some((_, slug)) = SLUGS.iter().find(|(key, _)| *key == clean) {
        return Some(*slug);
    }

    let found = SLUGS
        .iter()
        .find(|(key, _)| clean.contains(key) || key.contains(clean.as_str()))
        .map(|(_, slug)| *slug);
    if found.is_none() {
        tracing::trace!(name, "no slug for provider name");
    }
    found
}

/// Consumer-facing name for a raw filer name.
pub fn clean_display_name(name: &str) -> String {
    let mut display = strip_suffix(name.trim(), DISPLAY_SUFFIXES).to_owned();
    for (legal, brand) in BRAND_RENAMES {
        if display.contains(legal) {
            display = display.replacen(legal, brand, 1);
        }
    }
    display.trim().to_owned()
}

/// Site path of a provider page, when the name resolves.
pub fn provider_href(name: &str) -> Option<String> {
    resolve_slug(name).map(|slug| format!("/providers/{slug}"))
}

/// Slug for a provider the directory does not know: lowercase words joined
/// by hyphens, with `&` and other punctuation dropped.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
