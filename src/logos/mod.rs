//! Static asset lookup: event logos and player avatars.

use std::collections::HashMap;

/// Logo used when no rule matches.
pub const DEFAULT_LOGO: &str = "/logos/default-event.png";

/// Avatar used when a player's own avatar is unavailable.
pub const DEFAULT_AVATAR: &str = "/avatars/default-avatar.png";

/// Keyword rules in priority order. Earlier rules win when names overlap,
/// so this is a list, not a set.
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("block wars", "/logos/block-wars.png"),
    ("minecraft championship", "/logos/minecraft-championship.png"),
    ("cube championships", "/logos/cube-championships.png"),
    ("pandora's box", "/logos/pandoras-box.png"),
    ("minecraft mayhem", "/logos/minecraft-mayhem.png"),
    ("blissful championships", "/logos/blissful-championship.png"),
    ("jackcas game nights", "/logos/jackcas.png"),
    ("chamber trials", "/logos/chamber-trials.png"),
    ("biome battle", "/logos/biome-battle.png"),
    ("klyx games", "/logos/klyx-games.png"),
    ("fusion frenzy", "/logos/fusion-frenzy.png"),
    ("showdown", "/logos/showdown.png"),
];

/// Maps event names to logo asset paths.
///
/// Exact-name overrides are consulted first, then the keyword rules in
/// order against the lower-cased name.
#[derive(Debug, Clone)]
pub struct LogoResolver {
    overrides: HashMap<String, String>,
    rules: Vec<(String, String)>,
    default_logo: String,
}

impl Default for LogoResolver {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            rules: KEYWORD_RULES
                .iter()
                .map(|(keyword, path)| (keyword.to_string(), path.to_string()))
                .collect(),
            default_logo: DEFAULT_LOGO.to_string(),
        }
    }
}

impl LogoResolver {
    /// Default rules plus exact-name overrides.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    /// Logo path for an event. Never fails; unknown events get the default logo.
    pub fn resolve(&self, event_name: &str) -> &str {
        if event_name.is_empty() {
            return &self.default_logo;
        }
        if let Some(path) = self.overrides.get(event_name) {
            return path;
        }
        let name = event_name.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| name.contains(keyword.as_str()))
            .map(|(_, path)| path.as_str())
            .unwrap_or(self.default_logo.as_str())
    }
}

/// Logo path for an event using the built-in rules only.
pub fn resolve_logo(event_name: &str) -> &'static str {
    if event_name.is_empty() {
        return DEFAULT_LOGO;
    }
    let name = event_name.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, path)| *path)
        .unwrap_or(DEFAULT_LOGO)
}

/// Avatar path for a player, as written by the avatar downloader.
pub fn avatar_path(player_name: &str) -> String {
    if player_name.is_empty() {
        return DEFAULT_AVATAR.to_string();
    }
    format!("/avatars/{}.png", player_name)
}
