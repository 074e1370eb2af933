//! Interface text lookup

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Fr];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    /// Parse a language tag such as `navigator.language` ("es-MX" -> Es)
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next()?.trim().to_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == primary)
    }
}

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => &[
            ("score", "Score"),
            ("best", "Best"),
            ("combo", "Combo"),
            ("lives", "Lives"),
            ("play", "Play"),
            ("paused", "Paused"),
            ("resume", "Resume"),
            ("game_over", "Game Over"),
            ("new_record", "New Record!"),
            ("final_score", "Final Score"),
        ],
        Locale::Es => &[
            ("score", "Puntos"),
            ("best", "Récord"),
            ("combo", "Combo"),
            ("lives", "Vidas"),
            ("play", "Jugar"),
            ("paused", "En pausa"),
            ("resume", "Continuar"),
            ("game_over", "Fin del juego"),
            ("new_record", "¡Nuevo récord!"),
            ("final_score", "Puntuación final"),
        ],
        Locale::Fr => &[
            ("score", "Score"),
            ("best", "Record"),
            ("combo", "Combo"),
            ("lives", "Vies"),
            ("play", "Jouer"),
            ("paused", "Pause"),
            ("resume", "Reprendre"),
            ("game_over", "Partie terminée"),
            ("new_record", "Nouveau record !"),
            ("final_score", "Score final"),
        ],
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

/// Key to string table with a settable active locale
#[derive(Debug, Clone, Copy, Default)]
pub struct Localizer {
    pub locale: Locale,
}

impl Localizer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Text for `key` in the active locale, then English, then the key itself
    pub fn text<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.locale, key)
            .or_else(|| lookup(Locale::En, key))
            .unwrap_or(key)
    }
}
