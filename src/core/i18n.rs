use serde::{Deserialize, Serialize};

/// Languages user-facing alerts are available in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    De,
}

impl std::str::FromStr for Locale {
    type Err = String;

    /// Accepts `es`, `es_ES`, `es-AR.UTF-8` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            "de" => Ok(Locale::De),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// Look up `key` for `locale`, falling back to `default` (English).
pub fn translate(locale: Locale, key: &str, default: &str) -> String {
    lookup(locale, key).unwrap_or(default).to_string()
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    match (locale, key) {
        (Locale::Es, "box.error.ubisoft-connect.title")
        | (Locale::De, "box.error.ubisoft-connect.title") => Some("Ubisoft Connect"),
        (Locale::Es, "box.error.ubisoft-connect.message") => Some(
            "La instalación de Ubisoft Connect en el prefijo del juego falló. \
             Consulta la wiki en {url} para instalarlo manualmente.",
        ),
        (Locale::De, "box.error.ubisoft-connect.message") => Some(
            "Die Installation von Ubisoft Connect im Prefix des Spiels ist fehlgeschlagen. \
             Im Wiki unter {url} steht, wie es manuell installiert wird.",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_posix_style_locales() {
        assert_eq!("es_ES.UTF-8".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("de".parse::<Locale>().unwrap(), Locale::De);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr_FR".parse::<Locale>().is_err());
    }

    #[test]
    fn falls_back_to_default_text() {
        assert_eq!(translate(Locale::En, "box.error.ubisoft-connect.title", "Ubisoft Connect"), "Ubisoft Connect");
        assert_eq!(translate(Locale::Es, "unknown.key", "fallback"), "fallback");
        assert!(translate(Locale::Es, "box.error.ubisoft-connect.message", "x").contains("{url}"));
    }
}
