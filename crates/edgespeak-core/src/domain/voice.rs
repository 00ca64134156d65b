//! Voices offered by the backend and their picker grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Locale label used for voices that do not report one.
pub const UNKNOWN_LOCALE: &str = "Unknown";

/// A voice as listed by `/api/voices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    /// Identifier sent back in synthesis requests, e.g. `en-US-AvaNeural`.
    pub short_name: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub friendly_name: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,
}

impl Voice {
    /// Label shown in the picker.
    pub fn display_name(&self) -> &str {
        match self.friendly_name.as_deref() {
            Some(friendly) if !friendly.is_empty() => friendly,
            _ if !self.name.is_empty() => self.name.as_str(),
            _ => self.short_name.as_str(),
        }
    }

    pub fn locale_or_unknown(&self) -> &str {
        self.locale
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(UNKNOWN_LOCALE)
    }

    pub fn is_english(&self) -> bool {
        is_english_locale(self.locale_or_unknown())
    }
}

fn is_english_locale(locale: &str) -> bool {
    locale.to_lowercase().starts_with("en")
}

/// Voices sharing one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleGroup<'a> {
    pub locale: &'a str,
    pub voices: Vec<&'a Voice>,
}

/// The voice list returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    pub const fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    pub fn find(&self, short_name: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.short_name == short_name)
    }

    /// The preferred voice when listed, else the first voice.
    pub fn resolve(&self, preferred: &str) -> Option<&Voice> {
        self.find(preferred).or_else(|| self.voices.first())
    }

    /// Voices grouped by locale: English locales first, then the rest, each
    /// part sorted by locale name. Voices keep server order within a group.
    pub fn grouped(&self) -> Vec<LocaleGroup<'_>> {
        let mut by_locale: BTreeMap<&str, Vec<&Voice>> = BTreeMap::new();
        for voice in &self.voices {
            by_locale
                .entry(voice.locale_or_unknown())
                .or_default()
                .push(voice);
        }

        let (english, other): (Vec<_>, Vec<_>) = by_locale
            .into_iter()
            .map(|(locale, voices)| LocaleGroup { locale, voices })
            .partition(|group| is_english_locale(group.locale));

        english.into_iter().chain(other).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(short_name: &str, locale: Option<&str>) -> Voice {
        Voice {
            short_name: short_name.to_string(),
            name: format!("Microsoft Server Speech Text to Speech Voice ({short_name})"),
            friendly_name: None,
            locale: locale.map(str::to_string),
            gender: Some("Female".to_string()),
        }
    }

    #[test]
    fn test_deserialize_server_voice() {
        let json = r#"{
            "Name": "Microsoft Server Speech Text to Speech Voice (en-US, AvaNeural)",
            "ShortName": "en-US-AvaNeural",
            "Gender": "Female",
            "Locale": "en-US",
            "FriendlyName": "Microsoft Ava Online (Natural) - English (United States)",
            "SuggestedCodec": "audio-24khz-48kbitrate-mono-mp3"
        }"#;
        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.short_name, "en-US-AvaNeural");
        assert_eq!(voice.locale.as_deref(), Some("en-US"));
        assert!(voice.display_name().starts_with("Microsoft Ava"));
    }

    #[test]
    fn test_grouped_puts_english_first() {
        let catalog = VoiceCatalog::new(vec![
            voice("fr-FR-DeniseNeural", Some("fr-FR")),
            voice("en-US-AvaNeural", Some("en-US")),
            voice("de-DE-KatjaNeural", Some("de-DE")),
            voice("en-GB-SoniaNeural", Some("en-GB")),
            voice("en-US-AndrewNeural", Some("en-US")),
            voice("mystery", None),
        ]);

        let groups = catalog.grouped();
        let locales: Vec<_> = groups.iter().map(|g| g.locale).collect();
        assert_eq!(locales, vec!["en-GB", "en-US", "Unknown", "de-DE", "fr-FR"]);

        let us = &groups[1];
        assert_eq!(us.voices.len(), 2);
        assert_eq!(us.voices[0].short_name, "en-US-AvaNeural");
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let catalog = VoiceCatalog::new(vec![
            voice("fr-FR-DeniseNeural", Some("fr-FR")),
            voice("en-US-AvaNeural", Some("en-US")),
        ]);
        assert_eq!(
            catalog.resolve("en-US-AvaNeural").unwrap().short_name,
            "en-US-AvaNeural"
        );
        assert_eq!(
            catalog.resolve("xx-missing").unwrap().short_name,
            "fr-FR-DeniseNeural"
        );
        assert!(VoiceCatalog::default().resolve("anything").is_none());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut v = voice("en-US-AvaNeural", Some("en-US"));
        assert!(v.display_name().contains("en-US-AvaNeural"));
        v.name.clear();
        assert_eq!(v.display_name(), "en-US-AvaNeural");
        v.friendly_name = Some("Ava".to_string());
        assert_eq!(v.display_name(), "Ava");
    }
}
