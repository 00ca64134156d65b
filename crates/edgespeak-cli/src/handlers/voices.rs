//! Voices command handler.

use anyhow::Result;
use edgespeak_core::VoiceCatalog;
use edgespeak_core::domain::LocaleGroup;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

/// Execute the voices command.
pub async fn execute(ctx: &CliContext, locale: Option<&str>) -> Result<()> {
    let catalog = ctx.orchestrator.voices().await.map_err(CliError::from)?;

    let groups = filter_groups(&catalog, locale);
    if groups.is_empty() {
        match locale {
            Some(prefix) => println!("No voices found for locale '{prefix}'."),
            None => println!("The server offers no voices."),
        }
        return Ok(());
    }

    let default_voice = ctx.settings.default_voice.as_str();
    for group in &groups {
        println!("{} ({})", group.locale, group.voices.len());
        print_separator(72);
        for voice in &group.voices {
            let marker = if voice.short_name == default_voice { "*" } else { " " };
            println!(
                "{marker} {:<32} {:<8} {}",
                voice.short_name,
                voice.gender.as_deref().unwrap_or("-"),
                truncate_string(voice.display_name(), 30)
            );
        }
        println!();
    }

    let shown: usize = groups.iter().map(|g| g.voices.len()).sum();
    println!("{shown} of {} voices ( * = default )", catalog.len());
    Ok(())
}

/// Groups whose locale starts with `prefix` (case-insensitive).
fn filter_groups<'a>(catalog: &'a VoiceCatalog, prefix: Option<&str>) -> Vec<LocaleGroup<'a>> {
    let prefix = prefix.map(str::to_lowercase);
    catalog
        .grouped()
        .into_iter()
        .filter(|group| {
            prefix
                .as_deref()
                .is_none_or(|p| group.locale.to_lowercase().starts_with(p))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgespeak_core::Voice;

    fn voice(short_name: &str, locale: &str) -> Voice {
        Voice {
            short_name: short_name.to_string(),
            name: String::new(),
            friendly_name: None,
            locale: Some(locale.to_string()),
            gender: None,
        }
    }

    #[test]
    fn test_filter_by_locale_prefix() {
        let catalog = VoiceCatalog::new(vec![
            voice("de-DE-KatjaNeural", "de-DE"),
            voice("en-US-AvaNeural", "en-US"),
            voice("en-GB-SoniaNeural", "en-GB"),
        ]);

        let english = filter_groups(&catalog, Some("EN"));
        let locales: Vec<_> = english.iter().map(|g| g.locale).collect();
        assert_eq!(locales, vec!["en-GB", "en-US"]);

        assert_eq!(filter_groups(&catalog, None).len(), 3);
        assert!(filter_groups(&catalog, Some("fr")).is_empty());
    }
}
