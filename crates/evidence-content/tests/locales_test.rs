//! The locale files shipped with the server load and are playable.

use std::path::PathBuf;

use evidence_content::application::source::{ContentSource, DirectoryContentSource};
use evidence_content::domain::language::Language;

fn shipped_locales() -> DirectoryContentSource {
    DirectoryContentSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../locales"))
}

#[tokio::test]
async fn test_every_supported_language_ships_playable_content() {
    let source = shipped_locales();

    for language in [Language::Pt, Language::En] {
        let document = source.fetch(language).await.unwrap();

        assert!(document.is_playable(), "{language} is not playable");
        assert_eq!(document.archetypes().len(), 4, "{language}");
        assert_ne!(
            document.text().text("buttons.startJourney"),
            "buttons.startJourney",
            "{language}"
        );
    }
}

#[tokio::test]
async fn test_languages_ship_the_same_number_of_scenarios() {
    let source = shipped_locales();

    let pt = source.fetch(Language::Pt).await.unwrap();
    let en = source.fetch(Language::En).await.unwrap();

    assert_eq!(pt.scenarios().len(), en.scenarios().len());
    assert_ne!(pt.version_hash(), en.version_hash());
}
