use std::path::PathBuf;

use tomloc_core::{LocaleTexts, NewTranslation};
use tomloc_services::TranslationStore;

pub fn run_update(
    root: Option<PathBuf>,
    key: String,
    group: String,
    fr: Option<String>,
    en: Option<String>,
    pt: Option<String>,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "update_args", root = ?root, key = %key, group = %group);

    let texts = LocaleTexts {
        fr: fr.unwrap_or_default(),
        en: en.unwrap_or_default(),
        pt: pt.unwrap_or_default(),
    };

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let summary = store.update(&NewTranslation { key, group, texts })?;
    super::finish_summary(&summary, use_color)
}
