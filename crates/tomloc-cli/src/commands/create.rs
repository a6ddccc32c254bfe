use std::path::PathBuf;

use tomloc_core::{Locale, LocaleTexts, NewTranslation};
use tomloc_services::{generate_placeholder, TranslationStore};

#[allow(clippy::too_many_arguments)]
pub fn run_create(
    root: Option<PathBuf>,
    key: String,
    group: String,
    fr: String,
    en: Option<String>,
    pt: Option<String>,
    auto_fill: bool,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "create_args",
        root = ?root,
        key = %key,
        group = %group,
        auto_fill = auto_fill
    );

    let cfg = tomloc_config::load_config().unwrap_or_default();
    let auto_fill = auto_fill || cfg.create.and_then(|c| c.auto_fill).unwrap_or(false);

    let mut texts = LocaleTexts {
        fr,
        en: en.unwrap_or_default(),
        pt: pt.unwrap_or_default(),
    };
    if auto_fill {
        let placeholder = generate_placeholder(&key, &texts.fr, &group);
        for locale in Locale::ALL {
            if !locale.is_primary() && texts.get(locale).trim().is_empty() {
                texts.set(locale, placeholder.texts.get(locale));
            }
        }
    }

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let summary = store.create(&NewTranslation { key, group, texts })?;
    super::finish_summary(&summary, use_color)
}
