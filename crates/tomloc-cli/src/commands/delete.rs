use std::path::PathBuf;

use tomloc_services::TranslationStore;

pub fn run_delete(
    root: Option<PathBuf>,
    key: String,
    group: String,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "delete_args", root = ?root, key = %key, group = %group);

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let summary = store.delete(&group, &key)?;
    super::finish_summary(&summary, use_color)
}
