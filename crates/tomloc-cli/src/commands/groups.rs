use std::path::PathBuf;

use tomloc_services::TranslationStore;

pub fn run_groups(root: Option<PathBuf>, format: String) -> color_eyre::Result<()> {
    tracing::debug!(event = "groups_args", root = ?root, format = %format);

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let groups = store.available_groups()?;

    match format.as_str() {
        "text" => {
            for name in &groups {
                println!("{name}");
            }
            println!("{} group(s)", groups.len());
        }
        "json" => {
            serde_json::to_writer(std::io::stdout().lock(), &groups)?;
            println!();
        }
        _ => unreachable!(),
    }
    Ok(())
}
