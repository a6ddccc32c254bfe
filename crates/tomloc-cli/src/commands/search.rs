use std::path::PathBuf;

use tomloc_domain::{TranslationFilter, TranslationRow};
use tomloc_services::TranslationStore;

#[allow(clippy::too_many_arguments)]
pub fn run_search(
    root: Option<PathBuf>,
    key: Option<String>,
    fr: Option<String>,
    en: Option<String>,
    pt: Option<String>,
    group: Option<String>,
    match_mode: Option<String>,
    case_sensitive: bool,
    format: String,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "search_args",
        root = ?root,
        key = ?key,
        fr = ?fr,
        en = ?en,
        pt = ?pt,
        group = ?group,
        match_mode = ?match_mode,
        case_sensitive = case_sensitive
    );

    let cfg = tomloc_config::load_config().unwrap_or_default();
    let search_cfg = cfg.search.unwrap_or_default();

    let match_mode = match_mode
        .or(search_cfg.match_mode)
        .unwrap_or_else(|| "contains".to_string());
    let case_sensitive = case_sensitive || search_cfg.case_sensitive.unwrap_or(false);

    let mut filter = TranslationFilter::default();
    filter.key.value = key;
    filter.fr.value = fr;
    filter.en.value = en;
    filter.pt.value = pt;
    filter.group.value = group;
    filter.global_case_sensitive = case_sensitive;
    filter.global_search_type = super::parse_search_type(&match_mode)?;

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let records = store.search(&filter)?;

    match format.as_str() {
        "text" => super::print_records(&records, use_color),
        "json" => {
            let rows: Vec<TranslationRow> = records.iter().map(super::to_row).collect();
            serde_json::to_writer(std::io::stdout().lock(), &rows)?;
            println!();
        }
        _ => unreachable!(),
    }
    Ok(())
}
