use std::path::PathBuf;

use tomloc_domain::TranslationRow;
use tomloc_services::TranslationStore;

pub fn run_list(
    root: Option<PathBuf>,
    format: String,
    out_csv: Option<PathBuf>,
    out_json: Option<PathBuf>,
    limit: Option<usize>,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "list_args",
        root = ?root,
        format = %format,
        out_csv = ?out_csv,
        out_json = ?out_json,
        limit = ?limit
    );

    let store = TranslationStore::new(super::resolve_resources_dir(root));
    let mut records = store.list_all()?;

    let limit = limit.or_else(|| {
        tomloc_config::load_config()
            .unwrap_or_default()
            .list_limit
    });
    if let Some(n) = limit {
        records.truncate(n);
    }

    match format.as_str() {
        "text" => {
            super::print_records(&records, use_color);
        }
        "csv" => {
            if let Some(path) = out_csv {
                let file = std::fs::File::create(&path)?;
                tomloc_export_csv::write_csv(file, &records)?;
                println!("✔ CSV saved to {}", path.display());
            } else {
                let stdout = std::io::stdout();
                let lock = stdout.lock();
                tomloc_export_csv::write_csv(lock, &records)?;
            }
        }
        "json" => {
            let rows: Vec<TranslationRow> = records.iter().map(super::to_row).collect();
            if let Some(path) = out_json {
                let file = std::fs::File::create(&path)?;
                serde_json::to_writer_pretty(file, &rows)?;
                println!("✔ JSON saved to {}", path.display());
            } else {
                serde_json::to_writer(std::io::stdout().lock(), &rows)?;
                println!();
            }
        }
        _ => unreachable!(),
    }
    Ok(())
}
