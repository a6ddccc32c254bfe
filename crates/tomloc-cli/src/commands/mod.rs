pub mod create;
pub mod delete;
pub mod groups;
pub mod list;
pub mod schema;
pub mod search;
pub mod update;

use std::path::PathBuf;

use color_eyre::eyre::eyre;
use owo_colors::OwoColorize;
use tomloc_core::{Locale, TranslationRecord};
use tomloc_domain::{SearchType, TranslationRow, WriteSummary, SCHEMA_VERSION};
use tomloc_services::DEFAULT_RESOURCES_DIR;

/// Resolution order: explicit --root, configured resources_dir (if it exists
/// on disk), then the application-local fallback folder.
pub(crate) fn resolve_resources_dir(root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = root {
        return root;
    }
    let cfg = tomloc_config::load_config().unwrap_or_default();
    if let Some(dir) = cfg.resources_dir {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return path;
        }
        tracing::warn!(event = "configured_resources_dir_missing", path = %path.display());
    }
    PathBuf::from(DEFAULT_RESOURCES_DIR)
}

pub(crate) fn parse_search_type(s: &str) -> color_eyre::Result<SearchType> {
    match s {
        "contains" => Ok(SearchType::Contains),
        "begins-with" => Ok(SearchType::BeginsWith),
        "ends-with" => Ok(SearchType::EndsWith),
        "equals" => Ok(SearchType::Equals),
        other => Err(eyre!("unknown match mode: {other}")),
    }
}

pub(crate) fn to_row(record: &TranslationRecord) -> TranslationRow {
    TranslationRow {
        schema_version: SCHEMA_VERSION,
        key: record.key.clone(),
        group: record.group.clone(),
        fr: record.texts.get(Locale::Fr).to_string(),
        en: record.texts.get(Locale::En).to_string(),
        pt: record.texts.get(Locale::Pt).to_string(),
        path: record.source_path.as_ref().map(|p| p.display().to_string()),
    }
}

pub(crate) fn print_records(records: &[TranslationRecord], use_color: bool) {
    for r in records {
        if use_color {
            println!(
                "{}/{}  fr={:?}  en={:?}  pt={:?}",
                r.group.blue(),
                r.key.green(),
                r.texts.fr,
                r.texts.en,
                r.texts.pt
            );
        } else {
            println!(
                "{}/{}  fr={:?}  en={:?}  pt={:?}",
                r.group, r.key, r.texts.fr, r.texts.en, r.texts.pt
            );
        }
    }
    println!("{} record(s)", records.len());
}

pub(crate) fn print_summary(summary: &WriteSummary, use_color: bool) {
    for f in &summary.files {
        let tag = match f.status.as_str() {
            "created" | "updated" | "removed" => "✔",
            "skipped" => "•",
            _ => "✖",
        };
        if use_color {
            let status = match f.status.as_str() {
                "created" | "updated" | "removed" => format!("{}", f.status.green()),
                "skipped" => format!("{}", f.status.white()),
                _ => format!("{}", f.status.red()),
            };
            println!("{} [{}] {} {}", tag, f.locale, status, f.path);
        } else {
            println!("{} [{}] {} {}", tag, f.locale, f.status, f.path);
        }
        if let Some(err) = &f.error {
            println!("    {err}");
        }
    }
}

/// Shared tail for the mutating commands: print per-locale outcomes and turn
/// partial failure into a nonzero exit.
pub(crate) fn finish_summary(summary: &WriteSummary, use_color: bool) -> color_eyre::Result<()> {
    print_summary(summary, use_color);
    if summary.is_success() {
        Ok(())
    } else {
        Err(eyre!(
            "{} of {} locale write(s) failed",
            summary.failed,
            summary.files.len()
        ))
    }
}
