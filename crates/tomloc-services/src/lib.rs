//! High-level orchestration layer over the resx parser crates.
//! Intentionally thin: exposes the stable operations used by the CLI.

pub mod filter;
pub mod merge;

use std::path::{Path, PathBuf};

use tomloc_core::{
    Locale, LocaleTexts, NewTranslation, ResourceGroup, Result, ResxError, TranslationRecord,
};
use tomloc_domain::{LocaleWriteStat, TranslationFilter, WriteSummary};
use tomloc_parsers_resx::{discover_groups, insert_entry, remove_entry, upsert_entry};

/// Fallback directory used when no resources directory is configured.
pub const DEFAULT_RESOURCES_DIR: &str = "Resources";

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Create,
    Update,
}

impl WriteMode {
    fn as_str(self) -> &'static str {
        match self {
            WriteMode::Create => "create",
            WriteMode::Update => "update",
        }
    }

    fn status(self) -> &'static str {
        match self {
            WriteMode::Create => "created",
            WriteMode::Update => "updated",
        }
    }
}

/// The operation facade. Holds the resources directory explicitly; there is
/// no process-wide state, and every call rescans the tree (discovery is the
/// single source of truth, no cache to invalidate).
#[derive(Debug, Clone)]
pub struct TranslationStore {
    resources_dir: PathBuf,
}

impl TranslationStore {
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        TranslationStore {
            resources_dir: resources_dir.into(),
        }
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Discovery + merge, ordered by (group, key), no filtering.
    pub fn list_all(&self) -> Result<Vec<TranslationRecord>> {
        let records = merge::collect_records(&self.resources_dir)?;
        tracing::debug!(event = "records_collected", count = records.len());
        Ok(records)
    }

    /// Empty filters short-circuit to no results; otherwise discover, merge,
    /// filter, keep ordering.
    pub fn search(&self, filter: &TranslationFilter) -> Result<Vec<TranslationRecord>> {
        let mut filter = filter.clone();
        filter::apply_global_settings(&mut filter);
        if filter::is_filter_empty(&filter) {
            tracing::debug!(event = "search_skipped_empty_filter");
            return Ok(Vec::new());
        }
        let records = self.list_all()?;
        Ok(records
            .into_iter()
            .filter(|r| filter::matches(r, &filter))
            .collect())
    }

    /// Group names straight from discovery: ordinally sorted, deduplicated,
    /// including groups that lack a primary-locale file.
    pub fn available_groups(&self) -> Result<Vec<String>> {
        let groups = discover_groups(&self.resources_dir)?;
        Ok(groups.into_iter().map(|g| g.name).collect())
    }

    /// Append-only create: one `insert_entry` per locale with non-empty text.
    /// Per-locale outcomes land in the summary; a duplicate key fails that
    /// locale and leaves its file untouched, without rolling back locales
    /// already written.
    pub fn create(&self, new: &NewTranslation) -> Result<WriteSummary> {
        self.write_entries(new, WriteMode::Create)
    }

    /// Same shape as create, routed through the overwriting `upsert_entry`
    /// primitive so existing keys are updated instead of rejected.
    pub fn update(&self, new: &NewTranslation) -> Result<WriteSummary> {
        self.write_entries(new, WriteMode::Update)
    }

    fn write_entries(&self, new: &NewTranslation, mode: WriteMode) -> Result<WriteSummary> {
        let discovered = discover_groups(&self.resources_dir)?;
        let mut summary = WriteSummary::new(mode.as_str());

        for (locale, text) in new.texts.iter() {
            let path = self.target_path(&new.group, locale, &discovered);
            if text.trim().is_empty() {
                summary.skipped += 1;
                summary.files.push(stat(locale, &path, "skipped", None));
                continue;
            }
            let outcome = match mode {
                WriteMode::Create => insert_entry(&path, &new.key, text),
                WriteMode::Update => upsert_entry(&path, &new.key, text),
            };
            match outcome {
                Ok(()) => {
                    tracing::info!(
                        event = "entry_written",
                        group = %new.group,
                        locale = %locale,
                        key = %new.key,
                        path = %path.display()
                    );
                    summary.written += 1;
                    summary.files.push(stat(locale, &path, mode.status(), None));
                }
                Err(err @ ResxError::DuplicateKey { .. }) => {
                    tracing::warn!(
                        event = "duplicate_key_rejected",
                        group = %new.group,
                        locale = %locale,
                        key = %new.key
                    );
                    summary.failed += 1;
                    summary
                        .files
                        .push(stat(locale, &path, "duplicate", Some(err.to_string())));
                }
                Err(err) => {
                    tracing::error!(
                        event = "entry_write_failed",
                        locale = %locale,
                        path = %path.display(),
                        error = %err
                    );
                    summary.failed += 1;
                    summary
                        .files
                        .push(stat(locale, &path, "failed", Some(err.to_string())));
                }
            }
        }

        Ok(summary)
    }

    /// Remove `key` from every locale file of `group`. Absent files (or a key
    /// a file never had) count as skipped, not failed.
    pub fn delete(&self, group: &str, key: &str) -> Result<WriteSummary> {
        let discovered = discover_groups(&self.resources_dir)?;
        let mut summary = WriteSummary::new("delete");

        for locale in Locale::ALL {
            let path = self.target_path(group, locale, &discovered);
            match remove_entry(&path, key) {
                Ok(true) => {
                    tracing::info!(
                        event = "entry_removed",
                        group = %group,
                        locale = %locale,
                        key = %key
                    );
                    summary.written += 1;
                    summary.files.push(stat(locale, &path, "removed", None));
                }
                Ok(false) => {
                    summary.skipped += 1;
                    summary.files.push(stat(locale, &path, "skipped", None));
                }
                Err(err) => {
                    tracing::error!(
                        event = "entry_remove_failed",
                        locale = %locale,
                        path = %path.display(),
                        error = %err
                    );
                    summary.failed += 1;
                    summary
                        .files
                        .push(stat(locale, &path, "failed", Some(err.to_string())));
                }
            }
        }

        Ok(summary)
    }

    /// Resolve the file a (group, locale) entry belongs to: the discovered
    /// file when the group already has one (wherever it sits in the subtree),
    /// else the canonical name directly under the resources dir.
    fn target_path(&self, group: &str, locale: Locale, discovered: &[ResourceGroup]) -> PathBuf {
        discovered
            .iter()
            .find(|g| g.name == group)
            .and_then(|g| g.files.get(&locale).cloned())
            .unwrap_or_else(|| self.resources_dir.join(locale.file_name(group)))
    }
}

/// Stand-in for a real translation service: the primary locale keeps the
/// source text, secondary locales get a tagged copy. Nothing is persisted.
pub fn generate_placeholder(key: &str, source_text: &str, group: &str) -> TranslationRecord {
    let mut texts = LocaleTexts::default();
    for locale in Locale::ALL {
        if locale.is_primary() {
            texts.set(locale, source_text);
        } else {
            texts.set(locale, format!("{} {}", locale.marker(), source_text));
        }
    }
    TranslationRecord {
        key: key.to_string(),
        group: group.to_string(),
        texts,
        source_path: None,
    }
}

fn stat(locale: Locale, path: &Path, status: &str, error: Option<String>) -> LocaleWriteStat {
    LocaleWriteStat {
        locale: locale.code().to_string(),
        path: path.display().to_string(),
        status: status.to_string(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tomloc_domain::FieldFilter;

    fn new_translation(key: &str, group: &str, fr: &str, en: &str, pt: &str) -> NewTranslation {
        NewTranslation {
            key: key.into(),
            group: group.into(),
            texts: LocaleTexts {
                fr: fr.into(),
                en: en.into(),
                pt: pt.into(),
            },
        }
    }

    #[test]
    fn list_all_on_missing_dir_is_empty() -> Result<()> {
        let store = TranslationStore::new("/definitely/not/here");
        assert!(store.list_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn create_then_list_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());

        let summary = store.create(&new_translation("K", "G", "bonjour", "hello", ""))?;
        assert!(summary.is_success());
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);

        let records = store.list_all()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "K");
        assert_eq!(records[0].texts.fr, "bonjour");
        assert_eq!(records[0].texts.en, "hello");
        Ok(())
    }

    #[test]
    fn create_duplicate_fails_per_locale_and_keeps_value() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());

        store.create(&new_translation("K", "G", "bonjour", "", ""))?;
        let summary = store.create(&new_translation("K", "G", "salut", "hello", ""))?;

        assert!(!summary.is_success());
        assert_eq!(summary.failed, 1);
        // the english write was still attempted and committed
        assert_eq!(summary.written, 1);
        let dup = summary
            .files
            .iter()
            .find(|f| f.status == "duplicate")
            .expect("french stat");
        assert_eq!(dup.locale, "fr");

        let records = store.list_all()?;
        assert_eq!(records[0].texts.fr, "bonjour");
        assert_eq!(records[0].texts.en, "hello");
        Ok(())
    }

    #[test]
    fn update_overwrites_existing_keys() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());

        store.create(&new_translation("K", "G", "bonjour", "", ""))?;
        let summary = store.update(&new_translation("K", "G", "salut", "hi", ""))?;

        assert!(summary.is_success());
        let records = store.list_all()?;
        assert_eq!(records[0].texts.fr, "salut");
        assert_eq!(records[0].texts.en, "hi");
        Ok(())
    }

    #[test]
    fn writes_reuse_discovered_file_locations() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested)?;
        tomloc_parsers_resx::insert_entry(&nested.join("G.fr.resx"), "A", "a")?;

        let store = TranslationStore::new(dir.path());
        store.create(&new_translation("B", "G", "b", "", ""))?;

        // no second file appeared at the root; the nested one was extended
        assert!(!dir.path().join("G.fr.resx").exists());
        let records = store.list_all()?;
        assert_eq!(records.len(), 2);
        Ok(())
    }

    #[test]
    fn delete_without_files_is_a_noop_success() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());
        let summary = store.delete("G", "K")?;
        assert!(summary.is_success());
        assert_eq!(summary.written, 0);
        assert_eq!(summary.skipped, 3);
        Ok(())
    }

    #[test]
    fn delete_removes_key_from_all_locales() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());
        store.create(&new_translation("K", "G", "bonjour", "hello", "olá"))?;
        store.create(&new_translation("Other", "G", "autre", "", ""))?;

        let summary = store.delete("G", "K")?;
        assert!(summary.is_success());
        assert_eq!(summary.written, 3);

        let records = store.list_all()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "Other");
        Ok(())
    }

    #[test]
    fn empty_filter_short_circuits_search() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());
        store.create(&new_translation("K", "G", "bonjour", "", ""))?;

        let hits = store.search(&TranslationFilter::default())?;
        assert!(hits.is_empty());
        Ok(())
    }

    #[test]
    fn search_filters_merged_records() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());
        store.create(&new_translation("OK", "Menu", "Valider", "OK", ""))?;
        store.create(&new_translation("E1", "Errors", "Erreur interne", "", ""))?;

        let mut filter = TranslationFilter::default();
        filter.fr = FieldFilter::contains("valid");
        let hits = store.search(&filter)?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "OK");
        Ok(())
    }

    #[test]
    fn available_groups_sorted_and_deduplicated() -> Result<()> {
        let dir = tempdir()?;
        let store = TranslationStore::new(dir.path());
        store.create(&new_translation("OK", "Menu", "Valider", "OK", "OK"))?;
        store.create(&new_translation("E1", "Errors", "Erreur", "", ""))?;

        assert_eq!(store.available_groups()?, ["Errors", "Menu"]);
        Ok(())
    }

    #[test]
    fn placeholder_tags_secondary_locales() {
        let record = generate_placeholder("K", "bonjour", "G");
        assert_eq!(record.texts.fr, "bonjour");
        assert_eq!(record.texts.en, "[EN] bonjour");
        assert_eq!(record.texts.pt, "[PT] bonjour");
        assert!(record.source_path.is_none());
    }
}
