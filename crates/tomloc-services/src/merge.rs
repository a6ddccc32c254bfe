use std::path::Path;

use tomloc_core::{
    Locale, LocaleTexts, ResourceGroup, Result, TranslationRecord, PRIMARY_LOCALE,
};
use tomloc_parsers_resx::{discover_groups, read_resx_map};

/// Merge one group's per-locale maps into multilingual records. Iteration is
/// driven by the primary locale: keys present only in a secondary locale are
/// not surfaced.
pub fn merge_group(group: &ResourceGroup) -> Vec<TranslationRecord> {
    let Some(primary_path) = group.files.get(&PRIMARY_LOCALE) else {
        tracing::debug!(event = "group_without_primary", group = %group.name);
        return Vec::new();
    };

    let primary = read_resx_map(primary_path);
    let en = group
        .files
        .get(&Locale::En)
        .map(|p| read_resx_map(p))
        .unwrap_or_default();
    let pt = group
        .files
        .get(&Locale::Pt)
        .map(|p| read_resx_map(p))
        .unwrap_or_default();

    let mut entries: Vec<(String, String)> = primary.into_iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .map(|(key, fr)| {
            let texts = LocaleTexts {
                en: en.get(&key).cloned().unwrap_or_default(),
                pt: pt.get(&key).cloned().unwrap_or_default(),
                fr,
            };
            TranslationRecord {
                key,
                group: group.name.clone(),
                texts,
                source_path: Some(primary_path.clone()),
            }
        })
        .collect()
}

/// Discover and merge every group under `base`, ordered by (group, key) with
/// ordinal comparison so result sequences are stable and locale-independent.
pub fn collect_records(base: &Path) -> Result<Vec<TranslationRecord>> {
    let mut records = Vec::new();
    for group in discover_groups(base)? {
        records.extend(merge_group(&group));
    }
    records.sort_by(|a, b| {
        (a.group.as_str(), a.key.as_str()).cmp(&(b.group.as_str(), b.key.as_str()))
    });
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tomloc_parsers_resx::{insert_entry, render_resx_bytes};

    #[test]
    fn merges_secondary_locales_with_empty_default() -> Result<()> {
        let dir = tempdir()?;
        insert_entry(&dir.path().join("G.fr.resx"), "k", "a")?;
        insert_entry(&dir.path().join("G.en.resx"), "k", "b")?;
        std::fs::write(dir.path().join("G.pt.resx"), render_resx_bytes(&[])?)?;

        let records = collect_records(dir.path())?;
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.key, "k");
        assert_eq!(r.texts.fr, "a");
        assert_eq!(r.texts.en, "b");
        assert_eq!(r.texts.pt, "");
        Ok(())
    }

    #[test]
    fn keys_only_in_secondary_locales_are_dropped() -> Result<()> {
        let dir = tempdir()?;
        insert_entry(&dir.path().join("G.fr.resx"), "shared", "a")?;
        insert_entry(&dir.path().join("G.en.resx"), "shared", "b")?;
        insert_entry(&dir.path().join("G.en.resx"), "orphan", "only english")?;

        let records = collect_records(dir.path())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "shared");
        Ok(())
    }

    #[test]
    fn group_without_primary_locale_yields_no_records() -> Result<()> {
        let dir = tempdir()?;
        insert_entry(&dir.path().join("G.en.resx"), "k", "b")?;
        assert!(collect_records(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn records_sorted_by_group_then_key() -> Result<()> {
        let dir = tempdir()?;
        for key in ["OK", "Cancel"] {
            insert_entry(&dir.path().join("Menu.fr.resx"), key, "x")?;
        }
        insert_entry(&dir.path().join("Errors.fr.resx"), "E1", "x")?;

        let records = collect_records(dir.path())?;
        let order: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.group.as_str(), r.key.as_str()))
            .collect();
        assert_eq!(
            order,
            [("Errors", "E1"), ("Menu", "Cancel"), ("Menu", "OK")]
        );
        Ok(())
    }
}
