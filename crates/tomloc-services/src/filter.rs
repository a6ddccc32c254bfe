use tomloc_core::{Locale, TranslationRecord};
use tomloc_domain::{FieldFilter, SearchType, TranslationFilter};

/// Propagate the global overrides onto per-field filters that still carry the
/// default settings.
pub fn apply_global_settings(filter: &mut TranslationFilter) {
    let force_case = filter.global_case_sensitive;
    let global_type = filter.global_search_type;

    for field in [
        &mut filter.key,
        &mut filter.fr,
        &mut filter.en,
        &mut filter.pt,
        &mut filter.group,
    ] {
        if force_case {
            field.case_sensitive = true;
        }
        if global_type != SearchType::Contains && field.search_type == SearchType::Contains {
            field.search_type = global_type;
        }
    }
}

/// A filter is empty iff every field value is blank. Empty filters never reach
/// the matcher: searching is opt-in and must not return the whole corpus.
pub fn is_filter_empty(filter: &TranslationFilter) -> bool {
    [
        &filter.key,
        &filter.fr,
        &filter.en,
        &filter.pt,
        &filter.group,
    ]
    .into_iter()
    .all(FieldFilter::is_blank)
}

/// Every non-blank field filter must match; blank fields are vacuously true.
pub fn matches(record: &TranslationRecord, filter: &TranslationFilter) -> bool {
    field_matches(&record.key, &filter.key)
        && field_matches(record.texts.get(Locale::Fr), &filter.fr)
        && field_matches(record.texts.get(Locale::En), &filter.en)
        && field_matches(record.texts.get(Locale::Pt), &filter.pt)
        && field_matches(&record.group, &filter.group)
}

fn field_matches(field: &str, filter: &FieldFilter) -> bool {
    let Some(needle) = filter.value.as_deref() else {
        return true;
    };
    if needle.trim().is_empty() {
        return true;
    }
    if filter.case_sensitive {
        compare(filter.search_type, field, needle)
    } else {
        compare(
            filter.search_type,
            &field.to_lowercase(),
            &needle.to_lowercase(),
        )
    }
}

fn compare(kind: SearchType, field: &str, needle: &str) -> bool {
    match kind {
        SearchType::Contains => field.contains(needle),
        SearchType::BeginsWith => field.starts_with(needle),
        SearchType::EndsWith => field.ends_with(needle),
        SearchType::Equals => field == needle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomloc_core::LocaleTexts;

    fn record(key: &str, fr: &str, en: &str, group: &str) -> TranslationRecord {
        TranslationRecord {
            key: key.into(),
            group: group.into(),
            texts: LocaleTexts {
                fr: fr.into(),
                en: en.into(),
                pt: String::new(),
            },
            source_path: None,
        }
    }

    #[test]
    fn blank_fields_are_vacuously_true() {
        let r = record("Greeting", "Bonjour", "Hello", "Menu");
        assert!(matches(&r, &TranslationFilter::default()));
        assert!(is_filter_empty(&TranslationFilter::default()));

        let mut filter = TranslationFilter::default();
        filter.fr.value = Some("   ".into());
        assert!(is_filter_empty(&filter));
    }

    #[test]
    fn contains_is_case_insensitive_by_default() {
        let r = record("Greeting", "Bonjour", "Hello", "Menu");
        let mut filter = TranslationFilter::default();
        filter.fr = FieldFilter::contains("BONJ");
        assert!(matches(&r, &filter));
    }

    #[test]
    fn equals_case_sensitive_matches_byte_for_byte() {
        let r = record("Greeting", "Bonjour", "Hello", "Menu");
        let mut filter = TranslationFilter::default();
        filter.key = FieldFilter {
            value: Some("Greeting".into()),
            search_type: SearchType::Equals,
            case_sensitive: true,
        };
        assert!(matches(&r, &filter));

        filter.key.value = Some("greeting".into());
        assert!(!matches(&r, &filter));
    }

    #[test]
    fn begins_and_ends_with() {
        let r = record("Greeting", "Bonjour", "Hello", "Menu");
        let mut filter = TranslationFilter::default();
        filter.en = FieldFilter {
            value: Some("hel".into()),
            search_type: SearchType::BeginsWith,
            case_sensitive: false,
        };
        assert!(matches(&r, &filter));

        filter.en.search_type = SearchType::EndsWith;
        assert!(!matches(&r, &filter));
        filter.en.value = Some("llo".into());
        assert!(matches(&r, &filter));
    }

    #[test]
    fn all_non_blank_fields_must_match() {
        let r = record("Greeting", "Bonjour", "Hello", "Menu");
        let mut filter = TranslationFilter::default();
        filter.fr = FieldFilter::contains("Bonjour");
        filter.group = FieldFilter::contains("Errors");
        assert!(!matches(&r, &filter));
    }

    #[test]
    fn global_overrides_apply_to_default_fields_only() {
        let mut filter = TranslationFilter::default();
        filter.key = FieldFilter::contains("ok");
        filter.fr = FieldFilter {
            value: Some("Valider".into()),
            search_type: SearchType::Equals,
            case_sensitive: false,
        };
        filter.global_case_sensitive = true;
        filter.global_search_type = SearchType::BeginsWith;

        apply_global_settings(&mut filter);

        assert!(filter.key.case_sensitive);
        assert_eq!(filter.key.search_type, SearchType::BeginsWith);
        // an explicit per-field search type is left alone
        assert_eq!(filter.fr.search_type, SearchType::Equals);
        assert!(filter.fr.case_sensitive);
    }
}
