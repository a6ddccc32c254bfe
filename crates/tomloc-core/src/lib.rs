use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// The locale that drives merging: keys absent from its file produce no records.
pub const PRIMARY_LOCALE: Locale = Locale::Fr;

/// Supported resource locales, matched against the `<group>.<locale>.resx`
/// file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
    Pt,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Fr, Locale::En, Locale::Pt];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }

    /// Tag prepended to generated placeholder texts for this locale.
    pub fn marker(self) -> &'static str {
        match self {
            Locale::Fr => "[FR]",
            Locale::En => "[EN]",
            Locale::Pt => "[PT]",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(suffix))
    }

    /// Canonical file name for this locale within a group. The scanner parses
    /// exactly this shape back via [`split_resource_name`], so writes can
    /// never create a file discovery would miss.
    pub fn file_name(self, group: &str) -> String {
        format!("{group}.{}.resx", self.code())
    }

    pub fn is_primary(self) -> bool {
        self == PRIMARY_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parse a resource file name of the canonical form `<group>.<locale>.resx`.
/// Extension and locale suffix are matched case-insensitively; anything else
/// (wrong extension, no locale segment, empty group) is `None`.
pub fn split_resource_name(file_name: &str) -> Option<(&str, Locale)> {
    let stem = strip_suffix_ignore_case(file_name, ".resx")?;
    let (group, suffix) = stem.rsplit_once('.')?;
    if group.is_empty() {
        return None;
    }
    let locale = Locale::from_suffix(suffix)?;
    Some((group, locale))
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(cut) {
        return None;
    }
    s[cut..].eq_ignore_ascii_case(suffix).then(|| &s[..cut])
}

/// One text per supported locale. Empty string means "untranslated", never
/// "absent": merged records always carry all three slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTexts {
    pub fr: String,
    pub en: String,
    pub pt: String,
}

impl LocaleTexts {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Fr => &self.fr,
            Locale::En => &self.en,
            Locale::Pt => &self.pt,
        }
    }

    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        let slot = match locale {
            Locale::Fr => &mut self.fr,
            Locale::En => &mut self.en,
            Locale::Pt => &mut self.pt,
        };
        *slot = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Locale, &str)> {
        Locale::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// Merged multilingual view of one key across all locales of its group.
/// Built fresh on every read; edits go back through per-locale file writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub key: String,
    pub group: String,
    pub texts: LocaleTexts,
    /// Primary-locale file this record was read from, when it exists on disk.
    pub source_path: Option<PathBuf>,
}

/// Input for create/update operations: locales with empty text are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTranslation {
    pub key: String,
    pub group: String,
    pub texts: LocaleTexts,
}

/// A logical resource group: one base name, one file per discovered locale.
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    pub name: String,
    pub files: std::collections::BTreeMap<Locale, PathBuf>,
}

#[derive(Debug, Error)]
pub enum ResxError {
    #[error("duplicate key `{key}` in {}", path.display())]
    DuplicateKey { key: String, path: PathBuf },
    #[error("malformed resource file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
    #[error("xml write: {0}")]
    Xml(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_canonical_names() {
        assert_eq!(
            split_resource_name("Menu.fr.resx"),
            Some(("Menu", Locale::Fr))
        );
        assert_eq!(
            split_resource_name("Shared.Errors.pt.resx"),
            Some(("Shared.Errors", Locale::Pt))
        );
        // suffix and extension are case-insensitive
        assert_eq!(
            split_resource_name("Menu.FR.RESX"),
            Some(("Menu", Locale::Fr))
        );
    }

    #[test]
    fn rejects_unrecognized_names() {
        assert_eq!(split_resource_name("Menu.resx"), None);
        assert_eq!(split_resource_name("Menu.de.resx"), None);
        assert_eq!(split_resource_name("Menu.fr.xml"), None);
        assert_eq!(split_resource_name(".fr.resx"), None);
    }

    #[test]
    fn file_name_round_trips_through_split() {
        for locale in Locale::ALL {
            let name = locale.file_name("Menu");
            assert_eq!(split_resource_name(&name), Some(("Menu", locale)));
        }
    }
}
