use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tomloc_core::{split_resource_name, ResourceGroup, Result, ResxError};
use walkdir::WalkDir;

/// Header block written into every synthesized document so externally-authored
/// resx tooling can still open the file.
const RESX_HEADERS: [(&str, &str); 4] = [
    ("resmimetype", "text/microsoft-resx"),
    ("version", "2.0"),
    (
        "reader",
        "System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, \
         Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
    (
        "writer",
        "System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, \
         Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
];

/// Walk `base` and group discovered resource files by logical group name.
/// A missing base directory is empty data, not an error. When two files claim
/// the same (group, locale), the first one discovered wins.
pub fn discover_groups(base: &Path) -> Result<Vec<ResourceGroup>> {
    if !base.is_dir() {
        tracing::warn!(event = "resources_dir_missing", path = %base.display());
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<String, ResourceGroup> = BTreeMap::new();
    for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_resx = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("resx"))
            .unwrap_or(false);
        if !is_resx {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        match split_resource_name(file_name) {
            Some((group, locale)) => {
                let slot = groups.entry(group.to_string()).or_insert_with(|| ResourceGroup {
                    name: group.to_string(),
                    files: BTreeMap::new(),
                });
                if let Some(kept) = slot.files.get(&locale) {
                    tracing::debug!(
                        event = "duplicate_locale_file",
                        group = %slot.name,
                        locale = %locale,
                        kept = %kept.display(),
                        ignored = %path.display()
                    );
                } else {
                    slot.files.insert(locale, path.to_path_buf());
                }
            }
            None => {
                tracing::debug!(event = "unrecognized_resource_name", path = %path.display());
            }
        }
    }

    Ok(groups.into_values().collect())
}

/// Read a locale file into a key/value map. Missing or malformed files yield
/// an empty map plus a logged warning: a broken secondary-locale file must not
/// prevent listing the others.
pub fn read_resx_map(path: &Path) -> HashMap<String, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(event = "resx_read_failed", path = %path.display(), error = %e);
            return HashMap::new();
        }
    };
    match parse_resx_str(&content, path) {
        Ok(entries) => entries.into_iter().collect(),
        Err(e) => {
            tracing::warn!(event = "resx_parse_failed", path = %path.display(), error = %e);
            HashMap::new()
        }
    }
}

/// Order-preserving parse of a resx document: every `data` element's `name`
/// attribute plus its nested `value` text.
pub fn parse_resx_str(xml: &str, path: &Path) -> std::result::Result<Vec<(String, String)>, ResxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut out = Vec::new();
    let mut current_key: Option<String> = None;
    let mut in_value = false;
    let mut value_acc = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"data" => {
                    current_key = data_name(&e, path)?;
                    in_value = false;
                    value_acc.clear();
                }
                b"value" if current_key.is_some() => {
                    in_value = true;
                    value_acc.clear();
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_value => {
                let text = t.unescape().unwrap_or_else(|_| {
                    std::borrow::Cow::Owned(String::from_utf8_lossy(t.as_ref()).into_owned())
                });
                value_acc.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"value" => in_value = false,
                b"data" => {
                    if let Some(key) = current_key.take() {
                        out.push((key, std::mem::take(&mut value_acc)));
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"data" => {
                if let Some(key) = data_name(&e, path)? {
                    out.push((key, String::new()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ResxError::Malformed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

fn data_name(
    element: &BytesStart<'_>,
    path: &Path,
) -> std::result::Result<Option<String>, ResxError> {
    for attr in element.attributes().filter_map(|a| a.ok()) {
        if attr.key.as_ref() == b"name" {
            let value = attr.unescape_value().map_err(|e| ResxError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Render a minimal valid resx document: declaration, root, the resheader
/// block, and one `data` element per entry.
pub fn render_resx_bytes(entries: &[(String, String)]) -> std::result::Result<Vec<u8>, ResxError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("root")))
        .map_err(xml_err)?;

    for (name, value) in RESX_HEADERS {
        let mut header = BytesStart::new("resheader");
        header.push_attribute(("name", name));
        write_value_element(&mut writer, header, value)?;
    }

    for (key, value) in entries {
        let mut data = BytesStart::new("data");
        data.push_attribute(("name", key.as_str()));
        data.push_attribute(("xml:space", "preserve"));
        write_value_element(&mut writer, data, value)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("root")))
        .map_err(xml_err)?;

    Ok(writer.into_inner())
}

fn write_value_element<'a>(
    writer: &mut Writer<Vec<u8>>,
    open: BytesStart<'a>,
    value: &str,
) -> std::result::Result<(), ResxError> {
    let end = open.to_end().into_owned();
    writer.write_event(Event::Start(open)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("value")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("value")))
        .map_err(xml_err)?;
    writer.write_event(Event::End(end)).map_err(xml_err)?;
    Ok(())
}

fn xml_err(e: impl std::fmt::Display) -> ResxError {
    ResxError::Xml(e.to_string())
}

fn load_entries(path: &Path) -> std::result::Result<Vec<(String, String)>, ResxError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    parse_resx_str(&content, path)
}

/// Append-only write: fails with [`ResxError::DuplicateKey`] when the key is
/// already present. Keys are the cross-locale join key; silently overwriting
/// on create would mask collisions between independently-added strings.
pub fn insert_entry(path: &Path, key: &str, value: &str) -> std::result::Result<(), ResxError> {
    let mut entries = load_entries(path)?;
    if entries.iter().any(|entry| entry.0 == key) {
        return Err(ResxError::DuplicateKey {
            key: key.to_string(),
            path: path.to_path_buf(),
        });
    }
    entries.push((key.to_string(), value.to_string()));
    let bytes = render_resx_bytes(&entries)?;
    write_atomic(path, &bytes)?;
    Ok(())
}

/// Overwrite-or-append write: the explicit update primitive.
pub fn upsert_entry(path: &Path, key: &str, value: &str) -> std::result::Result<(), ResxError> {
    let mut entries = load_entries(path)?;
    match entries.iter_mut().find(|entry| entry.0 == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => entries.push((key.to_string(), value.to_string())),
    }
    let bytes = render_resx_bytes(&entries)?;
    write_atomic(path, &bytes)?;
    Ok(())
}

/// Remove `key` from the file. Returns whether an entry was actually removed;
/// a missing file (or missing key) is a successful no-op, since absence of the
/// file implies absence of the key.
pub fn remove_entry(path: &Path, key: &str) -> std::result::Result<bool, ResxError> {
    if !path.exists() {
        return Ok(false);
    }
    let mut entries = load_entries(path)?;
    let before = entries.len();
    entries.retain(|entry| entry.0 != key);
    if entries.len() == before {
        return Ok(false);
    }
    let bytes = render_resx_bytes(&entries)?;
    write_atomic(path, &bytes)?;
    Ok(true)
}

/// Write via a sibling temp file plus rename so a crash mid-write cannot
/// corrupt keys unrelated to the mutation.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("resx.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
