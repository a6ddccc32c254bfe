use color_eyre::eyre::Result;
use std::io::Write;
use tomloc_core::{Locale, TranslationRecord};

pub fn write_csv<W: Write>(writer: W, records: &[TranslationRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["group", "key", "fr", "en", "pt"])?;

    for record in records {
        wtr.write_record([
            record.group.as_str(),
            record.key.as_str(),
            record.texts.get(Locale::Fr),
            record.texts.get(Locale::En),
            record.texts.get(Locale::Pt),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomloc_core::LocaleTexts;

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let records = vec![TranslationRecord {
            key: "OK".into(),
            group: "Menu".into(),
            texts: LocaleTexts {
                fr: "Valider".into(),
                en: "OK".into(),
                pt: String::new(),
            },
            source_path: None,
        }];

        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        let s = String::from_utf8(out).unwrap();

        assert!(s.starts_with("group,key,fr,en,pt"));
        assert!(s.contains("Menu,OK,Valider,OK,"));
    }
}
