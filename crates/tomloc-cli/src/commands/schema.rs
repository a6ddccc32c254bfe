use std::fs;

pub fn run_schema(out_dir: std::path::PathBuf) -> color_eyre::Result<()> {
    let out_dir = if out_dir.as_os_str().is_empty() {
        std::path::PathBuf::from("./docs/assets/schemas")
    } else {
        out_dir
    };
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(tomloc_domain::TranslationRow, "translation_row.schema.json");
    dump!(
        tomloc_domain::TranslationFilter,
        "translation_filter.schema.json"
    );
    dump!(tomloc_domain::WriteSummary, "write_summary.schema.json");
    println!("✔ Schemas dumped to {}", out_dir.display());
    Ok(())
}
