use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;

pub fn bin_cmd() -> Command {
    Command::cargo_bin("tomloc").expect("tomloc binary should be built")
}

/// Render a minimal resx document for fixtures without going through the
/// crate under test.
pub fn resx_document(entries: &[(&str, &str)]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <root>\n\
         \x20 <resheader name=\"resmimetype\">\n\
         \x20   <value>text/microsoft-resx</value>\n\
         \x20 </resheader>\n\
         \x20 <resheader name=\"version\">\n\
         \x20   <value>2.0</value>\n\
         \x20 </resheader>\n",
    );
    for (key, value) in entries {
        doc.push_str(&format!(
            "  <data name=\"{key}\" xml:space=\"preserve\">\n    <value>{value}</value>\n  </data>\n"
        ));
    }
    doc.push_str("</root>\n");
    doc
}

pub fn seed_file(dir: &Path, name: &str, entries: &[(&str, &str)]) {
    std::fs::write(dir.join(name), resx_document(entries)).expect("fixture write");
}

pub fn run_ok(args: &[&str]) -> String {
    let mut cmd = bin_cmd();
    cmd.args(args);
    let assert = cmd.assert().success();
    String::from_utf8_lossy(assert.get_output().stdout.as_ref()).to_string()
}
