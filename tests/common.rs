use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

pub fn ballast() -> Command {
    cargo_bin_cmd!("ballast")
}

/// Scaffold a project in `root` via `ballast init`.
#[allow(dead_code)]
pub fn init_project(root: &Path) {
    ballast().current_dir(root).arg("init").assert().success();
}

/// Scaffold a project with the sample content corpus.
#[allow(dead_code)]
pub fn init_project_with_sample(root: &Path) {
    ballast()
        .current_dir(root)
        .args(["init", "--with-sample"])
        .assert()
        .success();
}

/// Write one content document with minimal frontmatter.
#[allow(dead_code)]
pub fn write_doc(root: &Path, name: &str, id: &str, bundle: &str, role: Option<&str>) {
    let content_dir = root.join("content");
    fs::create_dir_all(&content_dir).unwrap();
    let role_line = role.map(|r| format!("role: {}\n", r)).unwrap_or_default();
    let doc = format!(
        "---\nid: {}\ntype: {}\ntitle: {}\n{}---\n\nBody text.\n",
        id, bundle, id, role_line
    );
    fs::write(content_dir.join(name), doc).unwrap();
}

/// Declare the administrator-managed bundle destination field by appending
/// it to ballast.toml. Array-of-tables elements may appear anywhere in the
/// document, so appending is enough.
#[allow(dead_code)]
pub fn declare_bundle_field(root: &Path) {
    let path = root.join("ballast.toml");
    let mut config = fs::read_to_string(&path).unwrap();
    config.push_str(
        "\n[[index.fields]]\nid = \"bundle_weight\"\ntype = \"integer\"\nlabel = \"Bundle weight\"\n",
    );
    fs::write(path, config).unwrap();
}

/// Parse the saved configuration for direct assertions.
#[allow(dead_code)]
pub fn read_config(root: &Path) -> toml::Value {
    let raw = fs::read_to_string(root.join("ballast.toml")).unwrap();
    toml::from_str(&raw).unwrap()
}

/// Weight-table entries of one processor as (key, weight) pairs, in
/// serialized order. Empty when the processor has no persisted table.
#[allow(dead_code)]
pub fn table_entries(config: &toml::Value, processor: &str) -> Vec<(String, i64)> {
    config
        .get("processors")
        .and_then(|p| p.get(processor))
        .and_then(|entry| entry.get("weight_table"))
        .and_then(|table| table.as_array())
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    (
                        row["key"].as_str().unwrap().to_string(),
                        row["weight"].as_integer().unwrap(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
