use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::build_info::BuildInfo;

pub const VERSION_SENTINEL: &str = "Not found yet";

/// One prose fragment in three renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub plaintext: String,
    pub html: String,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub types: Vec<String>,
    pub description: Description,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Type {
    pub fields: IndexMap<String, Argument>,
    pub description: Description,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub arguments: IndexMap<String, Argument>,
    pub returns: Option<String>,
    pub description: Description,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    #[serde(flatten)]
    pub content: Description,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    #[serde(flatten)]
    pub content: Description,
    pub version: String,
}

/// Root of everything scraped in one run.
///
/// Maps keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub types: IndexMap<String, Type>,
    pub methods: IndexMap<String, Method>,
    pub articles: IndexMap<String, Article>,
    pub changelogs: IndexMap<String, ChangelogEntry>,
    pub version: String,
    pub build_info: BuildInfo,
}

impl Schema {
    pub fn new(build_info: BuildInfo) -> Self {
        Self {
            types: IndexMap::new(),
            methods: IndexMap::new(),
            articles: IndexMap::new(),
            changelogs: IndexMap::new(),
            version: VERSION_SENTINEL.to_string(),
            build_info,
        }
    }
}

/// Write `all.json`, one file per top-level key, and the optional marker.
///
/// Existing files are overwritten.
pub fn write_all(schema: &Schema, dir: &Path, marker_file: &str) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    write_json(dir, "all", schema)?;
    write_json(dir, "types", &schema.types)?;
    write_json(dir, "methods", &schema.methods)?;
    write_json(dir, "articles", &schema.articles)?;
    write_json(dir, "changelogs", &schema.changelogs)?;
    write_file(dir, "version.txt", &schema.version)?;
    write_json(dir, "build_info", &schema.build_info)?;

    if !marker_file.is_empty() {
        write_file(dir, marker_file, "")?;
    }
    Ok(())
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    write_file(dir, &format!("{}.json", name), &to_pretty_json(value)?)
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))
}

/// Pretty JSON with a 4-space indent and no trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_build() -> BuildInfo {
        BuildInfo {
            branch: None,
            commit: None,
            pipeline_url: None,
            timestamp: 0,
        }
    }

    fn description(text: &str) -> Description {
        Description {
            plaintext: text.to_string(),
            html: format!("<p>{}</p>", text),
            markdown: text.to_string(),
        }
    }

    #[test]
    fn new_schema_has_every_key() {
        let schema = Schema::new(local_build());
        let json: serde_json::Value = serde_json::from_str(&to_pretty_json(&schema).unwrap()).unwrap();
        for key in ["types", "methods", "articles", "changelogs", "version", "build_info"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["version"], VERSION_SENTINEL);
        assert!(json["build_info"]["branch"].is_null());
    }

    #[test]
    fn article_flattens_description() {
        let article = Article {
            content: description("Hello"),
            title: "Making requests".into(),
            category: "Making requests".into(),
        };
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["plaintext"], "Hello");
        assert_eq!(json["html"], "<p>Hello</p>");
        assert_eq!(json["title"], "Making requests");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let mut map = IndexMap::new();
        map.insert("a", 1);
        assert_eq!(to_pretty_json(&map).unwrap(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("public");
        let mut schema = Schema::new(local_build());
        schema.version = "7.1".into();

        write_all(&schema, &out, ".nojekyll").unwrap();

        for name in [
            "all.json",
            "types.json",
            "methods.json",
            "articles.json",
            "changelogs.json",
            "build_info.json",
            "version.txt",
            ".nojekyll",
        ] {
            assert!(out.join(name).exists(), "{} not written", name);
        }
        assert_eq!(fs::read_to_string(out.join("version.txt")).unwrap(), "7.1");
        assert_eq!(fs::read_to_string(out.join("types.json")).unwrap(), "{}");
    }

    #[test]
    fn empty_marker_name_skips_marker() {
        let dir = tempfile::tempdir().unwrap();
        write_all(&Schema::new(local_build()), dir.path(), "").unwrap();
        assert!(!dir.path().join(".nojekyll").exists());
    }
}
