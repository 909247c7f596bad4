use std::path::Path;

use serde::Deserialize;

use crate::error::{BallastError, Result};
use crate::weight;

/// YAML frontmatter of a content document.
#[derive(Debug, Clone, Deserialize)]
pub struct Frontmatter {
    /// Stable item id
    #[serde(default)]
    pub id: String,

    /// Bundle machine name
    #[serde(rename = "type", default)]
    pub bundle: String,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Role of the document's author, when known
    #[serde(default)]
    pub role: Option<String>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parse YAML frontmatter from markdown content
#[tracing::instrument(skip(content), fields(path = ?path))]
pub(crate) fn parse_document(path: &Path, content: &str) -> Result<(Frontmatter, String)> {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return Err(BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: "missing frontmatter delimiter (---)".to_string(),
        });
    }

    let after_first = &content[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or_else(|| BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: "missing closing frontmatter delimiter (---)".to_string(),
        })?;

    let yaml_content = &after_first[..end_pos];
    let body_start = 3 + end_pos + 4; // Skip first ---, yaml, \n---
    let body = if body_start < content.len() {
        content[body_start..].trim_start_matches('\n').to_string()
    } else {
        String::new()
    };

    let frontmatter: Frontmatter =
        serde_yaml::from_str(yaml_content).map_err(|e| BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // Validate required fields
    if frontmatter.id.is_empty() {
        return Err(BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: "missing required field: id".to_string(),
        });
    }
    if frontmatter.bundle.is_empty() {
        return Err(BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: "missing required field: type".to_string(),
        });
    }
    if !weight::is_valid_key(&frontmatter.bundle) {
        return Err(BallastError::InvalidFrontmatter {
            path: path.to_path_buf(),
            reason: format!("type is not a machine name: {:?}", frontmatter.bundle),
        });
    }
    if let Some(role) = &frontmatter.role {
        if !weight::is_valid_key(role) {
            return Err(BallastError::InvalidFrontmatter {
                path: path.to_path_buf(),
                reason: format!("role is not a machine name: {role:?}"),
            });
        }
    }

    Ok((frontmatter, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<(Frontmatter, String)> {
        parse_document(Path::new("test.md"), content)
    }

    #[test]
    fn parses_a_full_document() {
        let content = "---\nid: a1\ntype: article\ntitle: Hello\nrole: editor\ntags: [x, y]\n---\n\nBody text.\n";
        let (front, body) = parse(content).unwrap();
        assert_eq!(front.id, "a1");
        assert_eq!(front.bundle, "article");
        assert_eq!(front.title.as_deref(), Some("Hello"));
        assert_eq!(front.role.as_deref(), Some("editor"));
        assert_eq!(front.tags, vec!["x", "y"]);
        assert_eq!(body, "Body text.\n");
    }

    #[test]
    fn title_role_and_tags_are_optional() {
        let content = "---\nid: a1\ntype: page\n---\n";
        let (front, body) = parse(content).unwrap();
        assert!(front.title.is_none());
        assert!(front.role.is_none());
        assert!(front.tags.is_empty());
        assert!(body.is_empty());
    }

    #[test]
    fn rejects_missing_delimiter() {
        let err = parse("id: a1\ntype: page\n").unwrap_err();
        assert!(matches!(err, BallastError::InvalidFrontmatter { .. }));
    }

    #[test]
    fn rejects_unterminated_frontmatter() {
        let err = parse("---\nid: a1\ntype: page\n").unwrap_err();
        assert!(matches!(err, BallastError::InvalidFrontmatter { .. }));
    }

    #[test]
    fn rejects_missing_id() {
        let err = parse("---\ntype: page\n---\n").unwrap_err();
        let reason = err.to_string();
        assert!(reason.contains("missing required field: id"));
    }

    #[test]
    fn rejects_missing_type() {
        let err = parse("---\nid: a1\n---\n").unwrap_err();
        let reason = err.to_string();
        assert!(reason.contains("missing required field: type"));
    }

    #[test]
    fn rejects_non_machine_name_type() {
        let err = parse("---\nid: a1\ntype: Blog Post\n---\n").unwrap_err();
        assert!(err.to_string().contains("not a machine name"));
    }

    #[test]
    fn rejects_non_machine_name_role() {
        let err = parse("---\nid: a1\ntype: page\nrole: Site Admin\n---\n").unwrap_err();
        assert!(err.to_string().contains("not a machine name"));
    }
}
