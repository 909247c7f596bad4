//! `ballast init` command - scaffold a new project
//!
//! Writes a starter `ballast.toml` with one content datasource, a visible
//! title field, and the built-in processors disabled. `--with-sample` also
//! seeds a small content corpus to index.

use std::fs;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::{BallastError, Result};

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path, with_sample: bool, force: bool) -> Result<()> {
    let config_path = if let Some(path) = cli.config.as_ref() {
        if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        }
    } else {
        Config::path_in(root)
    };

    if config_path.exists() && !force {
        return Err(BallastError::already_exists(
            "configuration",
            config_path.display(),
        ));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let config = Config::scaffold();
    config.save(&config_path)?;

    let content_dir = config.content_path(root);
    fs::create_dir_all(&content_dir)?;

    let samples = if with_sample {
        write_sample_corpus(&content_dir)?
    } else {
        0
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "config": config_path.display().to_string(),
                "content_dir": content_dir.display().to_string(),
                "samples": samples,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("Initialized ballast project at {}", root.display());
            if with_sample {
                println!(
                    "Wrote {} sample documents to {}",
                    samples,
                    content_dir.display()
                );
            }
            println!();
            println!("Run `ballast processors` to see the available processors.");
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=init status=ok samples={}",
                root.display(),
                samples
            );
        }
    }

    Ok(())
}

fn write_sample_corpus(content_dir: &Path) -> Result<usize> {
    let docs = [
        (
            "welcome-article.md",
            "---\nid: welcome_article\ntype: article\ntitle: Welcome aboard\nrole: editor\n---\n\nA first article to weigh.\n",
        ),
        (
            "about-page.md",
            "---\nid: about_page\ntype: page\ntitle: About this site\n---\n\nStatic page content.\n",
        ),
        (
            "first-post.md",
            "---\nid: first_post\ntype: blog_post\ntitle: First post\nrole: authenticated\n---\n\nHello from the blog.\n",
        ),
    ];

    for (name, body) in docs {
        fs::write(content_dir.join(name), body)?;
    }
    Ok(docs.len())
}
