//! inspect command - Show the mod metadata of a jar

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::archive::JarArchive;
use crate::cli::Context;
use crate::core::metadata::{load_metadata, ModMetadata, METADATA_ENTRY};
use crate::ui::output;

/// Parse and print the metadata of `jar`.
pub fn inspect(ctx: &Context, jar: &Path, json: bool) -> Result<()> {
    let mut archive = JarArchive::open(jar)?;
    let metadata = load_metadata(&mut archive)
        .with_context(|| format!("failed to load mod metadata from '{}'", jar.display()))?;

    if json {
        output::result(serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    match metadata {
        Some(metadata) => output::result(render(&metadata)),
        None => output::print(
            format!("{}: no {} entry, not a Fabric mod", jar.display(), METADATA_ENTRY),
            ctx.verbosity,
        ),
    }
    Ok(())
}

fn render(metadata: &ModMetadata) -> String {
    let mut lines = Vec::new();

    if metadata.entrypoints().is_empty() {
        lines.push("entrypoints: none".to_string());
    } else {
        lines.push("entrypoints:".to_string());
        for (category, classes) in metadata.entrypoints() {
            lines.push(format!("  {}:", category));
            if !classes.is_empty() {
                lines.push(output::format_list(classes, "    - "));
            }
        }
    }

    lines.push(format!(
        "access widener: {}",
        metadata.access_widener().unwrap_or("none")
    ));

    if metadata.nested_archives().is_empty() {
        lines.push("nested jars: none".to_string());
    } else {
        lines.push("nested jars:".to_string());
        lines.push(output::format_list(metadata.nested_archives(), "  - "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::parse_metadata_str;

    #[test]
    fn render_full_document() {
        let metadata = parse_metadata_str(
            r#"{
                "schemaVersion": 1,
                "entrypoints": {"main": ["a.Main"], "client": [], "server": ["a.Server"]},
                "accessWidener": "a.accesswidener",
                "jars": [{"file": "META-INF/jars/x.jar"}]
            }"#,
        )
        .unwrap();

        assert_eq!(
            render(&metadata),
            "entrypoints:\n  client:\n  main:\n    - a.Main\n  server:\n    - a.Server\n\
             access widener: a.accesswidener\n\
             nested jars:\n  - META-INF/jars/x.jar"
        );
    }

    #[test]
    fn render_minimal_document() {
        let metadata = parse_metadata_str(r#"{"schemaVersion": 1}"#).unwrap();
        assert_eq!(
            render(&metadata),
            "entrypoints: none\naccess widener: none\nnested jars: none"
        );
    }
}
