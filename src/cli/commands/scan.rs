//! scan command - Run one indexing session

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, SectionRegistry};
use crate::core::types::ClassName;
use crate::fabric::FabricPlugin;
use crate::index::ClassIndex;
use crate::session::{IndexSession, SessionSummary};
use crate::ui::output;

/// Pre-index and index `libraries` then `mods`, and answer `checks`.
pub fn scan(ctx: &Context, mods: &[PathBuf], libraries: &[PathBuf], checks: &[String]) -> Result<()> {
    if mods.is_empty() && libraries.is_empty() {
        bail!("nothing to scan: pass at least one --mod or --library");
    }

    let config = Config::load(ctx.config.as_deref(), &ctx.cwd).context("failed to load config")?;
    tracing::debug!(path = ?config.loaded_from(), "configuration loaded");
    let plugin = FabricPlugin::from_config(&config).context("invalid [fabric] configuration")?;

    let mut sections = SectionRegistry::new();
    let mut session = IndexSession::new(ClassIndex::new()).keep_going(config.keep_going());
    session.register(Box::new(plugin), &mut sections);

    for warning in config.unclaimed_sections(&sections) {
        match &warning.path {
            Some(path) => output::warn(
                format!("{}: {}", path.display(), warning.message),
                ctx.verbosity,
            ),
            None => output::warn(&warning.message, ctx.verbosity),
        }
    }

    for library in libraries {
        session.add_library(library).with_context(|| scan_failed(library))?;
    }
    for jar in mods {
        session.add_mod(jar).with_context(|| scan_failed(jar))?;
    }

    let summary = session.summary();
    for skipped in &summary.skipped {
        output::warn(
            format!("skipped '{}': {}", skipped.path.display(), skipped.reason),
            ctx.verbosity,
        );
    }
    output::print(render_summary(summary, session.indexer()), ctx.verbosity);

    for check in checks {
        let class = ClassName::parse(check);
        let access = session.is_class_accessed_via_reflection(class.as_str());
        output::result(format!("{}: {}", class, access));
    }

    Ok(())
}

fn scan_failed(path: &Path) -> String {
    format!("failed to scan '{}'", path.display())
}

fn render_summary(summary: &SessionSummary, index: &ClassIndex) -> String {
    let mut lines = vec![
        format!(
            "scanned {} mod(s) and {} librar{}",
            summary.mods,
            summary.libraries,
            if summary.libraries == 1 { "y" } else { "ies" }
        ),
        format!("  with mod metadata: {}", summary.with_metadata),
        format!("  entrypoints registered: {}", summary.entrypoints_registered),
        format!("  nested jars indexed: {}", summary.nested_indexed),
        format!(
            "  archives indexed: {} ({} classes)",
            index.archive_count(),
            index.class_count()
        ),
    ];
    if !summary.skipped.is_empty() {
        lines.push(format!("  skipped: {}", summary.skipped.len()));
    }
    lines.join("\n")
}
