//! Export command.
//!
//! Compiles fresh and writes the artifact only on success, so a failed
//! export never leaves a partial file behind.

use anyhow::{Context, Result};

use crate::cli::ExportArgs;
use crate::config::StudioConfig;
use crate::core::DocId;
use crate::document::DocumentStore;
use crate::export;
use crate::log;

pub fn run_export(args: &ExportArgs, config: &StudioConfig) -> Result<()> {
    let store = DocumentStore::new(config.story_dir());

    let doc = DocId::from_route(&args.doc)
        .with_context(|| format!("`{}` is not a valid document id", args.doc))?;
    let source = store
        .read(&doc)
        .with_context(|| format!("document `{}` not found in {}", doc, store.root().display()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    let kind = args.format.kind();
    let artifact = match runtime.block_on(export::export(doc.file_stem(), &source, kind, config)) {
        Ok(artifact) => artifact,
        Err(e) => {
            // Blocking error, nothing written
            log!("error"; "export failed:\n{}", e);
            std::process::exit(1);
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{}.{}", doc.file_stem(), artifact.extension).into());

    std::fs::write(&output, &artifact.content)
        .with_context(|| format!("failed to write `{}`", output.display()))?;

    log!(
        "export";
        "wrote {} ({} bytes)",
        output.display(),
        artifact.content.len()
    );
    Ok(())
}
