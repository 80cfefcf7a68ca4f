//! Check command.
//!
//! One-shot compile of documents with diagnostics on the terminal. Useful
//! for CI and for a quick syntax pass without starting the server.

use anyhow::{Context, Result};

use crate::cli::CheckArgs;
use crate::compiler::{self, SourceClass};
use crate::config::StudioConfig;
use crate::core::DocId;
use crate::document::DocumentStore;
use crate::{log, logger};

pub fn run_check(args: &CheckArgs, config: &StudioConfig) -> Result<()> {
    let store = DocumentStore::new(config.story_dir());

    let docs: Vec<DocId> = if args.docs.is_empty() {
        store.scan()
    } else {
        args.docs
            .iter()
            .map(|raw| {
                DocId::from_route(raw)
                    .with_context(|| format!("`{raw}` is not a valid document id"))
            })
            .collect::<Result<_>>()?
    };

    if docs.is_empty() {
        log!("check"; "no documents found in {}", store.root().display());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    let mut failures = 0usize;
    for doc in &docs {
        let source = match store.read(doc) {
            Ok(source) => source,
            Err(e) => {
                logger::status_error(&format!("unreadable: {doc}"), &e.to_string());
                failures += 1;
                continue;
            }
        };

        match compiler::classify_source(&source) {
            SourceClass::Empty => logger::status_unchanged(&format!("{doc}: empty")),
            SourceClass::Compiled => {
                logger::status_unchanged(&format!("{doc}: already compiled JSON"))
            }
            SourceClass::Script => {
                match runtime.block_on(compiler::compile_source(&source, config)) {
                    Ok(json) => {
                        logger::status_success(&format!("{doc}: compiled ({} bytes)", json.len()));
                    }
                    Err(e) => {
                        logger::status_error(&format!("{doc}: compile failed"), &e.to_string());
                        failures += 1;
                    }
                }
            }
        }
    }

    if failures > 0 {
        log!("check"; "{}/{} document(s) failed", failures, docs.len());
        std::process::exit(1);
    }

    log!("check"; "{} document(s) ok", docs.len());
    Ok(())
}
