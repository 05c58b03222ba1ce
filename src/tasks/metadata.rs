//! Categories-and-tags extraction.
//!
//! The site generator renders the categories-and-tags listing as an HTML page
//! whose body is really JSON.  [`CopyMetadata`] lifts it out to the top of
//! each output root under a `.json` name; [`CleanIntermediates`] then deletes
//! the page's directory along with the other build-only subtrees.  The
//! cleanup must not start before the copy has finished for every root, which
//! is why it declares the copy as a dependency.

use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove};
use crate::pipeline::{Pipeline, Stage, into_outputs};
use crate::resources::StaleTree;

/// Name of the copy step.
pub const COPY_TASK: &str = "metadata-copy";
/// Name of the cleanup step.
pub const CLEANUP_TASK: &str = "metadata-cleanup";

/// Copy each output root's generated page to a JSON file at that root.
#[derive(Debug)]
pub struct CopyMetadata;

impl Task for CopyMetadata {
    fn name(&self) -> &str {
        COPY_TASK
    }

    fn description(&self) -> &str {
        "Copy the generated categories-and-tags page to JSON"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = &ctx.config.settings.metadata;
        let pipeline = Pipeline::source(settings.page.to_string_lossy())
            .pipe(Stage::Rename(settings.output.clone()));

        let mut outputs = Vec::new();
        for root in ctx.output_roots() {
            let items = pipeline.run(&root)?;
            outputs.extend(into_outputs(items, std::slice::from_ref(&root)));
        }
        Ok(process_resources(ctx, outputs, "copy")?.finish(ctx))
    }
}

/// Delete intermediate subtrees from every output root.
#[derive(Debug)]
pub struct CleanIntermediates;

impl Task for CleanIntermediates {
    fn name(&self) -> &str {
        CLEANUP_TASK
    }

    fn description(&self) -> &str {
        "Remove intermediate directories from the output roots"
    }

    fn dependencies(&self) -> &[&str] {
        &[COPY_TASK]
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let cleanup = &ctx.config.settings.metadata.cleanup;
        let trees = ctx
            .output_roots()
            .into_iter()
            .flat_map(|root| {
                cleanup
                    .iter()
                    .map(move |dir| StaleTree::new(root.join(dir)))
            })
            .collect::<Vec<_>>();
        Ok(process_resources_remove(ctx, trees, "remove")?.finish(ctx))
    }
}
