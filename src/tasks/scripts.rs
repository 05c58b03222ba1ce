use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::pipeline::{Pipeline, into_outputs};

/// Task name.
pub const TASK: &str = "vendor-scripts";

/// Copy the vendored script bundle, unchanged, into every output root.
#[derive(Debug)]
pub struct CopyVendorScripts;

impl Task for CopyVendorScripts {
    fn name(&self) -> &str {
        TASK
    }

    fn description(&self) -> &str {
        "Copy vendored scripts"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = &ctx.config.settings.scripts;
        let items = Pipeline::source(settings.source.as_str()).run(ctx.root())?;
        let outputs = into_outputs(items, &ctx.output_dirs(&settings.dest));
        Ok(process_resources(ctx, outputs, "copy")?.finish(ctx))
    }
}
