use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::config::StylesSettings;
use crate::pipeline::{Pipeline, Stage, into_outputs};

/// Task name.
pub const TASK: &str = "styles";

/// Compile the Sass stylesheet to minified CSS in every output root.
#[derive(Debug)]
pub struct CompileStyles;

/// The stylesheet pipeline: compile, minify, then switch to `.css`.
#[must_use]
pub fn pipeline(settings: &StylesSettings) -> Pipeline {
    Pipeline::source(settings.source.as_str())
        .pipe(Stage::CompileSass)
        .pipe(Stage::MinifyCss)
        .pipe(Stage::SetExtension("css".to_string()))
}

impl Task for CompileStyles {
    fn name(&self) -> &str {
        TASK
    }

    fn description(&self) -> &str {
        "Compile and minify stylesheets"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = &ctx.config.settings.styles;
        let pipeline = pipeline(settings);
        ctx.log.debug(&format!("pipeline: {pipeline}"));
        let items = pipeline.run(ctx.root())?;
        if items.is_empty() {
            return Ok(TaskResult::Skipped(format!(
                "only partials match {}",
                settings.source
            )));
        }
        ctx.log
            .debug(&format!("compiled {} stylesheet(s)", items.len()));

        let outputs = into_outputs(items, &ctx.output_dirs(&settings.dest));
        Ok(process_resources(ctx, outputs, "write")?.finish(ctx))
    }
}
