//! Four-phase prompt pipeline: reasoning, evaluation, adaptation, synthesis.
//!
//! Each phase embeds the previous phase's raw output in its prompt; nothing
//! in between is parsed. Phases run strictly in order on the calling thread
//! and the first failure aborts the run, so a failed run leaves no log.

use crate::assistant::Assistant;
use crate::error::Error;
use crate::task::Task;

/// Transcript of one pipeline invocation, discarded after it is saved.
#[derive(Debug)]
pub struct PipelineRun {
    pub task: String,
    pub reasoning: String,
    pub evaluation: String,
    pub adaptation: String,
    pub result: String,
}

/// Run the four assistant phases for `task` against `assistant`.
pub fn run_pipeline(
    task: &Task,
    project_context: &str,
    assistant: &dyn Assistant,
) -> Result<PipelineRun, Error> {
    let initial = build_initial_prompt(task, project_context);

    println!("Phase 1/4: reasoning...");
    tracing::info!(phase = "reasoning", "pipeline phase start");
    let reasoning = assistant.complete(&initial)?;

    println!("Phase 2/4: evaluation...");
    tracing::info!(phase = "evaluation", "pipeline phase start");
    let evaluation = assistant.complete(&format!("Evaluate the reasoning: {reasoning}"))?;

    println!("Phase 3/4: adaptation...");
    tracing::info!(phase = "adaptation", "pipeline phase start");
    let adaptation =
        assistant.complete(&format!("Refactor the approach based on: {evaluation}"))?;

    println!("Phase 4/4: final synthesis...");
    tracing::info!(phase = "synthesis", "pipeline phase start");
    let result =
        assistant.complete(&format!("{}\n\nImproved strategy:\n{}", task.task, adaptation))?;

    Ok(PipelineRun {
        task: task.task.clone(),
        reasoning,
        evaluation,
        adaptation,
        result,
    })
}

/// Assemble the first prompt: project context, optional user context and
/// constraints blocks, then the literal task text.
fn build_initial_prompt(task: &Task, project_context: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(project_context);
    prompt.push_str("\n\n");

    if let Some(context) = task.context.as_deref().filter(|text| !text.is_empty()) {
        prompt.push_str("Additional context:\n");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }
    if let Some(constraints) = task.constraints.as_deref().filter(|text| !text.is_empty()) {
        prompt.push_str("Constraints:\n");
        prompt.push_str(constraints);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&task.task);
    prompt
}
