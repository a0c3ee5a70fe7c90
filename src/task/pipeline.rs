//! Ordered job lists and their builder

use crate::error::{TaskError, TaskResult};
use crate::task::context::{RenderContext, SceneContext};
use crate::task::job::Job;
use crate::task::varying::Varying;

/// An ordered list of jobs, run top to bottom once per frame.
///
/// Insertion order is execution order. Nothing is reordered or skipped.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    name: String,
    jobs: Vec<Job>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jobs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a job and return its output port for wiring downstream jobs
    pub fn push(&mut self, job: Job) -> Varying {
        log::debug!(
            "Pipeline '{}': job #{} '{}' appended",
            self.name,
            self.jobs.len(),
            job.name()
        );
        let output = job.output();
        self.jobs.push(job);
        output
    }

    /// Run every job once, in order
    pub fn run(&self, scene: &SceneContext, render: &mut RenderContext) {
        for (index, job) in self.jobs.iter().enumerate() {
            log::trace!("Pipeline '{}': running job #{index} '{}'", self.name, job.name());
            job.run(scene, render);
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// First job named `name`
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.name() == name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

/// Builder for assembling pipelines with a fluent API.
///
/// Rejects duplicate job names so [`PipelineBuilder::output_of`] is unambiguous.
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pipeline: Pipeline::new(name),
        }
    }

    /// Append a job
    pub fn job(mut self, job: Job) -> TaskResult<Self> {
        if self.pipeline.job(job.name()).is_some() {
            return Err(TaskError::DuplicateJobName(job.name().to_string()));
        }
        self.pipeline.push(job);
        Ok(self)
    }

    /// Output port of the job named `name`, if any
    pub fn output_of(&self, name: &str) -> Option<Varying> {
        self.pipeline
            .job(name)
            .map(Job::output)
            .filter(|output| !output.is_empty())
    }

    /// Output port of the most recently appended job
    pub fn last_output(&self) -> Option<Varying> {
        self.pipeline
            .jobs()
            .last()
            .map(Job::output)
            .filter(|output| !output.is_empty())
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}
