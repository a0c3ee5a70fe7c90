//! Jobs: named, type-erased units of pipeline work
//!
//! A job body is any value implementing one of four traits, depending on which
//! ports it needs:
//!
//! | Body trait               | Input | Output | Constructor                  |
//! |--------------------------|-------|--------|------------------------------|
//! | [`JobBody`]              | -     | -      | [`Job::new`]                 |
//! | [`InputJobBody`]         | yes   | -      | [`Job::with_input`]          |
//! | [`OutputJobBody`]        | -     | yes    | [`Job::with_output`]         |
//! | [`InputOutputJobBody`]   | yes   | yes    | [`Job::with_input_output`]   |
//!
//! Each constructor wraps the body in a model that knows how to resolve its
//! ports, so every [`Job`] exposes the same interface regardless of shape.

use crate::error::{TaskError, TaskResult};
use crate::task::context::{RenderContext, SceneContext};
use crate::task::varying::Varying;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A job body with no ports
pub trait JobBody: Send + 'static {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext);
}

/// A job body reading one input port
pub trait InputJobBody: Send + 'static {
    type Input: Any + Send + Sync;

    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext, input: &Self::Input);
}

/// A job body writing one output port
pub trait OutputJobBody: Send + 'static {
    type Output: Any + Send + Sync + Default;

    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext, output: &mut Self::Output);
}

/// A job body reading one input port and writing one output port
pub trait InputOutputJobBody: Send + 'static {
    type Input: Any + Send + Sync;
    type Output: Any + Send + Sync + Default;

    fn run(
        &mut self,
        scene: &SceneContext,
        render: &mut RenderContext,
        input: &Self::Input,
        output: &mut Self::Output,
    );
}

/// Binding between a job body and the uniform job interface
pub(crate) trait JobConcept: Send {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext);
}

struct Model<B> {
    body: B,
}

impl<B: JobBody> JobConcept for Model<B> {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        self.body.run(scene, render);
    }
}

struct ModelI<B> {
    body: B,
    input: Varying,
}

impl<B: InputJobBody> JobConcept for ModelI<B> {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let input = self.input.get::<B::Input>();
        self.body.run(scene, render, &input);
    }
}

struct ModelO<B> {
    body: B,
    output: Varying,
}

impl<B: OutputJobBody> JobConcept for ModelO<B> {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let mut output = self.output.edit::<B::Output>();
        self.body.run(scene, render, &mut output);
    }
}

struct ModelIO<B> {
    body: B,
    input: Varying,
    output: Varying,
}

impl<B: InputOutputJobBody> JobConcept for ModelIO<B> {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let input = self.input.get::<B::Input>();
        let mut output = self.output.edit::<B::Output>();
        self.body.run(scene, render, &input, &mut output);
    }
}

pub(crate) struct JobInner {
    pub(crate) name: String,
    input: Varying,
    output: Varying,
    concept: Mutex<Box<dyn JobConcept>>,
}

/// One stage of a pipeline.
///
/// Cloning a job shares its body and ports.
#[derive(Clone)]
pub struct Job {
    inner: Arc<JobInner>,
}

impl Job {
    /// Create a job with no ports. An empty name defaults to the body's type name.
    pub fn new<B: JobBody>(name: impl Into<String>, body: B) -> Self {
        Self::from_concept(
            resolve_name::<B>(name.into()),
            Varying::empty(),
            Varying::empty(),
            Box::new(Model { body }),
        )
    }

    /// Create a job owning a default-initialized output port
    pub fn with_output<B: OutputJobBody>(name: impl Into<String>, body: B) -> Self {
        let output = Varying::new(B::Output::default());
        Self::from_concept(
            resolve_name::<B>(name.into()),
            Varying::empty(),
            output.clone(),
            Box::new(ModelO { body, output }),
        )
    }

    /// Create a job reading `input`, usually another job's output
    pub fn with_input<B: InputJobBody>(
        name: impl Into<String>,
        body: B,
        input: &Varying,
    ) -> TaskResult<Self> {
        let name = resolve_name::<B>(name.into());
        check_input::<B::Input>(&name, input)?;
        Ok(Self::from_concept(
            name,
            input.clone(),
            Varying::empty(),
            Box::new(ModelI {
                body,
                input: input.clone(),
            }),
        ))
    }

    /// Create a job reading `input` and owning a default-initialized output port
    pub fn with_input_output<B: InputOutputJobBody>(
        name: impl Into<String>,
        body: B,
        input: &Varying,
    ) -> TaskResult<Self> {
        Self::with_input_output_initial(name, body, input, B::Output::default())
    }

    /// Like [`Job::with_input_output`], starting the output port at `output`
    pub fn with_input_output_initial<B: InputOutputJobBody>(
        name: impl Into<String>,
        body: B,
        input: &Varying,
        output: B::Output,
    ) -> TaskResult<Self> {
        let name = resolve_name::<B>(name.into());
        check_input::<B::Input>(&name, input)?;
        let output = Varying::new(output);
        Ok(Self::from_concept(
            name,
            input.clone(),
            output.clone(),
            Box::new(ModelIO {
                body,
                input: input.clone(),
                output,
            }),
        ))
    }

    fn from_concept(
        name: String,
        input: Varying,
        output: Varying,
        concept: Box<dyn JobConcept>,
    ) -> Self {
        let inner = Arc::new(JobInner {
            name,
            input,
            output,
            concept: Mutex::new(concept),
        });
        inner.input.add_consumer(&inner);
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The input port, empty if the job has none
    pub fn input(&self) -> Varying {
        self.inner.input.clone()
    }

    /// The output port, empty if the job has none
    pub fn output(&self) -> Varying {
        self.inner.output.clone()
    }

    pub fn has_input(&self) -> bool {
        !self.inner.input.is_empty()
    }

    pub fn has_output(&self) -> bool {
        !self.inner.output.is_empty()
    }

    /// Run the body once against the frame contexts
    pub fn run(&self, scene: &SceneContext, render: &mut RenderContext) {
        self.inner.concept.lock().run(scene, render);
    }

    /// Whether both handles refer to the same job
    pub fn ptr_eq(&self, other: &Job) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.inner.name)
            .field("input", &self.inner.input)
            .field("output", &self.inner.output)
            .finish()
    }
}

fn resolve_name<B>(name: String) -> String {
    if !name.is_empty() {
        return name;
    }
    let full = std::any::type_name::<B>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn check_input<I: Any>(job: &str, input: &Varying) -> TaskResult<()> {
    match input.type_name() {
        None => Err(TaskError::EmptyInput {
            job: job.to_string(),
        }),
        Some(_) if input.is::<I>() => Ok(()),
        Some(found) => Err(TaskError::TypeMismatch {
            job: job.to_string(),
            expected: std::any::type_name::<I>(),
            found,
        }),
    }
}
