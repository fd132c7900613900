use std::fmt;

use turnstile_core::{Context, StepError, ValidationOutcome, ValidationStep};

/// An ordered list of steps run one after another until the first rejection.
///
/// The chain is immutable once built and keeps no state between runs, so one
/// instance can serve any number of concurrent login attempts.
pub struct ValidationChain {
    steps: Vec<Box<dyn ValidationStep>>,
}

impl ValidationChain {
    pub fn new(steps: Vec<Box<dyn ValidationStep>>) -> Self {
        Self { steps }
    }

    /// A chain with no steps. Running it accepts whatever it is given.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Walks the steps in order, merging each step's additions into the context
    /// handed to the next one.
    ///
    /// Stops at the first rejection, which becomes the chain's outcome. A step error
    /// aborts the walk and is returned as is.
    #[tracing::instrument(name = "ValidationChain::run", skip_all, fields(steps = self.steps.len()))]
    pub async fn run(&self, context: Context) -> Result<ValidationOutcome, StepError> {
        let mut context = context;

        for step in &self.steps {
            match step.check(&context).await? {
                ValidationOutcome::Accepted(additions) => {
                    tracing::debug!(step = step.name(), "Validation step passed");
                    context = context.merge(additions);
                }
                ValidationOutcome::Rejected(rejection) => {
                    tracing::info!(step = step.name(), reason = %rejection, "Validation step rejected attempt");
                    return Ok(ValidationOutcome::Rejected(rejection));
                }
            }
        }

        Ok(ValidationOutcome::Accepted(context))
    }
}

impl fmt::Debug for ValidationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationChain")
            .field("steps", &self.step_names())
            .finish()
    }
}
