use turnstile_core::ValidationStep;

use crate::chain::validation_chain::ValidationChain;

/// Assembles a [`ValidationChain`] one step at a time, in execution order.
#[derive(Default)]
pub struct ChainBuilder {
    steps: Vec<Box<dyn ValidationStep>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `step` to the end of the chain.
    pub fn add<S>(mut self, step: S) -> Self
    where
        S: ValidationStep + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn add_boxed(mut self, step: Box<dyn ValidationStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// A builder with nothing added yields an empty chain, which accepts everything.
    pub fn build(self) -> ValidationChain {
        ValidationChain::new(self.steps)
    }
}
