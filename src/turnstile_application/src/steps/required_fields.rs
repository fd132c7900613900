use turnstile_core::{
    Context, EMAIL_KEY, PASSWORD_KEY, Rejection, StepError, ValidationOutcome, ValidationStep,
};

/// Rejects the attempt unless every configured field is present and non-empty.
///
/// Fields are checked in configured order and the first gap is reported.
#[derive(Debug, Clone)]
pub struct RequiredFieldsStep {
    fields: Vec<String>,
}

impl RequiredFieldsStep {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for RequiredFieldsStep {
    fn default() -> Self {
        Self::new([EMAIL_KEY, PASSWORD_KEY])
    }
}

#[async_trait::async_trait]
impl ValidationStep for RequiredFieldsStep {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let missing = self.fields.iter().find(|field| !context.is_present(field));

        Ok(match missing {
            Some(field) => ValidationOutcome::reject(Rejection::MissingField(field.clone())),
            None => ValidationOutcome::pass(),
        })
    }
}
