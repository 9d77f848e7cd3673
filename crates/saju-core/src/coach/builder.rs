//! Builder for creating and configuring Coach instances.

use std::{fmt, sync::Arc, time::Duration};

use super::Coach;
use crate::{
    config::CoachConfig,
    error::Result,
    llm::{GeminiClient, TextGenerator},
};

/// Builder for creating and configuring Coach instances.
#[derive(Clone, Default)]
pub struct CoachBuilder {
    config: CoachConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl CoachBuilder {
    /// Creates a new builder with default settings and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already loaded configuration.
    pub fn from_config(config: CoachConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Sets the API key. `None` keeps the current value.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: Option<S>) -> Self {
        if let Some(key) = api_key {
            self.config.api_key = Some(key.into());
        }
        self
    }

    /// Sets the model name. `None` keeps the current value.
    pub fn with_model<S: Into<String>>(mut self, model: Option<S>) -> Self {
        if let Some(model) = model {
            self.config.model = model.into();
        }
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.config.api_base = api_base.into();
        self
    }

    /// Overall timeout of a single generation request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Uses `generator` instead of the Gemini client. The HTTP settings are
    /// ignored when a generator is supplied.
    pub fn with_generator<G: TextGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Builds the configured coach.
    ///
    /// A missing API key is not an error here; every generation call reports
    /// it instead.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Http` if the HTTP client cannot be constructed
    pub fn build(self) -> Result<Coach> {
        let generator = match self.generator {
            Some(generator) => generator,
            None => Arc::new(GeminiClient::new(
                self.config.api_key,
                self.config.model,
                self.config.api_base,
                self.config.timeout,
            )?),
        };
        Ok(Coach::new(generator))
    }
}

impl fmt::Debug for CoachBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoachBuilder")
            .field("model", &self.config.model)
            .field("api_base", &self.config.api_base)
            .field("timeout", &self.config.timeout)
            .field("custom_generator", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}
