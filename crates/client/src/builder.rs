//! Session builder with dependency injection pattern.

use anyhow::{Context, Result};
use arena_core::SeededRng;

use crate::{ClientConfig, Content, Session};

/// Builder for constructing a [`Session`].
///
/// Configuration is required. Content is optional: when it is not injected
/// it is loaded from `config.data_dir`, or the built-in tables are used.
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<ClientConfig>,
    content: Option<Content>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client configuration (required).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use already loaded content instead of reading `config.data_dir`.
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Build the Session.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is not set (required)
    /// - The content directory cannot be loaded
    pub fn build(self) -> Result<Session> {
        let config = self
            .config
            .context("Config is required. Use .config() to set it.")?;

        let content = match self.content {
            Some(content) => content,
            None => match &config.data_dir {
                Some(dir) => Content::load(dir)?,
                None => Content::builtin(),
            },
        };

        let rng = SeededRng::new(config.seed);
        Ok(Session {
            config,
            content,
            rng,
        })
    }
}
