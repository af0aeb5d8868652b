//! Link creation, lookup and statistics.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{
    CodeGenerator, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH, RandomCodeGenerator,
};
use crate::utils::url_validator::validate_long_url;

/// Number of candidate codes tried before link creation gives up.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// A link together with its total click count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub link: Link,
    pub total_clicks: i64,
}

/// Service owning link creation and lookup.
///
/// Uniqueness of short codes is enforced here: each candidate is checked
/// against the link store before the link is persisted.
pub struct LinkService<L: LinkRepository, C: ClickRepository> {
    link_repository: Arc<L>,
    click_repository: Arc<C>,
    generator: Arc<dyn CodeGenerator>,
    code_length: usize,
    base_url: String,
}

impl<L: LinkRepository, C: ClickRepository> LinkService<L, C> {
    /// Creates a service generating random codes of [`DEFAULT_CODE_LENGTH`].
    pub fn new(link_repository: Arc<L>, click_repository: Arc<C>, base_url: String) -> Self {
        Self {
            link_repository,
            click_repository,
            generator: Arc::new(RandomCodeGenerator),
            code_length: DEFAULT_CODE_LENGTH,
            base_url,
        }
    }

    /// Replaces the code generator.
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the length of generated codes, clamped to
    /// [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        let clamped = code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        if clamped != code_length {
            warn!(
                requested = code_length,
                used = clamped,
                "Short code length out of range, clamping"
            );
        }
        self.code_length = clamped;
        self
    }

    /// Validates `long_url`, picks an unused short code and persists the link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute http(s) URI.
    /// Returns [`AppError::RandomSource`] if no code could be generated.
    /// Returns [`AppError::Store`] if a lookup or the insert fails.
    /// Returns [`AppError::CodeSpaceExhausted`] if every candidate collided.
    pub async fn create_link(&self, long_url: &str) -> Result<Link, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let short_code = self.generate_unique_code().await?;

        let link = self
            .link_repository
            .create(NewLink {
                short_code,
                long_url: long_url.to_string(),
            })
            .await
            .map_err(|e| e.context("creating link"))?;

        info!(code = %link.short_code, long_url = %link.long_url, "Short link created");

        Ok(link)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] unchanged when the code is unknown.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_by_short_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .get_by_short_code(code)
            .await
            .map_err(|e| e.context("fetching link"))
    }

    /// Retrieves a link and its total click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] unchanged when the code is unknown.
    /// Returns [`AppError::Store`] if the lookup or the count fails.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        let link = self.get_by_short_code(code).await?;

        let total_clicks = self
            .click_repository
            .count_by_link_id(link.id)
            .await
            .map_err(|e| e.context("counting clicks"))?;

        Ok(LinkStats { link, total_clicks })
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository
            .count()
            .await
            .map_err(|e| e.context("counting links"))
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Draws candidates until one is not present in the store.
    ///
    /// A `NotFound` lookup means the candidate is free. Any other lookup error
    /// aborts immediately without consuming the remaining attempts.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let candidate = self.generator.generate(self.code_length)?;

            match self.link_repository.get_by_short_code(&candidate).await {
                Err(e) if e.is_not_found() => return Ok(candidate),
                Err(e) => return Err(e.context("checking short code uniqueness")),
                Ok(_) => {
                    warn!(
                        code = %candidate,
                        attempt,
                        max_attempts = MAX_CODE_ATTEMPTS,
                        "Short code collision, retrying"
                    );
                }
            }
        }

        Err(AppError::CodeSpaceExhausted {
            context: "creating link".to_string(),
            attempts: MAX_CODE_ATTEMPTS,
        })
    }
}
