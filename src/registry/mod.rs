//! Link registry
//!
//! The registry is the only writer of link state. It validates requests,
//! allocates codes (caller-supplied or generated with a bounded number of
//! attempts), resolves codes for redirects and feeds the global counters.

pub mod error;
pub mod validation;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::codegen::CodeGenerator;
use crate::models::LinkRecord;
use crate::stats::StatsAggregator;
use crate::storage::{MemoryStorage, Storage, StorageError};

pub use error::{RegistryError, RegistryResult};
pub use validation::{
    validate_short_code, validate_url, CodeValidationError, UrlValidationError,
    MAX_SHORT_CODE_LENGTH, MAX_URL_LENGTH,
};

pub struct LinkRegistry {
    storage: Arc<dyn Storage>,
    stats: Arc<StatsAggregator>,
    generator: CodeGenerator,
}

impl LinkRegistry {
    pub fn new(
        storage: Arc<dyn Storage>,
        stats: Arc<StatsAggregator>,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            storage,
            stats,
            generator,
        }
    }

    /// Registry over a fresh in-memory store with its own counters
    pub fn in_memory(generator: CodeGenerator) -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(StatsAggregator::new()),
            generator,
        )
    }

    pub fn stats(&self) -> &Arc<StatsAggregator> {
        &self.stats
    }

    /// Create a link for `original_url`, under `requested_code` if given,
    /// otherwise under a generated code.
    pub async fn create(
        &self,
        original_url: &str,
        requested_code: Option<&str>,
    ) -> RegistryResult<LinkRecord> {
        validate_url(original_url)?;

        let record = match requested_code {
            Some(code) => self.insert_requested(original_url, code).await?,
            None => self.insert_generated(original_url).await?,
        };

        self.stats.record_link_created();
        info!(short_code = %record.short_code, "created short link");

        Ok(record)
    }

    async fn insert_requested(&self, original_url: &str, code: &str) -> RegistryResult<LinkRecord> {
        validate_short_code(code)?;

        match self.storage.insert(LinkRecord::new(code, original_url)).await {
            Ok(record) => Ok(record),
            Err(StorageError::Conflict) => Err(RegistryError::CodeTaken(code.to_string())),
            Err(StorageError::Other(e)) => Err(RegistryError::Storage(e)),
        }
    }

    async fn insert_generated(&self, original_url: &str) -> RegistryResult<LinkRecord> {
        let max_attempts = self.generator.max_attempts();

        for attempt in 0..max_attempts {
            let code = self.generator.candidate(original_url, attempt);
            match self.storage.insert(LinkRecord::new(code, original_url)).await {
                Ok(record) => return Ok(record),
                Err(StorageError::Conflict) => {
                    debug!(attempt, "generated short code collided, retrying");
                }
                Err(StorageError::Other(e)) => return Err(RegistryError::Storage(e)),
            }
        }

        warn!(
            attempts = max_attempts,
            "could not find a free short code within the attempt limit"
        );
        Err(RegistryError::GenerationExhausted {
            attempts: max_attempts,
        })
    }

    /// Count one click on `short_code` and return the updated record
    pub async fn resolve(&self, short_code: &str) -> RegistryResult<LinkRecord> {
        match self.storage.increment_clicks(short_code).await? {
            Some(record) => {
                self.stats.record_click();
                debug!(short_code = %short_code, clicks = record.clicks, "resolved short link");
                Ok(record)
            }
            None => Err(RegistryError::NotFound(short_code.to_string())),
        }
    }

    /// Current record for `short_code`; never changes the click count
    pub async fn lookup(&self, short_code: &str) -> RegistryResult<LinkRecord> {
        self.storage
            .get(short_code)
            .await?
            .ok_or_else(|| RegistryError::NotFound(short_code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{CodeStrategy, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS};
    use std::collections::HashSet;

    fn registry() -> LinkRegistry {
        LinkRegistry::in_memory(CodeGenerator::default())
    }

    #[tokio::test]
    async fn test_custom_code_round_trip() {
        let registry = registry();

        let created = registry
            .create("https://example.com", Some("my-link"))
            .await
            .unwrap();
        assert_eq!(created.short_code, "my-link");
        assert_eq!(created.clicks, 0);

        let resolved = registry.resolve("my-link").await.unwrap();
        assert_eq!(resolved.original_url, "https://example.com");
        assert_eq!(resolved.clicks, 1);
        assert_eq!(resolved.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_custom_code_taken() {
        let registry = registry();

        registry
            .create("https://example.com/a", Some("dup"))
            .await
            .unwrap();
        let err = registry
            .create("https://example.com/b", Some("dup"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::CodeTaken(ref code) if code == "dup"));
        assert_eq!(
            registry.lookup("dup").await.unwrap().original_url,
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn test_invalid_custom_code() {
        let registry = registry();

        let err = registry
            .create("https://example.com", Some("bad code!"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidCode(CodeValidationError::InvalidCharacter { .. })
        ));

        let err = registry
            .create("https://example.com", Some(""))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCode(CodeValidationError::Empty)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_checked_before_code() {
        let registry = registry();

        let err = registry.create("not a url", Some("fine")).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidUrl(UrlValidationError::Malformed)));
        assert!(matches!(
            registry.lookup("fine").await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_url_without_authority_is_not_stored() {
        let registry = registry();

        let inputs = [
            "http:example.com",
            "https:/example.com",
            "https:\\\\example.com\\x",
            " https://example.com",
        ];
        for (i, url) in inputs.into_iter().enumerate() {
            let code = format!("c{i}");
            let err = registry.create(url, Some(code.as_str())).await.unwrap_err();
            assert!(matches!(err, RegistryError::InvalidUrl(_)), "{url:?} was accepted");
            assert!(matches!(
                registry.lookup(&code).await,
                Err(RegistryError::NotFound(_))
            ));
        }

        assert_eq!(registry.stats().snapshot().total_links_created, 0);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let registry = registry();
        let err = registry.resolve("nonexistent").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref code) if code == "nonexistent"));
        assert_eq!(registry.stats().snapshot().total_clicks, 0);
    }

    #[tokio::test]
    async fn test_generated_codes_are_unique() {
        let registry = registry();

        let mut codes = HashSet::new();
        for i in 0..500 {
            let record = registry
                .create(&format!("https://example.com/{i}"), None)
                .await
                .unwrap();
            assert_eq!(record.short_code.len(), DEFAULT_CODE_LENGTH);
            assert!(validate_short_code(&record.short_code).is_ok());
            assert!(codes.insert(record.short_code));
        }
    }

    #[tokio::test]
    async fn test_lookup_does_not_count_clicks() {
        let registry = registry();
        registry
            .create("https://example.com", Some("peek"))
            .await
            .unwrap();

        for _ in 0..10 {
            assert_eq!(registry.lookup("peek").await.unwrap().clicks, 0);
        }
        registry.resolve("peek").await.unwrap();
        registry.resolve("peek").await.unwrap();

        assert_eq!(registry.lookup("peek").await.unwrap().clicks, 2);
        assert_eq!(registry.stats().snapshot().total_clicks, 2);
    }

    #[tokio::test]
    async fn test_failed_creates_are_not_counted() {
        let registry = registry();

        registry.create("https://example.com", None).await.unwrap();
        registry
            .create("https://example.com", Some("taken"))
            .await
            .unwrap();
        let _ = registry.create("https://example.com", Some("taken")).await;
        let _ = registry.create("nope", None).await;
        let _ = registry.create("https://example.com", Some("no spaces")).await;

        assert_eq!(registry.stats().snapshot().total_links_created, 2);
    }

    #[tokio::test]
    async fn test_generation_exhausted() {
        // Single-character codes leave only 62 possibilities
        let registry = LinkRegistry::in_memory(CodeGenerator::new(CodeStrategy::Random, 1, 5));
        let alphabet = ('a'..='z').chain('A'..='Z').chain('0'..='9');
        for ch in alphabet {
            registry
                .create("https://example.com", Some(ch.to_string().as_str()))
                .await
                .unwrap();
        }

        let err = registry.create("https://example.com", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::GenerationExhausted { attempts: 5 }));
        assert_eq!(registry.stats().snapshot().total_links_created, 62);
    }

    #[tokio::test]
    async fn test_content_strategy_is_deterministic_then_retries() {
        let generator = CodeGenerator::new(CodeStrategy::Content, 6, DEFAULT_MAX_ATTEMPTS);
        let registry = LinkRegistry::in_memory(generator.clone());
        let url = "https://example.com/article";

        let first = registry.create(url, None).await.unwrap();
        assert_eq!(first.short_code, crate::codegen::generate_from_content(url));

        let second = registry.create(url, None).await.unwrap();
        assert_eq!(second.short_code, generator.candidate(url, 1));
        assert_ne!(first.short_code, second.short_code);
    }

    #[tokio::test]
    async fn test_content_strategy_exhausted() {
        let generator = CodeGenerator::new(CodeStrategy::Content, 6, 3);
        let registry = LinkRegistry::in_memory(generator.clone());
        let url = "https://example.com/popular";

        for attempt in 0..3 {
            registry
                .create("https://example.com/other", Some(generator.candidate(url, attempt).as_str()))
                .await
                .unwrap();
        }

        let err = registry.create(url, None).await.unwrap_err();
        assert!(matches!(err, RegistryError::GenerationExhausted { attempts: 3 }));
    }
}
