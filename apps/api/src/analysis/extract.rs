//! Text extraction — pluggable, trait-based extractor for uploaded decks.
//!
//! Default: `PdfTextExtractor` over pdf-extract. Extraction is CPU-bound and
//! runs inside `tokio::task::spawn_blocking`.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so tests can substitute a
//! fixture extractor.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: Bytes) -> Result<String, AppError>;
}

/// Best-effort PDF text extraction. Decks that are pure imagery come back
/// empty and are rejected before any provider call is spent on them.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, file: Bytes) -> Result<String, AppError> {
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&file))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))?
            .map_err(|e| AppError::Validation(format!("Could not read the PDF: {e}")))?;

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "The PDF contains no extractable text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Fixture extractor returning canned deck text, for handler and
    /// pipeline tests that must not touch a real PDF.
    pub struct FixtureExtractor(pub &'static str);

    #[async_trait]
    impl TextExtractor for FixtureExtractor {
        async fn extract(&self, _file: Bytes) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::FixtureExtractor;
    use super::*;
    use std::sync::Arc;

    const SAMPLE_DECK_TEXT: &str = "\
        Startup Name: TechCorp\n\
        Problem: Small businesses struggle with inventory management\n\
        Solution: AI-powered inventory optimization platform\n\
        Market: $50B inventory management market\n\
        Traction: 100 customers, $50K MRR";

    #[tokio::test]
    async fn test_fixture_extractor_through_trait_object() {
        let extractor: Arc<dyn TextExtractor> = Arc::new(FixtureExtractor(SAMPLE_DECK_TEXT));
        let text = extractor.extract(Bytes::from_static(b"%PDF-")).await.unwrap();
        assert!(text.contains("inventory management"));
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_garbage_bytes() {
        let extractor = PdfTextExtractor;
        let result = extractor.extract(Bytes::from_static(b"not a pdf")).await;
        assert!(result.is_err());
    }
}
