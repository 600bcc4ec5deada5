pub mod html;


pub use html::ListingCardExtractor;

use crate::results::{Collected, ItemRecord, RawItem};
use thiserror::Error;

/// Page markup did not have the structure the extractor expects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// `card` is the 1-based position of the card on its page
    #[error("card {card}: missing {element}")]
    MissingElement { card: usize, element: &'static str },
}

/// Raw fields pulled from one page.
///
/// Extraction stops at the first structurally broken card; `items` holds the
/// cards read before it and `failure` says why the rest were abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub items: Vec<RawItem>,
    pub failure: Option<ParseFailure>,
}

/// Strategy for pulling item fields out of one site's listing markup
pub trait ItemExtractor {
    fn extract_page(&self, markup: &str) -> PageExtraction;
}

/// Run the extractor over every page and append the complete records to `acc`.
///
/// Incomplete cards are logged and dropped. A parse failure only abandons the
/// remaining cards of its own page.
pub fn extract_all<E, S>(extractor: &E, pages: &[S], mut acc: Collected) -> Collected
where
    E: ItemExtractor,
    S: AsRef<str>,
{
    if pages.is_empty() {
        ::log::warn!("No HTML content available for parsing");
        return acc;
    }

    let before = acc.len();
    let mut dropped = 0;
    for (page_number, markup) in pages.iter().enumerate() {
        let extraction = extractor.extract_page(markup.as_ref());
        ::log::debug!(
            "Page {} yielded {} cards",
            page_number + 1,
            extraction.items.len()
        );

        for raw in extraction.items {
            match ItemRecord::from_raw(raw) {
                Ok(record) => acc.push(record),
                Err(e) => {
                    dropped += 1;
                    ::log::warn!("Error adding data: {}", e);
                }
            }
        }

        if let Some(failure) = extraction.failure {
            ::log::error!(
                "Error occurred while parsing page {}: {}",
                page_number + 1,
                failure
            );
        }
    }

    ::log::info!(
        "Extracted {} records from {} pages ({} dropped as incomplete)",
        acc.len() - before,
        pages.len(),
        dropped
    );
    acc
}
