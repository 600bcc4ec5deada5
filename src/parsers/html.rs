use crate::parsers::{ItemExtractor, PageExtraction, ParseFailure};
use crate::results::RawItem;
use crate::utils::normalize_whitespace;
use scraper::{ElementRef, Html, Selector};

/// One product card in the listing grid
const CARD_SELECTOR: &str = "div.col-md-4.col-xl-4.col-lg-4";
const CAPTION_SELECTOR: &str = "div.caption";
const RATINGS_SELECTOR: &str = "div.ratings";

/// Literal suffix after the review count, e.g. "14 reviews"
const REVIEWS_SUFFIX: &str = " reviews";

/// Extractor for the webscraper.io e-commerce test site listing cards.
///
/// Card layout:
///
/// ```html
/// <div class="col-md-4 col-xl-4 col-lg-4">
///   <div class="caption">
///     <h4 class="price">$295.99</h4>
///     <h4><a class="title">Asus VivoBook X441NA</a></h4>
///     <p class="description">Asus VivoBook X441NA-GA190 ...</p>
///   </div>
///   <div class="ratings">
///     <p class="review-count">14 reviews</p>
///     <p data-rating="3">...</p>
///   </div>
/// </div>
/// ```
#[derive(Debug)]
pub struct ListingCardExtractor {
    card: Selector,
    caption: Selector,
    ratings: Selector,
    heading: Selector,
    paragraph: Selector,
}

impl Default for ListingCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingCardExtractor {
    pub fn new() -> Self {
        Self {
            card: Selector::parse(CARD_SELECTOR).expect("card selector is valid"),
            caption: Selector::parse(CAPTION_SELECTOR).expect("caption selector is valid"),
            ratings: Selector::parse(RATINGS_SELECTOR).expect("ratings selector is valid"),
            heading: Selector::parse("h4").expect("h4 selector is valid"),
            paragraph: Selector::parse("p").expect("p selector is valid"),
        }
    }

    /// Read the five raw fields of one card
    fn extract_card(&self, index: usize, card: ElementRef<'_>) -> Result<RawItem, ParseFailure> {
        let missing = |element: &'static str| ParseFailure::MissingElement {
            card: index,
            element,
        };

        let caption = card
            .select(&self.caption)
            .next()
            .ok_or_else(|| missing("caption block"))?;
        let price = caption
            .select(&self.heading)
            .next()
            .ok_or_else(|| missing("price heading"))?;
        let name = next_element_sibling(price).ok_or_else(|| missing("name after price heading"))?;
        let description = caption
            .select(&self.paragraph)
            .next()
            .ok_or_else(|| missing("description paragraph"))?;

        let ratings = card
            .select(&self.ratings)
            .next()
            .ok_or_else(|| missing("ratings block"))?;
        let reviews = ratings
            .select(&self.paragraph)
            .next()
            .ok_or_else(|| missing("review count paragraph"))?;
        let stars =
            next_element_sibling(reviews).ok_or_else(|| missing("rating after review count"))?;

        Ok(RawItem {
            name: Some(element_text(name)),
            price: Some(element_text(price)),
            description: Some(element_text(description)),
            rating: stars.value().attr("data-rating").map(normalize_whitespace),
            review_count: Some(strip_reviews_suffix(&element_text(reviews)).to_string()),
        })
    }
}

impl ItemExtractor for ListingCardExtractor {
    fn extract_page(&self, markup: &str) -> PageExtraction {
        let doc = Html::parse_document(markup);
        let mut extraction = PageExtraction::default();

        for (index, card) in doc.select(&self.card).enumerate() {
            match self.extract_card(index + 1, card) {
                Ok(item) => extraction.items.push(item),
                Err(failure) => {
                    extraction.failure = Some(failure);
                    break;
                }
            }
        }

        ::log::debug!("Listing extractor found {} cards", extraction.items.len());
        extraction
    }
}

/// First element that follows `element` under the same parent
fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// All descendant text of an element, whitespace-normalized
fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// "42 reviews" becomes "42"; text without the suffix is returned unchanged
pub fn strip_reviews_suffix(text: &str) -> &str {
    text.strip_suffix(REVIEWS_SUFFIX).unwrap_or(text)
}
