use thiserror::Error;

/// Column headers of the collected table, in output order
pub const FIELD_NAMES: [&str; 5] = ["Names", "Prices", "Descriptions", "Ratings", "Reviews"];

/// One listing card, with every field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Product name
    pub name: String,

    /// Price as shown on the page (currency symbol included)
    pub price: String,

    /// Short product description
    pub description: String,

    /// Star rating taken from the `data-rating` attribute
    pub rating: String,

    /// Number of reviews with the " reviews" suffix removed
    pub review_count: String,
}

/// Field values as pulled from the markup, before the presence check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
}

/// A card was dropped because one or more fields were empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required information: {}", missing.join(", "))]
pub struct IncompleteRecord {
    /// Names of the fields that were absent or blank
    pub missing: Vec<&'static str>,
}

impl ItemRecord {
    /// Accepts the raw fields only if all five are non-blank.
    ///
    /// This is the whole drop policy: a card either becomes a full record or
    /// nothing at all.
    pub fn from_raw(raw: RawItem) -> Result<Self, IncompleteRecord> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, field: &'static str| match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(field);
                String::new()
            }
        };

        let name = take(raw.name, "name");
        let price = take(raw.price, "price");
        let description = take(raw.description, "description");
        let rating = take(raw.rating, "rating");
        let review_count = take(raw.review_count, "review count");

        if !missing.is_empty() {
            return Err(IncompleteRecord { missing });
        }

        Ok(Self {
            name,
            price,
            description,
            rating,
            review_count,
        })
    }
}

/// Accumulates records as five parallel columns.
///
/// Rows are only ever appended whole, so the columns always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    names: Vec<String>,
    prices: Vec<String>,
    descriptions: Vec<String>,
    ratings: Vec<String>,
    reviews: Vec<String>,
}

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record across all five columns
    pub fn push(&mut self, record: ItemRecord) {
        self.names.push(record.name);
        self.prices.push(record.price);
        self.descriptions.push(record.description);
        self.ratings.push(record.rating);
        self.reviews.push(record.review_count);
    }

    /// Number of collected rows
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Field name to column mapping, in the fixed header order
    pub fn assemble(&self) -> [(&'static str, &[String]); 5] {
        [
            (FIELD_NAMES[0], self.names.as_slice()),
            (FIELD_NAMES[1], self.prices.as_slice()),
            (FIELD_NAMES[2], self.descriptions.as_slice()),
            (FIELD_NAMES[3], self.ratings.as_slice()),
            (FIELD_NAMES[4], self.reviews.as_slice()),
        ]
    }

    /// Rebuild the rows in collection order
    #[cfg(test)]
    pub fn records(&self) -> impl Iterator<Item = ItemRecord> + '_ {
        (0..self.len()).map(move |i| ItemRecord {
            name: self.names[i].clone(),
            price: self.prices[i].clone(),
            description: self.descriptions[i].clone(),
            rating: self.ratings[i].clone(),
            review_count: self.reviews[i].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, price: &str, description: &str, rating: &str, reviews: &str) -> RawItem {
        RawItem {
            name: Some(name.to_string()),
            price: Some(price.to_string()),
            description: Some(description.to_string()),
            rating: Some(rating.to_string()),
            review_count: Some(reviews.to_string()),
        }
    }

    #[test]
    fn test_from_raw_accepts_complete_fields() {
        let record = ItemRecord::from_raw(raw("Asus", "$295.99", "Fast", "3", "14")).unwrap();
        assert_eq!(record.name, "Asus");
        assert_eq!(record.review_count, "14");
    }

    #[test]
    fn test_from_raw_rejects_blank_and_absent_fields() {
        let mut item = raw("Asus", "  ", "Fast", "3", "14");
        item.rating = None;

        let err = ItemRecord::from_raw(item).unwrap_err();
        assert_eq!(err.missing, vec!["price", "rating"]);
        assert_eq!(
            err.to_string(),
            "missing required information: price, rating"
        );
    }

    #[test]
    fn test_from_raw_rejects_all_missing() {
        let err = ItemRecord::from_raw(RawItem::default()).unwrap_err();
        assert_eq!(err.missing.len(), 5);
    }

    #[test]
    fn test_collected_keeps_columns_aligned() {
        let mut collected = Collected::new();
        assert!(collected.is_empty());

        collected.push(ItemRecord::from_raw(raw("A", "$1", "a", "1", "2")).unwrap());
        collected.push(ItemRecord::from_raw(raw("B", "$2", "b", "4", "7")).unwrap());

        let columns = collected.assemble();
        let keys: Vec<&str> = columns.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, FIELD_NAMES);
        assert!(columns.iter().all(|(_, col)| col.len() == 2));
        assert_eq!(columns[1].1, ["$1".to_string(), "$2".to_string()]);
        assert_eq!(columns[4].1, ["2".to_string(), "7".to_string()]);
    }

    #[test]
    fn test_records_round_trip_rows() {
        let first = ItemRecord::from_raw(raw("A", "$1", "a", "1", "2")).unwrap();
        let second = ItemRecord::from_raw(raw("B", "$2", "b", "4", "7")).unwrap();

        let mut collected = Collected::new();
        collected.push(first.clone());
        collected.push(second.clone());

        let rows: Vec<ItemRecord> = collected.records().collect();
        assert_eq!(rows, vec![first, second]);
    }
}
