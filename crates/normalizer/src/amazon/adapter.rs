//! Adapter for raw Amazon search items.

use marketplaces::amazon::MARKETPLACE;
use marketplaces::RawProduct;

use crate::price::coerce_price;
use crate::schema::Product;
use crate::traits::ProductAdapter;
use crate::value::{f64_at, id_at, opt_string_at, string_at, u64_at};

/// Normalizes Amazon items.
///
/// Amazon nests everything: the title under `itemInfo`, the price under
/// the first offer listing, images under size variants. The numeric
/// `amount` is preferred; `displayAmount` (a formatted currency string)
/// is the fallback when a listing carries no plain number.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmazonAdapter;

impl ProductAdapter for AmazonAdapter {
    fn marketplace(&self) -> &'static str {
        MARKETPLACE
    }

    fn normalize(&self, raw: &RawProduct) -> Option<Product> {
        let title = raw
            .pointer("/itemInfo/title/displayValue")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())?;

        let price = raw
            .pointer("/offers/listings/0/price/amount")
            .or_else(|| raw.pointer("/offers/listings/0/price/displayAmount"));

        Some(Product {
            id: id_at(raw, "/asin"),
            marketplace: MARKETPLACE.to_string(),
            title: title.to_string(),
            price: coerce_price(price),
            image_url: string_at(raw, "/images/primary/large/url"),
            product_url: string_at(raw, "/detailPageUrl"),
            rating: f64_at(raw, "/customerReviews/starRating"),
            review_count: u64_at(raw, "/customerReviews/count"),
            category: opt_string_at(raw, "/itemInfo/classifications/productGroup/displayValue"),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_item() -> RawProduct {
        serde_json::from_str(
            r#"{
                "asin": "B0ABC123",
                "detailPageUrl": "https://www.amazon.de/dp/B0ABC123?tag=tag-21",
                "itemInfo": {
                    "title": {"displayValue": "LEGO Star Wars Millennium Falcon 75375"},
                    "classifications": {"productGroup": {"displayValue": "Toy"}}
                },
                "images": {"primary": {"large": {"url": "https://m.media-amazon.com/images/I/falcon.jpg"}}},
                "offers": {"listings": [{"price": {"amount": 159.99, "displayAmount": "€159,99"}}]},
                "customerReviews": {"starRating": 4.8, "count": 1243}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_full_item() {
        let product = AmazonAdapter.normalize(&full_item()).unwrap();

        assert_eq!(product.id, "B0ABC123");
        assert_eq!(product.marketplace, "amazon");
        assert_eq!(product.title, "LEGO Star Wars Millennium Falcon 75375");
        assert_eq!(product.price, 159.99);
        assert_eq!(
            product.image_url,
            "https://m.media-amazon.com/images/I/falcon.jpg"
        );
        assert_eq!(
            product.product_url,
            "https://www.amazon.de/dp/B0ABC123?tag=tag-21"
        );
        assert_eq!(product.rating, Some(4.8));
        assert_eq!(product.review_count, Some(1243));
        assert_eq!(product.category.as_deref(), Some("Toy"));
    }

    #[test]
    fn test_normalize_falls_back_to_display_amount() {
        let raw: RawProduct = serde_json::from_str(
            r#"{
                "asin": "B0DEF456",
                "itemInfo": {"title": {"displayValue": "LEGO City Fire Truck"}},
                "offers": {"listings": [{"price": {"displayAmount": "€29,95"}}]}
            }"#,
        )
        .unwrap();

        let product = AmazonAdapter.normalize(&raw).unwrap();
        assert_eq!(product.price, 29.95);
    }

    #[test]
    fn test_normalize_minimal_item() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"itemInfo": {"title": {"displayValue": "LEGO Classic Box"}}}"#)
                .unwrap();

        let product = AmazonAdapter.normalize(&raw).unwrap();
        assert_eq!(product.id, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.image_url, "");
        assert_eq!(product.rating, None);
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_normalize_rejects_missing_title() {
        let raw: RawProduct = serde_json::from_str(r#"{"asin": "B0XYZ"}"#).unwrap();
        assert!(AmazonAdapter.normalize(&raw).is_none());
    }

    #[test]
    fn test_normalize_rejects_blank_title() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"itemInfo": {"title": {"displayValue": "   "}}}"#).unwrap();
        assert!(AmazonAdapter.normalize(&raw).is_none());
    }

    #[test]
    fn test_normalize_trims_title() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"itemInfo": {"title": {"displayValue": "  LEGO Classic Box  "}}}"#,
        )
        .unwrap();

        let product = AmazonAdapter.normalize(&raw).unwrap();
        assert_eq!(product.title, "LEGO Classic Box");
    }
}
