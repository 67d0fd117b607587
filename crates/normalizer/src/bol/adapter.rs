//! Adapter for raw Bol.com catalog products.

use marketplaces::bol::MARKETPLACE;
use marketplaces::RawProduct;

use crate::price::coerce_price;
use crate::schema::Product;
use crate::traits::ProductAdapter;
use crate::value::{f64_at, id_at, opt_string_at, string_at, u64_at};

/// Normalizes Bol catalog products.
///
/// Bol keeps records mostly flat but delivers prices as localized
/// strings inside `offerData`, ids as numbers or strings, and the
/// product link inside a keyed `urls` array.
#[derive(Debug, Default, Clone, Copy)]
pub struct BolAdapter;

impl ProductAdapter for BolAdapter {
    fn marketplace(&self) -> &'static str {
        MARKETPLACE
    }

    fn normalize(&self, raw: &RawProduct) -> Option<Product> {
        let title = raw["title"].as_str().map(str::trim).filter(|t| !t.is_empty())?;

        Some(Product {
            id: id_at(raw, "/id"),
            marketplace: MARKETPLACE.to_string(),
            title: title.to_string(),
            price: coerce_price(raw.pointer("/offerData/offers/0/price")),
            image_url: string_at(raw, "/images/0/url"),
            product_url: desktop_url(raw),
            rating: f64_at(raw, "/rating"),
            review_count: u64_at(raw, "/reviewCount"),
            category: opt_string_at(raw, "/categories/0/name"),
        })
    }
}

/// Picks the `DESKTOP` entry from the `urls` array, falling back to the
/// first entry of any kind.
fn desktop_url(raw: &RawProduct) -> String {
    let Some(urls) = raw["urls"].as_array() else {
        return String::new();
    };
    urls.iter()
        .find(|u| u["key"] == "DESKTOP")
        .or_else(|| urls.first())
        .and_then(|u| u["value"].as_str())
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_product() -> RawProduct {
        serde_json::from_str(
            r#"{
                "id": 9200000123456,
                "title": "LEGO Star Wars Millennium Falcon 75375",
                "offerData": {"offers": [{"price": "149,99"}]},
                "images": [{"url": "https://media.bol.com/falcon/550x550.jpg"}],
                "urls": [
                    {"key": "MOBILE", "value": "https://m.bol.com/p/9200000123456"},
                    {"key": "DESKTOP", "value": "https://www.bol.com/nl/p/9200000123456"}
                ],
                "rating": 4.6,
                "reviewCount": 87,
                "categories": [{"name": "Speelgoed"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_full_product() {
        let product = BolAdapter.normalize(&full_product()).unwrap();

        assert_eq!(product.id, "9200000123456");
        assert_eq!(product.marketplace, "bol");
        assert_eq!(product.title, "LEGO Star Wars Millennium Falcon 75375");
        assert_eq!(product.price, 149.99);
        assert_eq!(product.image_url, "https://media.bol.com/falcon/550x550.jpg");
        assert_eq!(product.product_url, "https://www.bol.com/nl/p/9200000123456");
        assert_eq!(product.rating, Some(4.6));
        assert_eq!(product.review_count, Some(87));
        assert_eq!(product.category.as_deref(), Some("Speelgoed"));
    }

    #[test]
    fn test_normalize_numeric_price() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"id": "1", "title": "LEGO City", "offerData": {"offers": [{"price": 24.99}]}}"#,
        )
        .unwrap();

        let product = BolAdapter.normalize(&raw).unwrap();
        assert_eq!(product.price, 24.99);
    }

    #[test]
    fn test_normalize_minimal_product() {
        let raw: RawProduct = serde_json::from_str(r#"{"title": "LEGO City"}"#).unwrap();

        let product = BolAdapter.normalize(&raw).unwrap();
        assert_eq!(product.id, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.product_url, "");
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_normalize_rejects_missing_title() {
        let raw: RawProduct = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(BolAdapter.normalize(&raw).is_none());

        let blank: RawProduct = serde_json::from_str(r#"{"id": 1, "title": ""}"#).unwrap();
        assert!(BolAdapter.normalize(&blank).is_none());
    }

    #[test]
    fn test_desktop_url_fallback() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"title": "LEGO City", "urls": [{"key": "MOBILE", "value": "https://m.bol.com/p/1"}]}"#,
        )
        .unwrap();

        let product = BolAdapter.normalize(&raw).unwrap();
        assert_eq!(product.product_url, "https://m.bol.com/p/1");
    }

    #[test]
    fn test_normalize_without_urls_array() {
        let raw: RawProduct = serde_json::from_str(r#"{"title": "LEGO City", "urls": []}"#).unwrap();
        assert_eq!(BolAdapter.normalize(&raw).unwrap().product_url, "");
    }
}
