//! Catalog product record.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product as returned by the lookup service.
///
/// Only `id` matters to cart logic. Every other field (title, price, image
/// and whatever else the catalog sends) is kept as the raw JSON value and
/// written back unchanged, so a cart line carries the record exactly as it
/// was fetched. The accessors read display values out of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// All other catalog fields, verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Create a product with a title and price and no other fields.
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(title.into()));
        fields.insert("price".into(), price.to_json());
        Self { id, fields }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.fields.insert("image".into(), Value::String(image.into()));
        self
    }

    /// Display title, empty when absent or not a string.
    pub fn title(&self) -> &str {
        self.str_field("title")
    }

    /// Image URL, empty when absent or not a string.
    pub fn image(&self) -> &str {
        self.str_field("image")
    }

    /// Unit price, when the record carries a numeric one.
    pub fn price(&self) -> Option<Price> {
        self.fields
            .get("price")
            .and_then(|v| Price::deserialize(v).ok())
    }

    fn str_field(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_catalog_record() {
        let raw = json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg"
        });
        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title(), "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price(), Some(Price::from_cents(17990)));
        assert_eq!(product.image(), "https://example.com/shoe.jpg");
    }

    #[test]
    fn test_fields_survive_round_trip() {
        let raw = json!({
            "id": 2,
            "title": "Tênis VR Caminhada",
            "price": 139.9,
            "image": "",
            "brand": "Rocket",
            "sizes": [38, 39, 40]
        });
        let product: Product = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(product.fields["brand"], "Rocket");
        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }

    #[test]
    fn test_odd_display_values_are_kept() {
        let blob = r#"{"id":3,"image":null,"price":10.005,"title":null}"#;
        let product: Product = serde_json::from_str(blob).unwrap();
        assert_eq!(product.title(), "");
        assert_eq!(product.image(), "");
        assert!(product.price().is_some());
        assert_eq!(serde_json::to_string(&product).unwrap(), blob);

        let blob = r#"{"id":4,"price":"12.50"}"#;
        let product: Product = serde_json::from_str(blob).unwrap();
        assert_eq!(product.price(), Some(Price::from_cents(1250)));
        assert_eq!(serde_json::to_string(&product).unwrap(), blob);
    }

    #[test]
    fn test_missing_display_fields() {
        let product: Product = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(product.title(), "");
        assert_eq!(product.price(), None);
        assert!(product.fields.is_empty());
    }

    #[test]
    fn test_non_numeric_price() {
        let product: Product =
            serde_json::from_value(json!({ "id": 5, "price": null })).unwrap();
        assert_eq!(product.price(), None);
        assert_eq!(product.fields["price"], Value::Null);
    }
}
