//! Catalog models: categories, suppliers, products and product images

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::pricing;

/// Maximum number of images a product may carry.
pub const MAX_IMAGES_PER_PRODUCT: usize = 5;

/// A product category with hierarchical structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Join a root-first chain of category names into a display path.
pub fn category_path(names: &[String]) -> String {
    names.join(" > ")
}

/// Whether re-parenting `category_id` under `parent_id` would close a loop
/// in the tree, i.e. whether `category_id` is `parent_id` itself or one of
/// its ancestors.
///
/// `parents` maps every category to its current parent. A walk that runs
/// longer than the map itself means the stored tree already loops; that
/// counts as a cycle too.
pub fn would_create_cycle(
    category_id: Uuid,
    parent_id: Uuid,
    parents: &HashMap<Uuid, Option<Uuid>>,
) -> bool {
    let mut current = Some(parent_id);
    let mut hops = 0;

    while let Some(id) = current {
        if id == category_id {
            return true;
        }
        hops += 1;
        if hops > parents.len() {
            return true;
        }
        current = parents.get(&id).copied().flatten();
    }

    false
}

/// A product supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog product with inventory tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub ean13: Option<String>,
    pub net_price: Decimal,
    pub vat_rate: Decimal,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Gross (brutto) price derived from net price and VAT rate.
    pub fn gross_price(&self) -> Decimal {
        pricing::gross_from_net(self.net_price, self.vat_rate)
    }

    /// Whether the product is at or below its minimum stock level.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    /// Stock status for display purposes.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_quantity == 0 {
            StockStatus::OutOfStock
        } else if self.is_low_stock() {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}

/// Stock availability buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Available,
}

/// An image attached to a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub is_main: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Select the main image among a product's images.
///
/// The explicitly flagged image wins; with no flag, the first image by
/// (position, created_at) stands in for display purposes.
pub fn main_image(images: &[ProductImage]) -> Option<&ProductImage> {
    if let Some(flagged) = images.iter().find(|i| i.is_main) {
        return Some(flagged);
    }
    images
        .iter()
        .min_by_key(|i| (i.position, i.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(stock: i32, min_level: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Test product".to_string(),
            description: None,
            sku: "PRD-001".to_string(),
            ean13: None,
            net_price: Decimal::from_str("100.00").unwrap(),
            vat_rate: Decimal::from_str("27.00").unwrap(),
            category_id: None,
            supplier_id: None,
            stock_quantity: stock,
            min_stock_level: min_level,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn image(product_id: Uuid, is_main: bool, position: i32) -> ProductImage {
        ProductImage {
            id: Uuid::new_v4(),
            product_id,
            image_url: format!("products/img-{}.jpg", position),
            alt_text: None,
            is_main,
            position,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_gross_price() {
        let p = product(10, 2);
        assert_eq!(p.gross_price(), Decimal::from_str("127.00").unwrap());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(product(0, 2).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product(2, 2).stock_status(), StockStatus::LowStock);
        assert_eq!(product(1, 2).stock_status(), StockStatus::LowStock);
        assert_eq!(product(3, 2).stock_status(), StockStatus::Available);
    }

    #[test]
    fn test_main_image_prefers_flag() {
        let pid = Uuid::new_v4();
        let images = vec![image(pid, false, 0), image(pid, true, 3)];
        let main = main_image(&images).unwrap();
        assert!(main.is_main);
        assert_eq!(main.position, 3);
    }

    #[test]
    fn test_main_image_falls_back_to_order() {
        let pid = Uuid::new_v4();
        let images = vec![image(pid, false, 2), image(pid, false, 1)];
        assert_eq!(main_image(&images).unwrap().position, 1);
    }

    #[test]
    fn test_main_image_empty() {
        assert!(main_image(&[]).is_none());
    }

    fn parents(edges: &[(Uuid, Option<Uuid>)]) -> HashMap<Uuid, Option<Uuid>> {
        edges.iter().copied().collect()
    }

    #[test]
    fn test_cycle_guard_rejects_self_parent() {
        let a = Uuid::new_v4();
        assert!(would_create_cycle(a, a, &parents(&[(a, None)])));
    }

    #[test]
    fn test_cycle_guard_rejects_descendant_parent() {
        // a -> b -> c; re-parenting a under c would loop.
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let map = parents(&[(a, None), (b, Some(a)), (c, Some(b))]);
        assert!(would_create_cycle(a, c, &map));
        assert!(would_create_cycle(a, b, &map));
    }

    #[test]
    fn test_cycle_guard_allows_sibling_and_unrelated_parents() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let map = parents(&[(a, None), (b, Some(a)), (c, None)]);
        assert!(!would_create_cycle(b, c, &map));
        assert!(!would_create_cycle(c, a, &map));
    }

    #[test]
    fn test_cycle_guard_terminates_on_corrupt_loop() {
        // b and c already point at each other; the walk must not spin.
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let map = parents(&[(a, None), (b, Some(c)), (c, Some(b))]);
        assert!(would_create_cycle(a, b, &map));
    }

    #[test]
    fn test_category_path() {
        let names = vec![
            "Electronics".to_string(),
            "Computers".to_string(),
            "Laptops".to_string(),
        ];
        assert_eq!(category_path(&names), "Electronics > Computers > Laptops");
        assert_eq!(category_path(&names[..1]), "Electronics");
    }
}
