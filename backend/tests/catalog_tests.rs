//! Catalog model tests
//!
//! Tests for product presentation logic including:
//! - Stock status buckets and low-stock detection
//! - Main image selection
//! - Category display paths

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    category_path, main_image, would_create_cycle, Product, ProductImage, StockStatus,
    MAX_IMAGES_PER_PRODUCT,
};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

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

fn image(is_main: bool, position: i32) -> ProductImage {
    ProductImage {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        image_url: format!("products/img-{position}.jpg"),
        alt_text: None,
        is_main,
        position,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Zero stock is out of stock regardless of the threshold
    #[test]
    fn test_stock_status_out_of_stock() {
        assert_eq!(product(0, 0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product(0, 5).stock_status(), StockStatus::OutOfStock);
    }

    /// At or below the minimum level is low stock
    #[test]
    fn test_stock_status_low() {
        assert_eq!(product(3, 3).stock_status(), StockStatus::LowStock);
        assert_eq!(product(1, 3).stock_status(), StockStatus::LowStock);
    }

    /// Above the minimum level is available
    #[test]
    fn test_stock_status_available() {
        assert_eq!(product(4, 3).stock_status(), StockStatus::Available);
        assert!(!product(4, 3).is_low_stock());
    }

    /// Gross price derives from the net price and VAT rate
    #[test]
    fn test_product_gross_price() {
        let p = product(1, 0);
        assert_eq!(p.gross_price(), Decimal::from_str("127.00").unwrap());
    }

    /// The flagged image wins even when it sorts last
    #[test]
    fn test_main_image_flag_wins() {
        let images = vec![image(false, 0), image(false, 1), image(true, 4)];
        assert_eq!(main_image(&images).unwrap().position, 4);
    }

    /// With no flag, lowest position comes first
    #[test]
    fn test_main_image_position_fallback() {
        let images = vec![image(false, 3), image(false, 1), image(false, 2)];
        assert_eq!(main_image(&images).unwrap().position, 1);
    }

    /// Ties on position break by creation time
    #[test]
    fn test_main_image_created_at_tiebreak() {
        let older = ProductImage {
            created_at: Utc::now() - Duration::hours(1),
            ..image(false, 0)
        };
        let older_id = older.id;
        let images = vec![image(false, 0), older];
        assert_eq!(main_image(&images).unwrap().id, older_id);
    }

    /// No images means no main image
    #[test]
    fn test_main_image_none() {
        assert!(main_image(&[]).is_none());
    }

    /// The image cap products are held to
    #[test]
    fn test_image_limit() {
        assert_eq!(MAX_IMAGES_PER_PRODUCT, 5);
    }

    /// Re-parenting under a descendant is rejected, sideways moves pass
    #[test]
    fn test_cycle_guard_on_reparenting() {
        // root -> mid -> leaf, plus an unrelated node.
        let (root, mid, leaf, other) =
            (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let parents: HashMap<Uuid, Option<Uuid>> = [
            (root, None),
            (mid, Some(root)),
            (leaf, Some(mid)),
            (other, None),
        ]
        .into_iter()
        .collect();

        assert!(would_create_cycle(root, leaf, &parents));
        assert!(would_create_cycle(root, root, &parents));
        assert!(would_create_cycle(mid, leaf, &parents));
        assert!(!would_create_cycle(leaf, other, &parents));
        assert!(!would_create_cycle(other, leaf, &parents));
    }

    /// Category paths join root-first with a separator
    #[test]
    fn test_category_path_display() {
        let names: Vec<String> = ["Furniture", "Chairs", "Office chairs"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(category_path(&names), "Furniture > Chairs > Office chairs");
        assert_eq!(category_path(&names[..1]), "Furniture");
        assert_eq!(category_path(&[]), "");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Exactly one of the three stock buckets applies
        #[test]
        fn prop_stock_status_total(
            stock in 0i32..10_000,
            min_level in 0i32..10_000
        ) {
            let status = product(stock, min_level).stock_status();
            match status {
                StockStatus::OutOfStock => prop_assert_eq!(stock, 0),
                StockStatus::LowStock => {
                    prop_assert!(stock > 0 && stock <= min_level);
                }
                StockStatus::Available => prop_assert!(stock > min_level),
            }
        }

        /// Whenever a flagged image exists, it is selected
        #[test]
        fn prop_main_image_respects_flag(
            positions in prop::collection::vec(0i32..100, 1..6),
            flagged_idx in 0usize..6
        ) {
            let mut images: Vec<ProductImage> =
                positions.iter().map(|&p| image(false, p)).collect();
            let idx = flagged_idx % images.len();
            images[idx].is_main = true;
            let flagged_id = images[idx].id;

            prop_assert_eq!(main_image(&images).unwrap().id, flagged_id);
        }

        /// Without a flag, selection picks a minimal position
        #[test]
        fn prop_main_image_min_position(
            positions in prop::collection::vec(0i32..100, 1..6)
        ) {
            let images: Vec<ProductImage> =
                positions.iter().map(|&p| image(false, p)).collect();
            let min_position = *positions.iter().min().unwrap();

            prop_assert_eq!(main_image(&images).unwrap().position, min_position);
        }

        /// The path contains every segment in order
        #[test]
        fn prop_category_path_preserves_order(
            names in prop::collection::vec("[A-Za-z]{1,12}", 1..5)
        ) {
            let path = category_path(&names);
            let parts: Vec<&str> = path.split(" > ").collect();
            prop_assert_eq!(parts.len(), names.len());
            for (part, name) in parts.iter().zip(names.iter()) {
                prop_assert_eq!(*part, name.as_str());
            }
        }
    }
}
