//! Demo catalog data served by the storefront API.

use storefront_core::{DomainResult, ProductId};

use crate::catalog::Catalog;
use crate::product::{NewProduct, Price, Product};

struct Row {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: u64,
    category: &'static str,
    image_url: &'static str,
    in_stock: bool,
    rating: f64,
    review_count: u32,
}

const DEMO_ROWS: [Row; 12] = [
    Row {
        id: "1",
        name: "Wireless Bluetooth Headphones",
        description: "Premium quality wireless headphones with active noise cancellation, 30-hour battery life, and superior sound quality.",
        price_cents: 19999,
        category: "Electronics",
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
        in_stock: true,
        rating: 4.5,
        review_count: 234,
    },
    Row {
        id: "2",
        name: "Smart Watch Pro",
        description: "Advanced fitness tracking, heart rate monitoring, GPS, and smartphone integration in a sleek design.",
        price_cents: 34999,
        category: "Electronics",
        image_url: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
        in_stock: true,
        rating: 4.3,
        review_count: 189,
    },
    Row {
        id: "3",
        name: "Organic Cotton T-Shirt",
        description: "Comfortable and sustainable organic cotton t-shirt, perfect for everyday wear.",
        price_cents: 2999,
        category: "Clothing",
        image_url: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500",
        in_stock: false,
        rating: 4.7,
        review_count: 92,
    },
    Row {
        id: "4",
        name: "Stainless Steel Water Bottle",
        description: "Insulated water bottle that keeps drinks cold for 24 hours or hot for 12 hours.",
        price_cents: 2499,
        category: "Home & Kitchen",
        image_url: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=500",
        in_stock: true,
        rating: 4.6,
        review_count: 412,
    },
    Row {
        id: "5",
        name: "Yoga Mat Premium",
        description: "Non-slip, eco-friendly yoga mat with extra cushioning for comfortable practice.",
        price_cents: 4599,
        category: "Sports",
        image_url: "https://images.unsplash.com/photo-1601925260368-ae2f83cf8b7f?w=500",
        in_stock: true,
        rating: 4.4,
        review_count: 156,
    },
    Row {
        id: "6",
        name: "Portable Charger 20000mAh",
        description: "High-capacity power bank with fast charging and multiple USB ports.",
        price_cents: 5999,
        category: "Electronics",
        image_url: "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5?w=500",
        in_stock: true,
        rating: 4.2,
        review_count: 298,
    },
    Row {
        id: "7",
        name: "Running Shoes Elite",
        description: "Professional running shoes with advanced cushioning and breathable mesh upper.",
        price_cents: 12999,
        category: "Sports",
        image_url: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=500",
        in_stock: true,
        rating: 4.8,
        review_count: 523,
    },
    Row {
        id: "8",
        name: "Coffee Maker Deluxe",
        description: "Programmable coffee maker with thermal carafe and customizable brew strength.",
        price_cents: 8999,
        category: "Home & Kitchen",
        image_url: "https://images.unsplash.com/photo-1517668808822-9ebb02f2a0e6?w=500",
        in_stock: false,
        rating: 4.1,
        review_count: 167,
    },
    Row {
        id: "9",
        name: "Backpack Urban Explorer",
        description: "Durable and stylish backpack with laptop compartment and multiple pockets.",
        price_cents: 7999,
        category: "Accessories",
        image_url: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500",
        in_stock: true,
        rating: 4.5,
        review_count: 201,
    },
    Row {
        id: "10",
        name: "Wireless Keyboard and Mouse",
        description: "Ergonomic wireless keyboard and mouse combo with long battery life.",
        price_cents: 6999,
        category: "Electronics",
        image_url: "https://images.unsplash.com/photo-1587829741301-dc798b83add3?w=500",
        in_stock: true,
        rating: 4.3,
        review_count: 145,
    },
    Row {
        id: "11",
        name: "Sunglasses Polarized",
        description: "UV protection polarized sunglasses with stylish frame design.",
        price_cents: 14999,
        category: "Accessories",
        image_url: "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=500",
        in_stock: true,
        rating: 4.6,
        review_count: 89,
    },
    Row {
        id: "12",
        name: "Desk Lamp LED",
        description: "Adjustable LED desk lamp with touch controls and multiple brightness levels.",
        price_cents: 3999,
        category: "Home & Kitchen",
        image_url: "https://images.unsplash.com/photo-1565306257569-4eb0e3c41b24?w=500",
        in_stock: true,
        rating: 4.4,
        review_count: 276,
    },
];

/// The 12-product demo catalog, in canonical order (ids `"1"` through `"12"`).
pub fn demo_catalog() -> DomainResult<Catalog> {
    build(&DEMO_ROWS)
}

fn build(rows: &[Row]) -> DomainResult<Catalog> {
    let products = rows
        .iter()
        .map(|row| {
            Product::new(NewProduct {
                id: ProductId::new(row.id)?,
                name: row.name.to_string(),
                description: row.description.to_string(),
                price: Price::from_cents(row.price_cents),
                category: row.category.to_string(),
                image_url: row.image_url.to_string(),
                in_stock: row.in_stock,
                rating: row.rating,
                review_count: row.review_count,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    Catalog::new(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{DomainError, Entity};

    #[test]
    fn demo_catalog_has_twelve_unique_products_in_order() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(catalog.len(), 12);

        let ids: Vec<&str> = catalog.iter().map(|p| p.id().as_str()).collect();
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);

        // Re-validating through the checked constructor must succeed.
        let rebuilt = Catalog::new(catalog.products().to_vec()).unwrap();
        assert_eq!(rebuilt, catalog);
    }

    #[test]
    fn bad_row_fails_the_build() {
        let rows = [
            Row { id: "a", ..DEMO_ROWS[0] },
            Row { id: "", ..DEMO_ROWS[1] },
        ];
        assert!(matches!(build(&rows), Err(DomainError::InvalidId(_))));

        let rows = [
            Row { id: "a", ..DEMO_ROWS[0] },
            Row { id: "a", ..DEMO_ROWS[1] },
        ];
        assert!(matches!(build(&rows), Err(DomainError::InvariantViolation(_))));

        let rows = [Row { rating: 7.5, ..DEMO_ROWS[0] }];
        assert!(matches!(build(&rows), Err(DomainError::Validation(_))));
    }

    #[test]
    fn known_rows_are_preserved() {
        let catalog = demo_catalog().unwrap();
        let first = &catalog.products()[0];
        assert_eq!(first.name(), "Wireless Bluetooth Headphones");
        assert_eq!(first.price().as_decimal(), 199.99);
        assert_eq!(first.review_count(), 234);

        let shirt = &catalog.products()[2];
        assert_eq!(shirt.category(), "Clothing");
        assert!(!shirt.in_stock());
    }
}
