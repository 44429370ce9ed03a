//! Compiled-in sample catalog.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use rethread_core::{Category, Condition, ProductId};

use crate::models::Product;

/// Midnight UTC on the given day.
fn listed_on(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

struct Seed {
    name: &'static str,
    description: &'static str,
    category: Category,
    price: i64,
    original_price: Option<i64>,
    brand: &'static str,
    size: &'static str,
    color: &'static str,
    condition: Condition,
    listed: (i32, u32, u32),
    popularity: u32,
    seller: &'static str,
    featured: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "Vintage Levis 501 Jeans",
        description: "Classic straight-leg denim, lightly faded, no rips.",
        category: Category::Men,
        price: 1200,
        original_price: Some(3999),
        brand: "Levis",
        size: "L",
        color: "Blue",
        condition: Condition::Good,
        listed: (2024, 6, 12),
        popularity: 87,
        seller: "Arjun Mehta",
        featured: true,
    },
    Seed {
        name: "Floral Summer Dress",
        description: "Lightweight midi dress with a floral print, worn twice.",
        category: Category::Women,
        price: 850,
        original_price: Some(2499),
        brand: "Zara",
        size: "S",
        color: "Yellow",
        condition: Condition::LikeNew,
        listed: (2024, 6, 10),
        popularity: 92,
        seller: "Priya Sharma",
        featured: true,
    },
    Seed {
        name: "Air Zoom Running Shoes",
        description: "Responsive running shoes, cleaned and deodorised.",
        category: Category::Accessories,
        price: 2800,
        original_price: Some(8995),
        brand: "Nike",
        size: "M",
        color: "Black",
        condition: Condition::Good,
        listed: (2024, 6, 8),
        popularity: 95,
        seller: "Rahul Verma",
        featured: true,
    },
    Seed {
        name: "Kids Graphic Hoodie",
        description: "Cosy fleece hoodie with a dinosaur print.",
        category: Category::Kids,
        price: 450,
        original_price: Some(1299),
        brand: "H&M",
        size: "XS",
        color: "Green",
        condition: Condition::Good,
        listed: (2024, 6, 5),
        popularity: 41,
        seller: "Neha Kapoor",
        featured: false,
    },
    Seed {
        name: "Leather Crossbody Bag",
        description: "Genuine leather bag with adjustable strap and gold hardware.",
        category: Category::Accessories,
        price: 18500,
        original_price: Some(120_000),
        brand: "Gucci",
        size: "M",
        color: "Brown",
        condition: Condition::LikeNew,
        listed: (2024, 6, 3),
        popularity: 78,
        seller: "Ananya Iyer",
        featured: true,
    },
    Seed {
        name: "Linen Button-Down Shirt",
        description: "Breathable linen shirt, perfect for humid days.",
        category: Category::Men,
        price: 700,
        original_price: Some(1990),
        brand: "Uniqlo",
        size: "M",
        color: "White",
        condition: Condition::NewWithTags,
        listed: (2024, 5, 30),
        popularity: 63,
        seller: "Arjun Mehta",
        featured: false,
    },
    Seed {
        name: "Three-Stripe Track Jacket",
        description: "Retro track jacket with contrast stripes.",
        category: Category::Women,
        price: 1600,
        original_price: Some(4599),
        brand: "Adidas",
        size: "M",
        color: "Red",
        condition: Condition::Good,
        listed: (2024, 5, 27),
        popularity: 70,
        seller: "Sana Khan",
        featured: true,
    },
    Seed {
        name: "Pleated Wool Skirt",
        description: "Knee-length pleated skirt in soft wool blend.",
        category: Category::Women,
        price: 950,
        original_price: None,
        brand: "Other",
        size: "S",
        color: "Gray",
        condition: Condition::Fair,
        listed: (2024, 5, 22),
        popularity: 22,
        seller: "Priya Sharma",
        featured: false,
    },
    Seed {
        name: "Kids Denim Dungarees",
        description: "Adjustable denim dungarees with snap buttons.",
        category: Category::Kids,
        price: 400,
        original_price: Some(1499),
        brand: "Gap",
        size: "XS",
        color: "Blue",
        condition: Condition::LikeNew,
        listed: (2024, 5, 18),
        popularity: 35,
        seller: "Neha Kapoor",
        featured: false,
    },
    Seed {
        name: "Nylon Re-Edition Backpack",
        description: "Iconic nylon backpack with triangle logo plaque.",
        category: Category::Accessories,
        price: 45000,
        original_price: Some(150_000),
        brand: "Prada",
        size: "L",
        color: "Black",
        condition: Condition::Good,
        listed: (2024, 5, 15),
        popularity: 88,
        seller: "Ananya Iyer",
        featured: true,
    },
    Seed {
        name: "Oversized Knit Sweater",
        description: "Chunky cable-knit sweater, slight pilling on sleeves.",
        category: Category::Women,
        price: 600,
        original_price: Some(2290),
        brand: "H&M",
        size: "L",
        color: "Pink",
        condition: Condition::Fair,
        listed: (2024, 5, 9),
        popularity: 48,
        seller: "Sana Khan",
        featured: false,
    },
    Seed {
        name: "Slim Fit Chinos",
        description: "Stretch cotton chinos in a slim cut.",
        category: Category::Men,
        price: 900,
        original_price: Some(2999),
        brand: "Gap",
        size: "XL",
        color: "Brown",
        condition: Condition::Good,
        listed: (2024, 5, 2),
        popularity: 52,
        seller: "Rahul Verma",
        featured: false,
    },
    Seed {
        name: "Puffer Vest",
        description: "Lightweight quilted vest, packs into its own pocket.",
        category: Category::Men,
        price: 1100,
        original_price: Some(3990),
        brand: "Uniqlo",
        size: "XXL",
        color: "Purple",
        condition: Condition::NewWithTags,
        listed: (2024, 4, 25),
        popularity: 30,
        seller: "Arjun Mehta",
        featured: false,
    },
    Seed {
        name: "Canvas High-Top Sneakers",
        description: "Everyday high-tops, soles in great condition.",
        category: Category::Accessories,
        price: 1300,
        original_price: Some(4299),
        brand: "Other",
        size: "M",
        color: "White",
        condition: Condition::Good,
        listed: (2024, 4, 18),
        popularity: 66,
        seller: "Rahul Verma",
        featured: false,
    },
];

/// Build the sample catalog, newest listing first.
pub(super) fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .zip(1_u32..)
        .map(|(seed, id)| {
            let (year, month, day) = seed.listed;
            Product {
                id: ProductId::new(id),
                name: seed.name.to_owned(),
                description: seed.description.to_owned(),
                category: seed.category,
                price: Decimal::from(seed.price),
                original_price: seed.original_price.map(Decimal::from),
                brand: seed.brand.to_owned(),
                size: seed.size.to_owned(),
                color: seed.color.to_owned(),
                condition: seed.condition,
                created_at: listed_on(year, month, day),
                popularity: seed.popularity,
                images: (1..=2)
                    .map(|n| format!("/images/products/{id}-{n}.jpg"))
                    .collect(),
                seller: seed.seller.to_owned(),
                featured: seed.featured,
            }
        })
        .collect()
}
