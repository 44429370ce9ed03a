//! Fixed choices offered by the catalog filter panel.

use rethread_core::{Category, Condition};

/// Conditions, best first.
pub const CONDITIONS: [Condition; 4] = Condition::ALL;

/// Departments.
pub const CATEGORIES: [Category; 4] = Category::ALL;

pub const SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

pub const COLORS: [&str; 10] = [
    "Black", "White", "Red", "Blue", "Green", "Yellow", "Pink", "Purple", "Brown", "Gray",
];

pub const BRANDS: [&str; 10] = [
    "Nike", "Adidas", "Zara", "H&M", "Levis", "Gap", "Gucci", "Prada", "Uniqlo", "Other",
];

/// `(label, value)` pairs; values parse as [`super::PriceRange`].
pub const PRICE_RANGES: [(&str, &str); 5] = [
    ("Under ₹500", "0-500"),
    ("₹500 - ₹1000", "500-1000"),
    ("₹1000 - ₹2000", "1000-2000"),
    ("₹2000 - ₹5000", "2000-5000"),
    ("Over ₹5000", "5000-"),
];
