//! Static category and product catalog.
//!
//! The catalog is built once and never mutated. List items reference categories by
//! id; ids the catalog does not know render with [`CategoryDisplay::FALLBACK`].

use std::sync::LazyLock;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit: String,
}

/// Icon and color used when rendering a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay<'a> {
    pub icon: &'a str,
    pub color: &'a str,
}

impl CategoryDisplay<'static> {
    pub const FALLBACK: Self = Self {
        icon: "basket",
        color: "#6B7280",
    };
}

/// Resolves category metadata by id.
pub trait CategoryLookup {
    fn category(&self, id: &str) -> Option<&Category>;

    fn display(&self, id: &str) -> CategoryDisplay<'_> {
        match self.category(id) {
            Some(category) => CategoryDisplay {
                icon: &category.icon,
                color: &category.color,
            },
            None => CategoryDisplay::FALLBACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<(String, Vec<Product>)>,
}

impl Catalog {
    /// Build a catalog from `(category, products)` pairs. Product counts are derived.
    pub fn new(entries: Vec<(Category, Vec<Product>)>) -> Self {
        let mut categories = Vec::with_capacity(entries.len());
        let mut products = Vec::with_capacity(entries.len());
        for (mut category, items) in entries {
            category.product_count = items.len();
            products.push((category.id.clone(), items));
            categories.push(category);
        }
        Self {
            categories,
            products,
        }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self, category_id: &str) -> Option<&[Product]> {
        self.products
            .iter()
            .find(|(id, _)| id == category_id)
            .map(|(_, items)| items.as_slice())
    }

    /// Products of a category whose name contains `query`, ignoring case.
    pub fn search_products(&self, category_id: &str, query: &str) -> Option<Vec<&Product>> {
        let needle = query.trim().to_lowercase();
        let items = self.products(category_id)?;
        Some(
            items
                .iter()
                .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
                .collect(),
        )
    }
}

impl CategoryLookup for Catalog {
    fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

fn category(id: &str, name: &str, icon: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        product_count: 0,
    }
}

fn product(id: &str, name: &str, unit: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
    }
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(vec![
        (
            category("dry-foods", "Kuru Gıdalar & Bakliyat", "nutrition", "#D97706"),
            vec![
                product("red-lentil", "Kırmızı Mercimek", "kg"),
                product("green-lentil", "Yeşil Mercimek", "kg"),
                product("chickpea", "Nohut", "kg"),
                product("kidney-bean", "Barbunya", "kg"),
            ],
        ),
        (
            category("basic-foods", "Temel Gıda & Baharatlar", "restaurant", "#DC2626"),
            vec![
                product("salt", "Tuz", "kg"),
                product("sugar", "Şeker", "kg"),
                product("black-pepper", "Karabiber", "gr"),
                product("red-pepper-flakes", "Pul Biber", "gr"),
            ],
        ),
        (
            category("liquid-foods", "Sıvı Gıdalar & Yağlar", "water", "#0891B2"),
            vec![],
        ),
        (
            category("breakfast", "Kahvaltılık Ürünler", "sunny", "#F59E0B"),
            vec![],
        ),
        (
            category("canned-foods", "Konserve ve Hazır Gıdalar", "cube", "#7C2D12"),
            vec![],
        ),
        (
            category("meat-fish", "Et – Tavuk – Balık – Dondurulmuş", "fish", "#EF4444"),
            vec![],
        ),
        (
            category(
                "fruits-vegetables",
                "Sebze & Meyve (mevsime göre değişir)",
                "leaf",
                "#10B981",
            ),
            vec![],
        ),
        (
            category("snacks", "Atıştırmalıklar", "fast-food", "#8B5CF6"),
            vec![],
        ),
        (
            category("cleaning-hygiene", "Temizlik & Hijyen Ürünleri", "sparkles", "#84CC16"),
            vec![],
        ),
        (
            category("beverages", "İçecekler", "cafe", "#06B6D4"),
            vec![],
        ),
        (
            category("personal-care", "Banyo & Kişisel Bakım", "heart", "#EC4899"),
            vec![],
        ),
        (
            category("home-cleaning", "Ev Temizliği & Gereçleri", "home", "#059669"),
            vec![],
        ),
        (
            category("baby-products", "Bebek Ürünleri", "happy", "#F472B6"),
            vec![],
        ),
        (
            category("pet-products", "Evcil Hayvan Ürünleri", "paw", "#A855F7"),
            vec![],
        ),
        (
            category("health-pharmacy", "Sağlık & Ecza", "medical", "#DC2626"),
            vec![],
        ),
        (
            category(
                "kitchen-supplies",
                "Mutfak Gereçleri & Sarf Malzemeleri",
                "restaurant-outline",
                "#7C3AED",
            ),
            vec![],
        ),
        (
            category("general-household", "Genel Ev İhtiyaçları", "construct", "#6B7280"),
            vec![],
        ),
    ])
});
