//! Command implementations.
//!
//! Each command takes the session state and an output sink, so tests can
//! drive them over a `MemoryStore` and capture what they print.

pub mod browse;
pub mod cart;
pub mod checkout;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;
    use wardrobe_core::{Catalog, ColorVariant, Gender, Product, ProductId};
    use wardrobe_storefront::{MemoryStore, Storefront};

    pub fn product(id: &str, name: &str, gender: Gender, category: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            gender,
            category: category.to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            color: vec![ColorVariant {
                name: "Navy".to_string(),
                hex: "#1f2a44".to_string(),
            }],
            material: "Cotton".to_string(),
            description: "Everyday staple".to_string(),
        }
    }

    pub fn storefront() -> Storefront<MemoryStore> {
        let catalog = Catalog::new(vec![
            product("1", "Oxford Shirt", Gender::Mens, "Tops", 4500),
            product("2", "Wrap Dress", Gender::Womens, "Dresses", 8900),
            product("3", "Crew Tee", Gender::Mens, "Tops", 1500),
            product("4", "Rain Shell", Gender::Womens, "Outerwear", 12000),
            product("5", "Polo", Gender::Mens, "Tops", 3000),
        ]);
        Storefront::with_catalog(MemoryStore::new(), catalog).unwrap()
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
