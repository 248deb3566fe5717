use std::collections::BTreeMap;

use crate::models::{StringProduct, StringType};

/// In-stock strings for a racket type, grouped under their display name.
/// Nothing in stock (or nothing fetched) is just an empty map.
pub fn grouped_strings(
    products: &[StringProduct],
    racket_type: StringType,
) -> BTreeMap<String, Vec<&StringProduct>> {
    let mut groups: BTreeMap<String, Vec<&StringProduct>> = BTreeMap::new();
    for product in products
        .iter()
        .filter(|p| p.string_type == racket_type && p.quantity > 0)
    {
        groups.entry(product.display_name()).or_default().push(product);
    }
    groups
}

/// Colors still purchasable within one display-name group, in first-seen
/// order.
pub fn available_colors(
    products: &[StringProduct],
    racket_type: StringType,
    display_name: &str,
) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for product in products.iter().filter(|p| {
        p.string_type == racket_type && p.quantity > 0 && p.display_name() == display_name
    }) {
        if !colors.contains(&product.color) {
            colors.push(product.color.clone());
        }
    }
    colors
}
