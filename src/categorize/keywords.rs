// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static category keyword table
//!
//! Order matters: the first category with a matching keyword wins.

/// Category returned when nothing matches
pub const DEFAULT_CATEGORY: &str = "other";

/// Ordered (category, keywords) pairs
pub static CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "food", "fruit", "vegetable", "edible", "eaten", "meal", "dish", "snack", "drink",
            "beverage", "apple", "banana", "orange", "grape", "lemon", "carrot", "tomato",
            "potato", "bread", "cheese", "meat", "berry", "juice", "coffee", "pizza", "cake",
            "cereal", "grain",
        ],
    ),
    (
        "animal",
        &[
            "animal", "mammal", "bird", "fish", "insect", "reptile", "dog", "cat", "horse",
            "cow", "creature", "species", "wildlife", "puppy", "kitten",
        ],
    ),
    (
        "tool",
        &[
            "tool", "hammer", "wrench", "screwdriver", "drill", "pliers", "scissors", "knife",
            "utensil", "implement", "spanner", "shovel",
        ],
    ),
    (
        "vehicle",
        &[
            "vehicle", "car", "truck", "bicycle", "bike", "motorcycle", "bus", "train", "boat",
            "ship", "airplane", "aircraft", "automobile", "transport",
        ],
    ),
    (
        "clothing",
        &[
            "clothing", "clothes", "garment", "apparel", "shirt", "dress", "shoe", "jacket",
            "pants", "trousers", "sock", "coat", "sweater", "worn",
        ],
    ),
    (
        "furniture",
        &[
            "furniture", "chair", "table", "sofa", "couch", "bed", "desk", "shelf", "cabinet",
            "wardrobe", "seat", "stool",
        ],
    ),
    (
        "electronics",
        &[
            "electronic", "device", "computer", "phone", "laptop", "television", "camera",
            "screen", "keyboard", "monitor", "gadget", "appliance", "headphones",
        ],
    ),
    (
        "nature",
        &[
            "nature", "plant", "tree", "flower", "leaf", "grass", "mountain", "sky", "water",
            "rock", "forest", "landscape", "river", "beach", "sea",
        ],
    ),
];

/// All category names in table order
pub fn category_names() -> impl Iterator<Item = &'static str> {
    CATEGORY_KEYWORDS.iter().map(|(category, _)| *category)
}

/// Whether `category` is one of the known names or the default
pub fn is_known_category(category: &str) -> bool {
    category == DEFAULT_CATEGORY || category_names().any(|c| c == category)
}

/// Match a label by substring containment of any keyword
pub fn match_label(label: &str) -> Option<&'static str> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
        .map(|(category, _)| *category)
}

/// Match definition text word by word; a keyword also matches its plural
pub fn match_definition(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|k| {
                words.iter().any(|w| {
                    *w == *k
                        || w.strip_suffix('s') == Some(k)
                        || w.strip_suffix("es") == Some(k)
                })
            })
        })
        .map(|(category, _)| *category)
}
