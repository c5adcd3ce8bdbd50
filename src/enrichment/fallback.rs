// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Synthesized product detail used when no source knows a label

use serde_json::json;

use super::types::ProductDetail;

pub const FALLBACK_SOURCE: &str = "dynamic_fallback";

fn category_phrase(category: &str) -> &'static str {
    match category {
        "food" => "a food item",
        "animal" => "an animal",
        "tool" => "a tool",
        "vehicle" => "a vehicle",
        "clothing" => "an item of clothing",
        "furniture" => "a piece of furniture",
        "electronics" => "an electronic device",
        "nature" => "part of the natural world",
        _ => "an everyday object",
    }
}

fn display_name(label: &str) -> String {
    let mut chars = label.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown item".to_string(),
    }
}

fn join_words(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Build a description from the label, its category and related words
pub fn synthesize(label: &str, category: &str, related: &[String]) -> ProductDetail {
    let mut description = format!("{} is {}.", display_name(label), category_phrase(category));
    if !related.is_empty() {
        description.push_str(&format!(
            " It is commonly associated with {}.",
            join_words(related)
        ));
    }

    ProductDetail {
        label: label.to_string(),
        description,
        category: category.to_string(),
        source: FALLBACK_SOURCE.to_string(),
        image_url: None,
        details: json!({
            "generated": true,
            "relatedTerms": related,
        }),
        source_id: None,
    }
}
