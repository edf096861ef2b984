/*
 * attr.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

use hashlink::LinkedHashMap;

/// Pandoc attributes: (identifier, classes, key-value pairs).
///
/// The key-value map keeps insertion order so that documents
/// round-trip byte-for-byte.
pub type Attr = (String, Vec<String>, LinkedHashMap<String, String>);

pub fn empty_attr() -> Attr {
    (String::new(), vec![], LinkedHashMap::new())
}

pub fn is_empty_attr(attr: &Attr) -> bool {
    attr.0.is_empty() && attr.1.is_empty() && attr.2.is_empty()
}

/// Build an Attr carrying only the given classes.
pub fn attr_with_classes(classes: &[&str]) -> Attr {
    (
        String::new(),
        classes.iter().map(|c| (*c).to_string()).collect(),
        LinkedHashMap::new(),
    )
}
