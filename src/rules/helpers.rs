use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Irregular plural → singular.
static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("people", "person"),
        ("knives", "knife"),
        ("wolves", "wolf"),
        ("leaves", "leaf"),
    ])
});

/// Lowercase and split `text` into word tokens. Possessives stay attached
/// ("one's") so filler lists can match them.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    regex!(r"[a-z0-9]+(?:'[a-z]+)?").find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Best-effort English singular. Short words are left alone so "bus" and
/// "gas" survive.
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(singular) = IRREGULAR_PLURALS.get(lower.as_str()) {
        return singular.to_string();
    }
    if lower.len() <= 3 {
        return lower;
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return lower;
    }
    match lower.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_examples() {
        let cases = [
            ("coats", "coat"),
            ("berries", "berry"),
            ("boxes", "box"),
            ("glasses", "glass"),
            ("churches", "church"),
            ("glass", "glass"),
            ("bus", "bus"),
            ("cactus", "cactus"),
            ("feet", "foot"),
            ("Coats", "coat"),
            ("coat", "coat"),
        ];
        for (input, expected) in cases {
            assert_eq!(singularize(input), expected, "singular of '{input}'");
        }
    }

    #[test]
    fn tokenize_keeps_possessives() {
        assert_eq!(tokenize("Clean up one's act!"), vec!["clean", "up", "one's", "act"]);
        assert_eq!(tokenize("  head   over heels "), vec!["head", "over", "heels"]);
        assert!(tokenize("  ,, ").is_empty());
    }
}
