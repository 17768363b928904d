const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// keywords that cannot be written as raw identifiers
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// ASCII letters, digits and `_`, not starting with a digit. A lone `_` is rejected.
pub fn is_valid_identifier(value: &str) -> bool {
    if value == "_" {
        return false;
    }

    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Makes a valid identifier usable as a Rust item name.
pub fn rust_ident(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("STORAGE"));
        assert!(is_valid_identifier("_to"));
        assert!(is_valid_identifier("ERC20_V2"));
        assert!(!is_valid_identifier("2FA"));
        assert!(!is_valid_identifier("MY-TOKEN"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("_"));
        assert!(is_valid_identifier("__"));
    }

    #[test]
    fn test_rust_ident() {
        assert_eq!(rust_ident("balanceOf"), "balanceOf");
        assert_eq!(rust_ident("type"), "r#type");
        assert_eq!(rust_ident("move"), "r#move");
        assert_eq!(rust_ident("self"), "self_");
    }
}
