//! Sibling name de-duplication.

/// Return `base`, or `"base (n)"` with the smallest `n >= 1` not taken,
/// comparing case-insensitively against `existing`.
pub fn unique_sibling_name<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<String> = existing.into_iter().map(str::to_lowercase).collect();
    let is_taken = |candidate: &str| taken.iter().any(|t| *t == candidate.to_lowercase());

    if !is_taken(base) {
        return base.to_string();
    }

    let mut n = 1u32;
    loop {
        let candidate = format!("{base} ({n})");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_name_is_kept() {
        assert_eq!(unique_sibling_name("Contracts", ["Invoices"]), "Contracts");
        assert_eq!(unique_sibling_name("Contracts", []), "Contracts");
    }

    #[test]
    fn test_taken_name_gets_suffix() {
        assert_eq!(
            unique_sibling_name("New Folder", ["New Folder"]),
            "New Folder (1)"
        );
        assert_eq!(
            unique_sibling_name("New Folder", ["New Folder", "New Folder (1)"]),
            "New Folder (2)"
        );
    }

    #[test]
    fn test_comparison_ignores_case() {
        assert_eq!(unique_sibling_name("reports", ["Reports"]), "reports (1)");
        assert_eq!(
            unique_sibling_name("Reports", ["REPORTS", "reports (1)"]),
            "Reports (2)"
        );
    }

    #[test]
    fn test_fills_lowest_gap() {
        assert_eq!(unique_sibling_name("A", ["A", "A (2)"]), "A (1)");
    }
}
