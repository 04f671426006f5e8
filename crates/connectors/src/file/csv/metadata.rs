use std::collections::HashSet;

/// Cell texts read as missing values.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

pub fn normalize_cell(cell: &str) -> Option<String> {
    if is_na(cell) {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Makes header names usable as column names.
///
/// Blank headers become `Unnamed: <position>`; repeated headers get a
/// `.1`, `.2`, ... suffix so every column name is unique.
pub fn normalize_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (pos, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {pos}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers_dedupes_and_names_blanks() {
        let headers = normalize_headers(["id", "name", "", "name", "name"]);
        assert_eq!(headers, vec!["id", "name", "Unnamed: 2", "name.1", "name.2"]);
    }

    #[test]
    fn test_normalize_headers_avoids_existing_suffix() {
        let headers = normalize_headers(["a", "a.1", "a"]);
        assert_eq!(headers, vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_na_cells() {
        assert_eq!(normalize_cell(""), None);
        assert_eq!(normalize_cell("NULL"), None);
        assert_eq!(normalize_cell("n/a"), None);
        assert_eq!(normalize_cell("0"), Some("0".to_string()));
        assert_eq!(normalize_cell(" "), Some(" ".to_string()));
    }
}
