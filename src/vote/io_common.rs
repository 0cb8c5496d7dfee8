use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads a valuation from a text cell. An empty cell counts as 0.
pub fn parse_cell(s: &str) -> Option<f64> {
    match s.trim() {
        "" => Some(0.0),
        x => x.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(parse_cell(" 3.5 "), Some(3.5));
        assert_eq!(parse_cell("-2"), Some(-2.0));
        assert_eq!(parse_cell(""), Some(0.0));
        assert_eq!(parse_cell("pizza"), None);
        assert_eq!(parse_cell("NaN"), None);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/a/b/lunch.csv"), "lunch.csv");
        assert_eq!(simplify_file_name("lunch.csv"), "lunch.csv");
    }
}
