//! CSV header parsing and normalization.

/// Column names found on the header line of an extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed), in file order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, matched after trimming.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// First entry of `required` that is not present.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required
            .iter()
            .copied()
            .find(|column| self.position(column).is_none())
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_missing() {
        let headers = CsvHeaders::new(vec!["order_id".to_string(), "quantity".to_string()]);
        assert_eq!(headers.first_missing(&["order_id"]), None);
        assert_eq!(
            headers.first_missing(&["order_id", "product_sku", "unit_price"]),
            Some("product_sku")
        );
    }

    #[test]
    fn test_position() {
        let headers = CsvHeaders::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(headers.position("b"), Some(1));
        assert_eq!(headers.position("c"), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_parse_csv_line_simple() {
        let result = parse_csv_line("customer_id,email,full_name,updated_at");
        assert_eq!(result, vec!["customer_id", "email", "full_name", "updated_at"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"order_id\",\"sku, legacy\",quantity");
        assert_eq!(result, vec!["order_id", "sku, legacy", "quantity"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"he said \"\"hi\"\"\",b");
        assert_eq!(result, vec!["he said \"hi\"", "b"]);
    }

    #[test]
    fn test_parse_csv_line_trimmed() {
        let result = parse_csv_line("  order_id  ,  order_date\r");
        assert_eq!(result, vec!["order_id", "order_date"]);
    }
}
