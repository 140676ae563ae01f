use humansize::{DECIMAL, format_size};

/// Format a byte count for display, e.g. `12.35 MB`
pub fn format_file_size(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert!(format_file_size(999).ends_with(" B"));
        let mb = format_file_size(1_500_000);
        assert!(mb.starts_with("1.5") && mb.ends_with("MB"), "{mb}");
    }
}
