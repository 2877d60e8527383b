// Checks that SECURITY.md keeps pace with the vault source: required
// sections are present and every error code is documented.

use regex::Regex;

/// Returns the body of the first header named `section_name`, up to the next
/// header of the same or a higher level. Empty when the header is missing.
pub fn extract_section(content: &str, section_name: &str) -> String {
    let mut section = String::new();
    let mut level = None;

    for line in content.lines() {
        if line.starts_with('#') {
            let current = line.chars().take_while(|&c| c == '#').count();
            let title = line.trim_start_matches('#').trim();

            match level {
                None if title == section_name => level = Some(current),
                Some(open) if current <= open => break,
                _ => {}
            }
        }

        if level.is_some() {
            section.push_str(line);
            section.push('\n');
        }
    }

    section
}

pub fn section_exists(content: &str, section_name: &str) -> bool {
    content
        .lines()
        .filter(|line| line.starts_with('#'))
        .any(|line| line.trim_start_matches('#').trim() == section_name)
}

/// Case-insensitive check that every keyword occurs somewhere in `content`.
pub fn contains_all_keywords(content: &str, keywords: &[&str]) -> bool {
    let lowercase = content.to_lowercase();
    keywords
        .iter()
        .all(|keyword| lowercase.contains(&keyword.to_lowercase()))
}

/// `(name, code)` pairs declared by `enum <enum_name>` in Rust source,
/// in declaration order. Only explicit `Variant = N` discriminants count.
pub fn enum_variants(source: &str, enum_name: &str) -> Vec<(String, u32)> {
    let header = Regex::new(&format!(r"enum\s+{}\s*\{{", regex::escape(enum_name))).unwrap();
    let Some(start) = header.find(source) else {
        return Vec::new();
    };
    let body = &source[start.end()..];
    let body = &body[..body.find('}').unwrap_or(body.len())];

    let variant = Regex::new(r"(?m)^\s*([A-Z][A-Za-z0-9]*)\s*=\s*(\d+)\s*,?").unwrap();
    variant
        .captures_iter(body)
        .filter_map(|c| Some((c[1].to_string(), c[2].parse().ok()?)))
        .collect()
}

/// `(name, code)` pairs from markdown table rows shaped `| N | `Name` | ... |`.
pub fn documented_codes(content: &str) -> Vec<(String, u32)> {
    let row = Regex::new(r"(?m)^\|\s*(\d+)\s*\|\s*`?([A-Za-z0-9]+)`?\s*\|").unwrap();
    row.captures_iter(content)
        .filter_map(|c| Some((c[2].to_string(), c[1].parse().ok()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_section_stops_at_sibling() {
        let content = "# Title\n## Trust Model\nowner\n### Roles\nadmin\n## Known Limitations\nnone";
        let section = extract_section(content, "Trust Model");
        assert!(section.contains("owner"));
        assert!(section.contains("### Roles"));
        assert!(!section.contains("Known Limitations"));
        assert!(extract_section(content, "Missing").is_empty());
    }

    #[test]
    fn test_section_exists() {
        let content = "# Title\n## Overview\ntext\n### Error Reference\nmore";
        assert!(section_exists(content, "Overview"));
        assert!(section_exists(content, "Error Reference"));
        assert!(!section_exists(content, "Trust Model"));
    }

    #[test]
    fn test_contains_all_keywords() {
        let content = "Claims are burned before the Transfer leaves the vault.";
        assert!(contains_all_keywords(content, &["burned", "transfer"]));
        assert!(!contains_all_keywords(content, &["burned", "reentrancy"]));
    }

    #[test]
    fn test_enum_variants() {
        let source = "pub enum Other { A = 9 }\n\
                      pub enum VaultError {\n    /// docs\n    LockNotElapsed = 1,\n    NoYieldAvailable = 2,\n}\n";
        assert_eq!(
            enum_variants(source, "VaultError"),
            vec![
                ("LockNotElapsed".to_string(), 1),
                ("NoYieldAvailable".to_string(), 2),
            ]
        );
        assert!(enum_variants(source, "Missing").is_empty());
    }

    #[test]
    fn test_documented_codes() {
        let content = "| Code | Name | Meaning |\n|---|---|---|\n| 1 | `LockNotElapsed` | early |\n| 12 | ArithmeticOverflow | math |\n";
        assert_eq!(
            documented_codes(content),
            vec![
                ("LockNotElapsed".to_string(), 1),
                ("ArithmeticOverflow".to_string(), 12),
            ]
        );
    }
}
