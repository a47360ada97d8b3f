//! File name sanitization

/// Characters kept verbatim in a file name (before lowercasing).
fn is_preserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// Normalize a file name for use as a storage key.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`, then the result is
/// lowercased. Replacement is per character, so `é` yields a single `_`.
///
/// ```
/// use presign_uploadr::selector::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("My CV (v2).PDF"), "my_cv__v2_.pdf");
/// assert_eq!(sanitize_file_name("report-2024_final.docx"), "report-2024_final.docx");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if is_preserved(c) {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn is_clean(name: &str) -> bool {
        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_file_name("a-b_c.d9"), "a-b_c.d9");
    }

    #[test]
    fn test_sanitize_lowercases() {
        assert_eq!(sanitize_file_name("REPORT.PDF"), "report.pdf");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("a/b\\c:d?e"), "a_b_c_d_e");
        assert_eq!(sanitize_file_name("my file.pdf"), "my_file.pdf");
        assert_eq!(sanitize_file_name("[draft]^@.doc"), "_draft___.doc");
    }

    #[test]
    fn test_sanitize_non_ascii_is_one_underscore_per_char() {
        assert_eq!(sanitize_file_name("My Résumé (final).pdf"), "my_r_sum___final_.pdf");
        assert_eq!(sanitize_file_name("履歴書.pdf"), "___.pdf");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_sanitize_random_names_are_clean_and_idempotent() {
        let mut rng = rand::rng();

        for _ in 0..500 {
            let len = rng.random_range(0..40);
            let name: String = (0..len).map(|_| rng.random::<char>()).collect();

            let once = sanitize_file_name(&name);
            assert!(is_clean(&once), "unclean output {once:?} for {name:?}");
            assert_eq!(once.chars().count(), name.chars().count());
            assert_eq!(sanitize_file_name(&once), once);
        }
    }
}
