//! Verdict Classifier
//!
//! CHỈ chứa logic classify - không có types, không có I/O.
//! Input: verdict stats (hoặc "no data")
//! Output: Disposition

use super::types::{Disposition, VerdictStats};

/// Main classification function
///
/// Deterministic, pure. "No data" (digest chưa từng được service phân tích)
/// là Clean - absence of evidence được coi là clean, không phải unknown.
/// Missing categories đếm là 0.
pub fn classify(stats: Option<&VerdictStats>) -> Disposition {
    match stats {
        Some(stats) if stats.malicious() > 0 || stats.suspicious() > 0 => {
            Disposition::Suspicious
        }
        _ => Disposition::Clean,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn stats(pairs: &[(&str, u32)]) -> VerdictStats {
        VerdictStats {
            counts: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_no_data_is_clean() {
        assert_eq!(classify(None), Disposition::Clean);
    }

    #[test]
    fn test_empty_mapping_is_clean() {
        assert_eq!(classify(Some(&stats(&[]))), Disposition::Clean);
    }

    #[test]
    fn test_zero_counts_are_clean() {
        let s = stats(&[("malicious", 0), ("suspicious", 0), ("harmless", 70)]);
        assert_eq!(classify(Some(&s)), Disposition::Clean);
    }

    #[test]
    fn test_malicious_count_is_suspicious() {
        let s = stats(&[("malicious", 2), ("suspicious", 0), ("harmless", 70)]);
        assert_eq!(classify(Some(&s)), Disposition::Suspicious);
    }

    #[test]
    fn test_suspicious_count_alone_is_suspicious() {
        let s = stats(&[("suspicious", 1)]);
        assert_eq!(classify(Some(&s)), Disposition::Suspicious);
    }

    #[test]
    fn test_unrecognized_categories_do_not_flag() {
        let s = stats(&[("timeout", 9), ("type-unsupported", 3)]);
        assert_eq!(classify(Some(&s)), Disposition::Clean);
    }
}
