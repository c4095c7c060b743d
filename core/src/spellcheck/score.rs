//! Edit distance and the normalized closeness score used for the
//! "recommended suggestion" decision.

const MAX_INITIAL_SCORE: f64 = 255.0;
const TYPED_LETTER_MULTIPLIER: f64 = 2.0;
const FULL_WORD_MULTIPLIER: f64 = 2.0;

/// Levenshtein distance between `before` and `after`, case-insensitive,
/// counted in code points.
pub fn edit_distance(before: &str, after: &str) -> usize {
    let a: Vec<char> = before.to_lowercase().chars().collect();
    let b: Vec<char> = after.to_lowercase().chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Scale a decoder score for `after` (typed as `before`) into roughly `[0, 1]`.
///
/// The score is divided by the best score a word of that length can reach and
/// weighted down by the edit distance. Degenerate inputs score 0.
pub fn normalized_score(before: &str, after: &str, score: i32) -> f32 {
    let before_len = before.chars().count();
    let after_len = after.chars().count();
    if before_len == 0 || after_len == 0 {
        return 0.0;
    }
    let space_count = after.chars().filter(|&c| c == ' ').count();
    if space_count == after_len {
        return 0.0;
    }
    let distance = edit_distance(before, after);
    if score <= 0 || distance >= after_len {
        return 0.0;
    }
    let weight = 1.0 - distance as f64 / after_len as f64;
    let exponent = before_len.min(after_len - space_count).min(i32::MAX as usize) as i32;
    let max_score = MAX_INITIAL_SCORE
        * TYPED_LETTER_MULTIPLIER.powi(exponent)
        * FULL_WORD_MULTIPLIER;
    ((score as f64 / max_score) * weight) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("Hello", "hello"), 0);
        assert_eq!(edit_distance("helo", "hello"), 1);
        assert_eq!(edit_distance("naïve", "naive"), 1);
    }

    #[test]
    fn test_normalized_score_degenerate_inputs() {
        assert_eq!(normalized_score("", "abc", 100), 0.0);
        assert_eq!(normalized_score("abc", "", 100), 0.0);
        assert_eq!(normalized_score("abc", "   ", 100), 0.0);
        assert_eq!(normalized_score("abc", "abd", 0), 0.0);
        assert_eq!(normalized_score("abc", "xyz", 1000), 0.0);
    }

    #[test]
    fn test_normalized_score_scaling() {
        // 255 * 2^4 * 2 is the best a 4-letter word can score
        let full = normalized_score("helo", "hello", 255 * 16 * 2);
        assert!((full - 0.8).abs() < 1e-6);
        let half = normalized_score("helo", "hello", 255 * 16);
        assert!((half - 0.4).abs() < 1e-6);
        assert!(normalized_score("helo", "hello", 100) < 0.11);
    }
}
