//! Fuzzy matching primitives.
//!
//! Both the not-found suggestion and the palette filter build on the same
//! subsequence walk. Scoring favors short candidates: the score of a
//! subsequence match is `input_len / candidate_len`, so a candidate that
//! wastes fewer characters ranks higher.

use crate::markup::escape;

/// True iff every character of `needle`, in order, occurs in `haystack`
/// in order (not necessarily contiguous). Case-sensitive as passed.
///
/// O(|haystack|) time, two cursors, no allocation.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut needle_chars = needle.chars().peekable();
    for hay in haystack.chars() {
        match needle_chars.peek() {
            Some(&n) if n == hay => {
                needle_chars.next();
            },
            Some(_) => {},
            None => break,
        }
    }
    needle_chars.peek().is_none()
}

/// Best-effort suggestion for a mistyped command.
///
/// A literal prefix match wins outright (first encountered, no further
/// ranking). Otherwise the subsequence match with the strictly highest
/// score is returned, ties broken by first-encountered order.
pub fn suggest_command<'a, I>(input: &str, names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_len = input.chars().count();
    let mut best: Option<&str> = None;
    let mut best_score = f64::MIN;
    for name in names {
        if name.starts_with(input) {
            return Some(name.to_string());
        }
        if is_subsequence(input, name) {
            let score = input_len as f64 / name.chars().count().max(1) as f64;
            if score > best_score {
                best_score = score;
                best = Some(name);
            }
        }
    }
    best.map(str::to_string)
}

/// Partition `names` into prefix / substring / subsequence matches of
/// `query` (lowercased comparison) and concatenate the three groups.
///
/// Each group is disjoint from the earlier ones and preserves the input
/// iteration order. An empty query returns everything.
pub fn filter_commands(query: &str, names: &[String]) -> Vec<String> {
    if query.is_empty() {
        return names.to_vec();
    }
    let q = query.to_lowercase();
    let mut starts = Vec::new();
    let mut contains = Vec::new();
    let mut subseq = Vec::new();
    for name in names {
        let lower = name.to_lowercase();
        if lower.starts_with(&q) {
            starts.push(name.clone());
        } else if lower.contains(&q) {
            contains.push(name.clone());
        } else if is_subsequence(&q, &lower) {
            subseq.push(name.clone());
        }
    }
    starts.extend(contains);
    starts.extend(subseq);
    starts
}

/// Wrap the characters of `text` that greedily match `query` as a
/// subsequence (case-insensitive, left to right) in `<mark>` markup.
///
/// Unmatched characters are escaped verbatim; the original case of `text`
/// is preserved. An empty query returns the escaped text unchanged.
pub fn highlight_match(text: &str, query: &str) -> String {
    if query.is_empty() {
        return escape(text);
    }
    let query_lower: Vec<char> = query.to_lowercase().chars().collect();
    let mut result = String::new();
    let mut search_index = 0;
    for ch in text.chars() {
        let matched = search_index < query_lower.len()
            && ch.to_lowercase().next() == Some(query_lower[search_index]);
        if matched {
            result.push_str("<mark class=\"match-highlight\">");
            result.push_str(&escape(&ch.to_string()));
            result.push_str("</mark>");
            search_index += 1;
        } else {
            result.push_str(&escape(&ch.to_string()));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // -- is_subsequence --

    #[test]
    fn empty_needle_always_matches() {
        assert!(is_subsequence("", ""));
        assert!(is_subsequence("", "anything"));
    }

    #[test]
    fn nonempty_needle_never_matches_empty_haystack() {
        assert!(!is_subsequence("a", ""));
    }

    #[test]
    fn subsequence_skips_characters() {
        assert!(is_subsequence("thm", "theme"));
        assert!(is_subsequence("st", "set theme"));
        assert!(!is_subsequence("mx", "theme"));
    }

    #[test]
    fn subsequence_respects_order() {
        assert!(!is_subsequence("eh", "help"));
        assert!(is_subsequence("hl", "help"));
    }

    #[test]
    fn subsequence_is_case_sensitive() {
        assert!(!is_subsequence("H", "help"));
        assert!(is_subsequence("h", "help"));
    }

    // -- suggest_command --

    #[test]
    fn prefix_match_wins_outright() {
        let suggestion = suggest_command("he", ["theme", "help"].into_iter());
        assert_eq!(suggestion.as_deref(), Some("help"));
    }

    #[test]
    fn prefix_beats_better_scoring_subsequence() {
        // "the" is a prefix of "theme"; a prefix match must win even when a
        // subsequence candidate would score higher.
        let suggestion = suggest_command("the", ["the", "theme"].into_iter());
        assert_eq!(suggestion.as_deref(), Some("the"));
    }

    #[test]
    fn highest_score_wins_among_subsequences() {
        // "clr" is a subsequence of both; "clear" is shorter, so it scores
        // 3/5 against "colorize"'s 3/8.
        let suggestion = suggest_command("clr", ["colorize", "clear"].into_iter());
        assert_eq!(suggestion.as_deref(), Some("clear"));
    }

    #[test]
    fn score_ties_break_to_first_encountered() {
        let suggestion = suggest_command("ab", ["axxb", "axbx"].into_iter());
        assert_eq!(suggestion.as_deref(), Some("axxb"));
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(suggest_command("zzz", ["help", "clear"].into_iter()), None);
    }

    // -- filter_commands --

    #[test]
    fn empty_query_returns_all() {
        let all = names(&["help", "clear", "theme"]);
        assert_eq!(filter_commands("", &all), all);
    }

    #[test]
    fn groups_are_ordered_prefix_substring_subsequence() {
        let all = names(&["theme", "set theme", "help", "reload"]);
        // "he": prefix of "help"; substring of "theme" and "set theme";
        // subsequence of nothing else.
        let filtered = filter_commands("he", &all);
        assert_eq!(filtered, names(&["help", "theme", "set theme"]));
    }

    #[test]
    fn groups_preserve_registry_order_within_themselves() {
        let all = names(&["beta", "batch", "alpha"]);
        // "ba": prefix of "batch"; subsequence of "beta" and "alpha"? beta:
        // b..a yes; alpha: no b. Substring of none besides batch.
        let filtered = filter_commands("ba", &all);
        assert_eq!(filtered, names(&["batch", "beta"]));
    }

    #[test]
    fn groups_are_disjoint() {
        let all = names(&["theme", "the", "thumb"]);
        let filtered = filter_commands("th", &all);
        assert_eq!(filtered.len(), 3);
        // All are prefix matches; nothing is duplicated into later groups.
        assert_eq!(filtered, names(&["theme", "the", "thumb"]));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let all = names(&["Help", "Theme"]);
        let filtered = filter_commands("HE", &all);
        assert_eq!(filtered, names(&["Help", "Theme"]));
    }

    #[test]
    fn no_matches_yields_empty() {
        let all = names(&["help", "clear"]);
        assert!(filter_commands("zzz", &all).is_empty());
    }

    // -- highlight_match --

    #[test]
    fn empty_query_escapes_only() {
        assert_eq!(highlight_match("a<b", ""), "a&lt;b");
    }

    #[test]
    fn marks_greedy_leftmost_matches() {
        assert_eq!(
            highlight_match("help", "hl"),
            "<mark class=\"match-highlight\">h</mark>e<mark class=\"match-highlight\">l</mark>p"
        );
    }

    #[test]
    fn highlight_preserves_case() {
        let out = highlight_match("Help", "h");
        assert!(out.contains("<mark class=\"match-highlight\">H</mark>"));
    }

    #[test]
    fn highlight_escapes_unmatched_text() {
        let out = highlight_match("a&b", "b");
        assert!(out.starts_with("a&amp;"));
        assert!(out.ends_with("<mark class=\"match-highlight\">b</mark>"));
    }
}
