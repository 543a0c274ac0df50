//! Sentence splitting for the colorizer.
//!
//! Sentences are byte ranges into the source text so the editor can color
//! them in place. Western and CJK terminators are both recognised.

use std::ops::Range;

/// Words whose final period does not end a sentence. Compared lowercase.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "cf.", "fig.", "al.", "ca.",
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.",
    "ph.d.", "u.s.", "u.k.", "a.m.", "p.m.",
];
/// Length in chars of the longest entry above.
const MAX_ABBREVIATION_LEN: usize = 5;

/// Characters that may trail a terminator and still belong to the sentence.
const CLOSERS: &[char] = &[')', '）', '”', '’', '"', '\'', '」', '』'];

pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？' | '．' | '…')
}

/// One sentence of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Slice including the whitespace before it (and, for the last
    /// sentence, any trailing whitespace). Raw ranges tile the input.
    pub raw: Range<usize>,
    /// `raw` with surrounding whitespace trimmed.
    pub text: Range<usize>,
    /// False for a final sentence that has no terminator yet.
    pub complete: bool,
}

impl Sentence {
    fn new(source: &str, raw: Range<usize>, complete: bool) -> Self {
        let slice = &source[raw.clone()];
        let lead = slice.len() - slice.trim_start().len();
        let trail = slice.len() - slice.trim_end().len();
        let text = if lead == slice.len() {
            raw.start..raw.start
        } else {
            raw.start + lead..raw.end - trail
        };
        Self { raw, text, complete }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.text.clone()]
    }
}

/// Split `text` into sentences in order. Blank input yields nothing; text
/// without a final terminator yields a trailing incomplete sentence.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for end in sentence_ends(text, 0) {
        sentences.push(Sentence::new(text, start..end, true));
        start = end;
    }

    if start < text.len() {
        if text[start..].trim().is_empty() {
            if let Some(last) = sentences.last_mut() {
                last.raw.end = text.len();
            }
        } else {
            sentences.push(Sentence::new(text, start..text.len(), false));
        }
    }
    sentences
}

/// Byte offsets just past each complete sentence found from `from` on.
/// `from` must be a char boundary.
pub fn sentence_ends(text: &str, from: usize) -> Vec<usize> {
    let chars: Vec<(usize, char)> = text[from..]
        .char_indices()
        .map(|(i, c)| (from + i, c))
        .collect();
    let n = chars.len();
    let offset_of = |idx: usize| if idx < n { chars[idx].0 } else { text.len() };

    let mut ends = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < n {
        let ch = chars[i].1;
        match ch {
            '(' | '（' => depth += 1,
            ')' | '）' => depth = depth.saturating_sub(1),
            _ => {}
        }

        if !is_terminator(ch)
            || depth > 0
            || (ch == '.' && (is_decimal_point(&chars, i) || is_abbreviation_dot(&chars, i)))
        {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < n && is_terminator(chars[j].1) {
            j += 1;
        }
        while j < n && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }
        ends.push(offset_of(j));
        i = j;
    }
    ends
}

fn is_decimal_point(chars: &[(usize, char)], i: usize) -> bool {
    let before = i.checked_sub(1).map(|k| chars[k].1);
    let after = chars.get(i + 1).map(|&(_, c)| c);
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

/// Dot inside one of [`ABBREVIATIONS`]. Only ASCII letters, digits and dots
/// form the word, so an abbreviation glued to CJK text is still found. The
/// scan never looks further than the longest abbreviation.
fn is_abbreviation_dot(chars: &[(usize, char)], i: usize) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '.';
    let mut lo = i;
    while lo > 0 && i - lo < MAX_ABBREVIATION_LEN && is_word(chars[lo - 1].1) {
        lo -= 1;
    }
    if lo > 0 && is_word(chars[lo - 1].1) {
        return false;
    }
    let mut hi = i + 1;
    while hi < chars.len() && hi - lo < MAX_ABBREVIATION_LEN && is_word(chars[hi].1) {
        hi += 1;
    }
    if hi < chars.len() && is_word(chars[hi].1) {
        return false;
    }
    let word: String = chars[lo..hi].iter().map(|&(_, c)| c.to_ascii_lowercase()).collect();
    ABBREVIATIONS.contains(&word.as_str())
}

/// Lowercased, whitespace-collapsed sentence without its final punctuation.
/// Identical wording always gives identical output.
pub fn normalize_sentence(sentence: &str) -> String {
    let collapsed = sentence.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    collapsed
        .trim_end_matches(|c: char| is_terminator(c) || CLOSERS.contains(&c))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        split_sentences(source).iter().map(|s| s.text(source)).collect()
    }

    fn rejoin(source: &str) -> String {
        split_sentences(source).iter().map(|s| &source[s.raw.clone()]).collect()
    }

    #[test]
    fn test_three_basic_sentences() {
        assert_eq!(texts("A. B! C?"), vec!["A.", "B!", "C?"]);
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_no_terminator_is_one_sentence() {
        let source = "just some words without an ending";
        let sentences = split_sentences(source);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text(source), source);
        assert_eq!(&source[sentences[0].raw.clone()], source);
        assert!(!sentences[0].complete);
    }

    #[test]
    fn test_rejoin_reconstructs_input() {
        let samples = [
            "A. B! C?",
            "  leading space. trailing space.   ",
            "First line.\nSecond line!\n\nThird",
            "中文句子。还有一句！真的吗？好的",
            "Wait... what?! (yes.) Done",
            "Value is 3.14 in math. Done.",
            "emoji 😀 here. ünïcödé!",
        ];
        for source in samples {
            assert_eq!(rejoin(source), source, "source: {:?}", source);
        }
    }

    #[test]
    fn test_consecutive_terminators_are_one_boundary() {
        assert_eq!(texts("Really?! Yes... ok。。好"), vec!["Really?!", "Yes...", "ok。。", "好"]);
    }

    #[test]
    fn test_chinese_punctuation() {
        let source = "今天写作。很开心！你呢？";
        assert_eq!(texts(source), vec!["今天写作。", "很开心！", "你呢？"]);
        assert!(split_sentences(source).iter().all(|s| s.complete));
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let source = "We test e.g., i.e., and etc. inside a sentence. Next ends here.";
        assert_eq!(sentence_ends(source, 0).len(), 2);
        assert_eq!(texts("Mr. Smith met Dr. Jones. Then left."), vec![
            "Mr. Smith met Dr. Jones.",
            "Then left.",
        ]);
    }

    #[test]
    fn test_abbreviation_needs_whole_word() {
        assert_eq!(texts("We went to Africa. It was hot."), vec!["We went to Africa.", "It was hot."]);
    }

    #[test]
    fn test_abbreviation_next_to_cjk() {
        assert_eq!(texts("例如e.g.苹果很好吃。"), vec!["例如e.g.苹果很好吃。"]);
        assert_eq!(texts("我住在U.S.很久了。真的！"), vec!["我住在U.S.很久了。", "真的！"]);
    }

    #[test]
    fn test_longest_abbreviation_matches_limit() {
        let longest = ABBREVIATIONS.iter().map(|a| a.chars().count()).max();
        assert_eq!(longest, Some(MAX_ABBREVIATION_LEN));
        assert_eq!(texts("He has a Ph.D. now."), vec!["He has a Ph.D. now."]);
    }

    #[test]
    fn test_long_unspaced_text_splits_quickly() {
        let source = "今天写作很开心.".repeat(4000);
        let start = std::time::Instant::now();
        assert_eq!(split_sentences(&source).len(), 4000);
        let dots = "a.".repeat(40_000);
        assert_eq!(split_sentences(&dots).len(), 40_000);
        assert!(start.elapsed() < std::time::Duration::from_secs(2), "took {:?}", start.elapsed());
    }

    #[test]
    fn test_decimal_does_not_split() {
        let source = "Value is 3.14 in math. Done.";
        assert_eq!(sentence_ends(source, 0).len(), 2);
    }

    #[test]
    fn test_parentheses_delay_boundary() {
        let source = "This sentence has dots (ver. 1.2.3 ... ok?) and continues. End.";
        assert_eq!(sentence_ends(source, 0).len(), 2);
    }

    #[test]
    fn test_closing_quote_belongs_to_sentence() {
        let source = "She said \"stop.\" Then “走吧。”他说";
        assert_eq!(texts(source), vec!["She said \"stop.\"", "Then “走吧。”", "他说"]);
    }

    #[test]
    fn test_sentence_ends_from_offset() {
        let source = "One. Two. Three.";
        let from = "One.".len();
        assert_eq!(sentence_ends(source, from), vec!["One. Two.".len(), source.len()]);
    }

    #[test]
    fn test_normalize_sentence() {
        assert_eq!(normalize_sentence("  Hello   World!  "), "hello world");
        assert_eq!(normalize_sentence("你好。”"), "你好");
        assert_eq!(normalize_sentence("..."), "");
    }
}
