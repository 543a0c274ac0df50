//! Builds the colored layout for the editor.
//!
//! Every complete sentence gets its own base color from the session's
//! [`ColorAssigner`] and a gradient across its characters seeded by its
//! wording. The trailing, still-unfinished sentence and all whitespace keep
//! the theme's text color.

use crate::palette::{gradient, sentence_seed, ColorAssigner};
use crate::sentence::{normalize_sentence, split_sentences, Sentence};
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};

/// Most color steps in one sentence's gradient; longer sentences share each
/// step across several characters.
pub const MAX_GRADIENT_STEPS: usize = 24;

/// Sentences of the last text seen, recomputed only when the text changes.
/// The editor layouter and the status bar both read from it.
#[derive(Debug, Default)]
pub struct SentenceCache {
    text: String,
    sentences: Vec<Sentence>,
}

impl SentenceCache {
    pub fn sentences(&mut self, text: &str) -> &[Sentence] {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
            self.sentences = split_sentences(text);
        }
        &self.sentences
    }
}

pub fn sentence_layout_job(
    text: &str,
    sentences: &[Sentence],
    font: FontId,
    plain: Color32,
    assigner: &ColorAssigner,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    let plain_format = TextFormat::simple(font.clone(), plain);
    let mut cursor = 0;

    for (index, sentence) in sentences.iter().enumerate() {
        if !sentence.complete {
            continue;
        }
        let body = sentence.text(text);
        let normalized = normalize_sentence(body);
        if normalized.is_empty() {
            continue;
        }

        if cursor < sentence.text.start {
            job.append(&text[cursor..sentence.text.start], 0.0, plain_format.clone());
        }

        let len = body.chars().count();
        let steps = len.min(MAX_GRADIENT_STEPS);
        let colors = gradient(assigner.color_for(index), steps, sentence_seed(&normalized));

        // consecutive characters with the same color share a section
        let mut run_start = sentence.text.start;
        let mut run_color = colors[0];
        for (k, (offset, _)) in body.char_indices().enumerate() {
            let color = colors[(k * steps / len).min(colors.len() - 1)];
            let at = sentence.text.start + offset;
            if color != run_color {
                job.append(&text[run_start..at], 0.0, TextFormat::simple(font.clone(), run_color));
                run_start = at;
                run_color = color;
            }
        }
        job.append(
            &text[run_start..sentence.text.end],
            0.0,
            TextFormat::simple(font.clone(), run_color),
        );
        cursor = sentence.text.end;
    }

    if cursor < text.len() {
        job.append(&text[cursor..], 0.0, plain_format);
    }
    job
}

/// Number of sentences that have a terminator.
pub fn complete_sentence_count(sentences: &[Sentence]) -> usize {
    sentences.iter().filter(|s| s.complete).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_for(text: &str) -> LayoutJob {
        let sentences = split_sentences(text);
        sentence_layout_job(
            text,
            &sentences,
            FontId::monospace(14.0),
            Color32::WHITE,
            &ColorAssigner::with_offset(0),
        )
    }

    #[test]
    fn test_job_covers_whole_text() {
        let text = "Hello world. e.g., test inside. Done! still typing";
        let job = job_for(text);
        assert_eq!(job.text, text);
        let covered: usize = job.sections.iter().map(|s| s.byte_range.len()).sum();
        assert_eq!(covered, text.len());
    }

    #[test]
    fn test_unfinished_sentence_stays_plain() {
        let text = "Done. not yet";
        let job = job_for(text);
        let last = job.sections.last().unwrap();
        assert_eq!(&job.text[last.byte_range.clone()], " not yet");
        assert_eq!(last.format.color, Color32::WHITE);
    }

    #[test]
    fn test_complete_sentence_is_colored() {
        let job = job_for("Hi.");
        assert!(!job.sections.is_empty() && job.sections.len() <= 3);
        assert!(job.sections.iter().all(|s| s.format.color != Color32::WHITE));
    }

    #[test]
    fn test_plain_text_single_section() {
        let job = job_for("no ending here");
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.sections[0].format.color, Color32::WHITE);
    }

    #[test]
    fn test_cjk_sections_split_on_char_boundaries() {
        let text = "你好。今天天气很好，我们去公园散步吧！";
        let job = job_for(text);
        for section in &job.sections {
            assert!(text.is_char_boundary(section.byte_range.start));
            assert!(text.is_char_boundary(section.byte_range.end));
        }
        assert_eq!(complete_sentence_count(&split_sentences(text)), 2);
    }

    #[test]
    fn test_long_sentence_has_bounded_sections() {
        let text = format!("{}.", "word ".repeat(500));
        let job = job_for(&text);
        assert!(job.sections.len() <= MAX_GRADIENT_STEPS, "{} sections", job.sections.len());
        let covered: usize = job.sections.iter().map(|s| s.byte_range.len()).sum();
        assert_eq!(covered, text.len());
    }

    #[test]
    fn test_cache_follows_text() {
        let mut cache = SentenceCache::default();
        assert_eq!(cache.sentences("One. Two.").len(), 2);
        assert_eq!(cache.sentences("One. Two.").len(), 2);
        assert_eq!(cache.sentences("One. Two. Three").len(), 3);
        assert!(cache.sentences("").is_empty());
    }
}
