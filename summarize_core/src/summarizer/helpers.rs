use std::cmp::Reverse;
use std::collections::HashMap;

use open_ai_rust_responses_by_sshift::Model;

use crate::helpers::dto::SummaryStyle;

// Small, cheap model standing in for gpt-4o-mini; override with OPENAI_MODEL.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const MODEL_INPUT_LIMIT: usize = 8000;
pub const MIN_SENTENCE_CHARS: usize = 20;
pub const BULLET_COUNT: usize = 5;
pub const TOP_SENTENCES: usize = 3;
// rough words -> characters conversion
pub const CHARS_PER_WORD: usize = 5;

pub fn build_instructions(style: SummaryStyle, max_length: u32) -> String {
    let prompt = match style {
        SummaryStyle::Concise => "Summarize this in 2-3 sentences:",
        SummaryStyle::Detailed => "Provide a detailed summary with key points:",
        SummaryStyle::Bullets => "Summarize as bullet points:",
    };

    format!("{} Keep it under {} words.", prompt, max_length)
}

pub fn model_from_name(name: &str) -> Option<Model> {
    match name.trim().to_ascii_lowercase().as_str() {
        "gpt-4o" => Some(Model::GPT4o),
        "gpt-4.1" => Some(Model::GPT41),
        "gpt-4.1-mini" => Some(Model::GPT41Mini),
        "gpt-4.1-nano" => Some(Model::GPT41Nano),
        "gpt-5" => Some(Model::GPT5),
        "gpt-5-mini" => Some(Model::GPT5Mini),
        "gpt-5-nano" => Some(Model::GPT5Nano),
        _ => None,
    }
}

pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

pub fn extractive_summary(text: &str, max_length: u32, style: SummaryStyle) -> String {
    let sentences = split_sentences(text);

    if sentences.is_empty() {
        return String::new();
    }

    if style == SummaryStyle::Bullets {
        return sentences
            .iter()
            .take(BULLET_COUNT)
            .map(|sentence| format!("• {}", sentence))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut word_freq: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for word in sentence.split_whitespace() {
            *word_freq.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<(usize, &str)> = sentences
        .iter()
        .map(|sentence| {
            let score = sentence
                .split_whitespace()
                .map(|word| word_freq.get(&word.to_lowercase()).copied().unwrap_or(0))
                .sum();
            (score, *sentence)
        })
        .collect();

    // stable: equal scores keep their original order
    scored.sort_by_key(|(score, _)| Reverse(*score));

    let top: Vec<&str> = scored
        .into_iter()
        .take(TOP_SENTENCES)
        .map(|(_, sentence)| sentence)
        .collect();

    let summary = format!("{}.", top.join(". "));
    let limit = (max_length as usize).saturating_mul(CHARS_PER_WORD);

    truncate_chars(&summary, limit).to_string()
}
