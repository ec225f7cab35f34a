//! Bounded recursive splitter
//!
//! Splits text on the first separator of a priority list that occurs in it,
//! merges the pieces greedily up to `chunk_size` characters, and starts each
//! new chunk with up to `chunk_overlap` characters carried over from the end
//! of the previous one. Pieces that are still too long are split again with
//! the remaining separators; the empty separator splits per character.

use std::collections::VecDeque;

use crate::domain::ingestion::ChunkingConfig;

/// Paragraph break, line break, space, then per character
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// A trimmed chunk located by byte offsets in the text it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    start: usize,
    end: usize,
    chars: usize,
}

impl Piece {
    fn new(text: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            chars: text[start..end].chars().count(),
        }
    }
}

/// Recursive character splitter with overlapping windows
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    config: ChunkingConfig,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            config,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the separator priority list
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `text` into ordered, trimmed, non-empty chunk spans
    pub fn split(&self, text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();

        if !text.is_empty() {
            self.split_range(text, 0, text.len(), &self.separators, &mut spans);
        }

        spans
    }

    /// Same as [`split`](Self::split), returning the chunk texts
    pub fn split_text<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.split(text)
            .into_iter()
            .map(|span| span.as_str(text))
            .collect()
    }

    fn split_range(
        &self,
        text: &str,
        start: usize,
        end: usize,
        separators: &[String],
        spans: &mut Vec<TextSpan>,
    ) {
        let (separator, remaining) = choose_separator(&text[start..end], separators);
        let chunk_size = self.config.chunk_size();

        let mut fitting: Vec<Piece> = Vec::new();

        for piece in pieces(text, start, end, separator) {
            if piece.chars < chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                self.merge(text, &fitting, spans);
                fitting.clear();
            }

            if remaining.is_empty() {
                emit(text, piece.start, piece.end, spans);
            } else {
                self.split_range(text, piece.start, piece.end, remaining, spans);
            }
        }

        if !fitting.is_empty() {
            self.merge(text, &fitting, spans);
        }
    }

    fn merge(&self, text: &str, pieces: &[Piece], spans: &mut Vec<TextSpan>) {
        let chunk_size = self.config.chunk_size();
        let overlap = self.config.chunk_overlap();

        let mut window: VecDeque<Piece> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            if total + piece.chars > chunk_size {
                if let (Some(first), Some(last)) = (window.front(), window.back()) {
                    emit(text, first.start, last.end, spans);
                }

                while total > overlap || (total > 0 && total + piece.chars > chunk_size) {
                    match window.pop_front() {
                        Some(dropped) => total -= dropped.chars,
                        None => break,
                    }
                }
            }

            window.push_back(*piece);
            total += piece.chars;
        }

        if let (Some(first), Some(last)) = (window.front(), window.back()) {
            emit(text, first.start, last.end, spans);
        }
    }
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

/// First separator present in `text`, plus the finer separators after it
fn choose_separator<'s>(text: &str, separators: &'s [String]) -> (&'s str, &'s [String]) {
    for (i, separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return (separator.as_str(), &[]);
        }

        if text.contains(separator.as_str()) {
            return (separator.as_str(), &separators[i + 1..]);
        }
    }

    (separators.last().map(String::as_str).unwrap_or(""), &[])
}

/// Cut `text[start..end]` before every occurrence of `separator`
///
/// The separator stays at the head of the piece that follows it, so the
/// pieces tile the range exactly.
fn pieces(text: &str, start: usize, end: usize, separator: &str) -> Vec<Piece> {
    let slice = &text[start..end];

    if separator.is_empty() {
        return slice
            .char_indices()
            .map(|(i, c)| Piece {
                start: start + i,
                end: start + i + c.len_utf8(),
                chars: 1,
            })
            .collect();
    }

    let mut cuts: Vec<usize> = vec![start];
    cuts.extend(slice.match_indices(separator).map(|(i, _)| start + i));
    cuts.push(end);
    cuts.dedup();

    cuts.windows(2)
        .map(|pair| Piece::new(text, pair[0], pair[1]))
        .collect()
}

/// Push the trimmed span of `text[start..end]`, skipping whitespace-only ranges
fn emit(text: &str, start: usize, end: usize, spans: &mut Vec<TextSpan>) {
    let raw = &text[start..end];
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return;
    }

    let leading = raw.len() - raw.trim_start().len();
    let start = start + leading;

    spans.push(TextSpan {
        start,
        end: start + trimmed.len(),
    });
}
