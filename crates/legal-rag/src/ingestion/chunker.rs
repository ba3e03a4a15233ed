//! Recursive, boundary-preferring text chunking with overlap

use std::collections::VecDeque;

use crate::config::ChunkingConfig;

/// Split points, tried in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Blank line (`\n\n`)
    Paragraph,
    /// Line break
    Line,
    /// `.`, `!` or `?` followed by whitespace
    Sentence,
    /// Space between words
    Word,
    /// Hard cut between characters
    Character,
}

impl Boundary {
    /// Default priority order
    pub const PRIORITY: [Boundary; 5] = [
        Boundary::Paragraph,
        Boundary::Line,
        Boundary::Sentence,
        Boundary::Word,
        Boundary::Character,
    ];

    fn is_present(self, text: &str) -> bool {
        match self {
            Boundary::Paragraph => text.contains("\n\n"),
            Boundary::Line => text.contains('\n'),
            Boundary::Sentence => !sentence_cuts(text).is_empty(),
            Boundary::Word => text.contains(' '),
            Boundary::Character => true,
        }
    }

    /// Split into contiguous pieces. Each separator stays at the end of the
    /// piece it terminates, so the pieces concatenate back to `text`.
    fn split(self, text: &str) -> Vec<&str> {
        match self {
            Boundary::Paragraph => text.split_inclusive("\n\n").collect(),
            Boundary::Line => text.split_inclusive('\n').collect(),
            Boundary::Word => text.split_inclusive(' ').collect(),
            Boundary::Sentence => {
                let mut pieces = Vec::new();
                let mut start = 0;
                for cut in sentence_cuts(text) {
                    pieces.push(&text[start..cut]);
                    start = cut;
                }
                if start < text.len() {
                    pieces.push(&text[start..]);
                }
                pieces
            }
            Boundary::Character => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
        }
    }
}

/// Byte offsets just past each sentence terminator and its trailing whitespace char
fn sentence_cuts(text: &str) -> Vec<usize> {
    let mut cuts = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(i, next)) = chars.peek() {
            if next.is_whitespace() {
                cuts.push(i + next.len_utf8());
                chars.next();
            }
        }
    }

    cuts
}

const NO_BOUNDARIES: &[Boundary] = &[];

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Text chunker with configurable size and overlap, both in characters
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size
    chunk_size: usize,
    /// Overlap carried from one chunk into the next
    overlap: usize,
    /// Boundary kinds in priority order
    boundaries: Vec<Boundary>,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            boundaries: Boundary::PRIORITY.to_vec(),
        }
    }

    /// Create from chunking configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split text into trimmed, non-empty chunks of at most `chunk_size`
    /// characters. Pure function of the input: same text, same chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        self.split_recursive(text, &self.boundaries, &mut chunks);
        chunks
    }

    fn split_recursive(&self, text: &str, boundaries: &[Boundary], out: &mut Vec<String>) {
        // First boundary kind present in this text wins; finer kinds are kept
        // for pieces that are still too long.
        let (boundary, finer) = boundaries
            .iter()
            .enumerate()
            .find(|(_, b)| b.is_present(text))
            .map(|(i, b)| (*b, &boundaries[i + 1..]))
            .unwrap_or((Boundary::Character, NO_BOUNDARIES));

        let mut fitting: Vec<&str> = Vec::new();

        for piece in boundary.split(text) {
            if char_len(piece) < self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                self.merge_pieces(&fitting, out);
                fitting.clear();
            }

            if finer.is_empty() {
                push_trimmed(piece.to_string(), out);
            } else {
                self.split_recursive(piece, finer, out);
            }
        }

        if !fitting.is_empty() {
            self.merge_pieces(&fitting, out);
        }
    }

    /// Greedily pack pieces into chunks. After a chunk is emitted, pieces
    /// are dropped from its front until at most `overlap` characters remain;
    /// those seed the next chunk.
    fn merge_pieces(&self, pieces: &[&str], out: &mut Vec<String>) {
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                push_trimmed(join_window(&window), out);

                while total > self.overlap || (total > 0 && total + len > self.chunk_size) {
                    match window.pop_front() {
                        Some((_, front_len)) => total -= front_len,
                        None => break,
                    }
                }
            }

            window.push_back((piece, len));
            total += len;
        }

        push_trimmed(join_window(&window), out);
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::from_config(&ChunkingConfig::default())
    }
}

fn join_window(window: &VecDeque<(&str, usize)>) -> String {
    window.iter().map(|(piece, _)| *piece).collect()
}

fn push_trimmed(chunk: String, out: &mut Vec<String>) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
