//! Keyword vocabulary and the streaming longest-match keyword matcher.
//!
//! Relevance keywords are multi-word English phrases with shared prefixes:
//! "is", "is not", "is not greater than or equal to" are all distinct
//! keywords. A single-token lookup cannot lex these, so the matcher buffers
//! words as they arrive and narrows a range over the sorted phrase table,
//! remembering the longest complete match seen so far and emitting it only
//! once no longer phrase can still match.
//!
//! ## Notes
//! - [`PHRASES`] must stay sorted lexicographically by phrase, word by word;
//!   the range-narrowing in [`KeywordMatcher::match_words`] depends on
//!   candidates with a common prefix being contiguous. A guardrail test
//!   below enforces this.
//! - Ignored filler words (`a`, `an`, `the`) are dropped before buffering and
//!   never block a match: "Local the Computer" folds to the identifier
//!   "local computer".

use std::collections::VecDeque;

use crate::ast::Span;

use super::tokens::{Token, TokenKind};

/// Filler words, treated like whitespace.
const IGNORED: &[&str] = &["a", "an", "the"];

/// A keyword phrase mapped to its token kind.
pub(crate) struct Phrase {
    pub kind: TokenKind,
    pub words: &'static [&'static str],
}

const fn phrase(kind: TokenKind, words: &'static [&'static str]) -> Phrase {
    Phrase { kind, words }
}

/// The keyword vocabulary, sorted by phrase.
///
/// Several phrases map to one kind (`equals` and `is equal to` are both
/// `Equal`); the inverted `is not …` comparisons map to their complements.
pub(crate) static PHRASES: &[Phrase] = &[
    phrase(TokenKind::And, &["and"]),
    phrase(TokenKind::As, &["as"]),
    phrase(TokenKind::Contains, &["contains"]),
    phrase(TokenKind::NotContains, &["does", "not", "contain"]),
    phrase(TokenKind::NotEndsWith, &["does", "not", "end", "with"]),
    phrase(TokenKind::NotEqual, &["does", "not", "equal"]),
    phrase(TokenKind::NotStartsWith, &["does", "not", "start", "with"]),
    phrase(TokenKind::Else, &["else"]),
    phrase(TokenKind::EndsWith, &["ends", "with"]),
    phrase(TokenKind::Equal, &["equals"]),
    phrase(TokenKind::Exist, &["exist"]),
    phrase(TokenKind::NotExist, &["exist", "no"]),
    phrase(TokenKind::Exist, &["exists"]),
    phrase(TokenKind::NotExist, &["exists", "no"]),
    phrase(TokenKind::If, &["if"]),
    phrase(TokenKind::Is, &["is"]),
    phrase(TokenKind::ContainedBy, &["is", "contained", "by"]),
    phrase(TokenKind::Equal, &["is", "equal", "to"]),
    phrase(TokenKind::Greater, &["is", "greater", "than"]),
    phrase(TokenKind::GreaterEq, &["is", "greater", "than", "or", "equal", "to"]),
    phrase(TokenKind::Less, &["is", "less", "than"]),
    phrase(TokenKind::LessEq, &["is", "less", "than", "or", "equal", "to"]),
    phrase(TokenKind::NotEqual, &["is", "not"]),
    phrase(TokenKind::NotContainedBy, &["is", "not", "contained", "by"]),
    phrase(TokenKind::NotEqual, &["is", "not", "equal", "to"]),
    phrase(TokenKind::LessEq, &["is", "not", "greater", "than"]),
    phrase(TokenKind::Less, &["is", "not", "greater", "than", "or", "equal", "to"]),
    phrase(TokenKind::GreaterEq, &["is", "not", "less", "than"]),
    phrase(TokenKind::Greater, &["is", "not", "less", "than", "or", "equal", "to"]),
    phrase(TokenKind::It, &["it"]),
    phrase(TokenKind::Mod, &["mod"]),
    phrase(TokenKind::Not, &["not"]),
    phrase(TokenKind::Of, &["of"]),
    phrase(TokenKind::Or, &["or"]),
    phrase(TokenKind::StartsWith, &["starts", "with"]),
    phrase(TokenKind::Then, &["then"]),
    phrase(TokenKind::NotExist, &["there", "do", "not", "exist"]),
    phrase(TokenKind::NotExist, &["there", "does", "not", "exist"]),
    phrase(TokenKind::Exist, &["there", "exist"]),
    phrase(TokenKind::NotExist, &["there", "exist", "no"]),
    phrase(TokenKind::Exist, &["there", "exists"]),
    phrase(TokenKind::NotExist, &["there", "exists", "no"]),
    phrase(TokenKind::Whose, &["whose"]),
];

/// A buffered word awaiting matching: original span plus case-folded text.
struct PendingWord {
    span: Span,
    text: String,
}

/// Streaming longest-match state machine over [`PHRASES`].
///
/// Fed word spans by the lexer via [`append`](Self::append) and drained at
/// non-word boundaries via [`flush`](Self::flush); finished identifier and
/// keyword tokens are pushed into a caller-owned queue. The matcher itself
/// never fails, and its buffer is bounded by the longest phrase in the table
/// plus one word.
pub(crate) struct KeywordMatcher<'a> {
    source: &'a str,
    /// Words accepted so far, front first.
    pending: Vec<PendingWord>,
    /// Prefix of `pending` confirmed to extend no keyword; becomes an
    /// identifier when the buffer drains.
    unmatched_len: usize,
    /// Longest complete keyword found during the current attempt.
    matched_len: usize,
    matched_kind: TokenKind,
    /// Words consumed by the current attempt.
    matching_len: usize,
    /// Slice of `PHRASES` whose first `matching_len` words equal the words
    /// consumed so far.
    matching_start: usize,
    matching_end: usize,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pending: Vec::new(),
            unmatched_len: 0,
            matched_len: 0,
            matched_kind: TokenKind::Identifier,
            matching_len: 0,
            matching_start: 0,
            matching_end: PHRASES.len(),
        }
    }

    /// Accept the next word token. Filler words are dropped without touching
    /// any state; everything else is buffered and matched incrementally.
    pub fn append(&mut self, span: Span, out: &mut VecDeque<Token>) {
        let text = self.source[span.start..span.end].to_lowercase();
        if IGNORED.contains(&text.as_str()) {
            return;
        }
        self.pending.push(PendingWord { span, text });
        self.match_words(out);
    }

    /// Drain the buffer at a token boundary: force the in-progress attempt to
    /// resolve, then emit any leftover unmatched prefix as an identifier.
    pub fn flush(&mut self, out: &mut VecDeque<Token>) {
        while self.matching_len != 0 {
            self.fail_match(out);
            self.match_words(out);
        }
        if self.unmatched_len != 0 {
            self.emit_identifier(out);
        }
    }

    /// Consume buffered words beyond the current attempt, narrowing the
    /// phrase-table range one word at a time.
    fn match_words(&mut self, out: &mut VecDeque<Token>) {
        while self.unmatched_len + self.matching_len != self.pending.len() {
            let word = &self.pending[self.unmatched_len + self.matching_len].text;

            self.matching_start = self.find_matching_start(word);
            self.matching_end = self.find_matching_end(word);
            self.matching_len += 1;

            if self.matching_start < self.matching_end {
                let entry = &PHRASES[self.matching_start];

                // The first entry of the narrowed range is the shortest; if
                // its length equals the words consumed, it matches exactly.
                if entry.words.len() == self.matching_len {
                    // A keyword exists here, so the unmatched prefix can never
                    // grow into one: emit it now.
                    if self.unmatched_len != 0 {
                        self.emit_identifier(out);
                    }

                    self.matched_len = self.matching_len;
                    self.matched_kind = entry.kind;

                    // Step past the exact entry and keep narrowing, looking
                    // for a longer phrase with the same prefix.
                    self.matching_start += 1;
                }
            }

            if self.matching_start >= self.matching_end {
                self.fail_match(out);
            }
        }
    }

    /// Resolve a dead-ended attempt: emit the recorded best match if there is
    /// one, otherwise give up on the attempt's first word. Either way the
    /// next attempt starts fresh over the whole table.
    fn fail_match(&mut self, out: &mut VecDeque<Token>) {
        if self.matched_len != 0 {
            self.emit_matched(out);
        } else {
            self.unmatched_len += 1;
        }

        self.matching_start = 0;
        self.matching_end = PHRASES.len();
        self.matching_len = 0;
    }

    /// First table index in the current range whose phrase continues with
    /// `word` at position `matching_len`, or the range end if none does.
    fn find_matching_start(&self, word: &str) -> usize {
        for i in self.matching_start..self.matching_end {
            if PHRASES[i].words.get(self.matching_len).copied() == Some(word) {
                return i;
            }
        }
        self.matching_end
    }

    /// First table index at or after the narrowed start whose phrase does not
    /// continue with `word`, i.e. the exclusive end of the agreeing run.
    fn find_matching_end(&self, word: &str) -> usize {
        for i in self.matching_start..self.matching_end {
            if PHRASES[i].words.get(self.matching_len).copied() != Some(word) {
                return i;
            }
        }
        self.matching_end
    }

    /// Emit the unmatched prefix as one identifier: folded words joined by
    /// single spaces, spanning first word start to last word end. Assumes
    /// `unmatched_len > 0`.
    fn emit_identifier(&mut self, out: &mut VecDeque<Token>) {
        let words: Vec<PendingWord> = self.pending.drain(..self.unmatched_len).collect();
        self.unmatched_len = 0;

        let value = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let span = Span::new(words[0].span.start, words[words.len() - 1].span.end);
        out.push_back(Token::with_value(TokenKind::Identifier, span, value));
    }

    /// Emit the recorded best match as a keyword token spanning the words it
    /// consumed. Assumes `matched_len > 0`.
    fn emit_matched(&mut self, out: &mut VecDeque<Token>) {
        let words: Vec<PendingWord> = self.pending.drain(..self.matched_len).collect();
        self.matched_len = 0;

        let span = Span::new(words[0].span.start, words[words.len() - 1].span.end);
        out.push_back(Token::new(self.matched_kind, span));
    }
}
