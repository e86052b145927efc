//! Lexical minifier: single-pass comment and whitespace stripping.
//!
//! The scanner never builds a syntax tree. It tracks just enough lexical
//! context (strings, template literals, regex literals, comments) to know
//! which characters are code and which must be copied untouched.

/// Scanner mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Normal,
    /// Inside a `"` or `'` string; holds the opening quote.
    InString(char),
    InTemplate,
    InRegex,
    InLineComment,
    InBlockComment,
    /// Inside a `/*! ... */` comment, which is copied verbatim.
    InLicenseComment,
}

/// Characters after which a `/` opens a regex literal rather than dividing.
const REGEX_PRECEDERS: &[char] = &[
    '(', '{', '[', '=', ':', '+', '-', '!', '*', '&', '|', '?', ',', '<', '>', '^', '~',
];

/// Counters collected during one minify run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinifyStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub comments_removed: usize,
    pub license_comments_kept: usize,
}

impl MinifyStats {
    pub fn saved_bytes(&self) -> usize {
        self.input_bytes.saturating_sub(self.output_bytes)
    }
}

/// Identifier or number character.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

/// Whether `prev` followed directly by the input at `ahead` would read as a
/// different token sequence than `prev <space> ahead`.
fn needs_separator(prev: char, ahead: &[char]) -> bool {
    let Some(&next) = ahead.first() else {
        return false;
    };
    if is_word_char(prev) && is_word_char(next) {
        return true;
    }
    match (prev, next) {
        ('+', '+') | ('-', '-') | ('/', '*') => true,
        // A following `//` or `/*` is removed anyway; `/*!` is kept.
        ('/', '/') => match ahead.get(1) {
            Some('/') => false,
            Some('*') => ahead.get(2) == Some(&'!'),
            _ => true,
        },
        _ => false,
    }
}

/// Minify program text.
pub fn minify(src: &str) -> String {
    minify_with_stats(src).0
}

/// Minify program text and report what was removed.
pub fn minify_with_stats(src: &str) -> (String, MinifyStats) {
    let chars: Vec<char> = src.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(src.len());
    let mut stats = MinifyStats { input_bytes: src.len(), ..MinifyStats::default() };

    let mut state = LexState::Normal;
    let mut escape = false;
    let mut last_significant: Option<char> = None;
    let mut i = 0;

    while i < len {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            LexState::InString(quote) => {
                out.push(ch);
                if escape {
                    escape = false;
                } else if ch == '\\' {
                    escape = true;
                } else if ch == quote {
                    state = LexState::Normal;
                }
                if !is_space(ch) {
                    last_significant = Some(ch);
                }
                i += 1;
            }
            LexState::InTemplate => {
                out.push(ch);
                if escape {
                    escape = false;
                } else if ch == '\\' {
                    escape = true;
                } else if ch == '`' {
                    state = LexState::Normal;
                }
                if !is_space(ch) {
                    last_significant = Some(ch);
                }
                i += 1;
            }
            LexState::InRegex => {
                out.push(ch);
                if escape {
                    escape = false;
                } else if ch == '\\' {
                    escape = true;
                } else if ch == '/' {
                    state = LexState::Normal;
                    last_significant = Some('/');
                }
                i += 1;
            }
            LexState::InLineComment => {
                // The newline itself is left for the whitespace rule.
                if ch == '\n' {
                    state = LexState::Normal;
                } else {
                    i += 1;
                }
            }
            LexState::InBlockComment => {
                if ch == '*' && next == Some('/') {
                    i += 2;
                    state = LexState::Normal;
                    if let Some(prev) = out.chars().last() {
                        if needs_separator(prev, &chars[i..]) {
                            out.push(' ');
                        }
                    }
                } else {
                    i += 1;
                }
            }
            LexState::InLicenseComment => {
                out.push(ch);
                if ch == '*' && next == Some('/') {
                    out.push('/');
                    i += 2;
                    state = LexState::Normal;
                } else {
                    i += 1;
                }
            }
            LexState::Normal => match ch {
                '"' | '\'' => {
                    out.push(ch);
                    last_significant = Some(ch);
                    escape = false;
                    state = LexState::InString(ch);
                    i += 1;
                }
                '`' => {
                    out.push(ch);
                    last_significant = Some(ch);
                    escape = false;
                    state = LexState::InTemplate;
                    i += 1;
                }
                '/' if next == Some('/') => {
                    stats.comments_removed += 1;
                    state = LexState::InLineComment;
                    i += 2;
                }
                '/' if next == Some('*') => {
                    if chars.get(i + 2) == Some(&'!') {
                        stats.license_comments_kept += 1;
                        out.push_str("/*!");
                        state = LexState::InLicenseComment;
                        i += 3;
                    } else {
                        stats.comments_removed += 1;
                        state = LexState::InBlockComment;
                        i += 2;
                    }
                }
                '/' => {
                    let opens_regex = last_significant.map_or(true, |c| REGEX_PRECEDERS.contains(&c));
                    out.push('/');
                    last_significant = Some('/');
                    if opens_regex {
                        escape = false;
                        state = LexState::InRegex;
                    }
                    i += 1;
                }
                c if is_space(c) => {
                    let mut j = i + 1;
                    while j < len && is_space(chars[j]) {
                        j += 1;
                    }
                    if let Some(prev) = out.chars().last() {
                        if needs_separator(prev, &chars[j..]) {
                            out.push(' ');
                        }
                    }
                    i = j;
                }
                c => {
                    out.push(c);
                    last_significant = Some(c);
                    i += 1;
                }
            },
        }
    }

    if state != LexState::Normal {
        tracing::debug!(?state, "input ended inside an unterminated construct");
    }

    stats.output_bytes = out.len();
    (out, stats)
}
