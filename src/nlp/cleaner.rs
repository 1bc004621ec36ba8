//! Boilerplate removal for extracted document text
//!
//! PDF extraction leaves running headers, footers, DOI strings and page
//! numbers scattered through the text. Lines are compared by a normalized
//! fingerprint so that "Page 3 of 10" and "Page 4 of 10" count as the same
//! repeated line.
//!
//! Cleaning is deterministic and idempotent: `clean_text(clean_text(x)) ==
//! clean_text(x)`.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Lines whose fingerprint recurs at least this often are candidates for removal.
const REPEATED_MIN_COUNT: usize = 3;
/// ...if their fingerprint is shorter than this.
const REPEATED_MAX_LEN: usize = 90;
/// Boilerplate-keyword lines are dropped when they repeat at all...
const BOILERPLATE_MIN_COUNT: usize = 2;
/// ...or are shorter than this.
const BOILERPLATE_MAX_LEN: usize = 140;
/// Lines without letters shorter than this are dropped.
const NON_ALPHA_MAX_LEN: usize = 80;

struct Patterns {
    scrubs: Vec<Regex>,
    spaces: Regex,
    blank_lines: Regex,
    url: Regex,
    digits: Regex,
    non_alnum: Regex,
    whitespace: Regex,
    boilerplate: Regex,
    page_number: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let scrubs = [
            r"(?i)https?://doi\.org/\S+",
            r"(?i)\b10\.\d{4,9}/[-._;()/:A-Z0-9]+\b",
            r"(?i)\b\d{4}/s\d{5}-\d{3}-\d{5}-\d\b",
            r"(?i)\bs\d{5}-\d{3}-\d{5}-\d\b",
            r"(?i)\bwww\.nature\.com/scientificreports\b",
            r"(?i)\bscientific\s+reports\b",
            r"(?im)\bwww\.(?:[ \t]+|$)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid scrub regex"))
        .collect();

        Patterns {
            scrubs,
            spaces: Regex::new(r"[ ]{2,}").expect("valid regex"),
            blank_lines: Regex::new(r"\n{3,}").expect("valid regex"),
            url: Regex::new(r"https?://\S+").expect("valid regex"),
            digits: Regex::new(r"\b\d+\b").expect("valid regex"),
            non_alnum: Regex::new(r"[^a-z0-9\s]").expect("valid regex"),
            whitespace: Regex::new(r"\s+").expect("valid regex"),
            boilerplate: Regex::new(
                r"\bhttps?://doi\b|\bdoi\b|discover oncology|springer|open access|copyright|©|received:|accepted:|issn\b|\bvol\.?\b|\btable\s+\d+\b|\bfigure\s+\d+\b",
            )
            .expect("valid boilerplate regex"),
            page_number: Regex::new(r"^\(?\d{8,}\)?$").expect("valid regex"),
        }
    })
}

/// Clean raw extracted text.
///
/// Never fails; empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    TextCleaner::new().clean(text)
}

/// Line-fingerprint boilerplate remover
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Run the full cleaning pass over `text`
    ///
    /// Dropping a line can bring inline boilerplate split across it back
    /// together, so the line pass repeats until the output is stable.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut current = normalize_whitespace(text);
        loop {
            let next = self.clean_lines(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// One scrub, filter and join pass. Output is never longer than input.
    fn clean_lines(&self, text: &str) -> String {
        let scrubbed = self.scrub(text);

        let lines: Vec<&str> = scrubbed
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let keys: Vec<String> = lines.iter().map(|l| fingerprint(l)).collect();

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for key in keys.iter().filter(|k| !k.is_empty()) {
            *counts.entry(key.as_str()).or_insert(0) += 1;
        }

        let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
        let mut last_key = "";
        for (line, key) in lines.iter().zip(&keys) {
            if key.is_empty() {
                continue;
            }
            let count = counts.get(key.as_str()).copied().unwrap_or(0);
            if is_header_footer(line, key, count) || key == last_key {
                continue;
            }
            kept.push(line);
            last_key = key;
        }

        let p = patterns();
        let joined = kept.join("\n");
        let joined = p.blank_lines.replace_all(&joined, "\n\n");
        let joined = p.spaces.replace_all(&joined, " ");
        joined.trim().to_string()
    }

    /// Strip inline boilerplate (DOIs, article ids, journal banners).
    ///
    /// Removing one match can expose another, so this repeats until nothing
    /// changes. Every productive round shortens the text.
    fn scrub(&self, text: &str) -> String {
        let p = patterns();
        let mut current = text.to_string();
        loop {
            let mut next = current.clone();
            for re in &p.scrubs {
                next = re.replace_all(&next, " ").into_owned();
            }
            let next = p.spaces.replace_all(&next, " ").into_owned();
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

/// Map non-breaking spaces and tabs to spaces, line endings to `\n`, and
/// collapse space runs.
fn normalize_whitespace(text: &str) -> String {
    let normalized = text
        .replace('\u{00a0}', " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', " ");
    patterns().spaces.replace_all(&normalized, " ").into_owned()
}

/// Normalized line identity: lowercase, no URLs, no standalone numbers, no
/// punctuation, single spaces.
pub fn fingerprint(line: &str) -> String {
    let p = patterns();
    let s = line.to_lowercase();
    let s = p.url.replace_all(&s, " ");
    let s = p.digits.replace_all(&s, " ");
    let s = p.non_alnum.replace_all(&s, " ");
    let s = p.whitespace.replace_all(&s, " ");
    s.trim().to_string()
}

fn is_header_footer(line: &str, key: &str, count: usize) -> bool {
    let p = patterns();
    let key_len = key.chars().count();

    if count >= REPEATED_MIN_COUNT && key_len < REPEATED_MAX_LEN {
        return true;
    }

    let lower = line.to_lowercase();
    if p.boilerplate.is_match(&lower)
        && (count >= BOILERPLATE_MIN_COUNT || key_len < BOILERPLATE_MAX_LEN)
    {
        return true;
    }

    // Page-number-like digit runs
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if p.page_number.is_match(&compact) {
        return true;
    }

    let has_alpha = lower.chars().any(|c| c.is_ascii_lowercase());
    !has_alpha && line.chars().count() < NON_ALPHA_MAX_LEN
}
