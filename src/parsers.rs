//! Recovery parsers for structured data embedded in free-form model output.
//!
//! Models asked for "valid JSON" routinely wrap their answer in a Markdown
//! code fence. The entry point here is [`parse_json`]: strict parse first,
//! then a single fenced-block extraction attempt, re-raising the original
//! syntax error if recovery fails too.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// A code block extracted from Markdown-ish text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCodeBlock {
    /// Language tag on the opening fence, if present.
    pub language: Option<String>,
    /// Verbatim content between the fences. When no fence is found this is
    /// the input unchanged, so re-parsing it reproduces the original failure.
    pub content: String,
}

/// Extracts the first fenced code block from the input.
///
/// A fence is a run of 3+ identical backticks or tildes, optionally followed
/// by a language tag, then a newline; the block closes at the next run of the
/// same character and length. Content is captured verbatim (no trimming).
/// Without a match the input itself is returned as the content.
pub fn extract_code_block(input: &str) -> ExtractedCodeBlock {
    find_fenced_block(input).unwrap_or_else(|| ExtractedCodeBlock {
        language: None,
        content: input.to_string(),
    })
}

/// Scans for the first fenced block. Stateless: every call starts fresh.
fn find_fenced_block(input: &str) -> Option<ExtractedCodeBlock> {
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let fence_char = bytes[i];
        if fence_char != b'`' && fence_char != b'~' {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < bytes.len() && bytes[end] == fence_char {
            end += 1;
        }
        let run = end - start;
        if run < 3 {
            i = end;
            continue;
        }

        // Optional language tag directly after the fence, then a newline.
        let mut tag_end = end;
        while tag_end < bytes.len()
            && (bytes[tag_end].is_ascii_alphanumeric() || bytes[tag_end] == b'_')
        {
            tag_end += 1;
        }

        if tag_end < bytes.len() && bytes[tag_end] == b'\n' {
            let content_start = tag_end + 1;
            let fence = &input[start..end];
            if let Some(close) = input[content_start..].find(fence) {
                let language = if tag_end > end {
                    Some(input[end..tag_end].to_string())
                } else {
                    None
                };
                return Some(ExtractedCodeBlock {
                    language,
                    content: input[content_start..content_start + close].to_string(),
                });
            }
        }

        // A shorter run starting one character later may still open a block
        // (e.g. a 4-backtick opener closed by 3 backticks).
        i = start + 1;
    }

    None
}

/// Returns true if the parse failure is a syntax-class error, i.e. the kind
/// fenced-block recovery may fix. Type mismatches and IO failures are not.
pub fn is_syntax_error(error: &serde_json::Error) -> bool {
    matches!(error.classify(), Category::Syntax | Category::Eof)
}

/// Parses JSON from model output, recovering from a Markdown code fence.
///
/// The input is trimmed and parsed strictly. On a syntax failure the first
/// fenced block is extracted and parsed instead; if that fails as well, the
/// *original* error is returned so callers see a consistent failure signal.
/// Non-syntax failures propagate immediately without a recovery attempt.
pub fn parse_json<T: DeserializeOwned>(input: &str) -> serde_json::Result<T> {
    let trimmed = input.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(error) if is_syntax_error(&error) => {
            let block = extract_code_block(trimmed);
            serde_json::from_str(&block.content).map_err(|_| error)
        }
        Err(error) => Err(error),
    }
}
