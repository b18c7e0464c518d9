//! Regex Error Handling
//!
//! Turns a `regex::Error` into a diagnostic that names the problem and
//! suggests a fix, so a bad pattern can be corrected before any file is read.

use regex::Error as RegexError;

/// Enhanced regex error with helpful context
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedRegexError {
    /// The original pattern that failed to compile
    pub pattern: String,
    /// The type of error that occurred
    pub error_type: RegexErrorType,
    /// Suggested fix for the error
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegexErrorType {
    /// Unclosed group/bracket/brace
    UnclosedDelimiter {
        delimiter: char, // '(', '[', '{'
        position: usize,
    },
    /// Invalid quantifier (nothing to repeat, bad range, ...)
    InvalidQuantifier { message: String },
    /// Unrecognized escape sequence
    InvalidEscape { message: String },
    /// Look-ahead / look-behind, which the regex crate does not support
    Lookaround,
    /// Backreference inside the pattern, which the regex crate does not support
    Backreference,
    /// Compiled pattern exceeds the engine's size limit
    TooLarge { message: String },
    /// Anything else
    Syntax { message: String },
}

impl EnhancedRegexError {
    pub fn from_regex_error(err: &RegexError, pattern: &str) -> Self {
        let error_msg = match err {
            RegexError::Syntax(msg) => last_error_line(msg),
            RegexError::CompiledTooBig(limit) => {
                let error_type = RegexErrorType::TooLarge {
                    message: format!("compiled regex exceeds size limit of {} bytes", limit),
                };
                return EnhancedRegexError {
                    pattern: pattern.to_string(),
                    suggestion: Self::generate_suggestion(&error_type),
                    error_type,
                };
            }
            other => other.to_string(),
        };

        let error_type = Self::classify_error(&error_msg, pattern);
        let suggestion = Self::generate_suggestion(&error_type);

        EnhancedRegexError {
            pattern: pattern.to_string(),
            error_type,
            suggestion,
        }
    }

    fn classify_error(error_msg: &str, pattern: &str) -> RegexErrorType {
        let lower_msg = error_msg.to_lowercase();

        if lower_msg.contains("unclosed") {
            let (open, close) = if lower_msg.contains("character class") {
                ('[', ']')
            } else if lower_msg.contains("counted repetition") || lower_msg.contains("brace") {
                ('{', '}')
            } else {
                ('(', ')')
            };
            if let Some(position) = find_unclosed_delimiter(pattern, open, close) {
                return RegexErrorType::UnclosedDelimiter {
                    delimiter: open,
                    position,
                };
            }
        }

        if lower_msg.contains("look-around") || lower_msg.contains("lookaround") {
            return RegexErrorType::Lookaround;
        }

        if lower_msg.contains("backreference") {
            return RegexErrorType::Backreference;
        }

        if lower_msg.contains("repetition") || lower_msg.contains("quantifier") {
            return RegexErrorType::InvalidQuantifier {
                message: error_msg.to_string(),
            };
        }

        if lower_msg.contains("escape") {
            return RegexErrorType::InvalidEscape {
                message: error_msg.to_string(),
            };
        }

        RegexErrorType::Syntax {
            message: error_msg.to_string(),
        }
    }

    fn generate_suggestion(error_type: &RegexErrorType) -> Option<String> {
        match error_type {
            RegexErrorType::UnclosedDelimiter { delimiter, position } => {
                let closer = match delimiter {
                    '(' => ')',
                    '[' => ']',
                    '{' => '}',
                    _ => return None,
                };
                Some(format!(
                    "Add a closing '{}' to match the opening '{}' at position {}, or escape it as '\\{}' for a literal.",
                    closer, delimiter, position, delimiter
                ))
            }
            RegexErrorType::InvalidQuantifier { message } => {
                if message.contains("missing") {
                    Some("A quantifier (*, +, ?, {n}) has nothing to repeat. \
                        Place it after a character or group, e.g. 'a*', '(foo)+', 'bar{3}'."
                        .to_string())
                } else {
                    Some("Quantifier ranges must be '{n}', '{n,}' or '{n,m}' with n <= m.".to_string())
                }
            }
            RegexErrorType::InvalidEscape { .. } => Some(
                "Common escapes are \\d \\w \\s \\b \\n \\t \\xHH \\u{HHHH}. \
                 Escape punctuation with a backslash to match it literally."
                    .to_string(),
            ),
            RegexErrorType::Lookaround => Some(
                "Look-ahead and look-behind are not supported. \
                 Capture the surrounding text in a group and put it back with \\1 in the replacement."
                    .to_string(),
            ),
            RegexErrorType::Backreference => Some(
                "Backreferences such as \\1 are only allowed in the replacement text, not in the pattern."
                    .to_string(),
            ),
            RegexErrorType::TooLarge { .. } => {
                Some("Simplify the pattern or reduce large counted repetitions.".to_string())
            }
            RegexErrorType::Syntax { .. } => Some(
                "Escape special characters . + * ? ^ $ | ( ) [ ] { } \\ to match them literally.".to_string(),
            ),
        }
    }

    /// Short one-line description, used after "Invalid regular expression pattern".
    pub fn summary(&self) -> String {
        match &self.error_type {
            RegexErrorType::UnclosedDelimiter { delimiter, position } => {
                format!("unclosed '{}' at position {}", delimiter, position)
            }
            RegexErrorType::InvalidQuantifier { message }
            | RegexErrorType::InvalidEscape { message }
            | RegexErrorType::TooLarge { message }
            | RegexErrorType::Syntax { message } => message.clone(),
            RegexErrorType::Lookaround => "look-around is not supported".to_string(),
            RegexErrorType::Backreference => "backreferences are not supported in patterns".to_string(),
        }
    }
}

/// The regex crate renders syntax errors as a caret diagram followed by an
/// `error: ...` line; only that last line is useful on one line.
fn last_error_line(msg: &str) -> String {
    msg.lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("error:"))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| msg.trim().to_string())
}

/// Position (in chars) of the last unmatched opening delimiter
fn find_unclosed_delimiter(pattern: &str, open: char, close: char) -> Option<usize> {
    let mut stack = Vec::new();
    let mut in_char_class = false;
    let mut escaped = false;

    for (i, c) in pattern.chars().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if open != '[' {
            if c == '[' {
                in_char_class = true;
            } else if c == ']' {
                in_char_class = false;
            }
            if in_char_class {
                continue;
            }
        }
        if c == open {
            stack.push(i);
        } else if c == close {
            stack.pop();
        }
    }

    stack.pop()
}
