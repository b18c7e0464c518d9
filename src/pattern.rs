//! Find-pattern compilation and replacement templates
//!
//! Replacement templates use backslash references (`\1`, `\g<name>`), the
//! dialect users of the tool type on the command line. They are translated
//! once into the `${N}` syntax the regex crate expands.

use crate::error::{ReplaceError, Result};
use crate::regex_error::EnhancedRegexError;
use regex::{Captures, Regex, RegexBuilder};

/// Options that change how the find-pattern is compiled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternOptions {
    pub ignore_case: bool,
    pub multiline: bool,
}

/// Compile the find-pattern, failing with a diagnostic on invalid syntax.
pub fn compile_pattern(pattern: &str, options: PatternOptions) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(options.ignore_case)
        .multi_line(options.multiline)
        .build()
        .map_err(|err| {
            let enhanced = EnhancedRegexError::from_regex_error(&err, pattern);
            ReplaceError::InvalidPattern {
                pattern: pattern.to_string(),
                message: enhanced.summary(),
                suggestion: enhanced.suggestion,
            }
        })
}

/// A replacement template, validated against the pattern it will be used with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    template: String,
    expansion: String,
}

impl Replacement {
    /// Translate `template` and check every group it references exists in `regex`.
    pub fn new(template: &str, regex: &Regex) -> Result<Self> {
        let (expansion, refs) = translate_template(template);

        for group in refs {
            let known = match &group {
                GroupRef::Number(n) => *n < regex.captures_len(),
                GroupRef::Name(name) => regex.capture_names().flatten().any(|n| n == name.as_str()),
            };
            if !known {
                return Err(ReplaceError::InvalidPattern {
                    pattern: regex.as_str().to_string(),
                    message: format!("invalid group reference {} in replacement '{}'", group, template),
                    suggestion: Some(group_hint(regex.captures_len() - 1)),
                });
            }
        }

        Ok(Self {
            template: template.to_string(),
            expansion,
        })
    }

    /// The template as the user wrote it
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The template in the regex crate's `$` syntax
    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    /// The text a single match becomes
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut dst = String::new();
        caps.expand(&self.expansion, &mut dst);
        dst
    }

    /// Replace every non-overlapping match in `content`
    pub fn apply(&self, regex: &Regex, content: &str) -> String {
        regex.replace_all(content, self.expansion.as_str()).into_owned()
    }
}

fn group_hint(groups: usize) -> String {
    match groups {
        0 => "The pattern has no capturing groups; only \\0 (the whole match) can be referenced.".to_string(),
        1 => "The pattern has 1 capturing group; refer to it as \\1 or by name with \\g<name>.".to_string(),
        n => format!(
            "The pattern has {} capturing groups; refer to them as \\1..\\{} or by name with \\g<name>.",
            n, n
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupRef {
    Number(usize),
    Name(String),
}

impl std::fmt::Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRef::Number(n) => write!(f, "\\{}", n),
            GroupRef::Name(name) => write!(f, "\\g<{}>", name),
        }
    }
}

/// Convert backslash references to regex crate syntax
///
/// # Conversion Rules
///
/// - `\0`..`\99` → `${0}`..`${99}` (at most two digits are consumed)
/// - `\g<N>` / `\g<name>` → `${N}` / `${name}`
/// - `\\` → `\`
/// - `\n`, `\t`, `\r` → newline, tab, carriage return
/// - `$` → `$$` (literal dollar)
/// - any other `\x` is kept as-is
fn translate_template(template: &str) -> (String, Vec<GroupRef>) {
    let mut result = String::with_capacity(template.len());
    let mut refs = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => result.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    chars.next();
                    let mut number = d.to_string();
                    if let Some(&d2) = chars.peek() {
                        if d2.is_ascii_digit() {
                            chars.next();
                            number.push(d2);
                        }
                    }
                    // two ASCII digits always parse
                    let n: usize = number.parse().unwrap_or(0);
                    result.push_str(&format!("${{{}}}", n));
                    refs.push(GroupRef::Number(n));
                }
                Some('g') => {
                    let rest: String = chars.clone().collect();
                    match parse_named_ref(&rest) {
                        Some((name, consumed)) => {
                            for _ in 0..consumed {
                                chars.next();
                            }
                            result.push_str(&format!("${{{}}}", name));
                            match name.parse::<usize>() {
                                Ok(n) => refs.push(GroupRef::Number(n)),
                                Err(_) => refs.push(GroupRef::Name(name)),
                            }
                        }
                        None => result.push('\\'),
                    }
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                Some('n') => {
                    chars.next();
                    result.push('\n');
                }
                Some('t') => {
                    chars.next();
                    result.push('\t');
                }
                Some('r') => {
                    chars.next();
                    result.push('\r');
                }
                _ => result.push('\\'),
            },
            _ => result.push(c),
        }
    }

    (result, refs)
}

/// Parse `g<name>` at the start of `s`, returning the name and chars consumed
fn parse_named_ref(s: &str) -> Option<(String, usize)> {
    let body = s.strip_prefix("g<")?;
    let end = body.find('>')?;
    let name = &body[..end];
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && (name.chars().all(|c| c.is_ascii_digit())
            || !name.starts_with(|c: char| c.is_ascii_digit()));
    if !valid {
        return None;
    }
    Some((name.to_string(), name.chars().count() + 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(p: &str) -> Regex {
        compile_pattern(p, PatternOptions::default()).unwrap()
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let err = compile_pattern("(foo", PatternOptions::default()).unwrap_err();
        assert!(matches!(err, ReplaceError::InvalidPattern { .. }));
        assert!(err.to_string().contains("'(foo'"));
    }

    #[test]
    fn test_compile_options() {
        let opts = PatternOptions { ignore_case: true, multiline: true };
        let regex = compile_pattern("^foo$", opts).unwrap();
        assert_eq!(regex.find_iter("FOO\nfoo\nbar").count(), 2);
    }

    #[test]
    fn test_translate_backreferences() {
        assert_eq!(translate_template(r"\1").0, "${1}");
        assert_eq!(translate_template(r"\2@\1").0, "${2}@${1}");
        assert_eq!(translate_template(r"\1a").0, "${1}a");
        assert_eq!(translate_template(r"\12").0, "${12}");
        assert_eq!(translate_template(r"\g<name>x").0, "${name}x");
        assert_eq!(translate_template(r"\g<2>0").0, "${2}0");
    }

    #[test]
    fn test_translate_escapes() {
        assert_eq!(translate_template(r"a\\b").0, r"a\b");
        assert_eq!(translate_template(r"a\nb").0, "a\nb");
        assert_eq!(translate_template(r"\t").0, "\t");
        assert_eq!(translate_template(r"\q").0, r"\q");
        assert_eq!(translate_template(r"foo\").0, r"foo\");
        assert_eq!(translate_template(r"\g<bad").0, r"\g<bad");
    }

    #[test]
    fn test_dollar_is_literal() {
        let regex = re("price");
        let replacement = Replacement::new("$5", &regex).unwrap();
        assert_eq!(replacement.apply(&regex, "price: 3"), "$5: 3");
    }

    #[test]
    fn test_swap_groups() {
        let regex = re(r"(\w+)@(\w+)");
        let replacement = Replacement::new(r"\2@\1", &regex).unwrap();
        assert_eq!(replacement.apply(&regex, "user@host"), "host@user");
    }

    #[test]
    fn test_named_group() {
        let regex = re(r"(?P<key>\w+)=(?P<val>\w+)");
        let replacement = Replacement::new(r"\g<val>=\g<key>", &regex).unwrap();
        assert_eq!(replacement.apply(&regex, "a=1 b=2"), "1=a 2=b");
    }

    #[test]
    fn test_whole_match_reference() {
        let regex = re(r"\d+");
        let replacement = Replacement::new(r"[\0]", &regex).unwrap();
        assert_eq!(replacement.apply(&regex, "a 12 b 3"), "a [12] b [3]");
    }

    #[test]
    fn test_unknown_group_rejected() {
        let regex = re(r"(a)");
        assert!(Replacement::new(r"\2", &regex).is_err());
        assert!(Replacement::new(r"\g<missing>", &regex).is_err());
        assert!(Replacement::new(r"\1", &regex).is_ok());
    }

    #[test]
    fn test_group_hint_counts_groups() {
        let suggestion = |pattern: &str, template: &str| match Replacement::new(template, &re(pattern)) {
            Err(ReplaceError::InvalidPattern { suggestion, .. }) => suggestion.unwrap(),
            other => panic!("expected InvalidPattern, got {:?}", other),
        };

        let none = suggestion("foo", r"\1");
        assert!(none.contains("no capturing groups"));
        assert!(!none.contains(r"\1..\1"));
        assert!(suggestion("(a)", r"\2").contains("1 capturing group;"));
        assert!(suggestion("(a)(b)", r"\3").contains(r"\1..\2"));
    }

    #[test]
    fn test_expand_single_match() {
        let regex = re(r"(\w+)@(\w+)");
        let replacement = Replacement::new(r"\2 at \1", &regex).unwrap();
        let caps = regex.captures("me@box").unwrap();
        assert_eq!(replacement.expand(&caps), "box at me");
        assert_eq!(replacement.template(), r"\2 at \1");
    }
}
