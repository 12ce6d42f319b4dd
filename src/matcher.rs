use crate::types::{CharClass, Classification, TranscriptionStatus};

/// Classify the current input snapshot against the canonical verse text.
///
/// The scheme is prefix-based, not positional: the whole input must be an
/// exact prefix of the original to count as in-progress. There is no
/// memory between keystrokes. Deleting back to a valid prefix takes an
/// incorrect attempt back to typing.
pub fn classify(original: &str, input: &str) -> Classification {
    if input.is_empty() {
        return Classification {
            status: TranscriptionStatus::Idle,
            should_persist: false,
            completed: false,
        };
    }

    if input == original {
        return Classification {
            status: TranscriptionStatus::Correct,
            should_persist: true,
            completed: true,
        };
    }

    let status = if original.starts_with(input) {
        TranscriptionStatus::Typing
    } else {
        TranscriptionStatus::Incorrect
    };

    Classification { status, should_persist: true, completed: false }
}

/// Per-character rendering classification. One entry per character of the
/// original text: Pending where the user has not typed that far yet,
/// Match/Mismatch where they have. Input beyond the original's length does
/// not appear here; `classify` already reports it as incorrect.
pub fn char_classes(original: &str, input: &str) -> Vec<CharClass> {
    let typed: Vec<char> = input.chars().collect();

    original
        .chars()
        .enumerate()
        .map(|(i, expected)| match typed.get(i) {
            None => CharClass::Pending,
            Some(&c) if c == expected => CharClass::Match,
            Some(_) => CharClass::Mismatch,
        })
        .collect()
}
