//! Splits an argument string into a preamble and prefixed values.
//!
//! `1 u/Jane Doe s/2023-01-01` with prefixes `u/` and `s/` yields the
//! preamble `1` and values `Jane Doe` and `2023-01-01`. A prefix only counts
//! at the start of the string or right after whitespace, so `and/or` inside a
//! description is left alone.

/// Argument prefixes understood by the command parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Name,
    Quantity,
    Description,
    Borrower,
    Start,
    End,
}

impl Prefix {
    pub fn token(self) -> &'static str {
        match self {
            Prefix::Name => "n/",
            Prefix::Quantity => "q/",
            Prefix::Description => "d/",
            Prefix::Borrower => "u/",
            Prefix::Start => "s/",
            Prefix::End => "e/",
        }
    }
}

/// Tokenized arguments. Later occurrences of a prefix win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: Vec<(Prefix, String)>,
}

impl ArgumentMap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, prefix: Prefix) -> bool {
        self.value(prefix).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.values.is_empty()
    }
}

pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for &prefix in prefixes {
        let token = prefix.token();
        for (at, _) in args.match_indices(token) {
            if starts_token(args, at) {
                positions.push((at, prefix));
            }
        }
    }
    positions.sort_by_key(|(at, _)| *at);

    let preamble_end = positions.first().map_or(args.len(), |(at, _)| *at);
    let mut map = ArgumentMap {
        preamble: args[..preamble_end].trim().to_string(),
        values: Vec::with_capacity(positions.len()),
    };

    for (i, &(at, prefix)) in positions.iter().enumerate() {
        let start = at + prefix.token().len();
        let end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        map.values.push((prefix, args[start..end].trim().to_string()));
    }

    map
}

fn starts_token(args: &str, at: usize) -> bool {
    args[..at]
        .chars()
        .next_back()
        .is_none_or(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Prefix] = &[
        Prefix::Name,
        Prefix::Quantity,
        Prefix::Description,
        Prefix::Borrower,
        Prefix::Start,
        Prefix::End,
    ];

    #[test]
    fn splits_preamble_and_values() {
        let map = tokenize("2 u/Jane Doe s/2023-01-01 e/2023-01-05", ALL);
        assert_eq!(map.preamble(), "2");
        assert_eq!(map.value(Prefix::Borrower), Some("Jane Doe"));
        assert_eq!(map.value(Prefix::Start), Some("2023-01-01"));
        assert_eq!(map.value(Prefix::End), Some("2023-01-05"));
        assert!(!map.has(Prefix::Name));
    }

    #[test]
    fn prefix_inside_a_word_is_not_split() {
        let map = tokenize("n/lens d/works on/off q/2", ALL);
        assert_eq!(map.value(Prefix::Description), Some("works on/off"));
        assert_eq!(map.value(Prefix::Quantity), Some("2"));
    }

    #[test]
    fn only_requested_prefixes_are_recognized() {
        let map = tokenize("n/cable d/usb q/3", &[Prefix::Name]);
        assert_eq!(map.value(Prefix::Name), Some("cable d/usb q/3"));
    }

    #[test]
    fn last_occurrence_wins() {
        let map = tokenize("n/a n/b", ALL);
        assert_eq!(map.value(Prefix::Name), Some("b"));
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(tokenize("   ", ALL).is_empty());
    }
}
