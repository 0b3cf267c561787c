//! Per-row visibility codec.
//!
//! A row's visibility code is a comma-separated list of 0-based catalog
//! positions, with optional whitespace around each token. The token `-1`
//! is a wildcard meaning "all actions visible" and dominates any other
//! tokens present. An empty code means no actions are visible. Tokens
//! that fail to parse as integers are skipped individually; one bad token
//! never invalidates the rest of the code.

use std::collections::BTreeSet;

/// Which catalog positions a row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Every catalog position is visible.
    Wildcard,
    /// Exactly these catalog positions are visible.
    Positions(BTreeSet<usize>),
}

impl Visibility {
    /// No actions visible.
    pub fn none() -> Self {
        Self::Positions(BTreeSet::new())
    }

    pub fn is_visible(&self, position: usize) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Positions(set) => set.contains(&position),
        }
    }
}

/// Result of decoding one visibility code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub visibility: Visibility,
    /// Tokens that failed integer parsing, in input order.
    pub malformed: Vec<String>,
}

/// Decode a row's visibility code.
///
/// Never fails: malformed tokens are logged, recorded in
/// [`Decoded::malformed`], and skipped.
pub fn decode(code: &str) -> Decoded {
    let mut positions = BTreeSet::new();
    let mut malformed = Vec::new();
    let mut wildcard = false;

    if !code.is_empty() {
        for part in code.split(',') {
            let token = part.trim();
            match token.parse::<i64>() {
                Ok(-1) => wildcard = true,
                // Tokens that parse but can never name a catalog position
                // (negatives other than -1, values past the platform's
                // pointer size) are dropped, not truncated.
                Ok(index) => {
                    if let Ok(position) = usize::try_from(index) {
                        positions.insert(position);
                    }
                }
                Err(_) => {
                    tracing::warn!("can't parse visibility token {token:?}, skipping it");
                    malformed.push(token.to_owned());
                }
            }
        }
    }

    let visibility = if wildcard {
        Visibility::Wildcard
    } else {
        Visibility::Positions(positions)
    };
    Decoded {
        visibility,
        malformed,
    }
}

/// Encode a visibility value back into its wire form.
///
/// Inverse of [`decode`] for well-formed input; malformed tokens are not
/// round-tripped.
pub fn encode(visibility: &Visibility) -> String {
    match visibility {
        Visibility::Wildcard => "-1".to_owned(),
        Visibility::Positions(set) => set
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    }
}
