//! Resolution of free text or a 1-based index against an ordered list of
//! valid values (cities, property types).
//!
//! Matching is case-insensitive and ignores the acute accents on Spanish
//! vowels. When several candidates match, the first one in list order wins;
//! candidates are not ranked by match quality, so a shorter name contained in
//! a longer one earlier in the list can shadow it.

use thiserror::Error;

/// Maximum number of suggestions attached to a failed lookup.
pub const MAX_SUGGESTIONS: usize = 5;

/// The input matched no candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' does not match any valid {kind}")]
pub struct ResolutionError {
    pub kind: String,
    pub input: String,
    /// Near candidates in list order, at most [`MAX_SUGGESTIONS`].
    pub suggestions: Vec<String>,
}

/// Lower-cases and strips acute accents from the five Spanish vowels.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Resolver over one ordered candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResolver {
    kind: String,
    candidates: Vec<String>,
    normalized: Vec<String>,
}

impl CategoryResolver {
    /// `kind` names the list in errors and logs ("city", "property type").
    pub fn new(kind: impl Into<String>, candidates: Vec<String>) -> Self {
        let normalized = candidates.iter().map(|c| normalize(c)).collect();
        Self {
            kind: kind.into(),
            candidates,
            normalized,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Resolves `input` to exactly one candidate.
    ///
    /// An in-range integer selects by position. Anything else (including an
    /// out-of-range integer) is matched as text.
    pub fn resolve(&self, input: &str) -> Result<&str, ResolutionError> {
        let input = input.trim();

        if let Some(candidate) = self.by_index(input) {
            return Ok(candidate);
        }

        if !input.is_empty() {
            let needle = normalize(input);
            let found = self
                .normalized
                .iter()
                .position(|candidate| *candidate == needle || candidate.contains(&needle));
            if let Some(i) = found {
                return Ok(&self.candidates[i]);
            }
        }

        Err(ResolutionError {
            kind: self.kind.clone(),
            input: input.to_string(),
            suggestions: self.suggestions(input),
        })
    }

    /// Candidates whose lower-cased form contains the lower-cased input, in
    /// list order, capped at [`MAX_SUGGESTIONS`].
    ///
    /// Unlike [`resolve`](Self::resolve) this compares accents as typed.
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.candidates
            .iter()
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    /// Numbered list of the first `limit` candidates, one per line.
    pub fn options_preview(&self, limit: usize) -> String {
        let mut lines: Vec<String> = self
            .candidates
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, candidate)| format!("   {}. {}", i + 1, candidate))
            .collect();
        if self.candidates.len() > limit {
            lines.push(format!("   ... y {} más", self.candidates.len() - limit));
        }
        lines.join("\n")
    }

    fn by_index(&self, input: &str) -> Option<&str> {
        let n: usize = input.parse().ok()?;
        if (1..=self.candidates.len()).contains(&n) {
            Some(&self.candidates[n - 1])
        } else {
            None
        }
    }
}
