use std::fmt;

/// Canonical identity of a match, derived from normalized team names.
///
/// Two records refer to the same match iff their trimmed, lower-cased
/// `(home, away)` pairs are identical. Home/away order is significant:
/// `(A, B)` and `(B, A)` are different fixtures. No alias resolution is
/// attempted beyond case and whitespace folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    home: String,
    away: String,
}

impl MatchKey {
    /// Resolve a key from raw team names.
    ///
    /// Rejects records where either name is empty after trimming, so
    /// unidentified records never pool together under an empty key.
    pub fn resolve(home: &str, away: &str) -> Result<Self, String> {
        let home = home.trim().to_lowercase();
        let away = away.trim().to_lowercase();
        if home.is_empty() || away.is_empty() {
            return Err("match key needs both team names".to_string());
        }
        Ok(MatchKey { home, away })
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn away(&self) -> &str {
        &self.away
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.home, self.away)
    }
}
