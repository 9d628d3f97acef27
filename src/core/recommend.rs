//! Advisory recommendations from three survey scores

use serde::{Serialize, Serializer};
use std::fmt;

/// AI index above which reliance on AI tools is flagged.
pub const AI_RELIANCE_THRESHOLD: f64 = 6.0;
/// Motivation score below which motivation is flagged.
pub const LOW_MOTIVATION_THRESHOLD: f64 = 4.0;
/// Environment score above which peer reliance is flagged.
pub const PEER_RELIANCE_THRESHOLD: f64 = 5.0;

/// One advisory line. Variants are declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Advisory {
    /// AI index above [`AI_RELIANCE_THRESHOLD`]
    HighAiReliance,
    /// Motivation below [`LOW_MOTIVATION_THRESHOLD`]
    LowMotivation,
    /// Environment above [`PEER_RELIANCE_THRESHOLD`]
    StrongPeerReliance,
    /// Emitted alone when no other rule fires
    NoImmediateConcerns,
}

impl Advisory {
    /// Advisory text shown to staff
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::HighAiReliance => "High AI reliance detected - recommend writing workshops and guided assignments to rebuild skill.",
            Self::LowMotivation => "Low autonomous motivation - consider autonomy-supportive tasks and formative feedback.",
            Self::StrongPeerReliance => "Strong peer reliance - promote collaborative but independent tasks; monitor group dependency.",
            Self::NoImmediateConcerns => "No immediate concerns; encourage balanced AI use for scaffolding only.",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Advisory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// Evaluate every rule independently and return the advisories that fire.
///
/// The result is never empty: with no matches it holds exactly
/// [`Advisory::NoImmediateConcerns`].
#[must_use]
pub fn recommend(ai_index: f64, motivation: f64, environment: f64) -> Vec<Advisory> {
    let mut advisories = Vec::with_capacity(3);
    if ai_index > AI_RELIANCE_THRESHOLD {
        advisories.push(Advisory::HighAiReliance);
    }
    if motivation < LOW_MOTIVATION_THRESHOLD {
        advisories.push(Advisory::LowMotivation);
    }
    if environment > PEER_RELIANCE_THRESHOLD {
        advisories.push(Advisory::StrongPeerReliance);
    }
    if advisories.is_empty() {
        advisories.push(Advisory::NoImmediateConcerns);
    }
    advisories
}
