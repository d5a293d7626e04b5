//! Per-unit analysis outcomes

use zoo_core::Diagnostic;

/// Result of running one check against one symbol or node
///
/// A unit that cannot be analysed is `Skipped`; it never aborts the run and
/// never reports a partial diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Reported(Diagnostic),
    Clean,
    Skipped { reason: String },
}

impl UnitOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Reported(diagnostic) => Some(diagnostic),
            Self::Clean | Self::Skipped { .. } => None,
        }
    }

    pub fn into_diagnostic(self) -> Option<Diagnostic> {
        match self {
            Self::Reported(diagnostic) => Some(diagnostic),
            Self::Clean | Self::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
