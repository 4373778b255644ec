use thiserror::Error;

// Hard failures, always terminal for the invocation. Soft "rule does not
// apply" outcomes are `Option`s at the call sites, never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TacticError {
  #[error("unrecognized shape: {0}")]
  UnrecognizedShape(String),
  #[error("exponent is not a closed natural number: {0}")]
  ExponentNotClosed(String),
  #[error("target degree is not a closed natural number: {0}")]
  TargetNotClosed(String),
  #[error("ambiguous leading term, tied candidates: {0}")]
  AmbiguousLeadingTerm(String),
  #[error("stated degree is {stated}; should the degree be {computed}?")]
  DegreeMismatch { stated: String, computed: String },
  #[error("leading term {0} does not match any degree rule; rewrite it as C a * X ^ n, C a * X, monomial n a, C a, X ^ n, or X")]
  LeadingShape(String),
  #[error("cannot close side obligation {0}; add it as a hypothesis")]
  Unclosable(String),
  #[error("goal is not of the form degree(e) = d or degree(e) <= d")]
  GoalShape,
  #[error("no summands: something is structurally wrong")]
  NoSummands,
  #[error("hint {0} does not match any summand")]
  HintNoMatch(String),
  #[error("hint matches more than one summand: {0}")]
  HintAmbiguous(String),
  #[error("leading term has degree 0 but the sum has further summands: {0}")]
  ZeroRemainder(String),
  #[error("cannot make progress on {0}; prove it manually")]
  Residual(String),
}
