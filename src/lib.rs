pub mod types;
pub mod arena;
pub mod print;
pub mod error;
pub mod search;
pub mod guess;
pub mod extract;
pub mod resolve;
pub mod bound;
pub mod tactic;

pub use arena::ExprArena;
pub use error::TacticError;
pub use print::Print;
pub use search::{LocalCx, ProofCx};
pub use tactic::{compute_degree, compute_degree_le, inspect_goal};
pub use types::{
  DegreeGoal, Discharge, Expr, ExprId, Fact, HypId, Prop, Script, Step,
};
