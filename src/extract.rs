use bitvec::{bitbox, prelude::BitBox};
use num::BigUint;
use tracing::debug;

use crate::arena::ExprArena;
use crate::error::TacticError;
use crate::guess::guess_degree;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Summand {
  pub expr: ExprId,
  pub degree: BigUint,
}

#[derive(Clone, Debug)]
pub struct Leading {
  pub index: usize,
  pub summands: Vec<Summand>,
}

impl Leading {
  pub fn term(&self) -> &Summand { &self.summands[self.index] }
}

// Flatten the outermost Add-spine, either association, preserving source
// order left to right.
pub fn split_summands(arena: &ExprArena, e: ExprId) -> Vec<ExprId> {
  fn go(arena: &ExprArena, e: ExprId, out: &mut Vec<ExprId>) {
    match arena.try_dest_add(e) {
      Some((a, b)) => { go(arena, a, out); go(arena, b, out) }
      None => out.push(e),
    }
  }
  let mut out = vec![];
  go(arena, e, &mut out);
  out
}

// Guess every summand and select the unique one of maximal degree. A tie
// is a refusal, not a choice: the guesses alone cannot tell which tied
// summand keeps its leading coefficient.
pub fn leading_summand(arena: &ExprArena, e: ExprId) -> Result<Leading, TacticError> {
  let exprs = split_summands(arena, e);
  if exprs.is_empty() { return Err(TacticError::NoSummands) }
  let mut summands = Vec::with_capacity(exprs.len());
  for &s in &exprs {
    summands.push(Summand { expr: s, degree: guess_degree(arena, s)? });
  }
  let mut best = 0;
  for i in 1..summands.len() {
    if summands[i].degree > summands[best].degree { best = i }
  }
  let mut tied: BitBox = bitbox![0; summands.len()];
  for (i, s) in summands.iter().enumerate() {
    if s.degree == summands[best].degree { tied.set(i, true) }
  }
  if tied.count_ones() > 1 {
    let names = summands.iter().enumerate()
      .filter(|&(i, _)| tied[i])
      .map(|(_, s)| arena.show(s.expr))
      .collect::<Vec<_>>()
      .join(", ");
    return Err(TacticError::AmbiguousLeadingTerm(names))
  }
  debug!(
    leading = %arena.show(summands[best].expr),
    degree = %summands[best].degree,
    "selected leading summand"
  );
  Ok(Leading { index: best, summands })
}
