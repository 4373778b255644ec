use num::{BigUint, Zero};
use tracing::trace;

use crate::arena::ExprArena;
use crate::error::TacticError;
use crate::guess::guess_degree;
use crate::search::ProofCx;
use crate::types::*;

// Close a trailing numeral goal: arithmetic first, leftover hypotheses
// second, per the bound resolver's contract.
fn close_nat(
  arena: &ExprArena, cx: &impl ProofCx, p: Prop,
) -> Result<Discharge, TacticError> {
  if cx.by_arith(arena, &p) { return Ok(Discharge::Arith) }
  if let Some(h) = cx.by_hypothesis(&p) { return Ok(Discharge::Hyp(h)) }
  Err(TacticError::Unclosable(arena.show_prop(p)))
}

// Last resort for a shape outside the structural rules: the goal as a
// whole may still be a hypothesis. Otherwise surface it to the caller.
fn close_or_fail(
  arena: &ExprArena, cx: &impl ProofCx, goal: Prop, steps: &mut Vec<Step>,
) -> Result<(), TacticError> {
  if let Some(h) = cx.by_hypothesis(&goal) {
    steps.push(Step { fact: Fact::Assumption, prop: goal, by: vec![(goal, Discharge::Hyp(h))] });
    return Ok(())
  }
  Err(TacticError::Residual(arena.show_prop(goal)))
}

// Upper-bound resolver: peel additive structure until every piece is an
// atomic shape with a numeral side goal. Every rule consumes at least one
// node of `e`, so recursion depth and step count are bounded by the node
// count and termination is structural.
pub fn solve_le(
  arena: &mut ExprArena, cx: &impl ProofCx, e: ExprId, d: ExprId,
) -> Result<Vec<Step>, TacticError> {
  let mut steps = vec![];
  go(arena, cx, e, d, &mut steps)?;
  Ok(steps)
}

fn go(
  arena: &mut ExprArena, cx: &impl ProofCx, e: ExprId, d: ExprId, steps: &mut Vec<Step>,
) -> Result<(), TacticError> {
  let goal = Prop::DegreeLe(e, d);
  trace!(goal = %arena.show_prop(goal), "bounding");
  match arena[e] {
    Expr::Add(a, b) => {
      steps.push(Step { fact: Fact::AddLe, prop: goal, by: vec![] });
      go(arena, cx, a, d, steps)?;
      go(arena, cx, b, d, steps)
    }
    Expr::Bit0(f) | Expr::Bit1(f) => {
      // numeral wrapping never raises the degree
      steps.push(Step { fact: Fact::DoubleLe, prop: goal, by: vec![] });
      go(arena, cx, f, d, steps)
    }
    Expr::Mul(a, b) => {
      let (ga, gb) = match (guess_degree(arena, a), guess_degree(arena, b)) {
        (Ok(ga), Ok(gb)) => (ga, gb),
        _ => return close_or_fail(arena, cx, goal, steps),
      };
      let sum = arena.mk_nat(&(ga.clone() + gb.clone()));
      let split = Prop::NatLe(sum, d);
      let dis = close_nat(arena, cx, split)?;
      steps.push(Step { fact: Fact::MulLe, prop: goal, by: vec![(split, dis)] });
      let da = arena.mk_nat(&ga);
      let db = arena.mk_nat(&gb);
      go(arena, cx, a, da, steps)?;
      go(arena, cx, b, db, steps)
    }
    Expr::Zero => {
      steps.push(Step { fact: Fact::ZeroLe, prop: goal, by: vec![] });
      Ok(())
    }
    Expr::One => {
      let zero = arena.mk_zero();
      atomic(arena, cx, Fact::OneLe, goal, Prop::NatLe(zero, d), steps)
    }
    Expr::Const(_) => {
      let zero = arena.mk_zero();
      atomic(arena, cx, Fact::ConstLe, goal, Prop::NatLe(zero, d), steps)
    }
    Expr::Var => {
      let one = arena.mk_one();
      atomic(arena, cx, Fact::VarLe, goal, Prop::NatLe(one, d), steps)
    }
    Expr::Pow(b, n) if arena.is_var(b) =>
      atomic(arena, cx, Fact::PowLe, goal, Prop::NatLe(n, d), steps),
    Expr::Monomial(n, _) =>
      atomic(arena, cx, Fact::MonomialLe, goal, Prop::NatLe(n, d), steps),
    _ => close_or_fail(arena, cx, goal, steps),
  }
}

fn atomic(
  arena: &ExprArena, cx: &impl ProofCx, fact: Fact, goal: Prop, nat: Prop,
  steps: &mut Vec<Step>,
) -> Result<(), TacticError> {
  let dis = close_nat(arena, cx, nat)?;
  steps.push(Step { fact, prop: goal, by: vec![(nat, dis)] });
  Ok(())
}

// Remainder bound used by the orchestrator: every non-leading summand must
// stay strictly below the target.
pub fn bound_rest(
  arena: &mut ExprArena, cx: &impl ProofCx, rest: &[ExprId], target: &BigUint, whole: ExprId,
) -> Result<Vec<Step>, TacticError> {
  if rest.is_empty() { return Ok(vec![]) }
  if target.is_zero() {
    return Err(TacticError::ZeroRemainder(arena.show(whole)))
  }
  let below = arena.mk_nat(&(target.clone() - 1u32));
  let mut steps = vec![];
  for &s in rest {
    steps.extend(solve_le(arena, cx, s, below)?);
  }
  Ok(steps)
}
