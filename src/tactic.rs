use tracing::debug;

use crate::arena::ExprArena;
use crate::bound::{bound_rest, solve_le};
use crate::error::TacticError;
use crate::extract::{leading_summand, split_summands};
use crate::resolve::resolve_exact;
use crate::search::ProofCx;
use crate::types::*;

pub fn inspect_goal(p: Prop) -> Result<DegreeGoal, TacticError> {
  match p {
    Prop::DegreeEq(e, d) => Ok(DegreeGoal::Eq(e, d)),
    Prop::DegreeLe(e, d) => Ok(DegreeGoal::Le(e, d)),
    _ => Err(TacticError::GoalShape),
  }
}

// Top-level entry. Exact goals go through leading-term selection; bound
// goals go straight to the step-wise resolver. The optional hint names the
// intended leading summand (holes allowed) and is only consulted for
// exact goals.
pub fn compute_degree(
  arena: &mut ExprArena, cx: &impl ProofCx, goal: Prop, hint: Option<ExprId>,
) -> Result<Script, TacticError> {
  match inspect_goal(goal)? {
    DegreeGoal::Eq(e, d) => orchestrate(arena, cx, e, d, hint),
    DegreeGoal::Le(e, d) => Ok(Script { steps: solve_le(arena, cx, e, d)? }),
  }
}

pub fn compute_degree_le(
  arena: &mut ExprArena, cx: &impl ProofCx, goal: Prop,
) -> Result<Script, TacticError> {
  match inspect_goal(goal)? {
    DegreeGoal::Le(e, d) => Ok(Script { steps: solve_le(arena, cx, e, d)? }),
    _ => Err(TacticError::GoalShape),
  }
}

fn orchestrate(
  arena: &mut ExprArena, cx: &impl ProofCx, e: ExprId, d: ExprId, hint: Option<ExprId>,
) -> Result<Script, TacticError> {
  let target = arena.try_dest_nat(d)
    .ok_or_else(|| TacticError::TargetNotClosed(arena.show(d)))?;
  let (lead, rest) = match hint {
    // With a hint the leading term is whatever the hint picks out; the
    // degree ranking is not consulted.
    Some(pat) => {
      let summands = split_summands(arena, e);
      if summands.is_empty() { return Err(TacticError::NoSummands) }
      let hits: Vec<usize> = (0..summands.len())
        .filter(|&i| arena.matches(pat, summands[i]))
        .collect();
      match *hits {
        [] => return Err(TacticError::HintNoMatch(arena.show(pat))),
        [i] => {
          let rest: Vec<ExprId> = summands.iter().enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &s)| s)
            .collect();
          (summands[i], rest)
        }
        _ => {
          let names = hits.iter().map(|&i| arena.show(summands[i]))
            .collect::<Vec<_>>().join(", ");
          return Err(TacticError::HintAmbiguous(names))
        }
      }
    }
    None => {
      let lead = leading_summand(arena, e)?;
      // Refuse a target the guess contradicts before any resolver runs;
      // the correct fix is on the caller's side, never a silent substitute.
      if lead.term().degree != target {
        return Err(TacticError::DegreeMismatch {
          stated: target.to_string(),
          computed: lead.term().degree.to_string(),
        })
      }
      let rest: Vec<ExprId> = lead.summands.iter().enumerate()
        .filter(|&(i, _)| i != lead.index)
        .map(|(_, s)| s.expr)
        .collect();
      (lead.term().expr, rest)
    }
  };
  debug!(goal = %arena.show_prop(Prop::DegreeEq(e, d)), lead = %arena.show(lead), "orchestrating");
  let mut steps = resolve_exact(arena, cx, lead, &target, d)?;
  steps.extend(bound_rest(arena, cx, &rest, &target, e)?);
  Ok(Script { steps })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::search::LocalCx;
  use num::BigUint;

  fn nat(a: &mut ExprArena, n: u32) -> ExprId { a.mk_nat(&BigUint::from(n)) }

  #[test]
  fn rejects_foreign_goal_shapes() {
    let mut a = ExprArena::new();
    let c = a.mk_atom("a");
    let cx = LocalCx::new();
    assert_eq!(
      compute_degree(&mut a, &cx, Prop::NeZero(c), None),
      Err(TacticError::GoalShape)
    );
    assert_eq!(compute_degree_le(&mut a, &cx, Prop::Nontrivial), Err(TacticError::GoalShape));
  }

  #[test]
  fn le_entry_rejects_exact_goals() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let one = a.mk_one();
    let cx = LocalCx::new();
    assert_eq!(
      compute_degree_le(&mut a, &cx, Prop::DegreeEq(x, one)),
      Err(TacticError::GoalShape)
    );
  }

  #[test]
  fn mismatch_fails_before_any_resolver() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n4 = nat(&mut a, 4);
    let pow = a.mk_pow(x, n4);
    let c = a.mk_atom("a");
    let ca = a.mk_const(c);
    let e = a.mk_add(pow, ca);
    let n5 = nat(&mut a, 5);
    // no nontriviality hypothesis in scope: the early check must fire first
    let cx = LocalCx::new();
    assert_eq!(
      compute_degree(&mut a, &cx, Prop::DegreeEq(e, n5), None),
      Err(TacticError::DegreeMismatch { stated: "5".into(), computed: "4".into() })
    );
  }

  #[test]
  fn symbolic_target_is_rejected() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let d = a.mk_atom("d");
    let cx = LocalCx::new();
    assert_eq!(
      compute_degree(&mut a, &cx, Prop::DegreeEq(x, d), None),
      Err(TacticError::TargetNotClosed("d".into()))
    );
  }

  #[test]
  fn hint_overrides_the_degree_ranking() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n2 = nat(&mut a, 2);
    let pow = a.mk_pow(x, n2);
    let ca = { let c = a.mk_atom("a"); a.mk_const(c) };
    let cb = { let c = a.mk_atom("b"); a.mk_const(c) };
    let t1 = a.mk_mul(ca, pow);
    let t2 = a.mk_mul(cb, pow);
    let e = a.mk_add(t1, t2);
    let mut cx = LocalCx::new();
    let aa = a.mk_atom("a");
    cx.assume("ha", Prop::NeZero(aa));
    // without a hint this sum is ambiguous
    assert!(matches!(
      compute_degree(&mut a, &cx, Prop::DegreeEq(e, n2), None),
      Err(TacticError::AmbiguousLeadingTerm(_))
    ));
    // hinting the first summand resolves it, and the residual bound on the
    // tied second summand then fails cleanly at 2 <= 1
    let err = compute_degree(&mut a, &cx, Prop::DegreeEq(e, n2), Some(t1));
    assert!(matches!(err, Err(TacticError::Unclosable(_))));
  }

  #[test]
  fn hint_with_holes_must_match_uniquely() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n2 = nat(&mut a, 2);
    let pow = a.mk_pow(x, n2);
    let ca = { let c = a.mk_atom("a"); a.mk_const(c) };
    let cb = { let c = a.mk_atom("b"); a.mk_const(c) };
    let t1 = a.mk_mul(ca, pow);
    let t2 = a.mk_mul(cb, pow);
    let e = a.mk_add(t1, t2);
    let h = a.mk_hole();
    let pat = a.mk_mul(h, pow);
    let cx = LocalCx::new();
    assert!(matches!(
      compute_degree(&mut a, &cx, Prop::DegreeEq(e, n2), Some(pat)),
      Err(TacticError::HintAmbiguous(_))
    ));
    let n9 = nat(&mut a, 9);
    let miss = a.mk_pow(x, n9);
    assert_eq!(
      compute_degree(&mut a, &cx, Prop::DegreeEq(e, n2), Some(miss)),
      Err(TacticError::HintNoMatch("X ^ 9".into()))
    );
  }
}
