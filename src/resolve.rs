use num::{BigUint, One, Zero};
use tracing::debug;

use crate::arena::ExprArena;
use crate::error::TacticError;
use crate::search::ProofCx;
use crate::types::*;

// Close one side obligation: hypothesis first, then the unit fallback for
// nonzero-ness of `1`, then numeral arithmetic. Failure names the fact the
// caller needs to supply.
pub fn discharge(
  arena: &ExprArena, cx: &impl ProofCx, p: Prop,
) -> Result<Discharge, TacticError> {
  if let Some(h) = cx.by_hypothesis(&p) { return Ok(Discharge::Hyp(h)) }
  if let Prop::NeZero(a) = p {
    if arena.is_one(a) { return Ok(Discharge::OneNeZero) }
  }
  if cx.by_arith(arena, &p) { return Ok(Discharge::Arith) }
  Err(TacticError::Unclosable(arena.show_prop(p)))
}

// Exact-degree justification for one presumed leading term. A closed
// dispatch table on the term's shape; no search across rules. The matched
// shape's degree must equal the stated target, which keeps this resolver
// and the guesser in agreement on every shape both handle.
pub fn resolve_exact(
  arena: &ExprArena, cx: &impl ProofCx, e: ExprId, target: &BigUint, target_e: ExprId,
) -> Result<Vec<Step>, TacticError> {
  let (fact, degree, obligation) = match arena[e] {
    Expr::Mul(c, x) => match (arena[c], arena[x]) {
      (Expr::Const(a), Expr::Var) => (Fact::ConstMulVar, BigUint::one(), Some(Prop::NeZero(a))),
      (Expr::Const(a), Expr::Pow(b, n)) if arena.is_var(b) => {
        let n = arena.try_dest_nat(n)
          .ok_or_else(|| TacticError::ExponentNotClosed(arena.show(n)))?;
        (Fact::ConstMulPow, n, Some(Prop::NeZero(a)))
      }
      _ => return Err(TacticError::LeadingShape(arena.show(e))),
    },
    Expr::Monomial(n, a) => {
      let n = arena.try_dest_nat(n)
        .ok_or_else(|| TacticError::ExponentNotClosed(arena.show(n)))?;
      (Fact::MonomialDeg, n, Some(Prop::NeZero(a)))
    }
    Expr::Const(_) => (Fact::ConstDeg, BigUint::zero(), None),
    Expr::One => (Fact::OneDeg, BigUint::zero(), None),
    Expr::Pow(b, n) if arena.is_var(b) => {
      let n = arena.try_dest_nat(n)
        .ok_or_else(|| TacticError::ExponentNotClosed(arena.show(n)))?;
      (Fact::PowDeg, n, Some(Prop::Nontrivial))
    }
    Expr::Var => (Fact::VarDeg, BigUint::one(), Some(Prop::Nontrivial)),
    _ => return Err(TacticError::LeadingShape(arena.show(e))),
  };
  if degree != *target {
    return Err(TacticError::DegreeMismatch {
      stated: target.to_string(),
      computed: degree.to_string(),
    })
  }
  let by = match obligation {
    None => vec![],
    Some(p) => vec![(p, discharge(arena, cx, p)?)],
  };
  debug!(term = %arena.show(e), fact = fact.name(), "resolved leading term");
  Ok(vec![Step { fact, prop: Prop::DegreeEq(e, target_e), by }])
}
