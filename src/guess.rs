use num::{BigUint, One, Zero};

use crate::arena::ExprArena;
use crate::error::TacticError;
use crate::types::*;

// Best-effort structural degree of a single summand. Purely syntactic: no
// proof context is consulted, and nothing here is trusted downstream. The
// resolvers re-verify every guess, so a wrong guess fails cleanly later.
pub fn guess_degree(arena: &ExprArena, e: ExprId) -> Result<BigUint, TacticError> {
  match arena[e] {
    Expr::Zero | Expr::One => Ok(BigUint::zero()),
    // Numeral wrappers are degree-0 constants, but `bit0 f` with `f` a
    // polynomial also occurs; recursing covers both. No characteristic-2
    // cancellation is attempted.
    Expr::Bit0(f) | Expr::Bit1(f) => guess_degree(arena, f),
    Expr::Mul(a, b) => Ok(guess_degree(arena, a)? + guess_degree(arena, b)?),
    Expr::Var => Ok(BigUint::one()),
    Expr::Const(_) => Ok(BigUint::zero()),
    Expr::Pow(b, n) if arena.is_var(b) => arena
      .try_dest_nat(n)
      .ok_or_else(|| TacticError::ExponentNotClosed(arena.show(n))),
    Expr::Monomial(n, _) => arena
      .try_dest_nat(n)
      .ok_or_else(|| TacticError::ExponentNotClosed(arena.show(n))),
    _ => Err(TacticError::UnrecognizedShape(arena.show(e))),
  }
}
