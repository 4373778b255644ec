use num::Zero;

use crate::arena::ExprArena;
use crate::types::*;

// The local-proof-search boundary. The ambient proof engine supplies two
// primitives: close a proposition from a hypothesis already in scope, or
// close it by numeral arithmetic. Both are total and side-effect free on
// failure.
pub trait ProofCx {
  fn by_hypothesis(&self, p: &Prop) -> Option<HypId>;
  fn by_arith(&self, arena: &ExprArena, p: &Prop) -> bool;
}

#[derive(Debug, Default)]
pub struct LocalCx {
  hyps: Vec<(String, Prop)>,
}

impl LocalCx {
  pub fn new() -> Self { Self::default() }

  pub fn assume(&mut self, name: impl Into<String>, p: Prop) -> HypId {
    let n = self.hyps.len() as u32;
    self.hyps.push((name.into(), p));
    HypId(n)
  }

  pub fn name(&self, h: HypId) -> &str { &self.hyps[h.into_usize()].0 }
}

impl ProofCx for LocalCx {
  // Hypothesis lookup is syntactic: interning makes `Prop` equality a
  // handful of id comparisons.
  fn by_hypothesis(&self, p: &Prop) -> Option<HypId> {
    self.hyps.iter().position(|(_, q)| q == p).map(|n| HypId(n as u32))
  }

  fn by_arith(&self, arena: &ExprArena, p: &Prop) -> bool {
    match *p {
      Prop::NatLe(a, b) => match (arena.try_dest_nat(a), arena.try_dest_nat(b)) {
        (Some(x), Some(y)) => x <= y,
        // 0 <= d holds for every natural d, closed or not
        (Some(x), None) => x.is_zero(),
        _ => false,
      },
      Prop::NeZero(a) => arena.try_dest_nat(a).map_or(false, |n| !n.is_zero()),
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use num::BigUint;

  #[test]
  fn hypothesis_lookup_is_syntactic() {
    let mut a = ExprArena::new();
    let mut cx = LocalCx::new();
    let c = a.mk_atom("a");
    let h = cx.assume("ha", Prop::NeZero(c));
    assert_eq!(cx.by_hypothesis(&Prop::NeZero(c)), Some(h));
    assert_eq!(cx.name(h), "ha");
    let d = a.mk_atom("b");
    assert_eq!(cx.by_hypothesis(&Prop::NeZero(d)), None);
  }

  #[test]
  fn arith_decides_closed_numeral_bounds() {
    let mut a = ExprArena::new();
    let cx = LocalCx::new();
    let two = a.mk_nat(&BigUint::from(2u32));
    let five = a.mk_nat(&BigUint::from(5u32));
    assert!(cx.by_arith(&a, &Prop::NatLe(two, five)));
    assert!(!cx.by_arith(&a, &Prop::NatLe(five, two)));
  }

  #[test]
  fn arith_knows_zero_below_everything() {
    let mut a = ExprArena::new();
    let cx = LocalCx::new();
    let zero = a.mk_zero();
    let d = a.mk_atom("d");
    assert!(cx.by_arith(&a, &Prop::NatLe(zero, d)));
    let one = a.mk_one();
    assert!(!cx.by_arith(&a, &Prop::NatLe(one, d)));
  }

  #[test]
  fn arith_closes_nonzero_numeral_coefficients() {
    let mut a = ExprArena::new();
    let cx = LocalCx::new();
    let five = a.mk_nat(&BigUint::from(5u32));
    let zero = a.mk_zero();
    assert!(cx.by_arith(&a, &Prop::NeZero(five)));
    assert!(!cx.by_arith(&a, &Prop::NeZero(zero)));
  }
}
