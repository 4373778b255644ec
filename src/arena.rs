use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::Index;
use std::rc::Rc;
use num::{BigUint, One, Zero};

use crate::types::*;

#[derive(Debug)]
pub struct Store<H>(Vec<Rc<H>>);

impl<H> Default for Store<H> {
  fn default() -> Self { Self(vec![]) }
}

impl<H: Node> Store<H> {
  pub fn len(&self) -> usize { self.0.len() }
  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<H: Node> Index<H::Idx> for Store<H> {
  type Output = H;
  fn index(&self, n: H::Idx) -> &H { &*self.0[n.into_usize()] }
}

#[derive(Debug)]
struct Dedup<H> {
  map: HashMap<Rc<H>, u32>,
  store: Store<H>,
}

impl<H> Default for Dedup<H> {
  fn default() -> Self { Self { map: Default::default(), store: Default::default() } }
}

impl<H: Node> Dedup<H> {
  fn add(&mut self, v: H) -> H::Idx {
    match self.map.entry(Rc::new(v)) {
      Entry::Vacant(e) => {
        let vec = &mut self.store.0;
        let n = vec.len() as u32;
        vec.push(e.key().clone());
        e.insert(n);
        Idx::from(n)
      }
      Entry::Occupied(e) => Idx::from(*e.get()),
    }
  }
}

// Interning arena for expressions. Structurally equal expressions get the
// same `ExprId`, so id equality below is syntactic equality of terms.
#[derive(Debug, Default)]
pub struct ExprArena {
  exprs: Dedup<Expr>,
  atoms: Dedup<Atom>,
}

impl Index<ExprId> for ExprArena {
  type Output = Expr;
  fn index(&self, n: ExprId) -> &Expr { &self.exprs.store[n] }
}

impl Index<AtomId> for ExprArena {
  type Output = Atom;
  fn index(&self, n: AtomId) -> &Atom { &self.atoms.store[n] }
}

impl ExprArena {
  pub fn new() -> Self { Self::default() }

  pub fn mk_zero(&mut self) -> ExprId { self.exprs.add(Expr::Zero) }
  pub fn mk_one(&mut self) -> ExprId { self.exprs.add(Expr::One) }
  pub fn mk_bit0(&mut self, e: ExprId) -> ExprId { self.exprs.add(Expr::Bit0(e)) }
  pub fn mk_bit1(&mut self, e: ExprId) -> ExprId { self.exprs.add(Expr::Bit1(e)) }
  pub fn mk_add(&mut self, a: ExprId, b: ExprId) -> ExprId { self.exprs.add(Expr::Add(a, b)) }
  pub fn mk_mul(&mut self, a: ExprId, b: ExprId) -> ExprId { self.exprs.add(Expr::Mul(a, b)) }
  pub fn mk_pow(&mut self, a: ExprId, b: ExprId) -> ExprId { self.exprs.add(Expr::Pow(a, b)) }
  pub fn mk_var(&mut self) -> ExprId { self.exprs.add(Expr::Var) }
  pub fn mk_const(&mut self, a: ExprId) -> ExprId { self.exprs.add(Expr::Const(a)) }
  pub fn mk_monomial(&mut self, n: ExprId, a: ExprId) -> ExprId {
    self.exprs.add(Expr::Monomial(n, a))
  }
  pub fn mk_hole(&mut self) -> ExprId { self.exprs.add(Expr::Hole) }

  pub fn mk_atom(&mut self, name: &str) -> ExprId {
    let a = self.atoms.add(Atom(name.to_string()));
    self.exprs.add(Expr::Atom(a))
  }

  // Binary numeral writer: most significant bit first, base case `One`,
  // so 6 = Bit0(Bit1(One)).
  pub fn mk_nat(&mut self, n: &BigUint) -> ExprId {
    if n.is_zero() { return self.mk_zero() }
    let bits = n.to_radix_le(2);
    let mut e = self.mk_one();
    for &i in bits[..bits.len() - 1].iter().rev() {
      e = if i == 0 { self.mk_bit0(e) } else { self.mk_bit1(e) };
    }
    e
  }

  // Numeral recognizer: the inverse of `mk_nat` on closed bit encodings,
  // `None` on anything else.
  pub fn try_dest_nat(&self, e: ExprId) -> Option<BigUint> {
    match self[e] {
      Expr::Zero => Some(BigUint::zero()),
      Expr::One => Some(BigUint::one()),
      Expr::Bit0(f) => Some(self.try_dest_nat(f)? * 2u32),
      Expr::Bit1(f) => Some(self.try_dest_nat(f)? * 2u32 + 1u32),
      _ => None,
    }
  }

  pub fn try_dest_add(&self, e: ExprId) -> Option<(ExprId, ExprId)> {
    if let Expr::Add(a, b) = self[e] { Some((a, b)) } else { None }
  }

  pub fn try_dest_mul(&self, e: ExprId) -> Option<(ExprId, ExprId)> {
    if let Expr::Mul(a, b) = self[e] { Some((a, b)) } else { None }
  }

  pub fn is_var(&self, e: ExprId) -> bool { matches!(self[e], Expr::Var) }
  pub fn is_one(&self, e: ExprId) -> bool { matches!(self[e], Expr::One) }

  pub fn size(&self, e: ExprId) -> usize {
    match self[e] {
      Expr::Zero | Expr::One | Expr::Var | Expr::Atom(_) | Expr::Hole => 1,
      Expr::Bit0(a) | Expr::Bit1(a) | Expr::Const(a) => 1 + self.size(a),
      Expr::Add(a, b) | Expr::Mul(a, b) | Expr::Pow(a, b) | Expr::Monomial(a, b) =>
        1 + self.size(a) + self.size(b),
    }
  }

  // One-sided match of a hint pattern against a term; `Hole` matches any
  // subterm. Interning makes the hole-free case a single id comparison.
  pub fn matches(&self, pat: ExprId, e: ExprId) -> bool {
    if pat == e { return true }
    match (self[pat], self[e]) {
      (Expr::Hole, _) => true,
      (Expr::Bit0(p), Expr::Bit0(x)) | (Expr::Bit1(p), Expr::Bit1(x)) |
      (Expr::Const(p), Expr::Const(x)) => self.matches(p, x),
      (Expr::Add(p1, p2), Expr::Add(x1, x2)) | (Expr::Mul(p1, p2), Expr::Mul(x1, x2)) |
      (Expr::Pow(p1, p2), Expr::Pow(x1, x2)) | (Expr::Monomial(p1, p2), Expr::Monomial(x1, x2)) =>
        self.matches(p1, x1) && self.matches(p2, x2),
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numeral_round_trip_small() {
    let mut a = ExprArena::new();
    for n in 0u32..64 {
      let n = BigUint::from(n);
      let e = a.mk_nat(&n);
      assert_eq!(a.try_dest_nat(e), Some(n));
    }
  }

  #[test]
  fn numeral_six_is_bit0_bit1_one() {
    let mut a = ExprArena::new();
    let one = a.mk_one();
    let three = a.mk_bit1(one);
    let six = a.mk_bit0(three);
    assert_eq!(a.try_dest_nat(six), Some(BigUint::from(6u32)));
    assert_eq!(a.mk_nat(&BigUint::from(6u32)), six);
  }

  #[test]
  fn numeral_rejects_open_terms() {
    let mut a = ExprArena::new();
    let k = a.mk_atom("k");
    let e = a.mk_bit0(k);
    assert_eq!(a.try_dest_nat(k), None);
    assert_eq!(a.try_dest_nat(e), None);
  }

  #[test]
  fn interning_gives_syntactic_equality() {
    let mut a = ExprArena::new();
    let x1 = a.mk_var();
    let x2 = a.mk_var();
    assert_eq!(x1, x2);
    let n = a.mk_nat(&BigUint::from(5u32));
    let p1 = a.mk_pow(x1, n);
    let p2 = a.mk_pow(x2, n);
    assert_eq!(p1, p2);
  }

  #[test]
  fn hole_matches_any_summand() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n = a.mk_nat(&BigUint::from(3u32));
    let c = a.mk_atom("c");
    let ca = a.mk_const(c);
    let pow = a.mk_pow(x, n);
    let term = a.mk_mul(ca, pow);
    let h = a.mk_hole();
    let pat = a.mk_mul(h, pow);
    assert!(a.matches(pat, term));
    assert!(!a.matches(pat, pow));
    assert!(a.matches(h, term));
  }

  #[test]
  fn size_counts_nodes() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n = a.mk_nat(&BigUint::from(2u32));
    let p = a.mk_pow(x, n);
    // X^2 = Pow(Var, Bit0(One)): four nodes
    assert_eq!(a.size(p), 4);
  }
}
