use std::fmt::{self, Display, Formatter};

use crate::arena::ExprArena;
use crate::types::*;

pub struct Print<'a, T> {
  pub arena: &'a ExprArena,
  pub t: T,
}

impl ExprArena {
  pub fn show(&self, e: ExprId) -> String { Print { arena: self, t: e }.to_string() }
  pub fn show_prop(&self, p: Prop) -> String { Print { arena: self, t: p }.to_string() }
}

impl<'a> Display for Print<'a, ExprId> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    print_expr(self.arena, self.t, 0, f)
  }
}

fn print_expr(arena: &ExprArena, e: ExprId, prec: u32, f: &mut Formatter<'_>) -> fmt::Result {
  if let Some(n) = arena.try_dest_nat(e) { return write!(f, "{}", n) }
  match arena[e] {
    Expr::Zero => write!(f, "0"),
    Expr::One => write!(f, "1"),
    Expr::Var => write!(f, "X"),
    Expr::Hole => write!(f, "_"),
    Expr::Atom(a) => write!(f, "{}", arena[a].0),
    Expr::Add(a, b) => {
      if prec >= 16 { write!(f, "(")? }
      print_expr(arena, a, 15, f)?;
      write!(f, " + ")?;
      print_expr(arena, b, 16, f)?;
      if prec >= 16 { write!(f, ")")? }
      Ok(())
    }
    Expr::Mul(a, b) => {
      if prec >= 20 { write!(f, "(")? }
      print_expr(arena, a, 19, f)?;
      write!(f, " * ")?;
      print_expr(arena, b, 20, f)?;
      if prec >= 20 { write!(f, ")")? }
      Ok(())
    }
    Expr::Pow(a, b) => {
      if prec >= 30 { write!(f, "(")? }
      print_expr(arena, a, 30, f)?;
      write!(f, " ^ ")?;
      print_expr(arena, b, 29, f)?;
      if prec >= 30 { write!(f, ")")? }
      Ok(())
    }
    Expr::Const(a) => {
      if prec >= 50 { write!(f, "(")? }
      write!(f, "C ")?;
      print_expr(arena, a, 50, f)?;
      if prec >= 50 { write!(f, ")")? }
      Ok(())
    }
    Expr::Monomial(n, a) => {
      if prec >= 50 { write!(f, "(")? }
      write!(f, "monomial ")?;
      print_expr(arena, n, 50, f)?;
      write!(f, " ")?;
      print_expr(arena, a, 50, f)?;
      if prec >= 50 { write!(f, ")")? }
      Ok(())
    }
    Expr::Bit0(a) => {
      if prec >= 50 { write!(f, "(")? }
      write!(f, "bit0 ")?;
      print_expr(arena, a, 50, f)?;
      if prec >= 50 { write!(f, ")")? }
      Ok(())
    }
    Expr::Bit1(a) => {
      if prec >= 50 { write!(f, "(")? }
      write!(f, "bit1 ")?;
      print_expr(arena, a, 50, f)?;
      if prec >= 50 { write!(f, ")")? }
      Ok(())
    }
  }
}

impl<'a> Display for Print<'a, Prop> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let arena = self.arena;
    match self.t {
      Prop::DegreeEq(e, d) => {
        write!(f, "degree (")?;
        print_expr(arena, e, 0, f)?;
        write!(f, ") = ")?;
        print_expr(arena, d, 0, f)
      }
      Prop::DegreeLe(e, d) => {
        write!(f, "degree (")?;
        print_expr(arena, e, 0, f)?;
        write!(f, ") <= ")?;
        print_expr(arena, d, 0, f)
      }
      Prop::NeZero(a) => {
        print_expr(arena, a, 16, f)?;
        write!(f, " != 0")
      }
      Prop::Nontrivial => write!(f, "nontrivial coefficient ring (0 != 1)"),
      Prop::NatLe(a, b) => {
        print_expr(arena, a, 16, f)?;
        write!(f, " <= ")?;
        print_expr(arena, b, 16, f)
      }
    }
  }
}

impl<'a> Display for Print<'a, &'a Script> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    for step in &self.t.steps {
      write!(f, "{}  by {}", Print { arena: self.arena, t: step.prop }, step.fact.name())?;
      for (p, d) in &step.by {
        let how = match d {
          Discharge::Hyp(h) => format!("hypothesis #{}", h.0),
          Discharge::Arith => "arithmetic".to_string(),
          Discharge::OneNeZero => "one_ne_zero".to_string(),
        };
        write!(f, " [{} by {}]", Print { arena: self.arena, t: *p }, how)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use num::BigUint;

  #[test]
  fn prints_numerals_not_bits() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let n = a.mk_nat(&BigUint::from(6u32));
    let p = a.mk_pow(x, n);
    assert_eq!(a.show(p), "X ^ 6");
  }

  #[test]
  fn prints_nested_sums_and_products() {
    let mut a = ExprArena::new();
    let x = a.mk_var();
    let c = a.mk_atom("a");
    let ca = a.mk_const(c);
    let n = a.mk_nat(&BigUint::from(5u32));
    let pow = a.mk_pow(x, n);
    let t = a.mk_mul(ca, pow);
    let s = a.mk_add(t, ca);
    assert_eq!(a.show(s), "C a * X ^ 5 + C a");
    assert_eq!(a.show_prop(Prop::DegreeEq(s, n)), "degree (C a * X ^ 5 + C a) = 5");
  }

  #[test]
  fn prints_open_bit_wrappers() {
    let mut a = ExprArena::new();
    let k = a.mk_atom("k");
    let e = a.mk_bit0(k);
    assert_eq!(a.show(e), "bit0 k");
  }
}
