use std::collections::BTreeMap;

use thiserror::Error;

use crate::error::FractionError;
use crate::fraction::Fraction;

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Literal(Fraction),
    Var(String),
    Ans,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFn {
    Neg,
    Inv,
    Abs,
    Float,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Value(Operand),
    Binary(Operand, BinOp, Operand),
    Compare(Operand, CmpOp, Operand),
    Unary(UnaryFn, Operand),
    Exact(f64),
    Approx(f64, Option<u64>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Nothing,
    Let(String, Expr),
    Eval(Expr),
    Help,
    Vars,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error(transparent)]
    Fraction(#[from] FractionError),

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("no previous result")]
    NoAns,

    #[error("`{0}` can only be bound to a fraction")]
    NotAFraction(String),
}

pub type ExecResult = Result<Option<String>, ExecError>;

/// What an expression evaluated to.
enum Value {
    Frac(Fraction),
    Float(f64),
    Bool(bool),
}

pub const HELP: &str = "\
expressions:
  1/3 + 0.25          binary + - * / (spaces around the operator)
  1/3 < 2/5           comparisons < <= > >= == !=
  neg x | inv x | abs x | float x
  exact 0.1           exact value of a binary float
  approx 3.14159 [N]  best approximation with denominator <= N
  let x = <expr>      bind a variable, `ans` is the last result
commands: vars, help, quit";

/// Variables and the last result of an interactive session.
#[derive(Clone, Debug)]
pub struct ExecEnv {
    vars: BTreeMap<String, Fraction>,
    ans: Option<Fraction>,
    max_denominator: u64,
}

impl ExecEnv {
    pub fn new(max_denominator: u64) -> Self {
        ExecEnv {
            vars: BTreeMap::new(),
            ans: None,
            max_denominator,
        }
    }

    pub fn get(&self, name: &str) -> Option<Fraction> {
        self.vars.get(name).copied()
    }

    pub fn ans(&self) -> Option<Fraction> {
        self.ans
    }

    pub fn execute(&mut self, stmt: Statement) -> ExecResult {
        match stmt {
            Statement::Nothing | Statement::Quit => Ok(None),
            Statement::Help => Ok(Some(HELP.to_string())),
            Statement::Vars => {
                if self.vars.is_empty() {
                    return Ok(Some("no variables".to_string()));
                }
                let lines: Vec<String> = self
                    .vars
                    .iter()
                    .map(|(name, value)| format!("{} = {}", name, value))
                    .collect();
                Ok(Some(lines.join("\n")))
            }
            Statement::Let(name, expr) => match self.eval(expr)? {
                Value::Frac(f) => {
                    self.vars.insert(name.clone(), f);
                    self.ans = Some(f);
                    Ok(Some(format!("{} = {}", name, f)))
                }
                _ => Err(ExecError::NotAFraction(name)),
            },
            Statement::Eval(expr) => match self.eval(expr)? {
                Value::Frac(f) => {
                    self.ans = Some(f);
                    Ok(Some(f.to_string()))
                }
                Value::Float(x) => Ok(Some(x.to_string())),
                Value::Bool(b) => Ok(Some(b.to_string())),
            },
        }
    }

    fn resolve(&self, operand: Operand) -> Result<Fraction, ExecError> {
        match operand {
            Operand::Literal(f) => Ok(f),
            Operand::Var(name) => self.get(&name).ok_or(ExecError::UnknownVariable(name)),
            Operand::Ans => self.ans.ok_or(ExecError::NoAns),
        }
    }

    fn eval(&self, expr: Expr) -> Result<Value, ExecError> {
        let value = match expr {
            Expr::Value(op) => Value::Frac(self.resolve(op)?),
            Expr::Binary(lhs, op, rhs) => {
                let (a, b) = (self.resolve(lhs)?, self.resolve(rhs)?);
                Value::Frac(match op {
                    BinOp::Add => a.checked_add(b)?,
                    BinOp::Sub => a.checked_sub(b)?,
                    BinOp::Mul => a.checked_mul(b)?,
                    BinOp::Div => a.checked_div(b)?,
                })
            }
            Expr::Compare(lhs, op, rhs) => {
                let (a, b) = (self.resolve(lhs)?, self.resolve(rhs)?);
                Value::Bool(match op {
                    CmpOp::Lt => a.less(&b),
                    CmpOp::Le => a.less_eq(&b),
                    CmpOp::Gt => a.greater(&b),
                    CmpOp::Ge => a.greater_eq(&b),
                    CmpOp::Eq => a == b,
                    CmpOp::Ne => a != b,
                })
            }
            Expr::Unary(func, op) => {
                let a = self.resolve(op)?;
                match func {
                    UnaryFn::Neg => Value::Frac(a.negate()),
                    UnaryFn::Inv => Value::Frac(a.invert()?),
                    UnaryFn::Abs => Value::Frac(a.abs()),
                    UnaryFn::Float => Value::Float(a.to_f64()),
                }
            }
            Expr::Exact(x) => Value::Frac(Fraction::from_f64_exact(x)?),
            Expr::Approx(x, bound) => Value::Frac(Fraction::from_f64_approx(
                x,
                bound.unwrap_or(self.max_denominator),
            )?),
        };
        Ok(value)
    }
}
