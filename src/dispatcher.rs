use tracing::debug;

use crate::config::ReplConfig;
use crate::exec_env::{BinOp, CmpOp, ExecEnv, Expr, Operand, Statement, UnaryFn};
use crate::fraction::Fraction;

#[derive(Debug)]
pub struct Dispatcher {
    pub env: ExecEnv,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DispatchResult {
    Success(Option<String>),
    Failure(String),
    Exit,
}

impl Dispatcher {
    pub fn new(config: &ReplConfig) -> Self {
        Dispatcher {
            env: ExecEnv::new(config.max_denominator),
        }
    }

    pub fn dispatch(&mut self, input: &str) -> DispatchResult {
        let stmt = match parse_line(input) {
            Ok(stmt) => stmt,
            Err(message) => {
                debug!(input, %message, "cannot parse line");
                return DispatchResult::Failure(message);
            }
        };
        if stmt == Statement::Quit {
            return DispatchResult::Exit;
        }
        match self.env.execute(stmt) {
            Ok(message) => DispatchResult::Success(message),
            Err(e) => DispatchResult::Failure(e.to_string()),
        }
    }
}

pub fn parse_line(input: &str) -> Result<Statement, String> {
    let line = input.trim();
    match line {
        "" => return Ok(Statement::Nothing),
        "help" => return Ok(Statement::Help),
        "vars" => return Ok(Statement::Vars),
        "quit" | "exit" => return Ok(Statement::Quit),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("let ") {
        let (name, rhs) = rest
            .split_once('=')
            .ok_or_else(|| "expected `let <name> = <expr>`".to_string())?;
        let name = name.trim();
        if !is_identifier(name) || is_reserved(name) {
            return Err(format!("invalid variable name `{}`", name));
        }
        return Ok(Statement::Let(name.to_string(), parse_expr(rhs)?));
    }

    parse_expr(line).map(Statement::Eval)
}

fn parse_expr(s: &str) -> Result<Expr, String> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err("empty expression".to_string()),
        ["exact", x] => Ok(Expr::Exact(parse_float(x)?)),
        ["approx", x] => Ok(Expr::Approx(parse_float(x)?, None)),
        ["approx", x, bound] => {
            let bound = bound
                .parse::<u64>()
                .map_err(|_| format!("invalid denominator bound `{}`", bound))?;
            Ok(Expr::Approx(parse_float(x)?, Some(bound)))
        }
        [func, x] => {
            let func = match *func {
                "neg" => UnaryFn::Neg,
                "inv" => UnaryFn::Inv,
                "abs" => UnaryFn::Abs,
                "float" => UnaryFn::Float,
                other => return Err(format!("unknown function `{}`", other)),
            };
            Ok(Expr::Unary(func, parse_operand(x)?))
        }
        [x] => Ok(Expr::Value(parse_operand(x)?)),
        [lhs, op, rhs] => {
            let (lhs, rhs) = (parse_operand(lhs)?, parse_operand(rhs)?);
            let arith = match *op {
                "+" => Some(BinOp::Add),
                "-" => Some(BinOp::Sub),
                "*" => Some(BinOp::Mul),
                "/" => Some(BinOp::Div),
                _ => None,
            };
            if let Some(op) = arith {
                return Ok(Expr::Binary(lhs, op, rhs));
            }
            let cmp = match *op {
                "<" => CmpOp::Lt,
                "<=" => CmpOp::Le,
                ">" => CmpOp::Gt,
                ">=" => CmpOp::Ge,
                "==" => CmpOp::Eq,
                "!=" => CmpOp::Ne,
                other => return Err(format!("unknown operator `{}`", other)),
            };
            Ok(Expr::Compare(lhs, cmp, rhs))
        }
        _ => Err("expected `a op b`, `func x` or a single value".to_string()),
    }
}

fn parse_operand(token: &str) -> Result<Operand, String> {
    if token == "ans" {
        return Ok(Operand::Ans);
    }
    if is_identifier(token) {
        return Ok(Operand::Var(token.to_string()));
    }
    Fraction::parse(token)
        .map(Operand::Literal)
        .map_err(|e| format!("`{}`: {}", token, e))
}

fn parse_float(token: &str) -> Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("`{}` is not a floating point number", token))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_reserved(s: &str) -> bool {
    matches!(
        s,
        "ans" | "let" | "help" | "vars" | "quit" | "exit" | "exact" | "approx" | "neg" | "inv" | "abs" | "float"
    )
}
