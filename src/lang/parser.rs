//! DSL parser
//!
//! pest produces the token tree; this module folds it into an [`Expr`],
//! left-associating the binary operator chains.

use crate::error::RevpadError;
use crate::lang::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::RevpadResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "lang/grammar.pest"]
struct DslParser;

/// Parse DSL source into an expression AST
pub fn parse(input: &str) -> RevpadResult<Expr> {
    let mut pairs = DslParser::parse(Rule::program, input)
        .map_err(|_| RevpadError::Parse(input.to_string()))?;

    let program = pairs
        .next()
        .ok_or_else(|| RevpadError::Parse(input.to_string()))?;

    let expr = program
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expr)
        .ok_or_else(|| RevpadError::Parse(input.to_string()))?;

    build_expr(expr, input)
}

fn build_expr(pair: Pair<Rule>, src: &str) -> RevpadResult<Expr> {
    match pair.as_rule() {
        Rule::expr => {
            let inner = first_inner(pair, src)?;
            build_expr(inner, src)
        }
        Rule::or_expr | Rule::and_expr | Rule::eq_expr | Rule::cmp_expr => {
            build_binary_chain(pair, src)
        }
        Rule::unary_expr => build_unary(pair, src),
        Rule::primary => {
            let inner = first_inner(pair, src)?;
            build_expr(inner, src)
        }
        Rule::paren => {
            let inner = first_inner(pair, src)?;
            build_expr(inner, src)
        }
        Rule::bool_lit => Ok(Expr::bool_const(pair.as_str() == "true")),
        Rule::int_lit => pair
            .as_str()
            .parse::<i64>()
            .map(Expr::int_const)
            .map_err(|_| RevpadError::Parse(src.to_string())),
        Rule::string_lit => Ok(Expr::string_const(string_contents(pair, src)?)),
        Rule::array_lit => {
            let elements = pair
                .into_inner()
                .map(|element| build_expr(element, src))
                .collect::<RevpadResult<Vec<_>>>()?;
            Ok(Expr::array(elements))
        }
        Rule::dict_lit => {
            let mut entries = Vec::new();
            for entry in pair.into_inner() {
                let mut parts = entry.into_inner();
                let key = parts
                    .next()
                    .ok_or_else(|| RevpadError::Parse(src.to_string()))?;
                let value = parts
                    .next()
                    .ok_or_else(|| RevpadError::Parse(src.to_string()))?;
                entries.push((string_contents(key, src)?, build_expr(value, src)?));
            }
            Ok(Expr::dictionary(entries))
        }
        Rule::call_or_var => {
            let mut parts = pair.into_inner();
            let name = parts
                .next()
                .ok_or_else(|| RevpadError::Parse(src.to_string()))?
                .as_str()
                .to_string();
            match parts.next() {
                Some(call_args) => {
                    let args = call_args
                        .into_inner()
                        .map(|arg| build_expr(arg, src))
                        .collect::<RevpadResult<Vec<_>>>()?;
                    Ok(Expr::function_call(name, args))
                }
                None => Ok(Expr::variable(name)),
            }
        }
        _ => Err(RevpadError::Parse(src.to_string())),
    }
}

fn build_binary_chain(pair: Pair<Rule>, src: &str) -> RevpadResult<Expr> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| RevpadError::Parse(src.to_string()))?;
    let mut acc = build_expr(first, src)?;

    while let Some(op_pair) = inner.next() {
        let operand = inner
            .next()
            .ok_or_else(|| RevpadError::Parse(src.to_string()))?;
        let op = operator(&op_pair, src)?;
        acc = Expr::bin_op(op, acc, build_expr(operand, src)?);
    }

    Ok(acc)
}

fn operator(pair: &Pair<Rule>, src: &str) -> RevpadResult<BinaryOperator> {
    match (pair.as_rule(), pair.as_str()) {
        (Rule::or_op, _) => Ok(BinaryOperator::Or),
        (Rule::and_op, _) => Ok(BinaryOperator::And),
        (Rule::eq_op, "==") => Ok(BinaryOperator::Eq),
        (Rule::eq_op, "!=") => Ok(BinaryOperator::Neq),
        (Rule::cmp_op, "<") => Ok(BinaryOperator::Less),
        (Rule::cmp_op, "<=") => Ok(BinaryOperator::LessEq),
        (Rule::cmp_op, ">") => Ok(BinaryOperator::Greater),
        (Rule::cmp_op, ">=") => Ok(BinaryOperator::GreaterEq),
        _ => Err(RevpadError::Parse(src.to_string())),
    }
}

fn build_unary(pair: Pair<Rule>, src: &str) -> RevpadResult<Expr> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| RevpadError::Parse(src.to_string()))?;

    if first.as_rule() == Rule::not_op {
        let operand = inner
            .next()
            .ok_or_else(|| RevpadError::Parse(src.to_string()))?;
        Ok(Expr::un_op(UnaryOperator::Not, build_expr(operand, src)?))
    } else {
        build_expr(first, src)
    }
}

fn first_inner<'a>(pair: Pair<'a, Rule>, src: &str) -> RevpadResult<Pair<'a, Rule>> {
    pair.into_inner()
        .next()
        .ok_or_else(|| RevpadError::Parse(src.to_string()))
}

fn string_contents(pair: Pair<Rule>, src: &str) -> RevpadResult<String> {
    let inner = first_inner(pair, src)?;
    unescape(inner.as_str(), src)
}

fn unescape(raw: &str, src: &str) -> RevpadResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            _ => return Err(RevpadError::Parse(src.to_string())),
        }
    }
    Ok(out)
}
