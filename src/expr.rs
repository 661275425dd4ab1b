//! Arithmetic fallback for bare numeric expressions.
//!
//! The grammar is deliberately tiny: `+ - * /` with standard precedence,
//! parentheses, unary sign, and decimal/float/hex literals. No identifiers,
//! no function calls. Anything else in the candidate run makes evaluation
//! fail and the parser reports it at the offset of the run.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, hex_digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// Characters that may start or continue an expression candidate. The set is
/// wider than the evaluable grammar on purpose: a run matched out of these
/// that does not evaluate is a hard "Cannot evaluate expression" failure.
pub fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || ".+-*/eEx&|()[]".contains(c)
}

pub fn evaluate(expr: &str) -> Option<f64> {
    all_consuming(expression)(expr).ok().map(|(_, value)| value)
}

fn expression(i: &str) -> IResult<&str, f64> {
    let (i, init) = term(i)?;

    fold_many0(
        pair(one_of("+-"), term),
        move || init,
        |acc, (op, value)| {
            if op == '+' {
                acc + value
            } else {
                acc - value
            }
        },
    )(i)
}

fn term(i: &str) -> IResult<&str, f64> {
    let (i, init) = factor(i)?;

    fold_many0(
        pair(one_of("*/"), factor),
        move || init,
        |acc, (op, value)| {
            if op == '*' {
                acc * value
            } else {
                acc / value
            }
        },
    )(i)
}

fn factor(i: &str) -> IResult<&str, f64> {
    let (i, sign) = opt(one_of("+-"))(i)?;
    let (i, value) = alt((number, delimited(char('('), expression, char(')'))))(i)?;

    Ok((i, if sign == Some('-') { -value } else { value }))
}

fn number(i: &str) -> IResult<&str, f64> {
    alt((hex_int, decimal))(i)
}

fn hex_int(i: &str) -> IResult<&str, f64> {
    map_res(
        preceded(alt((tag("0x"), tag("0X"))), hex_digit1),
        |digits: &str| i64::from_str_radix(digits, 16).map(|value| value as f64),
    )(i)
}

fn decimal(i: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            digit1,
            opt(pair(char('.'), digit1)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |literal: &str| literal.parse::<f64>(),
    )(i)
}

#[cfg(test)]
mod tests {
    use super::evaluate;

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(evaluate("1+2*3"), Some(7.0));
        assert_eq!(evaluate("(1+2)*3"), Some(9.0));
        assert_eq!(evaluate("10/4"), Some(2.5));
    }

    #[test]
    fn unary_sign_and_literal_forms() {
        assert_eq!(evaluate("+5"), Some(5.0));
        assert_eq!(evaluate("-(2*3)"), Some(-6.0));
        assert_eq!(evaluate("0x10"), Some(16.0));
        assert_eq!(evaluate("1.5e2"), Some(150.0));
    }

    #[test]
    fn rejects_everything_outside_the_grammar() {
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("1+"), None);
        assert_eq!(evaluate("1&2"), None);
        assert_eq!(evaluate("[1]"), None);
        assert_eq!(evaluate("e"), None);
    }
}
