use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::multispace0,
    combinator::{map, opt},
    multi::{fold_many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};
use std::rc::Rc;
use tutor_ast::{Constant, Expr};

use crate::error::ParseError;

/// Longest input the parser accepts. Student steps are short; the cap keeps
/// the recursive descent well inside the default stack.
pub const MAX_INPUT_LEN: usize = 512;

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_NESTING: usize = 32;

// Parser for numeric literals
// Supports: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, Rc<Expr>> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let frac_part = maybe_frac.map(|(_, frac)| frac).unwrap_or("");

    // Must have at least some digits somewhere ("." alone is not a number)
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    let literal = &input[..input.len() - remaining.len()];
    let value: f64 = literal.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float))
    })?;

    Ok((remaining, Expr::num(value)))
}

// Identifiers start with a letter (or π), then allow letters, digits, underscores
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    let first = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == 'π' => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Alpha,
            )))
        }
    };

    let mut len = first.len_utf8();
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' {
            len += c.len_utf8();
        } else {
            break;
        }
    }

    Ok((&input[len..], &input[..len]))
}

// Function call, constant or variable, decided after reading the identifier
fn parse_named(input: &str) -> IResult<&str, Rc<Expr>> {
    let (rest, name) = parse_identifier(input)?;

    let call = preceded(multispace0::<_, nom::error::Error<&str>>, tag("("))(rest);
    if let Ok((after_open, _)) = call {
        let (after_args, args) =
            separated_list1(preceded(multispace0, tag(",")), parse_expr)(after_open)?;
        let (after_close, _) = preceded(multispace0, tag(")"))(after_args)?;
        return Ok((after_close, Expr::func(name, args)));
    }

    let node = match name {
        "pi" | "π" => Expr::constant(Constant::Pi),
        "e" => Expr::constant(Constant::E),
        _ => Expr::var(name),
    };
    Ok((rest, node))
}

// Parser for parentheses
fn parse_parens(input: &str) -> IResult<&str, Rc<Expr>> {
    delimited(
        preceded(multispace0, tag("(")),
        parse_expr,
        preceded(multispace0, tag(")")),
    )(input)
}

// Atom
fn parse_atom(input: &str) -> IResult<&str, Rc<Expr>> {
    preceded(multispace0, alt((parse_number, parse_named, parse_parens)))(input)
}

// Power - right associative: 2^3^2 = 2^(3^2)
// The exponent may carry its own sign: x^-2, x^-(a+b)
fn parse_power(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, base) = parse_atom(input)?;

    let try_caret = preceded::<_, _, _, nom::error::Error<&str>, _, _>(
        multispace0::<_, nom::error::Error<&str>>,
        tag::<_, _, nom::error::Error<&str>>("^"),
    )(input);

    if let Ok((input, _)) = try_caret {
        let (input, exp) = parse_power_exponent(input)?;
        Ok((input, Expr::pow(base, exp)))
    } else {
        Ok((input, base))
    }
}

fn parse_power_exponent(input: &str) -> IResult<&str, Rc<Expr>> {
    preceded(
        multispace0,
        alt((
            map(pair(tag("-"), parse_power_exponent), |(_, e)| Expr::neg(e)),
            map(pair(tag("+"), parse_power_exponent), |(_, e)| e),
            parse_power,
        )),
    )(input)
}

// Unary minus binds weaker than ^, so -2^2 = -(2^2) = -4
fn parse_unary(input: &str) -> IResult<&str, Rc<Expr>> {
    alt((
        map(pair(preceded(multispace0, tag("-")), parse_unary), |(_, e)| {
            Expr::neg(e)
        }),
        map(pair(preceded(multispace0, tag("+")), parse_unary), |(_, e)| e),
        parse_power,
    ))(input)
}

// Term - explicit * and / only; implicit products are the normalizer's job
fn parse_term(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("*"), tag("/")))), parse_unary),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" => Expr::mul(acc, val),
            _ => Expr::div(acc, val),
        },
    )(input)
}

// Expr
fn parse_expr(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => Expr::add(acc, val),
            _ => Expr::sub(acc, val),
        },
    )(input)
}

fn check_limits(input: &str) -> Result<(), ParseError> {
    let len = input.chars().count();
    if len > MAX_INPUT_LEN {
        return Err(ParseError::TooLong {
            len,
            max: MAX_INPUT_LEN,
        });
    }

    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or(ParseError::UnbalancedParens)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::UnbalancedParens);
    }
    if max_depth > MAX_NESTING {
        return Err(ParseError::TooDeep {
            depth: max_depth,
            max: MAX_NESTING,
        });
    }
    Ok(())
}

/// Parse an expression written with explicit operators.
///
/// The input is expected to be normalized already (see
/// [`crate::normalize`]); whitespace is still tolerated between tokens.
pub fn parse(input: &str) -> Result<Rc<Expr>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    check_limits(input)?;

    let (remaining, expr) = parse_expr(input).map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    Ok(expr)
}
