use std::fmt;
use std::rc::Rc;

/// Named constants recognised by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Variable(String),
    Add(Rc<Expr>, Rc<Expr>),
    Sub(Rc<Expr>, Rc<Expr>),
    Mul(Rc<Expr>, Rc<Expr>),
    Div(Rc<Expr>, Rc<Expr>),
    Pow(Rc<Expr>, Rc<Expr>),
    Neg(Rc<Expr>),
    Function(String, Vec<Rc<Expr>>), // e.g., sin(x), sqrt(x + 1)
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn num(n: f64) -> Rc<Self> {
        Rc::new(Expr::Number(n))
    }

    pub fn var(name: &str) -> Rc<Self> {
        Rc::new(Expr::Variable(name.to_string()))
    }

    pub fn constant(c: Constant) -> Rc<Self> {
        Rc::new(Expr::Constant(c))
    }

    pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Add(lhs, rhs))
    }

    pub fn sub(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Sub(lhs, rhs))
    }

    pub fn mul(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Mul(lhs, rhs))
    }

    pub fn div(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Div(lhs, rhs))
    }

    pub fn pow(base: Rc<Expr>, exp: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Pow(base, exp))
    }

    pub fn neg(expr: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Neg(expr))
    }

    pub fn func(name: &str, args: Vec<Rc<Expr>>) -> Rc<Self> {
        Rc::new(Expr::Function(name.to_string(), args))
    }

    /// Direct children of this node, left to right.
    pub fn children(&self) -> Vec<&Rc<Expr>> {
        match self {
            Expr::Number(_) | Expr::Constant(_) | Expr::Variable(_) => Vec::new(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => vec![l, r],
            Expr::Neg(inner) => vec![inner],
            Expr::Function(_, args) => args.iter().collect(),
        }
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => 1,
            Expr::Mul(_, _) | Expr::Div(_, _) => 2,
            // Unary minus binds weaker than ^: -x^2 is -(x^2)
            Expr::Neg(_) => 3,
            Expr::Pow(_, _) => 4,
            Expr::Function(_, _) | Expr::Number(_) | Expr::Constant(_) | Expr::Variable(_) => 5,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Expr::Constant(Constant::Pi) => write!(f, "pi"),
            Expr::Constant(Constant::E) => write!(f, "e"),
            Expr::Variable(s) => write!(f, "{}", s),
            Expr::Add(l, r) => self.fmt_binary(f, l, " + ", r, false),
            // a - (b - c) keeps its parentheses: subtraction is left-associative
            Expr::Sub(l, r) => self.fmt_binary(f, l, " - ", r, true),
            Expr::Mul(l, r) => self.fmt_binary(f, l, " * ", r, false),
            Expr::Div(l, r) => self.fmt_binary(f, l, " / ", r, true),
            Expr::Pow(b, e) => {
                let my_prec = self.precedence();
                // Right-associative: the base needs parens at equal precedence
                if b.precedence() <= my_prec {
                    write!(f, "({})", b)?
                } else {
                    write!(f, "{}", b)?
                }
                if e.precedence() < my_prec {
                    write!(f, "^({})", e)
                } else {
                    write!(f, "^{}", e)
                }
            }
            Expr::Neg(e) => {
                write!(f, "-")?;
                if e.precedence() < self.precedence() {
                    write!(f, "({})", e)
                } else {
                    write!(f, "{}", e)
                }
            }
            Expr::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Expr {
    fn fmt_binary(
        &self,
        f: &mut fmt::Formatter<'_>,
        l: &Expr,
        op: &str,
        r: &Expr,
        strict_rhs: bool,
    ) -> fmt::Result {
        let my_prec = self.precedence();
        if l.precedence() < my_prec {
            write!(f, "({})", l)?
        } else {
            write!(f, "{}", l)?
        }
        write!(f, "{}", op)?;
        let r_prec = r.precedence();
        if r_prec < my_prec || (strict_rhs && r_prec == my_prec) {
            write!(f, "({})", r)
        } else {
            write!(f, "{}", r)
        }
    }
}
