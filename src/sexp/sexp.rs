use std::rc::Rc;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    lexer::{reader::Reader, tokens::TokenKind},
    Position,
};

/// Renders a node as `s(:Variant, field, ...)`: child nodes recurse,
/// sequences render as `[...]`, strings render quoted, operator kinds as
/// `:symbol`, absent optional fields as `nil`. Field order follows the
/// variant's declaration order.
pub fn to_sexp(node: &Ast) -> String {
    match node {
        Ast::Name { name } => format!("s(:Name, {:?})", name),
        Ast::Const { name } => format!("s(:Const, {:?})", name),
        Ast::Int { value } => format!("s(:Int, {})", value),
        Ast::DoubleString { string } => format!("s(:DoubleString, {:?})", string),

        Ast::True | Ast::False | Ast::Nil | Ast::SelfExp | Ast::Break | Ast::Next => {
            format!("s(:{})", node.node_name())
        }

        Ast::Prefix { op, operand } => format!("s(:Prefix, :{}, {})", op, to_sexp(operand)),
        Ast::BinaryOp { left, op, right } => {
            format!("s(:BinaryOp, {}, :{}, {})", to_sexp(left), op, to_sexp(right))
        }
        Ast::And { left, right } => format!("s(:And, {}, {})", to_sexp(left), to_sexp(right)),
        Ast::Or { left, right } => format!("s(:Or, {}, {})", to_sexp(left), to_sexp(right)),
        Ast::Not { expr } => format!("s(:Not, {})", to_sexp(expr)),
        Ast::Assign { name, value } => {
            format!("s(:Assign, {}, {})", to_sexp(name), to_sexp(value))
        }

        Ast::ArgList { args } => format!("s(:ArgList, {})", seq(args)),
        Ast::Block { exps } => format!("s(:Block, {})", seq(exps)),

        Ast::If {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "s(:If, {}, {}, {})",
            to_sexp(cond),
            to_sexp(then_branch),
            opt(else_branch)
        ),
        Ast::Unless {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "s(:Unless, {}, {}, {})",
            to_sexp(cond),
            to_sexp(then_branch),
            opt(else_branch)
        ),
        Ast::Case {
            case_value,
            when_clauses,
            else_clause,
        } => format!(
            "s(:Case, {}, {}, {})",
            opt(case_value),
            seq(when_clauses),
            opt(else_clause)
        ),
        Ast::When {
            when_value,
            when_block,
        } => format!("s(:When, {}, {})", to_sexp(when_value), to_sexp(when_block)),

        Ast::Class { name, parent, body } => format!(
            "s(:Class, {}, {}, {})",
            to_sexp(name),
            opt(parent),
            to_sexp(body)
        ),
        Ast::Module { name, body } => {
            format!("s(:Module, {}, {})", to_sexp(name), to_sexp(body))
        }
        Ast::Method { name, params, body } => format!(
            "s(:Method, {:?}, {}, {})",
            name,
            to_sexp(params),
            to_sexp(body)
        ),
        Ast::SelfMethod { name, params, body } => format!(
            "s(:SelfMethod, {:?}, {}, {})",
            name,
            to_sexp(params),
            to_sexp(body)
        ),

        Ast::Call {
            target,
            method,
            args,
            block,
        } => format!(
            "s(:Call, {}, {:?}, {}, {})",
            opt(target),
            method,
            to_sexp(args),
            opt(block)
        ),
        Ast::DoBlock { args, block } => {
            format!("s(:DoBlock, {}, {})", to_sexp(args), to_sexp(block))
        }

        Ast::BeginBlock {
            body,
            rescues,
            ensure_clause,
            else_clause,
        } => format!(
            "s(:BeginBlock, {}, {}, {}, {})",
            to_sexp(body),
            seq(rescues),
            opt(ensure_clause),
            opt(else_clause)
        ),
        Ast::Rescue {
            body,
            exception_class,
            exception_variable,
        } => format!(
            "s(:Rescue, {}, {}, {})",
            to_sexp(body),
            opt(exception_class),
            opt(exception_variable)
        ),
    }
}

fn opt(node: &Option<Box<Ast>>) -> String {
    match node {
        Some(node) => to_sexp(node),
        None => String::from("nil"),
    }
}

fn seq(nodes: &[Ast]) -> String {
    let rendered: Vec<String> = nodes.iter().map(to_sexp).collect();
    format!("[{}]", rendered.join(", "))
}

/// Evaluates the textual form back into a node. The statically-typed
/// stand-in for reconstructing nodes by constant lookup: each tag maps
/// to its constructor explicitly.
pub fn parse(input: &str) -> Result<Ast, Error> {
    let mut reader = SexpReader::new(input);
    let value = reader.parse_value()?;

    reader.skip_whitespace();
    if let Some(c) = reader.next_char() {
        return Err(reader.fail(format!("trailing `{}` after sexp", c)));
    }

    match value {
        SexpValue::Node(node) => Ok(node),
        other => Err(reader.fail(format!("expected a node, got {}", other.describe()))),
    }
}

/// A field value inside a sexp, before tag dispatch decides what the
/// surrounding node does with it.
enum SexpValue {
    Node(Ast),
    Str(String),
    Int(i64),
    Sym(String),
    List(Vec<SexpValue>),
    Nil,
}

impl SexpValue {
    fn describe(&self) -> &'static str {
        match self {
            SexpValue::Node(_) => "a node",
            SexpValue::Str(_) => "a string",
            SexpValue::Int(_) => "an integer",
            SexpValue::Sym(_) => "a symbol",
            SexpValue::List(_) => "a list",
            SexpValue::Nil => "nil",
        }
    }
}

struct SexpReader {
    reader: Reader,
    file: Rc<String>,
}

impl SexpReader {
    fn new(input: &str) -> SexpReader {
        SexpReader {
            reader: Reader::new(input),
            file: Rc::new(String::from("<sexp>")),
        }
    }

    fn fail(&self, message: String) -> Error {
        Error::new(
            ErrorImpl::MalformedSexp { message },
            Position(self.reader.position(), Rc::clone(&self.file)),
        )
    }

    fn next_char(&mut self) -> Option<char> {
        self.reader.next_char()
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.reader.next_char() {
                Some(c) if c.is_whitespace() => continue,
                Some(_) => {
                    self.reader.back();
                    return;
                }
                None => return,
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), Error> {
        match self.reader.next_char() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.fail(format!("expected `{}`, got `{}`", expected, c))),
            None => Err(self.fail(format!("expected `{}`, got end of input", expected))),
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => word.push(c),
                Some(_) => {
                    self.reader.back();
                    break;
                }
                None => break,
            }
        }
        word
    }

    fn parse_value(&mut self) -> Result<SexpValue, Error> {
        self.skip_whitespace();

        match self.next_char() {
            Some('s') => {
                self.reader.back();
                self.parse_node()
            }
            Some('"') => Ok(SexpValue::Str(self.parse_string()?)),
            Some(':') => Ok(SexpValue::Sym(self.read_word())),
            Some('[') => self.parse_list(),
            Some('n') => {
                self.reader.back();
                let word = self.read_word();
                if word == "nil" {
                    Ok(SexpValue::Nil)
                } else {
                    Err(self.fail(format!("unknown word `{}`", word)))
                }
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                self.reader.back();
                self.parse_int()
            }
            Some(c) => Err(self.fail(format!("unexpected `{}`", c))),
            None => Err(self.fail(String::from("unexpected end of input"))),
        }
    }

    fn parse_node(&mut self) -> Result<SexpValue, Error> {
        self.expect_char('s')?;
        self.expect_char('(')?;
        self.expect_char(':')?;

        let tag = self.read_word();
        let mut values = vec![];

        loop {
            self.skip_whitespace();
            match self.next_char() {
                Some(',') => values.push(self.parse_value()?),
                Some(')') => break,
                Some(c) => return Err(self.fail(format!("expected `,` or `)`, got `{}`", c))),
                None => return Err(self.fail(String::from("unterminated sexp"))),
            }
        }

        Ok(SexpValue::Node(self.build_node(&tag, values)?))
    }

    fn parse_list(&mut self) -> Result<SexpValue, Error> {
        let mut values = vec![];

        self.skip_whitespace();
        if let Some(c) = self.next_char() {
            if c == ']' {
                return Ok(SexpValue::List(values));
            }
            self.reader.back();
        }

        loop {
            values.push(self.parse_value()?);
            self.skip_whitespace();
            match self.next_char() {
                Some(',') => continue,
                Some(']') => break,
                Some(c) => return Err(self.fail(format!("expected `,` or `]`, got `{}`", c))),
                None => return Err(self.fail(String::from("unterminated list"))),
            }
        }

        Ok(SexpValue::List(values))
    }

    fn parse_string(&mut self) -> Result<String, Error> {
        let mut string = String::new();

        loop {
            match self.next_char() {
                Some('"') => return Ok(string),
                Some('\\') => match self.next_char() {
                    Some('n') => string.push('\n'),
                    Some('t') => string.push('\t'),
                    Some('r') => string.push('\r'),
                    Some('0') => string.push('\0'),
                    Some('u') => {
                        self.expect_char('{')?;
                        let mut hex = String::new();
                        loop {
                            match self.next_char() {
                                Some('}') => break,
                                Some(c) => hex.push(c),
                                None => {
                                    return Err(self.fail(String::from("unterminated escape")))
                                }
                            }
                        }
                        let code = u32::from_str_radix(&hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| self.fail(format!("bad escape `\\u{{{}}}`", hex)))?;
                        string.push(code);
                    }
                    Some(c) => string.push(c),
                    None => return Err(self.fail(String::from("unterminated escape"))),
                },
                Some(c) => string.push(c),
                None => return Err(self.fail(String::from("unterminated string"))),
            }
        }
    }

    fn parse_int(&mut self) -> Result<SexpValue, Error> {
        let mut digits = String::new();

        if let Some(c) = self.next_char() {
            if c == '-' {
                digits.push(c);
            } else {
                self.reader.back();
            }
        }
        digits.push_str(&self.read_word());

        match digits.parse() {
            Ok(value) => Ok(SexpValue::Int(value)),
            Err(_) => Err(self.fail(format!("bad integer `{}`", digits))),
        }
    }

    fn build_node(&self, tag: &str, values: Vec<SexpValue>) -> Result<Ast, Error> {
        let mut args = SexpArgs::new(self, tag, values);

        let node = match tag {
            "Name" => Ast::Name { name: args.string()? },
            "Const" => Ast::Const { name: args.string()? },
            "Int" => Ast::Int { value: args.int()? },
            "DoubleString" => Ast::DoubleString {
                string: args.string()?,
            },

            "True" => Ast::True,
            "False" => Ast::False,
            "Nil" => Ast::Nil,
            "Self" => Ast::SelfExp,
            "Break" => Ast::Break,
            "Next" => Ast::Next,

            "Prefix" => Ast::Prefix {
                op: args.operator()?,
                operand: args.node()?,
            },
            "BinaryOp" => Ast::BinaryOp {
                left: args.node()?,
                op: args.operator()?,
                right: args.node()?,
            },
            "And" => Ast::And {
                left: args.node()?,
                right: args.node()?,
            },
            "Or" => Ast::Or {
                left: args.node()?,
                right: args.node()?,
            },
            "Not" => Ast::Not { expr: args.node()? },
            "Assign" => Ast::Assign {
                name: args.node()?,
                value: args.node()?,
            },

            "ArgList" => Ast::ArgList { args: args.list()? },
            "Block" => Ast::Block { exps: args.list()? },

            "If" => Ast::If {
                cond: args.node()?,
                then_branch: args.node()?,
                else_branch: args.opt_node()?,
            },
            "Unless" => Ast::Unless {
                cond: args.node()?,
                then_branch: args.node()?,
                else_branch: args.opt_node()?,
            },
            "Case" => Ast::Case {
                case_value: args.opt_node()?,
                when_clauses: args.list()?,
                else_clause: args.opt_node()?,
            },
            "When" => Ast::When {
                when_value: args.node()?,
                when_block: args.node()?,
            },

            "Class" => Ast::Class {
                name: args.node()?,
                parent: args.opt_node()?,
                body: args.node()?,
            },
            "Module" => Ast::Module {
                name: args.node()?,
                body: args.node()?,
            },
            "Method" => Ast::Method {
                name: args.string()?,
                params: args.node()?,
                body: args.node()?,
            },
            "SelfMethod" => Ast::SelfMethod {
                name: args.string()?,
                params: args.node()?,
                body: args.node()?,
            },

            "Call" => Ast::Call {
                target: args.opt_node()?,
                method: args.string()?,
                args: args.node()?,
                block: args.opt_node()?,
            },
            "DoBlock" => Ast::DoBlock {
                args: args.node()?,
                block: args.node()?,
            },

            "BeginBlock" => Ast::BeginBlock {
                body: args.node()?,
                rescues: args.list()?,
                ensure_clause: args.opt_node()?,
                else_clause: args.opt_node()?,
            },
            "Rescue" => Ast::Rescue {
                body: args.node()?,
                exception_class: args.opt_node()?,
                exception_variable: args.opt_node()?,
            },

            _ => return Err(self.fail(format!("unknown node tag `{}`", tag))),
        };

        args.finish()?;
        Ok(node)
    }
}

/// Field values for one node, consumed left to right during
/// reconstruction.
struct SexpArgs<'a> {
    reader: &'a SexpReader,
    tag: &'a str,
    values: std::vec::IntoIter<SexpValue>,
}

impl<'a> SexpArgs<'a> {
    fn new(reader: &'a SexpReader, tag: &'a str, values: Vec<SexpValue>) -> SexpArgs<'a> {
        SexpArgs {
            reader,
            tag,
            values: values.into_iter(),
        }
    }

    fn take(&mut self, wanted: &str) -> Result<SexpValue, Error> {
        self.values
            .next()
            .ok_or_else(|| self.reader.fail(format!("{}: missing {}", self.tag, wanted)))
    }

    fn node(&mut self) -> Result<Box<Ast>, Error> {
        match self.take("node")? {
            SexpValue::Node(node) => Ok(Box::new(node)),
            other => Err(self
                .reader
                .fail(format!("{}: expected a node, got {}", self.tag, other.describe()))),
        }
    }

    fn opt_node(&mut self) -> Result<Option<Box<Ast>>, Error> {
        match self.take("node or nil")? {
            SexpValue::Node(node) => Ok(Some(Box::new(node))),
            SexpValue::Nil => Ok(None),
            other => Err(self.reader.fail(format!(
                "{}: expected a node or nil, got {}",
                self.tag,
                other.describe()
            ))),
        }
    }

    fn string(&mut self) -> Result<String, Error> {
        match self.take("string")? {
            SexpValue::Str(string) => Ok(string),
            other => Err(self.reader.fail(format!(
                "{}: expected a string, got {}",
                self.tag,
                other.describe()
            ))),
        }
    }

    fn int(&mut self) -> Result<i64, Error> {
        match self.take("integer")? {
            SexpValue::Int(value) => Ok(value),
            other => Err(self.reader.fail(format!(
                "{}: expected an integer, got {}",
                self.tag,
                other.describe()
            ))),
        }
    }

    fn operator(&mut self) -> Result<TokenKind, Error> {
        match self.take("operator symbol")? {
            SexpValue::Sym(name) => operator_kind(&name)
                .ok_or_else(|| self.reader.fail(format!("unknown operator `:{}`", name))),
            other => Err(self.reader.fail(format!(
                "{}: expected a symbol, got {}",
                self.tag,
                other.describe()
            ))),
        }
    }

    fn list(&mut self) -> Result<Vec<Ast>, Error> {
        match self.take("list")? {
            SexpValue::List(values) => {
                let mut nodes = vec![];
                for value in values {
                    match value {
                        SexpValue::Node(node) => nodes.push(node),
                        other => {
                            return Err(self.reader.fail(format!(
                                "{}: lists may only hold nodes, got {}",
                                self.tag,
                                other.describe()
                            )))
                        }
                    }
                }
                Ok(nodes)
            }
            other => Err(self.reader.fail(format!(
                "{}: expected a list, got {}",
                self.tag,
                other.describe()
            ))),
        }
    }

    fn finish(mut self) -> Result<(), Error> {
        if self.values.next().is_some() {
            return Err(self
                .reader
                .fail(format!("{}: too many fields", self.tag)));
        }
        Ok(())
    }
}

fn operator_kind(name: &str) -> Option<TokenKind> {
    match name {
        "plus" => Some(TokenKind::Plus),
        "minus" => Some(TokenKind::Minus),
        "prod" => Some(TokenKind::Prod),
        "div" => Some(TokenKind::Div),
        "gt" => Some(TokenKind::Gt),
        "lt" => Some(TokenKind::Lt),
        "equals" => Some(TokenKind::Equals),
        _ => None,
    }
}
