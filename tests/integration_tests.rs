//! Integration tests for the whole front end.
//!
//! These tests drive the complete pipeline (reader, lexer, parser) from
//! source text to AST, and check the sexp serializer against the trees
//! the parser actually builds.

use frontend::{
    ast::ast::Ast,
    lexer::{
        lexer::Lexer,
        reader::Reader,
        tokens::{TokenKind, TokenSource},
    },
    parser::parser::parse,
    sexp::sexp,
};

#[test]
fn test_parse_class_with_methods() {
    let source = r#"
class Greeter < Base
  def initialize(name)
    name
  end

  def self.default
    Greeter
  end

  def greet
    io.puts("hello")
  end
end
"#;

    let ast = parse(source, Some("greeter.rbl".to_string())).unwrap();

    match ast {
        Ast::Class {
            name,
            parent,
            body,
        } => {
            assert_eq!(
                *name,
                Ast::Const {
                    name: "Greeter".to_string()
                }
            );
            assert_eq!(
                parent,
                Some(Box::new(Ast::Const {
                    name: "Base".to_string()
                }))
            );

            let Ast::Block { exps } = *body else {
                panic!("class body should be a block");
            };
            assert_eq!(exps.len(), 3);
            assert_eq!(exps[0].node_name(), "Method");
            assert_eq!(exps[1].node_name(), "SelfMethod");
            assert_eq!(exps[2].node_name(), "Method");
        }
        other => panic!("expected a class, got {:?}", other),
    }
}

#[test]
fn test_parse_module_with_exception_handling() {
    let source = r#"
module Runner
  def run(task)
    begin
      task.call()
    rescue TaskError => e
      log(e)
    ensure
      cleanup()
    end
  end
end
"#;

    let ast = parse(source, None).unwrap();
    assert_eq!(ast.node_name(), "Module");
}

#[test]
fn test_parse_case_dispatch() {
    let source = r#"
case command
when "start"
  server.start()
when "stop"
  server.stop()
else
  usage()
end
"#;

    let ast = parse(source, None).unwrap();

    match ast {
        Ast::Case {
            case_value,
            when_clauses,
            else_clause,
        } => {
            assert!(case_value.is_some());
            assert_eq!(when_clauses.len(), 2);
            assert!(else_clause.is_some());
        }
        other => panic!("expected a case, got {:?}", other),
    }
}

#[test]
fn test_parse_iteration_with_do_blocks() {
    let source = r#"
items.each do |item|
  unless item.valid()
    skipped.push(item)
  end
end
"#;

    let ast = parse(source, None).unwrap();

    match ast {
        Ast::Call { method, block, .. } => {
            assert_eq!(method, "each");
            assert!(block.is_some());
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_program_roundtrips_through_sexp() {
    let source = r#"
class Stack
  def self.empty
    Stack.new(nil)
  end

  def push(value)
    if full
      nil
    else
      items.append(value)
    end
  end
end
"#;

    let ast = parse(source, None).unwrap();
    let rebuilt = sexp::parse(&sexp::to_sexp(&ast)).unwrap();

    assert_eq!(ast, rebuilt);
}

#[test]
fn test_top_level_script_becomes_block() {
    let source = "x = 1\ny = 2\nx + y";

    let ast = parse(source, None).unwrap();

    match ast {
        Ast::Block { exps } => assert_eq!(exps.len(), 3),
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_lex_error_surfaces_from_parse() {
    let result = parse("x = @", None);

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "LexError");
}

#[test]
fn test_error_position_points_at_offender() {
    let result = parse("x = @", None);

    let error = result.err().unwrap();
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_missing_end_is_reported() {
    let result = parse("class Incomplete\n  def run\n    1\n  end", None);

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "UnexpectedToken");
}

#[test]
fn test_tokens_can_be_drained_directly() {
    let mut lexer = Lexer::new(Reader::new("a.b(1)"), None);
    let tokens = lexer.all().unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Name,
            TokenKind::Dot,
            TokenKind::Name,
            TokenKind::LParen,
            TokenKind::Int,
            TokenKind::RParen,
        ]
    );
    assert!(lexer.is_empty().unwrap());
}
