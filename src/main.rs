use std::{env, fs::read_to_string, time::Instant};

use frontend::{display_error, parser::parser::parse, sexp::sexp::to_sexp};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let source = read_to_string(file_path).expect("Failed to read file!");

    let start = Instant::now();
    let ast = parse(&source, Some(String::from(file_name)));

    println!("Parsed in {:?}", start.elapsed());

    match ast {
        Ok(ast) => println!("{}", pretty_print(to_sexp(&ast))),
        Err(error) => {
            display_error(&error, file_path, &source);
            std::process::exit(1);
        }
    }
}

fn pretty_print(string: String) -> String {
    let mut result = String::new();
    let mut indent = 0;
    let mut ignore_next_space = false;
    let mut in_string = false;
    let mut escaped = false;

    for c in string.chars() {
        if in_string {
            result.push(c);
            in_string = c != '"' || escaped;
            escaped = c == '\\' && !escaped;
            continue;
        }

        match c {
            '"' => {
                result.push(c);
                in_string = true;
                escaped = false;
            }
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            ')' | ']' => {
                indent -= 1;
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
