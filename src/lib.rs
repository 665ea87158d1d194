//! RPAL is a small, higher-order, call-by-value functional language with
//! tuples, strings, integers, conditionals, let/where bindings, recursive
//! definitions and a fixed set of built-in primitives. This crate compiles
//! RPAL source down to flat control sequences and executes them on a
//! control-stack-environment (CSE) machine.
//!
//! ## Scanning and screening
//! The first step is scanning: converting the characters of the source into
//! a list of tokens. The scanner is implemented in the [`scanner`](scanner)
//! module as a state machine over the character stream; it keeps the
//! whitespace and comment tokens it finds, tagged for deletion, so that the
//! token list still mirrors the source. The [`screener`](screener) then
//! promotes reserved identifiers to keywords, drops the deletion-tagged
//! tokens and reports the first invalid token, leaving exactly the stream
//! the parser wants to see.
//!
//! ## Parsing
//! The parser is implemented in the [`parser`](parser) module as a
//! recursive descent parser over the RPAL grammar. Instead of a family of
//! node structs, every reduction pushes a [`Node`](tree::Node) onto a
//! working stack and finished productions pop their children back off, so
//! the tree falls out of the order of the reductions. The result is the
//! abstract syntax tree, rendered in preorder with one dot per level of
//! depth.
//!
//! ## Standardizing
//! RPAL's binding forms are all sugar over function application. The
//! [`standardizer`](standardizer) rewrites the tree bottom-up with eight
//! rules (`let`, `where`, `function_form`, curried `gamma`, `within`, `@`,
//! `and`, `rec`) until only `gamma`, `lambda`, conditionals, tuples,
//! operators and tagged leaves remain. Recursion is expressed with the
//! fixed-point combinator `Y*` rather than with cyclic references.
//!
//! ## Compiling and running
//! The [`control`](control) module flattens the standardized tree into
//! numbered control sequences: every lambda body and every conditional
//! branch becomes a sequence of its own. The [`machine`](machine) module
//! executes sequence 0 with the classic thirteen CSE rules over a value
//! stack and a tree of environments; applying a closure opens a fresh
//! [`Scope`](environment::Scope), and applying an eta closure unfolds one
//! step of a `Y*` recursion. The final value is rendered with the
//! language's output conventions by [`Value`](value::Value)'s `Display`
//! implementation, and it is emitted only if the program called `Print`.

use control::Compiler;
use error::{Error, ScanError};
use machine::{Evaluation, Machine};
use parser::Parser;
use scanner::Scanner;
use tree::Node;

pub mod control;
pub mod environment;
pub mod error;
pub mod machine;
pub mod parser;
pub mod scanner;
pub mod screener;
pub mod standardizer;
pub mod token;
pub mod tree;
pub mod value;

pub use standardizer::standardize;

/// Scans, screens and parses source into its abstract syntax tree.
pub fn parse(source: &str) -> Result<Node, Box<dyn Error>> {
    let mut scanner = Scanner::new(source);
    let tokens = match scanner.scan_tokens() {
        Ok(tokens) => tokens,
        Err(error) => return Err(Box::new(error)),
    };

    let (tokens, invalid) = screener::screen(tokens);

    if let Some(token) = invalid {
        return Err(Box::new(ScanError::new(
            token.line,
            format!("invalid token '{}'", token.lexeme),
        )));
    }

    match Parser::new(tokens).parse() {
        Ok(tree) => Ok(tree),
        Err(error) => Err(Box::new(error)),
    }
}

/// Runs a program through the whole pipeline and returns its evaluation.
pub fn interpret(source: &str) -> Result<Evaluation, Box<dyn Error>> {
    let tree = standardize(parse(source)?);
    let structures = Compiler::compile(&tree);

    match Machine::new(structures).run() {
        Ok(evaluation) => Ok(evaluation),
        Err(error) => Err(Box::new(error)),
    }
}
