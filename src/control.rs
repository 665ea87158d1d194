use crate::tree::{Label, Node};

/// A binary operator of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binop {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Gr,
    Ge,
    Ls,
    Le,
    Eq,
    Ne,
    Or,
    And,
    Aug,
}

/// A unary operator of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unop {
    Neg,
    Not,
}

/// A single item of a control sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlItem {
    /// A tagged leaf, resolved through the machine's lookup.
    Name(Label),
    /// A compiled lambda: the index of its body sequence and its bound names.
    Lambda { index: usize, vars: Vec<String> },
    /// A reference to a conditional branch sequence.
    Delta(usize),
    Beta,
    /// A tuple constructor of the given arity.
    Tau(usize),
    Gamma,
    Binary(Binop),
    Unary(Unop),
    /// An environment marker `e_i`.
    Env(usize),
}

/// Flattens a standardized tree into numbered control sequences.
///
/// Sequence 0 is the program entry. Every `lambda` body and every branch of
/// a conditional is compiled into a fresh sequence of its own; the counter
/// hands out the indices.
pub struct Compiler {
    structures: Vec<Vec<ControlItem>>,
    count: usize,
}

impl Compiler {
    /// Compiles the standardized tree and returns the sequence store.
    pub fn compile(root: &Node) -> Vec<Vec<ControlItem>> {
        let mut compiler = Compiler { structures: vec!(), count: 0 };
        compiler.emit(root, 0);
        compiler.structures
    }

    /// Returns the sequence at the index, growing the store if needed.
    fn sequence(&mut self, index: usize) -> &mut Vec<ControlItem> {
        while self.structures.len() <= index {
            self.structures.push(Vec::new());
        }

        &mut self.structures[index]
    }

    /// Emits the node and its children into the sequence at `index`.
    fn emit(&mut self, node: &Node, index: usize) {
        self.sequence(index);

        match &node.label {
            Label::Lambda if !node.children.is_empty() => {
                self.count += 1;
                let fresh = self.count;
                let vars = bound_names(&node.children[0]);

                self.sequence(index).push(ControlItem::Lambda { index: fresh, vars });

                for child in &node.children[1..] {
                    self.emit(child, fresh);
                }
            },
            Label::Arrow if node.children.len() == 3 => {
                self.count += 1;
                let then_index = self.count;
                self.sequence(index).push(ControlItem::Delta(then_index));
                self.emit(&node.children[1], then_index);

                self.count += 1;
                let else_index = self.count;
                self.sequence(index).push(ControlItem::Delta(else_index));
                self.emit(&node.children[2], else_index);

                self.sequence(index).push(ControlItem::Beta);

                // The condition goes last so that execution pops it first.
                self.emit(&node.children[0], index);
            },
            Label::Tau => {
                self.sequence(index).push(ControlItem::Tau(node.children.len()));

                for child in &node.children {
                    self.emit(child, index);
                }
            },
            label => {
                self.sequence(index).push(item_for(label));

                for child in &node.children {
                    self.emit(child, index);
                }
            },
        }
    }
}

/// Collects the bound names of a lambda binder.
///
/// A `,` binder contributes each of its identifier names; any other binder
/// contributes a single name.
fn bound_names(binder: &Node) -> Vec<String> {
    match &binder.label {
        Label::Comma => binder.children.iter().map(binder_name).collect(),
        _ => vec![binder_name(binder)],
    }
}

/// Returns the bare name of a binder node, stripped of its tag.
fn binder_name(node: &Node) -> String {
    match &node.label {
        Label::Id(name) => name.clone(),
        label => label.to_string(),
    }
}

/// Maps a node label onto its control item.
fn item_for(label: &Label) -> ControlItem {
    match label {
        Label::Gamma => ControlItem::Gamma,
        Label::Plus => ControlItem::Binary(Binop::Add),
        Label::Minus => ControlItem::Binary(Binop::Sub),
        Label::Star => ControlItem::Binary(Binop::Mul),
        Label::Slash => ControlItem::Binary(Binop::Div),
        Label::Power => ControlItem::Binary(Binop::Pow),
        Label::Gr => ControlItem::Binary(Binop::Gr),
        Label::Ge => ControlItem::Binary(Binop::Ge),
        Label::Ls => ControlItem::Binary(Binop::Ls),
        Label::Le => ControlItem::Binary(Binop::Le),
        Label::Eq => ControlItem::Binary(Binop::Eq),
        Label::Ne => ControlItem::Binary(Binop::Ne),
        Label::Or => ControlItem::Binary(Binop::Or),
        Label::Amp => ControlItem::Binary(Binop::And),
        Label::Aug => ControlItem::Binary(Binop::Aug),
        Label::Not => ControlItem::Unary(Unop::Not),
        Label::Neg => ControlItem::Unary(Unop::Neg),
        label => ControlItem::Name(label.clone()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;
    use crate::screener::screen;
    use crate::standardizer::standardize;

    fn compiled(source: &str) -> Vec<Vec<ControlItem>> {
        let (tokens, _) = screen(Scanner::new(source).scan_tokens().unwrap());
        let tree = standardize(Parser::new(tokens).parse().unwrap());
        Compiler::compile(&tree)
    }

    #[test]
    fn compile_let() {
        let structures = compiled("let x = 5 in x");

        assert_eq!(structures.len(), 2);
        assert_eq!(structures[0], vec![
            ControlItem::Gamma,
            ControlItem::Lambda { index: 1, vars: vec![String::from("x")] },
            ControlItem::Name(Label::Int(String::from("5"))),
        ]);
        assert_eq!(structures[1], vec![
            ControlItem::Name(Label::Id(String::from("x"))),
        ]);
    }

    #[test]
    fn compile_conditional_emits_condition_last() {
        let structures = compiled("true -> 1 | 2");

        assert_eq!(structures[0], vec![
            ControlItem::Delta(1),
            ControlItem::Delta(2),
            ControlItem::Beta,
            ControlItem::Name(Label::True),
        ]);
        assert_eq!(structures[1], vec![ControlItem::Name(Label::Int(String::from("1")))]);
        assert_eq!(structures[2], vec![ControlItem::Name(Label::Int(String::from("2")))]);
    }

    #[test]
    fn compile_tau() {
        let structures = compiled("1, 2, 3");

        assert_eq!(structures[0][0], ControlItem::Tau(3));
        assert_eq!(structures[0].len(), 4);
    }

    #[test]
    fn compile_comma_binder() {
        let structures = compiled("let x, y = p in x");

        assert_eq!(structures[0][1], ControlItem::Lambda {
            index: 1,
            vars: vec![String::from("x"), String::from("y")],
        });
    }

    #[test]
    fn compile_operators() {
        let structures = compiled("not (1 + 2 eq 3)");

        assert_eq!(structures[0], vec![
            ControlItem::Unary(Unop::Not),
            ControlItem::Binary(Binop::Eq),
            ControlItem::Binary(Binop::Add),
            ControlItem::Name(Label::Int(String::from("1"))),
            ControlItem::Name(Label::Int(String::from("2"))),
            ControlItem::Name(Label::Int(String::from("3"))),
        ]);
    }

    #[test]
    fn compile_references_only_existing_sequences() {
        let structures = compiled(
            "let rec f n = n eq 0 -> 1 | n * f (n - 1) in f 5",
        );

        for sequence in &structures {
            for item in sequence {
                let index = match item {
                    ControlItem::Lambda { index, .. } => *index,
                    ControlItem::Delta(index) => *index,
                    _ => continue,
                };
                assert!(index < structures.len());
                assert!(!structures[index].is_empty());
            }
        }
    }
}
