use crate::error::ParseError;
use crate::token::{Category, Token};
use crate::tree::{Label, Node};

type ParseResult<T> = Result<T, ParseError>;

/// Parses the screened tokens and returns the abstract syntax tree.
///
/// - E  -> "let" D "in" E | "fn" Vb+ "." E | Ew ;
/// - Ew -> T ( "where" Dr )? ;
/// - T  -> Ta ( "," Ta )* ;
/// - Ta -> Tc ( "aug" Tc )* ;
/// - Tc -> B ( "->" Tc "|" Tc )? ;
/// - B  -> Bt ( "or" Bt )* ;
/// - Bt -> Bs ( "&" Bs )* ;
/// - Bs -> "not" Bp | Bp ;
/// - Bp -> A ( ( "gr" | ">" | "ge" | ">=" | "ls" | "<" | "le" | "<=" | "eq" | "ne" ) A )? ;
/// - A  -> ( "+" | "-" )? At ( ( "+" | "-" ) At )* ;
/// - At -> Af ( ( "*" | "/" ) Af )* ;
/// - Af -> Ap ( "**" Af )? ;
/// - Ap -> R ( "@" IDENTIFIER R )* ;
/// - R  -> Rn Rn* ;
/// - Rn -> IDENTIFIER | INTEGER | STRING | "true" | "false" | "nil" | "dummy" | "(" E ")" ;
/// - D  -> Da ( "within" D )? ;
/// - Da -> Dr ( "and" Dr )* ;
/// - Dr -> "rec" Db | Db ;
/// - Db -> "(" D ")" | IDENTIFIER ( Vl "=" E | Vb+ "=" E ) ;
/// - Vb -> IDENTIFIER | "(" ")" | "(" IDENTIFIER Vl ")" ;
/// - Vl -> ( "," IDENTIFIER )* ;
///
/// Reductions push synthesized nodes onto a working stack; `build` pops the
/// children of a finished production and pushes the new node. Surface
/// comparison tokens are canonicalized to `gr`/`ge`/`ls`/`le`.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    stack: Vec<Node>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            stack: vec!(),
        }
    }

    /// Parses the tokens and returns the resulting tree.
    pub fn parse(&mut self) -> ParseResult<Node> {
        if self.tokens.is_empty() {
            return Err(ParseError::expected(1, "an expression", "end of input"));
        }

        self.e()?;

        self.stack.pop().ok_or_else(|| ParseError {
            line: self.line(),
            message: String::from("the tree stack ran out of nodes"),
        })
    }

    /// Returns the next token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the line number of the next token.
    fn line(&self) -> usize {
        self.peek().line
    }

    /// Returns if the next token has the given lexeme.
    fn check(&self, lexeme: &str) -> bool {
        self.peek().lexeme == lexeme
    }

    /// Returns the next token's lexeme quoted for a diagnostic.
    fn got(&self) -> String {
        format!("'{}'", self.peek().lexeme)
    }

    /// Consumes the next token.
    ///
    /// The terminal token is never dequeued. Once matched, its category is
    /// forced to punctuation so that every later lookahead check takes the
    /// non-matching branch.
    fn advance(&mut self) {
        if self.tokens[self.current].last {
            self.tokens[self.current].category = Category::Punctuation;
        } else {
            self.current += 1;
        }
    }

    /// Consumes the next token if it has the expected lexeme.
    fn expect(&mut self, expected: &str) -> ParseResult<()> {
        if !self.check(expected) {
            return Err(ParseError::expected(
                self.line(),
                &format!("'{expected}'"),
                &self.got(),
            ));
        }

        self.advance();
        Ok(())
    }

    /// Consumes an identifier token and pushes its leaf node.
    fn take_identifier(&mut self) {
        let name = self.peek().lexeme.clone();
        self.advance();
        self.stack.push(Node::leaf(Label::Id(name)));
    }

    /// Pops `count` children off the working stack and pushes a new node
    /// with them in their original order.
    fn build(&mut self, label: Label, count: usize) -> ParseResult<()> {
        let mut children = Vec::with_capacity(count);

        for _ in 0..count {
            let child = self.stack.pop().ok_or_else(|| ParseError {
                line: self.line(),
                message: String::from("the tree stack ran out of nodes"),
            })?;
            children.push(child);
        }

        children.reverse();
        self.stack.push(Node::branch(label, children));
        Ok(())
    }

    /// Parses an expression (E).
    fn e(&mut self) -> ParseResult<()> {
        if self.check("let") {
            self.expect("let")?;
            self.d()?;
            self.expect("in")?;
            self.e()?;
            self.build(Label::Let, 2)
        } else if self.check("fn") {
            self.expect("fn")?;

            let mut count = 0;
            while self.peek().category == Category::Identifier || self.check("(") {
                self.vb()?;
                count += 1;
            }

            if count == 0 {
                return Err(ParseError::expected(self.line(), "identifier or '('", &self.got()));
            }

            self.expect(".")?;
            self.e()?;
            self.build(Label::Lambda, count + 1)
        } else {
            self.ew()
        }
    }

    /// Parses an expression with an optional where clause (Ew).
    fn ew(&mut self) -> ParseResult<()> {
        self.t()?;

        if self.check("where") {
            self.expect("where")?;
            self.dr()?;
            self.build(Label::Where, 2)?;
        }

        Ok(())
    }

    /// Parses a tuple expression (T).
    fn t(&mut self) -> ParseResult<()> {
        self.ta()?;

        let mut count = 0;
        while self.check(",") {
            self.expect(",")?;
            self.ta()?;
            count += 1;
        }

        if count > 0 {
            self.build(Label::Tau, count + 1)?;
        }

        Ok(())
    }

    /// Parses a tuple augmentation (Ta).
    fn ta(&mut self) -> ParseResult<()> {
        self.tc()?;

        while self.check("aug") {
            self.expect("aug")?;
            self.tc()?;
            self.build(Label::Aug, 2)?;
        }

        Ok(())
    }

    /// Parses a conditional expression (Tc).
    fn tc(&mut self) -> ParseResult<()> {
        self.b()?;

        if self.check("->") {
            self.expect("->")?;
            self.tc()?;
            self.expect("|")?;
            self.tc()?;
            self.build(Label::Arrow, 3)?;
        }

        Ok(())
    }

    /// Parses a boolean expression (B).
    fn b(&mut self) -> ParseResult<()> {
        self.bt()?;

        while self.check("or") {
            self.expect("or")?;
            self.bt()?;
            self.build(Label::Or, 2)?;
        }

        Ok(())
    }

    /// Parses a boolean term (Bt).
    fn bt(&mut self) -> ParseResult<()> {
        self.bs()?;

        while self.check("&") {
            self.expect("&")?;
            self.bs()?;
            self.build(Label::Amp, 2)?;
        }

        Ok(())
    }

    /// Parses a boolean secondary (Bs).
    fn bs(&mut self) -> ParseResult<()> {
        if self.check("not") {
            self.expect("not")?;
            self.bp()?;
            self.build(Label::Not, 1)
        } else {
            self.bp()
        }
    }

    /// Parses a boolean primary (Bp).
    ///
    /// The surface forms `>`, `>=`, `<` and `<=` are canonicalized to
    /// `gr`, `ge`, `ls` and `le`.
    fn bp(&mut self) -> ParseResult<()> {
        self.a()?;

        let label = match self.peek().lexeme.as_str() {
            "gr" | ">" => Some(Label::Gr),
            "ge" | ">=" => Some(Label::Ge),
            "ls" | "<" => Some(Label::Ls),
            "le" | "<=" => Some(Label::Le),
            "eq" => Some(Label::Eq),
            "ne" => Some(Label::Ne),
            _ => None,
        };

        if let Some(label) = label {
            self.advance();
            self.a()?;
            self.build(label, 2)?;
        }

        Ok(())
    }

    /// Parses an arithmetic expression (A).
    ///
    /// A leading `+` is absorbed; a leading `-` becomes a `neg` node.
    fn a(&mut self) -> ParseResult<()> {
        if self.check("+") {
            self.expect("+")?;
            self.at()?;
        } else if self.check("-") {
            self.expect("-")?;
            self.at()?;
            self.build(Label::Neg, 1)?;
        } else {
            self.at()?;
        }

        loop {
            let label = match self.peek().lexeme.as_str() {
                "+" => Label::Plus,
                "-" => Label::Minus,
                _ => break,
            };

            self.advance();
            self.at()?;
            self.build(label, 2)?;
        }

        Ok(())
    }

    /// Parses an arithmetic term (At).
    fn at(&mut self) -> ParseResult<()> {
        self.af()?;

        loop {
            let label = match self.peek().lexeme.as_str() {
                "*" => Label::Star,
                "/" => Label::Slash,
                _ => break,
            };

            self.advance();
            self.af()?;
            self.build(label, 2)?;
        }

        Ok(())
    }

    /// Parses an arithmetic factor (Af).
    fn af(&mut self) -> ParseResult<()> {
        self.ap()?;

        if self.check("**") {
            self.expect("**")?;
            self.af()?;
            self.build(Label::Power, 2)?;
        }

        Ok(())
    }

    /// Parses an arithmetic primary (Ap).
    fn ap(&mut self) -> ParseResult<()> {
        self.r()?;

        while self.check("@") {
            self.expect("@")?;

            if self.peek().category != Category::Identifier {
                return Err(ParseError::expected(self.line(), "identifier", &self.got()));
            }

            self.take_identifier();
            self.r()?;
            self.build(Label::At, 3)?;
        }

        Ok(())
    }

    /// Parses an application chain (R).
    fn r(&mut self) -> ParseResult<()> {
        self.rn()?;

        while self.starts_operand() {
            self.rn()?;
            self.build(Label::Gamma, 2)?;
        }

        Ok(())
    }

    /// Returns if the next token can start an operand of an application.
    fn starts_operand(&self) -> bool {
        matches!(
            self.peek().category,
            Category::Identifier | Category::Integer | Category::Str
        ) || matches!(
            self.peek().lexeme.as_str(),
            "true" | "false" | "nil" | "dummy" | "("
        )
    }

    /// Parses a basic operand (Rn).
    fn rn(&mut self) -> ParseResult<()> {
        let category = self.peek().category;
        let lexeme = self.peek().lexeme.clone();

        match category {
            Category::Identifier => {
                self.take_identifier();
                Ok(())
            },
            Category::Integer => {
                self.advance();
                self.stack.push(Node::leaf(Label::Int(lexeme)));
                Ok(())
            },
            Category::Str => {
                self.advance();
                self.stack.push(Node::leaf(Label::Str(lexeme)));
                Ok(())
            },
            _ => match lexeme.as_str() {
                "true" => {
                    self.advance();
                    self.stack.push(Node::leaf(Label::True));
                    Ok(())
                },
                "false" => {
                    self.advance();
                    self.stack.push(Node::leaf(Label::False));
                    Ok(())
                },
                "nil" => {
                    self.advance();
                    self.stack.push(Node::leaf(Label::Nil));
                    Ok(())
                },
                "dummy" => {
                    self.advance();
                    self.stack.push(Node::leaf(Label::Dummy));
                    Ok(())
                },
                "(" => {
                    self.expect("(")?;
                    self.e()?;
                    self.expect(")")
                },
                _ => Err(ParseError::expected(
                    self.line(),
                    "literal, identifier or '('",
                    &self.got(),
                )),
            },
        }
    }

    /// Parses a definition (D).
    fn d(&mut self) -> ParseResult<()> {
        self.da()?;

        if self.check("within") {
            self.expect("within")?;
            self.d()?;
            self.build(Label::Within, 2)?;
        }

        Ok(())
    }

    /// Parses simultaneous definitions (Da).
    fn da(&mut self) -> ParseResult<()> {
        self.dr()?;

        let mut count = 0;
        while self.check("and") {
            self.expect("and")?;
            self.dr()?;
            count += 1;
        }

        if count > 0 {
            self.build(Label::And, count + 1)?;
        }

        Ok(())
    }

    /// Parses an optionally recursive definition (Dr).
    fn dr(&mut self) -> ParseResult<()> {
        if self.check("rec") {
            self.expect("rec")?;
            self.db()?;
            self.build(Label::Rec, 1)
        } else {
            self.db()
        }
    }

    /// Parses a basic definition (Db).
    fn db(&mut self) -> ParseResult<()> {
        if self.check("(") {
            self.expect("(")?;
            self.d()?;
            self.expect(")")
        } else if self.peek().category == Category::Identifier {
            self.take_identifier();

            if self.check(",") || self.check("=") {
                self.vl()?;
                self.expect("=")?;
                self.e()?;
                self.build(Label::Equal, 2)
            } else {
                let mut count = 0;
                while self.peek().category == Category::Identifier || self.check("(") {
                    self.vb()?;
                    count += 1;
                }

                if count == 0 {
                    return Err(ParseError::expected(self.line(), "identifier or '('", &self.got()));
                }

                self.expect("=")?;
                self.e()?;
                self.build(Label::FunctionForm, count + 2)
            }
        } else {
            Err(ParseError::expected(self.line(), "identifier or '('", &self.got()))
        }
    }

    /// Parses a variable binder (Vb).
    fn vb(&mut self) -> ParseResult<()> {
        if self.peek().category == Category::Identifier {
            self.take_identifier();
            Ok(())
        } else if self.check("(") {
            self.expect("(")?;

            if self.check(")") {
                self.expect(")")?;
                self.stack.push(Node::leaf(Label::Unit));
                Ok(())
            } else if self.peek().category == Category::Identifier {
                self.take_identifier();
                self.vl()?;
                self.expect(")")
            } else {
                Err(ParseError::expected(self.line(), "identifier or ')'", &self.got()))
            }
        } else {
            Err(ParseError::expected(self.line(), "identifier or '('", &self.got()))
        }
    }

    /// Parses the tail of a comma-separated variable list (Vl).
    ///
    /// The list reduces to a `,` node only when it is longer than one; the
    /// head identifier was already pushed by the caller.
    fn vl(&mut self) -> ParseResult<()> {
        let mut count = 0;

        while self.check(",") {
            self.expect(",")?;

            if self.peek().category != Category::Identifier {
                return Err(ParseError::expected(self.line(), "identifier", &self.got()));
            }

            self.take_identifier();
            count += 1;
        }

        if count > 0 {
            self.build(Label::Comma, count + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scanner::Scanner;
    use crate::screener::screen;

    fn parse(source: &str) -> ParseResult<Node> {
        let (tokens, _) = screen(Scanner::new(source).scan_tokens().unwrap());
        Parser::new(tokens).parse()
    }

    fn rendered(source: &str) -> String {
        parse(source).unwrap().render()
    }

    #[test]
    fn parse_let() {
        assert_eq!(
            rendered("let x = 5 in x"),
            "let\n.=\n..<ID:x>\n..<INT:5>\n.<ID:x>\n"
        );
    }

    #[test]
    fn parse_lambda() {
        assert_eq!(
            rendered("fn x y . x"),
            "lambda\n.<ID:x>\n.<ID:y>\n.<ID:x>\n"
        );
    }

    #[test]
    fn parse_nullary_lambda() {
        assert_eq!(rendered("fn () . 1"), "lambda\n.()\n.<INT:1>\n");
    }

    #[test]
    fn parse_application() {
        assert_eq!(rendered("f x y"), "gamma\n.gamma\n..<ID:f>\n..<ID:x>\n.<ID:y>\n");
    }

    #[test]
    fn parse_tuple() {
        assert_eq!(
            rendered("1, 2, 3"),
            "tau\n.<INT:1>\n.<INT:2>\n.<INT:3>\n"
        );
    }

    #[test]
    fn parse_conditional() {
        assert_eq!(
            rendered("true -> 1 | 2"),
            "->\n.<true>\n.<INT:1>\n.<INT:2>\n"
        );
    }

    #[test]
    fn parse_at() {
        assert_eq!(
            rendered("x @ f y"),
            "@\n.<ID:x>\n.<ID:f>\n.<ID:y>\n"
        );
    }

    #[test]
    fn parse_comparison_canonicalization() {
        assert_eq!(rendered("1 > 2"), "gr\n.<INT:1>\n.<INT:2>\n");
        assert_eq!(rendered("1 <= 2"), "le\n.<INT:1>\n.<INT:2>\n");
        assert_eq!(rendered("1 eq 2"), "eq\n.<INT:1>\n.<INT:2>\n");
    }

    #[test]
    fn parse_unary_signs() {
        assert_eq!(rendered("- 5"), "neg\n.<INT:5>\n");
        assert_eq!(rendered("+ 5"), "<INT:5>\n");
    }

    #[test]
    fn parse_operator_precedence() {
        assert_eq!(
            rendered("1 + 2 * 3"),
            "+\n.<INT:1>\n.*\n..<INT:2>\n..<INT:3>\n"
        );
    }

    #[test]
    fn parse_power_is_right_associative() {
        assert_eq!(
            rendered("2 ** 3 ** 4"),
            "**\n.<INT:2>\n.**\n..<INT:3>\n..<INT:4>\n"
        );
    }

    #[test]
    fn parse_function_form() {
        assert_eq!(
            rendered("let f x y = x in f"),
            "let\n.function_form\n..<ID:f>\n..<ID:x>\n..<ID:y>\n..<ID:x>\n.<ID:f>\n"
        );
    }

    #[test]
    fn parse_rec() {
        assert_eq!(
            rendered("let rec f x = x in f"),
            "let\n.rec\n..function_form\n...<ID:f>\n...<ID:x>\n...<ID:x>\n.<ID:f>\n"
        );
    }

    #[test]
    fn parse_and() {
        assert_eq!(
            rendered("let x = 1 and y = 2 in x"),
            "let\n.and\n..=\n...<ID:x>\n...<INT:1>\n..=\n...<ID:y>\n...<INT:2>\n.<ID:x>\n"
        );
    }

    #[test]
    fn parse_within() {
        assert_eq!(
            rendered("let x = 1 within y = x in y"),
            "let\n.within\n..=\n...<ID:x>\n...<INT:1>\n..=\n...<ID:y>\n...<ID:x>\n.<ID:y>\n"
        );
    }

    #[test]
    fn parse_variable_list() {
        assert_eq!(
            rendered("let x, y = p in x"),
            "let\n.=\n..,\n...<ID:x>\n...<ID:y>\n..<ID:p>\n.<ID:x>\n"
        );
    }

    #[test]
    fn parse_where() {
        assert_eq!(
            rendered("x + 1 where x = 4"),
            "where\n.+\n..<ID:x>\n..<INT:1>\n.=\n..<ID:x>\n..<INT:4>\n"
        );
    }

    #[test]
    fn parse_string_literal() {
        assert_eq!(rendered("'hi'"), "<STR:'hi'>\n");
    }

    #[test]
    fn parse_missing_in() {
        let error = parse("let x = 5").unwrap_err();
        assert_eq!(error.line, 1);
        assert_eq!(error.message, "expected 'in', got '5'");
    }

    #[test]
    fn parse_dangling_operator() {
        let error = parse("1 +").unwrap_err();
        assert_eq!(error.message, "expected literal, identifier or '(', got '+'");
    }

    #[test]
    fn parse_bad_definition() {
        let error = parse("let 5 = 1 in x").unwrap_err();
        assert_eq!(error.message, "expected identifier or '(', got '5'");
    }

    #[test]
    fn parse_empty_source() {
        let error = parse("// just a comment\n").unwrap_err();
        assert_eq!(error.line, 1);
        assert_eq!(error.message, "expected an expression, got end of input");
    }
}
