use crate::token::{Category, Token};

/// Reserved words of the language.
pub const KEYWORDS: [&str; 20] = [
    "let", "in", "where", "rec", "fn", "aug", "or", "not", "gr", "ge",
    "ls", "le", "eq", "ne", "true", "false", "nil", "dummy", "within", "and",
];

/// Screens the raw token stream for the parser.
///
/// Identifier tokens whose lexeme is reserved are retagged as keywords,
/// whitespace/comment tokens and raw newlines are dropped, and the terminal
/// token is re-marked after the compaction. Returns the screened tokens and
/// the first invalid token, if any.
pub fn screen(tokens: Vec<Token>) -> (Vec<Token>, Option<Token>) {
    let mut screened: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut first_invalid = None;

    for mut token in tokens {
        if token.category == Category::Identifier && KEYWORDS.contains(&token.lexeme.as_str()) {
            token.category = Category::Keyword;
        }

        if token.category == Category::Delete || token.lexeme == "\n" {
            continue;
        }

        if token.category == Category::Invalid && first_invalid.is_none() {
            first_invalid = Some(token.clone());
        }

        screened.push(token);
    }

    if let Some(last) = screened.last_mut() {
        last.last = true;
    }

    (screened, first_invalid)
}
