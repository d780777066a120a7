//! Lexer for path expressions

use logos::Logos;

/// Path expression pieces
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum PathToken {
    #[token("/")]
    Delimiter,

    #[token("\"")]
    Quote,

    /// Anything between delimiters and quotes, spaces included
    #[regex(r#"[^/"]+"#, |lex| lex.slice().to_string())]
    Text(String),
}

/// Split a path expression into delimiter, quote and text pieces
pub fn scan(text: &str) -> Vec<PathToken> {
    let mut lexer = PathToken::lexer(text);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            // every character falls in one of the three classes
            Err(()) => tokens.push(PathToken::Text(lexer.slice().to_string())),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pieces() {
        let tokens = scan(r#"/configure/router "management 1"/ctx"#);
        assert_eq!(
            tokens,
            vec![
                PathToken::Delimiter,
                PathToken::Text("configure".to_string()),
                PathToken::Delimiter,
                PathToken::Text("router ".to_string()),
                PathToken::Quote,
                PathToken::Text("management 1".to_string()),
                PathToken::Quote,
                PathToken::Delimiter,
                PathToken::Text("ctx".to_string()),
            ]
        );
    }
}
