//! Word lexer for configuration lines
//!
//! Splits one logical line into words.
//!
//! Key features:
//! - Spaces and tabs separate words, newlines do not (multi-line literals
//!   arrive as one logical line and must keep their line breaks)
//! - "..." is a single word, quotes removed
//! - An unclosed quote swallows the rest of the line as one word

use logos::Logos;

/// Word classes of a configuration line
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Word {
    // Skip horizontal whitespace, but NOT newlines
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Whitespace,

    /// Quoted string: "..."
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Quoted(String),

    /// Quote opened and never closed before the end of the line
    #[regex(r#""[^"]*"#, |lex| lex.slice()[1..].to_string())]
    Unclosed(String),

    /// Anything else up to the next blank or quote
    #[regex(r#"[^ \t\f\r"]+"#, |lex| lex.slice().to_string())]
    Bare(String),
}

/// Words of a line, and whether a quote was left open
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Words {
    pub words: Vec<String>,
    pub unbalanced: bool,
}

/// Split a line into words
pub fn split_words(line: &str) -> Words {
    let mut lexer = Word::lexer(line);
    let mut split = Words::default();

    while let Some(result) = lexer.next() {
        match result {
            Ok(Word::Quoted(word)) | Ok(Word::Bare(word)) => split.words.push(word),
            Ok(Word::Unclosed(word)) => {
                split.unbalanced = true;
                split.words.push(word);
            }
            Ok(Word::Whitespace) => continue,
            // The classes above cover every character, keep the text anyway
            Err(()) => split.words.push(lexer.slice().to_string()),
        }
    }

    split
}

/// Width of the leading whitespace of a line, in characters
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
