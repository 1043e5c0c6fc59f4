//! ShEx compact-syntax lexer using winnow.
//!
//! Fails fast on the first character that cannot start a token.

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::Location;
use winnow::token::{one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::token::{Token, TokenKind};
use crate::error::SchemaParseError;

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Tokenize a whole schema document.
pub fn tokenize(text: &str) -> Result<Vec<Token>, SchemaParseError> {
    let mut tokens = Vec::new();
    let mut input = LocatingSlice::new(text);

    loop {
        skip_ws_and_comments(&mut input);

        if input.is_empty() {
            let pos = input.current_token_start();
            tokens.push(Token::new(TokenKind::Eof, pos));
            break;
        }

        let start = input.current_token_start();
        match next_token(&mut input) {
            Ok(kind) => tokens.push(Token::new(kind, start)),
            Err(_) => {
                let bad_char = text[start..].chars().next().unwrap_or('?');
                let (line, column) = line_col(text, start);
                let message = if bad_char == '<' {
                    "invalid or unterminated IRI".to_string()
                } else {
                    format!("unexpected character '{bad_char}'")
                };
                return Err(SchemaParseError::new(line, column, message));
            }
        }
    }

    Ok(tokens)
}

/// Convert a byte position to (line, column), 1-indexed.
pub fn line_col(text: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in text.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_iri_char(c: char) -> bool {
    !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\x00'..='\x20')
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Skip whitespace and `#` comments.
fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
        } else {
            break;
        }
    }
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_iri_ref,
        parse_integer,
        parse_name_or_prefixed,
        parse_punctuation,
    ))
    .parse_next(input)
}

/// `<...>`
fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', take_while(0.., is_iri_char), '>')
        .map(|iri: &str| TokenKind::IriRef(iri.to_string()))
        .parse_next(input)
}

fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let digits: &str = digit1.parse_next(input)?;
    digits
        .parse::<u64>()
        .map(TokenKind::Integer)
        .map_err(|_| backtrack())
}

/// Bare names, `prefix:local`, `prefix:` and `:local`.
fn parse_name_or_prefixed(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let first = input.chars().next().ok_or_else(backtrack)?;
    let word = if first == ':' {
        String::new()
    } else if first.is_alphabetic() || first == '_' {
        take_dotted(input)?
    } else {
        return Err(backtrack());
    };

    if input.starts_with(':') {
        ':'.parse_next(input)?;
        let local = take_dotted(input)?;
        if local.is_empty() {
            Ok(TokenKind::PnameNs(word))
        } else {
            Ok(TokenKind::PnameLn {
                prefix: word,
                local,
            })
        }
    } else {
        Ok(TokenKind::Name(word))
    }
}

/// Name characters with inner dots; a trailing dot is left in the input.
fn take_dotted(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();
    loop {
        let chunk: &str = take_while(0.., is_name_char).parse_next(input)?;
        result.push_str(chunk);

        if input.starts_with('.') {
            let rest = &input.as_ref()[1..];
            if !result.is_empty() && rest.chars().next().is_some_and(is_name_char) {
                '.'.parse_next(input)?;
                result.push('.');
                continue;
            }
        }
        break;
    }
    Ok(result)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let c: char = one_of(['{', '}', '[', ']', ';', ',', '@', '.', '*', '+', '?']).parse_next(input)?;
    Ok(match c {
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '@' => TokenKind::At,
        '.' => TokenKind::Dot,
        '*' => TokenKind::Star,
        '+' => TokenKind::Plus,
        _ => TokenKind::Question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn shape_line_tokens() {
        assert_eq!(
            kinds("<#LoanShape> {\n\ta\t[ex:Loan] ;\n\tex:rate xsd:decimal\n}"),
            vec![
                TokenKind::IriRef("#LoanShape".into()),
                TokenKind::LBrace,
                TokenKind::Name("a".into()),
                TokenKind::LBracket,
                TokenKind::PnameLn {
                    prefix: "ex".into(),
                    local: "Loan".into()
                },
                TokenKind::RBracket,
                TokenKind::Semicolon,
                TokenKind::PnameLn {
                    prefix: "ex".into(),
                    local: "rate".into()
                },
                TokenKind::PnameLn {
                    prefix: "xsd".into(),
                    local: "decimal".into()
                },
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_prefix_namespaces() {
        assert_eq!(
            kinds("# header\nPREFIX ex: <http://ex.org/> # trailing\n"),
            vec![
                TokenKind::Name("PREFIX".into()),
                TokenKind::PnameNs("ex".into()),
                TokenKind::IriRef("http://ex.org/".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_its_own_token() {
        assert_eq!(
            kinds("ex:a.b ."),
            vec![
                TokenKind::PnameLn {
                    prefix: "ex".into(),
                    local: "a.b".into()
                },
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn error_reports_line_and_column() {
        let err = tokenize("PREFIX ex: <http://ex.org/>\n  ^").unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }
}
