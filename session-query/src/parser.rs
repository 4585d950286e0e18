use crate::clause::RawValue;
use crate::enums::OperatorTag;
use crate::errors::ParseError;

/// One `field operator value(s)` term lifted out of a query string.
///
/// Values stay raw: type checking belongs to the clause builder, which
/// validates them against the live registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTerm {
    pub field: String,
    pub operator: OperatorTag,
    pub raw: RawValue,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Field(String),
    Colon,
    Value(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    And,
    Or,
    To,
    Gte,
    Lte,
    Gt,
    Lt,
}

struct Tokenizer {
    input: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while<F>(&mut self, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut result = String::new();
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        while self.peek().is_some() {
            self.skip_whitespace();
            let ch = match self.peek() {
                Some(c) => c,
                None => break,
            };

            match ch {
                '(' => {
                    self.advance();
                    tokens.push(Token::LParen);
                }
                ')' => {
                    self.advance();
                    tokens.push(Token::RParen);
                }
                '[' => {
                    self.advance();
                    tokens.push(Token::LBracket);
                }
                ']' => {
                    self.advance();
                    tokens.push(Token::RBracket);
                }
                ':' => {
                    self.advance();
                    // Comparison operators ride directly behind the colon
                    self.skip_whitespace();
                    if let Some(next) = self.peek() {
                        match next {
                            '>' => {
                                self.advance();
                                if self.peek() == Some('=') {
                                    self.advance();
                                    tokens.push(Token::Gte);
                                } else {
                                    tokens.push(Token::Gt);
                                }
                                continue;
                            }
                            '<' => {
                                self.advance();
                                if self.peek() == Some('=') {
                                    self.advance();
                                    tokens.push(Token::Lte);
                                } else {
                                    tokens.push(Token::Lt);
                                }
                                continue;
                            }
                            _ => {}
                        }
                    }
                    tokens.push(Token::Colon);
                }
                _ if ch.is_alphanumeric() || ch == '_' || ch == '-' => {
                    let word =
                        self.read_while(|c| c.is_alphanumeric() || "_.-".contains(c));
                    match word.to_uppercase().as_str() {
                        "AND" => tokens.push(Token::And),
                        "OR" => tokens.push(Token::Or),
                        "TO" => tokens.push(Token::To),
                        _ => {
                            // A word directly followed by a colon is a field name
                            self.skip_whitespace();
                            if self.peek() == Some(':') {
                                tokens.push(Token::Field(word));
                            } else {
                                tokens.push(Token::Value(word));
                            }
                        }
                    }
                }
                _ => {
                    return Err(ParseError::UnexpectedCharacter(ch));
                }
            }
        }

        Ok(tokens)
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse(&mut self) -> Result<Vec<ParsedTerm>, ParseError> {
        let mut terms = Vec::new();

        while self.peek().is_some() {
            terms.push(self.parse_term()?);

            // AND between terms is implicit; an explicit one is consumed
            if matches!(self.peek(), Some(Token::And)) {
                self.advance();
            }
        }

        Ok(terms)
    }

    fn parse_term(&mut self) -> Result<ParsedTerm, ParseError> {
        let field = match self.advance() {
            Some(Token::Field(f)) => f,
            Some(_) => return Err(ParseError::Expected("field name")),
            None => return Err(ParseError::UnexpectedEnd),
        };

        let operator = match self.advance() {
            Some(Token::Colon) => OperatorTag::Equals,
            Some(Token::Gte) => OperatorTag::GreaterThanOrEqual,
            Some(Token::Lte) => OperatorTag::LessThanOrEqual,
            Some(Token::Gt) => OperatorTag::GreaterThan,
            Some(Token::Lt) => OperatorTag::LessThan,
            Some(_) => return Err(ParseError::Expected("colon or comparison operator")),
            None => return Err(ParseError::UnexpectedEnd),
        };

        if operator == OperatorTag::Equals {
            return self.parse_equals_value(field);
        }

        let value = self.parse_single_value()?;
        Ok(ParsedTerm {
            field,
            operator,
            raw: RawValue::One(value),
        })
    }

    /// After `field:` the value may be a scalar, an OR group, or a range.
    fn parse_equals_value(&mut self, field: String) -> Result<ParsedTerm, ParseError> {
        match self.peek() {
            Some(Token::LParen) => {
                let values = self.parse_group()?;
                Ok(ParsedTerm {
                    field,
                    operator: OperatorTag::IsOneOf,
                    raw: RawValue::Many(values),
                })
            }
            Some(Token::LBracket) => {
                let bounds = self.parse_range()?;
                Ok(ParsedTerm {
                    field,
                    operator: OperatorTag::Between,
                    raw: RawValue::Many(bounds),
                })
            }
            _ => {
                let value = self.parse_single_value()?;
                Ok(ParsedTerm {
                    field,
                    operator: OperatorTag::Equals,
                    raw: RawValue::One(value),
                })
            }
        }
    }

    fn parse_group(&mut self) -> Result<Vec<String>, ParseError> {
        // Consume (
        self.advance();

        let mut values = Vec::new();
        values.push(self.parse_single_value()?);

        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            values.push(self.parse_single_value()?);
        }

        match self.advance() {
            Some(Token::RParen) => Ok(values),
            _ => Err(ParseError::Expected("closing parenthesis")),
        }
    }

    fn parse_range(&mut self) -> Result<Vec<String>, ParseError> {
        // Consume [
        self.advance();

        let min = self.parse_single_value()?;

        match self.advance() {
            Some(Token::To) => {}
            _ => return Err(ParseError::Expected("TO in range")),
        }

        let max = self.parse_single_value()?;

        match self.advance() {
            Some(Token::RBracket) => Ok(vec![min, max]),
            _ => Err(ParseError::Expected("closing bracket")),
        }
    }

    fn parse_single_value(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Some(Token::Value(v)) => Ok(v),
            Some(_) => Err(ParseError::Expected("value")),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Parse a typed-in query string into raw terms.
///
/// Grammar: `field:value`, `field:>n` (and `>=`, `<`, `<=`),
/// `field:[a TO b]`, `field:(a OR b)`. Terms combine conjunctively,
/// separated by whitespace or an explicit `AND`; there is no top-level OR.
pub fn parse_query(input: &str) -> Result<Vec<ParsedTerm>, ParseError> {
    let mut tokenizer = Tokenizer::new(input);
    let tokens = tokenizer.tokenize()?;
    let mut parser = Parser::new(tokens);
    parser.parse()
}
