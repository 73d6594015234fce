use super::error::CompileError;
use super::tokenizer::Token;

/// Reorder infix tokens into postfix with the shunting-yard algorithm.
///
/// All operators are left-associative. The output holds only numerals
/// and operators.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::Operator(op) => {
                while let Some(top) = stack.last().and_then(Token::as_operator) {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(token.clone());
            }
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(other) => output.push(other),
                    None => return Err(CompileError::UnbalancedParens),
                }
            },
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(CompileError::UnbalancedParens);
        }
        output.push(token);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::tokenizer::tokenize;
    use distcalc_core::Operation;

    fn postfix(source: &str) -> Vec<String> {
        to_postfix(&tokenize(source))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Straightforward stack evaluation of a postfix sequence.
    fn evaluate(tokens: &[Token]) -> f64 {
        let mut stack = Vec::new();
        for token in tokens {
            match token {
                Token::Number(text) => stack.push(text.parse::<f64>().unwrap()),
                Token::Operator(op) => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(op.apply(a, b));
                }
                _ => panic!("parenthesis in postfix output"),
            }
        }
        assert_eq!(stack.len(), 1);
        stack[0]
    }

    #[test]
    fn precedence_orders_output() {
        assert_eq!(postfix("2 + 3 * 4"), vec!["2", "3", "4", "*", "+"]);
        assert_eq!(postfix("2 * 3 + 4"), vec!["2", "3", "*", "4", "+"]);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(postfix("(2 + 3) * 4"), vec!["2", "3", "+", "4", "*"]);
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix("8 - 3 - 2"), vec!["8", "3", "-", "2", "-"]);
        assert_eq!(postfix("8 / 4 * 2"), vec!["8", "4", "/", "2", "*"]);
    }

    #[test]
    fn postfix_evaluates_to_infix_value() {
        let cases = [
            ("2 + 3 * 4", 14.0),
            ("(2 + 3) * 4", 20.0),
            ("8 - 3 - 2", 3.0),
            ("2 * (3 + 4) - 10 / 5", 12.0),
            ("((1 + 2) * (3 + 4)) / 7", 3.0),
        ];
        for (source, expected) in cases {
            let tokens = to_postfix(&tokenize(source)).unwrap();
            assert_eq!(evaluate(&tokens), expected, "{source}");
        }
    }

    #[test]
    fn output_contains_no_parentheses() {
        let tokens = to_postfix(&tokenize("((2))*(3)")).unwrap();
        assert!(tokens
            .iter()
            .all(|t| matches!(t, Token::Number(_) | Token::Operator(_))));
        assert_eq!(tokens.last().and_then(Token::as_operator), Some(Operation::Multiply));
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert_eq!(
            to_postfix(&tokenize("(2 + 3")),
            Err(CompileError::UnbalancedParens)
        );
        assert_eq!(
            to_postfix(&tokenize("2 + 3)")),
            Err(CompileError::UnbalancedParens)
        );
    }
}
