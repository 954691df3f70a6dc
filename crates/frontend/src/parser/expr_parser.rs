use super::{Parser, ParserError};
use crate::ast::{BinOp, BoolOp, CallArg, CmpOp, ExprKind, FStringPart, UnaryOp};
use crate::lexer::{Lexer, TokenKind};

impl Parser {
    // testlist: test (',' test)*
    pub(super) fn parse_testlist(&mut self) -> Result<Vec<ExprKind>, ParserError> {
        let mut values = vec![self.parse_test()?];

        while self.at().kind == TokenKind::Comma {
            self.eat()?;
            values.push(self.parse_test()?);
        }

        Ok(values)
    }

    pub(super) fn parse_test(&mut self) -> Result<ExprKind, ParserError> {
        self.parse_or_test()
    }

    fn parse_or_test(&mut self) -> Result<ExprKind, ParserError> {
        let first = self.parse_and_test()?;

        if self.at().kind != TokenKind::Or {
            return Ok(first);
        }

        let mut operands = vec![first];
        while self.at().kind == TokenKind::Or {
            self.eat()?;
            operands.push(self.parse_and_test()?);
        }

        Ok(ExprKind::BoolOp {
            operator: BoolOp::Or,
            operands,
        })
    }

    fn parse_and_test(&mut self) -> Result<ExprKind, ParserError> {
        let first = self.parse_not_test()?;

        if self.at().kind != TokenKind::And {
            return Ok(first);
        }

        let mut operands = vec![first];
        while self.at().kind == TokenKind::And {
            self.eat()?;
            operands.push(self.parse_not_test()?);
        }

        Ok(ExprKind::BoolOp {
            operator: BoolOp::And,
            operands,
        })
    }

    fn parse_not_test(&mut self) -> Result<ExprKind, ParserError> {
        if self.at().kind == TokenKind::Not {
            self.eat()?;
            let operand = self.parse_not_test()?;

            return Ok(ExprKind::Not {
                operand: Box::new(operand),
            });
        }

        self.parse_comparison()
    }

    // comparison: arith_expr (comp_op arith_expr)*
    // Chains keep all their operands, a < b <= c is one node
    fn parse_comparison(&mut self) -> Result<ExprKind, ParserError> {
        let first = self.parse_additive_expr()?;

        if self.at().kind != TokenKind::Comparison {
            return Ok(first);
        }

        let mut rest = vec![];
        while self.at().kind == TokenKind::Comparison {
            let op_token = self.eat()?;
            let op = CmpOp::from_symbol(&op_token.value)
                .ok_or(ParserError::UnexpectedToken(op_token.value))?;

            rest.push((op, self.parse_additive_expr()?));
        }

        Ok(ExprKind::Comparison {
            first: Box::new(first),
            rest,
        })
    }

    fn parse_additive_expr(&mut self) -> Result<ExprKind, ParserError> {
        let mut left = self.parse_multiplicative_expr()?;

        while self.at().kind == TokenKind::BinaryOperator
            && (self.at().value == "+" || self.at().value == "-")
        {
            let operator = BinOp::from_symbol(&self.eat()?.value).unwrap();
            let right = self.parse_multiplicative_expr()?;

            left = ExprKind::BinaryOp {
                left: Box::new(left),
                right: Box::new(right),
                operator,
            };
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> Result<ExprKind, ParserError> {
        let mut left = self.parse_factor()?;

        while self.at().kind == TokenKind::BinaryOperator
            && matches!(self.at().value.as_str(), "*" | "/" | "//" | "%")
        {
            let operator = BinOp::from_symbol(&self.eat()?.value).unwrap();
            let right = self.parse_factor()?;

            left = ExprKind::BinaryOp {
                left: Box::new(left),
                right: Box::new(right),
                operator,
            };
        }

        Ok(left)
    }

    // factor: ('+' | '-') factor | atom_expr
    fn parse_factor(&mut self) -> Result<ExprKind, ParserError> {
        if self.at().kind == TokenKind::BinaryOperator {
            let operator = match self.at().value.as_str() {
                "+" => Some(UnaryOp::Plus),
                "-" => Some(UnaryOp::Minus),
                _ => None,
            };

            if let Some(operator) = operator {
                self.eat()?;
                let operand = self.parse_factor()?;

                return Ok(ExprKind::UnaryOp {
                    operator,
                    operand: Box::new(operand),
                });
            }
        }

        self.parse_atom_expr()
    }

    // atom_expr: atom [call trailer]. Only plain names are callable
    fn parse_atom_expr(&mut self) -> Result<ExprKind, ParserError> {
        let atom = self.parse_atom()?;

        if self.at().kind == TokenKind::OpenParen {
            if let ExprKind::Identifier { symbol } = &atom {
                let name = symbol.clone();
                let args = self.parse_arglist()?;

                return Ok(ExprKind::FunctionCall { name, args });
            }
        }

        Ok(atom)
    }

    fn parse_atom(&mut self) -> Result<ExprKind, ParserError> {
        match self.at().kind {
            TokenKind::NoneKw => {
                self.eat()?;
                Ok(ExprKind::NoneLiteral)
            }
            TokenKind::TrueKw => {
                self.eat()?;
                Ok(ExprKind::BoolLiteral { value: true })
            }
            TokenKind::FalseKw => {
                self.eat()?;
                Ok(ExprKind::BoolLiteral { value: false })
            }
            TokenKind::Number => {
                let token = self.eat()?;

                if token.value.contains('.') {
                    let value = token
                        .value
                        .parse::<f64>()
                        .map_err(|_| ParserError::MalformedNumber(token.value.clone()))?;

                    Ok(ExprKind::FloatLiteral { value })
                } else {
                    Ok(ExprKind::IntLiteral { value: token.value })
                }
            }
            TokenKind::Str => {
                // Adjacent literals concatenate: 'ab' 'cd' is 'abcd'
                let mut value = self.eat()?.value;
                while self.at().kind == TokenKind::Str {
                    value.push_str(&self.eat()?.value);
                }

                Ok(ExprKind::StrLiteral { value })
            }
            TokenKind::FStr => {
                let token = self.eat()?;
                self.parse_format_string(&token.value)
            }
            TokenKind::Identifier => {
                let token = self.eat()?;
                Ok(ExprKind::Identifier { symbol: token.value })
            }
            TokenKind::OpenParen => {
                self.eat()?;
                let inner = self.parse_test()?;
                self.expect(TokenKind::CloseParen)?;

                Ok(inner)
            }
            _ => Err(ParserError::UnexpectedToken(format!("{:?}", self.at().kind))),
        }
    }

    // arglist: argument (',' argument)*, argument: test | NAME '=' test
    fn parse_arglist(&mut self) -> Result<Vec<CallArg>, ParserError> {
        self.eat()?;

        let mut args = vec![];

        if self.at().kind == TokenKind::CloseParen {
            self.eat()?;
            return Ok(args);
        }

        loop {
            if self.at().kind == TokenKind::Identifier
                && self.peek_kind(1) == Some(&TokenKind::Equals)
            {
                let name = self.eat()?.value;
                self.eat()?;
                let value = self.parse_test()?;

                args.push(CallArg::Keyword { name, value });
            } else {
                args.push(CallArg::Positional(self.parse_test()?));
            }

            if self.at().kind == TokenKind::Comma {
                self.eat()?;
            } else {
                break;
            }
        }

        self.expect(TokenKind::CloseParen)?;

        Ok(args)
    }

    // Splits the raw body into literal chunks and embedded testlists.
    // Doubled braces stay doubled here, the evaluator collapses them.
    fn parse_format_string(&mut self, raw: &str) -> Result<ExprKind, ParserError> {
        let chars = raw.chars().collect::<Vec<char>>();
        let mut parts: Vec<FStringPart> = vec![];
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '{' && chars.get(i + 1) == Some(&'{') {
                literal.push_str("{{");
                i += 2;
            } else if c == '}' && chars.get(i + 1) == Some(&'}') {
                literal.push_str("}}");
                i += 2;
            } else if c == '{' {
                let mut end = i + 1;
                while end < chars.len() && chars[end] != '}' {
                    end += 1;
                }
                if end == chars.len() {
                    return Err(ParserError::UnclosedFStringExpr);
                }

                if !literal.is_empty() {
                    parts.push(FStringPart::Literal(std::mem::take(&mut literal)));
                }

                let text = chars[i + 1..end].iter().collect::<String>();
                parts.push(FStringPart::Interpolation(parse_embedded_testlist(&text)?));
                i = end + 1;
            } else {
                literal.push(c);
                i += 1;
            }
        }

        if !literal.is_empty() {
            parts.push(FStringPart::Literal(literal));
        }

        Ok(ExprKind::FString { parts })
    }
}

// An embedded expression is lexed and parsed on its own, as a testlist
fn parse_embedded_testlist(text: &str) -> Result<Vec<ExprKind>, ParserError> {
    if text.trim().is_empty() {
        return Err(ParserError::EmptyFStringExpr);
    }

    let mut lexer = Lexer::default();
    lexer
        .tokenize(text.to_string())
        .map_err(|e| ParserError::FStringExpr(e.to_string()))?;

    let mut parser = Parser {
        tokens: lexer.tokens,
        ..Default::default()
    };

    let values = parser.parse_testlist()?;

    // Anything left besides the newline is a stray token
    if parser.at().kind != TokenKind::Newline {
        return Err(ParserError::FStringExpr(format!(
            "unexpected token: -{}-",
            parser.at().value
        )));
    }

    Ok(values)
}
