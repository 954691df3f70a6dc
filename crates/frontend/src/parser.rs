use std::collections::VecDeque;
use std::rc::Rc;

mod errors_parser;
mod expr_parser;

pub use crate::ast::{
    BinOp, BoolOp, CallArg, CmpOp, ExprKind, FStringPart, Program, Stmt, StmtKind, Suite, UnaryOp,
};
pub use crate::lexer::{Token, TokenKind};

use tools::errors::{CodeErr, ReportCodeErr};

pub use self::errors_parser::ParserError;

#[derive(Default)]
pub struct Parser {
    tokens: VecDeque<Token>,
    pub program: Program,
}

impl Parser {
    pub fn build_ast(&mut self, tokens: VecDeque<Token>) -> Result<(), CodeErr> {
        self.program.statements.clear();
        self.tokens = tokens;

        while !self.is_eof() {
            // Statement parsers consume their own trailing newline, a stray
            // one here separates two statements
            if self.at().kind == TokenKind::Newline {
                self.eat().map_err(|e| e.to_glob_err(self.at().line))?;
                continue;
            }

            let line = self.at().line;
            let stmt = self.parse_statement().map_err(|e| e.to_glob_err(line))?;
            self.program.statements.push(stmt);
        }

        Ok(())
    }

    // ---------------
    //   Statements
    // ---------------

    fn parse_statement(&mut self) -> Result<Stmt, ParserError> {
        match self.at().kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Def => self.parse_fn_declaration(),
            _ => self.parse_simple_statement(),
        }
    }

    // A one line statement, trailing newline included
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParserError> {
        let line = self.at().line;

        let kind = match self.at().kind {
            TokenKind::Break => {
                self.eat()?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.eat()?;
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.eat()?;
                let values = if self.at().kind == TokenKind::Newline {
                    vec![]
                } else {
                    self.parse_testlist()?
                };
                StmtKind::Return { values }
            }
            _ => self.parse_expr_statement()?,
        };

        self.expect(TokenKind::Newline)?;

        Ok(Stmt::new(kind, line))
    }

    // expr_stmt: testlist (augassign testlist | ('=' testlist)*)
    fn parse_expr_statement(&mut self) -> Result<StmtKind, ParserError> {
        let first = self.parse_testlist()?;

        match self.at().kind {
            TokenKind::CompoundAssign => {
                let name = single_name(&first).ok_or(ParserError::InvalidAugAssignTarget)?;

                let op_token = self.eat()?;
                let operator = BinOp::from_symbol(&op_token.value)
                    .ok_or(ParserError::UnknownAugAssignOperator(op_token.value))?;

                // Only the first right-hand value takes part
                let mut values = self.parse_testlist()?;
                let value = values.remove(0);

                Ok(StmtKind::AugAssign {
                    name,
                    operator,
                    value: Box::new(value),
                })
            }
            TokenKind::Equals => {
                let mut lists = vec![first];
                while self.at().kind == TokenKind::Equals {
                    self.eat()?;
                    lists.push(self.parse_testlist()?);
                }

                // Right-most list holds the values, everything before is a
                // target list of plain names
                let values = lists.pop().unwrap();
                let targets = lists
                    .into_iter()
                    .map(exprs_to_names)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(StmtKind::Assign { targets, values })
            }
            _ => Ok(StmtKind::Expr { values: first }),
        }
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParserError> {
        let line = self.at().line;
        self.eat()?;

        let test = self.parse_test()?;
        let suite = self.parse_block()?;
        let mut branches = vec![(test, suite)];

        while self.at().kind == TokenKind::Elif {
            self.eat()?;
            let test = self.parse_test()?;
            branches.push((test, self.parse_block()?));
        }

        let else_suite = if self.at().kind == TokenKind::Else {
            self.eat()?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::new(StmtKind::If { branches, else_suite }, line))
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParserError> {
        let line = self.at().line;
        self.eat()?;

        let test = self.parse_test()?;
        let body = self.parse_block()?;

        Ok(Stmt::new(StmtKind::While { test, body }, line))
    }

    fn parse_fn_declaration(&mut self) -> Result<Stmt, ParserError> {
        let line = self.at().line;
        self.eat()?;

        let name = match self.at().kind {
            TokenKind::Identifier => self.eat()?.value,
            _ => return Err(ParserError::MissingIdentifierAfterDef),
        };

        self.expect(TokenKind::OpenParen)?;

        let mut params: Vec<String> = vec![];
        let mut defaults: Vec<ExprKind> = vec![];

        if self.at().kind != TokenKind::CloseParen {
            loop {
                params.push(self.expect(TokenKind::Identifier)?.value);

                if self.at().kind == TokenKind::Equals {
                    self.eat()?;
                    defaults.push(self.parse_test()?);
                }

                if self.at().kind == TokenKind::Comma {
                    self.eat()?;
                } else {
                    break;
                }
            }
        }

        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;

        Ok(Stmt::new(
            StmtKind::FnDeclaration {
                name,
                params,
                defaults,
                body: Rc::new(body),
            },
            line,
        ))
    }

    // suite: simple_stmt | NEWLINE INDENT stmt+ DEDENT
    fn parse_block(&mut self) -> Result<Suite, ParserError> {
        self.expect(TokenKind::Colon)?;

        if self.at().kind != TokenKind::Newline {
            // Inline form: if x: y = 1
            return Ok(vec![self.parse_simple_statement()?]);
        }

        self.eat()?;
        self.expect(TokenKind::Indent)?;

        let mut body: Suite = vec![];
        while self.at().kind != TokenKind::Dedent {
            body.push(self.parse_statement()?);
        }
        self.eat()?;

        Ok(body)
    }

    // ------------
    //   Helpers
    // ------------

    fn is_eof(&self) -> bool {
        self.at().kind == TokenKind::EOF
    }

    fn at(&self) -> &Token {
        // The EOF sentinel is never consumed, there is always a front token
        self.tokens.front().expect("token buffer is empty")
    }

    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(offset).map(|t| &t.kind)
    }

    fn eat(&mut self) -> Result<Token, ParserError> {
        self.tokens
            .pop_front()
            .ok_or(ParserError::EmptyTokenBufferUsed)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParserError> {
        if self.at().kind == kind {
            self.eat()
        } else {
            Err(ParserError::FoundWrongToken(kind, self.at().kind.clone()))
        }
    }
}

fn single_name(exprs: &[ExprKind]) -> Option<String> {
    match exprs {
        [ExprKind::Identifier { symbol }] => Some(symbol.clone()),
        _ => None,
    }
}

fn exprs_to_names(exprs: Vec<ExprKind>) -> Result<Vec<String>, ParserError> {
    exprs
        .into_iter()
        .map(|e| match e {
            ExprKind::Identifier { symbol } => Ok(symbol),
            other => Err(ParserError::NonNameAssignTarget(format!("{other:?}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(code: &str) -> Vec<Stmt> {
        let mut lexer = Lexer::default();
        lexer.tokenize(code.to_string()).unwrap();

        let mut parser = Parser::default();
        parser.build_ast(lexer.tokens.clone()).unwrap();
        parser.program.statements
    }

    #[test]
    fn parse_assignment() {
        let stmts = parse("x = 45");

        assert_eq!(
            stmts[0].kind,
            StmtKind::Assign {
                targets: vec![vec!["x".to_string()]],
                values: vec![ExprKind::IntLiteral { value: "45".into() }],
            }
        );
    }

    #[test]
    fn parse_chained_assignment() {
        let stmts = parse("x = y = 1, 2");

        assert_eq!(
            stmts[0].kind,
            StmtKind::Assign {
                targets: vec![vec!["x".to_string()], vec!["y".to_string()]],
                values: vec![
                    ExprKind::IntLiteral { value: "1".into() },
                    ExprKind::IntLiteral { value: "2".into() },
                ],
            }
        );
    }

    #[test]
    fn parse_aug_assignment() {
        let stmts = parse("x //= 2");

        assert_eq!(
            stmts[0].kind,
            StmtKind::AugAssign {
                name: "x".into(),
                operator: BinOp::FloorDiv,
                value: Box::new(ExprKind::IntLiteral { value: "2".into() }),
            }
        );
    }

    #[test]
    fn assignment_target_must_be_a_name() {
        let mut lexer = Lexer::default();
        lexer.tokenize("1 + 2 = x".to_string()).unwrap();

        let mut parser = Parser::default();
        assert!(parser.build_ast(lexer.tokens.clone()).is_err());
    }

    #[test]
    fn parse_precedence() {
        let stmts = parse("1 + 2 * 3");

        assert_eq!(
            stmts[0].kind,
            StmtKind::Expr {
                values: vec![ExprKind::BinaryOp {
                    left: Box::new(ExprKind::IntLiteral { value: "1".into() }),
                    right: Box::new(ExprKind::BinaryOp {
                        left: Box::new(ExprKind::IntLiteral { value: "2".into() }),
                        right: Box::new(ExprKind::IntLiteral { value: "3".into() }),
                        operator: BinOp::Mul,
                    }),
                    operator: BinOp::Add,
                }],
            }
        );
    }

    #[test]
    fn parse_left_associative_chain() {
        let stmts = parse("10 - 4 - 3");

        assert_eq!(
            stmts[0].kind,
            StmtKind::Expr {
                values: vec![ExprKind::BinaryOp {
                    left: Box::new(ExprKind::BinaryOp {
                        left: Box::new(ExprKind::IntLiteral { value: "10".into() }),
                        right: Box::new(ExprKind::IntLiteral { value: "4".into() }),
                        operator: BinOp::Sub,
                    }),
                    right: Box::new(ExprKind::IntLiteral { value: "3".into() }),
                    operator: BinOp::Sub,
                }],
            }
        );
    }

    #[test]
    fn parse_if_elif_else() {
        let stmts = parse("if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3");

        match &stmts[0].kind {
            StmtKind::If { branches, else_suite } => {
                assert_eq!(branches.len(), 2);
                assert!(else_suite.is_some());
            }
            other => panic!("expected an if statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_while_with_flow_statements() {
        let stmts = parse("while True:\n    break\n    continue");

        match &stmts[0].kind {
            StmtKind::While { body, .. } => {
                assert_eq!(body[0].kind, StmtKind::Break);
                assert_eq!(body[1].kind, StmtKind::Continue);
            }
            other => panic!("expected a while statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_inline_suite() {
        let stmts = parse("if a: x = 1");

        match &stmts[0].kind {
            StmtKind::If { branches, .. } => assert_eq!(branches[0].1.len(), 1),
            other => panic!("expected an if statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_fn_declaration_with_defaults() {
        let stmts = parse("def f(a, b=10, c=20):\n    return a");

        match &stmts[0].kind {
            StmtKind::FnDeclaration {
                name,
                params,
                defaults,
                ..
            } => {
                assert_eq!(name, "f");
                assert_eq!(params, &vec!["a".to_string(), "b".into(), "c".into()]);
                assert_eq!(
                    defaults,
                    &vec![
                        ExprKind::IntLiteral { value: "10".into() },
                        ExprKind::IntLiteral { value: "20".into() },
                    ]
                );
            }
            other => panic!("expected a function declaration, got {other:?}"),
        }
    }

    #[test]
    fn parse_bare_return() {
        let stmts = parse("def f():\n    return");

        match &stmts[0].kind {
            StmtKind::FnDeclaration { body, .. } => {
                assert_eq!(body[0].kind, StmtKind::Return { values: vec![] });
            }
            other => panic!("expected a function declaration, got {other:?}"),
        }
    }

    #[test]
    fn parse_call_arguments() {
        let stmts = parse("f(1, c=99)");

        match &stmts[0].kind {
            StmtKind::Expr { values } => {
                assert_eq!(
                    values[0],
                    ExprKind::FunctionCall {
                        name: "f".into(),
                        args: vec![
                            CallArg::Positional(ExprKind::IntLiteral { value: "1".into() }),
                            CallArg::Keyword {
                                name: "c".into(),
                                value: ExprKind::IntLiteral { value: "99".into() },
                            },
                        ],
                    }
                );
            }
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_chained_comparison() {
        let stmts = parse("a < b <= c");

        match &stmts[0].kind {
            StmtKind::Expr { values } => match &values[0] {
                ExprKind::Comparison { rest, .. } => {
                    assert_eq!(rest.len(), 2);
                    assert_eq!(rest[0].0, CmpOp::Lt);
                    assert_eq!(rest[1].0, CmpOp::LtEq);
                }
                other => panic!("expected a comparison, got {other:?}"),
            },
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_format_string_parts() {
        let stmts = parse("f\"{{x}}={x}\"");

        match &stmts[0].kind {
            StmtKind::Expr { values } => {
                assert_eq!(
                    values[0],
                    ExprKind::FString {
                        parts: vec![
                            FStringPart::Literal("{{x}}=".into()),
                            FStringPart::Interpolation(vec![ExprKind::Identifier {
                                symbol: "x".into(),
                            }]),
                        ],
                    }
                );
            }
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_string_literals_concatenate() {
        let stmts = parse("'ab' 'cd'");

        match &stmts[0].kind {
            StmtKind::Expr { values } => {
                assert_eq!(values[0], ExprKind::StrLiteral { value: "abcd".into() });
            }
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }
}
