use std::rc::Rc;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

// A suite is the body of a compound statement: either the single simple
// statement on the header line, or the indented block below it.
pub type Suite = Vec<Stmt>;

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u64,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u64) -> Self {
        Self { kind, line }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtKind {
    // Bare expression statement. Comma separated expressions are all
    // evaluated, for their side effects.
    Expr {
        values: Vec<ExprKind>,
    },
    // a = b = x, y
    // Each target is a list of plain names, values is the right-most
    // expression list.
    Assign {
        targets: Vec<Vec<String>>,
        values: Vec<ExprKind>,
    },
    AugAssign {
        name: String,
        operator: BinOp,
        value: Box<ExprKind>,
    },
    Break,
    Continue,
    // Empty for a bare 'return'
    Return {
        values: Vec<ExprKind>,
    },
    If {
        // One entry per 'if'/'elif' arm, in source order
        branches: Vec<(ExprKind, Suite)>,
        else_suite: Option<Suite>,
    },
    While {
        test: ExprKind,
        body: Suite,
    },
    // Defaults align to the *trailing* parameters by count
    FnDeclaration {
        name: String,
        params: Vec<String>,
        defaults: Vec<ExprKind>,
        body: Rc<Suite>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprKind {
    // Digits kept as text, the runtime owns unbounded integers
    IntLiteral {
        value: String,
    },
    FloatLiteral {
        value: f64,
    },
    StrLiteral {
        value: String,
    },
    FString {
        parts: Vec<FStringPart>,
    },
    NoneLiteral,
    BoolLiteral {
        value: bool,
    },
    Identifier {
        symbol: String,
    },
    BinaryOp {
        left: Box<ExprKind>,
        right: Box<ExprKind>,
        operator: BinOp,
    },
    UnaryOp {
        operator: UnaryOp,
        operand: Box<ExprKind>,
    },
    // a < b <= c: first operand plus (operator, operand) pairs
    Comparison {
        first: Box<ExprKind>,
        rest: Vec<(CmpOp, ExprKind)>,
    },
    // 'or'/'and' chains of two or more operands
    BoolOp {
        operator: BoolOp,
        operands: Vec<ExprKind>,
    },
    Not {
        operand: Box<ExprKind>,
    },
    FunctionCall {
        name: String,
        args: Vec<CallArg>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum FStringPart {
    // Raw chunk, '{{' and '}}' still doubled. The evaluator collapses them.
    Literal(String),
    // An embedded {expr, ...} testlist
    Interpolation(Vec<ExprKind>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum CallArg {
    Positional(ExprKind),
    Keyword { name: String, value: ExprKind },
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
}

impl BinOp {
    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "//" => Some(BinOp::FloorDiv),
            "%" => Some(BinOp::Mod),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CmpOp {
    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(CmpOp::Eq),
            "!=" => Some(CmpOp::NotEq),
            "<" => Some(CmpOp::Lt),
            "<=" => Some(CmpOp::LtEq),
            ">" => Some(CmpOp::Gt),
            ">=" => Some(CmpOp::GtEq),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BoolOp {
    Or,
    And,
}
