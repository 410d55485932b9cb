//! Node kinds, numbered above the token kinds in `SyntaxKind`.

pub const FIRST_NODE: u16 = 200;

// Declarations
pub const SOURCE_FILE: u16 = FIRST_NODE;
pub const EXTERN_TYPE_DECLARATION: u16 = FIRST_NODE + 1;
pub const EXTERN_FUNCTION_DECLARATION: u16 = FIRST_NODE + 2;
pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 3;
pub const ARROW_FUNCTION: u16 = FIRST_NODE + 4;
pub const PARAMETER: u16 = FIRST_NODE + 5;
pub const TYPE_REFERENCE: u16 = FIRST_NODE + 6;
pub const ANNOTATION: u16 = FIRST_NODE + 7;

// Statements
pub const BLOCK: u16 = FIRST_NODE + 20;
pub const VARIABLE_STATEMENT: u16 = FIRST_NODE + 21;
pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 22;
pub const RETURN_STATEMENT: u16 = FIRST_NODE + 23;
pub const YIELD_STATEMENT: u16 = FIRST_NODE + 24;
pub const THROW_STATEMENT: u16 = FIRST_NODE + 25;
pub const IF_STATEMENT: u16 = FIRST_NODE + 26;
pub const WHILE_STATEMENT: u16 = FIRST_NODE + 27;
pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 28;

// Expressions
pub const CALL_EXPRESSION: u16 = FIRST_NODE + 40;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = FIRST_NODE + 41;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = FIRST_NODE + 42;
pub const AWAIT_EXPRESSION: u16 = FIRST_NODE + 43;
pub const PREFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 44;
pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 45;
pub const CONDITIONAL_EXPRESSION: u16 = FIRST_NODE + 46;
pub const PARENTHESIZED_EXPRESSION: u16 = FIRST_NODE + 47;
pub const INTERPOLATED_STRING: u16 = FIRST_NODE + 48;
pub const INTERPOLATION: u16 = FIRST_NODE + 49;
pub const ARRAY_LITERAL: u16 = FIRST_NODE + 50;
/// Placeholder for an expression the parser could not recover.
pub const MISSING_EXPRESSION: u16 = FIRST_NODE + 51;

/// Human-readable kind name for tracing and tests.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        SOURCE_FILE => "SourceFile",
        EXTERN_TYPE_DECLARATION => "ExternTypeDeclaration",
        EXTERN_FUNCTION_DECLARATION => "ExternFunctionDeclaration",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        ARROW_FUNCTION => "ArrowFunction",
        PARAMETER => "Parameter",
        TYPE_REFERENCE => "TypeReference",
        ANNOTATION => "Annotation",
        BLOCK => "Block",
        VARIABLE_STATEMENT => "VariableStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        RETURN_STATEMENT => "ReturnStatement",
        YIELD_STATEMENT => "YieldStatement",
        THROW_STATEMENT => "ThrowStatement",
        IF_STATEMENT => "IfStatement",
        WHILE_STATEMENT => "WhileStatement",
        EMPTY_STATEMENT => "EmptyStatement",
        CALL_EXPRESSION => "CallExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        AWAIT_EXPRESSION => "AwaitExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        INTERPOLATED_STRING => "InterpolatedString",
        INTERPOLATION => "Interpolation",
        ARRAY_LITERAL => "ArrayLiteral",
        MISSING_EXPRESSION => "MissingExpression",
        _ => "Token",
    }
}
