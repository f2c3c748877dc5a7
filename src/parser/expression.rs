//! Expression parsing. Infix token runs are converted into a postfix form
//! with a shunting yard, then folded into an operator tree. Function calls
//! and list accessors are detected up front and travel through the postfix
//! form as already-built subtrees.

use crate::ast::{BinaryOperation, NodeId, NodeType, UnaryOperation};
use crate::lexer::{Keyword, Operator, Special, Token, TokenValue};
use crate::parser::context::ParserContext;

/// One item of the postfix form: either a token (by stream index) or a
/// subtree built ahead of time.
pub(crate) enum SubExpression {
    Token(usize),
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    Unary,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpressionTokenType {
    Unknown,
    Operation,
    Operand,
    OpeningBrace,
    ClosingBrace,
    RectBrace,
}

fn operation_kind(token: &Token) -> Option<OperationKind> {
    match &token.value {
        TokenValue::Operator(op) => match op {
            Operator::Add
            | Operator::Sub
            | Operator::Mult
            | Operator::Div
            | Operator::Equal
            | Operator::NotEqual
            | Operator::Less
            | Operator::Greater
            | Operator::LessEqual
            | Operator::GreaterEqual
            | Operator::Assign => Some(OperationKind::Binary),
            _ => None,
        },
        TokenValue::Keyword(kw) => match kw {
            Keyword::And | Keyword::Or => Some(OperationKind::Binary),
            Keyword::Not => Some(OperationKind::Unary),
            _ => None,
        },
        _ => None,
    }
}

fn binary_operation_of(token: &Token) -> Option<BinaryOperation> {
    match &token.value {
        TokenValue::Operator(op) => match op {
            Operator::Add => Some(BinaryOperation::Add),
            Operator::Sub => Some(BinaryOperation::Sub),
            Operator::Mult => Some(BinaryOperation::Mult),
            Operator::Div => Some(BinaryOperation::Div),
            Operator::Equal => Some(BinaryOperation::Equal),
            Operator::NotEqual => Some(BinaryOperation::NotEqual),
            Operator::Less => Some(BinaryOperation::Less),
            Operator::Greater => Some(BinaryOperation::Greater),
            Operator::LessEqual => Some(BinaryOperation::LessEqual),
            Operator::GreaterEqual => Some(BinaryOperation::GreaterEqual),
            Operator::Assign => Some(BinaryOperation::Assign),
            _ => None,
        },
        TokenValue::Keyword(Keyword::And) => Some(BinaryOperation::And),
        TokenValue::Keyword(Keyword::Or) => Some(BinaryOperation::Or),
        _ => None,
    }
}

/// Lower number = higher priority, evaluated first. All binary operators are
/// left-associative. Anything without a binary priority (the unary `not`)
/// compares as lowest.
fn priority(token: &Token) -> usize {
    match binary_operation_of(token) {
        Some(BinaryOperation::Mult) | Some(BinaryOperation::Div) => 10,
        Some(BinaryOperation::Add) | Some(BinaryOperation::Sub) => 20,
        Some(BinaryOperation::Less)
        | Some(BinaryOperation::LessEqual)
        | Some(BinaryOperation::Greater)
        | Some(BinaryOperation::GreaterEqual) => 30,
        Some(BinaryOperation::Equal) | Some(BinaryOperation::NotEqual) => 35,
        Some(BinaryOperation::And) => 40,
        Some(BinaryOperation::Or) => 50,
        Some(BinaryOperation::Assign) => 60,
        _ => usize::MAX,
    }
}

fn expression_token_type(token: &Token) -> ExpressionTokenType {
    match token.token_type() {
        crate::lexer::TokenType::Identifier
        | crate::lexer::TokenType::IntegerLiteral
        | crate::lexer::TokenType::FloatingPointLiteral
        | crate::lexer::TokenType::StringLiteral => return ExpressionTokenType::Operand,
        _ => {}
    }
    if token.is(Keyword::True) || token.is(Keyword::False) {
        return ExpressionTokenType::Operand;
    }
    if token.is(Operator::LeftBrace) {
        return ExpressionTokenType::OpeningBrace;
    }
    if token.is(Operator::RightBrace) {
        return ExpressionTokenType::ClosingBrace;
    }
    if token.is(Operator::RectLeftBrace) || token.is(Operator::RectRightBrace) {
        return ExpressionTokenType::RectBrace;
    }
    if operation_kind(token).is_some() {
        return ExpressionTokenType::Operation;
    }
    ExpressionTokenType::Unknown
}

fn operand_count(node_type: NodeType) -> usize {
    match node_type {
        NodeType::BinaryOperation => 2,
        NodeType::UnaryOperation => 1,
        _ => usize::MAX,
    }
}

/// Index of the brace matching `open`, scanning no further than `end`.
fn matching_brace(
    tokens: &[Token],
    open: usize,
    end: usize,
    opening: Operator,
    closing: Operator,
) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().take(end).skip(open) {
        if token.is(opening) {
            depth += 1;
        } else if token.is(closing) {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Builds a `FunctionCall` subtree for `IDENT ( ... )` starting at `i`.
/// Returns the subtree and the index just past the closing brace.
fn build_function_call(
    ctx: &mut ParserContext,
    i: usize,
    end: usize,
) -> Option<(NodeId, usize)> {
    let tokens = ctx.tokens;
    let name_token = &tokens[i];
    let open = i + 1;
    let Some(close) = matching_brace(
        tokens,
        open,
        end,
        Operator::LeftBrace,
        Operator::RightBrace,
    ) else {
        ctx.errors.push(
            tokens[open].source_ref.clone(),
            "No matching closing brace found",
        );
        return None;
    };

    let call = ctx
        .tree
        .add_detached(NodeType::FunctionCall, name_token.source_ref.clone());
    let name = ctx
        .tree
        .push_child(call, NodeType::FunctionName, name_token.source_ref.clone());
    ctx.tree.set_value(name, name_token.id().to_string());

    if close > open + 1 {
        let args = ctx.tree.push_child(
            call,
            NodeType::FunctionArguments,
            name_token.source_ref.clone(),
        );
        // Split the argument range on top-level commas only.
        let mut arg_begin = open + 1;
        let mut depth = 0usize;
        for j in (open + 1)..=close {
            let at_close = j == close;
            if !at_close {
                let token = &tokens[j];
                if token.is(Operator::LeftBrace) || token.is(Operator::RectLeftBrace) {
                    depth += 1;
                } else if token.is(Operator::RightBrace) || token.is(Operator::RectRightBrace) {
                    depth = depth.saturating_sub(1);
                }
            }
            if !at_close && !(depth == 0 && tokens[j].is(Operator::Comma)) {
                continue;
            }
            let expr_ref = tokens[arg_begin.min(j)].source_ref.clone();
            let expr = ctx.tree.push_child(args, NodeType::Expression, expr_ref);
            let postfix = generate_postfix_form(ctx, arg_begin, j);
            build_expression_subtree(ctx, postfix, expr);
            arg_begin = j + 1;
        }
    }
    Some((call, close + 1))
}

/// Builds a `ListAccessor` subtree for `IDENT [ ... ]` starting at `i`.
fn build_list_accessor(
    ctx: &mut ParserContext,
    i: usize,
    end: usize,
) -> Option<(NodeId, usize)> {
    let tokens = ctx.tokens;
    let name_token = &tokens[i];
    let open = i + 1;
    let Some(close) = matching_brace(
        tokens,
        open,
        end,
        Operator::RectLeftBrace,
        Operator::RectRightBrace,
    ) else {
        ctx.errors
            .push(tokens[open].source_ref.clone(), "']' was expected");
        return None;
    };

    let accessor = ctx
        .tree
        .add_detached(NodeType::ListAccessor, name_token.source_ref.clone());
    let name = ctx.tree.push_child(
        accessor,
        NodeType::VariableName,
        name_token.source_ref.clone(),
    );
    ctx.tree.set_value(name, name_token.id().to_string());

    let expr_ref = tokens[(open + 1).min(close)].source_ref.clone();
    let expr = ctx
        .tree
        .push_child(accessor, NodeType::Expression, expr_ref);
    let postfix = generate_postfix_form(ctx, open + 1, close);
    build_expression_subtree(ctx, postfix, expr);
    Some((accessor, close + 1))
}

/// Shunting yard over the token range `[begin, end)`.
pub(crate) fn generate_postfix_form(
    ctx: &mut ParserContext,
    begin: usize,
    end: usize,
) -> Vec<SubExpression> {
    let mut postfix = Vec::new();
    let mut operations: Vec<usize> = Vec::new();
    let mut i = begin;
    while i < end {
        let tokens = ctx.tokens;
        let call_opening = tokens
            .get(i + 1)
            .map(|token| token.is(Operator::LeftBrace))
            .unwrap_or(false);
        let accessor_opening = tokens
            .get(i + 1)
            .map(|token| token.is(Operator::RectLeftBrace))
            .unwrap_or(false);
        if tokens[i].is_identifier() && call_opening {
            if let Some((node, next)) = build_function_call(ctx, i, end) {
                postfix.push(SubExpression::Node(node));
                i = next;
                continue;
            }
        }
        if tokens[i].is_identifier() && accessor_opening {
            if let Some((node, next)) = build_list_accessor(ctx, i, end) {
                postfix.push(SubExpression::Node(node));
                i = next;
                continue;
            }
        }

        let token = &tokens[i];
        match expression_token_type(token) {
            ExpressionTokenType::Operand => postfix.push(SubExpression::Token(i)),
            ExpressionTokenType::OpeningBrace => operations.push(i),
            ExpressionTokenType::ClosingBrace => {
                let mut found_brace = false;
                while let Some(&top) = operations.last() {
                    if expression_token_type(&tokens[top]) == ExpressionTokenType::OpeningBrace {
                        found_brace = true;
                        break;
                    }
                    postfix.push(SubExpression::Token(top));
                    operations.pop();
                }
                if !found_brace {
                    ctx.errors.push(
                        token.source_ref.clone(),
                        "Unexpected closing brace in an expression",
                    );
                }
                operations.pop();
            }
            ExpressionTokenType::Operation => {
                if operation_kind(token) == Some(OperationKind::Binary) {
                    let new_priority = priority(token);
                    while let Some(&top) = operations.last() {
                        if expression_token_type(&tokens[top]) == ExpressionTokenType::OpeningBrace
                        {
                            break;
                        }
                        if priority(&tokens[top]) > new_priority {
                            break;
                        }
                        postfix.push(SubExpression::Token(top));
                        operations.pop();
                    }
                }
                // A unary operator binds everything to its right; it is
                // popped only by a closing brace or the final drain.
                operations.push(i);
            }
            // Bare rectangular braces are consumed by accessor detection;
            // stray ones are ignored.
            ExpressionTokenType::RectBrace => {}
            ExpressionTokenType::Unknown => {
                ctx.errors.push(
                    token.source_ref.clone(),
                    "Unexpected token inside an expression",
                );
            }
        }
        i += 1;
    }
    while let Some(top) = operations.pop() {
        postfix.push(SubExpression::Token(top));
    }
    postfix
}

/// Folds a postfix form into an operator tree under `root`. The form is
/// drained last-in first, prepending children, which reconstructs the
/// original left-to-right operand order.
pub(crate) fn build_expression_subtree(
    ctx: &mut ParserContext,
    postfix: Vec<SubExpression>,
    root: NodeId,
) {
    let mut curr = root;
    for subexpr in postfix.iter().rev() {
        match subexpr {
            SubExpression::Token(index) => {
                let token = ctx.tokens[*index].clone();
                let source_ref = token.source_ref.clone();
                match expression_token_type(&token) {
                    ExpressionTokenType::Operation => match operation_kind(&token) {
                        Some(OperationKind::Binary) => {
                            curr = ctx.tree.unshift_child(
                                curr,
                                NodeType::BinaryOperation,
                                source_ref.clone(),
                            );
                            match binary_operation_of(&token) {
                                Some(operation) => ctx.tree.set_value(curr, operation),
                                None => ctx.errors.push(
                                    source_ref,
                                    "Unknown operator found in expression, it must be either unary or binary",
                                ),
                            }
                        }
                        Some(OperationKind::Unary) => {
                            curr = ctx.tree.unshift_child(
                                curr,
                                NodeType::UnaryOperation,
                                source_ref,
                            );
                            ctx.tree.set_value(curr, UnaryOperation::Not);
                        }
                        None => ctx.errors.push(
                            source_ref,
                            "Unknown operator found in expression, it must be either unary or binary",
                        ),
                    },
                    ExpressionTokenType::Operand => match &token.value {
                        TokenValue::Identifier(name) => {
                            let node =
                                ctx.tree
                                    .unshift_child(curr, NodeType::VariableName, source_ref);
                            ctx.tree.set_value(node, name.clone());
                        }
                        TokenValue::IntegerLiteral(text) => {
                            let node = ctx.tree.unshift_child(
                                curr,
                                NodeType::IntegerLiteralValue,
                                source_ref.clone(),
                            );
                            let value = match text.parse::<i64>() {
                                Ok(value) => value,
                                Err(_) => {
                                    ctx.errors
                                        .push(source_ref, "Integer literal is out of range");
                                    0
                                }
                            };
                            ctx.tree.set_value(node, value);
                        }
                        TokenValue::FloatingPointLiteral(text) => {
                            let node = ctx.tree.unshift_child(
                                curr,
                                NodeType::FloatingPointLiteralValue,
                                source_ref,
                            );
                            ctx.tree
                                .set_value(node, text.parse::<f64>().unwrap_or_default());
                        }
                        TokenValue::StringLiteral(text) => {
                            let node = ctx.tree.unshift_child(
                                curr,
                                NodeType::StringLiteralValue,
                                source_ref,
                            );
                            ctx.tree.set_value(node, text.clone());
                        }
                        TokenValue::Keyword(kw) => {
                            let node = ctx.tree.unshift_child(
                                curr,
                                NodeType::BooleanLiteralValue,
                                source_ref,
                            );
                            ctx.tree.set_value(node, *kw == Keyword::True);
                        }
                        _ => {}
                    },
                    // Leftover braces from an unbalanced expression carry no
                    // tree content.
                    _ => {}
                }
            }
            SubExpression::Node(node) => {
                ctx.tree.attach_front(curr, *node);
            }
        }
        loop {
            let node = ctx.tree.node(curr);
            if node.children.len() >= operand_count(node.node_type) {
                match node.parent {
                    Some(parent) => curr = parent,
                    None => break,
                }
            } else {
                break;
            }
        }
    }
}

/// Subparser for `Expression` nodes: consumes tokens up to the nearest
/// colon or end-of-expression marker.
pub(crate) fn parse_expression(ctx: &mut ParserContext) {
    let begin = ctx.pos;
    let mut end = ctx.pos;
    while let Some(token) = ctx.token_at(end) {
        if token.is(Special::Colon) || token.is(Special::EndOfExpression) {
            break;
        }
        end += 1;
    }
    let postfix = generate_postfix_form(ctx, begin, end);
    let root = ctx.node;
    build_expression_subtree(ctx, postfix, root);
    ctx.pos = end;
    ctx.go_parent_node();
}
