//! Statement subparsers. Each one consumes the tokens of its construct,
//! extends the tree under the context's current node, and leaves the cursor
//! just past everything it recognized. Errors are recorded and parsing
//! resynchronizes at the next end-of-expression marker wherever plausible.

use crate::ast::{NodeType, NodeValue};
use crate::lexer::{Keyword, Operator, Special, Token, TokenType};
use crate::parser::context::ParserContext;

/// `IDENT : TYPENAME` lookahead deciding between a declaration and a plain
/// expression statement.
fn is_variable_declaration(ctx: &ParserContext) -> bool {
    let (Some(name), Some(colon), Some(typename)) = (ctx.peek(0), ctx.peek(1), ctx.peek(2)) else {
        return false;
    };
    name.is_identifier() && colon.is(Special::Colon) && ctx.types.is_typename(typename)
}

fn can_begin_expression(token: &Token) -> bool {
    matches!(
        token.token_type(),
        TokenType::Identifier
            | TokenType::IntegerLiteral
            | TokenType::FloatingPointLiteral
            | TokenType::StringLiteral
    ) || token.is(Keyword::True)
        || token.is(Keyword::False)
        || token.is(Operator::LeftBrace)
}

pub(crate) fn parse_program_root(ctx: &mut ParserContext) {
    while let Some(token) = ctx.token() {
        if token.is(Keyword::Definition) {
            ctx.node = ctx.push_child_node(NodeType::FunctionDefinition);
            ctx.propagate();
        } else {
            ctx.push_error("Function definition was expected");
            return;
        }
    }
}

pub(crate) fn parse_function_definition(ctx: &mut ParserContext) {
    ctx.go_next_token();

    match ctx.token() {
        Some(token) if token.is_identifier() => {
            let name = token.id().to_string();
            let node = ctx.push_child_node(NodeType::FunctionName);
            ctx.tree.set_value(node, name);
            ctx.go_next_token();
        }
        _ => {
            ctx.push_error("Given token is not allowed here in function definition");
            ctx.go_next_expression();
            ctx.go_parent_node();
            return;
        }
    }

    if !matches!(ctx.token(), Some(token) if token.is(Operator::LeftBrace)) {
        ctx.push_error("Given token is not allowed here in function definition");
        ctx.go_next_expression();
        ctx.go_parent_node();
        return;
    }
    ctx.node = ctx.push_child_node(NodeType::FunctionArguments);
    ctx.propagate();

    if !matches!(ctx.token(), Some(token) if token.is(Special::Arrow)) {
        ctx.push_error("Function return type is mandatory in its header");
    }
    ctx.go_next_token();

    let return_type = match ctx.token() {
        Some(token) if ctx.types.is_typename(token) => ctx.types.type_id(token),
        _ => {
            ctx.push_error("Type name not found");
            crate::ast::UNKNOWN_TYPE
        }
    };
    let node = ctx.push_child_node(NodeType::FunctionReturnType);
    ctx.tree.set_value(node, NodeValue::Type(return_type));
    ctx.go_next_token();

    if !matches!(ctx.token(), Some(token) if token.is(Special::Colon)) {
        ctx.push_error("Colon expected at the end of function header");
    }
    ctx.go_next_token();

    ctx.node = ctx.push_child_node(NodeType::BranchRoot);
    ctx.nesting_level = 1;
    ctx.propagate();
}

pub(crate) fn parse_function_arguments(ctx: &mut ParserContext) {
    // The caller verified the opening brace.
    ctx.go_next_token();
    loop {
        match ctx.token() {
            None => {
                ctx.push_error("Function argument declaration is ill-formed");
                ctx.go_parent_node();
                return;
            }
            Some(token) if token.is(Operator::RightBrace) => break,
            Some(_) => {}
        }

        let well_formed = matches!(
            (ctx.peek(0), ctx.peek(1), ctx.peek(2)),
            (Some(name), Some(colon), Some(typename))
                if name.is_identifier()
                    && colon.is(Special::Colon)
                    && ctx.types.is_typename(typename)
        );
        if !well_formed {
            ctx.push_error("Function argument declaration is ill-formed");
            while let Some(token) = ctx.token() {
                if token.is(Operator::RightBrace) || token.is(Special::Colon) {
                    break;
                }
                ctx.go_next_token();
            }
            break;
        }

        let arg_name = ctx.peek(0).map(|token| token.id().to_string());
        let arg_type = ctx.peek(2).map(|token| ctx.types.type_id(token));
        let type_ref = ctx.peek(2).map(|token| token.source_ref.clone());
        let node = ctx.push_child_node(NodeType::FunctionArgument);
        if let (Some(name), Some(type_id), Some(type_ref)) = (arg_name, arg_type, type_ref) {
            let type_node = ctx.tree.push_child(node, NodeType::TypeName, type_ref);
            ctx.tree.set_value(type_node, NodeValue::Type(type_id));
            let name_ref = ctx.current_ref();
            let name_node = ctx.tree.push_child(node, NodeType::VariableName, name_ref);
            ctx.tree.set_value(name_node, name);
        }

        let steps = match ctx.peek(3) {
            Some(token) if token.is(Operator::Comma) => 4,
            _ => 3,
        };
        ctx.pos += steps;
    }
    ctx.go_parent_node();
    ctx.go_next_token();
}

pub(crate) fn parse_branch_root(ctx: &mut ParserContext) {
    while ctx.nesting_level > 0 {
        if ctx.at_end() {
            return;
        }
        while let Some(token) = ctx.token() {
            if token.is(Special::EndOfExpression) || token.is(Special::Colon) {
                ctx.go_next_token();
            } else {
                break;
            }
        }
        if ctx.at_end() {
            return;
        }

        let mut current_nesting = 0usize;
        while matches!(ctx.token(), Some(token) if token.is(Special::Indentation)) {
            current_nesting += 1;
            ctx.go_next_token();
        }
        if ctx.at_end() {
            return;
        }

        if current_nesting > ctx.nesting_level {
            ctx.push_error(format!(
                "Unexpected indentation mismatch: {} indentation(s) expected, {} indentation(s) given",
                ctx.nesting_level, current_nesting
            ));
        } else if current_nesting < ctx.nesting_level {
            // The block ended. Roll up to the enclosing branch root and put
            // the indentation tokens back for the outer block to recount.
            ctx.go_parent_node();
            while ctx.tree.node(ctx.node).node_type != NodeType::BranchRoot {
                if ctx.tree.parent(ctx.node).is_none() {
                    break;
                }
                ctx.go_parent_node();
            }
            ctx.nesting_level -= 1;
            ctx.pos -= current_nesting;
            return;
        }

        let Some(token) = ctx.token().cloned() else {
            return;
        };
        if token.is(Keyword::If) {
            ctx.node = ctx.push_child_node(NodeType::IfStatement);
        } else if token.is(Keyword::While) {
            ctx.node = ctx.push_child_node(NodeType::WhileStatement);
        } else if is_variable_declaration(ctx) {
            ctx.node = ctx.push_child_node(NodeType::VariableDeclaration);
        } else if token.is(Keyword::Elif) || token.is(Keyword::Else) {
            let keyword = if token.is(Keyword::Elif) { "elif" } else { "else" };
            let last_child = ctx.tree.children(ctx.node).last().copied();
            match last_child {
                Some(child) if ctx.tree.node(child).node_type == NodeType::IfStatement => {
                    let node_type = if token.is(Keyword::Elif) {
                        NodeType::ElifStatement
                    } else {
                        NodeType::ElseStatement
                    };
                    ctx.node = ctx
                        .tree
                        .push_child(child, node_type, token.source_ref.clone());
                }
                _ => {
                    ctx.push_error(format!("{keyword} is not allowed here"));
                    ctx.go_next_expression();
                    continue;
                }
            }
        } else if token.is(Keyword::Return) {
            ctx.node = ctx.push_child_node(NodeType::ReturnStatement);
        } else {
            ctx.node = ctx.push_child_node(NodeType::Expression);
        }
        ctx.propagate();
    }
}

pub(crate) fn parse_if_statement(ctx: &mut ParserContext) {
    ctx.go_next_token();
    ctx.node = ctx.push_child_node(NodeType::Expression);
    ctx.propagate();
    if !matches!(ctx.token(), Some(token) if token.is(Special::Colon)) {
        ctx.push_error("Colon expected here");
        ctx.go_next_expression();
    }
    ctx.node = ctx.push_child_node(NodeType::BranchRoot);
    ctx.nesting_level += 1;
    ctx.propagate();
}

pub(crate) fn parse_elif_statement(ctx: &mut ParserContext) {
    ctx.go_next_token();
    ctx.node = ctx.push_child_node(NodeType::Expression);
    ctx.propagate();
    if !matches!(ctx.token(), Some(token) if token.is(Special::Colon)) {
        ctx.push_error("Colon expected here");
        ctx.go_next_expression();
    }
    ctx.node = ctx.push_child_node(NodeType::BranchRoot);
    ctx.nesting_level += 1;
    ctx.propagate();
}

pub(crate) fn parse_else_statement(ctx: &mut ParserContext) {
    ctx.go_next_token();
    if !matches!(ctx.token(), Some(token) if token.is(Special::Colon)) {
        ctx.push_error("Colon expected here");
        ctx.go_next_expression();
    }
    ctx.node = ctx.push_child_node(NodeType::BranchRoot);
    ctx.nesting_level += 1;
    ctx.propagate();
}

pub(crate) fn parse_while_statement(ctx: &mut ParserContext) {
    ctx.go_next_token();
    ctx.node = ctx.push_child_node(NodeType::Expression);
    ctx.propagate();
    if !matches!(ctx.token(), Some(token) if token.is(Special::Colon)) {
        ctx.push_error("Colon expected here");
        ctx.go_next_expression();
    }
    ctx.node = ctx.push_child_node(NodeType::BranchRoot);
    ctx.nesting_level += 1;
    ctx.propagate();
}

pub(crate) fn parse_return_statement(ctx: &mut ParserContext) {
    ctx.go_next_token();
    let Some(token) = ctx.token() else {
        ctx.go_parent_node();
        return;
    };
    if token.is(Special::EndOfExpression) {
        // Valueless return.
        ctx.go_parent_node();
        ctx.go_next_token();
        return;
    }
    if !can_begin_expression(token) {
        ctx.push_error("Expression as function return value was expected");
        ctx.go_next_expression();
        ctx.go_parent_node();
        return;
    }
    ctx.node = ctx.push_child_node(NodeType::Expression);
    ctx.propagate();
    ctx.go_parent_node();
}

pub(crate) fn parse_variable_declaration(ctx: &mut ParserContext) {
    // The lookahead verified IDENT : TYPENAME under the cursor.
    let name = ctx
        .token()
        .map(|token| token.id().to_string())
        .unwrap_or_default();
    let name_ref = ctx.current_ref();
    ctx.go_next_token();
    ctx.go_next_token();

    let type_token = match ctx.token() {
        Some(token) => token.clone(),
        None => {
            ctx.push_error("Definition expression or line break was expected");
            ctx.go_parent_node();
            return;
        }
    };
    let type_node = ctx.push_child_node(NodeType::TypeName);
    let type_id = ctx.types.type_id(&type_token);
    ctx.tree.set_value(type_node, NodeValue::Type(type_id));
    let is_list = type_token.is(Keyword::List);

    if is_list {
        let left = ctx.peek(1).cloned();
        let element = ctx.peek(2).cloned();
        let right = ctx.peek(3).cloned();
        ctx.pos += 3;
        match (left, element, right) {
            (Some(left), Some(element), Some(right)) => {
                if !left.is(Operator::RectLeftBrace) || !right.is(Operator::RectRightBrace) {
                    ctx.push_error("Unexpected syntax for list declaration");
                }
                let element_type = ctx.types.type_id(&element);
                let element_node = ctx.tree.push_child(
                    type_node,
                    NodeType::TypeName,
                    element.source_ref.clone(),
                );
                ctx.tree
                    .set_value(element_node, NodeValue::Type(element_type));
            }
            _ => {
                ctx.push_error("Unexpected syntax for list declaration");
                ctx.go_next_expression();
                ctx.go_parent_node();
                return;
            }
        }
    }

    let name_node = ctx
        .tree
        .push_child(ctx.node, NodeType::VariableName, name_ref);
    ctx.tree.set_value(name_node, name);

    match ctx.peek(1) {
        Some(token) if token.is(Special::EndOfExpression) => {
            // Declaration without a definition.
            ctx.pos += 2;
            ctx.go_parent_node();
        }
        Some(token) if token.is(Operator::Assign) => {
            ctx.node = ctx.push_child_node(NodeType::Expression);
            if is_list {
                ctx.node = ctx.push_child_node(NodeType::ListStatement);
            }
            ctx.pos += 2;
            ctx.propagate();
            ctx.go_parent_node();
        }
        _ => {
            ctx.push_error("Definition expression or line break was expected");
            ctx.go_next_expression();
            ctx.go_parent_node();
        }
    }
}

pub(crate) fn parse_list_statement(ctx: &mut ParserContext) {
    if !matches!(ctx.token(), Some(token) if token.is(Operator::RectLeftBrace)) {
        ctx.push_error("Unexpected syntax for list declaration");
        ctx.go_next_expression();
        ctx.go_parent_node();
        ctx.go_parent_node();
        return;
    }

    loop {
        match ctx.token() {
            Some(token) if token.is(Operator::RectRightBrace) => break,
            Some(_) => {}
            None => {
                ctx.push_error("']' was expected");
                ctx.go_parent_node();
                ctx.go_parent_node();
                return;
            }
        }
        ctx.go_next_token();

        // Element expressions end at a top-level comma or the closing
        // bracket; running into the end of the line is an error.
        let begin = ctx.pos;
        let mut end = ctx.pos;
        let mut terminated = false;
        while let Some(token) = ctx.token_at(end) {
            if token.is(Operator::Comma) || token.is(Operator::RectRightBrace) {
                terminated = true;
                break;
            }
            if token.is(Special::EndOfExpression) {
                break;
            }
            end += 1;
        }
        if !terminated {
            let source_ref = ctx
                .token_at(end)
                .map(|token| token.source_ref.clone())
                .unwrap_or_else(|| ctx.current_ref());
            ctx.errors.push(source_ref, "']' was expected");
            ctx.pos = end;
            ctx.go_parent_node();
            ctx.go_parent_node();
            return;
        }

        if end > begin {
            let expression = ctx.push_child_node(NodeType::Expression);
            let postfix = crate::parser::expression::generate_postfix_form(ctx, begin, end);
            crate::parser::expression::build_expression_subtree(ctx, postfix, expression);
        }
        ctx.pos = end;
    }
    ctx.go_next_token();
    ctx.go_parent_node();
    ctx.go_parent_node();
}
