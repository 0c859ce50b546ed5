use crate::frontend::{NodeKind, SyntaxNode};

/// Render `node` as a one-line declaration, or `None` when the node has
/// nothing to show (a macro with macros disabled or without tokens).
pub fn declaration_string<N: SyntaxNode>(
    node: &N,
    include_macros: bool,
) -> Option<String> {
    let decl = match node.kind() {
        NodeKind::Function => format!("{};", function_signature(node)),
        NodeKind::Variable | NodeKind::Field => format!("{} {};", node.type_spelling(), node.spelling()),
        NodeKind::Parameter => format!("{} {}", node.type_spelling(), node.spelling()),
        NodeKind::Typedef => format!("typedef {} {};", node.type_spelling(), node.spelling()),
        NodeKind::Struct => format!("struct {};", name_or(node.spelling(), "<anonymous>")),
        NodeKind::Union => format!("union {};", name_or(node.spelling(), "<anonymous>")),
        NodeKind::Enum => format!("enum {};", name_or(node.spelling(), "<anonymous>")),
        NodeKind::EnumConstant => enum_constant(node),
        NodeKind::Macro => {
            let tokens = node.tokens();
            if !include_macros || tokens.is_empty() {
                return None;
            }
            format!("#define {}", tokens.join(" "))
        },
        NodeKind::Class | NodeKind::InvalidFile | NodeKind::Other => {
            format!("{}: {}", node.kind_name(), name_or(node.spelling(), "<unnamed>"))
        },
    };
    Some(decl)
}

/// Whether `node` supplies a body rather than only announcing a name.
///
/// Aggregates count as definitions when they have at least one child, so an
/// empty `{}` body is reported as a declaration.
pub fn is_definition<N: SyntaxNode>(node: &N) -> bool {
    match node.kind() {
        NodeKind::Function => node.is_definition(),
        NodeKind::Struct | NodeKind::Union | NodeKind::Enum | NodeKind::Class => !node.children().is_empty(),
        _ => false,
    }
}

/// `<result> <name>(<type> <name>, ...)`; unnamed parameters render as their
/// bare type and an empty list renders as `void`.
fn function_signature<N: SyntaxNode>(node: &N) -> String {
    let params: Vec<String> = node
        .children()
        .iter()
        .filter(|child| child.kind() == NodeKind::Parameter)
        .map(|param| {
            if param.spelling().is_empty() {
                param.type_spelling().to_string()
            } else {
                format!("{} {}", param.type_spelling(), param.spelling())
            }
        })
        .collect();
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    format!("{} {}({params})", node.result_type(), node.spelling())
}

fn enum_constant<N: SyntaxNode>(node: &N) -> String {
    match node.tokens() {
        [_, eq, value @ ..] if eq == "=" && !value.is_empty() => format!("{} = {}", node.spelling(), value.concat()),
        _ => node.spelling().to_string(),
    }
}

fn name_or<'a>(
    name: &'a str,
    fallback: &'a str,
) -> &'a str {
    if name.is_empty() { fallback } else { name }
}

#[cfg(test)]
#[path = "../../tests/src/extract/classify_tests.rs"]
mod tests;
