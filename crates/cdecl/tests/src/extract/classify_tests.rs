use super::*;
use crate::frontend::Cursor;

fn param(
    ty: &str,
    name: &str,
) -> Cursor {
    Cursor::new(NodeKind::Parameter, name).with_type(ty)
}

fn function(
    result: &str,
    name: &str,
    params: Vec<Cursor>,
) -> Cursor {
    Cursor::new(NodeKind::Function, name).with_result_type(result).with_children(params)
}

#[test]
fn function_prototype() {
    let add = function("int", "add", vec![param("int", "a"), param("int", "b")]);
    assert_eq!(declaration_string(&add, false).as_deref(), Some("int add(int a, int b);"));
    assert!(!is_definition(&add));
}

#[test]
fn function_definition_uses_frontend_flag() {
    let main = function("int", "main", Vec::new()).with_definition(true);
    assert_eq!(declaration_string(&main, false).as_deref(), Some("int main(void);"));
    assert!(is_definition(&main));
}

#[test]
fn unnamed_parameter_is_bare_type() {
    let f = function("void", "consume", vec![param("const char *", ""), param("int", "n")]);
    assert_eq!(declaration_string(&f, false).as_deref(), Some("void consume(const char *, int n);"));
}

#[test]
fn only_parameter_children_form_the_signature() {
    let body = Cursor::new(NodeKind::Other, "").with_kind_name("CompoundStmt");
    let f = function("int", "one", vec![param("int", "x"), body]);
    assert_eq!(declaration_string(&f, false).as_deref(), Some("int one(int x);"));
}

#[test]
fn variables_fields_and_typedefs() {
    let var = Cursor::new(NodeKind::Variable, "counter").with_type("static int");
    let field = Cursor::new(NodeKind::Field, "next").with_type("struct node *");
    let typedef = Cursor::new(NodeKind::Typedef, "WORD").with_type("struct word");
    assert_eq!(declaration_string(&var, false).as_deref(), Some("static int counter;"));
    assert_eq!(declaration_string(&field, false).as_deref(), Some("struct node * next;"));
    assert_eq!(declaration_string(&typedef, false).as_deref(), Some("typedef struct word WORD;"));
    assert!(!is_definition(&var));
    assert!(!is_definition(&typedef));
}

#[test]
fn aggregates_and_anonymous_names() {
    let point = Cursor::new(NodeKind::Struct, "Point");
    let anon_union = Cursor::new(NodeKind::Union, "");
    let anon_enum = Cursor::new(NodeKind::Enum, "");
    assert_eq!(declaration_string(&point, false).as_deref(), Some("struct Point;"));
    assert_eq!(declaration_string(&anon_union, false).as_deref(), Some("union <anonymous>;"));
    assert_eq!(declaration_string(&anon_enum, false).as_deref(), Some("enum <anonymous>;"));
}

#[test]
fn aggregate_is_definition_when_it_has_members() {
    let forward = Cursor::new(NodeKind::Struct, "Point");
    let full = Cursor::new(NodeKind::Struct, "Point").with_children(vec![
        Cursor::new(NodeKind::Field, "x").with_type("int"),
        Cursor::new(NodeKind::Field, "y").with_type("int"),
    ]);
    let class = Cursor::new(NodeKind::Class, "Box").with_children(vec![Cursor::new(NodeKind::Field, "v")]);
    assert!(!is_definition(&forward));
    assert!(is_definition(&full));
    assert!(is_definition(&class));
}

#[test]
fn empty_body_counts_as_declaration() {
    let empty = Cursor::new(NodeKind::Enum, "nothing").with_definition(true);
    assert!(!is_definition(&empty));
}

#[test]
fn enum_constant_with_value() {
    let red = Cursor::new(NodeKind::EnumConstant, "RED").with_tokens(["RED", "=", "1", "<<", "2"]);
    assert_eq!(declaration_string(&red, false).as_deref(), Some("RED = 1<<2"));
}

#[test]
fn enum_constant_without_value() {
    let green = Cursor::new(NodeKind::EnumConstant, "GREEN").with_tokens(["GREEN"]);
    let bare = Cursor::new(NodeKind::EnumConstant, "BLUE");
    let dangling = Cursor::new(NodeKind::EnumConstant, "X").with_tokens(["X", "="]);
    assert_eq!(declaration_string(&green, false).as_deref(), Some("GREEN"));
    assert_eq!(declaration_string(&bare, false).as_deref(), Some("BLUE"));
    assert_eq!(declaration_string(&dangling, false).as_deref(), Some("X"));
}

#[test]
fn macro_depends_on_inclusion_flag() {
    let max = Cursor::new(NodeKind::Macro, "MAX").with_tokens(["MAX", "(", "a", ",", "b", ")", "a"]);
    assert_eq!(declaration_string(&max, true).as_deref(), Some("#define MAX ( a , b ) a"));
    assert_eq!(declaration_string(&max, false), None);
    assert!(!is_definition(&max));
}

#[test]
fn macro_without_tokens_has_no_declaration() {
    let empty = Cursor::new(NodeKind::Macro, "EMPTY");
    assert_eq!(declaration_string(&empty, true), None);
}

#[test]
fn fallback_uses_kind_name() {
    let linkage = Cursor::new(NodeKind::Other, "").with_kind_name("LinkageSpecDecl");
    let ns = Cursor::new(NodeKind::Other, "geometry").with_kind_name("NamespaceDecl");
    assert_eq!(declaration_string(&linkage, false).as_deref(), Some("LinkageSpecDecl: <unnamed>"));
    assert_eq!(declaration_string(&ns, false).as_deref(), Some("NamespaceDecl: geometry"));
}
