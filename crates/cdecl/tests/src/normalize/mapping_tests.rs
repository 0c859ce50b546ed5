use super::*;

fn entries(mapping: &AliasMapping) -> Vec<(&str, &str)> {
    mapping.iter().collect()
}

#[test]
fn tagged_body() {
    let mapping = build_alias_mapping("typedef struct Foo { int x; } FOO;");
    assert_eq!(entries(&mapping), [("FOO", "foo")]);
}

#[test]
fn anonymous_body_uses_lowercase_alias() {
    let mapping = build_alias_mapping("typedef struct {\n  int x;\n  int y;\n} POINT;\n");
    assert_eq!(entries(&mapping), [("POINT", "point")]);
}

#[test]
fn forward_typedef() {
    let mapping = build_alias_mapping("typedef struct Bar BAR;");
    assert_eq!(mapping.get("BAR"), Some("bar"));
    assert_eq!(mapping.len(), 1);
}

#[test]
fn later_scan_overwrites_value_but_keeps_position() {
    let text = "\
typedef struct foo { int x; } FOO;
typedef struct { int y; } BAR;
typedef struct baz FOO;
";
    let mapping = build_alias_mapping(text);
    assert_eq!(entries(&mapping), [("FOO", "baz"), ("BAR", "bar")]);
}

#[test]
fn forward_scan_wins_over_earlier_textual_occurrence() {
    let text = "typedef struct first THING;\ntypedef struct second { int z; } THING;\n";
    let mapping = build_alias_mapping(text);
    assert_eq!(mapping.get("THING"), Some("first"));
}

#[test]
fn lowercase_aliases_are_recorded_too() {
    let mapping = build_alias_mapping("typedef struct node node_t;");
    assert_eq!(mapping.get("node_t"), Some("node"));
}

#[test]
fn nested_body_contributes_nothing() {
    let mapping = build_alias_mapping("typedef struct outer { struct { int a; } in; } OUTER;");
    assert!(mapping.is_empty());
}

#[test]
fn unrelated_text_yields_empty_mapping() {
    let mapping = build_alias_mapping("struct plain { int x; };\ntypedef int INT;\ntypedef struct node *NODEPTR;\n");
    assert!(mapping.is_empty());
}

#[test]
fn mapping_from_pairs() {
    let mapping: AliasMapping = [("A_B", "one"), ("C_D", "two"), ("A_B", "three")].into_iter().collect();
    assert_eq!(entries(&mapping), [("A_B", "three"), ("C_D", "two")]);
}
