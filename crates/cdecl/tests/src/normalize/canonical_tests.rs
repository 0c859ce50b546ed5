use super::*;

#[test]
fn tagged_body_drops_alias_clause() {
    assert_eq!(canonicalize_declarations("typedef struct foo { int x; } FOO;"), "struct foo { int x; };");
}

#[test]
fn tag_is_lowercased_and_body_kept_verbatim() {
    let text = "typedef struct Word_List {\n  struct Word_List *next;\n  char *word;\n} WORD_LIST, *WORD_LIST_PTR;\n";
    assert_eq!(
        canonicalize_declarations(text),
        "struct word_list {\n  struct Word_List *next;\n  char *word;\n};\n"
    );
}

#[test]
fn anonymous_body_takes_last_word_of_alias_clause() {
    assert_eq!(canonicalize_declarations("typedef struct { int y; } BAR;"), "struct bar { int y; };");
    assert_eq!(canonicalize_declarations("typedef struct { int y; } struct bar;"), "struct bar { int y; };");
}

#[test]
fn forward_typedef() {
    assert_eq!(canonicalize_declarations("typedef struct bar BAR;"), "struct bar;");
    assert_eq!(canonicalize_declarations("typedef struct Bar\n  BAR ;"), "struct bar;");
}

#[test]
fn nested_body_is_left_untouched() {
    let text = "typedef struct outer { struct { int a; } in; } OUTER;\n";
    assert_eq!(canonicalize_declarations(text), text);
}

#[test]
fn nested_body_does_not_block_later_declarations() {
    let text = "typedef struct outer { struct { int a; } in; } OUTER;\ntypedef struct inner INNER;\n";
    assert_eq!(
        canonicalize_declarations(text),
        "typedef struct outer { struct { int a; } in; } OUTER;\nstruct inner;\n"
    );
}

#[test]
fn other_text_passes_through() {
    let text = "typedef struct node *NODEPTR;\ntypedef int count_t;\nstruct plain { int x; };\n/* typedef struct */\n";
    assert_eq!(canonicalize_declarations(text), text);
}

#[test]
fn canonical_text_is_stable() {
    let text = "struct foo { int x; };\nstruct bar;\nstruct foo *p;\n";
    assert_eq!(canonicalize_declarations(text), text);
}
