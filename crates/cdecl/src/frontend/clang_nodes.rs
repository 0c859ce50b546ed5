use clang_ast::{BareSourceLocation, SourceLocation, SourceRange};
use serde::Deserialize;

pub(crate) type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the extractor classifies.
///
/// Variants are named after the JSON `"kind"` they match.
#[derive(Deserialize, Debug)]
pub(crate) enum Clang {
    FunctionDecl(DeclData),
    VarDecl(DeclData),
    ParmVarDecl(DeclData),
    FieldDecl(DeclData),
    TypedefDecl(DeclData),
    RecordDecl(DeclData),
    CXXRecordDecl(DeclData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),

    // Function bodies.
    #[allow(dead_code)]
    CompoundStmt(StmtData),
    #[allow(dead_code)]
    CXXTryStmt(StmtData),

    // Unrecognized kinds still deserialize `loc` and `range`: `clang-ast`
    // carries the current file from one location to the next, so a dropped
    // location (e.g. on `LinkageSpecDecl`) would misattribute every later node.
    #[allow(dead_code)]
    Other {
        kind: Option<String>,
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Common data for all declaration nodes.
///
/// `ty` is Clang's `type.qualType`: the declared type for variables and
/// fields, the underlying type for typedefs, and the full function type
/// (e.g. `"int (int, int)"`) for functions.
#[derive(Deserialize, Debug)]
pub(crate) struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "tagUsed")]
    pub tag_used: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub(crate) struct StmtData {
    #[serde(default)]
    pub range: Option<SourceRange>,
}

/// Clang's qualified type representation.
#[derive(Deserialize, Debug)]
pub(crate) struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
}

impl DeclData {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }

    pub fn qual_type(&self) -> &str {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref()).unwrap_or("")
    }
}

impl Clang {
    pub fn kind_name(&self) -> &str {
        match self {
            Clang::FunctionDecl(_) => "FunctionDecl",
            Clang::VarDecl(_) => "VarDecl",
            Clang::ParmVarDecl(_) => "ParmVarDecl",
            Clang::FieldDecl(_) => "FieldDecl",
            Clang::TypedefDecl(_) => "TypedefDecl",
            Clang::RecordDecl(_) => "RecordDecl",
            Clang::CXXRecordDecl(_) => "CXXRecordDecl",
            Clang::EnumDecl(_) => "EnumDecl",
            Clang::EnumConstantDecl(_) => "EnumConstantDecl",
            Clang::CompoundStmt(_) => "CompoundStmt",
            Clang::CXXTryStmt(_) => "CXXTryStmt",
            Clang::Other {
                kind,
                ..
            } => kind.as_deref().unwrap_or("Other"),
        }
    }

    pub fn decl(&self) -> Option<&DeclData> {
        match self {
            Clang::FunctionDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FieldDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::RecordDecl(d)
            | Clang::CXXRecordDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d) => Some(d),
            _ => None,
        }
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Clang::Other {
                loc,
                ..
            } => loc.as_ref(),
            Clang::CompoundStmt(_) | Clang::CXXTryStmt(_) => None,
            _ => self.decl().and_then(|d| d.loc.as_ref()),
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, Clang::CompoundStmt(_) | Clang::CXXTryStmt(_))
    }

    /// Statement nodes of any kind, used to drop skipped function bodies.
    pub fn is_statement(&self) -> bool {
        self.is_body() || self.kind_name().ends_with("Stmt")
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location, where a macro was invoked, over the
/// spelling location inside the macro definition.
pub(crate) fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
