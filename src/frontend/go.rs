//! Go frontend using tree-sitter.
//!
//! Lowers:
//! - Function and method declarations, in source order
//! - Doc comment blocks (Go lead-comment rules)
//! - Parameter and result groups
//! - Type expressions, down to the shapes the classifier inspects

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::ast::{Comment, CommentGroup, Field, FieldList, FuncDecl, SourceFile, TypeExpr};

use super::{Frontend, ParsedFile};

/// Tree-sitter query for function-like declarations.
const DECLARATION_QUERY: &str = r#"
; Function declarations
(function_declaration
  name: (identifier) @func_name
) @func

; Method declarations (with receiver)
(method_declaration
  name: (field_identifier) @func_name
) @func
"#;

/// Tree-sitter query for package declaration.
const PACKAGE_QUERY: &str = r#"
(package_clause
  (package_identifier) @package_name
)
"#;

/// Go language frontend.
pub struct GoFrontend {
    language: Language,
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl GoFrontend {
    /// Create a new Go frontend.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new parser for this thread.
    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Extract the package name from a parsed file.
    fn extract_package(&self, parsed: &ParsedFile) -> Option<String> {
        let query = Query::new(&self.language, PACKAGE_QUERY).ok()?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        if let Some(m) = matches.next() {
            for capture in m.captures {
                let name = query.capture_names()[capture.index as usize];
                if name == "package_name" {
                    return Some(parsed.node_text(capture.node).to_string());
                }
            }
        }
        None
    }

    /// Lower every function and method declaration, in source order.
    fn lower_declarations(&self, parsed: &ParsedFile) -> anyhow::Result<Vec<FuncDecl>> {
        let query = Query::new(&self.language, DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        let mut nodes = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if query.capture_names()[capture.index as usize] == "func" {
                    nodes.push(capture.node);
                }
            }
        }

        // Sort by position for deterministic output
        nodes.sort_by_key(|n| n.start_byte());
        nodes.dedup_by_key(|n| n.start_byte());

        Ok(nodes
            .into_iter()
            .map(|node| self.lower_function(parsed, node))
            .collect())
    }

    fn lower_function(&self, parsed: &ParsedFile, node: Node) -> FuncDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();

        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|r| self.receiver_type(parsed, r));

        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.lower_field_list(parsed, p));

        // `func f() C.int` has a bare type as result, `func f() (n C.int)` a list
        let results = node.child_by_field_name("result").map(|r| {
            if r.kind() == "parameter_list" {
                self.lower_field_list(parsed, r)
            } else {
                FieldList::new(vec![Field::unnamed(self.lower_type(parsed, r))])
            }
        });

        FuncDecl {
            name,
            receiver,
            doc: self.doc_comments(parsed, node),
            params,
            results,
            line: node.start_position().row + 1,
        }
    }

    /// Receiver type text for methods, e.g. `*Config`.
    fn receiver_type(&self, parsed: &ParsedFile, list: Node) -> Option<String> {
        let mut cursor = list.walk();
        let decl = list
            .named_children(&mut cursor)
            .find(|n| n.kind() == "parameter_declaration")?;
        decl.child_by_field_name("type")
            .map(|t| parsed.node_text(t).to_string())
    }

    /// Collect the lead comment block attached to a declaration.
    ///
    /// The block is the run of comments ending on the line right above the
    /// declaration, with no blank line inside it. Comments that start on the
    /// same line as the preceding code belong to that code, not the block.
    fn doc_comments(&self, parsed: &ParsedFile, decl: Node) -> Option<CommentGroup> {
        let mut comments = Vec::new();
        let mut next_row = decl.start_position().row;
        let mut prev = decl.prev_named_sibling();

        while let Some(node) = prev {
            if node.kind() != "comment" {
                break;
            }
            let end_row = node.end_position().row;
            let adjacent = if comments.is_empty() {
                end_row + 1 == next_row
            } else {
                end_row + 1 >= next_row
            };
            if !adjacent {
                break;
            }
            comments.push(node);
            next_row = node.start_position().row;
            prev = node.prev_named_sibling();
        }

        if let Some(token) = prev {
            if token.kind() != "comment" {
                let token_row = token.end_position().row;
                comments.retain(|c| c.start_position().row != token_row);
            }
        }

        if comments.is_empty() {
            return None;
        }

        comments.reverse();
        Some(CommentGroup {
            list: comments
                .into_iter()
                .map(|c| Comment {
                    text: parsed.node_text(c).to_string(),
                })
                .collect(),
        })
    }

    fn lower_field_list(&self, parsed: &ParsedFile, list: Node) -> FieldList {
        let mut cursor = list.walk();
        let fields = list
            .named_children(&mut cursor)
            .filter_map(|child| match child.kind() {
                "parameter_declaration" => Some(self.lower_parameter(parsed, child, false)),
                "variadic_parameter_declaration" => Some(self.lower_parameter(parsed, child, true)),
                _ => None,
            })
            .collect();
        FieldList::new(fields)
    }

    fn lower_parameter(&self, parsed: &ParsedFile, node: Node, variadic: bool) -> Field {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| parsed.node_text(n).to_string())
            .collect();

        let ty = match node.child_by_field_name("type") {
            Some(t) => self.lower_type(parsed, t),
            None => TypeExpr::Other {
                kind: "missing".to_string(),
                text: String::new(),
            },
        };

        let ty = if variadic {
            TypeExpr::Variadic(Box::new(ty))
        } else {
            ty
        };

        Field { names, ty }
    }

    fn lower_type(&self, parsed: &ParsedFile, node: Node) -> TypeExpr {
        let other = || TypeExpr::Other {
            kind: node.kind().to_string(),
            text: parsed.node_text(node).to_string(),
        };
        let lower_child = |child: Option<Node>| child.map(|c| Box::new(self.lower_type(parsed, c)));

        match node.kind() {
            "type_identifier" => TypeExpr::Ident(parsed.node_text(node).to_string()),
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => TypeExpr::Qualified {
                        package: parsed.node_text(package).to_string(),
                        name: parsed.node_text(name).to_string(),
                    },
                    _ => other(),
                }
            }
            "pointer_type" => match lower_child(node.named_child(0)) {
                Some(inner) => TypeExpr::Pointer(inner),
                None => other(),
            },
            "parenthesized_type" => match lower_child(node.named_child(0)) {
                Some(inner) => TypeExpr::Paren(inner),
                None => other(),
            },
            "slice_type" => match lower_child(node.child_by_field_name("element")) {
                Some(elem) => TypeExpr::Slice(elem),
                None => other(),
            },
            "array_type" => {
                let len = node
                    .child_by_field_name("length")
                    .map(|l| parsed.node_text(l).to_string())
                    .unwrap_or_default();
                match lower_child(node.child_by_field_name("element")) {
                    Some(elem) => TypeExpr::Array { len, elem },
                    None => other(),
                }
            }
            "map_type" => match (
                lower_child(node.child_by_field_name("key")),
                lower_child(node.child_by_field_name("value")),
            ) {
                (Some(key), Some(value)) => TypeExpr::Map { key, value },
                _ => other(),
            },
            "function_type" => TypeExpr::Func(parsed.node_text(node).to_string()),
            _ => other(),
        }
    }
}

impl Frontend for GoFrontend {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    fn lower(&self, parsed: &ParsedFile) -> anyhow::Result<SourceFile> {
        Ok(SourceFile {
            package: self.extract_package(parsed),
            decls: self.lower_declarations(parsed)?,
            has_parse_errors: parsed.has_errors(),
        })
    }
}
