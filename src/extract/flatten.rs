//! Flattening of grouped parameter and result lists.

use crate::ast::FieldList;

use super::{classify, Binding};

/// Convert a grouped declaration list into an ordered list of bindings.
///
/// Each group yields one binding per name, all sharing the group's type,
/// or a single unnamed binding when the group has no names. Order follows
/// the source left to right. An absent list yields an empty vector.
pub fn flatten(fields: Option<&FieldList>) -> Vec<Binding> {
    let fields = match fields {
        Some(f) => f,
        None => return Vec::new(),
    };

    let mut bindings = Vec::with_capacity(fields.list.len());

    for field in &fields.list {
        let ty = classify(&field.ty);

        // unnamed entry, e.g. `func f() C.int`
        if field.names.is_empty() {
            bindings.push(Binding::new("", ty));
            continue;
        }

        // `a, b C.int` declares both a and b as C.int
        for name in &field.names {
            bindings.push(Binding::new(name.as_str(), ty));
        }
    }

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, TypeExpr};
    use crate::extract::CanonicalType;

    #[test]
    fn test_flatten_absent_list() {
        assert!(flatten(None).is_empty());
    }

    #[test]
    fn test_flatten_empty_list() {
        assert!(flatten(Some(&FieldList::default())).is_empty());
    }

    #[test]
    fn test_flatten_preserves_order_and_cardinality() {
        let list = FieldList::new(vec![
            Field::named(&["a", "b"], TypeExpr::qualified("C", "int")),
            Field::unnamed(TypeExpr::pointer(TypeExpr::qualified("C", "char"))),
        ]);

        let bindings = flatten(Some(&list));

        assert_eq!(
            bindings,
            vec![
                Binding::new("a", CanonicalType::CInt),
                Binding::new("b", CanonicalType::CInt),
                Binding::new("", CanonicalType::CCharPointer),
            ]
        );
        assert_eq!(list.num_groups(), 2);
    }

    #[test]
    fn test_flatten_mixed_groups() {
        let list = FieldList::new(vec![
            Field::named(&["s"], TypeExpr::pointer(TypeExpr::qualified("C", "char"))),
            Field::named(&["x", "y", "z"], TypeExpr::ident("int")),
            Field::named(&["n"], TypeExpr::qualified("C", "int")),
        ]);

        let bindings = flatten(Some(&list));
        let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["s", "x", "y", "z", "n"]);
        assert_eq!(bindings[0].ty, CanonicalType::CCharPointer);
        assert!(bindings[1..4].iter().all(|b| b.ty == CanonicalType::Unknown));
        assert_eq!(bindings[4].ty, CanonicalType::CInt);
    }
}
