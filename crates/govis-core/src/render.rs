//! Text rendering of type shapes.
//!
//! The [`fmt::Display`] implementation of [`TypeExpr`] produces a single-line
//! Go-like signature. Nested structs and interfaces are collapsed into the
//! `struct {}` and `interface{}` placeholders; their members are only spelled
//! out by [`record_label`] for a top-level declaration.
//!
//! Labels produced here are ready to be embedded in a double-quoted DOT
//! string: every character that is significant in record labels is escaped
//! with a backslash by [`escape`].

use std::fmt::{self, Write as _};

use crate::type_expr::{Field, TypeExpr};

/// Characters escaped in label text.
const ESCAPED: &[char] = &[' ', '\'', '`', '[', ']', '{', '}', '(', ')', '*'];

/// Record-structure characters, escaped only inside a record compartment.
const RECORD_ESCAPED: &[char] = &['|', '<', '>'];

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Qualified { scope, name } => write!(f, "{scope}.{name}"),
            TypeExpr::Pointer(inner) => write!(f, "*{inner}"),
            TypeExpr::Array(element) => write!(f, "[]{element}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Channel(element) => write!(f, "chan {element}"),
            TypeExpr::Variadic(element) => write!(f, "...{element}"),
            TypeExpr::Func { params, results } => {
                f.write_str("func(")?;
                write_groups(f, params)?;
                f.write_char(')')?;
                if !results.is_empty() {
                    f.write_str(" (")?;
                    write_groups(f, results)?;
                    f.write_char(')')?;
                }
                Ok(())
            }
            TypeExpr::Struct(_) => f.write_str("struct {}"),
            TypeExpr::Interface(_) => f.write_str("interface{}"),
            TypeExpr::Opaque(text) => f.write_str(text),
        }
    }
}

/// Writes parameter groups as `a, b T, c U`.
fn write_groups(f: &mut fmt::Formatter<'_>, groups: &[Field]) -> fmt::Result {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if !group.names().is_empty() {
            write!(f, "{} ", group.names().join(", "))?;
        }
        write!(f, "{}", group.ty())?;
    }
    Ok(())
}

/// Renders `shape` as a single-line signature.
pub fn render(shape: &TypeExpr) -> String {
    shape.to_string()
}

/// Escapes every label-significant character with a backslash.
pub fn escape(text: &str) -> String {
    escape_with(text, |ch| ESCAPED.contains(&ch))
}

/// Like [`escape`], but also escapes `|`, `<` and `>` so that text such as a
/// union `~int | ~int64` stays inside its compartment.
fn escape_compartment(text: &str) -> String {
    escape_with(text, |ch| ESCAPED.contains(&ch) || RECORD_ESCAPED.contains(&ch))
}

fn escape_with(text: &str, needs_escape: impl Fn(char) -> bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if needs_escape(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Builds a label from space-separated parts, escaped and wrapped in braces.
///
/// Used for subgraph labels and for declarations drawn as plain shapes.
pub fn label<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|part| part.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{{{}}}", escape(&joined))
}

/// Builds the two-part label `{name signature}` of a non-record declaration.
pub fn simple_label(name: &str, shape: &TypeExpr) -> String {
    label([name.to_owned(), render(shape)])
}

/// Builds the multi-compartment record label of a struct or interface.
///
/// The first compartment holds the declaration name, followed by
/// ` interface` for interfaces. Each member gets a compartment with its port
/// marker `<fN>`, its comma-joined names and its signature. Other shapes get
/// the name compartment only.
pub fn record_label(name: &str, shape: &TypeExpr) -> String {
    let header = match shape {
        TypeExpr::Interface(_) => format!("{name} interface"),
        _ => name.to_owned(),
    };

    let mut compartments = vec![escape_compartment(&header)];
    for (port, member) in shape.members().iter().enumerate() {
        let mut text = String::new();
        if !member.names().is_empty() {
            text.push_str(&member.names().join(","));
            text.push(' ');
        }
        text.push_str(&render(member.ty()));
        compartments.push(format!("<f{port}>{}", escape_compartment(&text)));
    }

    format!("{{{}}}", compartments.join("|"))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_render_leaf_and_containers() {
        assert_eq!(render(&TypeExpr::named("int")), "int");
        assert_eq!(render(&TypeExpr::qualified("pkg", "B")), "pkg.B");
        assert_eq!(render(&TypeExpr::pointer(TypeExpr::named("T"))), "*T");
        assert_eq!(render(&TypeExpr::array(TypeExpr::named("T"))), "[]T");
        assert_eq!(
            render(&TypeExpr::map(
                TypeExpr::named("string"),
                TypeExpr::array(TypeExpr::named("int"))
            )),
            "map[string][]int"
        );
        assert_eq!(render(&TypeExpr::channel(TypeExpr::named("T"))), "chan T");
        assert_eq!(render(&TypeExpr::variadic(TypeExpr::named("T"))), "...T");
    }

    #[test]
    fn test_render_func() {
        let shape = TypeExpr::func(
            vec![
                Field::new(["a", "b"], TypeExpr::named("int")),
                Field::new(["opts"], TypeExpr::variadic(TypeExpr::named("Option"))),
            ],
            vec![
                Field::unnamed(TypeExpr::named("int")),
                Field::unnamed(TypeExpr::named("error")),
            ],
        );
        assert_eq!(
            render(&shape),
            "func(a, b int, opts ...Option) (int, error)"
        );

        assert_eq!(render(&TypeExpr::func(vec![], vec![])), "func()");
        assert_eq!(
            render(&TypeExpr::func(
                vec![Field::unnamed(TypeExpr::named("int"))],
                vec![Field::unnamed(TypeExpr::named("error"))]
            )),
            "func(int) (error)"
        );
    }

    #[test]
    fn test_render_nested_struct_and_interface_are_placeholders() {
        let shape = TypeExpr::map(
            TypeExpr::named("string"),
            TypeExpr::Struct(vec![Field::new(["x"], TypeExpr::named("int"))]),
        );
        assert_eq!(render(&shape), "map[string]struct {}");

        let shape = TypeExpr::array(TypeExpr::Interface(vec![]));
        assert_eq!(render(&shape), "[]interface{}");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("map[string]int"), "map\\[string\\]int");
        assert_eq!(escape("a b"), "a\\ b");
        assert_eq!(escape("*T"), "\\*T");
        assert_eq!(escape("func() ('`')"), "func\\(\\)\\ \\(\\'\\`\\'\\)");
        assert_eq!(escape("<f0>x|y,z.w"), "<f0>x|y,z.w");
    }

    #[test]
    fn test_simple_label() {
        assert_eq!(
            simple_label("ID", &TypeExpr::named("string")),
            "{ID\\ string}"
        );
        assert_eq!(
            simple_label("Queue", &TypeExpr::channel(TypeExpr::pointer(TypeExpr::named("Job")))),
            "{Queue\\ chan\\ \\*Job}"
        );
    }

    #[test]
    fn test_label_for_scope() {
        assert_eq!(label(["main"]), "{main}");
    }

    #[test]
    fn test_struct_record_label() {
        let shape = TypeExpr::Struct(vec![
            Field::new(["m"], TypeExpr::map(TypeExpr::named("string"), TypeExpr::named("int"))),
            Field::new(["x", "y"], TypeExpr::named("float64")),
            Field::unnamed(TypeExpr::pointer(TypeExpr::named("Base"))),
        ]);
        assert_eq!(
            record_label("A", &shape),
            "{A|<f0>m\\ map\\[string\\]int|<f1>x,y\\ float64|<f2>\\*Base}"
        );
    }

    #[test]
    fn test_interface_record_label() {
        let shape = TypeExpr::Interface(vec![Field::new(
            ["Do"],
            TypeExpr::func(
                vec![Field::new(["x"], TypeExpr::named("int"))],
                vec![Field::unnamed(TypeExpr::named("error"))],
            ),
        )]);
        assert_eq!(
            record_label("Iface", &shape),
            "{Iface\\ interface|<f0>Do\\ func\\(x\\ int\\)\\ \\(error\\)}"
        );
    }

    #[test]
    fn test_union_stays_in_one_compartment() {
        let shape = TypeExpr::Interface(vec![
            Field::unnamed(TypeExpr::Opaque("~int | ~int64".to_string())),
            Field::new(["Recv"], TypeExpr::Opaque("Box[<-chan T]".to_string())),
        ]);
        assert_eq!(
            record_label("Number", &shape),
            "{Number\\ interface|<f0>~int\\ \\|\\ ~int64|<f1>Recv\\ Box\\[\\<-chan\\ T\\]}"
        );
    }

    #[test]
    fn test_empty_struct_record_label() {
        assert_eq!(record_label("Empty", &TypeExpr::Struct(vec![])), "{Empty}");
    }

    proptest! {
        #[test]
        fn prop_escape_only_adds_backslashes(text in ".{0,32}") {
            let escaped = escape(&text);
            let unescaped: String = {
                let mut out = String::new();
                let mut chars = escaped.chars().peekable();
                while let Some(ch) = chars.next() {
                    if ch == '\\' && chars.peek().is_some_and(|c| ESCAPED.contains(c)) {
                        continue;
                    }
                    out.push(ch);
                }
                out
            };
            prop_assert_eq!(unescaped, text);
        }
    }
}
