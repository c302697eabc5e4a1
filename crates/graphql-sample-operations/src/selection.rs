//! Selection sets for generated operations
//!
//! Only the first few declared fields of a type are selected, and object
//! fields are expanded at most one level deep. Example operations use a flat
//! variant that never nests.

use apollo_compiler::Schema;
use apollo_compiler::ast::{FieldDefinition, Type};
use apollo_compiler::schema::{Component, ExtendedType};

/// Fields selected per level
const MAX_SELECTED_FIELDS: usize = 3;

/// Levels of object fields that are expanded below the root field
const MAX_NESTING: usize = 1;

/// Selected when a composite type exposes no fields of its own
const FALLBACK_FIELD: &str = "id";

/// Unit of indentation in rendered operations
pub(crate) const INDENT: &str = "  ";

/// A selected field with its (possibly empty) sub-selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) name: String,
    pub(crate) children: Vec<Selection>,
}

impl Selection {
    fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

/// The selection set for a field returning `ty`, or `None` for leaf types.
pub(crate) fn selection_set(schema: &Schema, ty: &Type, depth: usize) -> Option<Vec<Selection>> {
    let fields = composite_fields(schema, ty)?;
    if fields.is_empty() {
        return Some(vec![Selection::leaf(FALLBACK_FIELD)]);
    }

    Some(
        fields
            .into_iter()
            .map(|field| {
                let children = if depth < MAX_NESTING {
                    selection_set(schema, &field.ty, depth + 1).unwrap_or_default()
                } else {
                    Vec::new()
                };
                Selection {
                    name: field.name.to_string(),
                    children,
                }
            })
            .collect(),
    )
}

/// Like [`selection_set`], but every selected field is a bare name.
pub(crate) fn example_selection_set(schema: &Schema, ty: &Type) -> Option<Vec<Selection>> {
    let fields = composite_fields(schema, ty)?;
    if fields.is_empty() {
        return Some(vec![Selection::leaf(FALLBACK_FIELD)]);
    }

    Some(
        fields
            .into_iter()
            .map(|field| Selection::leaf(field.name.as_str()))
            .collect(),
    )
}

/// The first selectable fields of the named type under any list/non-null
/// wrappers, or `None` when that type is not composite.
fn composite_fields<'a>(
    schema: &'a Schema,
    ty: &Type,
) -> Option<Vec<&'a Component<FieldDefinition>>> {
    let fields = match schema.types.get(ty.inner_named_type())? {
        ExtendedType::Object(object) => object.fields.values(),
        ExtendedType::Interface(interface) => interface.fields.values(),
        ExtendedType::Union(_) => return Some(Vec::new()),
        ExtendedType::Scalar(_) | ExtendedType::Enum(_) | ExtendedType::InputObject(_) => {
            return None;
        }
    };

    Some(
        fields
            .filter(|field| !field.name.starts_with("__"))
            .take(MAX_SELECTED_FIELDS)
            .collect(),
    )
}

/// Append `head` at the given indentation level followed by its selection
/// block, if any.
pub(crate) fn render_field(
    out: &mut String,
    level: usize,
    head: &str,
    selections: Option<&[Selection]>,
) {
    let indent = INDENT.repeat(level);
    out.push_str(&indent);
    out.push_str(head);

    match selections {
        Some(selections) => {
            out.push_str(" {\n");
            for selection in selections {
                let children = (!selection.children.is_empty()).then_some(&*selection.children);
                render_field(out, level + 1, &selection.name, children);
            }
            out.push_str(&indent);
            out.push_str("}\n");
        }
        None => out.push('\n'),
    }
}
