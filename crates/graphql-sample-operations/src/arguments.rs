//! Argument expansion
//!
//! Every field argument becomes one or more operation variables. Input-object
//! arguments are flattened one level: each input field is declared as its
//! own variable and the argument is bound to an object literal.

use apollo_compiler::ast::{InputValueDefinition, NamedType, Type};
use apollo_compiler::{Node, Schema};

use crate::mock::MockValues;

/// Variable declarations and call-site bindings for a field's arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ExpandedArguments {
    /// `$name: Type`
    pub(crate) signatures: Vec<String>,

    /// `name: $name`
    pub(crate) bindings: Vec<String>,

    /// `name: <literal>`
    pub(crate) mock_bindings: Vec<String>,
}

pub(crate) fn expand_arguments<M: MockValues + ?Sized>(
    schema: &Schema,
    arguments: &[Node<InputValueDefinition>],
    mocks: &mut M,
) -> ExpandedArguments {
    let mut expanded = ExpandedArguments::default();

    for argument in arguments {
        let name = &argument.name;
        let unwrapped = unwrap_once(&argument.ty);

        match unwrapped.and_then(|named| schema.get_input_object(named)) {
            Some(input_object) => {
                let mut bindings = Vec::with_capacity(input_object.fields.len());
                let mut mock_bindings = Vec::with_capacity(input_object.fields.len());

                for field in input_object.fields.values() {
                    expanded
                        .signatures
                        .push(format!("${}: {}", field.name, &*field.ty));
                    bindings.push(format!("{0}: ${0}", field.name));
                    mock_bindings.push(format!(
                        "{}: {}",
                        field.name,
                        mocks.literal_for(unwrap_once(&field.ty).map(NamedType::as_str))
                    ));
                }

                expanded
                    .bindings
                    .push(format!("{name}: {}", object_literal(&bindings)));
                expanded
                    .mock_bindings
                    .push(format!("{name}: {}", object_literal(&mock_bindings)));
            }
            None => {
                expanded
                    .signatures
                    .push(format!("${name}: {}", &*argument.ty));
                expanded.bindings.push(format!("{name}: ${name}"));
                expanded.mock_bindings.push(format!(
                    "{name}: {}",
                    mocks.literal_for(unwrapped.map(NamedType::as_str))
                ));
            }
        }
    }

    expanded
}

/// Strip a single non-null or list modifier.
///
/// `None` when the type is still wrapped afterwards, as with `[T]!` or `[T!]`.
fn unwrap_once(ty: &Type) -> Option<&NamedType> {
    match ty {
        Type::Named(name) | Type::NonNullNamed(name) => Some(name),
        Type::List(inner) => match inner.as_ref() {
            Type::Named(name) => Some(name),
            _ => None,
        },
        Type::NonNullList(_) => None,
    }
}

fn object_literal(entries: &[String]) -> String {
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}
