//! Plain-text listings of operations

use graphql_sample_operations::{GeneratedOperationSet, OperationEntry};

use crate::samples::SampleQuery;

/// Render generated operations, queries first
pub fn render_generated(operations: &GeneratedOperationSet) -> String {
    let mut out = String::new();
    render_section(&mut out, "Queries", &operations.queries);
    out.push('\n');
    render_section(&mut out, "Mutations", &operations.mutations);
    out
}

fn render_section(out: &mut String, title: &str, entries: &[OperationEntry]) {
    out.push_str(&format!("# {title}\n"));
    if entries.is_empty() {
        out.push_str("\n(none)\n");
    }

    for entry in entries {
        out.push_str(&format!(
            "\n## {}\n\nRequest:\n{}\n\nExample:\n{}\n",
            entry.name, entry.request, entry.example
        ));
    }
}

/// Render sample queries under their names
pub fn render_samples<'a>(samples: impl IntoIterator<Item = &'a SampleQuery>) -> String {
    samples
        .into_iter()
        .map(|sample| format!("## {}\n\n{}\n", sample.name, sample.query))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SAMPLE_QUERIES;

    #[test]
    fn renders_empty_sections() {
        insta::assert_snapshot!(render_generated(&GeneratedOperationSet::default()), @r"
        # Queries

        (none)

        # Mutations

        (none)
        ");
    }

    #[test]
    fn renders_entries() {
        let operations = GeneratedOperationSet {
            queries: vec![OperationEntry {
                name: "user".to_string(),
                request: "query($id: ID!) {\n  user(id: $id) {\n    id\n  }\n}".to_string(),
                example: "query {\n  user(id: \"1\") {\n    id\n  }\n}".to_string(),
            }],
            mutations: Vec::new(),
        };

        insta::assert_snapshot!(render_generated(&operations), @r#"
        # Queries

        ## user

        Request:
        query($id: ID!) {
          user(id: $id) {
            id
          }
        }

        Example:
        query {
          user(id: "1") {
            id
          }
        }

        # Mutations

        (none)
        "#);
    }

    #[test]
    fn renders_samples() {
        let last = SAMPLE_QUERIES.iter().last();

        insta::assert_snapshot!(render_samples(last), @r"
        ## Cancel booking (mutation)

        mutation CancelBooking($id: ID!) {
          cancelBooking(id: $id)
        }
        ");
    }
}
