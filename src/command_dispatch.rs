//! Purpose: Hold top-level CLI command dispatch for `plandom`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Each command builds exactly one document and emits one JSON object.
//! Invariants: Extraction goes through `NodeView` accessors so failures keep their kinds.

use super::*;

use plandom::api::{DocumentTree, NodeView};

pub(super) fn dispatch_command(
    command: Command,
    options: &ParseOptions,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Check { input } => {
            let doc = load_document(&input, options)?;
            emit_json(json!({
                "ok": true,
                "empty": doc.is_empty_document(),
                "root": doc.root().tag().as_str(),
            }));
            Ok(RunOutcome::ok())
        }
        Command::Get {
            input,
            pointer,
            extract,
        } => {
            let doc = load_document(&input, options)?;
            let view = doc.root().pointer(&pointer)?;
            let value = extract_value(view, extract)?;
            emit_json(json!({
                "pointer": pointer,
                "as": extract.as_str(),
                "value": value,
            }));
            Ok(RunOutcome::ok())
        }
    }
}

fn load_document(input: &Path, options: &ParseOptions) -> Result<DocumentTree, Error> {
    let bytes = read_input(input)?;
    DocumentTree::from_bytes(&bytes, options)
}

fn extract_value(view: NodeView<'_>, extract: Extract) -> Result<Value, Error> {
    let value = match extract {
        Extract::Tag => json!(view.tag().as_str()),
        Extract::Int32 => json!(view.as_i32()?),
        Extract::Int64 => json!(view.as_i64()?),
        Extract::Double => json!(view.as_f64()?),
        Extract::Bool => json!(view.as_bool()?),
        Extract::String => json!(view.as_str()?),
        Extract::Len => json!(view.array_len()?),
        Extract::Keys => json!(view.keys()?.collect::<Vec<_>>()),
    };
    Ok(value)
}
