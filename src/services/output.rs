use crate::domain::models::JsonOut;
use serde::Serialize;

/// Print a command result: the `{ok, data}` envelope with `--json`,
/// otherwise the text rendering from `row`.
pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}
