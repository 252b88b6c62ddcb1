use anyhow::{Result, bail};
use serde::Serialize;
use teleprompter_core::PromptInput;
use teleprompter_storage::Storage;

use super::{build_service, drain_propagation};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_list(storage: &Storage) -> Result<()> {
    print_json(&storage.list_prompts()?)
}

pub(crate) fn run_get(storage: &Storage, id: &str) -> Result<()> {
    match storage.get_prompt(id) {
        Ok(prompt) => print_json(&prompt),
        Err(e) if e.is_not_found() => bail!("Prompt not found: {id}"),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn run_versions(storage: &Storage, id: &str) -> Result<()> {
    print_json(&storage.get_prompt_versions(id)?)
}

// Mutations go through the service so they propagate exactly like HTTP writes.

pub(crate) async fn run_put(
    storage: Storage,
    id: String,
    text: String,
    namespace: Option<String>,
) -> Result<()> {
    let service = build_service(storage)?;
    let result = service.write_prompt(PromptInput::new(id, text, namespace)).await;
    drain_propagation(&service).await;
    print_json(&result?)
}

pub(crate) async fn run_rollback(storage: Storage, id: &str, version: i64) -> Result<()> {
    let service = build_service(storage)?;
    let result = service.rollback_prompt(id, version).await;
    drain_propagation(&service).await;
    print_json(&result?)
}

pub(crate) async fn run_delete(storage: Storage, id: &str) -> Result<()> {
    let service = build_service(storage)?;
    service.delete_prompt(id).await?;
    drain_propagation(&service).await;
    println!("Deleted {id}");
    Ok(())
}
