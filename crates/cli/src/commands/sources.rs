use super::print_source;
use crate::di::UseCases;

pub async fn add_source(
    use_cases: &UseCases,
    name: String,
    url: Option<String>,
    redirect: bool,
    disabled: bool,
) -> anyhow::Result<()> {
    let source = use_cases
        .create_source
        .execute(name, url, redirect, !disabled)
        .await?;
    print_source(&source);
    Ok(())
}

pub async fn list_sources(use_cases: &UseCases, json: bool) -> anyhow::Result<()> {
    let sources = use_cases.get_sources.get_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No hosts sources registered");
    }
    for source in &sources {
        print_source(source);
    }
    Ok(())
}

pub async fn remove_source(use_cases: &UseCases, id: i64) -> anyhow::Result<()> {
    use_cases.delete_source.execute(id).await?;
    println!("Removed hosts source {}", id);
    Ok(())
}
