use crate::di::UseCases;
use ferrous_hosts_domain::DomainError;

pub async fn show(use_cases: &UseCases, id: i64, json: bool) -> anyhow::Result<()> {
    use_cases
        .get_sources
        .get_by_id(id)
        .await?
        .ok_or(DomainError::HostsSourceNotFound(id))?;

    let items = use_cases.get_items.get_by_source(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        match item.redirection.as_deref() {
            Some(target) => println!("{:<10} {} -> {}", item.list_type.to_str(), item.host, target),
            None => println!("{:<10} {}", item.list_type.to_str(), item.host),
        }
    }
    println!("{} entries", items.len());
    Ok(())
}
