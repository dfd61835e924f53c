mod load;
mod show;
mod sources;

pub use load::load;
pub use show::show;
pub use sources::{add_source, list_sources, remove_source};

use ferrous_hosts_domain::HostsSource;

fn print_source(source: &HostsSource) {
    println!(
        "{:>4}  {:<24} redirect={:<5} enabled={:<5} {}",
        source.id.unwrap_or_default(),
        source.name,
        source.redirect_enabled,
        source.enabled,
        source.url.as_deref().unwrap_or("-"),
    );
}
