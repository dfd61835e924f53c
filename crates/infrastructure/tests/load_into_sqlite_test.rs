use ferrous_hosts_application::ports::HostsSourceRepository;
use ferrous_hosts_application::use_cases::{
    DeleteHostsSourceUseCase, GetHostListItemsUseCase, LoadHostsSourceUseCase,
};
use ferrous_hosts_domain::config::DatabaseConfig;
use ferrous_hosts_domain::{IngestionConfig, ListType, LoadStrategy};
use ferrous_hosts_infrastructure::database::{create_pool, database_url};
use ferrous_hosts_infrastructure::repositories::{
    SqliteHostListItemRepository, SqliteHostsSourceRepository,
};
use ferrous_hosts_infrastructure::sources::{self, SourceLocation};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn write_hosts_file(dir: &tempfile::TempDir, lines: usize) -> std::path::PathBuf {
    let path = dir.path().join("hosts.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# generated").unwrap();
    writeln!(file, "127.0.0.1 localhost").unwrap();
    writeln!(file, "10.0.0.5 mirror.example.com").unwrap();
    for n in 0..lines {
        writeln!(file, "0.0.0.0 host-{}.example.com", n).unwrap();
    }
    path
}

async fn load_with(strategy: LoadStrategy) {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hosts.db");
    let pool = create_pool(
        &database_url(&db_path.to_string_lossy()),
        &DatabaseConfig::default(),
    )
    .await
    .unwrap();

    let source_repo = Arc::new(SqliteHostsSourceRepository::new(pool.clone()));
    let host_repo = Arc::new(SqliteHostListItemRepository::new(pool));
    let source = source_repo
        .create("Generated".to_string(), None, true, true)
        .await
        .unwrap();
    let source_id = source.id.unwrap();

    let config = IngestionConfig {
        strategy,
        ..Default::default()
    };
    let load = LoadHostsSourceUseCase::new(source_repo.clone(), host_repo.clone(), config);
    let path = write_hosts_file(&dir, 1_234);

    // Act
    for _ in 0..2 {
        let reader = sources::open(&SourceLocation::File(path.clone()), Duration::from_secs(1))
            .await
            .unwrap();
        let report = load
            .execute(source_id, reader, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.items_inserted, 1_235);
    }

    // Assert
    let items = GetHostListItemsUseCase::new(host_repo.clone());
    assert_eq!(items.count_by_source(source_id).await.unwrap(), 1_235);
    let stored = items.get_by_source(source_id).await.unwrap();
    assert_eq!(
        stored
            .iter()
            .filter(|i| i.list_type == ListType::Redirected)
            .count(),
        1
    );

    DeleteHostsSourceUseCase::new(source_repo, host_repo.clone())
        .execute(source_id)
        .await
        .unwrap();
    assert_eq!(items.count_by_source(source_id).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_worker_queue_load_into_sqlite() {
    load_with(LoadStrategy::WorkerQueue).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_stream_load_into_sqlite() {
    load_with(LoadStrategy::ParallelStream).await;
}
