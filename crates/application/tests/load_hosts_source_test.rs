use ferrous_hosts_application::ports::HostsSourceRepository;
use ferrous_hosts_application::use_cases::{GetHostListItemsUseCase, LoadHostsSourceUseCase};
use ferrous_hosts_domain::{DomainError, IngestionConfig, ListType};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{blocked_lines, reader, MockHostListItemRepository, MockHostsSourceRepository};

const HOSTS: &str = "# Sample hosts file\n\
                     127.0.0.1 localhost\n\
                     ::1 localhost\n\
                     0.0.0.0 ads.example.com\n\
                     0.0.0.0 tracker.example.net # analytics\n\
                     192.168.1.10 nas.example.lan\n";

// ============================================================================
// LoadHostsSourceUseCase
// ============================================================================

#[tokio::test]
async fn test_load_existing_source() {
    // Arrange
    let (sources, source) = MockHostsSourceRepository::with_source(false).await;
    let hosts = Arc::new(MockHostListItemRepository::new());
    let use_case = LoadHostsSourceUseCase::new(
        Arc::new(sources),
        hosts.clone(),
        IngestionConfig::default(),
    );

    // Act
    let report = use_case
        .execute(source.id.unwrap(), reader(HOSTS), CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert!(report.is_complete());
    assert_eq!(report.lines_read, 6);
    assert_eq!(report.items_inserted, 2);
    let items = hosts.items();
    assert!(items.iter().all(|i| i.list_type == ListType::Blocked));
    assert!(items.iter().all(|i| i.source_id == source.id.unwrap()));
}

#[tokio::test]
async fn test_load_uses_source_redirect_flag() {
    let (sources, source) = MockHostsSourceRepository::with_source(true).await;
    let hosts = Arc::new(MockHostListItemRepository::new());
    let use_case = LoadHostsSourceUseCase::new(
        Arc::new(sources),
        hosts.clone(),
        IngestionConfig::default(),
    );

    let report = use_case
        .execute(source.id.unwrap(), reader(HOSTS), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.items_inserted, 3);
    let redirected: Vec<_> = hosts
        .items()
        .into_iter()
        .filter(|i| i.list_type == ListType::Redirected)
        .collect();
    // `nas.example.lan` has a plausible TLD, so it is kept as a redirect.
    assert_eq!(redirected.len(), 1);
    assert_eq!(redirected[0].redirection.as_deref(), Some("192.168.1.10"));
}

#[tokio::test]
async fn test_load_unknown_source() {
    let sources = Arc::new(MockHostsSourceRepository::new());
    let hosts = Arc::new(MockHostListItemRepository::new());
    let use_case = LoadHostsSourceUseCase::new(sources, hosts.clone(), IngestionConfig::default());

    let result = use_case
        .execute(99, reader(HOSTS), CancellationToken::new())
        .await;

    assert!(matches!(result, Err(DomainError::HostsSourceNotFound(99))));
    assert_eq!(hosts.clear_count(), 0);
}

#[tokio::test]
async fn test_interrupted_load_is_incomplete() {
    // Arrange
    let (sources, source) = MockHostsSourceRepository::with_source(false).await;
    let hosts = Arc::new(MockHostListItemRepository::new());
    let use_case = LoadHostsSourceUseCase::new(
        Arc::new(sources),
        hosts.clone(),
        IngestionConfig::default(),
    );
    let token = CancellationToken::new();
    token.cancel();

    // Act
    let result = use_case
        .execute(source.id.unwrap(), reader(&blocked_lines(50)), token)
        .await;

    // Assert
    match result {
        Err(DomainError::IncompleteLoad { source_id, failures, .. }) => {
            assert_eq!(Some(source_id), source.id);
            assert!(failures.contains("interrupted"));
        }
        other => panic!("expected IncompleteLoad, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_persistence_is_incomplete() {
    let (sources, source) = MockHostsSourceRepository::with_source(false).await;
    let hosts = Arc::new(MockHostListItemRepository::new());
    hosts.poison_host("host-3.example.com");
    let use_case = LoadHostsSourceUseCase::new(
        Arc::new(sources),
        hosts.clone(),
        IngestionConfig::default(),
    );

    let result = use_case
        .execute(source.id.unwrap(), reader(&blocked_lines(10)), CancellationToken::new())
        .await;

    assert!(matches!(result, Err(DomainError::IncompleteLoad { .. })));
}

// ============================================================================
// GetHostListItemsUseCase
// ============================================================================

#[tokio::test]
async fn test_get_items_after_load() {
    // Arrange
    let sources = Arc::new(MockHostsSourceRepository::new());
    let first = sources
        .create("First".to_string(), None, false, true)
        .await
        .unwrap();
    let second = sources
        .create("Second".to_string(), None, false, true)
        .await
        .unwrap();
    let hosts = Arc::new(MockHostListItemRepository::new());
    let load = LoadHostsSourceUseCase::new(
        sources.clone(),
        hosts.clone(),
        IngestionConfig::default(),
    );
    load.execute(first.id.unwrap(), reader(&blocked_lines(12)), CancellationToken::new())
        .await
        .unwrap();
    load.execute(second.id.unwrap(), reader(&blocked_lines(5)), CancellationToken::new())
        .await
        .unwrap();

    let use_case = GetHostListItemsUseCase::new(hosts);

    // Act
    let items = use_case.get_by_source(first.id.unwrap()).await.unwrap();
    let count = use_case.count_by_source(second.id.unwrap()).await.unwrap();

    // Assert
    assert_eq!(items.len(), 12);
    assert_eq!(count, 5);
}
