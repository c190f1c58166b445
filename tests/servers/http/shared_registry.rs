use swarm_tracker_test_helpers::configuration;

use crate::common::fixtures::{sample_info_hash, url_encoded, AnnounceQueryBuilder};
use crate::common::test_env::{Environment, Started};

#[tokio::test]
async fn a_peer_announced_on_one_http_tracker_should_be_visible_on_every_other() {
    let config = configuration::ephemeral();

    let first = Started::new(&config).await;
    let second = Environment::with_container(&config, first.container.clone()).start().await;

    assert_ne!(first.bind_address(), second.bind_address());

    first
        .get(&format!("announce?{}", AnnounceQueryBuilder::new(&sample_info_hash()).query()))
        .await;

    let body = second
        .get(&format!("scrape?info_hash={}", url_encoded(&sample_info_hash())))
        .await
        .bytes()
        .await
        .unwrap();

    let mut expected = b"d5:filesd20:".to_vec();
    expected.extend_from_slice(&sample_info_hash().bytes());
    expected.extend_from_slice(b"d8:completei0e10:downloadedi0e10:incompletei1eeee");

    assert_eq!(body.to_vec(), expected);

    second.stop().await;
    first.stop().await;
}

#[tokio::test]
async fn the_swarms_should_survive_a_restart_with_the_sqlite_backend() {
    let config = configuration::ephemeral_with_sqlite();

    let env = Started::new(&config).await;

    env.get(&format!("announce?{}", AnnounceQueryBuilder::new(&sample_info_hash()).query()))
        .await;

    env.stop().await;

    let restarted = Started::new(&config).await;

    let peers = restarted
        .container
        .swarm_registry_container
        .registry
        .list_peers(&sample_info_hash())
        .await
        .unwrap();

    assert_eq!(peers.len(), 1);
}
