use serde_json::{json, Value};
use swarm_tracker_primitives::peer::fixture::PeerBuilder;
use swarm_tracker_test_helpers::configuration;

use crate::common::fixtures::{sample_info_hash, sample_info_hash_two};
use crate::common::test_env::Started;

#[tokio::test]
async fn the_home_page_should_list_every_swarm_ordered_by_info_hash() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    let (leecher_id, leecher) = PeerBuilder::leecher().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;
    env.add_peer(&sample_info_hash(), &leecher_id, leecher).await;
    env.add_peer(&sample_info_hash_two(), &leecher_id, leecher).await;

    let response = env.get("").await;

    assert_eq!(response.status(), 200);

    let swarms: Value = response.json().await.unwrap();

    assert_eq!(
        swarms,
        json!([
            {
                "info_hash": "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0", // DevSkim: ignore DS173237
                "peer_count": 1,
                "completed": 0
            },
            {
                "info_hash": "9c38422213e30bff212b30c360d26f9a02136422", // DevSkim: ignore DS173237
                "peer_count": 2,
                "completed": 0
            }
        ])
    );
}

#[tokio::test]
async fn the_home_page_should_be_an_empty_list_when_there_are_no_swarms() {
    let env = Started::new(&configuration::ephemeral()).await;

    let swarms: Value = env.get("").await.json().await.unwrap();

    assert_eq!(swarms, json!([]));
}

#[tokio::test]
async fn the_health_check_endpoint_should_report_the_tracker_is_up() {
    let env = Started::new(&configuration::ephemeral()).await;

    let response = env.get("health_check").await;

    assert_eq!(response.status(), 200);

    let report: Value = response.json().await.unwrap();

    assert_eq!(report, json!({ "status": "Ok" }));
}
