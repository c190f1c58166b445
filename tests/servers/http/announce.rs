use std::net::{IpAddr, Ipv4Addr};

use swarm_tracker_primitives::peer::fixture::PeerBuilder;
use swarm_tracker_primitives::peer::PeerId;
use swarm_tracker_test_helpers::configuration;

use crate::common::fixtures::{sample_info_hash, AnnounceQueryBuilder};
use crate::common::test_env::Started;

const ANNOUNCING_PEER_ID: &[u8; 20] = b"-qB00000000000000009";

async fn announce(env: &Started, query: &AnnounceQueryBuilder) -> Vec<u8> {
    let response = env.get(&format!("announce?{}", query.query())).await;

    assert_eq!(response.status(), 200);

    response.bytes().await.unwrap().to_vec()
}

#[tokio::test]
async fn it_should_answer_the_first_announce_of_a_swarm_with_an_empty_peer_list() {
    let env = Started::new(&configuration::ephemeral()).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash())).await;

    assert_eq!(
        body,
        b"d8:completei0e10:incompletei1e8:intervali1800e12:min intervali900e5:peerslee".to_vec()
    );

    env.stop().await;
}

#[tokio::test]
async fn it_should_list_the_other_peers_of_the_swarm() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash())).await;

    assert_eq!(
        body,
        b"d8:completei1e10:incompletei1e8:intervali1800e12:min intervali900e5:peersld2:ip9:126.0.0.17:peer_id20:-qB000000000000000014:porti8080eeee"
            .to_vec()
    );
}

#[tokio::test]
async fn it_should_leave_the_peer_ids_out_when_the_client_asks_for_it() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).with("no_peer_id", "1")).await;

    assert_eq!(
        body,
        b"d8:completei1e10:incompletei1e8:intervali1800e12:min intervali900e5:peersld2:ip9:126.0.0.14:porti8080eeee".to_vec()
    );
}

#[tokio::test]
async fn it_should_use_the_compact_peer_list_when_the_client_accepts_it() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).with("compact", "1")).await;

    let mut expected = b"d8:completei1e10:incompletei1e8:intervali1800e12:min intervali900e5:peers6:".to_vec();
    expected.extend_from_slice(&[126, 0, 0, 1, 0x1f, 0x90]);
    expected.push(b'e');

    assert_eq!(body, expected);
}

#[tokio::test]
async fn it_should_not_return_more_peers_than_the_client_wants() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;
    let (leecher_id, leecher) = PeerBuilder::leecher().build();
    env.add_peer(&sample_info_hash(), &leecher_id, leecher).await;

    let body = announce(
        &env,
        &AnnounceQueryBuilder::new(&sample_info_hash())
            .with("compact", "1")
            .with("numwant", "1"),
    )
    .await;

    let response = swarm_tracker_contrib_bencode::Value::decode(&body).unwrap();

    assert_eq!(response.lookup(b"peers").and_then(|peers| peers.bytes()).map(<[u8]>::len), Some(6));
}

#[tokio::test]
async fn it_should_store_the_peer_with_the_ip_of_the_connection() {
    let env = Started::new(&configuration::ephemeral_without_reverse_proxy()).await;

    announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash())).await;

    let peers = env
        .container
        .swarm_registry_container
        .registry
        .list_peers(&sample_info_hash())
        .await
        .unwrap();

    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].0, PeerId::from(*ANNOUNCING_PEER_ID));
    assert_eq!(peers[0].1.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(peers[0].1.port, 17548);
}

#[tokio::test]
async fn it_should_fall_back_to_the_connection_ip_when_the_ip_param_is_a_dns_name() {
    let env = Started::new(&configuration::ephemeral_without_reverse_proxy()).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).with("ip", "peer.example.org")).await;

    let response = swarm_tracker_contrib_bencode::Value::decode(&body).unwrap();

    assert!(response.lookup(b"failure reason").is_none());
    assert!(response.lookup(b"peers").is_some());

    let peers = env
        .container
        .swarm_registry_container
        .registry
        .list_peers(&sample_info_hash())
        .await
        .unwrap();

    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].1.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
}

#[tokio::test]
async fn it_should_remove_the_peer_and_answer_an_empty_dictionary_on_a_stopped_event() {
    let env = Started::new(&configuration::ephemeral()).await;

    announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash())).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).with("event", "stopped")).await;

    assert_eq!(body, b"de".to_vec());

    let peers = env
        .container
        .swarm_registry_container
        .registry
        .list_peers(&sample_info_hash())
        .await
        .unwrap();

    assert!(peers.is_empty());
}

#[tokio::test]
async fn it_should_answer_a_bencoded_failure_when_a_mandatory_param_is_missing() {
    let env = Started::new(&configuration::ephemeral()).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).without("uploaded")).await;

    assert_eq!(
        body,
        b"d14:failure reason27:Missing Argument (uploaded)8:intervali1800ee".to_vec()
    );

    let peers = env
        .container
        .swarm_registry_container
        .registry
        .list_peers(&sample_info_hash())
        .await
        .unwrap();

    assert!(peers.is_empty());
}

#[tokio::test]
async fn it_should_answer_a_bencoded_failure_for_an_invalid_info_hash() {
    let env = Started::new(&configuration::ephemeral()).await;

    let body = announce(&env, &AnnounceQueryBuilder::new(&sample_info_hash()).with("info_hash", "INVALID")).await;

    let response = swarm_tracker_contrib_bencode::Value::decode(&body).unwrap();

    assert!(response.lookup(b"failure reason").is_some());
    assert_eq!(response.lookup(b"interval").and_then(|interval| interval.int()), Some(1800));
}

mod when_the_tracker_is_behind_a_reverse_proxy {
    use std::net::IpAddr;
    use std::str::FromStr;

    use swarm_tracker_test_helpers::configuration;

    use crate::common::fixtures::{sample_info_hash, AnnounceQueryBuilder};
    use crate::common::test_env::Started;

    #[tokio::test]
    async fn it_should_store_the_peer_with_the_right_most_x_forwarded_for_ip() {
        let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

        let response = env
            .get_with_header(
                &format!("announce?{}", AnnounceQueryBuilder::new(&sample_info_hash()).query()),
                "X-Forwarded-For",
                "203.0.113.195, 150.172.238.178",
            )
            .await;

        assert_eq!(response.status(), 200);

        let peers = env
            .container
            .swarm_registry_container
            .registry
            .list_peers(&sample_info_hash())
            .await
            .unwrap();

        assert_eq!(peers[0].1.ip, IpAddr::from_str("150.172.238.178").unwrap());
    }

    #[tokio::test]
    async fn it_should_answer_a_bencoded_failure_when_the_x_forwarded_for_header_is_missing() {
        let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

        let response = env
            .get(&format!("announce?{}", AnnounceQueryBuilder::new(&sample_info_hash()).query()))
            .await;

        assert_eq!(response.status(), 200);

        let body = response.bytes().await.unwrap();

        assert!(body.starts_with(b"d14:failure reason"));
    }
}
