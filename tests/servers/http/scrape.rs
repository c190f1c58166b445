use bittorrent_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer::fixture::PeerBuilder;
use swarm_tracker_test_helpers::configuration;

use crate::common::fixtures::{sample_info_hash, sample_info_hash_two, url_encoded};
use crate::common::test_env::Started;

async fn scrape(env: &Started, info_hashes: &[InfoHash]) -> Vec<u8> {
    let query = info_hashes
        .iter()
        .map(|info_hash| format!("info_hash={}", url_encoded(info_hash)))
        .collect::<Vec<_>>()
        .join("&");

    let response = env.get(&format!("scrape?{query}")).await;

    assert_eq!(response.status(), 200);

    response.bytes().await.unwrap().to_vec()
}

fn expected_file_entry(info_hash: &InfoHash, complete: u8, downloaded: u8, incomplete: u8) -> Vec<u8> {
    let mut entry = b"20:".to_vec();
    entry.extend_from_slice(&info_hash.bytes());
    entry.extend_from_slice(
        format!("d8:completei{complete}e10:downloadedi{downloaded}e10:incompletei{incomplete}ee").as_bytes(),
    );
    entry
}

#[tokio::test]
async fn it_should_report_the_seeders_and_leechers_of_a_swarm() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;
    let (leecher_id, leecher) = PeerBuilder::leecher().build();
    env.add_peer(&sample_info_hash(), &leecher_id, leecher).await;

    let body = scrape(&env, &[sample_info_hash()]).await;

    let mut expected = b"d5:filesd".to_vec();
    expected.extend(expected_file_entry(&sample_info_hash(), 1, 0, 1));
    expected.extend_from_slice(b"ee");

    assert_eq!(body, expected);

    env.stop().await;
}

#[tokio::test]
async fn it_should_leave_unknown_info_hashes_out_of_the_files_dictionary() {
    let env = Started::new(&configuration::ephemeral()).await;

    let body = scrape(&env, &[sample_info_hash()]).await;

    assert_eq!(body, b"d5:filesdee".to_vec());
}

#[tokio::test]
async fn it_should_count_the_completed_downloads() {
    let env = Started::new(&configuration::ephemeral()).await;

    let announce = crate::common::fixtures::AnnounceQueryBuilder::new(&sample_info_hash())
        .with("left", "0")
        .with("event", "completed");

    env.get(&format!("announce?{}", announce.query())).await;

    let body = scrape(&env, &[sample_info_hash()]).await;

    let mut expected = b"d5:filesd".to_vec();
    expected.extend(expected_file_entry(&sample_info_hash(), 1, 1, 0));
    expected.extend_from_slice(b"ee");

    assert_eq!(body, expected);
}

#[tokio::test]
async fn it_should_scrape_several_swarms_at_once() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;
    let (leecher_id, leecher) = PeerBuilder::leecher().build();
    env.add_peer(&sample_info_hash_two(), &leecher_id, leecher).await;

    let body = scrape(&env, &[sample_info_hash(), sample_info_hash_two()]).await;

    let files = swarm_tracker_contrib_bencode::Value::decode(&body)
        .unwrap()
        .lookup(b"files")
        .and_then(|files| files.dict().cloned())
        .unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.contains_key(sample_info_hash().bytes().as_slice()));
    assert!(files.contains_key(sample_info_hash_two().bytes().as_slice()));
}

#[tokio::test]
async fn it_should_answer_an_empty_files_dictionary_to_a_scrape_without_info_hashes() {
    let env = Started::new(&configuration::ephemeral()).await;

    let (seeder_id, seeder) = PeerBuilder::seeder().build();
    env.add_peer(&sample_info_hash(), &seeder_id, seeder).await;

    let response = env.get("scrape").await;

    assert_eq!(response.bytes().await.unwrap().to_vec(), b"d5:filesdee".to_vec());
}

#[tokio::test]
async fn it_should_answer_a_bencoded_failure_for_an_invalid_info_hash() {
    let env = Started::new(&configuration::ephemeral()).await;

    let response = env.get("scrape?info_hash=INVALID").await;

    assert_eq!(response.status(), 200);
    assert!(response.bytes().await.unwrap().starts_with(b"d14:failure reason"));
}
