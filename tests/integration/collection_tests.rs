//! Collection edits driven by cards fetched from a mock API

use booster_crack::collection::{parse_addition_input, read_archive};
use booster_crack::config::ApiConfig;
use booster_crack::output::{render_collection, OutputFormat};
use booster_crack::{CollectionStore, ScryfallClient};
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str) -> ScryfallClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        user_agent: "BoosterCrackTest/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 1,
    };
    ScryfallClient::new(&config).expect("Failed to create client")
}

#[tokio::test]
async fn test_entry_lines_build_an_exportable_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/dsk/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "card",
            "id": "abc",
            "name": "Fear of Abduction",
            "set": "dsk",
            "collector_number": "12"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let dir = tempdir().unwrap();
    let store = CollectionStore::new(dir.path());

    let mut counts = Vec::new();
    for line in ["12 dsk", "12", "12f", "12f", "-12f"] {
        let input = parse_addition_input(line, Some("dsk")).unwrap();
        let card = client
            .card(&input.set_code, &input.card_number)
            .await
            .expect("Lookup failed");
        counts.push(store.edit(None, card, input.foil, input.removal).unwrap());
    }
    assert_eq!(counts, vec![1, 2, 1, 2, 1]);

    let archive = read_archive(&store.collection_path()).unwrap();
    assert_eq!(
        render_collection(&archive, OutputFormat::Deck).unwrap(),
        "2 Fear of Abduction (DSK) 12\n1 Fear of Abduction (DSK) 12 *F*\n"
    );
}

#[tokio::test]
async fn test_list_in_use_receives_additions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/blb/224"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "card",
            "id": "mabel",
            "name": "Mabel, Heir to Cragflame",
            "set": "blb",
            "collector_number": "224"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let dir = tempdir().unwrap();
    let store = CollectionStore::new(dir.path());
    let list = store.create_list("mice", true).unwrap();

    let card = client.card("blb", "224").await.expect("Lookup failed");
    store.edit(None, card, false, false).unwrap();

    assert_eq!(read_archive(&list).unwrap().total_count(), 1);
    assert!(read_archive(&store.collection_path()).unwrap().is_empty());
}
