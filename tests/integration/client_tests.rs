//! Scryfall call sites against a mock API

use booster_crack::config::ApiConfig;
use booster_crack::output::{render_cards, OutputFormat};
use booster_crack::{CrackError, ScryfallClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
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
async fn test_cards_for_codes_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // First page of the set search
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "s:BLB or s:SPG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "total_cards": 3,
            "has_more": true,
            "next_page": format!("{}/cards/search/page/2", base_url),
            "data": [
                {"id": "1", "name": "Mabel, Heir to Cragflame", "set": "blb", "collector_number": "224"},
                {"id": "2", "name": "Season of the Burrow", "set": "blb", "collector_number": "29"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Second and last page
    Mock::given(method("GET"))
        .and(path("/cards/search/page/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "total_cards": 3,
            "has_more": false,
            "next_page": null,
            "data": [
                {"id": "3", "name": "Lightning Bolt", "set": "spg", "collector_number": "38"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&base_url);
    let cards = client
        .cards_for_codes(&["BLB", "SPG"])
        .await
        .expect("Fetching cards failed");

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].name, "Mabel, Heir to Cragflame");
    assert_eq!(cards[2].name, "Lightning Bolt");

    let deck = render_cards(&cards, OutputFormat::Deck).unwrap();
    assert_eq!(
        deck,
        "1 Mabel, Heir to Cragflame (BLB) 224\n1 Season of the Burrow (BLB) 29\n1 Lightning Bolt (SPG) 38\n"
    );
}

#[tokio::test]
async fn test_unknown_set_reports_scryfall_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "code": "not_found",
            "status": 404,
            "details": "Your query didn't match any cards."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let error = client
        .cards_for_codes(&["ZZZ"])
        .await
        .expect_err("Expected an error");

    assert!(matches!(error, CrackError::UpstreamStatus { status: 404, .. }));
    let message = error.to_string();
    assert!(message.contains("404 Not Found"), "{}", message);
    assert!(message.contains("/cards/search?q=s%3AZZZ"), "{}", message);
    assert!(message.contains("didn't match any cards"), "{}", message);
}

#[tokio::test]
async fn test_card_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/dsk/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "card",
            "id": "abc",
            "name": "Fear of Abduction",
            "set": "dsk",
            "collector_number": "12",
            "prices": {"usd": "0.10", "usd_foil": "0.25", "eur": null, "eur_foil": null}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let card = client.card("DSK", "12").await.expect("Lookup failed");

    assert_eq!(card.name, "Fear of Abduction");
    assert_eq!(
        card.prices.and_then(|p| p.usd_foil).as_deref(),
        Some("0.25")
    );
}

#[tokio::test]
async fn test_rulings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/abc/rulings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "has_more": false,
            "data": [
                {"object": "ruling", "source": "wotc", "published_at": "2024-09-20", "comment": "Manifest dread is a keyword action."}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let rulings = client.rulings("abc").await.expect("Fetching rulings failed");

    assert_eq!(rulings.len(), 1);
    assert_eq!(rulings[0].source, "wotc");
}
