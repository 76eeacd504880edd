use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use mrr_monitor::clients::{StripeClient, StripeError};
use mrr_monitor::services::{MrrResult, MrrService};

const TEST_KEY: &str = "sk_test_123";
// base64("sk_test_123:") — secret key as Basic auth username, empty password
const TEST_KEY_BASIC: &str = "Basic c2tfdGVzdF8xMjM6";

fn service_for(server: &ServerGuard) -> MrrService {
    let client = StripeClient::with_secret_key(TEST_KEY.to_string()).with_base_url(server.url());
    MrrService::new(client)
}

fn first_page_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("status".into(), "active".into()),
        Matcher::UrlEncoded("limit".into(), "100".into()),
        Matcher::UrlEncoded("expand[]".into(), "data.discount".into()),
    ])
}

fn next_page_query(cursor: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("status".into(), "active".into()),
        Matcher::UrlEncoded("limit".into(), "100".into()),
        Matcher::UrlEncoded("expand[]".into(), "data.discount".into()),
        Matcher::UrlEncoded("starting_after".into(), cursor.into()),
    ])
}

fn monthly_sub(id: &str, currency: &str, unit_amount: i64) -> Value {
    sub_with_interval(id, currency, unit_amount, "month")
}

fn sub_with_interval(id: &str, currency: &str, unit_amount: i64, interval: &str) -> Value {
    json!({
        "id": id,
        "object": "subscription",
        "currency": currency,
        "cancel_at_period_end": false,
        "items": {
            "object": "list",
            "data": [{
                "id": format!("si_{}", id),
                "price": {
                    "unit_amount": unit_amount,
                    "recurring": { "interval": interval }
                },
                "quantity": 1
            }]
        }
    })
}

fn page(subs: Vec<Value>, has_more: bool) -> String {
    json!({
        "object": "list",
        "data": subs,
        "has_more": has_more,
        "url": "/v1/subscriptions"
    })
    .to_string()
}

#[tokio::test]
async fn follows_the_cursor_until_has_more_is_false() {
    let mut server = Server::new_async().await;

    // Mocks are matched newest-first, so the cursorless mock must be
    // registered before the cursor-bearing one.
    let page_one = server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(
            vec![
                monthly_sub("sub_1", "usd", 1000),
                monthly_sub("sub_2", "usd", 2000),
            ],
            true,
        ))
        .expect(1)
        .create_async()
        .await;

    let page_two = server
        .mock("GET", "/subscriptions")
        .match_query(next_page_query("sub_2"))
        .with_status(200)
        .with_body(page(vec![monthly_sub("sub_3", "usd", 4000)], false))
        .expect(1)
        .create_async()
        .await;

    let result = service_for(&server).fetch_mrr().await.unwrap();

    // All three records folded exactly once, across both pages
    assert_eq!(
        result,
        MrrResult {
            cents: 7000,
            currency: "usd".to_string()
        }
    );
    page_one.assert_async().await;
    page_two.assert_async().await;
}

#[tokio::test]
async fn empty_page_with_has_more_terminates() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![], true))
        .expect(1)
        .create_async()
        .await;

    let result = service_for(&server).fetch_mrr().await.unwrap();

    assert_eq!(
        result,
        MrrResult {
            cents: 0,
            currency: "usd".to_string()
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_subscription_list_yields_zero_usd() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![], false))
        .create_async()
        .await;

    let result = service_for(&server).fetch_mrr().await.unwrap();

    assert_eq!(
        result,
        MrrResult {
            cents: 0,
            currency: "usd".to_string()
        }
    );
}

#[tokio::test]
async fn requests_authenticate_with_basic_auth() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/subscriptions")
        .match_header("authorization", TEST_KEY_BASIC)
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![], false))
        .expect(1)
        .create_async()
        .await;

    service_for(&server).fetch_mrr().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_is_surfaced_distinctly() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(401)
        .with_body(r#"{"error": {"message": "Invalid API Key provided"}}"#)
        .create_async()
        .await;

    let err = service_for(&server).fetch_mrr().await.unwrap_err();
    assert!(matches!(err, StripeError::Unauthorized));
}

#[tokio::test]
async fn unauthorized_on_a_later_page_discards_the_partial_total() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![monthly_sub("sub_1", "usd", 5000)], true))
        .create_async()
        .await;

    server
        .mock("GET", "/subscriptions")
        .match_query(next_page_query("sub_1"))
        .with_status(401)
        .create_async()
        .await;

    let err = service_for(&server).fetch_mrr().await.unwrap_err();
    assert!(matches!(err, StripeError::Unauthorized));
}

#[tokio::test]
async fn other_status_codes_map_to_invalid_response() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = service_for(&server).fetch_mrr().await.unwrap_err();
    assert!(matches!(err, StripeError::InvalidResponse(_)));
}

#[tokio::test]
async fn undecodable_body_maps_to_invalid_response() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let err = service_for(&server).fetch_mrr().await.unwrap_err();
    assert!(matches!(err, StripeError::InvalidResponse(_)));
}

#[tokio::test]
async fn decode_failure_on_page_two_discards_page_one() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![monthly_sub("sub_1", "usd", 9000)], true))
        .create_async()
        .await;

    server
        .mock("GET", "/subscriptions")
        .match_query(next_page_query("sub_1"))
        .with_status(200)
        .with_body(r#"{"data": "this is not a list"}"#)
        .create_async()
        .await;

    let err = service_for(&server).fetch_mrr().await.unwrap_err();
    assert!(matches!(err, StripeError::InvalidResponse(_)));
}

#[tokio::test]
async fn normalizes_intervals_discounts_and_currencies_end_to_end() {
    let mut server = Server::new_async().await;

    // eur: 120000/year -> 10000, then 50% off -> 5000
    let mut discounted = sub_with_interval("sub_eur", "EUR", 120_000, "year");
    discounted["discount"] = json!({
        "coupon": { "id": "HALF_OFF", "percent_off": 50.0 }
    });
    // usd: 433 from a weekly 100, plus 1000 monthly with 300 off -> 700
    let weekly = sub_with_interval("sub_usd_w", "usd", 100, "week");
    let mut amount_off = monthly_sub("sub_usd_m", "usd", 1000);
    amount_off["discount"] = json!({
        "coupon": { "id": "LOYALTY", "amount_off": 300 }
    });

    server
        .mock("GET", "/subscriptions")
        .match_query(first_page_query())
        .with_status(200)
        .with_body(page(vec![discounted, weekly, amount_off], false))
        .create_async()
        .await;

    let result = service_for(&server).fetch_mrr().await.unwrap();

    // eur 5000 beats usd 433 + 700 = 1133
    assert_eq!(
        result,
        MrrResult {
            cents: 5000,
            currency: "eur".to_string()
        }
    );
}
