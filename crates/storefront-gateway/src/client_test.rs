use super::*;

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, 5, "storefront-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_segments_to_base_path() {
    let client = test_client("https://store.example.com/api");
    let url = client.endpoint(&["communities", "0DB1", "search"], None);
    assert_eq!(
        url.as_str(),
        "https://store.example.com/api/communities/0DB1/search"
    );
}

#[test]
fn endpoint_strips_trailing_slash() {
    let client = test_client("https://store.example.com/api/");
    let url = client.endpoint(&["scratch-cache"], None);
    assert_eq!(url.as_str(), "https://store.example.com/api/scratch-cache");
}

#[test]
fn endpoint_adds_effective_account_when_present() {
    let client = test_client("https://store.example.com");
    let url = client.endpoint(&["communities", "0DB1", "cart-summary"], Some("001xyz"));
    assert_eq!(
        url.as_str(),
        "https://store.example.com/communities/0DB1/cart-summary?effectiveAccountId=001xyz"
    );
}

#[test]
fn endpoint_percent_encodes_segments() {
    let client = test_client("https://store.example.com");
    let url = client.endpoint(&["scratch-cache", "compare:01t/1"], None);
    assert!(
        url.as_str().ends_with("/scratch-cache/compare:01t%2F1"),
        "segment should be percent-encoded: {url}"
    );
}

#[test]
fn new_rejects_relative_base_url() {
    let result = StorefrontClient::new("not-a-url", 5, "storefront-test/0.1");
    assert!(
        matches!(result, Err(GatewayError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
