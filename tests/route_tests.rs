//! Integration tests for the details and navigation routes and for route
//! dispatch.

use serde_json::json;
use url_beautifier::*;

fn shop() -> Beautifier {
    let config = Configuration::new()
        .with_mapping("c", "colour")
        .with_mapping("s", "size")
        .with_navigation("Apples", json!({"id": 1}))
        .with_navigation("Stone Fruit", json!({"id": 2, "children": ["Plums"]}));
    Beautifier::new(config, Routes::default()).unwrap()
}

#[test]
fn test_details_example() {
    let b = shop();
    let request = DetailsRequest::new("293014", "dress");

    let url = b
        .build("details", &RouteRequest::Details(request.clone()))
        .unwrap();
    assert_eq!(url, "/details/dress/293014");
    assert_eq!(b.parse(&url).unwrap(), ParsedUrl::Details(request));

    assert_eq!(b.parse("/details/dress"), Err(BeautifierError::TooFewParts(1)));
}

#[test]
fn test_details_with_variants() {
    let b = shop();
    let request = DetailsRequest {
        id: "A-1".to_string(),
        title: "linen shirt".to_string(),
        refinements: vec![
            ValueRefinement::new("colour", "white"),
            ValueRefinement::new("size", "L"),
        ],
    };

    let url = b.build_details(&request).unwrap();
    assert_eq!(url, "/details/linen-shirt/white/L/cs/A%2D1");
    assert_eq!(b.parse(&url).unwrap(), ParsedUrl::Details(request));
}

#[test]
fn test_navigation_example() {
    let b = shop();

    assert_eq!(
        b.build("navigation", &RouteRequest::Navigation("Apples".to_string()))
            .unwrap(),
        "/navigation/Apples"
    );
    assert_eq!(
        b.parse("/navigation/Apples").unwrap(),
        ParsedUrl::Navigation(json!({"id": 1}))
    );
    assert_eq!(
        b.parse("/navigation/Oranges"),
        Err(BeautifierError::NoMapping("Oranges".to_string()))
    );
}

#[test]
fn test_navigation_payload_returned_unchanged() {
    let b = shop();
    let url = b.build_navigation("Stone Fruit").unwrap();
    assert_eq!(url, "/navigation/Stone-Fruit");
    assert_eq!(
        b.parse(&url).unwrap(),
        ParsedUrl::Navigation(json!({"id": 2, "children": ["Plums"]}))
    );
}

#[test]
fn test_unknown_route() {
    let b = shop();

    assert_eq!(
        b.parse("/checkout/basket"),
        Err(BeautifierError::InvalidRoute("/checkout/basket".to_string()))
    );
    assert_eq!(
        b.build("checkout", &RouteRequest::Navigation("Apples".to_string())),
        Err(BeautifierError::InvalidRoute("checkout".to_string()))
    );
}

#[test]
fn test_route_missing_from_table() {
    let routes = Routes::new().with(RouteKind::Search, "/search");
    let b = Beautifier::new(Configuration::new(), routes).unwrap();

    assert_eq!(
        b.build_details(&DetailsRequest::new("1", "dress")),
        Err(BeautifierError::InvalidRoute("details".to_string()))
    );
    assert!(matches!(
        b.parse("/details/dress/1"),
        Err(BeautifierError::InvalidRoute(_))
    ));
}

#[test]
fn test_request_mismatch() {
    let b = shop();
    assert_eq!(
        b.build("search", &RouteRequest::Navigation("Apples".to_string())),
        Err(BeautifierError::RequestMismatch {
            route: "search".to_string(),
            request: "navigation".to_string(),
        })
    );
}

#[test]
fn test_first_matching_mount_wins() {
    let routes = Routes::new()
        .with(RouteKind::Navigation, "/s")
        .with(RouteKind::Search, "/search");
    let config = Configuration::new().with_navigation("earch", json!("shadowed"));
    let b = Beautifier::new(config, routes).unwrap();

    assert_eq!(
        b.parse("/search").unwrap(),
        ParsedUrl::Navigation(json!("shadowed"))
    );
}

#[test]
fn test_absolute_urls() {
    let b = shop();
    let parsed = b
        .parse("https://shop.example.com/search/shoe/red/qc?page=2#results")
        .unwrap();

    let expected = SearchRequest {
        query: Some("shoe".to_string()),
        page: Some(2),
        refinements: vec![Refinement::value("colour", "red")],
        ..SearchRequest::default()
    };
    assert_eq!(parsed, ParsedUrl::Search(expected));
}

#[test]
fn test_invalid_tokens_rejected_at_construction() {
    let cases = vec![
        (Configuration::new().with_mapping("co", "colour"), "co", TokenRejection::Length),
        (Configuration::new().with_mapping("o", "colour"), "o", TokenRejection::Vowel),
        (
            Configuration::new().with_mapping("c", "colour").with_query_token("c"),
            "c",
            TokenRejection::Duplicate,
        ),
    ];

    for (config, token, reason) in cases {
        let err = Beautifier::new(config, Routes::default()).unwrap_err();
        assert!(err.to_string().contains(&format!("'{}'", token)), "{}", err);
        assert_eq!(
            err,
            BeautifierError::InvalidToken {
                token: token.to_string(),
                reason,
            }
        );
    }
}

#[test]
fn test_from_json_settings() {
    let b = Beautifier::from_json(
        r#"{
            "refinementMapping": [{"c": "colour"}],
            "queryToken": "k",
            "navigations": {"Apples": {"id": 1}},
            "routes": {"search": "/find", "navigation": "/browse"}
        }"#,
    )
    .unwrap();

    assert_eq!(
        b.build_search(&SearchRequest::with_query("shoe")).unwrap(),
        "/find/shoe/k"
    );
    assert_eq!(b.build_navigation("Apples").unwrap(), "/browse/Apples");
    assert_eq!(b.routes().mount(RouteKind::Details), None);

    assert!(matches!(
        Beautifier::from_json(r#"{"refinementMapping": [{"a": "colour"}]}"#),
        Err(BeautifierError::InvalidToken { .. })
    ));
    assert!(matches!(
        Beautifier::from_json("not json"),
        Err(BeautifierError::Config(_))
    ));
}
