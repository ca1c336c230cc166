//! End-to-end query flow over the wire format: a request is serialized,
//! parsed back as a `MessageRequest`, driven through the handler, and the
//! captured response is decoded and inspected.

#[path = "../common/mod.rs"]
mod common;

use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;

use common::*;
use ztnet_dns_domain::Fallthrough;
use ztnet_dns_infrastructure::RecordCache;

#[tokio::test]
async fn test_a_query_answers_from_cache() {
    let cache = seeded_cache(
        &[("laptop.home.example.com.", "10.144.0.9")],
        &[],
    );
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::A, 1).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert!(msg.authoritative());
    assert!(!msg.recursion_available());
    assert_eq!(extract_a_ips(&msg), vec!["10.144.0.9".parse::<std::net::Ipv4Addr>().unwrap()]);
    assert_eq!(msg.answers()[0].ttl(), 30);
}

#[tokio::test]
async fn test_aaaa_query_answers_from_cache() {
    let cache = seeded_cache(
        &[],
        &[("laptop.home.example.com.", "fd80:56c2:e21c:0:199:93ef:cc1b:947")],
    );
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::AAAA, 2).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert!(msg.authoritative());
    assert_eq!(
        extract_aaaa_ips(&msg),
        vec!["fd80:56c2:e21c:0:199:93ef:cc1b:947"
            .parse::<std::net::Ipv6Addr>()
            .unwrap()]
    );
}

#[tokio::test]
async fn test_query_name_case_is_canonicalized() {
    let cache = seeded_cache(&[("laptop.home.example.com.", "10.144.0.9")], &[]);
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "LapTop.Home.Example.COM.", RecordType::A, 3).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert_eq!(extract_a_ips(&msg).len(), 1);
}

#[tokio::test]
async fn test_unknown_name_in_zone_is_empty_noerror() {
    let cache = seeded_cache(&[("laptop.home.example.com.", "10.144.0.9")], &[]);
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "ghost.home.example.com.", RecordType::A, 4).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert!(msg.authoritative());
    assert!(msg.answers().is_empty());
}

#[tokio::test]
async fn test_a_query_for_aaaa_only_name_is_empty_noerror() {
    let cache = seeded_cache(
        &[],
        &[("laptop.home.example.com.", "fd80:56c2:e21c:0:199:93ef:cc1b:947")],
    );
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::A, 5).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert!(msg.answers().is_empty());
}

#[tokio::test]
async fn test_multiple_addresses_all_returned() {
    let cache = seeded_cache(
        &[
            ("nas.home.example.com.", "10.144.0.20"),
            ("nas.home.example.com.", "10.144.0.21"),
        ],
        &[],
    );
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "nas.home.example.com.", RecordType::A, 6).await;

    let mut ips = extract_a_ips(&msg);
    ips.sort();
    assert_eq!(
        ips,
        vec![
            "10.144.0.20".parse::<std::net::Ipv4Addr>().unwrap(),
            "10.144.0.21".parse().unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_out_of_zone_without_fallthrough_is_refused() {
    let handler = test_handler(
        std::sync::Arc::new(RecordCache::new()),
        Fallthrough::disabled(),
    );

    let msg = execute_query(&handler, "host.elsewhere.net.", RecordType::A, 7).await;

    assert_response_code(&msg, ResponseCode::Refused);
}

#[tokio::test]
async fn test_out_of_zone_with_fallthrough_delegates() {
    let next = RecordingNextHandler::new();
    let handler = test_handler(
        std::sync::Arc::new(RecordCache::new()),
        Fallthrough::enabled(Vec::new()),
    )
    .with_next(next.clone());

    let msg = execute_query(&handler, "host.elsewhere.net.", RecordType::A, 8).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert_eq!(next.seen(), vec!["host.elsewhere.net.".to_string()]);
}

#[tokio::test]
async fn test_fallthrough_scoped_to_listed_suffixes() {
    let next = RecordingNextHandler::new();
    let handler = test_handler(
        std::sync::Arc::new(RecordCache::new()),
        Fallthrough::enabled(vec!["elsewhere.net".to_string()]),
    )
    .with_next(next.clone());

    // covered suffix delegates
    let msg = execute_query(&handler, "host.elsewhere.net.", RecordType::A, 9).await;
    assert_response_code(&msg, ResponseCode::NoError);

    // uncovered suffix is still refused
    let msg = execute_query(&handler, "host.other.org.", RecordType::A, 10).await;
    assert_response_code(&msg, ResponseCode::Refused);

    assert_eq!(next.seen(), vec!["host.elsewhere.net.".to_string()]);
}

#[tokio::test]
async fn test_fallthrough_without_next_handler_answers_servfail() {
    let handler = test_handler(
        std::sync::Arc::new(RecordCache::new()),
        Fallthrough::enabled(Vec::new()),
    );

    let msg = execute_query(&handler, "host.elsewhere.net.", RecordType::A, 14).await;

    assert_response_code(&msg, ResponseCode::ServFail);
}

#[tokio::test]
async fn test_unsupported_type_in_zone_is_empty_authoritative() {
    let cache = seeded_cache(&[("laptop.home.example.com.", "10.144.0.9")], &[]);
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::MX, 11).await;

    assert_response_code(&msg, ResponseCode::NoError);
    assert!(msg.authoritative());
    assert!(msg.answers().is_empty());
}

#[tokio::test]
async fn test_response_id_echoes_query_id() {
    let cache = seeded_cache(&[("laptop.home.example.com.", "10.144.0.9")], &[]);
    let handler = test_handler(cache, Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::A, 0xBEEF).await;

    assert_eq!(msg.id(), 0xBEEF);
}

#[tokio::test]
async fn test_cache_swap_is_visible_to_subsequent_queries() {
    let cache = seeded_cache(&[("laptop.home.example.com.", "10.144.0.9")], &[]);
    let handler = test_handler(cache.clone(), Fallthrough::disabled());

    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::A, 12).await;
    assert_eq!(extract_a_ips(&msg).len(), 1);

    // a refresh that drops the member is reflected immediately
    cache.replace(None, None);
    let msg = execute_query(&handler, "laptop.home.example.com.", RecordType::A, 13).await;
    assert!(msg.answers().is_empty());
    assert_response_code(&msg, ResponseCode::NoError);
}
