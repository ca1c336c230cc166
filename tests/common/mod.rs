//! Shared test infrastructure for handler integration tests.

use std::collections::HashMap;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hickory_proto::op::{Header, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};
use hickory_server::authority::{MessageRequest, MessageResponse};
use hickory_server::proto::rr::Record;
use hickory_server::proto::xfer::Protocol;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};

use ztnet_dns_domain::{Fallthrough, NetworkZone};
use ztnet_dns_infrastructure::{RecordCache, ZtnetHandler};

pub const ZONE: &str = "home.example.com";
pub const NETWORK_ID: &str = "8056c2e21c000001";

// --- CapturingResponseHandler ---

/// Captures the serialized DNS response for inspection in tests.
///
/// The response is serialized via `MessageResponse::destructive_emit()` and
/// stored as raw wire bytes, then parsed back with `Message::from_vec()`.
#[derive(Clone)]
pub struct CapturingResponseHandler {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturingResponseHandler {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::with_capacity(512))),
        }
    }

    pub fn into_message(self) -> Message {
        let buf = self.buf.lock().unwrap();
        assert!(!buf.is_empty(), "no response was captured");
        Message::from_vec(&buf).expect("failed to parse captured DNS response")
    }
}

#[async_trait]
impl ResponseHandler for CapturingResponseHandler {
    async fn send_response<'a>(
        &mut self,
        response: MessageResponse<
            '_,
            'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
        >,
    ) -> io::Result<ResponseInfo> {
        let mut buf = self.buf.lock().unwrap();
        buf.clear();
        let mut encoder = BinEncoder::new(&mut *buf);
        encoder.set_max_size(u16::MAX);
        let info = response
            .destructive_emit(&mut encoder)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(info)
    }
}

// --- Recording fallthrough target ---

/// Next handler that records the names delegated to it and answers NoError.
#[derive(Clone, Default)]
pub struct RecordingNextHandler {
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingNextHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestHandler for RecordingNextHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if let Ok(info) = request.request_info() {
            self.seen.lock().unwrap().push(info.query.name().to_string());
        }
        let builder =
            hickory_server::authority::MessageResponseBuilder::from_message_request(request);
        let response = builder.error_msg(request.header(), ResponseCode::NoError);
        response_handle
            .send_response(response)
            .await
            .unwrap_or_else(|_| {
                let mut header = Header::new(0, MessageType::Query, OpCode::Query);
                header.set_response_code(ResponseCode::ServFail);
                header.into()
            })
    }
}

// --- Handler / cache builders ---

pub fn seeded_cache(
    a: &[(&str, &str)],
    aaaa: &[(&str, &str)],
) -> Arc<RecordCache> {
    let mut v4: HashMap<String, Vec<Ipv4Addr>> = HashMap::new();
    for (name, ip) in a {
        v4.entry(name.to_string())
            .or_default()
            .push(ip.parse().unwrap());
    }
    let mut v6: HashMap<String, Vec<Ipv6Addr>> = HashMap::new();
    for (name, ip) in aaaa {
        v6.entry(name.to_string())
            .or_default()
            .push(ip.parse().unwrap());
    }

    let cache = Arc::new(RecordCache::new());
    cache.replace(Some(v4), Some(v6));
    cache
}

pub fn test_zones() -> Vec<NetworkZone> {
    vec![NetworkZone::new(ZONE, NETWORK_ID).unwrap()]
}

pub fn test_handler(cache: Arc<RecordCache>, fallthrough: Fallthrough) -> ZtnetHandler {
    ZtnetHandler::new(test_zones(), cache, 30, fallthrough)
}

// --- Query construction ---

pub fn build_query_bytes(name: &str, record_type: RecordType, id: u16) -> Vec<u8> {
    let mut msg = Message::new(id, MessageType::Query, OpCode::Query);
    msg.set_recursion_desired(true);
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);
    msg.add_query(query);
    msg.to_vec().unwrap()
}

pub fn build_request(name: &str, record_type: RecordType, id: u16) -> Request {
    let bytes = build_query_bytes(name, record_type, id);
    let mut decoder = BinDecoder::new(&bytes);
    let msg = MessageRequest::read(&mut decoder).expect("failed to parse MessageRequest");
    let src: SocketAddr = "127.0.0.1:53531".parse().unwrap();
    Request::new(msg, bytes.into(), src, Protocol::Udp)
}

/// Run one query through a handler and return the parsed response.
pub async fn execute_query<H: RequestHandler>(
    handler: &H,
    name: &str,
    record_type: RecordType,
    id: u16,
) -> Message {
    let request = build_request(name, record_type, id);
    let capture = CapturingResponseHandler::new();
    handler.handle_request(&request, capture.clone()).await;
    capture.into_message()
}

// --- Response helpers ---

pub fn extract_a_ips(msg: &Message) -> Vec<Ipv4Addr> {
    msg.answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(Ipv4Addr::from(*a)),
            _ => None,
        })
        .collect()
}

pub fn extract_aaaa_ips(msg: &Message) -> Vec<Ipv6Addr> {
    msg.answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::AAAA(aaaa) => Some(Ipv6Addr::from(*aaaa)),
            _ => None,
        })
        .collect()
}

pub fn assert_response_code(msg: &Message, expected: ResponseCode) {
    assert_eq!(
        msg.response_code(),
        expected,
        "expected {:?}, got {:?}",
        expected,
        msg.response_code()
    );
}
