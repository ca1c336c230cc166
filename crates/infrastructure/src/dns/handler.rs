//! Hickory request handler answering A/AAAA queries from the record cache.

use std::iter;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_proto::op::{Header, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use tracing::{debug, warn};
use ztnet_dns_domain::{Fallthrough, NetworkZone};

use super::cache::RecordCache;

/// Authoritative handler for the configured network zones.
///
/// Query flow: match the longest configured zone suffix; outside every zone
/// the query is delegated (when the fallthrough set covers it) or refused.
/// Inside a zone, A and AAAA are answered from the cache — an unknown name
/// yields an authoritative NoError with zero answers — and any other type
/// gets the empty authoritative response. The query path never touches the
/// network; it only reads the current cache snapshot.
pub struct ZtnetHandler<N = NoNextHandler> {
    zones: Vec<NetworkZone>,
    cache: Arc<RecordCache>,
    ttl: u32,
    fallthrough: Fallthrough,
    next: Option<N>,
}

impl ZtnetHandler<NoNextHandler> {
    pub fn new(
        zones: Vec<NetworkZone>,
        cache: Arc<RecordCache>,
        ttl: u32,
        fallthrough: Fallthrough,
    ) -> Self {
        Self {
            zones,
            cache,
            ttl,
            fallthrough,
            next: None,
        }
    }
}

impl<N> ZtnetHandler<N> {
    /// Chain a handler to receive queries that fall through.
    pub fn with_next<M: RequestHandler>(self, next: M) -> ZtnetHandler<M> {
        ZtnetHandler {
            zones: self.zones,
            cache: self.cache,
            ttl: self.ttl,
            fallthrough: self.fallthrough,
            next: Some(next),
        }
    }

    /// Longest configured zone suffix the name ends with, if any.
    fn find_zone(&self, qname: &str) -> Option<&NetworkZone> {
        self.zones
            .iter()
            .filter(|z| qname.ends_with(z.zone()))
            .max_by_key(|z| z.zone().len())
    }

    /// Answer records for one query, all carrying the fixed configured TTL.
    fn answers(&self, qname: &str, name: &Name, qtype: RecordType) -> Vec<Record> {
        let rdatas: Vec<RData> = match qtype {
            RecordType::A => self
                .cache
                .lookup_a(qname)
                .unwrap_or_default()
                .into_iter()
                .map(|ip| RData::A(A::from(ip)))
                .collect(),
            RecordType::AAAA => self
                .cache
                .lookup_aaaa(qname)
                .unwrap_or_default()
                .into_iter()
                // family purity is enforced by construction; drop anything
                // IPv4-shaped that slips through
                .filter(|ip| ip.to_ipv4_mapped().is_none())
                .map(|ip| RData::AAAA(AAAA::from(ip)))
                .collect(),
            _ => Vec::new(),
        };

        rdatas
            .into_iter()
            .map(|rdata| {
                let mut record = Record::from_rdata(name.clone(), self.ttl, rdata);
                record.set_dns_class(DNSClass::IN);
                record
            })
            .collect()
    }
}

impl<N: RequestHandler> ZtnetHandler<N> {
    async fn respond<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
        answers: &[Record],
    ) -> ResponseInfo {
        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        header.set_recursion_available(false);

        let response = builder.build(
            header,
            answers.iter(),
            iter::empty(),
            iter::empty(),
            iter::empty(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "failed to write DNS response");
                serve_failed()
            }
        }
    }

    async fn respond_code<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
        code: ResponseCode,
    ) -> ResponseInfo {
        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.error_msg(request.header(), code);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "failed to write DNS response");
                serve_failed()
            }
        }
    }

    async fn delegate<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        match &self.next {
            Some(next) => next.handle_request(request, response_handle).await,
            None => {
                warn!("fallthrough requested but no next handler is configured");
                self.respond_code(request, response_handle, ResponseCode::ServFail)
                    .await
            }
        }
    }
}

#[async_trait]
impl<N: RequestHandler> RequestHandler for ZtnetHandler<N> {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        let info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "malformed request");
                return self
                    .respond_code(request, response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let qname = canonical_qname(&info.query.name().to_string());
        let qtype = info.query.query_type();

        if self.find_zone(&qname).is_none() {
            if self.fallthrough.covers(&qname) {
                return self.delegate(request, response_handle).await;
            }
            debug!(qname = %qname, "query outside configured zones, refused");
            return self
                .respond_code(request, response_handle, ResponseCode::Refused)
                .await;
        }

        if qtype != RecordType::A && qtype != RecordType::AAAA {
            if self.fallthrough.covers(&qname) {
                return self.delegate(request, response_handle).await;
            }
            // our zone, but not a type we answer: empty authoritative reply
            return self.respond(request, response_handle, &[]).await;
        }

        let name = Name::from(info.query.name().clone());
        let answers = self.answers(&qname, &name, qtype);
        debug!(qname = %qname, qtype = %qtype, count = answers.len(), "answering from cache");
        self.respond(request, response_handle, &answers).await
    }
}

/// Terminal delegation target: answers everything with SERVFAIL. Stands in
/// when no fallthrough chain is configured.
pub struct NoNextHandler;

#[async_trait]
impl RequestHandler for NoNextHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.error_msg(request.header(), ResponseCode::ServFail);
        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "failed to write DNS response");
                serve_failed()
            }
        }
    }
}

fn canonical_qname(qname: &str) -> String {
    let mut qname = qname.to_lowercase().trim_end_matches('.').to_string();
    qname.push('.');
    qname
}

fn serve_failed() -> ResponseInfo {
    let mut header = Header::new(0, MessageType::Query, OpCode::Query);
    header.set_response_code(ResponseCode::ServFail);
    header.into()
}
