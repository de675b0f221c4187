use std::net::IpAddr;

use anyhow::Context;
use dns_parser::{Packet, RData, ResponseCode};
use pnet::packet::dns::{DnsTypes, MutableDnsPacket, Opcode, Retcode};

use vmtask_common::utils::ip;

pub const DNS_HDR_LEN: usize = 12;
const CLASS_IN: u16 = 1;

/// A parsed answer to a PTR query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrReply {
    pub id: u16,
    /// `None` when the server reported an error or had no PTR record.
    pub hostname: Option<String>,
}

pub fn create_ptr_packet(ip_addr: &IpAddr, id: u16) -> anyhow::Result<Vec<u8>> {
    let qname: Vec<u8> = encode_dns_name(&ip::reverse_address_to_ptr(ip_addr));
    let q_fixed_len: usize = 4;
    let total: usize = DNS_HDR_LEN + qname.len() + q_fixed_len;
    let mut buffer: Vec<u8> = vec![0u8; total];

    {
        let mut dns: MutableDnsPacket =
            MutableDnsPacket::new(&mut buffer).context("creating dns header")?;
        dns.set_id(id);
        dns.set_is_response(0);
        dns.set_opcode(Opcode::StandardQuery);
        dns.set_is_authoriative(0);
        dns.set_is_truncated(0);
        dns.set_is_recursion_desirable(1);
        dns.set_is_recursion_available(0);
        dns.set_zero_reserved(0);
        dns.set_is_non_authenticated_data(0);
        dns.set_rcode(Retcode::NoError);
        dns.set_query_count(1);
        dns.set_response_count(0);
        dns.set_authority_rr_count(0);
        dns.set_additional_rr_count(0);
    }

    let mut cursor: usize = DNS_HDR_LEN;
    buffer[cursor..cursor + qname.len()].copy_from_slice(&qname);
    cursor += qname.len();

    buffer[cursor..cursor + 2].copy_from_slice(&DnsTypes::PTR.0.to_be_bytes());
    cursor += 2;
    buffer[cursor..cursor + 2].copy_from_slice(&CLASS_IN.to_be_bytes());

    Ok(buffer)
}

/// Reads the transaction id and the first PTR target out of a DNS reply.
///
/// Name compression inside the answer is followed.
pub fn parse_ptr_reply(payload: &[u8]) -> anyhow::Result<PtrReply> {
    let packet = Packet::parse(payload).context("failed to parse DNS packet")?;
    let id: u16 = packet.header.id;

    if packet.header.response_code != ResponseCode::NoError {
        return Ok(PtrReply { id, hostname: None });
    }

    let hostname = packet.answers.iter().find_map(|record| match &record.data {
        RData::PTR(ptr) => {
            let name: String = ptr.0.to_string();
            let name: &str = name.trim_end_matches('.');
            (!name.is_empty()).then(|| name.to_string())
        }
        _ => None,
    });

    Ok(PtrReply { id, hostname })
}

fn encode_dns_name(name: &str) -> Vec<u8> {
    let mut encoded: Vec<u8> = Vec::new();
    for label in name.split('.') {
        if label.is_empty() {
            continue;
        }
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    encoded
}
