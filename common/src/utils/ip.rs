use std::net::IpAddr;

/// Builds the reverse lookup name for `ip_addr`.
///
/// `192.168.1.5` becomes `5.1.168.192.in-addr.arpa`, IPv6 addresses are
/// expanded into reversed nibbles under `ip6.arpa`.
pub fn reverse_address_to_ptr(ip_addr: &IpAddr) -> String {
    match ip_addr {
        IpAddr::V4(ipv4_addr) => {
            let [a, b, c, d] = ipv4_addr.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa")
        }
        IpAddr::V6(ipv6_addr) => {
            let mut labels: Vec<String> = Vec::with_capacity(33);
            for byte in ipv6_addr.octets().iter().rev() {
                labels.push(format!("{:x}", byte & 0x0F));
                labels.push(format!("{:x}", byte >> 4));
            }
            labels.push(String::from("ip6.arpa"));
            labels.join(".")
        }
    }
}
