use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, info};

use vmtask_common::error::TaskError;
use vmtask_protocols::dns::{self, PtrReply};

pub const DNS_PORT: u16 = 53;
const MAX_DNS_PAYLOAD: usize = 4096;

/// Where reverse lookups go.
#[derive(Debug, Clone)]
pub enum ReverseLookup {
    /// The operating system resolver (hosts file, nsswitch, system DNS).
    System { timeout: Duration },
    /// A raw PTR query to one nameserver.
    Server(PtrResolver),
}

impl ReverseLookup {
    /// Uses `server` when one is given, the OS resolver otherwise.
    pub fn new(server: Option<IpAddr>, timeout: Duration) -> Self {
        match server {
            Some(ip) => Self::Server(PtrResolver::new(SocketAddr::new(ip, DNS_PORT), timeout)),
            None => Self::System { timeout },
        }
    }

    pub async fn lookup(&self, ip: IpAddr) -> Result<String, TaskError> {
        match self {
            Self::System { timeout } => system_lookup(ip, *timeout).await,
            Self::Server(resolver) => resolver.lookup(ip).await,
        }
    }
}

/// Reverse lookup through `getnameinfo`.
///
/// The call blocks, so it runs on the blocking pool. A lookup that outlives
/// `limit` is abandoned there.
pub async fn system_lookup(ip: IpAddr, limit: Duration) -> Result<String, TaskError> {
    let task = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip));

    let hostname: String = match timeout(limit, task).await {
        Ok(Ok(Ok(hostname))) => hostname,
        Ok(Ok(Err(e))) => return Err(TaskError::resolve(ip, e)),
        Ok(Err(join_error)) => return Err(TaskError::resolve(ip, join_error)),
        Err(_elapsed) => {
            return Err(TaskError::resolve(
                ip,
                format!("no answer from the system resolver within {limit:?}"),
            ));
        }
    };

    // getnameinfo hands back the numeric form when no name exists
    if hostname.parse::<IpAddr>().is_ok() {
        return Err(TaskError::NoPtrRecord(ip));
    }
    info!("dns ptr of {ip} is {hostname}");
    Ok(hostname)
}

/// Reverse lookups against a single nameserver over UDP.
#[derive(Debug, Clone)]
pub struct PtrResolver {
    server: SocketAddr,
    timeout: Duration,
}

impl PtrResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Resolves the PTR record of `ip` to a hostname.
    pub async fn lookup(&self, ip: IpAddr) -> Result<String, TaskError> {
        match timeout(self.timeout, self.query(ip)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(TaskError::resolve(
                ip,
                format!("no answer from {} within {:?}", self.server, self.timeout),
            )),
        }
    }

    async fn query(&self, ip: IpAddr) -> Result<String, TaskError> {
        let socket: UdpSocket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| TaskError::resolve(ip, e))?;
        socket
            .connect(self.server)
            .await
            .map_err(|e| TaskError::resolve(ip, e))?;

        let id: u16 = rand::random();
        let query: Vec<u8> = dns::create_ptr_packet(&ip, id).map_err(|e| TaskError::resolve(ip, e))?;
        socket.send(&query).await.map_err(|e| TaskError::resolve(ip, e))?;
        debug!("sent PTR query {id:#06x} for {ip} to {}", self.server);

        let mut buffer: Vec<u8> = vec![0u8; MAX_DNS_PAYLOAD];
        loop {
            let len: usize = socket
                .recv(&mut buffer)
                .await
                .map_err(|e| TaskError::resolve(ip, e))?;

            let reply: PtrReply = match dns::parse_ptr_reply(&buffer[..len]) {
                Ok(reply) => reply,
                Err(e) => {
                    debug!("ignoring malformed DNS reply: {e:#}");
                    continue;
                }
            };
            if reply.id != id {
                debug!("ignoring DNS reply with foreign id {:#06x}", reply.id);
                continue;
            }

            let hostname: String = reply.hostname.ok_or(TaskError::NoPtrRecord(ip))?;
            info!("dns ptr of {ip} is {hostname}");
            return Ok(hostname);
        }
    }

    fn bind_addr(&self) -> SocketAddr {
        match self.server {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        }
    }
}
