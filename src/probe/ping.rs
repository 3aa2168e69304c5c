//! Ping probe with native ICMP and a `ping` command fallback.
//!
//! Native echo requests run on a blocking socket inside `spawn_blocking`.

use std::mem::MaybeUninit;
use std::net::{IpAddr, SocketAddr};
use std::process::Stdio;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::process::Command;

use super::ProbeError;

/// How echo requests can be sent from this process.
#[derive(Debug, Clone, Copy, PartialEq)]
enum IcmpCapability {
    Native,
    CommandOnly,
}

static ICMP_CAPABILITY: OnceLock<IcmpCapability> = OnceLock::new();

static ECHO_SEQUENCE: AtomicU16 = AtomicU16::new(0);

fn next_echo_id() -> (u16, u16) {
    (rand::random(), ECHO_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Per-address-family ICMP details.
#[derive(Debug, Clone, Copy)]
struct EchoFamily {
    domain: Domain,
    protocol: Protocol,
    request_type: u8,
    reply_type: u8,
}

impl EchoFamily {
    fn for_ip(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self {
                domain: Domain::IPV4,
                protocol: Protocol::ICMPV4,
                request_type: 8,
                reply_type: 0,
            },
            IpAddr::V6(_) => Self {
                domain: Domain::IPV6,
                protocol: Protocol::ICMPV6,
                request_type: 128,
                reply_type: 129,
            },
        }
    }

    /// Open a raw socket, or an unprivileged datagram socket when raw is refused.
    fn open(&self) -> std::io::Result<(Socket, Type)> {
        Socket::new(self.domain, Type::RAW, Some(self.protocol))
            .map(|s| (s, Type::RAW))
            .or_else(|_| {
                Socket::new(self.domain, Type::DGRAM, Some(self.protocol)).map(|s| (s, Type::DGRAM))
            })
    }
}

fn detect_icmp_capability() -> IcmpCapability {
    match EchoFamily::for_ip(IpAddr::from([127, 0, 0, 1])).open() {
        Ok((_, ty)) if ty == Type::RAW => {
            tracing::debug!("Ping probe: using native ICMP (raw socket)");
            IcmpCapability::Native
        }
        Ok(_) => {
            tracing::debug!("Ping probe: using native ICMP (datagram socket)");
            IcmpCapability::Native
        }
        Err(e) => {
            tracing::debug!("Ping probe: native ICMP unavailable ({}), using ping command", e);
            IcmpCapability::CommandOnly
        }
    }
}

/// Send one echo request to `address` and return the round-trip time.
pub async fn run_ping_probe(address: &str, timeout: Duration) -> Result<Duration, ProbeError> {
    let capability = *ICMP_CAPABILITY.get_or_init(detect_icmp_capability);
    if capability == IcmpCapability::CommandOnly {
        return run_ping_command(address, timeout).await;
    }

    let ip = resolve_address(address).await?;
    let result = tokio::task::spawn_blocking(move || blocking_echo(ip, timeout))
        .await
        .map_err(|e| ProbeError::Network(format!("spawn_blocking failed: {}", e)))?;

    match result {
        Err(ProbeError::Network(msg)) if is_permission_error(&msg) => {
            tracing::warn!(
                "Native ping to {} not permitted, falling back to command: {}",
                address,
                msg
            );
            run_ping_command(address, timeout).await
        }
        other => other,
    }
}

fn is_permission_error(msg: &str) -> bool {
    msg.contains("Permission") || msg.contains("not permitted") || msg.contains("denied")
}

async fn resolve_address(address: &str) -> Result<IpAddr, ProbeError> {
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(ip);
    }

    tokio::net::lookup_host((address, 0))
        .await
        .map_err(|e| ProbeError::Network(format!("DNS resolution failed: {}", e)))?
        .map(|sa| sa.ip())
        .next()
        .ok_or_else(|| ProbeError::Network(format!("no addresses found for {}", address)))
}

fn blocking_echo(ip: IpAddr, timeout: Duration) -> Result<Duration, ProbeError> {
    let family = EchoFamily::for_ip(ip);
    let (socket, socket_type) = family
        .open()
        .map_err(|e| ProbeError::Network(format!("failed to create ICMP socket: {}", e)))?;

    socket
        .set_write_timeout(Some(timeout))
        .map_err(|e| ProbeError::Network(format!("failed to set timeout: {}", e)))?;
    socket
        .connect(&SocketAddr::new(ip, 0).into())
        .map_err(|e| ProbeError::Network(format!("failed to connect: {}", e)))?;

    let (identifier, sequence) = next_echo_id();
    let packet = build_echo_request(family.request_type, identifier, sequence);

    let start = Instant::now();
    socket.send(&packet).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ProbeError::Network(format!("Permission denied: {}", e))
        } else {
            ProbeError::Network(format!("failed to send: {}", e))
        }
    })?;

    // Datagram ICMP sockets get their echo identifier rewritten by the kernel
    let check_identifier = socket_type == Type::RAW;
    let mut buf = [MaybeUninit::<u8>::uninit(); 1500];

    loop {
        let remaining = timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(ProbeError::Timeout(timeout));
        }
        socket
            .set_read_timeout(Some(remaining))
            .map_err(|e| ProbeError::Network(format!("failed to set timeout: {}", e)))?;

        let len = socket.recv(&mut buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                ProbeError::Timeout(timeout)
            }
            _ => ProbeError::Network(format!("failed to receive: {}", e)),
        })?;
        let elapsed = start.elapsed();

        // SAFETY: recv initialized the first `len` bytes
        let data: &[u8] = unsafe { std::slice::from_raw_parts(buf.as_ptr() as *const u8, len) };

        let expected_id = check_identifier.then_some(identifier);
        if is_echo_reply(data, family.reply_type, expected_id, sequence) {
            return Ok(elapsed);
        }
    }
}

/// Build an echo request: 8 byte header plus a 56 byte payload.
///
/// The checksum is always filled in; for ICMPv6 the kernel overwrites it.
fn build_echo_request(request_type: u8, identifier: u16, sequence: u16) -> Vec<u8> {
    let mut packet = vec![0u8; 64];
    packet[0] = request_type;
    packet[4..6].copy_from_slice(&identifier.to_be_bytes());
    packet[6..8].copy_from_slice(&sequence.to_be_bytes());
    packet[8..16].copy_from_slice(b"pingledg");

    let checksum = icmp_checksum(&packet);
    packet[2..4].copy_from_slice(&checksum.to_be_bytes());
    packet
}

/// Internet checksum (RFC 1071).
fn icmp_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = data
        .chunks(2)
        .map(|pair| {
            let hi = pair[0] as u32;
            let lo = pair.get(1).copied().unwrap_or(0) as u32;
            (hi << 8) | lo
        })
        .sum();

    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

/// Whether `data` is the reply to our request.
///
/// Raw IPv4 sockets deliver the IP header first; its length comes from the IHL field.
fn is_echo_reply(data: &[u8], reply_type: u8, identifier: Option<u16>, sequence: u16) -> bool {
    let offset = match data.first() {
        Some(first) if first >> 4 == 4 => ((first & 0x0F) as usize) * 4,
        _ => 0,
    };
    let Some(icmp) = data.get(offset..offset + 8) else {
        return false;
    };

    let reply_id = u16::from_be_bytes([icmp[4], icmp[5]]);
    let reply_seq = u16::from_be_bytes([icmp[6], icmp[7]]);

    icmp[0] == reply_type && reply_seq == sequence && identifier.map_or(true, |id| id == reply_id)
}

/// Run the system `ping` once.
async fn run_ping_command(address: &str, timeout: Duration) -> Result<Duration, ProbeError> {
    let wait_secs = timeout.as_secs().max(1);

    let child = Command::new("ping")
        .args(["-c", "1", "-W", &wait_secs.to_string(), address])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(wait_secs + 1), child)
        .await
        .map_err(|_| ProbeError::Timeout(timeout))?
        .map_err(|e| ProbeError::Command(format!("failed to execute ping: {}", e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        if stdout.contains("100% packet loss") || stdout.contains("100.0% packet loss") {
            return Err(ProbeError::Timeout(timeout));
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::Command(format!(
            "ping exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    // A successful exit is enough; the time is informational
    Ok(parse_ping_output(&stdout).unwrap_or_default())
}

/// Extract the round-trip time from `ping` output (Linux and macOS formats).
fn parse_ping_output(output: &str) -> Option<Duration> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"time[=<](?P<ms>[0-9.]+)\s*ms",
            r"round-trip\s+min/avg/max/stddev\s*=\s*[0-9.]+/(?P<ms>[0-9.]+)/",
            r"rtt\s+min/avg/max/mdev\s*=\s*[0-9.]+/(?P<ms>[0-9.]+)/",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    });

    patterns.iter().find_map(|re| {
        let ms: f64 = re.captures(output)?.name("ms")?.as_str().parse().ok()?;
        Some(Duration::from_micros((ms * 1000.0).round() as u64))
    })
}
