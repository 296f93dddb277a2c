//! Composite resource ids
//!
//! Resources without a single server-assigned id encode their key fields into one
//! string. Two encodings exist: `#`-joined parts (`clbId#listenerId`) and the DNAT
//! URL-like form `{protocol}://{vpc}:{nat}@{eip}:{eport}`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProviderError, ProviderResult};

/// Separator for `#`-joined ids.
pub const ID_SEPARATOR: char = '#';

/// Join `parts` with `#`.
pub fn join(parts: &[&str]) -> String {
    parts.join("#")
}

/// Split `id` into exactly `N` `#`-separated parts.
///
/// Parts may be empty only when their index is listed in `may_be_empty`.
pub fn split<const N: usize>(id: &str, may_be_empty: &[usize]) -> ProviderResult<[String; N]> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    if parts.len() != N {
        return Err(ProviderError::invalid_id(
            id,
            format!("expected {N} '#'-separated parts, got {}", parts.len()),
        ));
    }
    if let Some(index) = parts
        .iter()
        .enumerate()
        .position(|(i, p)| p.is_empty() && !may_be_empty.contains(&i))
    {
        return Err(ProviderError::invalid_id(id, format!("part {} is empty", index + 1)));
    }

    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.to_string();
    }
    Ok(out)
}

// ============ DNAT ============

/// Key of a NAT gateway port forwarding rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnatId {
    pub protocol: String,
    pub vpc_id: String,
    pub nat_id: String,
    pub elastic_ip: String,
    pub elastic_port: u16,
}

const DNAT_SCHEME_SEP: &str = "://";

impl DnatId {
    /// Build a key, rejecting fields that would make the encoding ambiguous.
    ///
    /// `protocol` must not contain `:` or `/`, the ids must not contain `:`, `@` or
    /// `/`, and `elastic_ip` must not contain `@`.
    pub fn new(
        protocol: impl Into<String>,
        vpc_id: impl Into<String>,
        nat_id: impl Into<String>,
        elastic_ip: impl Into<String>,
        elastic_port: u16,
    ) -> ProviderResult<Self> {
        let id = Self {
            protocol: protocol.into(),
            vpc_id: vpc_id.into(),
            nat_id: nat_id.into(),
            elastic_ip: elastic_ip.into(),
            elastic_port,
        };
        id.check()?;
        Ok(id)
    }

    fn check(&self) -> ProviderResult<()> {
        fn bad(field: &str, value: &str, reserved: &[char]) -> Option<String> {
            if value.is_empty() {
                Some(format!("{field} is empty"))
            } else {
                value
                    .chars()
                    .find(|c| reserved.contains(c))
                    .map(|c| format!("{field} '{value}' contains reserved character '{c}'"))
            }
        }

        let problem = bad("protocol", &self.protocol, &[':', '/', '@'])
            .or_else(|| bad("vpc_id", &self.vpc_id, &[':', '@', '/']))
            .or_else(|| bad("nat_id", &self.nat_id, &[':', '@', '/']))
            .or_else(|| bad("elastic_ip", &self.elastic_ip, &['@', '/']));
        match problem {
            Some(reason) => Err(ProviderError::invalid_id(&self.to_string(), reason)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for DnatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}@{}:{}",
            self.protocol, self.vpc_id, self.nat_id, self.elastic_ip, self.elastic_port
        )
    }
}

/// Canonical decimal port: ASCII digits only, no sign, no leading zero.
fn parse_port(s: &str) -> Option<u16> {
    let canonical = match s.as_bytes() {
        [] => false,
        [b'0'] => true,
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
    };
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

impl FromStr for DnatId {
    type Err = ProviderError;

    fn from_str(s: &str) -> ProviderResult<Self> {
        let malformed = |reason: &str| ProviderError::invalid_id(s, reason);

        let (protocol, rest) = s
            .split_once(DNAT_SCHEME_SEP)
            .ok_or_else(|| malformed("missing '://' after protocol"))?;
        // eip may be IPv6, so the port is whatever follows the last ':'
        let (rest, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| malformed("missing ':' before elastic port"))?;
        let elastic_port =
            parse_port(port).ok_or_else(|| malformed("elastic port is not a number in 0-65535"))?;
        let (gateways, elastic_ip) = rest
            .split_once('@')
            .ok_or_else(|| malformed("missing '@' before elastic ip"))?;
        let (vpc_id, nat_id) = gateways
            .split_once(':')
            .ok_or_else(|| malformed("missing ':' between vpc id and nat id"))?;

        let id = Self {
            protocol: protocol.to_string(),
            vpc_id: vpc_id.to_string(),
            nat_id: nat_id.to_string(),
            elastic_ip: elastic_ip.to_string(),
            elastic_port,
        };
        id.check().map_err(|e| match e {
            ProviderError::InvalidId { reason, .. } => malformed(&reason),
            other => other,
        })?;
        Ok(id)
    }
}
