//! Addresses of the host's active network interfaces

use crate::error::NetError;
use std::collections::BTreeMap;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub addresses: Vec<IpAddr>,
}

/// Interfaces that are up, with their IPv4 and IPv6 addresses
#[cfg(unix)]
pub fn active_network_interfaces() -> Result<Vec<NetworkInterface>, NetError> {
    use nix::ifaddrs::getifaddrs;
    use nix::net::if_::InterfaceFlags;
    use std::net::{SocketAddrV4, SocketAddrV6};

    let mut interfaces: BTreeMap<String, Vec<IpAddr>> = BTreeMap::new();

    for entry in getifaddrs().map_err(|err| NetError::Interfaces(err.to_string()))? {
        if !entry.flags.contains(InterfaceFlags::IFF_UP) {
            continue;
        }
        let addresses = interfaces.entry(entry.interface_name.clone()).or_default();
        let Some(storage) = entry.address else {
            continue;
        };
        if let Some(sin) = storage.as_sockaddr_in() {
            addresses.push(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
        } else if let Some(sin6) = storage.as_sockaddr_in6() {
            addresses.push(IpAddr::V6(*SocketAddrV6::from(*sin6).ip()));
        }
    }

    Ok(interfaces
        .into_iter()
        .map(|(name, addresses)| NetworkInterface { name, addresses })
        .collect())
}

#[cfg(not(unix))]
pub fn active_network_interfaces() -> Result<Vec<NetworkInterface>, NetError> {
    Err(NetError::Interfaces(
        "interface enumeration is only supported on unix platforms".to_string(),
    ))
}

pub fn inet_addresses(interfaces: &[NetworkInterface]) -> Vec<IpAddr> {
    interfaces
        .iter()
        .flat_map(|interface| interface.addresses.iter().copied())
        .collect()
}

pub fn active_interface_addresses() -> Result<Vec<IpAddr>, NetError> {
    Ok(inet_addresses(&active_network_interfaces()?))
}
