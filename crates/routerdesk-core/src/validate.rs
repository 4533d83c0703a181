// ── Field validation helpers ──
//
// `require` is always applied to mandatory fields. The format checks only
// run when the console is configured for strict validation; empty values
// are skipped there so optional fields stay optional.

use std::net::Ipv4Addr;

use crate::error::CoreError;

pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::required(field));
    }
    Ok(())
}

pub(crate) fn ipv4(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }
    Err(CoreError::validation(
        field,
        format!("'{value}' is not a dotted-quad IPv4 address"),
    ))
}

/// `a.b.c.d/len` with `len <= 32`.
pub(crate) fn cidr(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let valid = value.split_once('/').is_some_and(|(addr, len)| {
        addr.parse::<Ipv4Addr>().is_ok() && len.parse::<u8>().is_ok_and(|l| l <= 32)
    });
    if valid {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("'{value}' is not an IPv4 prefix like 10.0.0.0/24"),
        ))
    }
}

/// Six hex octets separated by `:` or `-` (one separator style per address).
pub(crate) fn mac(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() || is_mac(value) {
        return Ok(());
    }
    Err(CoreError::validation(
        field,
        format!("'{value}' is not a MAC address like AA:BB:CC:DD:EE:FF"),
    ))
}

fn is_mac(value: &str) -> bool {
    let sep = if value.contains('-') { '-' } else { ':' };
    let octets: Vec<&str> = value.split(sep).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Route distinguisher / route target shape: `ASN:index`.
pub(crate) fn asn_index(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let valid = value.split_once(':').is_some_and(|(asn, index)| {
        asn.parse::<u32>().is_ok() && index.parse::<u32>().is_ok()
    });
    if valid {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("'{value}' must have the form ASN:index"),
        ))
    }
}

pub(crate) fn vlan_id(field: &str, id: u16) -> Result<(), CoreError> {
    if (1..=4094).contains(&id) {
        Ok(())
    } else {
        Err(CoreError::validation(field, format!("{id} is outside 1-4094")))
    }
}

/// Split comma-separated form input into trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse a numeric form field, mapping failures to a validation error.
pub(crate) fn number<N: std::str::FromStr>(field: &str, value: &str) -> Result<N, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::validation(field, format!("'{}' is not a number", value.trim())))
}

/// Parse an enum-valued form field via its `FromStr` impl.
pub(crate) fn choice<E: std::str::FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<E, CoreError> {
    value.trim().parse().map_err(|_| {
        CoreError::validation(
            field,
            format!("'{}' is not one of {expected}", value.trim()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_formats() {
        assert!(mac("mac", "AA:BB:CC:DD:EE:FF").is_ok());
        assert!(mac("mac", "aa-bb-cc-dd-ee-01").is_ok());
        assert!(mac("mac", "").is_ok());
        assert!(mac("mac", "AA:BB:CC:DD:EE").is_err());
        assert!(mac("mac", "AA:BB:CC:DD:EE:GG").is_err());
        assert!(mac("mac", "AA-BB:CC:DD:EE:FF").is_err());
    }

    #[test]
    fn address_formats() {
        assert!(ipv4("ip", "192.168.1.50").is_ok());
        assert!(ipv4("ip", "192.168.1.500").is_err());
        assert!(cidr("subnet", "10.0.0.0/24").is_ok());
        assert!(cidr("subnet", "10.0.0.0/33").is_err());
        assert!(cidr("subnet", "10.0.0.0").is_err());
    }

    #[test]
    fn route_distinguishers() {
        assert!(asn_index("rd", "65001:100").is_ok());
        assert!(asn_index("rd", "65001").is_err());
        assert!(asn_index("rd", "x:1").is_err());
    }

    #[test]
    fn vlan_range() {
        assert!(vlan_id("vlan_id", 1).is_ok());
        assert!(vlan_id("vlan_id", 4094).is_ok());
        assert!(vlan_id("vlan_id", 0).is_err());
        assert!(vlan_id("vlan_id", 4095).is_err());
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list("65001:400, 65001:999 ,,"),
            vec!["65001:400".to_owned(), "65001:999".to_owned()]
        );
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn require_rejects_blank() {
        assert_eq!(require("name", "  "), Err(CoreError::required("name")));
        assert!(require("name", "x").is_ok());
    }
}
