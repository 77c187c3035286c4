use crate::error::ServiceError;
use common::model::site::Site;
use regex::Regex;

const IPV4: &str = r"(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(\.(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)){3}";

/// Field checks from the model plus the network address formats.
pub fn validate_site(site: &Site) -> Result<(), ServiceError> {
    site.validate().map_err(ServiceError::Validation)?;

    let cidr_re = Regex::new(&format!(r"^{}/(3[0-2]|[12]?\d)$", IPV4))
        .map_err(|e| ServiceError::Internal(format!("Regex error: {}", e)))?;
    let ip_re = Regex::new(&format!(r"^{}$", IPV4))
        .map_err(|e| ServiceError::Internal(format!("Regex error: {}", e)))?;

    if let Some(subnet) = site.network.subnets.iter().find(|s| !cidr_re.is_match(s.trim())) {
        return Err(ServiceError::Validation(format!(
            "Subnet '{}' is not an IPv4 CIDR block",
            subnet
        )));
    }
    if let Some(server) = site.network.dns_servers.iter().find(|s| !ip_re.is_match(s.trim())) {
        return Err(ServiceError::Validation(format!(
            "DNS server '{}' is not an IPv4 address",
            server
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_network(subnets: &[&str], dns: &[&str]) -> Site {
        let mut site = Site {
            name: "Net".to_string(),
            ..Default::default()
        };
        site.network.subnets = subnets.iter().map(|s| s.to_string()).collect();
        site.network.dns_servers = dns.iter().map(|s| s.to_string()).collect();
        site
    }

    #[test]
    fn accepts_well_formed_addresses() {
        let site = with_network(&["10.0.0.0/8", "192.168.10.0/24"], &["8.8.8.8"]);
        assert!(validate_site(&site).is_ok());
    }

    #[test]
    fn rejects_malformed_subnet_and_dns() {
        assert!(validate_site(&with_network(&["10.0.0.0/33"], &[])).is_err());
        assert!(validate_site(&with_network(&["300.1.1.0/24"], &[])).is_err());
        assert!(validate_site(&with_network(&[], &["dns.example.com"])).is_err());
    }
}
