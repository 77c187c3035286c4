//! Sampling helpers shared by bulk creation and the demo loader.
//!
//! Randomization policy, per field group:
//! - location: region uniform over all regions, then country and state
//!   uniform from that region's entries in `LOCATIONS`;
//! - users / devices: uniform integer in `[base / 2, base * 3 / 2]` (at
//!   least 1) around the template value, with a fallback base when the
//!   template has none, capped at the site maxima; a sampled device count
//!   also regenerates the breakdown so that it sums to the new total;
//! - vendors: wired, wireless, firewall, identity provider and MDM each
//!   uniform over their named vendors (the `Other`/`None` entries excluded);
//! - priority: uniform over the four levels;
//! - phase: uniform over `PHASES`.

use common::model::site::{
    DeviceBreakdown, DeviceCategory, FirewallVendor, IdentityProvider, MdmVendor, NetworkVendor,
    Priority, Region, Site, MAX_SITE_DEVICES, MAX_SITE_USERS,
};
use common::requests::RandomizeOptions;
use rand::Rng;

pub const PHASES: [&str; 6] = [
    "Discovery",
    "Design",
    "Pilot",
    "Deployment",
    "Enforcement",
    "Optimization",
];

const FALLBACK_USERS: u32 = 100;
const DEVICES_PER_USER: u32 = 3;

/// Region → (country, states).
pub const LOCATIONS: &[(Region, &str, &[&str])] = &[
    (Region::NorthAmerica, "United States", &["California", "Texas", "New York", "Illinois", "Washington"]),
    (Region::NorthAmerica, "Canada", &["Ontario", "Quebec", "British Columbia"]),
    (Region::SouthAmerica, "Brazil", &["São Paulo", "Rio de Janeiro", "Minas Gerais"]),
    (Region::SouthAmerica, "Chile", &["Santiago", "Valparaíso"]),
    (Region::Europe, "Germany", &["Bavaria", "Berlin", "Hesse"]),
    (Region::Europe, "United Kingdom", &["England", "Scotland"]),
    (Region::Europe, "France", &["Île-de-France", "Auvergne-Rhône-Alpes"]),
    (Region::MiddleEast, "United Arab Emirates", &["Dubai", "Abu Dhabi"]),
    (Region::MiddleEast, "Israel", &["Tel Aviv", "Haifa"]),
    (Region::Africa, "South Africa", &["Gauteng", "Western Cape"]),
    (Region::Africa, "Kenya", &["Nairobi", "Mombasa"]),
    (Region::AsiaPacific, "Japan", &["Tokyo", "Osaka"]),
    (Region::AsiaPacific, "Australia", &["New South Wales", "Victoria"]),
    (Region::AsiaPacific, "Singapore", &["Central Region"]),
];

/// Default device mix used when a breakdown has to be invented.
pub const DEFAULT_DEVICE_MIX: [(DeviceCategory, u32); 10] = [
    (DeviceCategory::Windows, 35),
    (DeviceCategory::Mac, 10),
    (DeviceCategory::Ios, 12),
    (DeviceCategory::Android, 8),
    (DeviceCategory::Iot, 10),
    (DeviceCategory::Printers, 5),
    (DeviceCategory::Voip, 8),
    (DeviceCategory::Cameras, 4),
    (DeviceCategory::Linux, 3),
    (DeviceCategory::Other, 5),
];

pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, options: &[T]) -> T {
    options[rng.random_range(0..options.len())]
}

/// Uniform in `[base / 2, base * 3 / 2]`, never below 1.
pub fn around<R: Rng + ?Sized>(rng: &mut R, base: u32) -> u32 {
    let low = (base / 2).max(1);
    let high = base.saturating_add(base / 2).max(low);
    rng.random_range(low..=high)
}

/// Sets region, country and state together so they stay consistent.
pub fn assign_location<R: Rng + ?Sized>(site: &mut Site, region: Region, rng: &mut R) {
    let countries: Vec<_> = LOCATIONS.iter().filter(|(r, _, _)| *r == region).collect();
    site.region = region;
    if countries.is_empty() {
        return;
    }
    let (_, country, states) = *countries[rng.random_range(0..countries.len())];
    site.country = country.to_string();
    site.state = pick(rng, states).to_string();
}

/// Splits `total` over `weights` proportionally; the rounding remainder goes
/// to the first category so the breakdown sums exactly to `total`.
pub fn distribute(total: u32, weights: &[(DeviceCategory, u32)]) -> DeviceBreakdown {
    let weight_sum: u64 = weights.iter().map(|(_, w)| u64::from(*w)).sum();
    let mut breakdown = DeviceBreakdown::new();
    if weight_sum == 0 || weights.is_empty() {
        if total > 0 {
            breakdown.insert(DeviceCategory::Other, total);
        }
        return breakdown;
    }

    let mut assigned = 0u32;
    for (category, weight) in weights {
        let share = (u64::from(total) * u64::from(*weight) / weight_sum) as u32;
        assigned += share;
        breakdown.insert(*category, share);
    }
    let (first, _) = weights[0];
    *breakdown.entry(first).or_insert(0) += total - assigned;
    breakdown.retain(|_, count| *count > 0);
    breakdown
}

/// Replaces the field groups enabled in `options` with sampled values.
pub fn randomize<R: Rng + ?Sized>(site: &mut Site, options: &RandomizeOptions, rng: &mut R) {
    if options.location {
        let region = pick(rng, &Region::ALL);
        assign_location(site, region, rng);
    }
    if options.users {
        let base = if site.users == 0 { FALLBACK_USERS } else { site.users };
        site.users = around(rng, base).min(MAX_SITE_USERS);
    }
    if options.devices {
        let base = if site.devices == 0 {
            site.users.max(1).saturating_mul(DEVICES_PER_USER)
        } else {
            site.devices
        };
        site.devices = around(rng, base).min(MAX_SITE_DEVICES);
        let weights: Vec<(DeviceCategory, u32)> = if site.device_breakdown.is_empty() {
            DEFAULT_DEVICE_MIX.to_vec()
        } else {
            site.device_breakdown.iter().map(|(c, n)| (*c, *n)).collect()
        };
        site.device_breakdown = distribute(site.devices, &weights);
    }
    if options.vendors {
        let infra = &mut site.infrastructure;
        infra.wired.vendor = pick(rng, &NetworkVendor::ALL[..NetworkVendor::ALL.len() - 1]);
        infra.wireless.vendor = pick(rng, &NetworkVendor::ALL[..NetworkVendor::ALL.len() - 1]);
        infra.firewall.vendor = pick(rng, &FirewallVendor::ALL[..FirewallVendor::ALL.len() - 1]);
        infra.identity_provider.provider =
            pick(rng, &IdentityProvider::ALL[..IdentityProvider::ALL.len() - 1]);
        infra.mdm.vendor = pick(rng, &MdmVendor::ALL[..MdmVendor::ALL.len() - 1]);
    }
    if options.priority {
        site.priority = pick(rng, &Priority::ALL);
    }
    if options.phase {
        site.phase = pick(rng, &PHASES).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_on() -> RandomizeOptions {
        RandomizeOptions {
            location: true,
            users: true,
            devices: true,
            vendors: true,
            priority: true,
            phase: true,
        }
    }

    #[test]
    fn distribute_sums_to_total() {
        for total in [0, 1, 7, 99, 1234] {
            let breakdown = distribute(total, &DEFAULT_DEVICE_MIX);
            assert_eq!(breakdown.values().sum::<u32>(), total);
        }
    }

    #[test]
    fn around_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = around(&mut rng, 100);
            assert!((50..=150).contains(&v));
        }
        assert_eq!(around(&mut rng, 0), 1);
    }

    #[test]
    fn no_flags_leaves_site_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let template = Site {
            name: "Template".to_string(),
            users: 40,
            ..Default::default()
        };
        let mut site = template.clone();
        randomize(&mut site, &RandomizeOptions::default(), &mut rng);
        assert_eq!(site, template);
    }

    #[test]
    fn randomized_location_is_consistent_and_devices_reconcile() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut site = Site {
                name: "X".to_string(),
                users: 80,
                devices: 240,
                ..Default::default()
            };
            randomize(&mut site, &all_on(), &mut rng);
            assert!(LOCATIONS
                .iter()
                .any(|(r, c, states)| *r == site.region && *c == site.country && states.contains(&site.state.as_str())));
            assert_eq!(site.device_breakdown_total(), site.devices);
            assert!(PHASES.contains(&site.phase.as_str()));
            assert_ne!(site.infrastructure.mdm.vendor, MdmVendor::None);
        }
    }

    #[test]
    fn huge_user_count_without_devices_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut site = Site {
            name: "Huge".to_string(),
            users: 2_000_000_000,
            devices: 0,
            ..Default::default()
        };
        let options = RandomizeOptions {
            devices: true,
            ..Default::default()
        };
        randomize(&mut site, &options, &mut rng);
        assert!(site.devices > 0);
        assert_eq!(site.device_breakdown_total(), site.devices);
    }

    #[test]
    fn same_seed_same_result() {
        let template = Site {
            name: "Seeded".to_string(),
            ..Default::default()
        };
        let mut a = template.clone();
        let mut b = template;
        randomize(&mut a, &all_on(), &mut StdRng::seed_from_u64(9));
        randomize(&mut b, &all_on(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
