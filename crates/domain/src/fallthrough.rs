/// Names for which an unanswerable query is delegated to the next handler
/// instead of being refused.
///
/// Disabled by default. When enabled with an empty list, every name falls
/// through; with a non-empty list, only names ending in one of the listed
/// zones do.
#[derive(Debug, Clone, Default)]
pub struct Fallthrough {
    zones: Option<Vec<String>>,
}

impl Fallthrough {
    pub fn disabled() -> Self {
        Self { zones: None }
    }

    pub fn enabled(zones: Vec<String>) -> Self {
        let zones = zones
            .into_iter()
            .map(|z| {
                let mut z = z.to_lowercase().trim_end_matches('.').to_string();
                z.push('.');
                z
            })
            .collect();
        Self { zones: Some(zones) }
    }

    pub fn is_enabled(&self) -> bool {
        self.zones.is_some()
    }

    /// Whether a query for `qname` (canonical FQDN) may fall through.
    /// Matching is label-aware: a listed zone covers itself and names whose
    /// next label boundary sits exactly at the zone suffix.
    pub fn covers(&self, qname: &str) -> bool {
        match &self.zones {
            None => false,
            Some(zones) if zones.is_empty() => true,
            Some(zones) => {
                let qname = qname.to_lowercase();
                zones.iter().any(|zone| {
                    qname == *zone
                        || qname
                            .strip_suffix(zone.as_str())
                            .is_some_and(|head| head.ends_with('.'))
                })
            }
        }
    }
}
