//! # Dataset Filter
//!
//! One filter type serves all three record kinds. What differs between
//! kinds is how a record maps to countries, and that is the
//! [`CountryKey`] parameter:
//!
//! - A record with one country ([`RecordCountries::Single`]) matches a
//!   policy when that country is permitted and is grouped under it.
//! - A record with two countries ([`RecordCountries::Pair`]) matches when
//!   *either* endpoint is permitted, but is grouped under its **source**
//!   only. A pair whose source is unresolved is therefore absent from the
//!   grouped view even when its destination matched.
//!
//! Every method re-scans the records. Nothing is cached, so the grouped
//! view and the statistics derived from it always agree.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use skyscope_core::{is_resolved_country, HasCountry, Tier};
use skyscope_policy::{AccessError, PolicyTable, TierPolicy};
use std::sync::Arc;

use crate::catalog::DatasetKind;

/// Countries a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCountries<'a> {
    Single(&'a str),
    Pair { source: &'a str, destination: &'a str },
}

impl<'a> RecordCountries<'a> {
    /// The key the record is grouped under.
    pub fn group_key(&self) -> &'a str {
        match *self {
            Self::Single(country) => country,
            Self::Pair { source, .. } => source,
        }
    }

    /// Every country the record touches, source first.
    pub fn all(&self) -> impl Iterator<Item = &'a str> {
        let (first, second) = match *self {
            Self::Single(country) => (country, None),
            Self::Pair {
                source,
                destination,
            } => (source, Some(destination)),
        };
        std::iter::once(first).chain(second)
    }

    /// Whether any of the record's countries equals `country` exactly.
    pub fn touches(&self, country: &str) -> bool {
        self.all().any(|c| c == country)
    }

    fn matches_policy(&self, policy: &TierPolicy) -> bool {
        self.all().any(|c| policy.permits(c))
    }
}

/// Country extraction for one record kind.
pub trait CountryKey<R>: Send + Sync {
    fn countries<'a>(&'a self, record: &'a R) -> RecordCountries<'a>;
}

/// Key for records that carry their own country field.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectCountry;

impl<R: HasCountry> CountryKey<R> for DirectCountry {
    fn countries<'a>(&'a self, record: &'a R) -> RecordCountries<'a> {
        RecordCountries::Single(record.country())
    }
}

/// Summary of a tier's grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub total_countries: usize,
    /// Group keys, sorted.
    pub countries_with_data: Vec<String>,
}

impl DatasetStatistics {
    /// Attach a dataset kind so the record total serializes under
    /// `totalAirlines`, `totalAirports` or `totalRoutes`.
    pub fn labelled(&self, kind: DatasetKind) -> LabelledStatistics<'_> {
        LabelledStatistics { kind, stats: self }
    }
}

/// Statistics rendered with a dataset-specific total key.
#[derive(Debug, Clone, Copy)]
pub struct LabelledStatistics<'a> {
    kind: DatasetKind,
    stats: &'a DatasetStatistics,
}

impl Serialize for LabelledStatistics<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.kind.total_key(), &self.stats.total_records)?;
        map.serialize_entry("totalCountries", &self.stats.total_countries)?;
        map.serialize_entry("countriesWithData", &self.stats.countries_with_data)?;
        map.end()
    }
}

/// Tier-scoped reads over one immutable record collection.
#[derive(Debug)]
pub struct DatasetFilter<R, K> {
    records: Vec<R>,
    key: K,
    policies: Arc<PolicyTable>,
}

impl<R, K> DatasetFilter<R, K>
where
    K: CountryKey<R>,
{
    pub fn new(records: Vec<R>, key: K, policies: Arc<PolicyTable>) -> Self {
        Self {
            records,
            key,
            policies,
        }
    }

    /// All loaded records, unfiltered.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Countries of one record, as seen by this filter.
    pub fn countries_of<'a>(&'a self, record: &'a R) -> RecordCountries<'a> {
        self.key.countries(record)
    }

    /// Records visible to `tier`, grouped by country.
    ///
    /// Records with an unresolved group key are dropped. Groups are ordered
    /// by country name and records keep their load order within a group.
    pub fn by_tier(&self, tier: Tier) -> Result<BTreeMap<&str, Vec<&R>>, AccessError> {
        let policy = self.policies.policy_for(tier)?;
        let mut groups: BTreeMap<&str, Vec<&R>> = BTreeMap::new();
        for record in &self.records {
            let countries = self.key.countries(record);
            if !policy.is_unrestricted() && !countries.matches_policy(policy) {
                continue;
            }
            let group = countries.group_key();
            if is_resolved_country(group) {
                groups.entry(group).or_default().push(record);
            }
        }
        Ok(groups)
    }

    /// Records touching `country`, if `tier` may see it.
    pub fn by_country(&self, tier: Tier, country: &str) -> Result<Vec<&R>, AccessError> {
        let decision = self.policies.check_access(tier, country)?;
        if !decision.allowed {
            tracing::info!(%tier, country, "country access denied");
        }
        decision.into_result()?;
        Ok(self
            .records
            .iter()
            .filter(|r| self.key.countries(r).touches(country))
            .collect())
    }

    /// Countries `tier` may query.
    ///
    /// A list policy returns its list verbatim, in configured order. An
    /// unrestricted policy returns every resolved country present in the
    /// records, sorted and deduplicated.
    pub fn accessible_countries(&self, tier: Tier) -> Result<Vec<String>, AccessError> {
        match self.policies.policy_for(tier)? {
            TierPolicy::Countries(list) => Ok(list.clone()),
            TierPolicy::Unrestricted => {
                let present: BTreeSet<&str> = self
                    .records
                    .iter()
                    .flat_map(|r| self.key.countries(r).all())
                    .filter(|c| is_resolved_country(c))
                    .collect();
                Ok(present.into_iter().map(str::to_string).collect())
            }
        }
    }

    /// Totals over [`DatasetFilter::by_tier`], recomputed on every call.
    pub fn statistics(&self, tier: Tier) -> Result<DatasetStatistics, AccessError> {
        let groups = self.by_tier(tier)?;
        let total_records = groups.values().map(Vec::len).sum();
        let countries_with_data: Vec<String> = groups.keys().map(|c| c.to_string()).collect();
        Ok(DatasetStatistics {
            total_records,
            total_countries: countries_with_data.len(),
            countries_with_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyscope_core::{AirlineRecord, UNKNOWN_COUNTRY};
    use skyscope_policy::TierPolicy;

    fn airline(id: u32, country: &str) -> AirlineRecord {
        AirlineRecord {
            id,
            name: format!("Airline {id}"),
            alias: None,
            iata: None,
            icao: None,
            callsign: None,
            country: country.to_string(),
            active: true,
        }
    }

    fn filter(records: Vec<AirlineRecord>) -> DatasetFilter<AirlineRecord, DirectCountry> {
        DatasetFilter::new(records, DirectCountry, Arc::new(PolicyTable::standard()))
    }

    fn sample() -> DatasetFilter<AirlineRecord, DirectCountry> {
        filter(vec![
            airline(1, "Israel"),
            airline(2, "Germany"),
            airline(3, "Mexico"),
            airline(4, UNKNOWN_COUNTRY),
            airline(5, "Israel"),
            airline(6, ""),
        ])
    }

    #[test]
    fn free_groups_only_israel() {
        let f = sample();
        let groups = f.by_tier(Tier::Free).unwrap();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["Israel"]);
        let ids: Vec<u32> = groups["Israel"].iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 5]);
    }

    #[test]
    fn elite_groups_everything_resolved() {
        let f = sample();
        let groups = f.by_tier(Tier::Elite).unwrap();
        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            ["Germany", "Israel", "Mexico"]
        );
        assert!(!groups.contains_key(UNKNOWN_COUNTRY));
        assert!(!groups.contains_key(""));
    }

    #[test]
    fn by_country_exact_match() {
        let f = sample();
        let germans = f.by_country(Tier::Pro, "Germany").unwrap();
        assert_eq!(germans.len(), 1);
        assert_eq!(germans[0].country, "Germany");
    }

    #[test]
    fn by_country_denied_with_reason() {
        let f = sample();
        assert_eq!(
            f.by_country(Tier::Pro, "Mexico"),
            Err(AccessError::AccessDenied(
                "Country 'Mexico' is not accessible with pro tier".into()
            ))
        );
    }

    #[test]
    fn elite_can_query_unknown_country_directly() {
        let f = sample();
        assert_eq!(f.by_country(Tier::Elite, UNKNOWN_COUNTRY).unwrap().len(), 1);
    }

    #[test]
    fn list_policy_countries_returned_verbatim() {
        let f = sample();
        assert_eq!(f.accessible_countries(Tier::Free).unwrap(), ["Israel"]);
        let pro = f.accessible_countries(Tier::Pro).unwrap();
        assert_eq!(pro.len(), 11);
        // Configured order, not sorted.
        assert_eq!(pro[0], "Israel");
        assert_eq!(pro[1], "United States");
    }

    #[test]
    fn unrestricted_countries_sorted_distinct_present() {
        let f = sample();
        assert_eq!(
            f.accessible_countries(Tier::Elite).unwrap(),
            ["Germany", "Israel", "Mexico"]
        );
    }

    #[test]
    fn statistics_follow_grouping() {
        let f = sample();
        let stats = f.statistics(Tier::Pro).unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.total_countries, 2);
        assert_eq!(stats.countries_with_data, ["Germany", "Israel"]);
    }

    #[test]
    fn empty_collection_gives_empty_statistics() {
        let f = filter(Vec::new());
        let stats = f.statistics(Tier::Elite).unwrap();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.total_countries, 0);
        assert!(stats.countries_with_data.is_empty());
        assert!(f.accessible_countries(Tier::Elite).unwrap().is_empty());
    }

    #[test]
    fn missing_tier_surfaces_unknown_tier() {
        let table = PolicyTable::from_entries([(Tier::Free, TierPolicy::countries(["Israel"]))]);
        let f = DatasetFilter::new(vec![airline(1, "Israel")], DirectCountry, Arc::new(table));
        assert_eq!(f.by_tier(Tier::Pro).unwrap_err(), AccessError::UnknownTier(Tier::Pro));
        assert!(f.statistics(Tier::Elite).is_err());
        assert!(f.accessible_countries(Tier::Elite).is_err());
        assert!(f.by_country(Tier::Elite, "Israel").is_err());
    }

    #[test]
    fn injected_table_changes_results() {
        let table = PolicyTable::from_entries([
            (Tier::Free, TierPolicy::countries(["Mexico"])),
            (Tier::Pro, TierPolicy::countries(["Mexico"])),
            (Tier::Elite, TierPolicy::Unrestricted),
        ]);
        let f = DatasetFilter::new(
            vec![airline(1, "Israel"), airline(2, "Mexico")],
            DirectCountry,
            Arc::new(table),
        );
        let groups = f.by_tier(Tier::Free).unwrap();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["Mexico"]);
    }

    #[test]
    fn labelled_statistics_use_dataset_key() {
        let stats = sample().statistics(Tier::Free).unwrap();
        let json = serde_json::to_value(stats.labelled(DatasetKind::Airlines)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalAirlines": 2,
                "totalCountries": 1,
                "countriesWithData": ["Israel"],
            })
        );
    }

    #[test]
    fn record_countries_pair_helpers() {
        let pair = RecordCountries::Pair {
            source: "Israel",
            destination: "Germany",
        };
        assert_eq!(pair.group_key(), "Israel");
        assert_eq!(pair.all().collect::<Vec<_>>(), ["Israel", "Germany"]);
        assert!(pair.touches("Germany"));
        assert!(!pair.touches("France"));
    }
}
