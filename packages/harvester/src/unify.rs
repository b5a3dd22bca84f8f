//! Join of bill-status records with the text-version files they declare.
//!
//! Every declared text version with a URL is matched by file name against
//! the DTD-flavor text versions of the same congress. Matches are enriched
//! with the bill-status view of the version (`bs_date`, `bs_type`,
//! `bs_url`), rendered to plain text and sorted most recent first.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::billstatus::BillStatus;
use crate::error::{HarvesterError, Result};
use crate::scrape::{LegisClass, XmlType};
use crate::textversion::{DocumentMetadata, TextVersion};

/// A matched text version, merged with what the bill status says about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedTextVersion {
    pub text_id: String,
    pub legis_id: String,
    pub legis_version: String,
    pub legis_class: LegisClass,
    pub xml_type: XmlType,
    pub scrape_path: String,
    pub file_name: String,
    pub lastmod: DateTime<Utc>,
    /// Version date declared by the bill status.
    pub bs_date: Option<DateTime<Utc>>,
    /// Version type declared by the bill status (e.g., "Introduced in Senate").
    pub bs_type: Option<String>,
    pub bs_url: String,
    /// Plain text of the document.
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl UnifiedTextVersion {
    fn merge(
        tv: &TextVersion,
        bs_date: Option<DateTime<Utc>>,
        bs_type: Option<String>,
        bs_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            text_id: tv.text_id.clone(),
            legis_id: tv.legis_id.clone(),
            legis_version: tv.legis_version.clone(),
            legis_class: tv.legis_class,
            xml_type: tv.xml_type,
            scrape_path: tv.scrape_path.clone(),
            file_name: tv.file_name.clone(),
            lastmod: tv.lastmod,
            bs_date,
            bs_type,
            bs_url: bs_url.to_string(),
            text: tv.text()?,
            metadata: tv.metadata()?,
        })
    }
}

/// One bill with all of its matched text versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedBill {
    pub legis_id: String,
    pub congress_num: u32,
    pub legis_type: String,
    pub legis_num: u32,
    /// `text_id` of the first entry of `text_versions`.
    pub latest_text_id: Option<String>,
    pub billstatus: BillStatus,
    /// Most recent first; versions without a declared date last.
    pub text_versions: Vec<UnifiedTextVersion>,
}

/// Flat description of a bill's latest text version, attached to every
/// chunk of that text downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersionMetadata {
    pub text_id: String,
    pub legis_version: String,
    pub legis_class: LegisClass,
    pub legis_id: String,
    pub congress_num: u32,
    pub legis_type: String,
    pub legis_num: u32,
    pub origin_chamber: String,
    pub update_date: DateTime<Utc>,
    pub text_date: Option<DateTime<Utc>>,
    pub introduced_date: NaiveDate,
    /// Bioguide id of the first sponsor.
    pub sponsor: Option<String>,
}

impl UnifiedBill {
    /// Metadata of the latest version, or `None` for a bill without text.
    pub fn latest_metadata(&self) -> Option<LatestVersionMetadata> {
        let latest = self.text_versions.first()?;
        let bs = &self.billstatus;

        Some(LatestVersionMetadata {
            text_id: latest.text_id.clone(),
            legis_version: latest.legis_version.clone(),
            legis_class: latest.legis_class,
            legis_id: self.legis_id.clone(),
            congress_num: self.congress_num,
            legis_type: self.legis_type.clone(),
            legis_num: self.legis_num,
            origin_chamber: bs.origin_chamber.clone(),
            update_date: bs.update_date,
            text_date: latest.bs_date,
            introduced_date: bs.introduced_date,
            sponsor: bs.sponsors.first().map(|s| s.bioguide_id.clone()),
        })
    }
}

/// Counts collected while joining.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    pub bills: usize,
    pub bills_without_text: usize,
    pub matched: usize,
    /// Declared URLs with no matching file, and how often each was seen.
    pub missing: BTreeMap<String, usize>,
    /// Matched files that could not be rendered, by `text_id`. These
    /// versions are left out of their bill.
    #[serde(default)]
    pub unrenderable: BTreeMap<String, usize>,
}

impl JoinReport {
    pub fn missing_total(&self) -> usize {
        self.missing.values().sum()
    }

    pub fn unrenderable_total(&self) -> usize {
        self.unrenderable.values().sum()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: JoinReport) {
        self.bills += other.bills;
        self.bills_without_text += other.bills_without_text;
        self.matched += other.matched;
        for (url, count) in other.missing {
            *self.missing.entry(url).or_insert(0) += count;
        }
        for (text_id, count) in other.unrenderable {
            *self.unrenderable.entry(text_id).or_insert(0) += count;
        }
    }
}

/// DTD-flavor text versions keyed by file name.
#[derive(Debug)]
pub struct TextVersionIndex<'a> {
    by_file_name: HashMap<&'a str, Vec<&'a TextVersion>>,
}

impl<'a> TextVersionIndex<'a> {
    /// Index `text_versions`, ignoring USLM documents.
    ///
    /// Fails with [`HarvesterError::DuplicateKey`] when a `text_id` repeats.
    pub fn new(text_versions: &'a [TextVersion]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut by_file_name: HashMap<&str, Vec<&TextVersion>> = HashMap::new();

        for tv in text_versions {
            if !seen.insert(tv.text_id.as_str()) {
                return Err(HarvesterError::DuplicateKey {
                    kind: "text_id",
                    key: tv.text_id.clone(),
                });
            }
            if tv.xml_type == XmlType::Dtd {
                by_file_name.entry(tv.file_name.as_str()).or_default().push(tv);
            }
        }

        Ok(Self { by_file_name })
    }

    /// The single text version named `file_name`.
    ///
    /// More than one candidate is a [`HarvesterError::JoinFanOut`].
    pub fn lookup(&self, file_name: &str) -> Result<Option<&'a TextVersion>> {
        match self.by_file_name.get(file_name).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([tv]) => Ok(Some(*tv)),
            Some(candidates) => Err(HarvesterError::JoinFanOut {
                file_name: file_name.to_string(),
                matches: candidates.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.by_file_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file_name.is_empty()
    }
}

/// Join one bill with its declared text versions.
///
/// Only a join fan-out fails the bill. Declared versions with no file, and
/// files that cannot be rendered, are logged, counted in `report` and left
/// out. Nothing is counted for a bill that fails.
pub fn unify_bill(
    billstatus: &BillStatus,
    index: &TextVersionIndex<'_>,
    report: &mut JoinReport,
) -> Result<UnifiedBill> {
    let legis_id = billstatus.legis_id();
    let mut text_versions = Vec::new();
    let mut missing = Vec::new();
    let mut unrenderable = Vec::new();

    for declared in &billstatus.text_versions {
        let (Some(url), Some(file_name)) = (declared.url.as_deref(), declared.file_name()) else {
            continue;
        };

        let Some(tv) = index.lookup(file_name)? else {
            warn!(legis_id = %legis_id, url, "declared text version not found");
            missing.push(url);
            continue;
        };

        match UnifiedTextVersion::merge(tv, declared.date, declared.version_type.clone(), url) {
            Ok(merged) => text_versions.push(merged),
            Err(e) => {
                warn!(
                    legis_id = %legis_id,
                    path = %tv.scrape_path,
                    error = %e,
                    "skipping unrenderable text version"
                );
                unrenderable.push(tv.text_id.as_str());
            }
        }
    }

    sort_latest_first(&mut text_versions);

    for url in missing {
        *report.missing.entry(url.to_string()).or_insert(0) += 1;
    }
    for text_id in unrenderable {
        *report.unrenderable.entry(text_id.to_string()).or_insert(0) += 1;
    }

    report.bills += 1;
    report.matched += text_versions.len();
    if text_versions.is_empty() {
        report.bills_without_text += 1;
    }
    debug!(legis_id = %legis_id, versions = text_versions.len(), "unified bill");

    Ok(UnifiedBill {
        congress_num: billstatus.congress,
        legis_type: billstatus.bill_type.to_lowercase(),
        legis_num: billstatus.number,
        latest_text_id: text_versions.first().map(|tv| tv.text_id.clone()),
        legis_id,
        billstatus: billstatus.clone(),
        text_versions,
    })
}

/// Order by declared date, most recent first. Undated versions go last;
/// ties keep their declared order.
pub fn sort_latest_first(text_versions: &mut [UnifiedTextVersion]) {
    text_versions.sort_by(|a, b| {
        let a = a.bs_date.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let b = b.bs_date.unwrap_or(DateTime::<Utc>::MIN_UTC);
        b.cmp(&a)
    });
}

/// Join every bill with the text versions of its congress.
///
/// Every input bill appears exactly once in the output, in input order,
/// whether or not any of its text versions matched. A duplicate `legis_id`
/// or `text_id`, or a join fan-out, stops the join.
pub fn unify_all<'a>(
    billstatuses: impl IntoIterator<Item = &'a BillStatus>,
    text_versions: &[TextVersion],
) -> Result<(Vec<UnifiedBill>, JoinReport)> {
    let billstatuses: Vec<&BillStatus> = billstatuses.into_iter().collect();
    let mut seen = HashSet::new();
    for bs in &billstatuses {
        let legis_id = bs.legis_id();
        if !seen.insert(legis_id.clone()) {
            return Err(HarvesterError::DuplicateKey {
                kind: "legis_id",
                key: legis_id,
            });
        }
    }

    let index = TextVersionIndex::new(text_versions)?;
    let mut report = JoinReport::default();
    let unified = billstatuses
        .into_iter()
        .map(|bs| unify_bill(bs, &index, &mut report))
        .collect::<Result<Vec<_>>>()?;

    Ok((unified, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::parse_text_version_file_name;

    fn text_version(file_name: &str, xml_type: XmlType) -> TextVersion {
        let file = parse_text_version_file_name(file_name).unwrap();
        TextVersion::new(
            &file,
            xml_type,
            format!("data/{file_name}"),
            "2023-01-11T13:31:58Z".parse().unwrap(),
            format!("<bill><legis-body>{file_name}</legis-body></bill>"),
        )
    }

    fn unified(text_id: &str, bs_date: Option<&str>) -> UnifiedTextVersion {
        UnifiedTextVersion {
            text_id: text_id.to_string(),
            legis_id: "114-s-1".to_string(),
            legis_version: "is".to_string(),
            legis_class: LegisClass::Bills,
            xml_type: XmlType::Dtd,
            scrape_path: String::new(),
            file_name: String::new(),
            lastmod: DateTime::<Utc>::MIN_UTC,
            bs_date: bs_date.map(|d| d.parse().unwrap()),
            bs_type: None,
            bs_url: String::new(),
            text: String::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    #[test]
    fn test_index_ignores_uslm() {
        let tvs = vec![
            text_version("BILLS-114s1is.xml", XmlType::Dtd),
            text_version("BILLS-114s1is.xml", XmlType::Uslm),
        ];
        let index = TextVersionIndex::new(&tvs).unwrap();

        assert_eq!(index.len(), 1);
        let found = index.lookup("BILLS-114s1is.xml").unwrap().unwrap();
        assert_eq!(found.text_id, "114-s-1-is-dtd");
        assert!(index.lookup("BILLS-114s1es.xml").unwrap().is_none());
    }

    #[test]
    fn test_index_rejects_duplicate_text_id() {
        let tvs = vec![
            text_version("BILLS-114s1is.xml", XmlType::Dtd),
            text_version("BILLS-114s1is.xml", XmlType::Dtd),
        ];
        let err = TextVersionIndex::new(&tvs).unwrap_err();
        assert!(matches!(err, HarvesterError::DuplicateKey { kind: "text_id", .. }));
    }

    #[test]
    fn test_lookup_fan_out() {
        // Same file name under two scrape paths with distinct ids.
        let mut a = text_version("BILLS-114s1is.xml", XmlType::Dtd);
        let mut b = a.clone();
        a.text_id = "a".to_string();
        b.text_id = "b".to_string();
        let tvs = vec![a, b];
        let index = TextVersionIndex::new(&tvs).unwrap();

        let err = index.lookup("BILLS-114s1is.xml").unwrap_err();
        assert!(matches!(err, HarvesterError::JoinFanOut { matches: 2, .. }));
    }

    #[test]
    fn test_sort_latest_first_nulls_last() {
        let mut versions = vec![
            unified("undated-1", None),
            unified("old", Some("2015-01-06T05:00:00Z")),
            unified("new", Some("2015-03-02T05:00:00Z")),
            unified("undated-2", None),
            unified("mid", Some("2015-02-01T05:00:00Z")),
        ];
        sort_latest_first(&mut versions);

        let order: Vec<_> = versions.iter().map(|v| v.text_id.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old", "undated-1", "undated-2"]);
        // Stored dates stay null.
        assert_eq!(versions[3].bs_date, None);
    }

    #[test]
    fn test_join_report_merge() {
        let mut a = JoinReport {
            bills: 1,
            bills_without_text: 1,
            matched: 0,
            missing: BTreeMap::from([("u1".to_string(), 1)]),
            unrenderable: BTreeMap::new(),
        };
        let b = JoinReport {
            bills: 2,
            bills_without_text: 0,
            matched: 3,
            missing: BTreeMap::from([("u1".to_string(), 1), ("u2".to_string(), 2)]),
            unrenderable: BTreeMap::from([("114-s-1-is-dtd".to_string(), 1)]),
        };
        a.merge(b);

        assert_eq!(a.bills, 3);
        assert_eq!(a.matched, 3);
        assert_eq!(a.missing_total(), 4);
        assert_eq!(a.missing.get("u1"), Some(&2));
        assert_eq!(a.unrenderable_total(), 1);
    }
}
