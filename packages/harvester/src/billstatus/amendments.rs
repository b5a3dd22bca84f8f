//! Amendments offered to a bill, with their own actions and votes.

use chrono::{DateTime, NaiveDate, Utc};
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::actions::SourceSystem;
use super::fields::{
    optional_datetime, optional_text, optional_u32, required_date, required_datetime,
    required_text, required_u32,
};
use super::notes::Link;
use super::people::Sponsor;
use crate::error::Result;
use crate::xml::{expect_tag, find_child, items, node_path};

/// The bill an amendment amends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendedBill {
    pub congress: u32,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub origin_chamber: String,
    pub origin_chamber_code: Option<String>,
    pub number: u32,
    pub title: String,
    pub update_date_including_text: Option<DateTime<Utc>>,
}

impl AmendedBill {
    /// Parse an optional `<amendedBill>` element.
    pub fn from_node(node: Option<Node<'_, '_>>) -> Result<Option<Self>> {
        let Some(node) = node else {
            return Ok(None);
        };
        expect_tag(node, "amendedBill");
        Ok(Some(Self {
            congress: required_u32(node, "congress")?,
            bill_type: required_text(node, "type")?,
            origin_chamber: required_text(node, "originChamber")?,
            origin_chamber_code: optional_text(node, "originChamberCode"),
            number: required_u32(node, "number")?,
            title: required_text(node, "title")?,
            update_date_including_text: optional_datetime(node, "updateDateIncludingText")?,
        }))
    }
}

/// Roll-call vote recorded on an amendment action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedVote {
    pub roll_number: u32,
    pub chamber: String,
    pub congress: u32,
    pub date: DateTime<Utc>,
    pub session_number: u32,
    pub url: Option<String>,
}

impl RecordedVote {
    /// Parse a `<recordedVotes>` container of `<recordedVote>` elements.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "recordedVotes", "recordedVote")
            .map(|item| {
                Ok(Self {
                    roll_number: required_u32(item, "rollNumber")?,
                    chamber: required_text(item, "chamber")?,
                    congress: required_u32(item, "congress")?,
                    date: required_datetime(item, "date")?,
                    session_number: required_u32(item, "sessionNumber")?,
                    url: optional_text(item, "url"),
                })
            })
            .collect()
    }
}

/// Action taken on an amendment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendmentAction {
    pub action_date: NaiveDate,
    pub text: Option<String>,
    pub action_time: Option<String>,
    pub links: Vec<Link>,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub action_code: Option<String>,
    pub source_system: Option<SourceSystem>,
    pub recorded_votes: Vec<RecordedVote>,
}

impl AmendmentAction {
    /// Parse an amendment's optional `<latestAction>`.
    ///
    /// The latest action only carries date, time, text and links.
    pub fn from_latest_action(node: Option<Node<'_, '_>>) -> Result<Option<Self>> {
        let Some(node) = node else {
            return Ok(None);
        };
        expect_tag(node, "latestAction");
        Ok(Some(Self {
            action_date: required_date(node, "actionDate")?,
            text: optional_text(node, "text"),
            action_time: optional_text(node, "actionTime"),
            links: Link::list_from_node(find_child(node, "links"))?,
            action_type: None,
            action_code: None,
            source_system: None,
            recorded_votes: Vec::new(),
        }))
    }

    /// Parse an amendment's `<actions>` wrapper.
    ///
    /// Unlike the bill-level list, the wrapper holds a `<count>` and a nested
    /// `<actions>` element with the items, so this descends one extra level.
    pub fn list_from_node(wrapper: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        let Some(wrapper) = wrapper else {
            return Ok(Vec::new());
        };
        expect_tag(wrapper, "actions");
        let declared = optional_u32(wrapper, "count")?;

        let actions = items(find_child(wrapper, "actions"), "actions", "item")
            .map(|item| {
                Ok(Self {
                    action_date: required_date(item, "actionDate")?,
                    text: optional_text(item, "text"),
                    action_time: optional_text(item, "actionTime"),
                    links: Link::list_from_node(find_child(item, "links"))?,
                    action_type: optional_text(item, "type"),
                    action_code: optional_text(item, "actionCode"),
                    source_system: SourceSystem::from_node(find_child(item, "sourceSystem"))?,
                    recorded_votes: RecordedVote::list_from_node(find_child(
                        item,
                        "recordedVotes",
                    ))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(declared) = declared {
            if declared as usize != actions.len() {
                debug!(
                    path = %node_path(wrapper),
                    declared,
                    found = actions.len(),
                    "amendment action count differs from listed actions"
                );
            }
        }

        Ok(actions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amendment {
    pub number: u32,
    pub congress: u32,
    /// Amendment type (e.g., "SAMDT", "HAMDT").
    #[serde(rename = "type")]
    pub amendment_type: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub update_date: DateTime<Utc>,
    pub latest_action: Option<AmendmentAction>,
    pub sponsors: Vec<Sponsor>,
    pub submitted_date: DateTime<Utc>,
    pub chamber: String,
    pub amended_bill: Option<AmendedBill>,
    pub links: Vec<Link>,
    pub actions: Vec<AmendmentAction>,
}

impl Amendment {
    /// Parse an `<amendments>` container of `<amendment>` elements.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "amendments", "amendment")
            .map(|item| {
                Ok(Self {
                    number: required_u32(item, "number")?,
                    congress: required_u32(item, "congress")?,
                    amendment_type: required_text(item, "type")?,
                    description: optional_text(item, "description"),
                    purpose: optional_text(item, "purpose"),
                    update_date: required_datetime(item, "updateDate")?,
                    latest_action: AmendmentAction::from_latest_action(find_child(
                        item,
                        "latestAction",
                    ))?,
                    sponsors: Sponsor::list_from_node(find_child(item, "sponsors"))?,
                    submitted_date: required_datetime(item, "submittedDate")?,
                    chamber: required_text(item, "chamber")?,
                    amended_bill: AmendedBill::from_node(find_child(item, "amendedBill"))?,
                    links: Link::list_from_node(find_child(item, "links"))?,
                    actions: AmendmentAction::list_from_node(find_child(item, "actions"))?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const AMENDMENTS: &str = r#"<amendments>
      <amendment>
        <number>2</number>
        <congress>114</congress>
        <type>SAMDT</type>
        <purpose>To provide for the approval of the Keystone XL Pipeline.</purpose>
        <updateDate>2022-02-03T04:22:27Z</updateDate>
        <latestAction>
          <actionDate>2015-01-29</actionDate>
          <text>Amendment SA 2 agreed to in Senate by Yea-Nay Vote. 62 - 36.</text>
          <links>
            <link>
              <name>Record Vote Number: 49</name>
              <url>https://www.senate.gov/legislative/LIS/roll_call_votes/vote1141/vote_114_1_00049.xml</url>
            </link>
          </links>
        </latestAction>
        <sponsors>
          <item>
            <name>Rules Committee</name>
          </item>
          <item>
            <bioguideId>M000934</bioguideId>
            <fullName>Sen. Moran, Jerry [R-KS]</fullName>
            <firstName>Jerry</firstName>
            <lastName>Moran</lastName>
            <party>R</party>
            <state>KS</state>
          </item>
        </sponsors>
        <submittedDate>2015-01-13T05:00:00Z</submittedDate>
        <chamber>Senate</chamber>
        <amendedBill>
          <congress>114</congress>
          <type>S</type>
          <originChamber>Senate</originChamber>
          <originChamberCode>S</originChamberCode>
          <number>1</number>
          <title>Keystone XL Pipeline Approval Act</title>
          <updateDateIncludingText>2022-09-29T03:27:05Z</updateDateIncludingText>
        </amendedBill>
        <actions>
          <count>2</count>
          <actions>
            <item>
              <actionDate>2015-01-29</actionDate>
              <actionTime>15:00:00</actionTime>
              <text>Amendment SA 2 agreed to in Senate by Yea-Nay Vote. 62 - 36.</text>
              <type>Floor</type>
              <actionCode>97000</actionCode>
              <recordedVotes>
                <recordedVote>
                  <rollNumber>49</rollNumber>
                  <chamber>Senate</chamber>
                  <congress>114</congress>
                  <date>2015-01-29T20:13:19Z</date>
                  <sessionNumber>1</sessionNumber>
                  <url>https://www.senate.gov/legislative/LIS/roll_call_votes/vote1141/vote_114_1_00049.xml</url>
                </recordedVote>
              </recordedVotes>
              <sourceSystem>
                <name>Senate</name>
              </sourceSystem>
            </item>
            <item>
              <actionDate>2015-01-13</actionDate>
              <text>Amendment SA 2 proposed by Senator Moran.</text>
            </item>
          </actions>
        </actions>
      </amendment>
    </amendments>"#;

    #[test]
    fn test_amendment_full() {
        let doc = Document::parse(AMENDMENTS).unwrap();
        let amendments = Amendment::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(amendments.len(), 1);
        let amendment = &amendments[0];
        assert_eq!(amendment.number, 2);
        assert_eq!(amendment.amendment_type, "SAMDT");
        assert_eq!(amendment.description, None);
        assert_eq!(amendment.chamber, "Senate");

        // The "Rules Committee" sponsor is skipped.
        assert_eq!(amendment.sponsors.len(), 1);
        assert_eq!(amendment.sponsors[0].bioguide_id, "M000934");

        let latest = amendment.latest_action.as_ref().unwrap();
        assert_eq!(latest.action_date.to_string(), "2015-01-29");
        assert_eq!(latest.links.len(), 1);
        assert!(latest.recorded_votes.is_empty());

        let amended = amendment.amended_bill.as_ref().unwrap();
        assert_eq!(amended.number, 1);
        assert_eq!(amended.bill_type, "S");
    }

    #[test]
    fn test_amendment_actions_descend_into_nested_list() {
        let doc = Document::parse(AMENDMENTS).unwrap();
        let amendments = Amendment::list_from_node(Some(doc.root_element())).unwrap();
        let actions = &amendments[0].actions;

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].action_time.as_deref(), Some("15:00:00"));
        assert_eq!(actions[0].recorded_votes.len(), 1);
        assert_eq!(actions[0].recorded_votes[0].roll_number, 49);
        assert_eq!(
            actions[0].source_system.as_ref().map(|s| s.name.as_str()),
            Some("Senate")
        );
        assert_eq!(actions[1].action_type, None);
    }

    #[test]
    fn test_amendment_actions_without_inner_list() {
        let xml = r#"<actions><count>0</count></actions>"#;
        let doc = Document::parse(xml).unwrap();
        let actions = AmendmentAction::list_from_node(Some(doc.root_element())).unwrap();
        assert!(actions.is_empty());
    }
}
