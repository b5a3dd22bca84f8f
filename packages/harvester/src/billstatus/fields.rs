//! Required/optional field extraction with explicit type coercion.
//!
//! Absent optional fields become `None`; absent required fields become
//! [`HarvesterError::MissingElement`]; text that cannot be coerced becomes
//! [`HarvesterError::InvalidValue`].

use chrono::{DateTime, NaiveDate, Utc};
use roxmltree::Node;

use crate::dates::{parse_date, parse_datetime};
use crate::error::{HarvesterError, Result};
use crate::xml::{find_child, node_path, text_or_none};

pub(crate) fn missing(node: Node<'_, '_>, tag: &str) -> HarvesterError {
    HarvesterError::MissingElement {
        element: tag.to_string(),
        context: node_path(node),
    }
}

fn invalid(node: Node<'_, '_>, tag: &str, value: &str, expected: &'static str) -> HarvesterError {
    HarvesterError::InvalidValue {
        element: tag.to_string(),
        context: node_path(node),
        value: value.to_string(),
        expected,
    }
}

pub(crate) fn optional_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    text_or_none(find_child(node, tag)).map(str::to_string)
}

pub(crate) fn required_text(node: Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| missing(node, tag))
}

pub(crate) fn coerce_u32(node: Node<'_, '_>, tag: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(node, tag, value, "an unsigned integer"))
}

pub(crate) fn required_u32(node: Node<'_, '_>, tag: &str) -> Result<u32> {
    let value = required_text(node, tag)?;
    coerce_u32(node, tag, &value)
}

pub(crate) fn optional_u32(node: Node<'_, '_>, tag: &str) -> Result<Option<u32>> {
    optional_text(node, tag)
        .map(|value| coerce_u32(node, tag, &value))
        .transpose()
}

pub(crate) fn required_bool(node: Node<'_, '_>, tag: &str) -> Result<bool> {
    let value = required_text(node, tag)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(invalid(node, tag, &value, "a boolean")),
    }
}

pub(crate) fn required_date(node: Node<'_, '_>, tag: &str) -> Result<NaiveDate> {
    let value = required_text(node, tag)?;
    parse_date(&value).ok_or_else(|| invalid(node, tag, &value, "a date"))
}

pub(crate) fn required_datetime(node: Node<'_, '_>, tag: &str) -> Result<DateTime<Utc>> {
    let value = required_text(node, tag)?;
    parse_datetime(&value).ok_or_else(|| invalid(node, tag, &value, "a timestamp"))
}

pub(crate) fn optional_datetime(node: Node<'_, '_>, tag: &str) -> Result<Option<DateTime<Utc>>> {
    optional_text(node, tag)
        .map(|value| parse_datetime(&value).ok_or_else(|| invalid(node, tag, &value, "a timestamp")))
        .transpose()
}
