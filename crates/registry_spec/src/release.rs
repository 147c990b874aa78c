//! Release metadata and engine version labels.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Substring of a version label that marks a development snapshot.
pub const DEV_MARKER: &str = "dev";

/// Release metadata as written in the history asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMeta {
	pub version: String,
	pub date: NaiveDate,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_version: Option<String>,
}

/// Resolved release metadata carried by every revision record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
	pub date: NaiveDate,
	pub version: String,
	pub min_version: String,
	pub max_version: String,
	pub is_dev: bool,
}

impl From<ReleaseMeta> for Release {
	fn from(meta: ReleaseMeta) -> Self {
		let is_dev = meta.version.contains(DEV_MARKER);
		let min_version = meta.min_version.unwrap_or_else(|| meta.version.clone());
		let max_version = meta.max_version.unwrap_or_else(|| meta.version.clone());
		Self {
			date: meta.date,
			version: meta.version,
			min_version,
			max_version,
			is_dev,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid engine version label '{0}'")]
pub struct InvalidLabel(pub String);

/// Maturity of a release, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
	Dev(u32),
	Alpha(u32),
	Beta(u32),
	Rc(u32),
	Stable,
}

impl Stage {
	fn parse(s: &str) -> Option<Self> {
		if s.is_empty() || s == "stable" {
			return Some(Self::Stable);
		}
		let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
		let (name, number) = s.split_at(split);
		let number = if number.is_empty() { 0 } else { number.parse().ok()? };
		match name {
			"dev" => Some(Self::Dev(number)),
			"alpha" => Some(Self::Alpha(number)),
			"beta" => Some(Self::Beta(number)),
			"rc" => Some(Self::Rc(number)),
			_ => None,
		}
	}
}

/// A parsed engine version label such as `3.1.1-stable`, `3.2-dev` or `3.1-beta5`.
///
/// A missing patch component is zero and a missing stage is stable, so `3.1`
/// and `3.1.0-stable` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleaseLabel {
	pub major: u32,
	pub minor: u32,
	pub patch: u32,
	pub stage: Stage,
}

impl ReleaseLabel {
	pub fn parse(label: &str) -> Result<Self, InvalidLabel> {
		let invalid = || InvalidLabel(label.to_string());
		let (numbers, stage) = label.split_once('-').unwrap_or((label, ""));
		let mut parts = numbers.split('.').map(str::parse::<u32>);
		let major = parts.next().and_then(Result::ok).ok_or_else(invalid)?;
		let minor = match parts.next() {
			Some(part) => part.map_err(|_| invalid())?,
			None => 0,
		};
		let patch = match parts.next() {
			Some(part) => part.map_err(|_| invalid())?,
			None => 0,
		};
		if parts.next().is_some() {
			return Err(invalid());
		}
		let stage = Stage::parse(stage).ok_or_else(invalid)?;
		Ok(Self {
			major,
			minor,
			patch,
			stage,
		})
	}

	pub fn is_dev(&self) -> bool {
		matches!(self.stage, Stage::Dev(_))
	}
}

impl Ord for ReleaseLabel {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.major, self.minor, self.patch, self.stage).cmp(&(
			other.major,
			other.minor,
			other.patch,
			other.stage,
		))
	}
}

impl PartialOrd for ReleaseLabel {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Display for ReleaseLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}-", self.major, self.minor, self.patch)?;
		match self.stage {
			Stage::Dev(0) => f.write_str("dev"),
			Stage::Dev(n) => write!(f, "dev{n}"),
			Stage::Alpha(n) => write!(f, "alpha{n}"),
			Stage::Beta(n) => write!(f, "beta{n}"),
			Stage::Rc(n) => write!(f, "rc{n}"),
			Stage::Stable => f.write_str("stable"),
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn defaults_range_to_the_version_label() {
		let release = Release::from(ReleaseMeta {
			version: "3.2-dev".into(),
			date: NaiveDate::from_ymd_opt(2019, 7, 20).unwrap(),
			min_version: None,
			max_version: None,
		});
		assert!(release.is_dev);
		assert_eq!(release.min_version, "3.2-dev");
		assert_eq!(release.max_version, "3.2-dev");
	}

	#[test]
	fn explicit_range_overrides_the_label() {
		let release = Release::from(ReleaseMeta {
			version: "3.0.0-stable".into(),
			date: NaiveDate::from_ymd_opt(2017, 11, 20).unwrap(),
			min_version: Some("3.0.0-stable".into()),
			max_version: Some("3.0.6-stable".into()),
		});
		assert!(!release.is_dev);
		assert_eq!(release.min_version, "3.0.0-stable");
		assert_eq!(release.max_version, "3.0.6-stable");
	}

	#[rstest]
	#[case("3.1", "3.1.0-stable", Ordering::Equal)]
	#[case("3.1-dev", "3.1.0-stable", Ordering::Less)]
	#[case("3.1-beta5", "3.1-dev", Ordering::Greater)]
	#[case("3.1-beta5", "3.1-rc1", Ordering::Less)]
	#[case("2.1.6-stable", "3.0-dev", Ordering::Less)]
	#[case("3.0.6", "3.0.0-stable", Ordering::Greater)]
	fn orders_labels(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
		let a = ReleaseLabel::parse(a).unwrap();
		let b = ReleaseLabel::parse(b).unwrap();
		assert_eq!(a.cmp(&b), expected);
	}

	#[rstest]
	#[case("")]
	#[case("three")]
	#[case("3.x")]
	#[case("3.1.2.4")]
	#[case("3.1-nightly")]
	fn rejects_malformed_labels(#[case] label: &str) {
		assert!(ReleaseLabel::parse(label).is_err());
	}
}
