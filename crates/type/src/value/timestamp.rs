// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Emberwire

use std::{
	fmt::{Display, Formatter},
	time::{SystemTime, UNIX_EPOCH},
};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

/// A calendar date combined with a time of day, millisecond precision.
///
/// The month is 0-based (January = 0), matching the host value convention
/// of the wire protocol this type is marshaled from; the wire itself
/// carries 1-based months and the codecs convert at the boundary.
///
/// Sub-millisecond precision does not exist here: the wire's
/// ten-thousandths-of-a-second fractions are truncated to milliseconds on
/// decode and widened back on encode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
	year: i32,
	month0: u32,
	day: u32,
	hour: u32,
	minute: u32,
	second: u32,
	millisecond: u32,
}

// Calendar utilities
impl Timestamp {
	/// Check if a year is a leap year
	#[inline]
	fn is_leap_year(year: i32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	/// Get the number of days in a month (0-based month)
	#[inline]
	fn days_in_month(year: i32, month0: u32) -> u32 {
		match month0 {
			0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
			3 | 5 | 8 | 10 => 30,
			1 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	/// Convert year/month0/day to days since Unix epoch
	fn ymd_to_days_since_epoch(year: i32, month0: u32, day: u32) -> Option<i64> {
		if month0 > 11 || day < 1 || day > Self::days_in_month(year, month0) {
			return None;
		}
		let month = month0 + 1;

		// Algorithm based on Howard Hinnant's date algorithms
		let (y, m) = if month <= 2 {
			(year - 1, month as i32 + 9)
		} else {
			(year, month as i32 - 3)
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400; // [0, 399]
		let doy = (153 * m + 2) / 5 + day as i32 - 1; // [0, 365]
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]

		Some(era as i64 * 146097 + doe as i64 - 719468)
	}

	/// Convert days since Unix epoch to year/month0/day
	fn days_since_epoch_to_ymd(days: i64) -> (i32, u32, u32) {
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097; // [0, 146096]
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
		let mp = (5 * doy + 2) / 153; // [0, 11]
		let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		}; // [1, 12]
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year as i32, m as u32 - 1, d as u32)
	}
}

impl Timestamp {
	pub fn new(year: i32, month0: u32, day: u32, hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
		if month0 > 11 || day < 1 || day > Self::days_in_month(year, month0) {
			return None;
		}
		if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
			return None;
		}
		Some(Self {
			year,
			month0,
			day,
			hour,
			minute,
			second,
			millisecond,
		})
	}

	/// Midnight at the given calendar date.
	pub fn from_ymd(year: i32, month0: u32, day: u32) -> Option<Self> {
		Self::new(year, month0, day, 0, 0, 0, 0)
	}

	/// Midnight at the current calendar date.
	pub fn today() -> Self {
		let duration = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
		let days = (duration.as_secs() / 86400) as i64;
		let (year, month0, day) = Self::days_since_epoch_to_ymd(days);
		Self {
			year,
			month0,
			day,
			hour: 0,
			minute: 0,
			second: 0,
			millisecond: 0,
		}
	}

	/// The given time of day, anchored to the current calendar date.
	pub fn today_at(hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
		let today = Self::today();
		Self::new(today.year, today.month0, today.day, hour, minute, second, millisecond)
	}

	pub fn year(&self) -> i32 {
		self.year
	}

	/// 0-based month (January = 0).
	pub fn month0(&self) -> u32 {
		self.month0
	}

	pub fn day(&self) -> u32 {
		self.day
	}

	pub fn hour(&self) -> u32 {
		self.hour
	}

	pub fn minute(&self) -> u32 {
		self.minute
	}

	pub fn second(&self) -> u32 {
		self.second
	}

	pub fn millisecond(&self) -> u32 {
		self.millisecond
	}

	/// Days between this date and the Unix epoch. The clock part is ignored.
	pub fn to_days_since_epoch(&self) -> i64 {
		// Fields were validated on construction.
		Self::ymd_to_days_since_epoch(self.year, self.month0, self.day).unwrap_or_default()
	}

	/// Midnight at the date `days` after the Unix epoch.
	pub fn from_days_since_epoch(days: i64) -> Option<Self> {
		if !(-365_250_000..=365_250_000).contains(&days) {
			return None;
		}
		let (year, month0, day) = Self::days_since_epoch_to_ymd(days);
		Self::from_ymd(year, month0, day)
	}
}

impl Default for Timestamp {
	fn default() -> Self {
		// 1970-01-01 00:00:00.000
		Self {
			year: 1970,
			month0: 0,
			day: 1,
			hour: 0,
			minute: 0,
			second: 0,
			millisecond: 0,
		}
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.year < 0 {
			write!(f, "-{:04}", -self.year)?;
		} else {
			write!(f, "{:04}", self.year)?;
		}
		write!(
			f,
			"-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
			self.month0 + 1,
			self.day,
			self.hour,
			self.minute,
			self.second,
			self.millisecond
		)
	}
}

// Serde implementation for "YYYY-MM-DD HH:MM:SS.mmm"
impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
	type Value = Timestamp;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a timestamp in YYYY-MM-DD HH:MM:SS.mmm format")
	}

	fn visit_str<E>(self, value: &str) -> Result<Timestamp, E>
	where
		E: de::Error,
	{
		let bad = || E::custom(format!("invalid timestamp: {}", value));

		let (date_str, time_str) = value.split_once(' ').ok_or_else(bad)?;

		let (negative, date_str) = match date_str.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, date_str),
		};
		let date_parts: Vec<&str> = date_str.split('-').collect();
		if date_parts.len() != 3 {
			return Err(bad());
		}
		let mut year = date_parts[0].parse::<i32>().map_err(|_| bad())?;
		if negative {
			year = -year;
		}
		let month = date_parts[1].parse::<u32>().map_err(|_| bad())?;
		let day = date_parts[2].parse::<u32>().map_err(|_| bad())?;
		if month < 1 {
			return Err(bad());
		}

		let time_parts: Vec<&str> = time_str.split(':').collect();
		if time_parts.len() != 3 {
			return Err(bad());
		}
		let hour = time_parts[0].parse::<u32>().map_err(|_| bad())?;
		let minute = time_parts[1].parse::<u32>().map_err(|_| bad())?;
		let (second_str, milli_str) = match time_parts[2].split_once('.') {
			Some((s, ms)) => (s, ms),
			None => (time_parts[2], "0"),
		};
		let second = second_str.parse::<u32>().map_err(|_| bad())?;
		let millisecond = milli_str.parse::<u32>().map_err(|_| bad())?;

		Timestamp::new(year, month - 1, day, hour, minute, second, millisecond).ok_or_else(bad)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TimestampVisitor)
	}
}
