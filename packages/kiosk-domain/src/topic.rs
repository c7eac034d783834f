use serde::{Deserialize, Serialize};

/// Closed category set shared with the upstream news providers. Labels the
/// providers send outside this set normalize to [`Topic::Uncategorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
	Business,
	Entertainment,
	General,
	Health,
	Science,
	Sports,
	Technology,
	Uncategorized,
}

impl Topic {
	pub const ALL: [Self; 8] = [
		Self::Business,
		Self::Entertainment,
		Self::General,
		Self::Health,
		Self::Science,
		Self::Sports,
		Self::Technology,
		Self::Uncategorized,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Business => "business",
			Self::Entertainment => "entertainment",
			Self::General => "general",
			Self::Health => "health",
			Self::Science => "science",
			Self::Sports => "sports",
			Self::Technology => "technology",
			Self::Uncategorized => "uncategorized",
		}
	}

	/// Strict, case-insensitive label lookup.
	pub fn from_label(label: &str) -> Option<Self> {
		let label = label.trim();

		Self::ALL.iter().copied().find(|topic| topic.as_str().eq_ignore_ascii_case(label))
	}

	/// Lossy parse; unknown labels become [`Topic::Uncategorized`].
	pub fn parse(label: &str) -> Self {
		Self::from_label(label).unwrap_or(Self::Uncategorized)
	}

	pub fn matches_any(self, interests: &[String]) -> bool {
		interests.iter().any(|interest| self.as_str().eq_ignore_ascii_case(interest.trim()))
	}
}

impl std::fmt::Display for Topic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
