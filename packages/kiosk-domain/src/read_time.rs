// Average reading speed of ~225 words per minute, assuming ~6 characters
// per word including the trailing space.
const CHARS_PER_WORD: f64 = 6.0;
const WORDS_PER_MINUTE: f64 = 225.0;

pub fn estimate_read_time(content_chars: usize) -> String {
	let words = content_chars as f64 / CHARS_PER_WORD;
	let minutes = (words / WORDS_PER_MINUTE).round() as u64;
	let minutes = minutes.max(1);

	format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_content_reads_in_one_minute() {
		assert_eq!(estimate_read_time(0), "1 min read");
		assert_eq!(estimate_read_time(500), "1 min read");
	}

	#[test]
	fn long_content_scales_with_length() {
		// 27_000 chars ~ 4_500 words ~ 20 minutes.
		assert_eq!(estimate_read_time(27_000), "20 min read");
	}
}
