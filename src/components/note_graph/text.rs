//! Label layout helpers.
//!
//! Measurement is injected so the canvas `measure_text` stays at the call
//! site and these stay testable off-browser.

/// Shrink `text` to fit `max_width` by dropping trailing characters and
/// appending an ellipsis. Returns an empty string if not even "…" fits.
pub fn truncate_to_width(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
	if measure(text) <= max_width {
		return text.to_string();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let mut candidate: String = chars.iter().collect();
		candidate.push('…');
		if measure(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}

/// Greedy line-fill word wrap: append each word; when a line would overflow
/// `max_width`, flush it and start the next line with that word.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in text.split_whitespace() {
		if line.is_empty() {
			line = word.to_string();
			continue;
		}
		let candidate = format!("{line} {word}");
		if measure(&candidate) > max_width {
			lines.push(std::mem::take(&mut line));
			line = word.to_string();
		} else {
			line = candidate;
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}
