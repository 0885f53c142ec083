//! Date format translation between PHP `date()` tokens and moment.js tokens
//!
//! Settings store date and time formats in PHP notation; the booking UI renders
//! with moment.js. PHP tokens without a moment counterpart are dropped.
//! Escaped PHP characters (`\x`) become moment literal blocks (`[x]`) and back.

/// PHP token -> moment token. An empty target drops the token.
const PHP_TO_MOMENT: &[(char, &str)] = &[
	// Day
	('d', "DD"),
	('D', "ddd"),
	('j', "D"),
	('l', "dddd"),
	('N', "E"),
	('S', "o"),
	('w', "e"),
	('z', "DDD"),
	// Week
	('W', "W"),
	// Month
	('F', "MMMM"),
	('m', "MM"),
	('M', "MMM"),
	('n', "M"),
	('t', ""),
	// Year
	('L', ""),
	('o', "YYYY"),
	('Y', "YYYY"),
	('y', "YY"),
	// Time
	('a', "a"),
	('A', "A"),
	('B', ""),
	('g', "h"),
	('G', "H"),
	('h', "hh"),
	('H', "HH"),
	('i', "mm"),
	('s', "ss"),
	('u', "SSS"),
	// Timezone
	('e', "zz"),
	('I', ""),
	('O', ""),
	('P', ""),
	('T', ""),
	('Z', ""),
	// Full date/time
	('c', ""),
	('r', ""),
	('U', "X"),
];

/// moment token -> PHP token, longest tokens first
const MOMENT_TO_PHP: &[(&str, &str)] = &[
	("dddd", "l"),
	("MMMM", "F"),
	("YYYY", "Y"),
	("DDD", "z"),
	("ddd", "D"),
	("MMM", "M"),
	("SSS", "u"),
	("DD", "d"),
	("MM", "m"),
	("YY", "y"),
	("hh", "h"),
	("HH", "H"),
	("mm", "i"),
	("ss", "s"),
	("zz", "e"),
	("D", "j"),
	("E", "N"),
	("o", "S"),
	("e", "w"),
	("W", "W"),
	("M", "n"),
	("a", "a"),
	("A", "A"),
	("h", "g"),
	("H", "G"),
	("X", "U"),
];

fn php_token(c: char) -> Option<&'static str> {
	PHP_TO_MOMENT.iter().find(|(php, _)| *php == c).map(|(_, moment)| *moment)
}

fn flush_literal(out: &mut String, literal: &mut String) {
	if !literal.is_empty() {
		out.push('[');
		out.push_str(literal);
		out.push(']');
		literal.clear();
	}
}

/// Translate a PHP date format to moment.js notation
pub fn php_to_moment_format(format: &str) -> String {
	let mut out = String::with_capacity(format.len() * 2);
	let mut literal = String::new();
	let mut chars = format.chars();

	while let Some(c) = chars.next() {
		if c == '\\' {
			if let Some(escaped) = chars.next() {
				literal.push(escaped);
			}
			continue;
		}
		match php_token(c) {
			Some(moment) => {
				flush_literal(&mut out, &mut literal);
				out.push_str(moment);
			}
			// moment would read a bare letter as a token
			None if c.is_ascii_alphabetic() => literal.push(c),
			None => {
				flush_literal(&mut out, &mut literal);
				out.push(c);
			}
		}
	}
	flush_literal(&mut out, &mut literal);
	out
}

fn push_php_literal(out: &mut String, c: char) {
	if c.is_ascii_alphabetic() || c == '\\' {
		out.push('\\');
	}
	out.push(c);
}

/// Translate a moment.js format to PHP date notation
pub fn moment_to_php_format(format: &str) -> String {
	let mut out = String::with_capacity(format.len());
	let mut rest = format;

	'outer: while let Some(c) = rest.chars().next() {
		if c == '[' {
			if let Some(end) = rest.find(']') {
				for lit in rest[1..end].chars() {
					push_php_literal(&mut out, lit);
				}
				rest = &rest[end + 1..];
				continue;
			}
		}

		for (moment, php) in MOMENT_TO_PHP {
			if let Some(tail) = rest.strip_prefix(moment) {
				out.push_str(php);
				rest = tail;
				continue 'outer;
			}
		}

		push_php_literal(&mut out, c);
		rest = &rest[c.len_utf8()..];
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_documented_token_pairs() {
		assert_eq!(php_to_moment_format("Y"), "YYYY");
		assert_eq!(php_to_moment_format("m"), "MM");
		assert_eq!(php_to_moment_format("d"), "DD");
		assert_eq!(php_to_moment_format("Y-m-d"), "YYYY-MM-DD");
	}

	#[test]
	fn test_common_host_formats() {
		assert_eq!(php_to_moment_format("F j, Y"), "MMMM D, YYYY");
		assert_eq!(php_to_moment_format("g:i a"), "h:mm a");
		assert_eq!(php_to_moment_format("H:i"), "HH:mm");
		assert_eq!(php_to_moment_format("d/m/Y"), "DD/MM/YYYY");
		assert_eq!(php_to_moment_format("jS F Y"), "Do MMMM YYYY");
	}

	#[test]
	fn test_unsupported_tokens_are_dropped() {
		assert_eq!(php_to_moment_format("Y-m-d T"), "YYYY-MM-DD ");
		assert_eq!(php_to_moment_format("t"), "");
	}

	#[test]
	fn test_escapes_become_literals() {
		assert_eq!(php_to_moment_format("j \\o\\f F"), "D [of] MMMM");
		assert_eq!(moment_to_php_format("D [of] MMMM"), "j \\o\\f F");
	}

	#[test]
	fn test_moment_to_php() {
		assert_eq!(moment_to_php_format("YYYY-MM-DD"), "Y-m-d");
		assert_eq!(moment_to_php_format("MMMM D, YYYY"), "F j, Y");
		assert_eq!(moment_to_php_format("h:mm a"), "g:i a");
		assert_eq!(moment_to_php_format("Do MMMM YYYY"), "jS F Y");
	}

	#[test]
	fn test_round_trip_is_stable() {
		for format in ["Y-m-d", "F j, Y", "g:i a", "H:i", "D, d M Y", "l jS \\o\\f F Y h:i:s A"] {
			let moment = php_to_moment_format(format);
			assert_eq!(moment_to_php_format(&moment), format, "via {}", moment);
		}
	}
}

// vim: ts=4
