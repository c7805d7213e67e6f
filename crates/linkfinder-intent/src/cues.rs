//! Message cues: the detectors the router's rules are built from.
//!
//! Structured cues (ZIP codes, street addresses, multi-word phrases) are
//! regexes. Plain keyword cues are substring matches over an
//! ASCII-case-insensitive Aho-Corasick automaton, so "compared" counts as
//! "compare" and "availability" does not count as "available".

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::error::{AdvisorError, Result};
use crate::patterns::compile;

/// ASCII digits only: `\d` would also accept full-width and other Unicode
/// digits, which never form a valid ZIP.
const ZIP: &str = r"(?-u:\b)([0-9]{5})(?-u:\b)";

/// A street number, up to four street-name words, a street type, then an
/// optional direction and unit. The street type must end the street part:
/// either a comma and the rest of the line (city, state) follow, or the
/// message ends there.
const ADDRESS: &str = concat!(
    r"(?-u:\b)([0-9]{1,6}\s+(?:[a-z0-9.'-]+\s+){1,4}",
    r"(?:st|street|ave|avenue|rd|road|blvd|boulevard|dr|drive|ln|lane|ct|court",
    r"|way|pl|place|cir|circle|ter|terrace|pkwy|parkway|hwy|highway)\.?",
    r"(?:\s+(?:n|s|e|w|ne|nw|se|sw)\.?)?",
    r"(?:\s+(?:apt|unit|suite|ste|#)\s*[a-z0-9-]+)?",
    r"(?:\s*,.*|[\s?!.]*$))",
);

const ADDRESS_PHRASE: &str =
    r"\b(?:check\s+(?:my\s+|an\s+|this\s+)?address|my\s+address|address\s+(?:lookup|check))\b";

const SPEED_TEST: &str = r"\b(?:speed\s*test|how\s+fast|test\s+my\s+(?:speed|internet|connection))";

const QUIZ: &str = r"\b(?:quiz|help\s+me\s+(?:choose|pick|decide)|which\s+provider)";

const COMPARE: &[&str] = &["compare", "vs", "versus", "difference", "better"];
const INQUIRY: &[&str] = &["about", "tell me", "info", "plans", "pricing", "review", "details"];
const COVERAGE: &[&str] = &["coverage", "available", "statistics", "how many", "percent"];
const RECOMMEND: &[&str] = &["recommend", "suggest", "best", "options", "show me", "providers"];

/// A set of keywords any one of which may appear anywhere in the message.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    automaton: AhoCorasick,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords)
            .map_err(|e| AdvisorError::InvalidPattern {
                pattern: keywords.join("|"),
                reason: e.to_string(),
            })?;
        Ok(Self { automaton })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }
}

/// All compiled cues, built once per router.
#[derive(Debug, Clone)]
pub struct Cues {
    zip: Regex,
    address: Regex,
    address_phrase: Regex,
    speed_test: Regex,
    quiz: Regex,
    pub(crate) compare: KeywordSet,
    pub(crate) inquiry: KeywordSet,
    pub(crate) coverage: KeywordSet,
    pub(crate) recommend: KeywordSet,
}

impl Cues {
    pub fn new() -> Result<Self> {
        Ok(Self {
            zip: compile(ZIP)?,
            address: compile(ADDRESS)?,
            address_phrase: compile(ADDRESS_PHRASE)?,
            speed_test: compile(SPEED_TEST)?,
            quiz: compile(QUIZ)?,
            compare: KeywordSet::new(COMPARE)?,
            inquiry: KeywordSet::new(INQUIRY)?,
            coverage: KeywordSet::new(COVERAGE)?,
            recommend: KeywordSet::new(RECOMMEND)?,
        })
    }

    /// The first bare five-digit number in `text`.
    pub fn zip_code<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.zip
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Address lookup request.
    ///
    /// `None` when the message is not about an address at all,
    /// `Some(None)` for a phrase like "check my address" with no address in
    /// it, `Some(Some(addr))` when a street address was captured.
    pub fn address(&self, text: &str) -> Option<Option<String>> {
        if let Some(m) = self.address.captures(text).and_then(|caps| caps.get(1)) {
            let address = m
                .as_str()
                .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '?' | '!' | '.'));
            return Some(Some(address.to_owned()));
        }
        if self.address_phrase.is_match(text) {
            return Some(None);
        }
        None
    }

    pub fn speed_test(&self, text: &str) -> bool {
        self.speed_test.is_match(text)
    }

    pub fn quiz(&self, text: &str) -> bool {
        self.quiz.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cues() -> Cues {
        Cues::new().unwrap()
    }

    #[test]
    fn zip_requires_exactly_five_bare_digits() {
        let cues = cues();
        assert_eq!(cues.zip_code("I'm in 78701"), Some("78701"));
        assert_eq!(cues.zip_code("zip 78701-1234 please"), Some("78701"));
        assert_eq!(cues.zip_code("call 5125551234"), None);
        assert_eq!(cues.zip_code("1234"), None);
        assert_eq!(cues.zip_code("10001 then 94110"), Some("10001"));
    }

    #[test]
    fn street_address_is_captured_to_end_of_line() {
        let cues = cues();
        assert_eq!(
            cues.address("123 Main St, Austin, TX"),
            Some(Some("123 Main St, Austin, TX".to_owned()))
        );
        assert_eq!(
            cues.address("what can I get at 4500 N Lamar Blvd?"),
            Some(Some("4500 N Lamar Blvd".to_owned()))
        );
    }

    #[test]
    fn address_phrase_without_address() {
        let cues = cues();
        assert_eq!(cues.address("can you check my address"), Some(None));
        assert_eq!(cues.address("best plans for me"), None);
    }

    #[test]
    fn full_street_types_and_units() {
        let cues = cues();
        assert_eq!(
            cues.address("500 Ocean Drive, Miami, FL"),
            Some(Some("500 Ocean Drive, Miami, FL".to_owned()))
        );
        assert_eq!(
            cues.address("what's at 12 Juniper Court"),
            Some(Some("12 Juniper Court".to_owned()))
        );
        assert_eq!(
            cues.address("1600 Pennsylvania Ave NW, Washington, DC"),
            Some(Some("1600 Pennsylvania Ave NW, Washington, DC".to_owned()))
        );
        assert_eq!(
            cues.address("88 Harbor Way Apt 4B, Oakland"),
            Some(Some("88 Harbor Way Apt 4B, Oakland".to_owned()))
        );
    }

    #[test]
    fn numbers_without_street_type_are_not_addresses() {
        let cues = cues();
        assert_eq!(cues.address("I want 300 mbps for 50 dollars"), None);
        assert_eq!(cues.address("1st street"), None);
    }

    #[test]
    fn street_type_mid_sentence_is_not_an_address() {
        let cues = cues();
        assert_eq!(cues.address("I have 2 kids and a dr appointment"), None);
        assert_eq!(cues.address("2 dogs on my street keep barking"), None);
        assert_eq!(cues.address("is 5 way better than 4 for streaming"), None);
    }

    #[test]
    fn zip_ignores_non_ascii_digits() {
        let cues = cues();
        assert_eq!(cues.zip_code("７８７０１ or 78701"), Some("78701"));
        assert_eq!(cues.zip_code("７８７０１"), None);
    }

    #[test]
    fn speed_test_and_quiz_phrases() {
        let cues = cues();
        assert!(cues.speed_test("run a speed test"));
        assert!(cues.speed_test("SpeedTest please"));
        assert!(cues.speed_test("how fast is my wifi"));
        assert!(cues.speed_test("test my connection"));
        assert!(!cues.speed_test("fast internet"));

        assert!(cues.quiz("take the quiz"));
        assert!(cues.quiz("help me pick one"));
        assert!(cues.quiz("Which provider should I get"));
        assert!(!cues.quiz("help me"));
    }

    #[test]
    fn keyword_sets_match_substrings_case_insensitively() {
        let cues = cues();
        assert!(cues.compare.is_match("Compared to Cox"));
        assert!(cues.compare.is_match("spectrum VS att"));
        assert!(cues.inquiry.is_match("Tell me more"));
        assert!(cues.coverage.is_match("what percentage has fiber"));
        assert!(!cues.coverage.is_match("check availability"));
        assert!(cues.recommend.is_match("Show me something"));
        assert!(!cues.recommend.is_match("hello there"));
    }
}
