//! Heading patterns for questions and solutions.
//!
//! Question headings carry the question number in a capture group. When
//! several patterns match, the caller decides by position: the sanitizer wants
//! the nearest heading *before* a solution (highest start index), deletion
//! wants the nearest heading *after* one (lowest start index). Ties go to the
//! pattern listed first.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// A question heading form, e.g. `\subsection*{Question 3}`.
#[derive(Debug)]
pub struct HeadingPattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// A solution heading form, e.g. `\textbf{Solution:}`.
#[derive(Debug)]
pub struct SolutionPattern {
    pub name: &'static str,
    pub regex: Regex,
    /// The match already covers the whole solution (marker pairs). Other
    /// patterns only match the heading and run until the next question.
    pub self_terminating: bool,
}

/// A question heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionHeading {
    /// Byte offset where the heading starts.
    pub start: usize,
    /// Byte offset just past the matched heading text.
    pub end: usize,
    /// Question number as written in the heading.
    pub number: String,
    /// Index into [`QUESTION_HEADINGS`].
    pub pattern: usize,
}

fn heading(name: &'static str, pattern: &str) -> HeadingPattern {
    HeadingPattern {
        name,
        regex: Regex::new(pattern).unwrap(),
    }
}

fn solution(name: &'static str, pattern: &str, self_terminating: bool) -> SolutionPattern {
    SolutionPattern {
        name,
        regex: Regex::new(pattern).unwrap(),
        self_terminating,
    }
}

lazy_static! {
    /// Question heading forms in priority order.
    pub static ref QUESTION_HEADINGS: Vec<HeadingPattern> = vec![
        heading("subsection", r"\\subsection\*?\{\s*(?:Question|Q\.?)\s*(\d+)"),
        heading("textbf", r"\\textbf\{\s*(?:Question|Q\.?)\s*(\d+)"),
        heading(
            "noindent-textbf",
            r"\\noindent\s*\\textbf\{\s*(?:Question|Q\.?)\s*(\d+)",
        ),
        heading(
            "item",
            r"\\item\s*\[\s*(?:(?:Question|Q\.?)\s*)?(\d+)[.):]?\s*\]",
        ),
        heading("numbered-textbf", r"\\textbf\{\s*(\d+)\s*[.)]"),
        heading(
            "numbered-noindent",
            r"\\noindent[ \t]*(?:(?:Question|Q\.?)[ \t]*(\d+)|(\d+)[.)])",
        ),
        heading("section", r"\\section\*?\{\s*(?:Question|Q\.?)\s*(\d+)"),
    ];

    /// Solution forms in the order they are removed.
    pub static ref SOLUTION_HEADINGS: Vec<SolutionPattern> = vec![
        solution(
            "markers",
            r"(?is)%[ \t]*START[ \t]+SOLUTION.*?%[ \t]*END[ \t]+SOLUTION[^\n]*",
            true,
        ),
        solution("subsection", r"\\subsection\*?\{\s*Solutions?\b[^}]*\}", false),
        solution(
            "noindent-textbf",
            r"\\noindent\s*\\textbf\{\s*Solutions?\b[^}]*\}",
            false,
        ),
        solution("textbf", r"\\textbf\{\s*Solutions?\b[^}]*\}", false),
        solution("plain", r"(?m)^[ \t]*Solutions?[ \t]*:", false),
    ];
}

fn captured_number(caps: &Captures<'_>) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
}

fn to_heading(caps: &Captures<'_>, pattern: usize) -> Option<QuestionHeading> {
    let whole = caps.get(0)?;
    Some(QuestionHeading {
        start: whole.start(),
        end: whole.end(),
        number: captured_number(caps)?,
        pattern,
    })
}

/// All headings of one pattern, in document order.
pub fn question_headings(text: &str, pattern: usize) -> Vec<QuestionHeading> {
    let Some(p) = QUESTION_HEADINGS.get(pattern) else {
        return Vec::new();
    };
    p.regex
        .captures_iter(text)
        .filter_map(|caps| to_heading(&caps, pattern))
        .collect()
}

/// The heading with the highest start index across all patterns.
pub fn last_question_heading(text: &str) -> Option<QuestionHeading> {
    let mut best: Option<QuestionHeading> = None;
    for (idx, p) in QUESTION_HEADINGS.iter().enumerate() {
        let last = p
            .regex
            .captures_iter(text)
            .filter_map(|caps| to_heading(&caps, idx))
            .last();
        if let Some(found) = last {
            let better = best.as_ref().map_or(true, |b| found.start > b.start);
            if better {
                best = Some(found);
            }
        }
    }
    best
}

/// The first heading starting at or after `from`.
pub fn next_question_heading(text: &str, from: usize) -> Option<QuestionHeading> {
    if from > text.len() || !text.is_char_boundary(from) {
        return None;
    }
    let mut best: Option<QuestionHeading> = None;
    for (idx, p) in QUESTION_HEADINGS.iter().enumerate() {
        let Some(caps) = p.regex.captures_at(text, from) else {
            continue;
        };
        let Some(found) = to_heading(&caps, idx) else {
            continue;
        };
        let better = best.as_ref().map_or(true, |b| found.start < b.start);
        if better {
            best = Some(found);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_heading_wins_by_position() {
        let text = "\\section*{Question 1}\nintro\n\\textbf{Q.2} body\n\\item[3.] more";
        let found = last_question_heading(text).unwrap();
        assert_eq!(found.number, "3");
        assert_eq!(QUESTION_HEADINGS[found.pattern].name, "item");
    }

    #[test]
    fn test_noindent_prefers_textbf_when_searching_backward() {
        let text = "\\noindent\\textbf{Question 4} Find x.";
        let found = last_question_heading(text).unwrap();
        assert_eq!(found.number, "4");
        assert_eq!(QUESTION_HEADINGS[found.pattern].name, "textbf");
    }

    #[test]
    fn test_next_heading_takes_earliest_start() {
        let text = "answer text\n\\noindent\\textbf{Question 5} next";
        let found = next_question_heading(text, 0).unwrap();
        assert_eq!(found.number, "5");
        assert_eq!(found.start, text.find("\\noindent").unwrap());
    }

    #[test]
    fn test_numbered_noindent_forms() {
        let plain = question_headings("\\noindent 7. Explain", 5);
        assert_eq!(plain[0].number, "7");
        let prefixed = question_headings("\\noindent Q.8 Explain", 5);
        assert_eq!(prefixed[0].number, "8");
    }

    #[test]
    fn test_no_heading() {
        assert!(last_question_heading("just some prose").is_none());
        assert!(next_question_heading("just some prose", 0).is_none());
        assert!(question_headings("text", 42).is_empty());
    }

    #[test]
    fn test_solution_patterns_match_expected_forms() {
        let samples = [
            ("markers", "% START SOLUTION\nx\n% END SOLUTION"),
            ("subsection", "\\subsection*{Solution}"),
            ("noindent-textbf", "\\noindent\\textbf{Solution:}"),
            ("textbf", "\\textbf{Solutions to Part A}"),
            ("plain", "  Solution: x = 2"),
        ];
        for (name, sample) in samples {
            let pattern = SOLUTION_HEADINGS.iter().find(|p| p.name == name).unwrap();
            assert!(pattern.regex.is_match(sample), "{} should match {:?}", name, sample);
        }
    }
}
