//! Heuristic question-card parser for finished papers.
//!
//! This is a display aid, not a LaTeX parser: it finds question headings with
//! the patterns from [`crate::headings`], cuts the body between consecutive
//! headings, and pairs each question with its answer-key entry.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::headings::{question_headings, QUESTION_HEADINGS};

/// One question card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedQuestion {
    pub number: u32,
    pub question: String,
    pub solution: String,
}

lazy_static! {
    static ref ANSWER_KEY_SECTION: Regex =
        Regex::new(r"\\section\*?\{\s*ANSWER KEY[^}]*\}").unwrap();
    static ref ANSWER_HEADING: Regex =
        Regex::new(r"\\subsection\*?\{\s*Answer\s+(\d+)\s*\}").unwrap();
    static ref INLINE_SOLUTION: Regex = Regex::new(
        r"(?is)%[ \t]*START[ \t]+SOLUTION[^\n]*\n?(.*?)%[ \t]*END[ \t]+SOLUTION[^\n]*"
    )
    .unwrap();
    static ref TRAILING_NEWPAGE: Regex = Regex::new(r"(?:\\(?:newpage|clearpage)\s*)+$").unwrap();
}

const BEGIN_DOCUMENT: &str = "\\begin{document}";
const END_DOCUMENT: &str = "\\end{document}";

/// Parse a finished paper into question cards.
///
/// Returns an empty list when no heading form is recognised.
pub fn parse_questions(latex: &str) -> Vec<RenderedQuestion> {
    let body = document_body(latex);
    let (questions_part, answers) = split_answer_key(body);

    let Some(headings) = (0..QUESTION_HEADINGS.len())
        .map(|idx| question_headings(questions_part, idx))
        .find(|found| !found.is_empty())
    else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(headings.len());
    for (i, heading) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map_or(questions_part.len(), |next| next.start);
        let chunk = &questions_part[heading.start..end];
        let number = heading
            .number
            .parse::<u32>()
            .unwrap_or_else(|_| u32::try_from(i + 1).unwrap_or(u32::MAX));

        let (question, inline_solution) = take_inline_solution(chunk);
        let solution = inline_solution
            .or_else(|| answers.get(&number).cloned())
            .unwrap_or_default();

        out.push(RenderedQuestion {
            number,
            question: question.trim().to_string(),
            solution,
        });
    }
    out
}

fn document_body(latex: &str) -> &str {
    let start = latex
        .find(BEGIN_DOCUMENT)
        .map_or(0, |i| i + BEGIN_DOCUMENT.len());
    let end = latex[start..]
        .rfind(END_DOCUMENT)
        .map_or(latex.len(), |i| start + i);
    &latex[start..end]
}

fn split_answer_key(body: &str) -> (&str, HashMap<u32, String>) {
    let Some(section) = ANSWER_KEY_SECTION.find(body) else {
        return (body, HashMap::new());
    };

    let questions = TRAILING_NEWPAGE
        .find(body[..section.start()].trim_end())
        .map_or(&body[..section.start()], |m| &body[..m.start()]);
    let key = &body[section.end()..];

    let mut answers = HashMap::new();
    let marks: Vec<_> = ANSWER_HEADING.captures_iter(key).collect();
    for (i, caps) in marks.iter().enumerate() {
        let (Some(whole), Some(num)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = marks
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(key.len(), |m| m.start());
        if let Ok(number) = num.as_str().parse::<u32>() {
            answers
                .entry(number)
                .or_insert_with(|| key[whole.end()..end].trim().to_string());
        }
    }
    (questions, answers)
}

fn take_inline_solution(chunk: &str) -> (String, Option<String>) {
    match INLINE_SOLUTION.captures(chunk) {
        Some(caps) => {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                return (chunk.to_string(), None);
            };
            let mut question = String::with_capacity(chunk.len());
            question.push_str(&chunk[..whole.start()]);
            question.push_str(&chunk[whole.end()..]);
            (question, Some(inner.as_str().trim().to_string()))
        }
        None => (chunk.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_body_strips_preamble() {
        let doc = "\\documentclass{article}\n\\begin{document}\nHi\n\\end{document}\n";
        assert_eq!(document_body(doc).trim(), "Hi");
        assert_eq!(document_body("bare"), "bare");
    }

    #[test]
    fn test_inline_solution_is_detached() {
        let (q, s) = take_inline_solution("Q text\n% START SOLUTION\nx = 1\n% END SOLUTION\n");
        assert_eq!(q.trim(), "Q text");
        assert_eq!(s.as_deref(), Some("x = 1"));
    }
}
