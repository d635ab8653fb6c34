//! Question and solution heading grammar for generated exam papers.
//!
//! The same heading patterns drive two consumers: the sanitizer, which needs
//! to know where a question starts when it moves or deletes solutions, and the
//! previewer, which splits a finished paper into question cards.

pub mod headings;
pub mod preview;

pub use headings::{
    last_question_heading, next_question_heading, question_headings, HeadingPattern,
    QuestionHeading, SolutionPattern, QUESTION_HEADINGS, SOLUTION_HEADINGS,
};
pub use preview::{parse_questions, RenderedQuestion};
