//! Plain-text board and feedback rendering.

use tagdrop_core::grading::{GradeResult, Mark};
use tagdrop_core::session::{Phase, QuizSession};

/// Banner shown when every tag is placed correctly.
pub const CELEBRATION: &str = "*** All tags placed correctly! ***";

/// Render the current board: question, pool, and answer area.
pub fn render_board(session: &QuizSession) -> String {
    let mut out = String::new();

    match session.phase() {
        Phase::Loading => out.push_str("(loading tag data...)\n"),
        Phase::Failed => match session.load_error() {
            Some(err) => out.push_str(&format!("(load failed: {err})\n")),
            None => out.push_str("(no tag data loaded)\n"),
        },
        Phase::Ready | Phase::Graded => {}
    }

    out.push_str(session.question());
    out.push('\n');
    if let Some(image) = session.image() {
        out.push_str(&format!("[image: {image}]\n"));
    }

    out.push_str("\nTag pool:\n");
    if session.pool().is_empty() {
        out.push_str("  (empty)\n");
    }
    for tag in session.pool() {
        out.push_str(&format!("  [ {} ]\n", tag.label));
    }

    out.push_str("\nAnswer area:\n");
    if session.answer().is_empty() {
        out.push_str("  (drop tags here)\n");
    }
    for tag in session.answer() {
        match session.mark(&tag.label) {
            Some(Mark::Correct) => out.push_str(&format!("  [ {} ] (correct)\n", tag.label)),
            Some(Mark::Incorrect) => out.push_str(&format!("  [ {} ] (incorrect)\n", tag.label)),
            None => out.push_str(&format!("  [ {} ]\n", tag.label)),
        }
    }

    out
}

/// Render per-tag feedback lines for a grading, in placement order.
///
/// Lines take the form `Correct: <label> - <feedback>`.
pub fn render_feedback(result: &GradeResult, session: &QuizSession) -> String {
    let mut out = String::new();

    for tag in session.answer() {
        let Some(mark) = result.outcomes.get(&tag.label) else {
            continue;
        };
        let verdict = match mark {
            Mark::Correct => "Correct",
            Mark::Incorrect => "Incorrect",
        };
        out.push_str(&format!("{verdict}: {} - {}\n", tag.label, tag.feedback));
    }

    if result.outcomes.is_empty() {
        out.push_str("(no tags placed)\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagdrop_core::model::{Quiz, TagRecord};
    use tagdrop_core::state::Area;

    fn record(label: &str, correct: bool, feedback: &str) -> TagRecord {
        TagRecord {
            label: label.into(),
            correct,
            feedback: feedback.into(),
        }
    }

    fn session() -> QuizSession {
        let quiz = Quiz::from_records(
            "art",
            Some("Which big ideas apply?".into()),
            None,
            vec![
                record("good form", true, "The composition is balanced."),
                record("AI", false, "This was painted by hand."),
            ],
        )
        .unwrap();
        QuizSession::seeded(quiz, 3)
    }

    #[test]
    fn board_shows_question_pool_and_placeholder() {
        let session = session();
        let board = render_board(&session);
        assert!(board.contains("Which big ideas apply?"));
        assert!(board.contains("[ good form ]"));
        assert!(board.contains("[ AI ]"));
        assert!(board.contains("(drop tags here)"));
    }

    #[test]
    fn board_shows_marks_after_grading() {
        let mut session = session();
        session.move_tag("good form", Area::Answer).unwrap();
        session.move_tag("AI", Area::Answer).unwrap();
        session.grade().unwrap();

        let board = render_board(&session);
        assert!(board.contains("[ good form ] (correct)"));
        assert!(board.contains("[ AI ] (incorrect)"));
        assert!(board.contains("  (empty)\n"));
    }

    #[test]
    fn board_reports_a_failed_load() {
        let mut session = QuizSession::pending("art", None, None);
        let err = session
            .load_records(vec![record("dup", true, ""), record("dup", true, "")])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let board = render_board(&session);
        assert!(board.contains("(load failed:"));
        assert!(board.contains("duplicate"));
    }

    #[test]
    fn feedback_pairs_verdict_with_tag_feedback() {
        let mut session = session();
        session.move_tag("good form", Area::Answer).unwrap();
        session.move_tag("AI", Area::Answer).unwrap();
        let result = session.grade().unwrap();

        let feedback = render_feedback(&result, &session);
        assert!(feedback.contains("Correct: good form - The composition is balanced."));
        assert!(feedback.contains("Incorrect: AI - This was painted by hand."));
    }

    #[test]
    fn feedback_follows_placement_order() {
        let mut session = session();
        session.move_tag("AI", Area::Answer).unwrap();
        session.move_tag("good form", Area::Answer).unwrap();
        let result = session.grade().unwrap();

        let feedback = render_feedback(&result, &session);
        let ai_at = feedback.find("Incorrect: AI").unwrap();
        let form_at = feedback.find("Correct: good form").unwrap();
        assert!(ai_at < form_at);
    }

    #[test]
    fn empty_grading_says_so() {
        let mut session = session();
        let result = session.grade().unwrap();
        let feedback = render_feedback(&result, &session);
        assert!(feedback.contains("(no tags placed)"));
    }
}
