use quiz_core::ScoreTone;
use quiz_core::model::Category;
use services::LoadError;
use services::session::{AnswerReveal, CurrentQuestion, QuizResult};

use crate::icons::CategoryIcon;

pub fn category_row(position: usize, category: &Category) -> String {
    let icon = CategoryIcon::for_title(category.title());
    format!(
        "{position}. {} {}\n   {}",
        icon.glyph(),
        category.title(),
        category.description()
    )
}

pub fn question(current: &CurrentQuestion<'_>) -> String {
    let mut out = format!(
        "\nQuestion {} of {}\n{}\n",
        current.index + 1,
        current.total,
        current.question.text()
    );
    for (index, option) in current.question.options().iter().enumerate() {
        let mark = if current.selection == Some(index) { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}. {option}\n", index + 1));
    }
    out
}

pub fn reveal(reveal: &AnswerReveal<'_>) -> String {
    let mut out = format!("Correct Answer: {}\n", reveal.correct_option());
    if reveal.is_correct() {
        out.push_str("+1\n");
    } else {
        let chosen = reveal.chosen_option().unwrap_or("No Answer");
        out.push_str(&format!("Your Answer: {chosen}\n"));
    }
    out
}

fn tone_marker(tone: ScoreTone) -> &'static str {
    match tone {
        ScoreTone::Success => "***",
        ScoreTone::Info => "**",
        ScoreTone::Caution => "*",
        ScoreTone::Alert => "!!",
        ScoreTone::Neutral => "--",
    }
}

pub fn result(result: &QuizResult) -> String {
    let band = result.band();
    format!(
        "\n{} {}\n{result}\n",
        tone_marker(band.tone()),
        band.headline()
    )
}

pub fn load_error(err: &LoadError) -> String {
    if err.is_retryable() {
        format!("Error: {err}. Check your connection and try again.")
    } else {
        format!("Error: {err}")
    }
}
