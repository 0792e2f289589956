use std::fmt;
use std::io::{self, Write};

use quiz_core::model::Category;
use services::session::QuizResult;
use services::{QuizSession, SessionError};
use tokio::io::{AsyncBufRead, Lines};

use crate::render;

#[derive(Debug)]
pub enum PlayError {
    Io(io::Error),
    Session(SessionError),
    InputClosed,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Io(err) => write!(f, "terminal I/O failed: {err}"),
            PlayError::Session(err) => write!(f, "quiz session error: {err}"),
            PlayError::InputClosed => write!(f, "input closed"),
        }
    }
}

impl std::error::Error for PlayError {}

impl From<io::Error> for PlayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<SessionError> for PlayError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

/// Parse a 1-based choice typed by the user into a 0-based index.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=count).contains(choice))
        .map(|choice| choice - 1)
}

async fn next_line<R>(input: &mut Lines<R>) -> Result<String, PlayError>
where
    R: AsyncBufRead + Unpin,
{
    input.next_line().await?.ok_or(PlayError::InputClosed)
}

pub fn list_categories<W: Write>(categories: &[Category], out: &mut W) -> io::Result<()> {
    if categories.is_empty() {
        writeln!(out, "No quizzes available.")?;
    }
    for (position, category) in categories.iter().enumerate() {
        writeln!(out, "{}", render::category_row(position + 1, category))?;
    }
    Ok(())
}

/// Ask the user to pick a category. An empty line quits.
pub async fn choose_category<'a, R, W>(
    categories: &'a [Category],
    input: &mut Lines<R>,
    out: &mut W,
) -> Result<Option<&'a Category>, PlayError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    list_categories(categories, out)?;
    if categories.is_empty() {
        return Ok(None);
    }
    loop {
        write!(out, "Pick a quiz (1-{}, Enter to quit): ", categories.len())?;
        out.flush()?;
        let line = next_line(input).await?;
        if line.trim().is_empty() {
            return Ok(None);
        }
        match parse_choice(&line, categories.len()) {
            Some(index) => return Ok(categories.get(index)),
            None => writeln!(out, "Please enter a number between 1 and {}.", categories.len())?,
        }
    }
}

/// Drive `session` to completion from user input.
pub async fn run_session<R, W>(
    session: &mut QuizSession,
    input: &mut Lines<R>,
    out: &mut W,
) -> Result<QuizResult, PlayError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while !session.is_complete() {
        let current = session.current_question()?;
        let option_count = current.question.option_count();
        write!(out, "{}", render::question(&current))?;

        let choice = loop {
            write!(out, "Your answer (1-{option_count}): ")?;
            out.flush()?;
            let line = next_line(input).await?;
            match parse_choice(&line, option_count) {
                Some(choice) => break choice,
                None => writeln!(out, "Please enter a number between 1 and {option_count}.")?,
            }
        };

        session.select_option(choice)?;
        session.submit()?;
        write!(out, "{}", render::reveal(&session.reveal()?))?;

        write!(out, "Press Enter to continue")?;
        out.flush()?;
        next_line(input).await?;
        session.acknowledge()?;
    }

    let result = session.result()?;
    write!(out, "{}", render::result(&result))?;
    Ok(result)
}
