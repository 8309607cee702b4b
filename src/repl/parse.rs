use super::*;
use chumsky::{error::SimpleReason, prelude::*, text::whitespace};
use itertools::Itertools;

#[derive(Debug, Snafu)]
#[snafu(display("cannot parse '{input}' - {}", self.combine_errors("\n")))]
pub struct ParseError {
    input: String,
    errors: Vec<Simple<char>>,
}

impl ParseError {
    fn combine_errors(&self, separator: &str) -> String {
        self.errors
            .iter()
            .map(|err| {
                let reason = match err.reason() {
                    SimpleReason::Custom(msg) => format!("error {}", msg),
                    SimpleReason::Unexpected => "unexpected input".to_string(),
                    SimpleReason::Unclosed { span, delimiter } => {
                        format!("unclosed delimiter ({}..{}) in {}", span.start, span.end, delimiter)
                    }
                };
                format!("{}:\n   {}", err, reason)
            })
            .join(separator)
    }
}

pub fn parse(input: &str) -> Result<Action, ParseError> {
    program().parse(input.trim()).map_err(|errors| ParseError {
        input: input.to_string(),
        errors,
    })
}

fn program() -> impl Parser<char, Action, Error = Simple<char>> {
    choice((
        action_track(),
        action_edit(),
        keyword("clear", Action::Clear),
        keyword("auto", Action::ToggleAutoRefresh),
        keyword("status", Action::Status),
        keyword("flights", Action::Flights),
        keyword("help", Action::Help),
        keyword("exit", Action::Exit),
        keyword("quit", Action::Exit),
        end().to(Action::None),
    ))
    .then_ignore(end())
}

fn action_track() -> impl Parser<char, Action, Error = Simple<char>> {
    just("track")
        .ignore_then(argument())
        .map(|query| Action::Track { query })
}

fn action_edit() -> impl Parser<char, Action, Error = Simple<char>> {
    just("edit")
        .ignore_then(argument())
        .map(|text| Action::Edit { text })
}

fn keyword(word: &'static str, action: Action) -> impl Parser<char, Action, Error = Simple<char>> {
    just(word).then_ignore(end()).to(action)
}

/// Everything after the command word, kept verbatim. A missing argument is an empty string.
fn argument() -> impl Parser<char, String, Error = Simple<char>> {
    let rest = whitespace()
        .at_least(1)
        .ignore_then(take_until(end()))
        .map(|(chars, _)| chars.into_iter().collect::<String>());

    rest.or(end().to(String::new()))
}
