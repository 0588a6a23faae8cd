//! Interactive prompts for filling in edit forms
use inquire::{Confirm, CustomType, Select, Text, validator::ValueRequiredValidator};
use libcrazypic::{
    contest::{Contest, ContestForm},
    delete,
    picture::PictureForm,
};

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
}

/// Asks for the values of a new contest. The dates already in the form are offered
/// as defaults.
pub(crate) fn prompt_contest(form: &mut ContestForm) -> Result<(), Error> {
    form.name = Some(
        Text::new("Name:")
            .with_validator(ValueRequiredValidator::default())
            .prompt()?,
    );
    form.url = Some(
        Text::new("Url:")
            .with_validator(ValueRequiredValidator::default())
            .prompt()?,
    );
    let start = form.start_date.clone().unwrap_or_default();
    form.start_date = Text::new("Start date (YYYY-MM-DDTHH:MM):")
        .with_default(&start)
        .prompt_skippable()?
        .filter(|s| !s.is_empty());
    let end = form.end_date.clone().unwrap_or_default();
    form.end_date = Text::new("End date (YYYY-MM-DDTHH:MM):")
        .with_default(&end)
        .prompt_skippable()?
        .filter(|s| !s.is_empty());
    form.user_id = CustomType::<i64>::new("User id:").prompt_skippable()?;
    Ok(())
}

struct ContestChoice(Option<Contest>);

impl std::fmt::Display for ContestChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(c) => write!(f, "{}. {}", c.id.unwrap_or_default(), c.name),
            None => write!(f, "No contest"),
        }
    }
}

/// Asks for the values of a new picture. `contests` are the contests the picture can
/// be submitted to.
pub(crate) fn prompt_picture(form: &mut PictureForm, contests: &[Contest]) -> Result<(), Error> {
    form.name = Some(
        Text::new("Name:")
            .with_validator(ValueRequiredValidator::default())
            .prompt()?,
    );
    form.url = Some(
        Text::new("Url:")
            .with_validator(ValueRequiredValidator::default())
            .prompt()?,
    );
    form.photograph = Text::new("Photograph (base64 data or link):")
        .prompt_skippable()?
        .filter(|s| !s.is_empty());
    form.comment = Text::new("Comment:")
        .prompt_skippable()?
        .filter(|s| !s.is_empty());
    form.nb_votes = CustomType::<i32>::new("Number of votes:").prompt_skippable()?;
    form.note = CustomType::<i64>::new("Note:").prompt_skippable()?;
    if !contests.is_empty() {
        let choices = std::iter::once(ContestChoice(None))
            .chain(contests.iter().cloned().map(Some).map(ContestChoice))
            .collect::<Vec<_>>();
        form.contest_id = Select::new("Contest:", choices)
            .prompt_skippable()?
            .and_then(|choice| choice.0);
    }
    Ok(())
}

/// Confirms deletions on the terminal
pub(crate) struct TerminalConfirm {
    pub(crate) assume_yes: bool,
}

impl delete::Confirm for TerminalConfirm {
    fn confirm_delete(&mut self, resource: &str, id: i64) -> bool {
        self.assume_yes
            || Confirm::new(&format!("Are you sure you want to delete {resource} {id}?"))
                .with_default(false)
                .prompt()
                .unwrap_or(false)
    }
}
