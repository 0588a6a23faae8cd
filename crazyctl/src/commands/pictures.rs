//! Commands related to [Picture]s
use super::{Session, report_save};
use crate::{
    cli::PictureCommands,
    output::{
        self,
        rows::{PictureRow, PictureRowFull},
    },
    prompt::{TerminalConfirm, prompt_picture},
};
use anyhow::{Result, anyhow};
use libcrazypic::{
    delete::{DeleteDialog, DialogClose},
    list::ListController,
    navigation::NavigationLog,
    picture::Picture,
    resolver::Resolver,
    transport::HttpTransport,
    update::PictureUpdate,
};
use tracing::debug;

/// Handle the `crazyctl pictures` command and its subcommands
pub(crate) async fn handle_command(command: PictureCommands, session: &Session) -> Result<()> {
    let service = session.pictures();
    let mut nav = NavigationLog::new();
    match command {
        PictureCommands::List { page, output } => {
            let mut list = ListController::with_options(service, page.to_query_options()?);
            list.activate().await;
            let pictures = list.items().unwrap_or_default();
            let str = match output.full {
                true => output::format_seq(pictures.iter().map(PictureRowFull::new), output.format)?,
                false => output::format_seq(pictures.iter().map(PictureRow::new), output.format)?,
            };
            println!("{str}");
            Ok(())
        }
        PictureCommands::Show { id, output } => {
            match Resolver::new(service).resolve(Some(id), &mut nav).await? {
                Some(picture) => {
                    let str = output::format_one(PictureRowFull::new(&picture), output.format)?;
                    println!("{str}");
                }
                None => println!("Picture {id} not found"),
            }
            Ok(())
        }
        PictureCommands::Add {
            name,
            url,
            photograph,
            comment,
            votes,
            note,
            contest,
        } => {
            let picture = Resolver::new(service.clone())
                .resolve(None, &mut nav)
                .await?
                .unwrap_or_default();
            let mut ctl = PictureUpdate::new(service, session.contests());
            ctl.activate(picture).await?;
            if name.is_none()
                && url.is_none()
                && photograph.is_none()
                && comment.is_none()
                && votes.is_none()
                && note.is_none()
                && contest.is_none()
            {
                let contests = ctl.contests_shared_collection().to_vec();
                prompt_picture(ctl.form_mut(), &contests)?;
            } else {
                select_contest(&mut ctl, contest, session).await?;
                let form = ctl.form_mut();
                form.name = name;
                form.url = url;
                form.photograph = photograph;
                form.comment = comment;
                form.nb_votes = votes;
                form.note = note;
            }
            report_save(ctl.save(&mut nav).await?, "Added")
        }
        PictureCommands::Modify {
            id,
            name,
            url,
            photograph,
            comment,
            votes,
            note,
            contest,
            no_contest,
            partial,
        } => {
            if partial {
                if no_contest {
                    return Err(anyhow!(
                        "A partial update cannot remove the contest, use a full update instead"
                    ));
                }
                let contest = match contest {
                    Some(cid) => Some(session.contests().find(cid).await?),
                    None => None,
                };
                let changes = Picture {
                    id: Some(id),
                    name: name.unwrap_or_default(),
                    url: url.unwrap_or_default(),
                    photograph,
                    comment,
                    nb_votes: votes,
                    note,
                    contest_id: contest,
                };
                let merged = service.partial_update(&changes).await?;
                println!("Modified picture {}", merged.id.unwrap_or(id));
                return Ok(());
            }

            let Some(picture) = Resolver::new(service.clone())
                .resolve(Some(id), &mut nav)
                .await?
            else {
                println!("Picture {id} not found");
                return Ok(());
            };
            let mut ctl = PictureUpdate::new(service, session.contests());
            ctl.activate(picture).await?;
            if no_contest {
                ctl.select_contest(None)?;
            } else {
                select_contest(&mut ctl, contest, session).await?;
            }
            let form = ctl.form_mut();
            if let Some(name) = name {
                form.name = Some(name);
            }
            if let Some(url) = url {
                form.url = Some(url);
            }
            if photograph.is_some() {
                form.photograph = photograph;
            }
            if comment.is_some() {
                form.comment = comment;
            }
            if votes.is_some() {
                form.nb_votes = votes;
            }
            if note.is_some() {
                form.note = note;
            }
            report_save(ctl.save(&mut nav).await?, "Modified")
        }
        PictureCommands::Remove { id, yes } => {
            let Some(picture) = Resolver::new(service.clone())
                .resolve(Some(id), &mut nav)
                .await?
            else {
                println!("Picture {id} not found");
                return Ok(());
            };
            let mut confirm = TerminalConfirm { assume_yes: yes };
            match DeleteDialog::new(&service, &mut confirm).open(&picture).await {
                DialogClose::Deleted => println!("Removed picture {id}"),
                DialogClose::Dismissed => println!("Picture {id} was not removed"),
            }
            Ok(())
        }
    }
}

/// Select the contest with the given id. Contests that are not part of the options
/// loaded by the edit view are fetched from the server.
async fn select_contest(
    ctl: &mut PictureUpdate<HttpTransport>,
    contest: Option<i64>,
    session: &Session,
) -> Result<()> {
    let Some(cid) = contest else {
        return Ok(());
    };
    if ctl.select_contest(Some(cid)).is_err() {
        debug!(cid, "contest is not among the loaded options");
        ctl.form_mut().contest_id = Some(session.contests().find(cid).await?);
    }
    Ok(())
}
