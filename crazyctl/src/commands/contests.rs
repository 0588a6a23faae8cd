//! Commands related to [Contest]s
use super::{Session, report_save};
use crate::{
    cli::ContestCommands,
    output::{
        self,
        rows::{ContestRow, ContestRowFull},
    },
    prompt::{TerminalConfirm, prompt_contest},
};
use anyhow::Result;
use libcrazypic::{
    contest::Contest,
    datetime::{local_offset, parse_form_datetime},
    delete::{DeleteDialog, DialogClose},
    list::ListController,
    navigation::NavigationLog,
    resolver::Resolver,
    update::ContestUpdate,
};

/// Handle the `crazyctl contests` command and its subcommands
pub(crate) async fn handle_command(command: ContestCommands, session: &Session) -> Result<()> {
    let service = session.contests();
    let mut nav = NavigationLog::new();
    match command {
        ContestCommands::List { page, output } => {
            let mut list = ListController::with_options(service, page.to_query_options()?);
            list.activate().await;
            let contests = list.items().unwrap_or_default();
            let str = match output.full {
                true => output::format_seq(contests.iter().map(ContestRowFull::new), output.format)?,
                false => output::format_seq(contests.iter().map(ContestRow::new), output.format)?,
            };
            println!("{str}");
            Ok(())
        }
        ContestCommands::Show { id, output } => {
            match Resolver::new(service).resolve(Some(id), &mut nav).await? {
                Some(contest) => {
                    let str = output::format_one(ContestRowFull::new(&contest), output.format)?;
                    println!("{str}");
                }
                None => println!("Contest {id} not found"),
            }
            Ok(())
        }
        ContestCommands::Add {
            name,
            url,
            start,
            end,
            user_id,
        } => {
            let contest = Resolver::new(service.clone())
                .resolve(None, &mut nav)
                .await?
                .unwrap_or_default();
            let mut ctl = ContestUpdate::new(service);
            ctl.activate(contest)?;
            if name.is_none() && url.is_none() && start.is_none() && end.is_none() && user_id.is_none()
            {
                prompt_contest(ctl.form_mut())?;
            } else {
                let form = ctl.form_mut();
                form.name = name;
                form.url = url;
                if start.is_some() {
                    form.start_date = start;
                }
                if end.is_some() {
                    form.end_date = end;
                }
                form.user_id = user_id;
            }
            report_save(ctl.save(&mut nav).await?, "Added")
        }
        ContestCommands::Modify {
            id,
            name,
            url,
            start,
            end,
            user_id,
            partial,
        } => {
            if partial {
                let offset = local_offset();
                let parse = |v: Option<String>| -> Result<_> {
                    Ok(match v {
                        Some(s) => parse_form_datetime(&s, offset)?,
                        None => None,
                    })
                };
                let changes = Contest {
                    id: Some(id),
                    name: name.unwrap_or_default(),
                    url: url.unwrap_or_default(),
                    start_date: parse(start)?,
                    end_date: parse(end)?,
                    user_id,
                    pictures: None,
                };
                let merged = service.partial_update(&changes).await?;
                println!("Modified contest {}", merged.id.unwrap_or(id));
                return Ok(());
            }

            let Some(contest) = Resolver::new(service.clone())
                .resolve(Some(id), &mut nav)
                .await?
            else {
                println!("Contest {id} not found");
                return Ok(());
            };
            let mut ctl = ContestUpdate::new(service);
            ctl.activate(contest)?;
            let form = ctl.form_mut();
            if let Some(name) = name {
                form.name = Some(name);
            }
            if let Some(url) = url {
                form.url = Some(url);
            }
            if let Some(start) = start {
                form.start_date = Some(start);
            }
            if let Some(end) = end {
                form.end_date = Some(end);
            }
            if let Some(user_id) = user_id {
                form.user_id = Some(user_id);
            }
            report_save(ctl.save(&mut nav).await?, "Modified")
        }
        ContestCommands::Remove { id, yes } => {
            let Some(contest) = Resolver::new(service.clone())
                .resolve(Some(id), &mut nav)
                .await?
            else {
                println!("Contest {id} not found");
                return Ok(());
            };
            let mut confirm = TerminalConfirm { assume_yes: yes };
            match DeleteDialog::new(&service, &mut confirm).open(&contest).await {
                DialogClose::Deleted => println!("Removed contest {id}"),
                DialogClose::Dismissed => println!("Contest {id} was not removed"),
            }
            Ok(())
        }
    }
}
