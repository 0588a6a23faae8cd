use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Url of the crazypic server, overrides the saved configuration"
    )]
    pub(crate) server: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    #[command(about = "Save the server to use for all following commands")]
    Connect {
        #[arg(help = "Url of the server, e.g. http://localhost:8080")]
        url: Option<String>,
    },
    #[command(about = "Forget the saved server")]
    Disconnect,
    #[command(about = "Show the current configuration")]
    Status,
    #[command(about = "Manage contests")]
    Contests {
        #[command(subcommand)]
        command: ContestCommands,
    },
    #[command(about = "Manage pictures")]
    Pictures {
        #[command(subcommand)]
        command: PictureCommands,
    },
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub(crate) struct OutputOptions {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, help = "Output format")]
    pub(crate) format: OutputFormat,
    #[arg(long, help = "Show all fields")]
    pub(crate) full: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PageOptions {
    #[arg(long, help = "Page of results to show, starting at 0")]
    pub(crate) page: Option<u32>,
    #[arg(long, help = "Number of results per page")]
    pub(crate) size: Option<u32>,
    #[arg(long, help = "Sort by a field, e.g. 'name,desc'. Can be repeated")]
    pub(crate) sort: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ContestCommands {
    #[command(about = "List contests")]
    List {
        #[command(flatten)]
        page: PageOptions,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Show all details about a contest")]
    Show {
        id: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Add a new contest. Prompts for values when none are given")]
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, help = "Start date as YYYY-MM-DDTHH:MM, defaults to today")]
        start: Option<String>,
        #[arg(long, help = "End date as YYYY-MM-DDTHH:MM, defaults to today")]
        end: Option<String>,
        #[arg(long = "user")]
        user_id: Option<i64>,
    },
    #[command(
        about="Modify properties of a contest",
        group(
            clap::ArgGroup::new("modify")
                .required(true)
                .multiple(true)
                .args(&["name", "url", "start", "end", "user_id"]),
        ))]
    Modify {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, help = "Start date as YYYY-MM-DDTHH:MM")]
        start: Option<String>,
        #[arg(long, help = "End date as YYYY-MM-DDTHH:MM")]
        end: Option<String>,
        #[arg(long = "user")]
        user_id: Option<i64>,
        #[arg(long, help = "Only send the given values instead of the whole contest")]
        partial: bool,
    },
    #[command(about = "Remove a contest")]
    Remove {
        id: i64,
        #[arg(short, long, help = "Don't ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum PictureCommands {
    #[command(about = "List pictures")]
    List {
        #[command(flatten)]
        page: PageOptions,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Show all details about a picture")]
    Show {
        id: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Add a new picture. Prompts for values when none are given")]
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        photograph: Option<String>,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        votes: Option<i32>,
        #[arg(long)]
        note: Option<i64>,
        #[arg(long, help = "Id of the contest the picture is submitted to")]
        contest: Option<i64>,
    },
    #[command(
        about="Modify properties of a picture",
        group(
            clap::ArgGroup::new("modify")
                .required(true)
                .multiple(true)
                .args(&["name", "url", "photograph", "comment", "votes", "note", "contest", "no_contest"]),
        ))]
    Modify {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        photograph: Option<String>,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        votes: Option<i32>,
        #[arg(long)]
        note: Option<i64>,
        #[arg(long, conflicts_with = "no_contest")]
        contest: Option<i64>,
        #[arg(long, help = "Remove the picture from its contest")]
        no_contest: bool,
        #[arg(long, help = "Only send the given values instead of the whole picture")]
        partial: bool,
    },
    #[command(about = "Remove a picture")]
    Remove {
        id: i64,
        #[arg(short, long, help = "Don't ask for confirmation")]
        yes: bool,
    },
}
