use super::Record;
use libcrazypic::{contest::Contest, picture::Picture};
use serde::Serialize;
use tabled::Tabled;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

fn display_date(date: Option<OffsetDateTime>) -> Option<String> {
    date.and_then(|d| d.format(&Rfc3339).ok())
}

fn display_contest(contest: &Option<Contest>) -> Option<String> {
    contest.as_ref().map(|c| match c.id {
        Some(id) => format!("{} ({id})", c.name),
        None => c.name.clone(),
    })
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct ContestRow {
    #[tabled(display("tabled::derive::display::option", ""))]
    id: Option<i64>,
    name: String,
    url: String,
}

impl Record for ContestRow {
    const NOUN: &'static str = "contest";
}

impl ContestRow {
    pub(crate) fn new(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            name: contest.name.clone(),
            url: contest.url.clone(),
        }
    }
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct ContestRowFull {
    #[tabled(display("tabled::derive::display::option", ""))]
    id: Option<i64>,
    name: String,
    url: String,
    #[tabled(display("tabled::derive::display::option", ""), rename = "Start")]
    start_date: Option<String>,
    #[tabled(display("tabled::derive::display::option", ""), rename = "End")]
    end_date: Option<String>,
    #[tabled(display("tabled::derive::display::option", ""), rename = "User")]
    user_id: Option<i64>,
    #[tabled(display("tabled::derive::display::option", ""))]
    pictures: Option<usize>,
}

impl Record for ContestRowFull {
    const NOUN: &'static str = "contest";
}

impl ContestRowFull {
    pub(crate) fn new(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            name: contest.name.clone(),
            url: contest.url.clone(),
            start_date: display_date(contest.start_date),
            end_date: display_date(contest.end_date),
            user_id: contest.user_id,
            pictures: contest.pictures.as_ref().map(Vec::len),
        }
    }
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct PictureRow {
    #[tabled(display("tabled::derive::display::option", ""))]
    id: Option<i64>,
    name: String,
    #[tabled(display("tabled::derive::display::option", ""))]
    contest: Option<String>,
}

impl Record for PictureRow {
    const NOUN: &'static str = "picture";
}

impl PictureRow {
    pub(crate) fn new(picture: &Picture) -> Self {
        Self {
            id: picture.id,
            name: picture.name.clone(),
            contest: display_contest(&picture.contest_id),
        }
    }
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct PictureRowFull {
    #[tabled(display("tabled::derive::display::option", ""))]
    id: Option<i64>,
    name: String,
    url: String,
    #[tabled(display("tabled::derive::display::option", ""))]
    comment: Option<String>,
    #[tabled(display("tabled::derive::display::option", ""), rename = "Votes")]
    nb_votes: Option<i32>,
    #[tabled(display("tabled::derive::display::option", ""))]
    note: Option<i64>,
    #[tabled(display("tabled::derive::display::option", ""))]
    contest: Option<String>,
    #[tabled(skip)]
    photograph: Option<String>,
}

impl Record for PictureRowFull {
    const NOUN: &'static str = "picture";
}

impl PictureRowFull {
    pub(crate) fn new(picture: &Picture) -> Self {
        Self {
            id: picture.id,
            name: picture.name.clone(),
            url: picture.url.clone(),
            comment: picture.comment.clone(),
            nb_votes: picture.nb_votes,
            note: picture.note,
            contest: display_contest(&picture.contest_id),
            photograph: picture.photograph.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{OutputFormat, format_one, format_seq};
    use time::macros::datetime;

    fn contest() -> Contest {
        Contest {
            id: Some(1),
            ..Contest::new(
                "Spring".into(),
                "http://spring".into(),
                Some(datetime!(2021-03-20 00:00 UTC)),
                None,
                None,
            )
        }
    }

    #[test]
    fn test_contest_rows_json() {
        let s = format_one(ContestRowFull::new(&contest()), OutputFormat::Json).expect("format");
        let value: serde_json::Value = serde_json::from_str(&s).expect("parse");
        assert_eq!(value["start_date"], "2021-03-20T00:00:00Z");
        assert_eq!(value["end_date"], serde_json::Value::Null);
        assert_eq!(value["name"], "Spring");
    }

    #[test]
    fn test_picture_rows_csv() {
        let pictures = [
            Picture {
                id: Some(2),
                ..Picture::new("Tulip".into(), "http://tulip".into(), Some(contest()))
            },
            Picture {
                id: Some(3),
                ..Picture::new("Rose".into(), "http://rose".into(), None)
            },
        ];
        let s = format_seq(pictures.iter().map(PictureRow::new), OutputFormat::Csv).expect("csv");
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines[0], "id,name,contest");
        assert_eq!(lines[1], "2,Tulip,Spring (1)");
        assert_eq!(lines[2], "3,Rose,");
    }

    #[test]
    fn test_table_counts_records() {
        let s = format_seq([ContestRow::new(&contest())], OutputFormat::Table).expect("table");
        assert!(s.ends_with("1 contest found"));
        assert!(s.contains("Spring"));
        let s = format_seq(Vec::<PictureRow>::new(), OutputFormat::Table).expect("table");
        assert!(s.ends_with("0 pictures found"));
    }

    #[test]
    fn test_single_contest_formats() {
        let s = format_one(ContestRowFull::new(&contest()), OutputFormat::Table).expect("table");
        let start = s.lines().find(|l| l.contains("Start")).expect("start line");
        assert!(start.contains("2021-03-20T00:00:00Z"));

        let s = format_one(ContestRow::new(&contest()), OutputFormat::Csv).expect("csv");
        assert_eq!(s.lines().collect::<Vec<_>>(), ["id,name,url", "1,Spring,http://spring"]);
    }
}
