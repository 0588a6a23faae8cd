//! Printing contests and pictures in the format chosen with `--format`
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use table::CrazyctlTable;
use tabled::{Table, Tabled, builder::Builder};

pub(crate) mod rows;
pub(crate) mod table;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub(crate) enum OutputFormat {
    /// Human readable table
    Table,
    /// Comma-separated values with a header line
    Csv,
    Json,
    Yaml,
}

/// A printable view of one contest or picture
pub(crate) trait Record: Tabled + Serialize {
    /// What a row is called in the summary below a table
    const NOUN: &'static str;
}

/// Format a single object. A table shows one field per line.
pub(crate) fn format_one<R: Record>(record: R, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (header, value) in R::headers().into_iter().zip(record.fields()) {
                builder.push_record([header.into_owned(), value.into_owned()]);
            }
            Ok(builder.build().styled().to_string())
        }
        OutputFormat::Csv => to_csv([record]),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&record)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&record)?),
    }
}

/// Format a list of objects
pub(crate) fn format_seq<R, I>(records: I, fmt: OutputFormat) -> Result<String>
where
    R: Record,
    I: IntoIterator<Item = R>,
{
    let records: Vec<R> = records.into_iter().collect();
    match fmt {
        OutputFormat::Table => {
            let count = records.len();
            let noun = match count {
                1 => R::NOUN.to_string(),
                _ => format!("{}s", R::NOUN),
            };
            Ok(format!("{}\n{count} {noun} found", Table::new(records).styled()))
        }
        OutputFormat::Csv => to_csv(records),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&records)?),
    }
}

fn to_csv<R: Serialize>(records: impl IntoIterator<Item = R>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}
