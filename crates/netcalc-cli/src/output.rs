//! Rendering of calculation results
//!
//! Every record prints in four formats. Human output is a labelled table,
//! JSON comes straight from the records' `Serialize` impls and CSV uses the
//! same fields as the human table.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use netcalc_core::CalcError;
use netcalc_subnet::report::PrefixRow;
use netcalc_subnet::{Ipv4Report, Ipv6Report, NeedReport, Report};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// One labelled value of a record
pub struct Field {
    /// CSV column name
    pub key: &'static str,
    /// Human table label
    pub label: &'static str,
    /// `None` when the value does not apply
    pub value: Option<String>,
}

impl Field {
    fn new(key: &'static str, label: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            label,
            value: Some(value.to_string()),
        }
    }

    fn optional(key: &'static str, label: &'static str, value: Option<String>) -> Self {
        Self { key, label, value }
    }
}

/// A record that can be printed in every [`OutputFormat`]
pub trait Render: Serialize {
    fn title(&self) -> String;
    fn fields(&self) -> Vec<Field>;
}

impl Render for Ipv4Report {
    fn title(&self) -> String {
        "Network Information (IPv4)".to_string()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("ip", "IP Address", &self.ip),
            Field::new("cidr", "CIDR Notation", format!("/{}", self.cidr)),
            Field::new("network", "Network Address", &self.network),
            Field::optional("first_usable", "First Usable", self.first_usable.clone()),
            Field::optional("last_usable", "Last Usable", self.last_usable.clone()),
            Field::new("broadcast", "Broadcast Address", &self.broadcast),
            Field::new("total_hosts", "Total Hosts", self.total_hosts),
            Field::new("usable_hosts", "Usable Hosts", self.usable_hosts),
            Field::new("mask", "Subnet Mask", &self.mask),
            Field::new("wildcard", "Wildcard Mask", &self.wildcard),
            Field::new("binary_mask", "Binary Mask", &self.binary_mask),
            Field::new("ip_class", "IP Class", self.ip_class),
            Field::new("ip_type", "IP Type", self.ip_type),
        ]
    }
}

impl Render for NeedReport {
    fn title(&self) -> String {
        format!("Subnet for {} Hosts (IPv4)", self.needed)
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("ip", "IP Address", &self.ip),
            Field::new("needed", "Hosts Needed", self.needed),
            Field::new("cidr", "CIDR Notation", format!("/{}", self.cidr)),
            Field::new("network", "Network Address", &self.network),
            Field::optional("first_usable", "First Usable", self.first_usable.clone()),
            Field::optional("last_usable", "Last Usable", self.last_usable.clone()),
            Field::new("broadcast", "Broadcast Address", &self.broadcast),
            Field::new("mask", "Subnet Mask", &self.mask),
            Field::new("usable_hosts", "Usable Hosts", self.usable_hosts),
        ]
    }
}

impl Render for Ipv6Report {
    fn title(&self) -> String {
        "Network Information (IPv6)".to_string()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("canonical", "Canonical", &self.canonical),
            Field::new("expanded", "Expanded", &self.expanded),
            Field::new("start", "Start Address", &self.start),
            Field::new("end", "End Address", &self.end),
            Field::new("prefix", "Prefix", format!("/{}", self.prefix)),
            Field::new("host_bits", "Host Bits", self.host_bits),
            Field::new("host_count", "Host Count", &self.host_count),
        ]
    }
}

impl Render for Report {
    fn title(&self) -> String {
        match self {
            Report::Ipv4(r) => r.title(),
            Report::Ipv6(r) => r.title(),
        }
    }

    fn fields(&self) -> Vec<Field> {
        match self {
            Report::Ipv4(r) => r.fields(),
            Report::Ipv6(r) => r.fields(),
        }
    }
}

impl Render for PrefixRow {
    fn title(&self) -> String {
        format!("/{}", self.prefix)
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("prefix", "Prefix", format!("/{}", self.prefix)),
            Field::new("mask", "Subnet Mask", &self.mask),
            Field::new("total_hosts", "Total Hosts", self.total_hosts),
            Field::new("usable_hosts", "Usable Hosts", self.usable_hosts),
        ]
    }
}

/// Print one record
pub fn print_record<W: Write, T: Render>(
    out: &mut W,
    record: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => print_human(out, record)?,
        OutputFormat::Json => print_json(out, record, true)?,
        OutputFormat::JsonCompact => print_json(out, record, false)?,
        OutputFormat::Csv => print_csv(out, std::slice::from_ref(record))?,
    }
    Ok(())
}

/// Print a list of records
///
/// JSON formats emit a single array; CSV emits one header row.
pub fn print_records<W: Write, T: Render>(
    out: &mut W,
    records: &[T],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for record in records {
                print_human(out, record)?;
            }
        }
        OutputFormat::Json => print_json(out, &records, true)?,
        OutputFormat::JsonCompact => print_json(out, &records, false)?,
        OutputFormat::Csv => print_csv(out, records)?,
    }
    Ok(())
}

/// Print a validation error in the requested format
pub fn print_error<W: Write>(out: &mut W, err: &CalcError, format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct ErrorRecord<'a> {
        kind: netcalc_core::ErrorKind,
        message: &'a str,
    }

    let record = ErrorRecord {
        kind: err.kind(),
        message: err.message(),
    };

    match format {
        OutputFormat::Human => writeln!(out, "{} {}", "✗".red(), err.to_string().red())?,
        OutputFormat::Json => print_json(out, &record, true)?,
        OutputFormat::JsonCompact => print_json(out, &record, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["kind", "message"])?;
            wtr.write_record([record.kind.to_string().as_str(), record.message])?;
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_human<W: Write, T: Render>(out: &mut W, record: &T) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", record.title().bold().cyan())?;
    writeln!(out, "{}", "─".repeat(50).dimmed())?;
    for field in record.fields() {
        match field.value {
            Some(value) => writeln!(out, "{:>18}: {}", field.label.bold(), value)?,
            None => writeln!(out, "{:>18}: {}", field.label.bold(), "-".dimmed())?,
        }
    }
    writeln!(out)?;
    Ok(())
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        writeln!(out, "{}", serde_json::to_string(value)?)?;
    }
    Ok(())
}

fn print_csv<W: Write, T: Render>(out: &mut W, records: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut header_written = false;
    for record in records {
        let fields = record.fields();
        if !header_written {
            wtr.write_record(fields.iter().map(|f| f.key))?;
            header_written = true;
        }
        wtr.write_record(fields.iter().map(|f| f.value.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}
