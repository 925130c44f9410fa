//! Parallel batch calculation using Rayon
//!
//! Each input line is one CIDR string of either family. Lines are
//! independent, so they are mapped over a thread pool and collected back in
//! input order. A bad line yields an error entry; it never aborts the batch.

use anyhow::Result;
use netcalc_core::{CalcError, ErrorKind};
use netcalc_subnet::{calculate, Report};
use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::io::BufRead;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::output::{Field, Render};

/// Outcome of one batch line
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub input: String,
    pub result: std::result::Result<Report, CalcError>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Calculate every line, preserving input order
    pub fn process(&self, inputs: Vec<String>) -> Vec<BatchEntry> {
        let total = inputs.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            inputs
                .into_par_iter()
                .map(|input| {
                    let result = calculate(&input);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        debug!("Processed {}/{} lines", count, total);
                    }

                    BatchEntry { input, result }
                })
                .collect()
        })
    }

    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Read batch lines, skipping blanks and `#` comments
pub fn read_inputs<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        inputs.push(line.to_string());
    }
    Ok(inputs)
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    kind: ErrorKind,
    message: &'a str,
}

impl Serialize for BatchEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BatchEntry", 3)?;
        state.serialize_field("input", &self.input)?;
        match &self.result {
            Ok(report) => {
                state.serialize_field("report", report)?;
                state.serialize_field("error", &None::<ErrorRecord>)?;
            }
            Err(err) => {
                state.serialize_field("report", &None::<Report>)?;
                state.serialize_field(
                    "error",
                    &Some(ErrorRecord {
                        kind: err.kind(),
                        message: err.message(),
                    }),
                )?;
            }
        }
        state.end()
    }
}

impl Render for BatchEntry {
    fn title(&self) -> String {
        self.input.clone()
    }

    // Flat columns shared by both families so one CSV header fits every row.
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field {
            key: "input",
            label: "Input",
            value: Some(self.input.clone()),
        }];

        let (family, first, last, prefix, total, usable, error) = match &self.result {
            Ok(Report::Ipv4(r)) => (
                Some("ipv4".to_string()),
                Some(r.network.clone()),
                Some(r.broadcast.clone()),
                Some(format!("/{}", r.cidr)),
                Some(r.total_hosts.to_string()),
                Some(r.usable_hosts.to_string()),
                None,
            ),
            Ok(Report::Ipv6(r)) => (
                Some("ipv6".to_string()),
                Some(r.start.clone()),
                Some(r.end.clone()),
                Some(format!("/{}", r.prefix)),
                Some(r.host_count.to_string()),
                None,
                None,
            ),
            Err(err) => (None, None, None, None, None, None, Some(err.to_string())),
        };

        fields.extend([
            Field { key: "family", label: "Family", value: family },
            Field { key: "first", label: "First Address", value: first },
            Field { key: "last", label: "Last Address", value: last },
            Field { key: "prefix", label: "Prefix", value: prefix },
            Field { key: "total", label: "Total Addresses", value: total },
            Field { key: "usable", label: "Usable Hosts", value: usable },
            Field { key: "error", label: "Error", value: error },
        ]);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_batch_processor_creation() {
        let processor = BatchProcessor::new(Some(4));
        assert!(processor.is_ok());
        assert_eq!(processor.unwrap().thread_count(), 4);
    }

    #[test]
    fn test_batch_processor_default_threads() {
        let processor = BatchProcessor::new(None).unwrap();
        assert!(processor.thread_count() > 0);
    }

    #[test]
    fn test_read_inputs() {
        let text = "# subnets\n10.0.0.0/8\n\n  2001:db8::/32  \n";
        let inputs = read_inputs(Cursor::new(text)).unwrap();
        assert_eq!(inputs, vec!["10.0.0.0/8", "2001:db8::/32"]);
    }

    #[test]
    fn test_process_preserves_order_and_errors() {
        let processor = BatchProcessor::new(Some(2)).unwrap();
        let inputs: Vec<String> = (0..200)
            .map(|i| {
                if i % 50 == 0 {
                    format!("10.0.0.{}/33", i)
                } else {
                    format!("10.0.{}.1/24", i)
                }
            })
            .collect();

        let entries = processor.process(inputs.clone());
        assert_eq!(entries.len(), 200);

        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.input, inputs[i]);
            if i % 50 == 0 {
                let err = entry.result.as_ref().unwrap_err();
                assert_eq!(err.kind(), ErrorKind::OutOfRange);
            } else {
                match &entry.result {
                    Ok(Report::Ipv4(r)) => assert_eq!(r.network, format!("10.0.{}.0", i)),
                    other => panic!("unexpected result: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_entry_serialization() {
        let processor = BatchProcessor::new(Some(1)).unwrap();
        let entries = processor.process(vec!["2001:db8::/48".to_string(), "1.2.3".to_string()]);

        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["report"]["family"], "ipv6");
        assert!(json[0]["error"].is_null());
        assert!(json[1]["report"].is_null());
        assert_eq!(json[1]["error"]["kind"], "invalid_format");
    }

    #[test]
    fn test_entry_fields() {
        let processor = BatchProcessor::new(Some(1)).unwrap();
        let entries = processor.process(vec!["192.168.0.0/30".to_string(), "::/0".to_string()]);

        let values: Vec<Option<String>> = entries[0].fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values[1].as_deref(), Some("ipv4"));
        assert_eq!(values[3].as_deref(), Some("192.168.0.3"));
        assert_eq!(values[6].as_deref(), Some("2"));

        let values: Vec<Option<String>> = entries[1].fields().into_iter().map(|f| f.value).collect();
        assert_eq!(values[5].as_deref(), Some("340282366920938463463374607431768211456"));
        assert_eq!(values[6], None);
    }
}
