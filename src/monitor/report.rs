//! Report rows and export formats.
//!
//! Rows are preformatted strings so CSV and JSON exports render identically
//! to the status table.

use super::{MonitorSnapshot, OverallStats, TargetStatus};
use crate::probe::{Sample, FAILURE_SAMPLE};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the per-target report table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub seq: usize,
    pub target: String,
    pub status: String,
    pub latency: String,
    pub jitter: String,
    pub packet_loss: String,
    pub min_latency: String,
    pub max_latency: String,
    pub avg_latency: String,
    pub samples: usize,
}

/// Full report document for the JSON export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub session_time: String,
    pub check_count: u64,
    pub overall: OverallStats,
    pub rows: Vec<ReportRow>,
}

/// Status label for a latency sample.
pub fn status_label(sample: Sample) -> &'static str {
    if sample < 0 {
        "offline"
    } else if sample < 100 {
        "excellent"
    } else if sample < 300 {
        "good"
    } else if sample < 500 {
        "moderate"
    } else {
        "slow"
    }
}

/// Jitter label from the stdev of successful samples.
pub fn jitter_label(stdev: f64) -> &'static str {
    if stdev < 30.0 {
        "stable"
    } else if stdev < 50.0 {
        "moderate"
    } else {
        "unstable"
    }
}

/// Format a sample for display. Failures render as "N/A".
pub fn format_latency(sample: Sample) -> String {
    if sample < 0 {
        "N/A".to_string()
    } else {
        format!("{}ms", sample)
    }
}

/// Session wall-clock as HH:MM:SS; zeros when never started.
pub fn session_time(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match start {
        Some(start) => {
            let secs = (now - start).num_seconds().max(0);
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
        None => "00:00:00".to_string(),
    }
}

/// Dated download filename for a report export.
pub fn report_filename(extension: &str) -> String {
    format!("pingboard-report-{}.{}", Utc::now().format("%Y-%m-%d"), extension)
}

/// Build report rows from a sampler snapshot, one per active target.
pub fn build_rows(snapshot: &MonitorSnapshot) -> Vec<ReportRow> {
    snapshot
        .rows
        .iter()
        .enumerate()
        .map(|(i, status)| build_row(i + 1, status))
        .collect()
}

fn build_row(seq: usize, status: &TargetStatus) -> ReportRow {
    let latest = status.latest.unwrap_or(FAILURE_SAMPLE);
    let stats = status.stats.as_ref();
    let dash = || "-".to_string();

    ReportRow {
        seq,
        target: status.target.clone(),
        status: status_label(latest).to_string(),
        latency: format_latency(latest),
        jitter: stats
            .and_then(|s| s.stdev)
            .map(|sd| jitter_label(sd).to_string())
            .unwrap_or_else(dash),
        packet_loss: stats
            .map(|s| format!("{:.1}%", s.packet_loss))
            .unwrap_or_else(dash),
        min_latency: stats
            .and_then(|s| s.min)
            .map(|v| format!("{}ms", v))
            .unwrap_or_else(dash),
        max_latency: stats
            .and_then(|s| s.max)
            .map(|v| format!("{}ms", v))
            .unwrap_or_else(dash),
        avg_latency: stats
            .and_then(|s| s.avg)
            .map(|v| format!("{:.0}ms", v))
            .unwrap_or_else(dash),
        samples: stats.map(|s| s.samples).unwrap_or(0),
    }
}

/// Build the full report document from a snapshot.
pub fn build_report(snapshot: &MonitorSnapshot) -> Report {
    Report {
        generated_at: Utc::now(),
        session_time: snapshot.session_time.clone(),
        check_count: snapshot.check_count,
        overall: snapshot.overall.clone(),
        rows: build_rows(snapshot),
    }
}

/// Render rows as CSV bytes with a header row.
pub fn to_csv(rows: &[ReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            "seq",
            "target",
            "status",
            "latency",
            "jitter",
            "packetLoss",
            "minLatency",
            "maxLatency",
            "avgLatency",
            "samples",
        ])?;

        for row in rows {
            writer.write_record([
                row.seq.to_string(),
                row.target.clone(),
                row.status.clone(),
                row.latency.clone(),
                row.jitter.clone(),
                row.packet_loss.clone(),
                row.min_latency.clone(),
                row.max_latency.clone(),
                row.avg_latency.clone(),
                row.samples.to_string(),
            ])?;
        }

        writer.flush()?;
    }
    Ok(buf)
}
