use crate::SimulationSummary;
use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use tracing::debug;

fn format_summary(id: usize, summary: &SimulationSummary) -> String {
    const WIDTH: usize = 80;
    let sim_num = format!("simulation #{}", id);
    format!("{:-^WIDTH$}\n{}{}\n", sim_num, summary, "-".repeat(WIDTH))
}

/// Writes `summaries` to `writer` in id order, as a JSON array if `json` is set.
pub fn write_summaries_to<W: Write>(
    summaries: &BTreeMap<usize, SimulationSummary>,
    writer: &mut W,
    json: bool,
) -> io::Result<()> {
    if json {
        let ordered = summaries.values().collect::<Vec<&SimulationSummary>>();
        serde_json::to_writer_pretty(&mut *writer, &ordered).map_err(io::Error::from)?;
        writeln!(writer)?;
    } else {
        for (id, summary) in summaries {
            writer.write_all(format_summary(*id, summary).as_bytes())?;
        }
    }
    writer.flush()
}

/// Collects summaries sent by simulation threads, merging every summary that shares an id.
/// A `None` marks that the simulation with that id is finished, once every id in `ids` is finished
/// (or every sender is gone) the merged summaries are written to `writer`.
pub fn write_summaries(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
    mut writer: impl Write,
    json: bool,
) -> io::Result<()> {
    let mut summaries: BTreeMap<usize, SimulationSummary> = BTreeMap::new();
    while !ids.is_empty() {
        let (cur_summary, id) = match receiver.recv() {
            Ok(message) => message,
            Err(_) => break,
        };
        match cur_summary {
            Some(cur_sum) => {
                debug!(id, "received summary");
                if let Some(summary) = summaries.get_mut(&id) {
                    summary.merge(&cur_sum);
                } else {
                    summaries.insert(id, cur_sum);
                }
            }
            None => {
                ids.remove(&id);
            }
        }
    }

    write_summaries_to(&summaries, &mut writer, json)
}
