use crate::model::{CommitSummary, LineRecord};
use std::collections::HashMap;
use tracing::debug;

/// Group line records into one summary per commit id.
pub fn aggregate_commits(records: Vec<LineRecord>) -> Vec<CommitSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineRecord>> = Vec::new();

    for record in records {
        match index.get(&record.commit_id) {
            Some(&i) => groups[i].push(record),
            None => {
                index.insert(record.commit_id.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    let commits: Vec<CommitSummary> = groups
        .into_iter()
        .filter_map(|lines| {
            let first = lines.first()?;
            let (id, author, timestamp) =
                (first.commit_id.clone(), first.author.clone(), first.timestamp);
            Some(CommitSummary::new(id, author, timestamp, lines))
        })
        .collect();

    debug!(commits = commits.len(), "aggregated commits");
    commits
}
