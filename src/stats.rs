use crate::model::{CommitSummary, LineRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub language: String,
    pub count: usize,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLineCount {
    pub file: String,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileUnits<'a> {
    pub file: &'a str,
    pub lines: Vec<&'a LineRecord>,
}

pub fn commit_lines<'a, I>(commits: I) -> impl Iterator<Item = &'a LineRecord>
where
    I: IntoIterator<Item = &'a CommitSummary>,
{
    commits.into_iter().flat_map(|c| c.lines().iter())
}

pub fn total_line_count<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> usize {
    lines.into_iter().count()
}

pub fn commit_count<'a>(commits: impl IntoIterator<Item = &'a CommitSummary>) -> usize {
    commits.into_iter().count()
}

pub fn distinct_file_count<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> usize {
    lines
        .into_iter()
        .map(|l| l.file.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn max_depth<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> u32 {
    lines.into_iter().map(|l| l.depth).max().unwrap_or(0)
}

pub fn max_line_length<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> u32 {
    lines.into_iter().map(|l| l.length).max().unwrap_or(0)
}

pub fn max_lines_in_any_file<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> u32 {
    let mut per_file: HashMap<&str, u32> = HashMap::new();
    for l in lines {
        let entry = per_file.entry(l.file.as_str()).or_insert(0);
        *entry = (*entry).max(l.line);
    }
    per_file.into_values().max().unwrap_or(0)
}

/// Lines per language in first-seen order, with each language's share of the total.
pub fn category_breakdown<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> Vec<CategoryShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut total = 0usize;

    for l in lines {
        total += 1;
        match index.get(l.language.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(l.language.as_str(), counts.len());
                counts.push((l.language.as_str(), 1));
            }
        }
    }

    counts
        .into_iter()
        .map(|(language, count)| CategoryShare {
            language: language.to_string(),
            count,
            proportion: count as f64 / total as f64,
        })
        .collect()
}

/// Records grouped by file in first-seen order; within a file, input order.
pub fn per_file_line_units<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> Vec<FileUnits<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut files: Vec<FileUnits<'a>> = Vec::new();

    for l in lines {
        match index.get(l.file.as_str()) {
            Some(&i) => files[i].lines.push(l),
            None => {
                index.insert(l.file.as_str(), files.len());
                files.push(FileUnits {
                    file: l.file.as_str(),
                    lines: vec![l],
                });
            }
        }
    }

    files
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeStats {
    pub commits: usize,
    pub total_lines: usize,
    pub files: usize,
    pub max_depth: u32,
    pub max_line_length: u32,
    pub max_lines_in_file: u32,
    pub languages: Vec<CategoryShare>,
    pub file_lines: Vec<FileLineCount>,
}

impl ScopeStats {
    pub fn from_commits<'a, I>(commits: I) -> Self
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let commits: Vec<&CommitSummary> = commits.into_iter().collect();
        let lines: Vec<&LineRecord> = commit_lines(commits.iter().copied()).collect();

        let file_lines = per_file_line_units(lines.iter().copied())
            .into_iter()
            .map(|u| FileLineCount {
                file: u.file.to_string(),
                lines: u.lines.len(),
            })
            .collect::<Vec<_>>();

        Self {
            commits: commit_count(commits.iter().copied()),
            total_lines: total_line_count(lines.iter().copied()),
            files: file_lines.len(),
            max_depth: max_depth(lines.iter().copied()),
            max_line_length: max_line_length(lines.iter().copied()),
            max_lines_in_file: max_lines_in_any_file(lines.iter().copied()),
            languages: category_breakdown(lines.iter().copied()),
            file_lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits == 0
    }
}
